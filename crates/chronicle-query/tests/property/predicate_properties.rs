//! Property tests for predicate rendering.

use proptest::prelude::*;

use chronicle_core::models::Value;
use chronicle_query::{ComparisonOp, Predicate};

fn op() -> impl Strategy<Value = ComparisonOp> {
    prop_oneof![
        Just(ComparisonOp::Eq),
        Just(ComparisonOp::Ne),
        Just(ComparisonOp::Lt),
        Just(ComparisonOp::Le),
        Just(ComparisonOp::Gt),
        Just(ComparisonOp::Ge),
    ]
}

fn leaf() -> impl Strategy<Value = Predicate> {
    let value = prop_oneof![
        any::<i64>().prop_map(Value::Int),
        "[A-Z]{1,5}".prop_map(Value::Text),
        (1i32..9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            Value::Date(chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap())
        }),
    ];
    ("[a-z_]{1,12}", op(), value)
        .prop_map(|(column, op, value)| Predicate::comparison(column, op, value).unwrap())
}

fn tree() -> impl Strategy<Value = Predicate> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::and),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::or),
            inner.prop_map(Predicate::not),
        ]
    })
}

proptest! {
    #[test]
    fn render_is_deterministic(p in tree()) {
        let first = p.render().unwrap();
        let again = p.clone().render().unwrap();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn single_child_groups_render_as_the_child(p in tree()) {
        let alone = p.render().unwrap();
        prop_assert_eq!(Predicate::and([p.clone()]).render().unwrap(), alone.clone());
        prop_assert_eq!(Predicate::or([p]).render().unwrap(), alone);
    }

    #[test]
    fn multi_child_groups_are_parenthesized(children in prop::collection::vec(leaf(), 2..6)) {
        let parts: Vec<String> = children.iter().map(|c| c.render().unwrap()).collect();
        prop_assert_eq!(
            Predicate::and(children.clone()).render().unwrap(),
            format!("({})", parts.join(" AND "))
        );
        prop_assert_eq!(
            Predicate::or(children).render().unwrap(),
            format!("({})", parts.join(" OR "))
        );
    }

    #[test]
    fn not_prefixes_rendering(p in tree()) {
        let inner = p.render().unwrap();
        prop_assert_eq!(Predicate::not(p).render().unwrap(), format!("NOT {inner}"));
    }

    #[test]
    fn structural_equality_tracks_rendering(a in tree(), b in tree()) {
        if a == b {
            prop_assert_eq!(a.render().unwrap(), b.render().unwrap());
        }
    }
}
