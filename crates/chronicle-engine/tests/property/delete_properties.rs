//! Property tests for the valid-time-scoped delete.

use chrono::Datelike;
use proptest::prelude::*;

use chronicle_core::config::ChronicleConfig;
use chronicle_engine::{MutationEngine, ValidWindow};
use chronicle_storage::{ensure_table, SqliteSession};
use test_fixtures::{catalog, date, trade, trades_schema, TRADE};

fn overlaps(ws: u32, we: u32, s: u32, e: u32) -> bool {
    (ws < s && s < we) || (s < ws && ws < e) || s == ws
}

/// Periods left after deleting `[ws, we)` from a single row `[s, e]`.
fn expected_periods(s: u32, e: u32, ws: u32, we: u32) -> Vec<(u32, u32)> {
    if !overlaps(ws, we, s, e) {
        return Vec::new();
    }
    let mut left = Vec::new();
    if s < ws {
        left.push((s, ws));
    }
    if e > we {
        left.push((we, e));
    }
    left
}

fn arb_row_and_window() -> impl Strategy<Value = (u32, u32, u32, u32)> {
    (1u32..=28, 0u32..=10, 1u32..=28, 1u32..=10)
        .prop_map(|(s, len, ws, wlen)| (s, (s + len).min(28), ws, (ws + wlen).min(28)))
        .prop_filter("window must be non-empty", |&(_, _, ws, we)| ws < we)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_single_row_delete_keeps_exactly_the_remainders((s, e, ws, we) in arb_row_and_window()) {
        let session = SqliteSession::open_in_memory().unwrap();
        session
            .with_writer(|conn| ensure_table(conn, &trades_schema()))
            .unwrap();
        let engine = MutationEngine::from_config(&session, catalog(), &ChronicleConfig::default());
        engine.insert_versioned(TRADE, &[trade(1, s, e, "P")]).unwrap();

        engine
            .delete_within(TRADE, &[], ValidWindow::new(date(ws), date(we)).unwrap())
            .unwrap();

        let mut periods: Vec<(u32, u32)> = engine
            .reader()
            .find(TRADE, &[], None)
            .unwrap()
            .iter()
            .map(|r| (r.valid_time.start.day(), r.valid_time.end.day()))
            .collect();
        periods.sort_unstable();

        prop_assert_eq!(periods, expected_periods(s, e, ws, we));
    }
}
