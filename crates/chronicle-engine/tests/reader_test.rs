//! TemporalReader against SQLite.

use chronicle_core::config::ChronicleConfig;
use chronicle_core::models::Value;
use chronicle_core::StaticCatalog;
use chronicle_engine::{MutationEngine, TemporalReader};
use chronicle_query::{IntervalRelation, Predicate, StatementCompiler, SystemTimeRelation};
use chronicle_storage::{ensure_table, SqliteSession};
use test_fixtures::{allen_fixture, catalog, date, timestamp, trade, trades_schema, ALLEN_WINDOW, TRADE};

fn session() -> SqliteSession {
    let session = SqliteSession::open_in_memory().unwrap();
    session
        .with_writer(|conn| ensure_table(conn, &trades_schema()))
        .unwrap();
    session
}

fn engine(session: &SqliteSession) -> MutationEngine<&SqliteSession, StaticCatalog> {
    MutationEngine::from_config(session, catalog(), &ChronicleConfig::default())
        .with_clock(|| timestamp(12, 0, 0))
}

#[test]
fn find_honours_filters_and_limit() {
    let session = session();
    engine(&session).insert_versioned(TRADE, &allen_fixture()).unwrap();
    let engine = engine(&session);
    let reader = engine.reader();

    assert_eq!(reader.find(TRADE, &[], None).unwrap().len(), 10);
    assert_eq!(reader.find(TRADE, &[], Some(3)).unwrap().len(), 3);
    assert_eq!(reader.find(TRADE, &[], Some(-1)).unwrap().len(), 10);
    let gt = Predicate::gt("id", 8_i64).unwrap();
    assert_eq!(reader.find(TRADE, &[gt], None).unwrap().len(), 2);
}

#[test]
fn current_returns_the_open_version() {
    let session = session();
    let engine = engine(&session);
    engine.insert_versioned(TRADE, &[trade(1, 1, 31, "v1")]).unwrap();
    engine.insert_versioned(TRADE, &[trade(1, 1, 31, "v2")]).unwrap();

    let current = engine.reader().current(TRADE, 1_i64).unwrap().unwrap();
    assert_eq!(current.field("symbol"), Some(&Value::Text("v2".into())));
    assert!(engine.reader().current(TRADE, 2_i64).unwrap().is_none());
}

#[test]
fn as_of_sees_the_version_current_at_the_instant() {
    let session = session();
    let engine = engine(&session);
    engine.insert_versioned(TRADE, &[trade(1, 1, 31, "v1")]).unwrap();
    let mut v2 = trade(1, 1, 31, "v2");
    v2.system_time.start = timestamp(12, 0, 0);
    engine.insert_versioned(TRADE, &[v2]).unwrap();

    let reader = engine.reader();
    let morning = reader.as_of(TRADE, &[], timestamp(9, 0, 0)).unwrap();
    assert_eq!(morning.len(), 1);
    assert_eq!(morning[0].field("symbol"), Some(&Value::Text("v1".into())));

    let evening = reader.as_of(TRADE, &[], timestamp(18, 0, 0)).unwrap();
    assert_eq!(evening.len(), 1);
    assert_eq!(evening[0].field("symbol"), Some(&Value::Text("v2".into())));
}

#[test]
fn valid_during_overlaps_matches_allen_fixture() {
    let session = session();
    engine(&session).insert_versioned(TRADE, &allen_fixture()).unwrap();

    let (ws, we) = ALLEN_WINDOW;
    let relation = IntervalRelation::Overlaps {
        start: date(ws).into(),
        end: date(we).into(),
    };
    let rows = engine(&session)
        .reader()
        .valid_during(TRADE, &[], &relation)
        .unwrap();
    assert_eq!(rows.len(), 6);
}

#[test]
fn system_during_between_finds_superseded_versions() {
    let session = session();
    let engine = engine(&session);
    engine.insert_versioned(TRADE, &[trade(1, 1, 31, "v1")]).unwrap();
    engine.insert_versioned(TRADE, &[trade(1, 1, 31, "v2")]).unwrap();

    let relation = SystemTimeRelation::Between {
        start: timestamp(0, 0, 0).into(),
        end: timestamp(23, 0, 0).into(),
    };
    let rows = engine.reader().system_during(TRADE, &[], &relation).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field("symbol"), Some(&Value::Text("v1".into())));
}

#[test]
fn reader_can_be_built_directly() {
    let session = session();
    engine(&session).insert_versioned(TRADE, &[trade(5, 1, 2, "X")]).unwrap();

    let reader = TemporalReader::new(
        &session,
        StatementCompiler::new(catalog(), Default::default()),
    );
    assert_eq!(reader.find(TRADE, &[], None).unwrap().len(), 1);
}
