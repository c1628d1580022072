//! Versioned insert against SQLite: one open version per identity, and the
//! previous version closed at the instant of the second insert.

use chronicle_core::config::ChronicleConfig;
use chronicle_core::models::{SystemPeriod, Value};
use chronicle_core::StaticCatalog;
use chronicle_engine::{system_now, MutationEngine, StepKind};
use chronicle_query::Predicate;
use chronicle_storage::{ensure_table, SqliteSession};
use test_fixtures::{catalog, timestamp, trade, trades_schema, TRADE};

fn session() -> SqliteSession {
    let session = SqliteSession::open_in_memory().unwrap();
    session
        .with_writer(|conn| ensure_table(conn, &trades_schema()))
        .unwrap();
    session
}

fn engine(session: &SqliteSession) -> MutationEngine<&SqliteSession, StaticCatalog> {
    MutationEngine::from_config(session, catalog(), &ChronicleConfig::default())
}

fn noon() -> chrono::NaiveDateTime {
    timestamp(12, 0, 0)
}

// ═══════════════════════════════════════════════════════════════════════════
// Single open version
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn first_insert_has_nothing_to_close() {
    let session = session();
    let report = engine(&session)
        .insert_versioned(TRADE, &[trade(1, 1, 31, "AAPL")])
        .unwrap();
    assert_eq!(
        report.kinds(),
        vec![StepKind::ReadOpenVersion, StepKind::InsertVersions]
    );
    assert_eq!(report.rows_written(), 1);
}

#[test]
fn second_insert_closes_previous_version_between_before_and_after() {
    let session = session();
    let engine = engine(&session);
    engine
        .insert_versioned(TRADE, &[trade(1, 1, 31, "AAPL")])
        .unwrap();

    let before = system_now();
    let mut second = trade(1, 1, 31, "AAPL.v2");
    second.system_time = SystemPeriod::open_from(before);
    let report = engine.insert_versioned(TRADE, &[second]).unwrap();
    let after = system_now();

    assert_eq!(
        report.kinds(),
        vec![
            StepKind::ReadOpenVersion,
            StepKind::CloseOpenVersion,
            StepKind::InsertVersions
        ]
    );

    let rows = engine
        .reader()
        .find(TRADE, &[Predicate::eq("id", 1_i64).unwrap()], None)
        .unwrap();
    assert_eq!(rows.len(), 2);

    let open: Vec<_> = rows.iter().filter(|r| r.is_current()).collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].field("symbol"), Some(&Value::Text("AAPL.v2".into())));

    let closed = rows.iter().find(|r| !r.is_current()).unwrap();
    assert_eq!(closed.field("symbol"), Some(&Value::Text("AAPL".into())));
    assert!(before <= closed.system_time.end, "closed before the insert started");
    assert!(closed.system_time.end <= after, "closed after the insert returned");
}

#[test]
fn other_identities_are_untouched() {
    let session = session();
    let engine = engine(&session);
    engine
        .insert_versioned(TRADE, &[trade(1, 1, 31, "AAPL"), trade(2, 1, 31, "MSFT")])
        .unwrap();
    engine
        .insert_versioned(TRADE, &[trade(1, 1, 31, "AAPL.v2")])
        .unwrap();

    let msft = engine.reader().current(TRADE, 2_i64).unwrap().unwrap();
    assert_eq!(msft.field("symbol"), Some(&Value::Text("MSFT".into())));
    assert_eq!(
        engine
            .reader()
            .find(TRADE, &[Predicate::eq("id", 2_i64).unwrap()], None)
            .unwrap()
            .len(),
        1
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Batches
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn distinct_identities_share_one_insert() {
    let session = session();
    let report = engine(&session)
        .insert_versioned(
            TRADE,
            &[trade(1, 1, 31, "A"), trade(2, 1, 31, "B"), trade(3, 1, 31, "C")],
        )
        .unwrap();

    let inserts: Vec<_> = report
        .steps
        .iter()
        .filter(|s| s.kind == StepKind::InsertVersions)
        .collect();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].rows, 3);
    assert_eq!(inserts[0].sql.matches("), (").count(), 2);
}

#[test]
fn repeated_identity_in_one_batch_keeps_a_single_open_version() {
    let session = session();
    let engine = engine(&session).with_clock(noon);
    let report = engine
        .insert_versioned(TRADE, &[trade(7, 1, 10, "v1"), trade(7, 11, 20, "v2")])
        .unwrap();

    assert_eq!(
        report.kinds(),
        vec![
            StepKind::ReadOpenVersion,
            StepKind::InsertVersions,
            StepKind::ReadOpenVersion,
            StepKind::CloseOpenVersion,
            StepKind::InsertVersions,
        ]
    );

    let current = engine.reader().current(TRADE, 7_i64).unwrap().unwrap();
    assert_eq!(current.field("symbol"), Some(&Value::Text("v2".into())));

    let rows = engine
        .reader()
        .find(TRADE, &[Predicate::eq("id", 7_i64).unwrap()], None)
        .unwrap();
    let closed = rows.iter().find(|r| !r.is_current()).unwrap();
    assert_eq!(closed.system_time.end, noon());
}

#[test]
fn insert_batch_size_splits_the_insert() {
    let session = session();
    let mut config = ChronicleConfig::default();
    config.engine.insert_batch_size = 2;
    let engine = MutationEngine::from_config(&session, catalog(), &config);

    let records: Vec<_> = (1..=5).map(|id| trade(id, 1, 31, "X")).collect();
    let report = engine.insert_versioned(TRADE, &records).unwrap();

    let sizes: Vec<usize> = report
        .steps
        .iter()
        .filter(|s| s.kind == StepKind::InsertVersions)
        .map(|s| s.rows)
        .collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(engine.reader().find(TRADE, &[], None).unwrap().len(), 5);
}

#[test]
fn empty_batch_is_a_no_op() {
    let session = session();
    let report = engine(&session).insert_versioned(TRADE, &[]).unwrap();
    assert!(report.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// File-backed session
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn readers_see_versions_written_through_the_writer() {
    let dir = tempfile::tempdir().unwrap();
    let session = SqliteSession::open(&dir.path().join("versions.db"), 2).unwrap();
    session
        .with_writer(|conn| ensure_table(conn, &trades_schema()))
        .unwrap();
    let engine = engine(&session);

    engine.insert_versioned(TRADE, &[trade(1, 1, 31, "v1")]).unwrap();
    engine.insert_versioned(TRADE, &[trade(1, 1, 31, "v2")]).unwrap();

    // Two reads so both pooled readers answer once.
    for _ in 0..2 {
        let current = engine.reader().current(TRADE, 1_i64).unwrap().unwrap();
        assert_eq!(current.field("symbol"), Some(&Value::Text("v2".into())));
    }
}
