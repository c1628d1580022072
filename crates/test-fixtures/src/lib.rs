//! Shared fixtures: the `trades` table, date helpers, and the Allen
//! interval fixture used as the regression matrix for `overlaps`.

use chrono::{NaiveDate, NaiveDateTime};

use chronicle_core::models::{ColumnKind, SystemPeriod, TableSchema, TemporalRecord, ValidPeriod};
use chronicle_core::StaticCatalog;

/// Record type name the fixtures register.
pub const TRADE: &str = "Trade";

/// Day `day` of January 2020.
pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, day).expect("valid fixture day")
}

/// `2020-01-01 hh:mm:ss`.
pub fn timestamp(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    date(1)
        .and_hms_opt(hour, minute, second)
        .expect("valid fixture time")
}

pub fn trades_schema() -> TableSchema {
    TableSchema::new("trades", ColumnKind::Integer)
        .with_column("symbol", ColumnKind::Text)
        .with_column("price", ColumnKind::Decimal)
        .with_column("side", ColumnKind::Char)
}

pub fn catalog() -> StaticCatalog {
    StaticCatalog::new().register(TRADE, trades_schema())
}

/// A current trade valid over `[start, end]` (days of January 2020).
pub fn trade(id: i64, start: u32, end: u32, symbol: &str) -> TemporalRecord {
    TemporalRecord::new(
        id,
        ValidPeriod::new(date(start), date(end)).expect("fixture period is ordered"),
        SystemPeriod::open_from(timestamp(0, 0, 0)),
    )
    .with_field("symbol", symbol)
    .with_field("price", "100.25".parse::<chronicle_core::models::Decimal>().expect("decimal"))
    .with_field("side", 'B')
}

/// Window every Allen case is compared against: `[15, 17]`.
pub const ALLEN_WINDOW: (u32, u32) = (15, 17);

/// One row of the Allen fixture.
#[derive(Debug, Clone, Copy)]
pub struct AllenCase {
    pub relation: &'static str,
    pub start: u32,
    pub end: u32,
    /// Whether `overlaps(15, 17)` must select this row.
    pub overlaps_window: bool,
}

/// Ten intervals, one per Allen relation to `[15, 17]` that a single
/// stored row can take (the inverse relations fold onto these with day
/// granularity). Six share time with the window, four are disjoint or
/// only touch it.
pub const ALLEN_CASES: [AllenCase; 10] = [
    AllenCase { relation: "before", start: 10, end: 13, overlaps_window: false },
    AllenCase { relation: "meets", start: 10, end: 15, overlaps_window: false },
    AllenCase { relation: "overlaps", start: 13, end: 16, overlaps_window: true },
    AllenCase { relation: "starts", start: 15, end: 16, overlaps_window: true },
    AllenCase { relation: "during", start: 16, end: 16, overlaps_window: true },
    AllenCase { relation: "finishes", start: 16, end: 17, overlaps_window: true },
    AllenCase { relation: "equals", start: 15, end: 17, overlaps_window: true },
    AllenCase { relation: "contains", start: 14, end: 18, overlaps_window: true },
    AllenCase { relation: "met_by", start: 17, end: 19, overlaps_window: false },
    AllenCase { relation: "after", start: 18, end: 20, overlaps_window: false },
];

/// The Allen cases as trades, ids 1..=10 in table order.
pub fn allen_fixture() -> Vec<TemporalRecord> {
    ALLEN_CASES
        .iter()
        .zip(1_i64..)
        .map(|(case, id)| trade(id, case.start, case.end, case.relation))
        .collect()
}
