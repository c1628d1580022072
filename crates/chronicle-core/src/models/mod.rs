mod decimal;
mod period;
mod record;
mod schema;
mod value;

pub use decimal::Decimal;
pub use period::{open_date, open_timestamp, SystemPeriod, ValidPeriod};
pub use record::TemporalRecord;
pub use schema::{ColumnDef, ColumnKind, IntervalColumns, TableSchema, TemporalColumns};
pub use value::Value;
