/// Decimal places kept when amounts are persisted.
pub const DECIMAL_PRECISION: u32 = 2;

/// Earliest plan year the engine will operate on.
pub const MIN_PLAN_YEAR: i16 = 1960;

/// Earliest plan year a military contribution may target.
pub const MIN_MILITARY_PLAN_YEAR: i16 = 2020;

/// Year-end allocation rows post against the close of the December cycle.
pub const MONTH_OF_YEAR_CLOSE: i16 = 12;

/// Points are whole units of this many dollars of balance.
pub const POINT_DOLLARS: i64 = 100;
