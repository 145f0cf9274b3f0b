/// Pay-frequency classifications carried on the employee row.
pub const PAY_FREQUENCY_WEEKLY: i16 = 0;

/// Weekly payroll, executive schedule. This code is what flags an employee
/// as "executive" on year-end reporting; the engine only carries the flag
/// through.
pub const PAY_FREQUENCY_WEEKLY_EXECUTIVE: i16 = 1;
