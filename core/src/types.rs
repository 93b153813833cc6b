//! Shared primitive types used across the metrics core.

/// A Mexican-peso amount. Kept unrounded until display.
pub type Mxn = f64;

/// A percentage on the 0–100 scale.
pub type Pct = f64;

/// Percentage points: the additive difference between two `Pct` values.
pub type Pp = f64;

/// Zero-based month of the year. 0 = January, 11 = December.
pub type MonthIndex = usize;

/// Zero-based week of the campaign window.
pub type WeekIndex = usize;

pub const MONTHS_PER_YEAR: usize = 12;

pub const MONTH_LABELS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
