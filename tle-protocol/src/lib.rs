pub use crate::parser::{parse_elements, parse_tle_set, SetParseError, TleParseError};

pub mod julian;
pub mod parser;

/// Seconds per day, for mean motion conversion
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Two-digit TLE epoch years below this pivot are in the 2000s,
/// the rest in the 1900s
pub const EPOCH_YEAR_PIVOT: i32 = 57;
