//! TLE set splitting and fixed-column element extraction.
//!
//! A TLE set is a sequence of three-line entries (name line plus the two
//! element lines), optionally blank-line separated, as distributed by
//! CelesTrak. Set splitting is line-oriented; field extraction works on
//! byte-exact column offsets per the NORAD format and is bounds-checked
//! so short or mangled lines surface as structured errors.

use crate::{julian, EPOCH_YEAR_PIVOT, SECONDS_PER_DAY};
use nom::{
    character::complete::{line_ending, not_line_ending},
    combinator::opt,
    error::ErrorKind,
    multi::fold_many0,
};
use std::collections::HashSet;
use std::f64::consts::TAU;
use std::ops::Range;
use std::str::FromStr;
use tracing::debug;
use astro_types::prelude::*;

pub type Result<I, O, E = SetParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

/// Error splitting a TLE set into entries
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SetParseError<I> {
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

impl<I> nom::error::ParseError<I> for SetParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        SetParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

/// Error extracting orbital elements from a single TLE entry
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TleParseError {
    #[error("TLE line {line} is too short ({len} of {TLE_LINE_LEN} characters)")]
    LineTooShort { line: u8, len: usize },

    #[error("TLE line {line} carries the wrong line identifier")]
    LineIdentifier { line: u8 },

    #[error("TLE field '{field}' is not a valid number")]
    Field { field: &'static str },

    #[error("TLE epoch day-of-year {day_of_year} is out of range for year {year}")]
    EpochDay { year: i32, day_of_year: u32 },

    #[error("TLE element '{field}' is outside the two-body propagation domain")]
    ElementDomain { field: &'static str },
}

/// Split a multi-satellite TLE set into unstructured entries, deduped by
/// content. Field extraction is deferred to [`parse_elements`] so one bad
/// entry doesn't poison the rest of the set.
pub fn parse_tle_set(set: &str) -> Result<&str, HashSet<UnstructuredTle>> {
    let (s, tle_set) = fold_many0(
        tle,
        HashSet::new,
        |mut tle_set: HashSet<UnstructuredTle>, tle| {
            tle_set.insert(tle);
            tle_set
        },
    )(set)?;
    Ok((s, tle_set))
}

fn tle(s: &str) -> Result<&str, UnstructuredTle> {
    let (s, name) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line1) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line2) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, _) = opt(line_ending)(s)?;
    Ok((
        s,
        UnstructuredTle {
            satellite_name: name.trim_end().to_string(),
            line1: line1.to_string(),
            line2: line2.to_string(),
        },
    ))
}

/// Extract orbital elements from one TLE entry.
///
/// Angles are converted to radians and mean motion from rev/day to rad/s
/// on the way out. Physically out-of-domain elements (eccentricity outside
/// [0, 1), non-positive mean motion) are rejected here so the two-body
/// propagator never sees them.
pub fn parse_elements(tle: &UnstructuredTle) -> std::result::Result<OrbitalElements, TleParseError> {
    let line1 = checked_line(&tle.line1, 1)?;
    let line2 = checked_line(&tle.line2, 2)?;

    let satcat_id: SatcatId = field(line1, 2..7, "catalog number")?;

    // Epoch yyddd.dddddddd, with the standard two-digit year pivot
    let epoch_yy: i32 = field(line1, 18..20, "epoch year")?;
    let epoch_day: f64 = field(line1, 20..32, "epoch day")?;
    let year = if epoch_yy < EPOCH_YEAR_PIVOT {
        2000 + epoch_yy
    } else {
        1900 + epoch_yy
    };
    let day_of_year = epoch_day.trunc() as u32;
    let epoch_jd = julian::julian_date_from_day_of_year(year, day_of_year, epoch_day.fract())
        .ok_or(TleParseError::EpochDay { year, day_of_year })?;

    let inclination = field::<f64>(line2, 8..16, "inclination")?.to_radians();
    let raan = field::<f64>(line2, 17..25, "raan")?.to_radians();
    let eccentricity = implicit_decimal_field(line2, 26..33, "eccentricity")?;
    let arg_perigee = field::<f64>(line2, 34..42, "argument of perigee")?.to_radians();
    let mean_anomaly = field::<f64>(line2, 43..51, "mean anomaly")?.to_radians();
    let mm_rev_day: f64 = field(line2, 52..63, "mean motion")?;
    let mean_motion = mm_rev_day * TAU / SECONDS_PER_DAY;

    // The implicit leading "0." means the eccentricity field cannot
    // encode a value outside [0, 1): sign or exponent text fails the
    // numeric parse first. On TLE text only the mean motion branch can
    // reject here; the eccentricity check covers element records built
    // from any other source.
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(TleParseError::ElementDomain {
            field: "eccentricity",
        });
    }
    if mean_motion <= 0.0 {
        return Err(TleParseError::ElementDomain {
            field: "mean motion",
        });
    }

    debug!(
        satellite = %tle.satellite_name,
        satcat_id,
        epoch_jd,
        "Parsed TLE entry"
    );

    Ok(OrbitalElements {
        satcat_id,
        epoch_jd,
        inclination,
        raan,
        eccentricity,
        arg_perigee,
        mean_anomaly,
        mean_motion,
    })
}

fn checked_line(line: &str, number: u8) -> std::result::Result<&str, TleParseError> {
    if line.len() < TLE_LINE_LEN {
        return Err(TleParseError::LineTooShort {
            line: number,
            len: line.len(),
        });
    }
    if !line.starts_with(char::from(b'0' + number)) {
        return Err(TleParseError::LineIdentifier { line: number });
    }
    Ok(line)
}

/// Bounds-checked fixed-column numeric field. The range is in byte
/// offsets (columns are ASCII in a well-formed TLE); a range that doesn't
/// land on character boundaries is as malformed as non-numeric text.
fn field<T: FromStr>(
    line: &str,
    columns: Range<usize>,
    name: &'static str,
) -> std::result::Result<T, TleParseError> {
    line.get(columns)
        .map(str::trim)
        .and_then(|s| s.parse().ok())
        .ok_or(TleParseError::Field { field: name })
}

/// Eccentricity is stored with an implicit leading "0."
fn implicit_decimal_field(
    line: &str,
    columns: Range<usize>,
    name: &'static str,
) -> std::result::Result<f64, TleParseError> {
    let digits = line
        .get(columns)
        .map(str::trim)
        .ok_or(TleParseError::Field { field: name })?;
    format!("0.{digits}")
        .parse()
        .map_err(|_| TleParseError::Field { field: name })
}
