//! Calendar and Julian Date conversions for TLE epoch handling.
//!
//! Pure functions over primitive inputs. Out-of-range day-of-year values
//! are reported as `None` rather than clamped; an earlier lineage of this
//! routine silently clamped to December 31, which mislabels the epoch of
//! any TLE carrying a bad day field.

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Maps a 1-based day-of-year ordinal to a calendar (month, day), both
/// 1-based. None if the ordinal is outside `[1, days_in_year(year)]`.
pub fn day_of_year_to_month_day(year: i32, day_of_year: u32) -> Option<(u32, u32)> {
    if day_of_year < 1 || day_of_year > days_in_year(year) {
        return None;
    }

    let mut doy = day_of_year;
    for (m, &month_len) in DAYS_IN_MONTH.iter().enumerate() {
        let dim = if m == 1 && is_leap_year(year) {
            29
        } else {
            month_len
        };
        if doy <= dim {
            return Some((m as u32 + 1, doy));
        }
        doy -= dim;
    }
    unreachable!("day-of-year validated against days_in_year")
}

/// Continuous Julian Date from a Gregorian calendar date, per the
/// Fliegel–Van Flandern algorithm. `frac_day` is the fraction of the day
/// elapsed since midnight; the -0.5 offset accounts for the Julian Date
/// incrementing at noon.
pub fn julian_date_from_calendar(year: i32, month: u32, day: u32, frac_day: f64) -> f64 {
    // Truncating integer division is part of the algorithm
    let a = (14 - i64::from(month)) / 12;
    let y = i64::from(year) + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    let jdn =
        i64::from(day) + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;
    jdn as f64 + frac_day - 0.5
}

/// Composition of the two conversions above. None if `day_of_year` is out
/// of range for `year`.
pub fn julian_date_from_day_of_year(year: i32, day_of_year: u32, frac_day: f64) -> Option<f64> {
    let (month, day) = day_of_year_to_month_day(year, day_of_year)?;
    Some(julian_date_from_calendar(year, month, day, frac_day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2020));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2021));
        assert_eq!(days_in_year(2020), 366);
        assert_eq!(days_in_year(2021), 365);
    }

    #[test]
    fn leap_year_boundaries() {
        assert_eq!(day_of_year_to_month_day(2020, 59), Some((2, 28)));
        assert_eq!(day_of_year_to_month_day(2020, 60), Some((2, 29)));
        assert_eq!(day_of_year_to_month_day(2020, 61), Some((3, 1)));

        assert_eq!(day_of_year_to_month_day(2021, 59), Some((2, 28)));
        assert_eq!(day_of_year_to_month_day(2021, 60), Some((3, 1)));
    }

    #[test]
    fn out_of_range_day_of_year_rejected() {
        for year in [1999, 2000, 2020, 2021] {
            assert_eq!(day_of_year_to_month_day(year, 0), None);
            assert_eq!(day_of_year_to_month_day(year, days_in_year(year) + 1), None);
        }
        assert_eq!(day_of_year_to_month_day(2021, 366), None);
        assert_eq!(day_of_year_to_month_day(2020, 367), None);
        assert_eq!(julian_date_from_day_of_year(2021, 366, 0.0), None);
        assert_eq!(julian_date_from_day_of_year(2021, 0, 0.0), None);
    }

    #[test]
    fn month_day_round_trips() {
        for year in [1900, 1999, 2000, 2020, 2021, 2024] {
            for doy in 1..=days_in_year(year) {
                let (month, day) = day_of_year_to_month_day(year, doy)
                    .unwrap_or_else(|| panic!("{year} day {doy} should be valid"));
                let prior: u32 = (0..month - 1)
                    .map(|m| {
                        if m == 1 && is_leap_year(year) {
                            29
                        } else {
                            DAYS_IN_MONTH[m as usize]
                        }
                    })
                    .sum();
                assert_eq!(prior + day, doy, "{year}-{month}-{day}");
            }
        }
    }

    #[test]
    fn known_julian_dates() {
        // Start of J2000
        let jd = julian_date_from_day_of_year(2000, 1, 0.5).unwrap();
        assert_abs_diff_eq!(jd, 2451545.0, epsilon = 1e-6);

        let jd = julian_date_from_day_of_year(2021, 275, 0.59097222).unwrap();
        assert_abs_diff_eq!(jd, 2459490.09097222, epsilon = 1e-6);

        // First day of the Gregorian reform
        let jd = julian_date_from_calendar(1582, 10, 15, 0.0);
        assert_abs_diff_eq!(jd, 2299160.5, epsilon = 1e-6);
    }
}
