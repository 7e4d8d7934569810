use chrono::{DateTime, Utc};
use derive_more::Display;
use std::f64::consts::TAU;

/// NORAD catalog number
pub type SatcatId = u32;

/// Days between the Julian epoch and the Unix epoch (1970-01-01T00:00:00Z)
const UNIX_EPOCH_JD: f64 = 2440587.5;

/// Osculating Keplerian state of one satellite at its TLE epoch.
///
/// All angular quantities are stored in radians regardless of the
/// degree-valued source fields in the TLE text. Constructed once by the
/// parser and immutable afterward.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Display)]
#[display(
    fmt = "{{satcat: {}, epoch_jd: {}, inc: {}, raan: {}, ecc: {}, argp: {}, ma: {}, n: {}}}",
    "satcat_id",
    "epoch_jd",
    "inclination",
    "raan",
    "eccentricity",
    "arg_perigee",
    "mean_anomaly",
    "mean_motion"
)]
pub struct OrbitalElements {
    /// NORAD catalog number from line 1
    pub satcat_id: SatcatId,

    /// Epoch, Julian Date [days]
    pub epoch_jd: f64,

    /// Inclination [rad]
    pub inclination: f64,

    /// Right ascension of the ascending node [rad]
    pub raan: f64,

    /// Eccentricity, in [0, 1)
    pub eccentricity: f64,

    /// Argument of perigee [rad]
    pub arg_perigee: f64,

    /// Mean anomaly at epoch [rad]
    pub mean_anomaly: f64,

    /// Mean motion [rad/s], > 0
    pub mean_motion: f64,
}

impl OrbitalElements {
    /// Orbital period [s]
    pub fn period(&self) -> f64 {
        TAU / self.mean_motion
    }

    /// Epoch as a UTC timestamp, for display. None if the Julian Date is
    /// outside chrono's representable range.
    pub fn epoch_datetime(&self) -> Option<DateTime<Utc>> {
        let unix_secs = (self.epoch_jd - UNIX_EPOCH_JD) * 86400.0;
        let secs = unix_secs.floor();
        let nanos = ((unix_secs - secs) * 1e9).round() as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }
}

/// Position expressed in the Earth-Centered Inertial frame [m]
pub type EciPosition = na::Vector3<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_datetime_at_j2000() {
        let o = OrbitalElements {
            satcat_id: 0,
            epoch_jd: 2451545.0,
            inclination: 0.0,
            raan: 0.0,
            eccentricity: 0.0,
            arg_perigee: 0.0,
            mean_anomaly: 0.0,
            mean_motion: 1.0e-3,
        };
        // J2000 is noon UTC, 2000-01-01
        assert_eq!(
            o.epoch_datetime(),
            DateTime::from_timestamp(946_728_000, 0)
        );
        assert!((o.period() - TAU * 1.0e3).abs() < 1e-9);
    }
}
