//! Two-body Kepler propagation of TLE-derived orbital elements.
//!
//! This is deliberately not SGP4: no drag, no J2/J3, no resonance terms.
//! Position error grows by kilometers per day from epoch, which is fine
//! for the visualization this feeds and useless for conjunction work.

use astro_types::prelude::*;
use na::{Rotation3, Vector3};
use std::f64::consts::TAU;

/// Earth gravitational parameter [m^3/s^2]
pub const EARTH_MU: f64 = 3.986004418e14;

/// Earth equatorial radius [m]
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6378.137e3;

const KEPLER_ITERATIONS: usize = 10;

/// Solve Kepler's equation `E - e sin(E) = M` for the eccentric anomaly
/// by Newton-Raphson with `E0 = M`.
///
/// Fixed iteration count with no convergence check: for the
/// low-to-moderate eccentricities the parser admits, ten iterations land
/// far below the error floor of the two-body model itself.
fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ecc_anom = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        let f = ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * ecc_anom.cos();
        ecc_anom -= f / f_prime;
    }
    ecc_anom
}

/// ECI position [m] at `dt` seconds from the element epoch. Negative `dt`
/// reaches back before the epoch.
///
/// Pure and stateless. Assumes elements that already passed the parser's
/// domain checks (`mean_motion > 0`, `0 <= eccentricity < 1`); the output
/// is numeric garbage outside that domain.
pub fn propagate(o: &OrbitalElements, dt: f64) -> EciPosition {
    let n = o.mean_motion;
    let semi_major = (EARTH_MU / (n * n)).cbrt();

    let mean_anom = (o.mean_anomaly + n * dt).rem_euclid(TAU);
    let ecc_anom = solve_kepler(mean_anom, o.eccentricity);
    let true_anom = 2.0
        * f64::atan2(
            (1.0 + o.eccentricity).sqrt() * (ecc_anom / 2.0).sin(),
            (1.0 - o.eccentricity).sqrt() * (ecc_anom / 2.0).cos(),
        );
    let radius = semi_major * (1.0 - o.eccentricity * ecc_anom.cos());

    let perifocal = Vector3::new(radius * true_anom.cos(), radius * true_anom.sin(), 0.0);

    // 3-1-3 rotation out of the orbital plane: argument of perigee about
    // z, inclination about x, RAAN about z
    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), o.raan)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), o.inclination)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), o.arg_perigee);
    rot * perifocal
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // ISS elements from the 25202.31751672 epoch
    fn iss_elements() -> OrbitalElements {
        OrbitalElements {
            satcat_id: 25544,
            epoch_jd: 2460877.81751672,
            inclination: 51.6344_f64.to_radians(),
            raan: 137.8967_f64.to_radians(),
            eccentricity: 0.0002535,
            arg_perigee: 105.6905_f64.to_radians(),
            mean_anomaly: 358.2995_f64.to_radians(),
            mean_motion: 15.49987077 * TAU / 86_400.0,
        }
    }

    #[test]
    fn kepler_solution_satisfies_equation() {
        for e in [0.0, 0.0002535, 0.1, 0.7] {
            for i in 0..8 {
                let m = f64::from(i) * TAU / 8.0;
                let big_e = solve_kepler(m, e);
                assert_abs_diff_eq!(big_e - e * big_e.sin(), m, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn epoch_position_matches_independent_reconstruction() {
        let o = iss_elements();
        let pos = propagate(&o, 0.0);

        // Re-derive from the epoch mean anomaly with the raw direction
        // cosine matrix instead of the Rotation3 composition
        let e = o.eccentricity;
        let big_e = solve_kepler(o.mean_anomaly.rem_euclid(TAU), e);
        let v = 2.0
            * f64::atan2(
                (1.0 + e).sqrt() * (big_e / 2.0).sin(),
                (1.0 - e).sqrt() * (big_e / 2.0).cos(),
            );
        let a = (EARTH_MU / (o.mean_motion * o.mean_motion)).cbrt();
        let r = a * (1.0 - e * big_e.cos());
        let (xp, yp) = (r * v.cos(), r * v.sin());

        let (sin_raan, cos_raan) = o.raan.sin_cos();
        let (sin_inc, cos_inc) = o.inclination.sin_cos();
        let (sin_argp, cos_argp) = o.arg_perigee.sin_cos();
        let x = (cos_raan * cos_argp - sin_raan * sin_argp * cos_inc) * xp
            + (-cos_raan * sin_argp - sin_raan * cos_argp * cos_inc) * yp;
        let y = (sin_raan * cos_argp + cos_raan * sin_argp * cos_inc) * xp
            + (-sin_raan * sin_argp + cos_raan * cos_argp * cos_inc) * yp;
        let z = (sin_argp * sin_inc) * xp + (cos_argp * sin_inc) * yp;

        assert_relative_eq!(pos.x, x, max_relative = 1e-9);
        assert_relative_eq!(pos.y, y, max_relative = 1e-9);
        assert_relative_eq!(pos.z, z, max_relative = 1e-9);
    }

    #[test]
    fn propagation_is_periodic() {
        let o = iss_elements();
        for dt in [0.0, 90.0, 1234.5, 4000.0] {
            let p0 = propagate(&o, dt);
            let p1 = propagate(&o, dt + o.period());
            assert_abs_diff_eq!((p1 - p0).norm(), 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn iss_stays_in_low_earth_orbit() {
        let o = iss_elements();
        let mut dt = 0.0;
        while dt <= o.period() {
            let altitude = propagate(&o, dt).norm() - EARTH_EQUATORIAL_RADIUS;
            assert!(
                (300.0e3..500.0e3).contains(&altitude),
                "altitude {altitude} m at dt {dt}"
            );
            dt += 60.0;
        }
    }

    #[test]
    fn negative_dt_reaches_before_epoch() {
        let o = iss_elements();
        let back = propagate(&o, -120.0);
        let forward = propagate(&o, o.period() - 120.0);
        assert_abs_diff_eq!((back - forward).norm(), 0.0, epsilon = 1e-3);
    }
}
