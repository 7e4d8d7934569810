//! Fixed-step ephemeris generation, the driver loop around the
//! propagator.

use crate::propagation::propagate;
use astro_types::prelude::*;
use tracing::debug;

/// Default sample spacing [s]
pub const DEFAULT_STEP_SECS: f64 = 60.0;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EphemerisError {
    #[error("Ephemeris step must be positive, got {0} s")]
    NonPositiveStep(f64),

    #[error("Ephemeris duration must be positive, got {0} s")]
    NonPositiveDuration(f64),
}

/// One propagator query
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EphemerisSample {
    /// Elapsed time from the element epoch [s]
    pub elapsed: f64,

    /// Position in the ECI frame [m]
    pub pos_eci: EciPosition,
}

/// Sample the orbit at a fixed step from the epoch through one full
/// period, both endpoints included.
pub fn generate(
    o: &OrbitalElements,
    step: f64,
) -> Result<Vec<EphemerisSample>, EphemerisError> {
    generate_for(o, step, o.period())
}

/// Sample the orbit at a fixed step over a duration [s]. Step and
/// duration must both be positive.
pub fn generate_for(
    o: &OrbitalElements,
    step: f64,
    duration: f64,
) -> Result<Vec<EphemerisSample>, EphemerisError> {
    if step <= 0.0 {
        return Err(EphemerisError::NonPositiveStep(step));
    }
    if duration <= 0.0 {
        return Err(EphemerisError::NonPositiveDuration(duration));
    }

    let steps = (duration / step) as usize;
    let samples = (0..=steps)
        .map(|i| {
            let elapsed = i as f64 * step;
            EphemerisSample {
                elapsed,
                pos_eci: propagate(o, elapsed),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        satcat_id = o.satcat_id,
        step,
        duration,
        samples = samples.len(),
        "Generated ephemeris"
    );
    Ok(samples)
}
