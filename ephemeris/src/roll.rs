//! Sun-avoidance roll envelope
//!
//! The sunshield limits how far the observatory may roll about its
//! boresight. The limit is expressed as a maximum *sun roll* that depends on
//! *sun pitch*; this module inverts that curve into the maximum *vehicle*
//! roll allowed for a given sun/target geometry.

use std::f64::consts::FRAC_PI_2;

use log::warn;

use crate::angles::{unit_limit, SkyPosition};

/// Absolute ceiling on sun roll in degrees
pub const ABS_MAX_SUN_ROLL_DEG: f64 = 5.2;

/// Sun pitch above which the allowed sun roll starts to shrink, in degrees
pub const SUN_PITCH_THRESHOLD_DEG: f64 = 2.5;

/// Sun roll lost per unit of sun pitch beyond the threshold
pub const SUN_ROLL_SLOPE: f64 = 1.7 / (ABS_MAX_SUN_ROLL_DEG - SUN_PITCH_THRESHOLD_DEG);

/// Padding kept between the allowed roll and the hard limit, in degrees
pub const SUN_ROLL_MARGIN_DEG: f64 = 0.1;

/// Fixed-point convergence tolerance in degrees
pub const CONVERGENCE_TOLERANCE_DEG: f64 = 0.0001;

const MAX_ITERATIONS: usize = 1000;

/// Maximum sun roll (radians) permitted at a sun pitch (radians).
///
/// Constant at the ceiling up to the threshold pitch, then decreasing
/// linearly. The margin is always subtracted.
pub fn allowed_max_sun_roll(sun_pitch: f64) -> f64 {
    let threshold = SUN_PITCH_THRESHOLD_DEG.to_radians();
    let ceiling = ABS_MAX_SUN_ROLL_DEG.to_radians();

    let max_sun_roll = if sun_pitch > threshold {
        ceiling - SUN_ROLL_SLOPE * (sun_pitch - threshold)
    } else {
        ceiling
    };
    max_sun_roll - SUN_ROLL_MARGIN_DEG.to_radians()
}

/// Maximum vehicle roll (radians) about the boresight for a target, given the sun direction.
///
/// Sun pitch depends on the sun roll actually used, so the allowed sun roll
/// is found by fixed-point iteration starting from the ceiling, then
/// projected onto the vehicle frame.
pub fn allowed_max_vehicle_roll(sun: &SkyPosition, target: &SkyPosition) -> f64 {
    let vehicle_pitch = FRAC_PI_2 - sun.separation(target);
    let tolerance = CONVERGENCE_TOLERANCE_DEG.to_radians();

    let mut sun_roll = ABS_MAX_SUN_ROLL_DEG.to_radians();
    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let last_sun_roll = sun_roll;
        let sun_pitch = unit_limit(vehicle_pitch.sin() / last_sun_roll.cos()).asin();
        sun_roll = allowed_max_sun_roll(sun_pitch);
        if (sun_roll - last_sun_roll).abs() < tolerance {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(
            "Sun roll iteration did not converge for vehicle pitch {:.4} deg",
            vehicle_pitch.to_degrees()
        );
    }

    unit_limit(sun_roll.sin() / vehicle_pitch.cos()).asin()
}
