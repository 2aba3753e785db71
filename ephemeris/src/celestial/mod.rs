//! Analytic sun-avoidance ephemeris
//!
//! Answers observability questions for an L2 observatory whose only pointing
//! constraint is the sunshield: the boresight must stay within a band of sun
//! angles, and the roll about the boresight is limited by the sun pitch/roll
//! curve in [`crate::roll`].

use crate::angles::{bound_angle_rad, wrap_pi, SkyPosition};
use crate::oracle::{ObservabilityOracle, DEFAULT_BISECT_TOLERANCE_DAYS};
use crate::roll::allowed_max_vehicle_roll;
use crate::sun::sun_position;

/// Smallest sun-boresight angle in the field of regard, degrees
pub const DEFAULT_MIN_SUN_ANGLE_DEG: f64 = 85.0;

/// Largest sun-boresight angle in the field of regard, degrees
pub const DEFAULT_MAX_SUN_ANGLE_DEG: f64 = 135.0;

/// First epoch of the supported ephemeris (2020-01-01)
pub const EPHEMERIS_START_MJD: f64 = 58_849.0;

/// Last epoch of the supported ephemeris (2024-12-31)
pub const EPHEMERIS_END_MJD: f64 = 60_675.0;

/// Sun-geometry observability oracle
#[derive(Debug, Clone)]
pub struct Ephemeris {
    start_mjd: f64,
    end_mjd: f64,
    min_sun_angle: f64,
    max_sun_angle: f64,
    bisect_tolerance: f64,
}

impl Ephemeris {
    /// Create an ephemeris covering `[start_mjd, end_mjd]` with the default sun limits
    pub fn new(start_mjd: f64, end_mjd: f64) -> Self {
        Self {
            start_mjd,
            end_mjd,
            min_sun_angle: DEFAULT_MIN_SUN_ANGLE_DEG.to_radians(),
            max_sun_angle: DEFAULT_MAX_SUN_ANGLE_DEG.to_radians(),
            bisect_tolerance: DEFAULT_BISECT_TOLERANCE_DAYS,
        }
    }

    /// Override the field-of-regard sun angle band (degrees)
    pub fn with_sun_limits(mut self, min_deg: f64, max_deg: f64) -> Self {
        self.min_sun_angle = min_deg.to_radians();
        self.max_sun_angle = max_deg.to_radians();
        self
    }

    /// Override the bisection precision (days)
    pub fn with_bisect_tolerance(mut self, days: f64) -> Self {
        self.bisect_tolerance = days;
        self
    }

    /// Angle between the Sun and the target in radians
    pub fn sun_angle(&self, mjd: f64, target: &SkyPosition) -> f64 {
        sun_position(mjd).separation(target)
    }
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self::new(EPHEMERIS_START_MJD, EPHEMERIS_END_MJD)
    }
}

impl ObservabilityOracle for Ephemeris {
    fn in_field_of_regard(&self, mjd: f64, target: &SkyPosition) -> bool {
        let sun_angle = self.sun_angle(mjd, target);
        (self.min_sun_angle..=self.max_sun_angle).contains(&sun_angle)
    }

    fn is_valid_attitude(&self, mjd: f64, target: &SkyPosition, v3pa: f64) -> bool {
        if !self.in_field_of_regard(mjd, target) {
            return false;
        }
        let sun = sun_position(mjd);
        let roll = wrap_pi(v3pa - self.normal_pa(mjd, target));
        roll.abs() <= allowed_max_vehicle_roll(&sun, target)
    }

    /// -V3 points at the Sun, so the nominal V3 axis lies opposite the
    /// Sun's position angle around the target.
    fn normal_pa(&self, mjd: f64, target: &SkyPosition) -> f64 {
        let sun_pa = target.position_angle_to(&sun_position(mjd));
        bound_angle_rad(sun_pa + std::f64::consts::PI)
    }

    fn sun_position(&self, mjd: f64) -> SkyPosition {
        sun_position(mjd)
    }

    fn domain(&self) -> (f64, f64) {
        (self.start_mjd, self.end_mjd)
    }

    fn bisect_tolerance(&self) -> f64 {
        self.bisect_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::{NEP_DEC_DEG, NEP_RA_DEG};
    use crate::oracle::AttitudeMode;
    use approx::assert_relative_eq;

    const JAN_1_2021: f64 = 59_215.0;

    #[test]
    fn test_ecliptic_pole_always_in_field_of_regard() {
        let eph = Ephemeris::default();
        let pole = SkyPosition::from_degrees(NEP_RA_DEG, NEP_DEC_DEG);
        for day in 0..365 {
            assert!(eph.in_field_of_regard(JAN_1_2021 + day as f64, &pole));
        }
    }

    #[test]
    fn test_sun_direction_never_in_field_of_regard() {
        let eph = Ephemeris::default();
        for day in (0..365).step_by(30) {
            let mjd = JAN_1_2021 + day as f64;
            let sun = eph.sun_position(mjd);
            assert!(!eph.in_field_of_regard(mjd, &sun));
            assert!(!eph.in_field_of_regard(mjd, &sun.antipode()));
        }
    }

    #[test]
    fn test_normal_pa_opposes_sun() {
        let eph = Ephemeris::default();
        let target = SkyPosition::from_degrees(30.0, 20.0);
        let sun = eph.sun_position(JAN_1_2021);
        let sun_pa = target.position_angle_to(&sun);
        let normal = eph.normal_pa(JAN_1_2021, &target);

        assert!((0.0..std::f64::consts::TAU).contains(&normal));
        assert_relative_eq!(
            wrap_pi(normal - sun_pa).abs(),
            std::f64::consts::PI,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_attitude_validity_follows_roll_envelope() {
        let eph = Ephemeris::default();
        let pole = SkyPosition::from_degrees(NEP_RA_DEG, NEP_DEC_DEG);
        let nominal = eph.normal_pa(JAN_1_2021, &pole);

        assert!(eph.is_valid_attitude(JAN_1_2021, &pole, nominal));
        assert!(eph.is_valid_attitude(JAN_1_2021, &pole, nominal + 3f64.to_radians()));
        assert!(eph.is_valid_attitude(JAN_1_2021, &pole, nominal - 3f64.to_radians()));
        assert!(!eph.is_valid_attitude(JAN_1_2021, &pole, nominal + 10f64.to_radians()));
        assert!(!eph.is_valid_attitude(JAN_1_2021, &pole, nominal + std::f64::consts::PI));
    }

    #[test]
    fn test_fixed_attitude_requires_field_of_regard() {
        let eph = Ephemeris::default();
        let sun = eph.sun_position(JAN_1_2021);
        let nominal = eph.normal_pa(JAN_1_2021, &sun);
        assert!(!eph.is_observable(JAN_1_2021, &sun, AttitudeMode::FixedV3Pa(nominal)));
    }

    #[test]
    fn test_custom_sun_limits_and_domain() {
        let eph = Ephemeris::new(59_000.0, 59_100.0).with_sun_limits(0.0, 180.0);
        let anywhere = SkyPosition::from_degrees(12.0, -34.0);
        assert!(eph.in_field_of_regard(59_050.0, &anywhere));
        assert_eq!(eph.domain(), (59_000.0, 59_100.0));
    }
}
