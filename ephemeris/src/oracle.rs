//! Observability oracle interface
//!
//! The window scanner and the position angle projector only need a handful
//! of pure queries about a target at an epoch. [`ObservabilityOracle`]
//! captures them so the scan algorithms can run against the analytic
//! [`crate::Ephemeris`] or against a synthetic predicate in tests.

use crate::angles::SkyPosition;

/// Default bisection precision in days (one second)
pub const DEFAULT_BISECT_TOLERANCE_DAYS: f64 = 1.0 / 86_400.0;

/// Which observability predicate a run evaluates.
///
/// Chosen once per run and passed explicitly to every stage that needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttitudeMode {
    /// Observable when *some* roll satisfies the sun constraints
    FieldOfRegard,
    /// Observable when this specific V3 position angle (radians) is achievable
    FixedV3Pa(f64),
}

impl AttitudeMode {
    pub fn fixed_pa(&self) -> Option<f64> {
        match self {
            AttitudeMode::FieldOfRegard => None,
            AttitudeMode::FixedV3Pa(pa) => Some(*pa),
        }
    }
}

/// Pure queries about target observability at an epoch (MJD).
///
/// Implementations must be stateless from the caller's point of view; the
/// scanner and projector may call them from several threads at once.
pub trait ObservabilityOracle {
    /// True if some valid roll exists for the target at this epoch
    fn in_field_of_regard(&self, mjd: f64, target: &SkyPosition) -> bool;

    /// True if the V3 position angle `v3pa` (radians) is achievable at this epoch
    fn is_valid_attitude(&self, mjd: f64, target: &SkyPosition, v3pa: f64) -> bool;

    /// Nominal, unconstrained V3 position angle in radians
    fn normal_pa(&self, mjd: f64, target: &SkyPosition) -> f64;

    /// Direction of the Sun at this epoch
    fn sun_position(&self, mjd: f64) -> SkyPosition;

    /// Epoch range `(start, end)` covered by the underlying ephemeris
    fn domain(&self) -> (f64, f64);

    /// Precision, in days, to which [`Self::bisect_transition`] resolves a crossing
    fn bisect_tolerance(&self) -> f64 {
        DEFAULT_BISECT_TOLERANCE_DAYS
    }

    /// Evaluate the predicate selected by `mode`
    fn is_observable(&self, mjd: f64, target: &SkyPosition, mode: AttitudeMode) -> bool {
        match mode {
            AttitudeMode::FieldOfRegard => self.in_field_of_regard(mjd, target),
            AttitudeMode::FixedV3Pa(pa) => self.is_valid_attitude(mjd, target, pa),
        }
    }

    /// Locate a predicate crossing between two straddling epochs.
    ///
    /// `t_false` is an epoch where the predicate is known false and `t_true`
    /// one where it is known true; either may be the later of the two. The
    /// returned epoch lies within [`Self::bisect_tolerance`] of the crossing,
    /// on the observable side. Stops early once the two epochs are adjacent
    /// floats, so a zero tolerance still terminates.
    fn bisect_transition(
        &self,
        t_false: f64,
        t_true: f64,
        target: &SkyPosition,
        mode: AttitudeMode,
    ) -> f64 {
        let tolerance = self.bisect_tolerance();
        let (mut outside, mut inside) = (t_false, t_true);
        while (inside - outside).abs() > tolerance {
            let mid = 0.5 * (outside + inside);
            if mid == outside || mid == inside {
                break;
            }
            if self.is_observable(mid, target, mode) {
                inside = mid;
            } else {
                outside = mid;
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Observable on [10.3, 20.7) regardless of position or attitude
    struct Interval;

    impl ObservabilityOracle for Interval {
        fn in_field_of_regard(&self, mjd: f64, _target: &SkyPosition) -> bool {
            (10.3..20.7).contains(&mjd)
        }

        fn is_valid_attitude(&self, mjd: f64, target: &SkyPosition, v3pa: f64) -> bool {
            v3pa < 1.0 && self.in_field_of_regard(mjd, target)
        }

        fn normal_pa(&self, _mjd: f64, _target: &SkyPosition) -> f64 {
            0.0
        }

        fn sun_position(&self, _mjd: f64) -> SkyPosition {
            SkyPosition::new(0.0, 0.0)
        }

        fn domain(&self) -> (f64, f64) {
            (0.0, 100.0)
        }
    }

    #[test]
    fn test_bisect_rising_edge() {
        let target = SkyPosition::new(0.0, 0.0);
        let t = Interval.bisect_transition(10.0, 11.0, &target, AttitudeMode::FieldOfRegard);
        assert_abs_diff_eq!(t, 10.3, epsilon = DEFAULT_BISECT_TOLERANCE_DAYS);
        assert!(t >= 10.3);
    }

    #[test]
    fn test_bisect_falling_edge() {
        let target = SkyPosition::new(0.0, 0.0);
        let t = Interval.bisect_transition(21.0, 20.0, &target, AttitudeMode::FieldOfRegard);
        assert_abs_diff_eq!(t, 20.7, epsilon = DEFAULT_BISECT_TOLERANCE_DAYS);
        assert!(t < 20.7);
    }

    /// Same predicate, resolved as finely as f64 allows
    struct ExactInterval;

    impl ObservabilityOracle for ExactInterval {
        fn in_field_of_regard(&self, mjd: f64, target: &SkyPosition) -> bool {
            Interval.in_field_of_regard(mjd, target)
        }

        fn is_valid_attitude(&self, mjd: f64, target: &SkyPosition, v3pa: f64) -> bool {
            Interval.is_valid_attitude(mjd, target, v3pa)
        }

        fn normal_pa(&self, mjd: f64, target: &SkyPosition) -> f64 {
            Interval.normal_pa(mjd, target)
        }

        fn sun_position(&self, mjd: f64) -> SkyPosition {
            Interval.sun_position(mjd)
        }

        fn domain(&self) -> (f64, f64) {
            Interval.domain()
        }

        fn bisect_tolerance(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_bisect_zero_tolerance_terminates() {
        let target = SkyPosition::new(0.0, 0.0);
        let rising =
            ExactInterval.bisect_transition(10.0, 11.0, &target, AttitudeMode::FieldOfRegard);
        assert_abs_diff_eq!(rising, 10.3, epsilon = 1e-12);
        assert!(rising >= 10.3);

        let falling =
            ExactInterval.bisect_transition(21.0, 20.0, &target, AttitudeMode::FieldOfRegard);
        assert_abs_diff_eq!(falling, 20.7, epsilon = 1e-12);
        assert!(falling < 20.7);
    }

    #[test]
    fn test_mode_selects_predicate() {
        let target = SkyPosition::new(0.0, 0.0);
        assert!(Interval.is_observable(15.0, &target, AttitudeMode::FieldOfRegard));
        assert!(Interval.is_observable(15.0, &target, AttitudeMode::FixedV3Pa(0.5)));
        assert!(!Interval.is_observable(15.0, &target, AttitudeMode::FixedV3Pa(2.0)));
        assert_eq!(AttitudeMode::FixedV3Pa(0.5).fixed_pa(), Some(0.5));
        assert_eq!(AttitudeMode::FieldOfRegard.fixed_pa(), None);
    }
}
