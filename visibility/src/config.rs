//! Observatory configuration
//!
//! Sun-angle limits of the field of regard, the supported ephemeris date
//! range and the bisection precision. Stored as pretty JSON; every field is
//! optional on load and falls back to the flight values.

use std::path::Path;

use ephemeris::celestial::{
    DEFAULT_MAX_SUN_ANGLE_DEG, DEFAULT_MIN_SUN_ANGLE_DEG, EPHEMERIS_END_MJD, EPHEMERIS_START_MJD,
};
use ephemeris::oracle::DEFAULT_BISECT_TOLERANCE_DAYS;
use ephemeris::Ephemeris;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VisibilityError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservatoryConfig {
    /// Smallest sun-boresight angle in the field of regard, degrees
    pub min_sun_angle_deg: f64,
    /// Largest sun-boresight angle in the field of regard, degrees
    pub max_sun_angle_deg: f64,
    /// First MJD a search may start on
    pub ephemeris_start_mjd: f64,
    /// Last MJD a search may end on
    pub ephemeris_end_mjd: f64,
    /// Precision of window boundaries, days
    pub bisect_tolerance_days: f64,
}

impl Default for ObservatoryConfig {
    fn default() -> Self {
        Self {
            min_sun_angle_deg: DEFAULT_MIN_SUN_ANGLE_DEG,
            max_sun_angle_deg: DEFAULT_MAX_SUN_ANGLE_DEG,
            ephemeris_start_mjd: EPHEMERIS_START_MJD,
            ephemeris_end_mjd: EPHEMERIS_END_MJD,
            bisect_tolerance_days: DEFAULT_BISECT_TOLERANCE_DAYS,
        }
    }
}

impl ObservatoryConfig {
    /// Supported search range `(start, end)` in MJD
    pub fn domain(&self) -> (f64, f64) {
        (self.ephemeris_start_mjd, self.ephemeris_end_mjd)
    }

    /// Analytic oracle configured with these limits
    pub fn build_ephemeris(&self) -> Ephemeris {
        Ephemeris::new(self.ephemeris_start_mjd, self.ephemeris_end_mjd)
            .with_sun_limits(self.min_sun_angle_deg, self.max_sun_angle_deg)
            .with_bisect_tolerance(self.bisect_tolerance_days)
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits the window search cannot work with
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.bisect_tolerance_days;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(VisibilityError::InvalidConfig(format!(
                "bisect_tolerance_days must be positive and finite, got {tolerance}"
            )));
        }

        let (min, max) = (self.min_sun_angle_deg, self.max_sun_angle_deg);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(VisibilityError::InvalidConfig(format!(
                "sun angle limits {min} to {max} are not an increasing range"
            )));
        }

        let (start, end) = self.domain();
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(VisibilityError::InvalidConfig(format!(
                "ephemeris range MJD {start} to {end} is not an increasing range"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ephemeris::ObservabilityOracle;
    use rstest::rstest;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("observatory.json");

        let config = ObservatoryConfig {
            min_sun_angle_deg: 90.0,
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();

        assert_eq!(ObservatoryConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "max_sun_angle_deg": 120.0 }"#).unwrap();

        let config = ObservatoryConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_sun_angle_deg, 120.0);
        assert_eq!(config.min_sun_angle_deg, DEFAULT_MIN_SUN_ANGLE_DEG);
        assert_eq!(config.domain(), (EPHEMERIS_START_MJD, EPHEMERIS_END_MJD));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ObservatoryConfig::load_from_file(&path),
            Err(VisibilityError::Config(_))
        ));
        assert!(matches!(
            ObservatoryConfig::load_from_file(&dir.path().join("missing.json")),
            Err(VisibilityError::Io(_))
        ));
    }

    #[rstest]
    #[case(r#"{ "bisect_tolerance_days": 0.0 }"#)]
    #[case(r#"{ "bisect_tolerance_days": -1e-5 }"#)]
    #[case(r#"{ "min_sun_angle_deg": 140.0, "max_sun_angle_deg": 90.0 }"#)]
    #[case(r#"{ "ephemeris_start_mjd": 60000.0, "ephemeris_end_mjd": 59000.0 }"#)]
    fn test_unusable_limits_rejected(#[case] json: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.json");
        std::fs::write(&path, json).unwrap();

        assert!(matches!(
            ObservatoryConfig::load_from_file(&path),
            Err(VisibilityError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(ObservatoryConfig::default().validate().is_ok());
        let config = ObservatoryConfig {
            bisect_tolerance_days: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_ephemeris_uses_limits() {
        let config = ObservatoryConfig {
            bisect_tolerance_days: 0.01,
            ..Default::default()
        };
        let eph = config.build_ephemeris();
        assert_eq!(eph.domain(), config.domain());
        assert_eq!(eph.bisect_tolerance(), 0.01);
    }
}
