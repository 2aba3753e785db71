//! Low-precision solar ephemeris
//!
//! Geocentric apparent direction of the Sun from the mean-longitude /
//! mean-anomaly series of the Astronomical Almanac. Good to about 0.01° over
//! several decades around J2000, which is far below the one-day grid the
//! visibility scan runs on. An L2 observatory sees the Sun within a few
//! arcminutes of the geocentric direction.

use nalgebra::{Rotation3, Vector3};

use crate::angles::SkyPosition;
use crate::mjd::J2000_MJD;

/// Unit vector toward the Sun in the equatorial frame.
pub fn sun_vector(mjd: f64) -> Vector3<f64> {
    let n = mjd - J2000_MJD;

    let mean_longitude = (280.460 + 0.985_647_4 * n).to_radians();
    let mean_anomaly = (357.528 + 0.985_600_3 * n).to_radians();
    let ecliptic_longitude = mean_longitude
        + 1.915f64.to_radians() * mean_anomaly.sin()
        + 0.020f64.to_radians() * (2.0 * mean_anomaly).sin();
    let obliquity = (23.439 - 0.000_000_4 * n).to_radians();

    let ecliptic = Vector3::new(ecliptic_longitude.cos(), ecliptic_longitude.sin(), 0.0);
    Rotation3::from_axis_angle(&Vector3::x_axis(), obliquity) * ecliptic
}

/// Right ascension and declination of the Sun.
pub fn sun_position(mjd: f64) -> SkyPosition {
    SkyPosition::from_vector(&sun_vector(mjd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_march_equinox_2021() {
        // 2021-03-20 09:37 UT
        let sun = sun_position(59293.40);
        let ra = if sun.ra > std::f64::consts::PI {
            sun.ra - std::f64::consts::TAU
        } else {
            sun.ra
        };
        assert_abs_diff_eq!(ra.to_degrees(), 0.0, epsilon = 0.05);
        assert_abs_diff_eq!(sun.dec_degrees(), 0.0, epsilon = 0.05);
    }

    #[test]
    fn test_june_solstice_2021() {
        // 2021-06-21 03:32 UT
        let sun = sun_position(59386.147);
        assert_abs_diff_eq!(sun.ra_degrees(), 90.0, epsilon = 0.1);
        assert_abs_diff_eq!(sun.dec_degrees(), 23.44, epsilon = 0.05);
    }

    #[test]
    fn test_sun_vector_is_unit() {
        for mjd in [58849.0, 59500.25, 60675.0] {
            assert_abs_diff_eq!(sun_vector(mjd).norm(), 1.0, epsilon = 1e-12);
        }
    }
}
