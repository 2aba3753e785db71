//! Spherical angle utilities
//!
//! Angular separation on the celestial sphere, canonicalization of angles
//! into a single turn, ecliptic latitude and sexagesimal coordinate parsing.
//! Everything here is a pure function; radians unless a name says otherwise.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::str::FromStr;

use nalgebra::Vector3;

use crate::error::{EphemerisError, Result};

/// Right ascension of the north ecliptic pole in degrees
pub const NEP_RA_DEG: f64 = 270.0;

/// Declination of the north ecliptic pole in degrees
pub const NEP_DEC_DEG: f64 = 66.560708;

/// Clamp a value into [-1, 1] before an inverse trigonometric call.
pub fn unit_limit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// Angular distance between two points given as (longitude, latitude) pairs.
///
/// Uses the spherical law of cosines. The cosine is clamped into [-1, 1] so
/// identical and antipodal points do not produce NaN from rounding.
pub fn angular_sep(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let x = lat2.cos() * lat1.cos() * (lon2 - lon1).cos() + lat2.sin() * lat1.sin();
    unit_limit(x).acos()
}

/// Canonicalize an angle in degrees into [0, 360).
pub fn bound_angle(angle_deg: f64) -> f64 {
    let bounded = angle_deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if bounded >= 360.0 {
        0.0
    } else {
        bounded
    }
}

/// Canonicalize an angle in radians into [0, 2π).
pub fn bound_angle_rad(angle: f64) -> f64 {
    let bounded = angle.rem_euclid(TAU);
    if bounded >= TAU {
        0.0
    } else {
        bounded
    }
}

/// Wrap an angle in radians into [-π, π).
pub fn wrap_pi(angle: f64) -> f64 {
    bound_angle_rad(angle + PI) - PI
}

/// Ecliptic latitude of an equatorial position, in radians.
pub fn ecliptic_latitude(ra: f64, dec: f64) -> f64 {
    FRAC_PI_2 - angular_sep(ra, dec, NEP_RA_DEG.to_radians(), NEP_DEC_DEG.to_radians())
}

/// A direction on the sky in equatorial coordinates (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    /// Right ascension in radians
    pub ra: f64,
    /// Declination in radians, within [-π/2, π/2]
    pub dec: f64,
}

impl SkyPosition {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg.to_radians(), dec_deg.to_radians())
    }

    pub fn ra_degrees(&self) -> f64 {
        self.ra.to_degrees()
    }

    pub fn dec_degrees(&self) -> f64 {
        self.dec.to_degrees()
    }

    /// Angular distance to another position in radians
    pub fn separation(&self, other: &SkyPosition) -> f64 {
        angular_sep(self.ra, self.dec, other.ra, other.dec)
    }

    /// The diametrically opposite direction
    pub fn antipode(&self) -> SkyPosition {
        SkyPosition::new(self.ra + PI, -self.dec)
    }

    pub fn ecliptic_latitude(&self) -> f64 {
        ecliptic_latitude(self.ra, self.dec)
    }

    /// Cartesian unit vector in the equatorial frame
    pub fn to_unit_vector(&self) -> Vector3<f64> {
        Vector3::new(
            self.dec.cos() * self.ra.cos(),
            self.dec.cos() * self.ra.sin(),
            self.dec.sin(),
        )
    }

    /// Direction of a (not necessarily normalized) equatorial vector.
    ///
    /// Right ascension is returned in [0, 2π).
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let r = v.norm();
        Self::new(bound_angle_rad(v.y.atan2(v.x)), unit_limit(v.z / r).asin())
    }

    /// Position angle of `other` as seen from this position, east of north, in [0, 2π).
    pub fn position_angle_to(&self, other: &SkyPosition) -> f64 {
        let east = Vector3::new(-self.ra.sin(), self.ra.cos(), 0.0);
        let north = Vector3::new(
            -self.dec.sin() * self.ra.cos(),
            -self.dec.sin() * self.ra.sin(),
            self.dec.cos(),
        );
        let o = other.to_unit_vector();
        bound_angle_rad(o.dot(&east).atan2(o.dot(&north)))
    }
}

/// Parse a sexagesimal string `d:m:s` into a decimal value.
///
/// The sign of the leading field applies to the whole value, so `-05:30:00`
/// is -5.5 rather than -4.5.
pub fn parse_sexagesimal(s: &str) -> Result<f64> {
    let fields: Vec<&str> = s.trim().split(':').collect();
    if fields.len() != 3 {
        return Err(EphemerisError::InvalidCoordinate(s.to_string()));
    }

    let mut values = [0.0; 3];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = f64::from_str(field.trim())
            .map_err(|_| EphemerisError::InvalidCoordinate(s.to_string()))?;
    }

    let negative = fields[0].trim_start().starts_with('-');
    let magnitude = values[0].abs() + (values[1] + values[2] / 60.0) / 60.0;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse a right ascension, either decimal degrees or `hh:mm:ss.s`, into radians.
pub fn parse_ra(s: &str) -> Result<f64> {
    let degrees = if s.contains(':') {
        parse_sexagesimal(s)? * 15.0
    } else {
        parse_decimal(s)?
    };
    Ok(degrees.to_radians())
}

/// Parse a declination, either decimal degrees or `±dd:mm:ss.s`, into radians.
pub fn parse_dec(s: &str) -> Result<f64> {
    let degrees = if s.contains(':') {
        parse_sexagesimal(s)?
    } else {
        parse_decimal(s)?
    };
    if !(-90.0..=90.0).contains(&degrees) {
        return Err(EphemerisError::InvalidCoordinate(s.to_string()));
    }
    Ok(degrees.to_radians())
}

fn parse_decimal(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EphemerisError::InvalidCoordinate(s.to_string()))
}
