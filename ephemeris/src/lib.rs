//! Sun geometry and observability queries for a sun-avoiding space telescope
//!
//! - [`angles`]: spherical separations, angle canonicalization, ecliptic latitude
//! - [`mjd`]: Modified Julian Date <-> calendar conversion
//! - [`sun`]: low-precision solar ephemeris
//! - [`roll`]: maximum vehicle roll allowed by the sunshield
//! - [`oracle`]: the query interface consumed by the visibility scan
//! - [`celestial`]: analytic [`Ephemeris`] implementing that interface
//! - [`horizons`]: daily positions of moving targets from JPL Horizons

pub mod angles;
pub mod celestial;
pub mod error;
pub mod horizons;
pub mod mjd;
pub mod oracle;
pub mod roll;
pub mod sun;

pub use angles::SkyPosition;
pub use celestial::Ephemeris;
pub use error::EphemerisError;
pub use horizons::{HorizonsClient, TargetEphemeris, TargetEphemerisProvider};
pub use oracle::{AttitudeMode, ObservabilityOracle};
