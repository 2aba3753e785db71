//! Modified Julian Date time scale
//!
//! Epochs throughout the workspace are MJD values (days, f64). Calendar
//! conversion goes through the `time` crate's Julian day numbers.

use time::macros::format_description;
use time::Date;

use crate::error::{EphemerisError, Result};

/// Offset between a Julian day number (noon-based) and the MJD of that calendar day
const JDN_MJD_OFFSET: i32 = 2_400_001;

/// J2000.0 epoch (2000-01-01 12:00 TT) as an MJD
pub const J2000_MJD: f64 = 51_544.5;

/// MJD at 00:00 of a calendar date.
pub fn mjd_from_date(date: Date) -> f64 {
    f64::from(date.to_julian_day() - JDN_MJD_OFFSET)
}

/// Calendar date containing an MJD epoch.
pub fn date_from_mjd(mjd: f64) -> Result<Date> {
    if !mjd.is_finite() || mjd.abs() > 1.0e8 {
        return Err(EphemerisError::DateOutOfRange(mjd));
    }
    let day = mjd.floor() as i32;
    Date::from_julian_day(day + JDN_MJD_OFFSET).map_err(|_| EphemerisError::DateOutOfRange(mjd))
}

/// Parse a `YYYY-MM-DD` string into the MJD of its midnight.
pub fn parse_date(s: &str) -> Result<f64> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(s.trim(), &format)
        .map(mjd_from_date)
        .map_err(|_| EphemerisError::InvalidDate(s.to_string()))
}

/// Format the calendar date of an MJD as `YYYY-MM-DD`.
pub fn iso_date(mjd: f64) -> Result<String> {
    let date = date_from_mjd(mjd)?;
    Ok(format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2000-01-01", 51544.0)]
    #[case("2020-01-01", 58849.0)]
    #[case("2021-01-01", 59215.0)]
    #[case("2021-06-01", 59366.0)]
    #[case("2024-12-31", 60675.0)]
    fn test_parse_date(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_date(input).unwrap(), expected);
    }

    #[test]
    fn test_iso_date_round_trip_through_fraction() {
        assert_eq!(iso_date(59215.0).unwrap(), "2021-01-01");
        assert_eq!(iso_date(59215.99).unwrap(), "2021-01-01");
        assert_eq!(iso_date(59216.0).unwrap(), "2021-01-02");
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            parse_date("2021/01/01"),
            Err(EphemerisError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date("2021-02-30"),
            Err(EphemerisError::InvalidDate(_))
        ));
        assert!(matches!(
            iso_date(f64::NAN),
            Err(EphemerisError::DateOutOfRange(_))
        ));
    }
}
