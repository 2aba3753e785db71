//! Moving-target positions from JPL Horizons
//!
//! Solar-system targets are not fixed on the sky, so their RA/Dec is
//! fetched once per day over the search span from the Horizons observer
//! table service, as seen from the observatory (`500@-170`).

use log::{debug, info};
use serde::Deserialize;

use crate::error::{EphemerisError, Result};
use crate::mjd::iso_date;

/// Public Horizons API endpoint
pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// Horizons observer code for the observatory
pub const OBSERVATORY_CENTER: &str = "500@-170";

const START_OF_EPHEMERIS: &str = "$$SOE";
const END_OF_EPHEMERIS: &str = "$$EOE";
const TARGET_NAME_PREFIX: &str = "Target body name:";

/// Daily positions of a moving target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEphemeris {
    /// Target name as resolved by the provider
    pub name: String,
    /// Right ascension per day, degrees
    pub ra_deg: Vec<f64>,
    /// Declination per day, degrees
    pub dec_deg: Vec<f64>,
}

impl TargetEphemeris {
    pub fn len(&self) -> usize {
        self.ra_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra_deg.is_empty()
    }
}

/// Source of per-day positions for a moving target.
///
/// Must return one sample per day over `[start_mjd, end_mjd]`, both ends included.
pub trait TargetEphemerisProvider {
    fn fetch(&self, target_id: &str, start_mjd: f64, end_mjd: f64) -> Result<TargetEphemeris>;
}

#[derive(Debug, Deserialize)]
struct HorizonsReply {
    result: Option<String>,
    error: Option<String>,
}

/// Blocking Horizons API client
#[derive(Debug, Clone)]
pub struct HorizonsClient {
    base_url: String,
}

impl HorizonsClient {
    pub fn new() -> Self {
        Self::with_url(HORIZONS_API_URL)
    }

    /// Point the client at a different endpoint (mirrors, local test servers)
    pub fn with_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

impl Default for HorizonsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetEphemerisProvider for HorizonsClient {
    fn fetch(&self, target_id: &str, start_mjd: f64, end_mjd: f64) -> Result<TargetEphemeris> {
        let start = iso_date(start_mjd)?;
        let stop = iso_date(end_mjd)?;
        info!("Requesting Horizons ephemeris for '{target_id}' from {start} to {stop}");

        // A trailing semicolon restricts the lookup to small bodies
        let mut response = ureq::get(self.base_url.as_str())
            .query("format", "json")
            .query("COMMAND", format!("'{target_id};'"))
            .query("OBJ_DATA", "'NO'")
            .query("MAKE_EPHEM", "'YES'")
            .query("EPHEM_TYPE", "'OBSERVER'")
            .query("CENTER", format!("'{OBSERVATORY_CENTER}'"))
            .query("START_TIME", format!("'{start}'"))
            .query("STOP_TIME", format!("'{stop}'"))
            .query("STEP_SIZE", "'1d'")
            .query("QUANTITIES", "'1'")
            .query("ANG_FORMAT", "'DEG'")
            .query("CSV_FORMAT", "'YES'")
            .call()?;

        let body = response.body_mut().read_to_string()?;
        let ephemeris = parse_reply(&body)?;
        debug!(
            "Horizons resolved '{}' with {} samples",
            ephemeris.name,
            ephemeris.len()
        );
        Ok(ephemeris)
    }
}

/// Parse the JSON envelope returned by the Horizons API.
pub fn parse_reply(body: &str) -> Result<TargetEphemeris> {
    let reply: HorizonsReply = serde_json::from_str(body)?;
    if let Some(error) = reply.error {
        return Err(EphemerisError::Horizons(error));
    }
    let text = reply
        .result
        .ok_or_else(|| EphemerisError::MalformedResponse("missing result field".to_string()))?;
    parse_observer_table(&text)
}

/// Parse a Horizons observer table in CSV layout with RA/Dec in degrees.
///
/// Rows between `$$SOE` and `$$EOE` look like
/// `2021-Jan-01 00:00, , , 23.98167, -11.59350,`: date, two marker
/// columns, then the astrometric RA and Dec.
pub fn parse_observer_table(text: &str) -> Result<TargetEphemeris> {
    let name = text
        .lines()
        .find_map(|line| line.trim().strip_prefix(TARGET_NAME_PREFIX))
        .map(|rest| rest.split('{').next().unwrap_or(rest).trim().to_string())
        .ok_or_else(|| EphemerisError::MalformedResponse("no target body name".to_string()))?;

    let mut lines = text.lines().map(str::trim);
    if !lines.any(|line| line == START_OF_EPHEMERIS) {
        // Horizons reports lookup failures (ambiguous or unknown names) as prose
        return Err(EphemerisError::Horizons(format!(
            "no ephemeris block in response for '{name}'"
        )));
    }

    let mut ra_deg = Vec::new();
    let mut dec_deg = Vec::new();
    for line in lines {
        if line == END_OF_EPHEMERIS {
            return Ok(TargetEphemeris {
                name,
                ra_deg,
                dec_deg,
            });
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let (ra, dec) = match (fields.get(3), fields.get(4)) {
            (Some(ra), Some(dec)) => (parse_field(ra, line)?, parse_field(dec, line)?),
            _ => {
                return Err(EphemerisError::MalformedResponse(format!(
                    "short ephemeris row: {line}"
                )))
            }
        };
        ra_deg.push(ra);
        dec_deg.push(dec);
    }

    Err(EphemerisError::MalformedResponse(
        "unterminated ephemeris block".to_string(),
    ))
}

fn parse_field(field: &str, line: &str) -> Result<f64> {
    field
        .parse()
        .map_err(|_| EphemerisError::MalformedResponse(format!("bad number in row: {line}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CERES: &str = "\
*******************************************************************************
JPL/HORIZONS                      1 Ceres (A801 AA)          2024-Jan-05 10:00:00
Rec #:       1 (+COV) Soln.date: 2023-Nov-03_15:21:50   # obs: 1093 (1995-2023)

Target body name: 1 Ceres (A801 AA)               {source: JPL#48}
Center body name: JWST (spacecraft)               {source: jwst_pred}
*******************************************************************************
 Date__(UT)__HR:MN, , , R.A._(ICRF), DEC__(ICRF),
*******************************************************************************
$$SOE
 2021-Jan-01 00:00, , ,  23.98167, -11.59350,
 2021-Jan-02 00:00, , ,  24.18212, -11.47622,
 2021-Jan-03 00:00,*, ,  24.38466, -11.35730,
$$EOE
*******************************************************************************
";

    #[test]
    fn test_parse_observer_table() {
        let eph = parse_observer_table(CERES).unwrap();
        assert_eq!(eph.name, "1 Ceres (A801 AA)");
        assert_eq!(eph.len(), 3);
        assert_eq!(eph.ra_deg, vec![23.98167, 24.18212, 24.38466]);
        assert_eq!(eph.dec_deg, vec![-11.59350, -11.47622, -11.35730]);
    }

    #[test]
    fn test_parse_reply() {
        let body = serde_json::json!({
            "signature": { "source": "NASA/JPL Horizons API", "version": "1.2" },
            "result": CERES,
        })
        .to_string();
        assert_eq!(parse_reply(&body).unwrap().len(), 3);

        let error = r#"{"error": "Cannot interpret date. Type \"?!\" for help."}"#;
        assert!(matches!(parse_reply(error), Err(EphemerisError::Horizons(_))));
        assert!(matches!(parse_reply("{}"), Err(EphemerisError::MalformedResponse(_))));
        assert!(matches!(parse_reply("<html>"), Err(EphemerisError::Json(_))));
    }

    #[test]
    fn test_missing_ephemeris_block() {
        let text = "Target body name: Nowhere {source: none}\nNo matches found.\n";
        assert!(matches!(
            parse_observer_table(text),
            Err(EphemerisError::Horizons(_))
        ));
    }

    #[test]
    fn test_unterminated_block() {
        let text = "Target body name: Ceres\n$$SOE\n 2021-Jan-01 00:00, , , 1.0, 2.0,\n";
        assert!(matches!(
            parse_observer_table(text),
            Err(EphemerisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_bad_row() {
        let text = "Target body name: Ceres\n$$SOE\n 2021-Jan-01 00:00, , , n.a., 2.0,\n$$EOE\n";
        assert!(matches!(
            parse_observer_table(text),
            Err(EphemerisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_missing_name() {
        assert!(parse_observer_table("$$SOE\n$$EOE\n").is_err());
    }
}
