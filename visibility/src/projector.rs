//! Daily position angle envelopes per instrument
//!
//! Independent of the window scan: every grid epoch is sampled, and epochs
//! outside the field of regard are kept as `None` so they stay distinct
//! from a zero-width envelope.

use ephemeris::angles::bound_angle;
use ephemeris::roll::allowed_max_vehicle_roll;
use ephemeris::{ObservabilityOracle, SkyPosition};
use log::debug;

use crate::instrument::Instrument;
use crate::track::{TargetTrack, TimeGrid};

/// Achievable position angles `[min, max]` in degrees, each in `[0, 360)`.
///
/// `min > max` means the range wraps through 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaRange {
    pub min: f64,
    pub max: f64,
}

impl PaRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Roll envelope around a nominal V3 PA, shifted by an instrument offset
    pub fn around(v3pa_deg: f64, max_roll_deg: f64, offset_deg: f64) -> Self {
        Self {
            min: bound_angle(v3pa_deg - max_roll_deg + offset_deg),
            max: bound_angle(v3pa_deg + max_roll_deg + offset_deg),
        }
    }

    pub fn wraps(&self) -> bool {
        self.min > self.max
    }
}

/// Envelope of one in-field-of-regard epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeSample {
    pub mjd: f64,
    pub position: SkyPosition,
    /// Nominal V3 PA, degrees
    pub v3pa_deg: f64,
    /// Largest roll away from nominal, degrees
    pub max_roll_deg: f64,
    /// Ranges in [`Instrument::ALL`] order
    pub ranges: [PaRange; 6],
}

impl EnvelopeSample {
    pub fn range(&self, instrument: Instrument) -> PaRange {
        self.ranges[instrument.index()]
    }
}

/// Per-day envelopes aligned with a [`TimeGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeSeries {
    epochs: Vec<f64>,
    samples: Vec<Option<EnvelopeSample>>,
}

impl EnvelopeSeries {
    pub fn epochs(&self) -> &[f64] {
        &self.epochs
    }

    pub fn samples(&self) -> &[Option<EnvelopeSample>] {
        &self.samples
    }

    /// Range series for one instrument, `None` outside the field of regard
    pub fn instrument(&self, instrument: Instrument) -> Vec<Option<PaRange>> {
        self.samples
            .iter()
            .map(|sample| sample.map(|s| s.range(instrument)))
            .collect()
    }

    /// Number of epochs inside the field of regard
    pub fn observable_days(&self) -> usize {
        self.samples.iter().filter(|s| s.is_some()).count()
    }
}

/// Sample the envelope at one epoch, `None` if outside the field of regard.
pub fn envelope_at<O>(oracle: &O, mjd: f64, position: SkyPosition) -> Option<EnvelopeSample>
where
    O: ObservabilityOracle + ?Sized,
{
    if !oracle.in_field_of_regard(mjd, &position) {
        return None;
    }

    let v3pa_deg = oracle.normal_pa(mjd, &position).to_degrees();
    let sun = oracle.sun_position(mjd);
    let max_roll_deg = allowed_max_vehicle_roll(&sun, &position).to_degrees();
    let ranges =
        Instrument::ALL.map(|inst| PaRange::around(v3pa_deg, max_roll_deg, inst.offset_deg()));

    Some(EnvelopeSample {
        mjd,
        position,
        v3pa_deg,
        max_roll_deg,
        ranges,
    })
}

/// Sample every grid epoch.
///
/// Always uses the field-of-regard predicate, whatever attitude mode the
/// window scan runs in.
///
/// # Panics
///
/// If `track` does not hold one position per epoch of `grid`.
pub fn project<O>(oracle: &O, grid: &TimeGrid, track: &TargetTrack) -> EnvelopeSeries
where
    O: ObservabilityOracle + ?Sized,
{
    assert_eq!(
        track.positions().len(),
        grid.len(),
        "track '{}' was not built for this grid",
        track.name()
    );
    let epochs: Vec<f64> = grid.epochs().collect();
    let samples: Vec<Option<EnvelopeSample>> = epochs
        .iter()
        .enumerate()
        .map(|(i, &mjd)| envelope_at(oracle, mjd, track.position(i)))
        .collect();

    let series = EnvelopeSeries { epochs, samples };
    debug!(
        "Projected {} of {} epochs inside the field of regard",
        series.observable_days(),
        series.epochs.len()
    );
    series
}
