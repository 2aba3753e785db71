//! Time grid and per-day target positions

use ephemeris::{SkyPosition, TargetEphemeris};

use crate::error::{Result, VisibilityError};

/// Uniform one-day grid of MJD epochs from `start` through `start + days`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    days: usize,
}

impl TimeGrid {
    pub fn new(start: f64, days: usize) -> Self {
        Self { start, days }
    }

    /// Grid covering `[start, end]`; a partial trailing day is dropped.
    pub fn spanning(start: f64, end: f64) -> Self {
        let days = (end - start).max(0.0).floor() as usize;
        Self::new(start, days)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    /// Last epoch on the grid
    pub fn end(&self) -> f64 {
        self.epoch(self.days)
    }

    /// Number of one-day steps
    pub fn days(&self) -> usize {
        self.days
    }

    /// Number of epochs (one more than the number of steps)
    pub fn len(&self) -> usize {
        self.days + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn epoch(&self, index: usize) -> f64 {
        self.start + index as f64
    }

    pub fn epochs(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.epoch(i))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Sidereal target with a constant position
    Fixed,
    /// Solar-system target sampled once per day
    Moving,
}

/// A named target with one sky position per grid epoch.
#[derive(Debug, Clone)]
pub struct TargetTrack {
    name: String,
    kind: TargetKind,
    positions: Vec<SkyPosition>,
}

impl TargetTrack {
    /// Fixed target repeated over every epoch of the grid
    pub fn fixed(name: &str, position: SkyPosition, grid: &TimeGrid) -> Self {
        Self {
            name: name.to_string(),
            kind: TargetKind::Fixed,
            positions: vec![position; grid.len()],
        }
    }

    /// Moving target from provider samples, which must align one-to-one with the grid.
    pub fn moving(ephemeris: TargetEphemeris, grid: &TimeGrid) -> Result<Self> {
        if ephemeris.len() != grid.len() || ephemeris.dec_deg.len() != grid.len() {
            return Err(VisibilityError::EphemerisLengthMismatch {
                expected: grid.len(),
                actual: ephemeris.len().min(ephemeris.dec_deg.len()),
            });
        }

        let positions = ephemeris
            .ra_deg
            .iter()
            .zip(&ephemeris.dec_deg)
            .map(|(&ra, &dec)| SkyPosition::from_degrees(ra, dec))
            .collect();

        Ok(Self {
            name: ephemeris.name,
            kind: TargetKind::Moving,
            positions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == TargetKind::Fixed
    }

    pub fn positions(&self) -> &[SkyPosition] {
        &self.positions
    }

    /// Position at a grid index
    pub fn position(&self, index: usize) -> SkyPosition {
        self.positions[index]
    }

    pub fn first(&self) -> SkyPosition {
        self.positions[0]
    }

    pub fn last(&self) -> SkyPosition {
        self.positions[self.positions.len() - 1]
    }
}
