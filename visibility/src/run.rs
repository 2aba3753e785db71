//! End-to-end visibility run
//!
//! [`VisibilityRun::prepare`] checks the requested dates and builds the
//! daily grid. [`VisibilityRun::run`] then performs the window scan and the
//! envelope projection side by side; both only read the oracle. [`emit`]
//! writes the finished report out.

use std::io::Write;
use std::path::Path;

use ephemeris::mjd::iso_date;
use ephemeris::{AttitudeMode, ObservabilityOracle, SkyPosition, TargetEphemerisProvider};
use log::{info, warn};

use crate::config::ObservatoryConfig;
use crate::error::{Result, VisibilityError};
use crate::instrument::Instrument;
use crate::plot::{render_plot, PlotLayout};
use crate::projector::{project, EnvelopeSeries};
use crate::report::write_report;
use crate::scanner::{scan, ScanOutcome};
use crate::track::{TargetTrack, TimeGrid};

/// Everything a report or plot needs from a finished run.
#[derive(Debug, Clone)]
pub struct VisibilityReport {
    pub grid: TimeGrid,
    pub track: TargetTrack,
    pub mode: AttitudeMode,
    /// The start was moved into the oracle's coverage
    pub start_nudged: bool,
    pub outcome: ScanOutcome,
    pub envelopes: EnvelopeSeries,
}

/// A validated search span and attitude mode.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityRun {
    grid: TimeGrid,
    mode: AttitudeMode,
    start_nudged: bool,
}

fn check_in_domain(which: &'static str, mjd: f64, domain: (f64, f64)) -> Result<()> {
    if (domain.0..=domain.1).contains(&mjd) {
        return Ok(());
    }
    Err(VisibilityError::OutsideDomain {
        which,
        date: iso_date(mjd)?,
        domain_start: iso_date(domain.0)?,
        domain_end: iso_date(domain.1)?,
    })
}

impl VisibilityRun {
    /// Validate `[start, end]` (MJD) against the configured domain.
    ///
    /// A start before the oracle's own coverage is moved to one day after
    /// the coverage starts; the moved start must still not pass `end`.
    pub fn prepare<O>(
        config: &ObservatoryConfig,
        oracle: &O,
        start: f64,
        end: f64,
        mode: AttitudeMode,
    ) -> Result<Self>
    where
        O: ObservabilityOracle + ?Sized,
    {
        check_in_domain("Start", start, config.domain())?;
        check_in_domain("End", end, config.domain())?;
        if start > end {
            return Err(VisibilityError::StartAfterEnd { start, end });
        }

        let coverage_start = oracle.domain().0;
        let mut start = start;
        let mut start_nudged = false;
        if start < coverage_start {
            warn!("Search start MJD {start} is earlier than ephemeris start MJD {coverage_start}");
            start = coverage_start + 1.0;
            start_nudged = true;
            if start > end {
                return Err(VisibilityError::StartAfterEnd { start, end });
            }
        }

        let grid = TimeGrid::spanning(start, end);
        info!(
            "Checking {} days from MJD {} to MJD {}",
            grid.days(),
            grid.start(),
            grid.end()
        );
        Ok(Self {
            grid,
            mode,
            start_nudged,
        })
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn mode(&self) -> AttitudeMode {
        self.mode
    }

    pub fn start_nudged(&self) -> bool {
        self.start_nudged
    }

    pub fn fixed_track(&self, name: &str, position: SkyPosition) -> TargetTrack {
        TargetTrack::fixed(name, position, &self.grid)
    }

    /// Fetch daily positions of a moving target over the grid.
    pub fn moving_track<P>(&self, provider: &P, target_id: &str) -> Result<TargetTrack>
    where
        P: TargetEphemerisProvider + ?Sized,
    {
        let ephemeris = provider.fetch(target_id, self.grid.start(), self.grid.end())?;
        TargetTrack::moving(ephemeris, &self.grid)
    }

    /// Scan for windows and project envelopes for `track`.
    pub fn run<O>(&self, oracle: &O, track: TargetTrack) -> VisibilityReport
    where
        O: ObservabilityOracle + Sync + ?Sized,
    {
        let (outcome, envelopes) = rayon::join(
            || scan(oracle, &self.grid, &track, self.mode),
            || project(oracle, &self.grid, &track),
        );

        VisibilityReport {
            grid: self.grid,
            track,
            mode: self.mode,
            start_nudged: self.start_nudged,
            outcome,
            envelopes,
        }
    }
}

/// Write the table for `report`, then plot it if `save_plot` is set.
///
/// `instrument` limits the plot to one panel. An unrecognized name is
/// returned as [`VisibilityError::UnknownInstrument`] once the table is
/// written, and nothing is plotted.
pub fn emit<W: Write>(
    out: &mut W,
    report: &VisibilityReport,
    instrument: Option<&str>,
    save_plot: Option<&Path>,
    title: &str,
) -> Result<()> {
    write_report(out, report)?;

    let layout = match instrument {
        None => PlotLayout::AllInstruments,
        Some(name) => PlotLayout::Single(name.parse::<Instrument>()?),
    };

    if let Some(path) = save_plot {
        render_plot(
            path,
            &report.envelopes,
            (report.grid.start(), report.grid.end()),
            layout,
            title,
        )?;
    }
    Ok(())
}
