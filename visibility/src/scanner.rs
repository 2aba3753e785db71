//! Observing window search
//!
//! Walks the daily grid remembering the last predicate value. Every change
//! between consecutive days is refined by bisection into a window boundary.
//! Changes faster than one day are invisible to the scan.

use ephemeris::{AttitudeMode, ObservabilityOracle, SkyPosition};
use log::{debug, info};

use crate::track::{TargetTrack, TimeGrid};

/// Hemisphere of a continuous viewing zone target, from the sign of its declination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Zero declination counts as north
    pub fn from_declination(dec: f64) -> Self {
        if dec >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    /// Full-circle `(start, end)` angle pair reported in place of a PA range, radians
    pub fn full_circle(&self) -> (f64, f64) {
        match self {
            Hemisphere::North => (0.0, std::f64::consts::TAU),
            Hemisphere::South => (std::f64::consts::TAU, 0.0),
        }
    }
}

/// A contiguous interval during which the target is observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Opening epoch, MJD
    pub start: f64,
    /// Closing epoch, MJD
    pub end: f64,
    /// V3 PA at the opening epoch, radians
    pub pa_start: f64,
    /// V3 PA at the closing epoch, radians
    pub pa_end: f64,
    /// Target position when the window opened
    pub entry: SkyPosition,
    /// Target position when the window closed
    pub exit: SkyPosition,
}

impl Window {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Terminal state of a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// One or more finite windows, in time order
    Windows(Vec<Window>),
    /// Observable at every grid epoch without a single transition
    ContinuousViewing(Hemisphere),
    /// Not observable at any grid epoch
    NeverVisible,
}

impl ScanOutcome {
    /// Finite windows, empty for the other outcomes
    pub fn windows(&self) -> &[Window] {
        match self {
            ScanOutcome::Windows(windows) => windows,
            _ => &[],
        }
    }

    pub fn is_never_visible(&self) -> bool {
        matches!(self, ScanOutcome::NeverVisible)
    }
}

struct OpenWindow {
    start: f64,
    entry: SkyPosition,
}

fn attitude_pa<O>(oracle: &O, mode: AttitudeMode, mjd: f64, position: &SkyPosition) -> f64
where
    O: ObservabilityOracle + ?Sized,
{
    match mode {
        AttitudeMode::FieldOfRegard => oracle.normal_pa(mjd, position),
        AttitudeMode::FixedV3Pa(pa) => pa,
    }
}

fn close_window<O>(
    oracle: &O,
    mode: AttitudeMode,
    open: OpenWindow,
    end: f64,
    exit: SkyPosition,
) -> Window
where
    O: ObservabilityOracle + ?Sized,
{
    Window {
        start: open.start,
        end,
        pa_start: attitude_pa(oracle, mode, open.start, &open.entry),
        pa_end: attitude_pa(oracle, mode, end, &exit),
        entry: open.entry,
        exit,
    }
}

/// Find the observing windows of `track` over `grid`.
///
/// The predicate is in-field-of-regard or is-valid-attitude depending on
/// `mode`. The continuous viewing outcome only exists in field-of-regard
/// mode; a fixed attitude that holds throughout is reported as one window
/// spanning the grid.
///
/// # Panics
///
/// If `track` does not hold one position per epoch of `grid`.
pub fn scan<O>(oracle: &O, grid: &TimeGrid, track: &TargetTrack, mode: AttitudeMode) -> ScanOutcome
where
    O: ObservabilityOracle + ?Sized,
{
    assert_eq!(
        track.positions().len(),
        grid.len(),
        "track '{}' was not built for this grid",
        track.name()
    );
    let mut observable = oracle.is_observable(grid.start(), &track.first(), mode);
    let mut open = observable.then(|| OpenWindow {
        start: grid.start(),
        entry: track.first(),
    });
    let mut flipped = false;
    let mut windows = Vec::new();

    for index in 1..grid.len() {
        let previous = grid.epoch(index - 1);
        let now = grid.epoch(index);
        let position = track.position(index);
        let current = oracle.is_observable(now, &position, mode);
        if current == observable {
            continue;
        }
        flipped = true;

        if current {
            let start = oracle.bisect_transition(previous, now, &position, mode);
            debug!("Window opens at MJD {start:.5}");
            open = Some(OpenWindow {
                start,
                entry: position,
            });
        } else {
            let end = oracle.bisect_transition(now, previous, &position, mode);
            debug!("Window closes at MJD {end:.5}");
            if let Some(opened) = open.take() {
                windows.push(close_window(oracle, mode, opened, end, position));
            }
        }
        observable = current;
    }

    let outcome = match (observable, flipped) {
        (true, true) => {
            // End of the search span, not a transition
            if let Some(opened) = open.take() {
                windows.push(close_window(oracle, mode, opened, grid.end(), track.last()));
            }
            ScanOutcome::Windows(windows)
        }
        (true, false) => match mode {
            AttitudeMode::FieldOfRegard => {
                ScanOutcome::ContinuousViewing(Hemisphere::from_declination(track.last().dec))
            }
            AttitudeMode::FixedV3Pa(_) => match open.take() {
                Some(opened) => ScanOutcome::Windows(vec![close_window(
                    oracle,
                    mode,
                    opened,
                    grid.end(),
                    track.last(),
                )]),
                None => ScanOutcome::NeverVisible,
            },
        },
        (false, _) if windows.is_empty() => ScanOutcome::NeverVisible,
        (false, _) => ScanOutcome::Windows(windows),
    };

    match &outcome {
        ScanOutcome::Windows(windows) => info!("Found {} observing windows", windows.len()),
        ScanOutcome::ContinuousViewing(hemisphere) => {
            info!("Target is in the {hemisphere:?} continuous viewing zone")
        }
        ScanOutcome::NeverVisible => info!("Target is never observable in the checked interval"),
    }
    outcome
}
