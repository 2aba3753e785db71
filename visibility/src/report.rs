//! Text report: target header, window list and per-day PA table

use std::io::Write;

use ephemeris::mjd::iso_date;
use ephemeris::{AttitudeMode, SkyPosition};

use crate::error::Result;
use crate::instrument::Instrument;
use crate::projector::{EnvelopeSample, EnvelopeSeries};
use crate::run::VisibilityReport;
use crate::scanner::{Hemisphere, ScanOutcome, Window};
use crate::track::{TargetKind, TargetTrack, TimeGrid};

/// Emitted when the requested start precedes the ephemeris coverage
pub const START_NUDGED_WARNING: &str =
    "Warning, search start time is earlier than ephemeris start.";

const CVZ_MARKER: &str = "CVZ";

/// Write the complete report for a finished run.
pub fn write_report<W: Write>(out: &mut W, report: &VisibilityReport) -> Result<()> {
    if report.start_nudged {
        writeln!(out, "{START_NUDGED_WARNING}")?;
    }
    write_target_header(out, &report.track)?;
    write_checked_interval(out, &report.grid)?;
    write_window_header(out, report.track.kind(), report.mode)?;
    write_windows(out, &report.track, &report.outcome)?;
    write_daily_table(out, &report.track, &report.envelopes)?;
    Ok(())
}

/// Target block; coordinates and ecliptic latitude only for fixed targets.
pub fn write_target_header<W: Write>(out: &mut W, track: &TargetTrack) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "       Target")?;
    if track.is_fixed() {
        let target = track.first();
        writeln!(out, "                ecliptic")?;
        writeln!(out, "RA      Dec     latitude")?;
        writeln!(
            out,
            "{:7.3} {:7.3} {:7.3}",
            target.ra_degrees(),
            target.dec_degrees(),
            target.ecliptic_latitude().to_degrees()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_checked_interval<W: Write>(out: &mut W, grid: &TimeGrid) -> Result<()> {
    writeln!(
        out,
        "Checked interval [{}, {}]",
        iso_date(grid.start())?,
        iso_date(grid.end())?
    )?;
    Ok(())
}

/// Column headings of the window list
pub fn write_window_header<W: Write>(
    out: &mut W,
    kind: TargetKind,
    mode: AttitudeMode,
) -> Result<()> {
    let pa_heading = match mode {
        AttitudeMode::FieldOfRegard => "    Normal V3 PA [deg]    ",
        AttitudeMode::FixedV3Pa(_) => "   Specified V3 PA [deg]  ",
    };
    write!(out, "|           Window [days]                 |{pa_heading}|")?;
    match kind {
        TargetKind::Fixed => writeln!(out)?,
        TargetKind::Moving => writeln!(out, "{:^27}|{:^27}|", "RA", "Dec")?,
    }

    write!(
        out,
        "   Start           End         Duration         Start         End    "
    )?;
    match kind {
        TargetKind::Fixed => writeln!(out, "{:^13} {:^13}", "RA", "Dec")?,
        TargetKind::Moving => {
            writeln!(out, "{:^13} {:^13} {:^13} {:^13}", "Start", "End", "Start", "End")?
        }
    }
    Ok(())
}

/// Position columns: one pair for fixed targets, start and end for moving ones
fn position_columns(kind: TargetKind, entry: &SkyPosition, exit: &SkyPosition) -> String {
    match kind {
        TargetKind::Fixed => format!("{:13.5} {:13.5} ", entry.ra_degrees(), entry.dec_degrees()),
        TargetKind::Moving => format!(
            "{:13.5} {:13.5} {:13.5} {:13.5} ",
            entry.ra_degrees(),
            exit.ra_degrees(),
            entry.dec_degrees(),
            exit.dec_degrees()
        ),
    }
}

/// Summary line of a finite window.
pub fn window_summary_line(kind: TargetKind, window: &Window) -> Result<String> {
    let mut line = format!(
        " {:15} {:11} {:11.2} ",
        iso_date(window.start)?,
        iso_date(window.end)?,
        window.duration()
    );
    line += &format!(
        "{:13.5} {:13.5} ",
        window.pa_start.to_degrees(),
        window.pa_end.to_degrees()
    );
    line += &position_columns(kind, &window.entry, &window.exit);
    Ok(line)
}

/// Summary line of a continuous viewing zone target.
pub fn cvz_summary_line(
    kind: TargetKind,
    hemisphere: Hemisphere,
    first: &SkyPosition,
    last: &SkyPosition,
) -> String {
    let (pa_start, pa_end) = hemisphere.full_circle();
    let mut line = format!(" {CVZ_MARKER:15} {CVZ_MARKER:11} {CVZ_MARKER:11} ");
    line += &format!("{:13.5} {:13.5} ", pa_start.to_degrees(), pa_end.to_degrees());
    line += &position_columns(kind, first, last);
    line
}

pub fn write_windows<W: Write>(
    out: &mut W,
    track: &TargetTrack,
    outcome: &ScanOutcome,
) -> Result<()> {
    match outcome {
        ScanOutcome::Windows(windows) => {
            for window in windows {
                writeln!(out, "{}", window_summary_line(track.kind(), window)?)?;
            }
        }
        ScanOutcome::ContinuousViewing(hemisphere) => {
            let line = cvz_summary_line(track.kind(), *hemisphere, &track.first(), &track.last());
            writeln!(out, "{line}")?;
        }
        ScanOutcome::NeverVisible => {}
    }
    Ok(())
}

/// Table row of one in-field-of-regard day
pub fn daily_row(kind: TargetKind, sample: &EnvelopeSample) -> Result<String> {
    let mut row = iso_date(sample.mjd)?;
    if kind == TargetKind::Moving {
        row += &format!(
            "   {:6.2} {:6.2}",
            sample.position.ra_degrees(),
            sample.position.dec_degrees()
        );
    }
    for inst in Instrument::ALL {
        let range = sample.range(inst);
        row += &format!("   {:6.2} {:6.2}", range.min, range.max);
    }
    Ok(row)
}

/// Per-day min/max PA table. Days outside the field of regard are skipped and
/// each re-entry into the field of regard starts a new block.
pub fn write_daily_table<W: Write>(
    out: &mut W,
    track: &TargetTrack,
    series: &EnvelopeSeries,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out)?;
    match track.kind() {
        TargetKind::Fixed => {
            writeln!(out, "                V3PA          NIRCam           NIRSpec         NIRISS           MIRI          FGS")?;
            writeln!(out, "   Date      min    max      min    max       min    max     min    max      min    max      min    max")?;
        }
        TargetKind::Moving => {
            writeln!(out, "                                V3PA          NIRCam           NIRSpec         NIRISS           MIRI          FGS")?;
            writeln!(out, "   Date      RA     Dec      min    max      min    max       min    max     min    max      min    max      min    max")?;
        }
    }

    let mut inside = series.samples().first().is_some_and(Option::is_some);
    for sample in series.samples() {
        match sample {
            Some(sample) => {
                if !inside {
                    writeln!(out)?;
                }
                inside = true;
                writeln!(out, "{}", daily_row(track.kind(), sample)?)?;
            }
            None => inside = false,
        }
    }
    Ok(())
}
