//! Target visibility tool.
//!
//! Prints the observing windows of a fixed or moving target and a per-day
//! table of reachable position angles, optionally plotting them:
//! - `fixed <ra> <dec> <name>`: sidereal target, decimal degrees or sexagesimal
//! - `moving <name>`: solar-system target resolved through JPL Horizons

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ephemeris::angles::{parse_dec, parse_ra};
use ephemeris::mjd::parse_date;
use ephemeris::{AttitudeMode, HorizonsClient, SkyPosition};
use log::info;
use visibility::plot::fixed_target_title;
use visibility::run::emit;
use visibility::{ObservatoryConfig, VisibilityError, VisibilityRun};

#[derive(Parser, Debug)]
#[command(name = "tvt")]
#[command(about = "Observing windows and position angles for a telescope target")]
#[command(version)]
struct Args {
    /// First day of the search (YYYY-MM-DD)
    #[arg(long, global = true, default_value = "2020-01-01")]
    start_date: String,

    /// Last day of the search (YYYY-MM-DD)
    #[arg(long, global = true, default_value = "2024-01-01")]
    end_date: String,

    /// Plot only this instrument: v3, nircam, nirspec, niriss, miri or fgs
    #[arg(long, global = true)]
    instrument: Option<String>,

    /// Write the table to this file instead of stdout
    #[arg(long, global = true)]
    save_table: Option<PathBuf>,

    /// Render the plot to this file (.svg for SVG, otherwise bitmap)
    #[arg(long, global = true)]
    save_plot: Option<PathBuf>,

    /// Search for windows at this fixed V3 position angle, degrees
    #[arg(long, global = true, allow_hyphen_values = true)]
    v3pa: Option<f64>,

    /// Observatory configuration JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    target: Target,
}

#[derive(Subcommand, Debug)]
enum Target {
    /// Fixed target at a sky position
    Fixed {
        /// Right ascension, degrees or hh:mm:ss.s
        ra: String,
        /// Declination, degrees or dd:mm:ss.s
        #[arg(allow_hyphen_values = true)]
        dec: String,
        /// Target name
        name: String,
    },

    /// Moving target, positions from JPL Horizons
    Moving {
        /// Horizons small-body designation or name
        name: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ObservatoryConfig::load_from_file(path)?,
        None => ObservatoryConfig::default(),
    };
    let oracle = config.build_ephemeris();

    let mode = match args.v3pa {
        Some(pa) => AttitudeMode::FixedV3Pa(pa.to_radians()),
        None => AttitudeMode::FieldOfRegard,
    };
    let start = parse_date(&args.start_date)?;
    let end = parse_date(&args.end_date)?;
    let run = VisibilityRun::prepare(&config, &oracle, start, end, mode)?;

    let (track, title) = match &args.target {
        Target::Fixed { ra, dec, name } => {
            let position = SkyPosition::new(parse_ra(ra)?, parse_dec(dec)?);
            (
                run.fixed_track(name, position),
                fixed_target_title(name, ra, dec),
            )
        }
        Target::Moving { name } => {
            let track = run.moving_track(&HorizonsClient::new(), name)?;
            let title = track.name().to_string();
            (track, title)
        }
    };

    let report = run.run(&oracle, track);

    let instrument = args.instrument.as_deref();
    let save_plot = args.save_plot.as_deref();
    let emitted = match &args.save_table {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            let emitted = emit(&mut out, &report, instrument, save_plot, &title);
            out.flush()?;
            info!("Table saved to {}", path.display());
            emitted
        }
        None => emit(&mut io::stdout().lock(), &report, instrument, save_plot, &title),
    };

    match emitted {
        // An unknown instrument only stops the plot; the table is already out
        Err(err @ VisibilityError::UnknownInstrument(_)) => {
            println!();
            println!("{err}");
        }
        other => other?,
    }

    Ok(())
}
