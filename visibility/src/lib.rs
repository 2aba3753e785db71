//! Target visibility for a sun-constrained space telescope
//!
//! Given a fixed or moving target and a date range, finds the intervals in
//! which the target can be observed and the position angles each science
//! instrument can reach on every day of the range.
//!
//! - [`track`]: daily time grid and target positions
//! - [`scanner`]: observing window search
//! - [`projector`]: per-day position angle envelopes per instrument
//! - [`banding`]: splitting ranges that wrap through 0 for plotting
//! - [`report`]: text tables
//! - [`plot`]: PA availability figures
//! - [`run`]: validated end-to-end pipeline

pub mod banding;
pub mod config;
pub mod error;
pub mod instrument;
pub mod plot;
pub mod projector;
pub mod report;
pub mod run;
pub mod scanner;
pub mod track;

pub use config::ObservatoryConfig;
pub use error::{Result, VisibilityError};
pub use instrument::Instrument;
pub use projector::{EnvelopeSeries, PaRange};
pub use run::{VisibilityReport, VisibilityRun};
pub use scanner::{Hemisphere, ScanOutcome, Window};
pub use track::{TargetKind, TargetTrack, TimeGrid};
