//! Science instruments and their V3 position angle offsets

use std::fmt;
use std::str::FromStr;

use crate::error::VisibilityError;

/// Observatory V3 axis or one of the science instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    V3,
    NirCam,
    NirSpec,
    Niriss,
    Miri,
    Fgs,
}

impl Instrument {
    /// Per-day table column order
    pub const ALL: [Instrument; 6] = [
        Instrument::V3,
        Instrument::NirCam,
        Instrument::NirSpec,
        Instrument::Niriss,
        Instrument::Miri,
        Instrument::Fgs,
    ];

    /// Offset between the instrument aperture's ideal-frame Y axis and V3, degrees
    pub fn offset_deg(&self) -> f64 {
        match self {
            Instrument::V3 => 0.0,
            Instrument::NirCam => -0.0265,
            Instrument::NirSpec => 137.4874,
            Instrument::Niriss => -0.57,
            Instrument::Miri => 5.0152,
            Instrument::Fgs => -1.2508,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::V3 => "V3",
            Instrument::NirCam => "NIRCam",
            Instrument::NirSpec => "NIRSpec",
            Instrument::Niriss => "NIRISS",
            Instrument::Miri => "MIRI",
            Instrument::Fgs => "FGS",
        }
    }

    /// Panel title when plotted on its own
    pub fn panel_title(&self) -> &'static str {
        match self {
            Instrument::V3 => "Observatory V3",
            other => other.name(),
        }
    }

    /// Position of this instrument's series in [`Instrument::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Instrument::V3 => 0,
            Instrument::NirCam => 1,
            Instrument::NirSpec => 2,
            Instrument::Niriss => 3,
            Instrument::Miri => 4,
            Instrument::Fgs => 5,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = VisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v3" => Ok(Instrument::V3),
            "nircam" => Ok(Instrument::NirCam),
            "nirspec" => Ok(Instrument::NirSpec),
            "niriss" => Ok(Instrument::Niriss),
            "miri" => Ok(Instrument::Miri),
            "fgs" => Ok(Instrument::Fgs),
            _ => Err(VisibilityError::UnknownInstrument(s.to_string())),
        }
    }
}
