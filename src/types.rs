use std::fmt;

use serde::Serialize;

/// A single pitch measurement. Tagged so that silent frames and unparseable
/// source cells stay distinct from real frequencies instead of sharing a
/// stringly-typed column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchSample {
    /// Fundamental frequency in Hz. Always finite.
    Voiced(f64),
    /// Unvoiced frame, `NA` in the source column.
    Silence,
    /// Source cell that did not parse as a finite number.
    Malformed,
}

impl fmt::Display for PitchSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voiced(hz) => write!(f, "{hz:.2}"),
            Self::Silence => f.write_str("Silence"),
            Self::Malformed => f.write_str("Malformed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPoint {
    /// Seconds from utterance start. Always finite; renders rounded to
    /// 3 decimals.
    pub time_s: f64,
    pub pitch: PitchSample,
}

/// Pitch contour of one utterance, in source row order. Never reordered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitchContour {
    pub points: Vec<ContourPoint>,
}

/// Ground-truth utterance kind, derived from the input file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActualLabel {
    Interrogative,
    Declarative,
    Unknown,
}

impl ActualLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interrogative => "Interrogative",
            Self::Declarative => "Declarative",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ActualLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
