//! Series data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single acquisition of a series.
///
/// `x` is the synthetic position of the sample in its source, not a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered, immutable sequence of samples.
///
/// Sample order is acquisition order; the x-coordinates are `0, 1, 2, ...`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from y-values, assigning x-coordinates in order.
    pub fn from_values<I: IntoIterator<Item = f64>>(vals: I) -> Self {
        let samples = vals
            .into_iter()
            .enumerate()
            .map(|(idx, y)| Sample::new(idx as f64, y))
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Instrument the series was recorded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Instrument {
    Cup,
    Faceplate,
}

impl Instrument {
    /// Token used for this instrument in file names.
    pub fn token(self) -> &'static str {
        match self {
            Instrument::Cup => "cup",
            Instrument::Faceplate => "faceplate",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "cup" => Some(Instrument::Cup),
            "faceplate" => Some(Instrument::Faceplate),
            _ => None,
        }
    }

    /// Name used in plot titles.
    pub fn title(self) -> &'static str {
        match self {
            Instrument::Cup => "Cup",
            Instrument::Faceplate => "Faceplate",
        }
    }
}

/// Physical configuration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Configuration {
    Deflected,
    Undeflected,
}

impl Configuration {
    pub const ALL: [Configuration; 2] = [Configuration::Deflected, Configuration::Undeflected];

    /// Token used for this configuration in file names.
    pub fn token(self) -> &'static str {
        match self {
            Configuration::Deflected => "deflected",
            Configuration::Undeflected => "undeflected",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "deflected" => Some(Configuration::Deflected),
            "undeflected" => Some(Configuration::Undeflected),
            _ => None,
        }
    }

    /// Name used in plot legends and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Configuration::Deflected => "Deflected",
            Configuration::Undeflected => "Undeflected",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Whether samples are plotted as read or decimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Raw,
    Decimated { window_size: usize },
}
