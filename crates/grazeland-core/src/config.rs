use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Simulation parameters. The driving layer validates user input before
/// constructing this; `validate` re-checks the same bounds so a `World`
/// can never be built on degenerate settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grazers in the herd at simulation start.
    pub initial_grazers: usize,
    /// Hunters in the pack at simulation start.
    pub initial_hunters: usize,
    /// Inner iterations applied per observed frame.
    pub iterations_per_frame: usize,
    /// Euclidean radius within which grazers share their stores.
    pub share_radius: f64,
    /// Frame count after which the simulation stops unconditionally.
    pub max_frames: usize,
    /// Seed for the single shared generator; equal seeds replay equal runs.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_grazers: 10,
            initial_hunters: 2,
            iterations_per_frame: 10,
            share_radius: 20.0,
            max_frames: 1000,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimConfigError {
    NoGrazers,
    NoHunters,
    NoIterations,
    NonPositiveShareRadius { actual: f64 },
    NoFrames,
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::NoGrazers => write!(f, "initial_grazers must be positive"),
            SimConfigError::NoHunters => write!(f, "initial_hunters must be positive"),
            SimConfigError::NoIterations => write!(f, "iterations_per_frame must be positive"),
            SimConfigError::NonPositiveShareRadius { actual } => {
                write!(f, "share_radius must be positive, got {actual}")
            }
            SimConfigError::NoFrames => write!(f, "max_frames must be positive"),
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.initial_grazers == 0 {
            return Err(SimConfigError::NoGrazers);
        }
        if self.initial_hunters == 0 {
            return Err(SimConfigError::NoHunters);
        }
        if self.iterations_per_frame == 0 {
            return Err(SimConfigError::NoIterations);
        }
        if !(self.share_radius > 0.0) {
            return Err(SimConfigError::NonPositiveShareRadius {
                actual: self.share_radius,
            });
        }
        if self.max_frames == 0 {
            return Err(SimConfigError::NoFrames);
        }
        Ok(())
    }
}
