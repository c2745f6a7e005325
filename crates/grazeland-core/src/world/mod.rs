pub mod metrics;
mod step;

pub use metrics::*;

use crate::agent::{Grazer, Hunter};
use crate::config::{SimConfig, SimConfigError};
use crate::control::PopulationControl;
use crate::field::ResourceField;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};

/// The full simulation state: the herd, the pack, the field they share, and
/// the single generator behind every stochastic draw.
///
/// Agents never hold references to the shared collections; every behavior is
/// handed the collaborators it reads or mutates, so the only aliasing is the
/// explicit one inside a tick.
#[derive(Debug)]
pub struct World {
    pub(crate) herd: Vec<Grazer>,
    pub(crate) pack: Vec<Hunter>,
    pub(crate) field: ResourceField,
    pub(crate) config: SimConfig,
    pub(crate) control: PopulationControl,
    pub(crate) rng: ChaCha12Rng,
    pub(crate) frame_index: usize,
    pub(crate) births_last_frame: usize,
    pub(crate) caught_last_frame: usize,
    pub(crate) starved_last_frame: usize,
    pub(crate) disease_deaths_last_frame: usize,
    pub(crate) hunters_spawned_last_frame: usize,
    pub(crate) total_births: usize,
    pub(crate) total_caught: usize,
    pub(crate) total_starved: usize,
    pub(crate) total_disease_deaths: usize,
    pub(crate) total_hunters_spawned: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(SimConfigError),
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl From<SimConfigError> for WorldInitError {
    fn from(err: SimConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
        }
    }
}

impl World {
    pub fn new(field: ResourceField, config: SimConfig) -> Self {
        Self::try_new(field, config).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(field: ResourceField, config: SimConfig) -> Result<Self, WorldInitError> {
        config.validate()?;
        let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
        let herd = (0..config.initial_grazers)
            .map(|_| Grazer::spawn(&mut rng))
            .collect();
        let pack = (0..config.initial_hunters)
            .map(|_| Hunter::spawn(&mut rng))
            .collect();
        Ok(Self {
            herd,
            pack,
            field,
            config,
            control: PopulationControl,
            rng,
            frame_index: 0,
            births_last_frame: 0,
            caught_last_frame: 0,
            starved_last_frame: 0,
            disease_deaths_last_frame: 0,
            hunters_spawned_last_frame: 0,
            total_births: 0,
            total_caught: 0,
            total_starved: 0,
            total_disease_deaths: 0,
            total_hunters_spawned: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn field(&self) -> &ResourceField {
        &self.field
    }

    pub fn herd(&self) -> &[Grazer] {
        &self.herd
    }

    pub fn pack(&self) -> &[Hunter] {
        &self.pack
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Live grazer positions, for the external observation layer.
    pub fn grazer_positions(&self) -> Vec<[f64; 2]> {
        self.herd.iter().map(|g| g.position).collect()
    }

    /// Live hunter positions, for the external observation layer.
    pub fn hunter_positions(&self) -> Vec<[f64; 2]> {
        self.pack.iter().map(|h| h.position).collect()
    }

    /// Whether another frame should run. Checked once per frame: the herd
    /// still has members, the field still has resource, and the frame budget
    /// is not exhausted.
    pub fn carry_on(&self) -> bool {
        !self.herd.is_empty()
            && self.field.total() > 0
            && self.frame_index < self.config.max_frames
    }

    /// Run frames until `carry_on` turns false, collecting one metrics sample
    /// per frame.
    pub fn run(&mut self) -> RunSummary {
        let mut samples = Vec::new();
        while self.carry_on() {
            samples.push(self.frame());
        }
        RunSummary {
            schema_version: 1,
            frames_run: self.frame_index,
            final_grazer_count: self.herd.len(),
            final_hunter_count: self.pack.len(),
            final_resource_total: self.field.total(),
            samples,
        }
    }
}
