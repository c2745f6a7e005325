use super::World;
use serde::{Deserialize, Serialize};

/// Per-frame observables, one sample per rendered frame.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrameMetrics {
    pub frame: usize,
    pub grazer_count: usize,
    pub hunter_count: usize,
    pub resource_total: u64,
    pub births: usize,
    pub grazers_caught: usize,
    pub hunters_starved: usize,
    pub disease_deaths: usize,
    pub hunters_spawned: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PopulationStats {
    pub grazer_count: usize,
    pub hunter_count: usize,
    pub total_births: usize,
    pub total_caught: usize,
    pub total_starved: usize,
    pub total_disease_deaths: usize,
    pub total_hunters_spawned: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub frames_run: usize,
    pub final_grazer_count: usize,
    pub final_hunter_count: usize,
    pub final_resource_total: u64,
    pub samples: Vec<FrameMetrics>,
}

impl World {
    pub(crate) fn collect_frame_metrics(&self) -> FrameMetrics {
        FrameMetrics {
            frame: self.frame_index,
            grazer_count: self.herd.len(),
            hunter_count: self.pack.len(),
            resource_total: self.field.total(),
            births: self.births_last_frame,
            grazers_caught: self.caught_last_frame,
            hunters_starved: self.starved_last_frame,
            disease_deaths: self.disease_deaths_last_frame,
            hunters_spawned: self.hunters_spawned_last_frame,
        }
    }

    pub fn population_stats(&self) -> PopulationStats {
        PopulationStats {
            grazer_count: self.herd.len(),
            hunter_count: self.pack.len(),
            total_births: self.total_births,
            total_caught: self.total_caught,
            total_starved: self.total_starved,
            total_disease_deaths: self.total_disease_deaths,
            total_hunters_spawned: self.total_hunters_spawned,
        }
    }
}
