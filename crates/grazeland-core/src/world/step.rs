use super::World;
use crate::agent::{Grazer, Hunter};
use crate::world::metrics::FrameMetrics;
use rand::seq::SliceRandom;

impl World {
    /// One iteration of the update cycle, phases in fixed order.
    ///
    /// Every phase iterates a collection that is not resized until the phase
    /// finishes: deaths only flip `alive`, and the compaction (`retain`) plus
    /// any additions run as a single pass afterwards.
    pub fn tick(&mut self) {
        // Hunters first: shuffle away positional bias, move, age the
        // starvation counters, then compact the dead in one pass.
        self.pack.shuffle(&mut self.rng);
        for hunter in &mut self.pack {
            hunter.hunt(&mut self.rng);
            hunter.starve();
        }
        let starved = self.pack.iter().filter(|h| !h.alive).count();
        if starved > 0 {
            self.pack.retain(|h| h.alive);
            self.starved_last_frame += starved;
        }

        // Grazers: a caught grazer skips the rest of its turn; everyone else
        // moves, eats, shares, and possibly queues an offspring.
        self.herd.shuffle(&mut self.rng);
        let mut newborns = 0;
        for i in 0..self.herd.len() {
            if self.herd[i].escape_hunters(&mut self.pack) {
                self.caught_last_frame += 1;
                continue;
            }
            self.herd[i].step_move(&mut self.rng);
            self.herd[i].eat(&mut self.field);
            Grazer::share_with_neighbours(&mut self.herd, i, self.config.share_radius);
            if Grazer::mate(&mut self.herd, i, &mut self.rng) {
                newborns += 1;
            }
        }
        self.herd.retain(|g| g.alive);
        for _ in 0..newborns {
            let newborn = Grazer::spawn(&mut self.rng);
            self.herd.push(newborn);
        }
        self.births_last_frame += newborns;

        // Population control: stochastic hunter arrival, then a disease
        // outbreak if the herd has overgrown.
        if self.control.spawn_hunter(&mut self.rng) {
            let hunter = Hunter::spawn(&mut self.rng);
            self.pack.push(hunter);
            self.hunters_spawned_last_frame += 1;
        }
        let disease_deaths = self.control.disease_outbreak(&mut self.herd, &mut self.rng);
        if disease_deaths > 0 {
            self.herd.retain(|g| g.alive);
            self.disease_deaths_last_frame += disease_deaths;
        }
    }

    /// Run `iterations_per_frame` ticks and report what happened, the unit of
    /// work between two observations by the driving layer.
    pub fn frame(&mut self) -> FrameMetrics {
        self.births_last_frame = 0;
        self.caught_last_frame = 0;
        self.starved_last_frame = 0;
        self.disease_deaths_last_frame = 0;
        self.hunters_spawned_last_frame = 0;

        for _ in 0..self.config.iterations_per_frame {
            self.tick();
        }
        self.frame_index += 1;

        self.total_births += self.births_last_frame;
        self.total_caught += self.caught_last_frame;
        self.total_starved += self.starved_last_frame;
        self.total_disease_deaths += self.disease_deaths_last_frame;
        self.total_hunters_spawned += self.hunters_spawned_last_frame;

        self.collect_frame_metrics()
    }
}
