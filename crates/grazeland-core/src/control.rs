use crate::agent::Grazer;
use rand::Rng;

/// Herd size above which a disease outbreak is triggered.
pub const OUTBREAK_THRESHOLD: usize = 100;
/// Per-grazer death probability during an outbreak.
pub const OUTBREAK_DEATH_CHANCE: f64 = 0.8;
/// Per-iteration probability of a new hunter appearing.
pub const HUNTER_SPAWN_CHANCE: f64 = 0.01;

/// Stateless density-dependent feedback policies keeping the populations
/// from growing without bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct PopulationControl;

impl PopulationControl {
    /// If the live herd exceeds `OUTBREAK_THRESHOLD`, every live grazer
    /// independently dies with `OUTBREAK_DEATH_CHANCE`. Returns the number
    /// of grazers marked dead.
    pub fn disease_outbreak<R: Rng>(&self, herd: &mut [Grazer], rng: &mut R) -> usize {
        let live = herd.iter().filter(|g| g.alive).count();
        if live <= OUTBREAK_THRESHOLD {
            return 0;
        }
        let mut deaths = 0;
        for grazer in herd.iter_mut().filter(|g| g.alive) {
            if rng.random::<f64>() < OUTBREAK_DEATH_CHANCE {
                grazer.alive = false;
                deaths += 1;
            }
        }
        deaths
    }

    /// One Bernoulli draw; true means a new hunter joins the pack.
    pub fn spawn_hunter<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random::<f64>() < HUNTER_SPAWN_CHANCE
    }
}
