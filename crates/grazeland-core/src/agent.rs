use crate::field::{ResourceField, GRID_SIZE};
use rand::Rng;

/// Units a grazer bites off the field per eat call.
pub const BITE_SIZE: u32 = 10;
/// Store above this makes a grazer sick; it disgorges everything on the spot.
pub const OVEREAT_LIMIT: u32 = 100;
/// Euclidean radius within which a fertile female finds a mate.
pub const MATE_RADIUS: f64 = 5.0;
/// Half-width of the axis-aligned catch box around a grazer.
///
/// Deliberately a bounding box rather than a circular radius; the mate and
/// share checks are Euclidean, the escape check is not.
pub const CATCH_HALF_WIDTH: f64 = 2.5;
/// A grazer this heavy is too slow to escape a hunter.
pub const SLOW_STORE: u32 = 80;
/// Chance per iteration for an infertile female to regain fertility.
pub const FERTILITY_RECOVERY_CHANCE: f64 = 0.05;
/// Per-axis step length of a hunter's move.
pub const HUNTER_STEP: f64 = 2.5;
/// Moves without a catch before a hunter starves.
pub const STARVATION_LIMIT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

/// Prey agent grazing the resource field.
#[derive(Clone, Debug)]
pub struct Grazer {
    pub position: [f64; 2],
    pub store: u32,
    pub sex: Sex,
    pub fertile: bool,
    pub alive: bool,
}

/// Predator agent pursuing grazers.
#[derive(Clone, Debug)]
pub struct Hunter {
    pub position: [f64; 2],
    pub starving: u32,
    pub alive: bool,
}

fn random_cell_position<R: Rng>(rng: &mut R) -> [f64; 2] {
    [
        rng.random_range(0..GRID_SIZE) as f64,
        rng.random_range(0..GRID_SIZE) as f64,
    ]
}

/// One axis of a random-walk step: +step on a draw >= 0.5, -step otherwise.
fn random_step<R: Rng>(rng: &mut R, coord: f64, step: f64) -> f64 {
    let delta = if rng.random::<f64>() >= 0.5 { step } else { -step };
    (coord + delta).rem_euclid(GRID_SIZE as f64)
}

pub fn distance_between(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

impl Grazer {
    /// Fresh grazer on a random cell: empty store, 50/50 sex, fertile iff female.
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let position = random_cell_position(rng);
        let sex = if rng.random::<f64>() < 0.5 {
            Sex::Male
        } else {
            Sex::Female
        };
        Self {
            position,
            store: 0,
            sex,
            fertile: sex == Sex::Female,
            alive: true,
        }
    }

    /// Random walk of one unit per axis, axes drawn independently.
    pub fn step_move<R: Rng>(&mut self, rng: &mut R) {
        self.position[0] = random_step(rng, self.position[0], 1.0);
        self.position[1] = random_step(rng, self.position[1], 1.0);
    }

    /// Bite up to `BITE_SIZE` units off the current cell. Crossing
    /// `OVEREAT_LIMIT` makes the grazer sick: the whole store goes back
    /// into the cell and the store resets to zero.
    pub fn eat(&mut self, field: &mut ResourceField) {
        let [x, y] = self.position;
        self.store += field.consume(x, y, BITE_SIZE);
        if self.store > OVEREAT_LIMIT {
            field.deposit(x, y, self.store);
            self.store = 0;
        }
    }

    /// Average stores pairwise with every other live grazer within `radius`.
    ///
    /// Cumulative: each averaging uses the then-current stores, so the result
    /// depends on herd order. The distance is straight-line, no torus shortcut.
    pub fn share_with_neighbours(herd: &mut [Grazer], i: usize, radius: f64) {
        for j in 0..herd.len() {
            if j == i || !herd[j].alive {
                continue;
            }
            if distance_between(herd[i].position, herd[j].position) <= radius {
                let average = (herd[i].store + herd[j].store) / 2;
                herd[i].store = average;
                herd[j].store = average;
            }
        }
    }

    /// Test this grazer against every hunter's catch box. A grazer with an
    /// empty store is too weak to flee and one at `SLOW_STORE` or above too
    /// slow; either way the first such hunter makes the catch, has its
    /// starving counter reset, and the grazer dies on the spot.
    ///
    /// Returns true if the grazer was caught.
    pub fn escape_hunters(&mut self, pack: &mut [Hunter]) -> bool {
        for hunter in pack.iter_mut() {
            let dx = (self.position[0] - hunter.position[0]).abs();
            let dy = (self.position[1] - hunter.position[1]).abs();
            if dx <= CATCH_HALF_WIDTH && dy <= CATCH_HALF_WIDTH {
                if self.store == 0 || self.store >= SLOW_STORE {
                    self.alive = false;
                    hunter.starving = 0;
                    return true;
                }
            }
        }
        false
    }

    /// Mating check for the grazer at `i`. Only females participate.
    ///
    /// A fertile female takes the first live male within `MATE_RADIUS` in
    /// herd order (not the nearest), turning infertile in the exchange. An
    /// infertile female has a `FERTILITY_RECOVERY_CHANCE` draw to recover.
    ///
    /// Returns true if an offspring should be added this iteration.
    pub fn mate<R: Rng>(herd: &mut [Grazer], i: usize, rng: &mut R) -> bool {
        if herd[i].sex != Sex::Female {
            return false;
        }
        if herd[i].fertile {
            for j in 0..herd.len() {
                if j == i || !herd[j].alive || herd[j].sex != Sex::Male {
                    continue;
                }
                if distance_between(herd[i].position, herd[j].position) <= MATE_RADIUS {
                    herd[i].fertile = false;
                    return true;
                }
            }
            false
        } else {
            if rng.random::<f64>() < FERTILITY_RECOVERY_CHANCE {
                herd[i].fertile = true;
            }
            false
        }
    }
}

impl Hunter {
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        Self {
            position: random_cell_position(rng),
            starving: 0,
            alive: true,
        }
    }

    /// Random walk of `HUNTER_STEP` per axis. Every move raises starvation
    /// risk by one regardless of outcome; only a catch resets it.
    pub fn hunt<R: Rng>(&mut self, rng: &mut R) {
        self.position[0] = random_step(rng, self.position[0], HUNTER_STEP);
        self.position[1] = random_step(rng, self.position[1], HUNTER_STEP);
        self.starving += 1;
    }

    pub fn starve(&mut self) {
        if self.starving >= STARVATION_LIMIT {
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn grazer_at(x: f64, y: f64, store: u32) -> Grazer {
        Grazer {
            position: [x, y],
            store,
            sex: Sex::Female,
            fertile: true,
            alive: true,
        }
    }

    fn hunter_at(x: f64, y: f64) -> Hunter {
        Hunter {
            position: [x, y],
            starving: 50,
            alive: true,
        }
    }

    #[test]
    fn move_steps_one_unit_per_axis() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let mut grazer = grazer_at(50.0, 50.0, 0);
        grazer.step_move(&mut rng);
        assert_eq!((grazer.position[0] - 50.0).abs(), 1.0);
        assert_eq!((grazer.position[1] - 50.0).abs(), 1.0);
    }

    #[test]
    fn move_wraps_at_grid_edge() {
        let mut rng = ChaCha12Rng::seed_from_u64(0);
        for _ in 0..200 {
            let mut grazer = grazer_at(0.0, 99.0, 0);
            grazer.step_move(&mut rng);
            for coord in grazer.position {
                assert!((0.0..100.0).contains(&coord));
            }
        }
    }

    #[test]
    fn eat_takes_whatever_the_cell_holds() {
        let mut field = ResourceField::new(0);
        field.deposit(0.0, 0.0, 7);
        let mut grazer = grazer_at(0.0, 0.0, 0);
        grazer.eat(&mut field);
        assert_eq!(grazer.store, 7);
        assert_eq!(field.get(0.0, 0.0), 0);
    }

    #[test]
    fn eat_full_bite_from_a_rich_cell() {
        let mut field = ResourceField::new(50);
        let mut grazer = grazer_at(10.0, 10.0, 0);
        grazer.eat(&mut field);
        assert_eq!(grazer.store, 10);
        assert_eq!(field.get(10.0, 10.0), 40);
    }

    #[test]
    fn overeating_disgorges_the_whole_store() {
        let mut field = ResourceField::new(50);
        let mut grazer = grazer_at(20.0, 20.0, 95);
        grazer.eat(&mut field);
        assert_eq!(grazer.store, 0);
        // 50 - 10 bitten + 105 disgorged
        assert_eq!(field.get(20.0, 20.0), 145);
    }

    #[test]
    fn store_at_exactly_the_limit_is_kept() {
        let mut field = ResourceField::new(50);
        let mut grazer = grazer_at(20.0, 20.0, 90);
        grazer.eat(&mut field);
        assert_eq!(grazer.store, 100);
    }

    #[test]
    fn neighbours_average_their_stores() {
        let mut herd = vec![grazer_at(0.0, 0.0, 20), grazer_at(3.0, 4.0, 40)];
        Grazer::share_with_neighbours(&mut herd, 0, 20.0);
        assert_eq!(herd[0].store, 30);
        assert_eq!(herd[1].store, 30);
    }

    #[test]
    fn sharing_skips_dead_and_distant_grazers() {
        let mut herd = vec![
            grazer_at(0.0, 0.0, 20),
            grazer_at(90.0, 90.0, 40),
            grazer_at(1.0, 1.0, 60),
        ];
        herd[2].alive = false;
        Grazer::share_with_neighbours(&mut herd, 0, 20.0);
        assert_eq!(herd[0].store, 20);
        assert_eq!(herd[1].store, 40);
        assert_eq!(herd[2].store, 60);
    }

    #[test]
    fn weak_grazer_is_caught_and_resets_the_hunter() {
        let mut pack = vec![hunter_at(50.0, 50.0)];
        let mut grazer = grazer_at(51.0, 51.0, 0);
        assert!(grazer.escape_hunters(&mut pack));
        assert!(!grazer.alive);
        assert_eq!(pack[0].starving, 0);
    }

    #[test]
    fn heavy_grazer_is_caught() {
        let mut pack = vec![hunter_at(50.0, 50.0)];
        let mut grazer = grazer_at(52.0, 48.0, 80);
        assert!(grazer.escape_hunters(&mut pack));
        assert!(!grazer.alive);
    }

    #[test]
    fn fit_grazer_escapes() {
        let mut pack = vec![hunter_at(50.0, 50.0)];
        let mut grazer = grazer_at(51.0, 51.0, 40);
        assert!(!grazer.escape_hunters(&mut pack));
        assert!(grazer.alive);
        assert_eq!(pack[0].starving, 50);
    }

    #[test]
    fn catch_box_is_a_box_not_a_circle() {
        // (2.5, 2.5) away: Euclidean distance ~3.54 but inside the box.
        let mut pack = vec![hunter_at(50.0, 50.0)];
        let mut grazer = grazer_at(52.5, 52.5, 0);
        assert!(grazer.escape_hunters(&mut pack));

        // Just outside the box on one axis.
        let mut pack = vec![hunter_at(50.0, 50.0)];
        let mut grazer = grazer_at(52.6, 50.0, 0);
        assert!(!grazer.escape_hunters(&mut pack));
    }

    #[test]
    fn only_the_catching_hunter_is_reset() {
        let mut pack = vec![hunter_at(51.0, 51.0), hunter_at(49.0, 49.0)];
        let mut grazer = grazer_at(50.0, 50.0, 0);
        assert!(grazer.escape_hunters(&mut pack));
        assert_eq!(pack[0].starving, 0);
        assert_eq!(pack[1].starving, 50);
    }

    #[test]
    fn fertile_female_mates_with_a_male_in_range() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let mut herd = vec![grazer_at(0.0, 0.0, 0), grazer_at(3.0, 4.0, 0)];
        herd[1].sex = Sex::Male;
        herd[1].fertile = false;
        assert!(Grazer::mate(&mut herd, 0, &mut rng));
        assert!(!herd[0].fertile);
    }

    #[test]
    fn no_male_in_range_means_no_mating() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let mut herd = vec![grazer_at(0.0, 0.0, 0), grazer_at(30.0, 40.0, 0)];
        herd[1].sex = Sex::Male;
        assert!(!Grazer::mate(&mut herd, 0, &mut rng));
        assert!(herd[0].fertile);
    }

    #[test]
    fn males_never_signal_offspring() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let mut herd = vec![grazer_at(0.0, 0.0, 0), grazer_at(1.0, 0.0, 0)];
        herd[0].sex = Sex::Male;
        herd[0].fertile = false;
        assert!(!Grazer::mate(&mut herd, 0, &mut rng));
    }

    #[test]
    fn infertile_female_eventually_recovers() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let mut herd = vec![grazer_at(0.0, 0.0, 0)];
        herd[0].fertile = false;
        let mut recovered = false;
        // 5% per draw; 500 draws make a miss astronomically unlikely.
        for _ in 0..500 {
            Grazer::mate(&mut herd, 0, &mut rng);
            if herd[0].fertile {
                recovered = true;
                break;
            }
        }
        assert!(recovered);
    }

    #[test]
    fn hunt_increments_starving_by_one() {
        let mut rng = ChaCha12Rng::seed_from_u64(9);
        let mut hunter = hunter_at(50.0, 50.0);
        hunter.hunt(&mut rng);
        assert_eq!(hunter.starving, 51);
        assert_eq!((hunter.position[0] - 50.0).abs(), 2.5);
        assert_eq!((hunter.position[1] - 50.0).abs(), 2.5);
    }

    #[test]
    fn starvation_takes_effect_at_the_limit() {
        let mut hunter = hunter_at(0.0, 0.0);
        hunter.starving = 99;
        hunter.starve();
        assert!(hunter.alive);
        hunter.starving = 100;
        hunter.starve();
        assert!(!hunter.alive);
    }

    #[test]
    fn spawned_grazers_start_fresh() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        for _ in 0..50 {
            let grazer = Grazer::spawn(&mut rng);
            assert!(grazer.alive);
            assert_eq!(grazer.store, 0);
            assert_eq!(grazer.fertile, grazer.sex == Sex::Female);
            for coord in grazer.position {
                assert!((0.0..100.0).contains(&coord));
            }
        }
    }
}
