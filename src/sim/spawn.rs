//! Obstacle spawner with a seeded RNG

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GameState, ObstacleKind};

/// Places new obstacles; same seed, same sequence
#[derive(Debug, Clone)]
pub struct Spawner {
    pub seed: u64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Append one obstacle at a uniform column in [0, width - obstacle width]
    /// with a 50/50 kind. If obstacles are wider than the arena, x is 0.
    pub fn spawn(&mut self, state: &mut GameState) -> u32 {
        let x = self.rng.random::<f32>() * state.arena.max_obstacle_x();
        let kind = if self.rng.random_bool(0.5) {
            ObstacleKind::Hazard
        } else {
            ObstacleKind::Scoring
        };
        let id = state.push_obstacle(x, kind);
        log::debug!("Spawned {:?} obstacle {} at x={:.1}", kind, id, x);
        id
    }
}
