#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::{f32::consts::TAU, time::Duration};

use island_survival_core::{Command, Event, WorldPoint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    spawn_radius: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence, spawn circle and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, spawn_radius: f32, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            spawn_radius,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits spawn commands while the session runs.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    spawn_radius: f32,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            spawn_radius: config.spawn_radius,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events to emit spawn commands on the perimeter circle.
    ///
    /// Large time steps produce one spawn per elapsed interval.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::GameEnded { .. } | Event::SessionRestarted => {
                    self.accumulator = Duration::ZERO;
                    accumulated = Duration::ZERO;
                }
                _ => {}
            }
        }

        if self.spawn_interval.is_zero() || accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let spawn_attempts = self.resolve_spawn_attempts();

        for _ in 0..spawn_attempts {
            let position = self.next_position();
            out.push(Command::SpawnEnemy { position });
        }
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        if self.spawn_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.spawn_interval {
            self.accumulator -= self.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn next_position(&mut self) -> WorldPoint {
        let angle = self.rng.gen_range(0.0..TAU);
        WorldPoint::new(
            angle.cos() * self.spawn_radius,
            angle.sin() * self.spawn_radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_spawn_attempts_without_interval() {
        let mut spawning = Spawning::new(Config::new(Duration::ZERO, 22.0, 1));
        spawning.accumulator = Duration::from_secs(10);
        assert_eq!(spawning.resolve_spawn_attempts(), 0);
    }

    #[test]
    fn spawn_positions_lie_on_the_circle() {
        let mut spawning = Spawning::new(Config::new(Duration::from_secs(3), 22.0, 7));
        for _ in 0..32 {
            let position = spawning.next_position();
            assert!((position.distance_from_origin() - 22.0).abs() < 1e-3);
        }
    }
}
