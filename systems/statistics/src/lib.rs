#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic statistics system that tallies session activity from events.

use island_survival_core::{Event, SessionStats};

/// Pure statistics system that folds world events into session tallies.
#[derive(Debug, Default)]
pub struct Statistics {
    current: SessionStats,
    last_report: Option<SessionStats>,
}

impl Statistics {
    /// Creates a new statistics system with empty tallies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies for the session in progress.
    #[must_use]
    pub const fn current(&self) -> &SessionStats {
        &self.current
    }

    /// Returns the tallies published when the last session ended, if any.
    #[must_use]
    pub const fn last_report(&self) -> Option<&SessionStats> {
        self.last_report.as_ref()
    }

    /// Consumes world events, publishing a report once the session ends.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ResourceCollected { kind, amount, .. } => {
                    self.current.harvested.deposit(*kind, *amount);
                    self.current.nodes_collected += 1;
                }
                Event::BuildingPlaced { .. } => self.current.buildings_placed += 1,
                Event::BuildingDestroyed { .. } => self.current.buildings_lost += 1,
                Event::EnemySpawned { .. } => self.current.enemies_spawned += 1,
                Event::EnemyKilled { .. } => self.current.enemies_killed += 1,
                Event::ProjectileFired { .. } => self.current.projectiles_fired += 1,
                Event::EnemyDamaged { .. } => self.current.projectile_hits += 1,
                Event::GameEnded { .. } => self.last_report = Some(self.current),
                Event::SessionRestarted => self.current = SessionStats::default(),
                _ => {}
            }
        }
    }
}
