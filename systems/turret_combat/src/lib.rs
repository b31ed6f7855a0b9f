#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns turret target assignments into firing commands.

use std::collections::BTreeSet;

use island_survival_core::{BuildingId, Command, TurretCooldownView, TurretTarget};

/// Fires every turret whose cooldown has elapsed at its assigned enemy.
#[derive(Debug, Default)]
pub struct TurretCombat {
    ready: BTreeSet<BuildingId>,
}

impl TurretCombat {
    /// Creates a combat system with an empty readiness set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::FireProjectile` per ready turret that holds a target.
    ///
    /// A turret listed twice in `turret_targets` fires only at its first
    /// entry. The world re-validates every cooldown before launching.
    pub fn handle(
        &mut self,
        turret_cooldowns: TurretCooldownView,
        turret_targets: &[TurretTarget],
        out: &mut Vec<Command>,
    ) {
        self.ready.clear();
        self.ready.extend(
            turret_cooldowns
                .iter()
                .filter(|snapshot| snapshot.ready_in.is_zero())
                .map(|snapshot| snapshot.turret),
        );

        for target in turret_targets {
            if self.ready.remove(&target.turret) {
                out.push(Command::FireProjectile {
                    turret: target.turret,
                    target: target.enemy,
                });
            }
        }
    }
}
