//! Turret projectiles in flight.

use std::{collections::BTreeMap, time::Duration};

use island_survival_core::{Heading, ProjectileId, ProjectileSnapshot, WorldPoint};

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: WorldPoint,
    pub(crate) direction: Heading,
    pub(crate) speed: f32,
    pub(crate) age: Duration,
    pub(crate) lifetime: Duration,
}

impl Projectile {
    pub(crate) fn expired(&self) -> bool {
        self.age > self.lifetime
    }
}

#[derive(Debug, Default)]
pub(crate) struct ProjectileSwarm {
    entries: BTreeMap<ProjectileId, Projectile>,
    next_projectile_id: u32,
}

impl ProjectileSwarm {
    pub(crate) fn launch(
        &mut self,
        position: WorldPoint,
        direction: Heading,
        speed: f32,
        lifetime: Duration,
    ) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.saturating_add(1);
        let _ = self.entries.insert(
            id,
            Projectile {
                id,
                position,
                direction,
                speed,
                age: Duration::ZERO,
                lifetime,
            },
        );
        id
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.entries.values_mut()
    }

    /// Drops every projectile named in `spent`.
    pub(crate) fn compact(&mut self, spent: &[ProjectileId]) {
        if spent.is_empty() {
            return;
        }
        self.entries.retain(|id, _| !spent.contains(id));
    }

    pub(crate) fn snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.entries
            .values()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                position: projectile.position,
                direction: projectile.direction,
                age: projectile.age,
            })
            .collect()
    }
}
