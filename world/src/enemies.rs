//! Live enemy roster.

use std::collections::BTreeMap;

use island_survival_core::{EnemyId, EnemySnapshot, Health, WorldPoint};

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) position: WorldPoint,
    pub(crate) health: Health,
    pub(crate) speed: f32,
    pub(crate) target: WorldPoint,
}

#[derive(Debug, Default)]
pub(crate) struct EnemyRoster {
    entries: BTreeMap<EnemyId, Enemy>,
    next_enemy_id: u32,
}

impl EnemyRoster {
    pub(crate) fn spawn(
        &mut self,
        position: WorldPoint,
        health: Health,
        speed: f32,
        target: WorldPoint,
    ) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        let _ = self.entries.insert(
            id,
            Enemy {
                id,
                position,
                health,
                speed,
                target,
            },
        );
        id
    }

    pub(crate) fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        self.entries.remove(&id)
    }

    /// First enemy, in identifier order, closer than `radius` to `point`.
    pub(crate) fn first_within(&self, point: WorldPoint, radius: f32) -> Option<EnemyId> {
        self.entries
            .values()
            .find(|enemy| enemy.position.distance(point) < radius)
            .map(|enemy| enemy.id)
    }

    pub(crate) fn snapshots(&self) -> Vec<EnemySnapshot> {
        self.entries
            .values()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                position: enemy.position,
                health: enemy.health,
                speed: enemy.speed,
                target: enemy.target,
            })
            .collect()
    }
}
