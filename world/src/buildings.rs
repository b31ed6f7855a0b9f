//! Authoritative building state management utilities.

use std::{collections::BTreeMap, time::Duration};

use island_survival_core::{
    BuildingId, BuildingKind, BuildingSnapshot, TurretCooldownSnapshot, WorldPoint,
};

/// Snapshot of a building stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct BuildingState {
    /// Identifier allocated by the world for the building.
    pub(crate) id: BuildingId,
    /// Kind of building that was constructed.
    pub(crate) kind: BuildingKind,
    /// Ground position of the building.
    pub(crate) position: WorldPoint,
    /// Session time of the most recent shot, for turrets that fired.
    pub(crate) last_shot: Option<Duration>,
}

/// Registry that stores buildings and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct BuildingRegistry {
    entries: BTreeMap<BuildingId, BuildingState>,
    next_building_id: BuildingId,
}

impl BuildingRegistry {
    /// Creates an empty building registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_building_id: BuildingId::new(0),
        }
    }

    /// Stores a new building and returns the identifier assigned to it.
    pub(crate) fn insert(&mut self, kind: BuildingKind, position: WorldPoint) -> BuildingId {
        let id = self.next_building_id;
        self.next_building_id = BuildingId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            BuildingState {
                id,
                kind,
                position,
                last_shot: None,
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, id: BuildingId) -> Option<BuildingState> {
        self.entries.remove(&id)
    }

    pub(crate) fn get_mut(&mut self, id: BuildingId) -> Option<&mut BuildingState> {
        self.entries.get_mut(&id)
    }

    /// Finds the first building, in identifier order, closer than `radius` to `point`.
    pub(crate) fn first_within(&self, point: WorldPoint, radius: f32) -> Option<BuildingId> {
        self.entries
            .values()
            .find(|building| building.position.distance(point) < radius)
            .map(|building| building.id)
    }

    pub(crate) fn snapshots(&self) -> Vec<BuildingSnapshot> {
        self.entries
            .values()
            .map(|building| BuildingSnapshot {
                id: building.id,
                kind: building.kind,
                position: building.position,
            })
            .collect()
    }

    /// Reports the remaining cooldown of every turret at session time `now`.
    pub(crate) fn cooldowns(&self, now: Duration, cooldown: Duration) -> Vec<TurretCooldownSnapshot> {
        self.entries
            .values()
            .filter(|building| building.kind == BuildingKind::Turret)
            .map(|building| TurretCooldownSnapshot {
                turret: building.id,
                ready_in: remaining_cooldown(building.last_shot, now, cooldown),
            })
            .collect()
    }
}

/// Time left before a turret that last fired at `last_shot` may fire again.
pub(crate) fn remaining_cooldown(
    last_shot: Option<Duration>,
    now: Duration,
    cooldown: Duration,
) -> Duration {
    match last_shot {
        None => Duration::ZERO,
        Some(fired_at) => cooldown.saturating_sub(now.saturating_sub(fired_at)),
    }
}
