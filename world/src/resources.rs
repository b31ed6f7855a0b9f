//! Collectible resource nodes scattered across the island.

use std::{collections::BTreeMap, f32::consts::TAU};

use island_survival_core::{GameConfig, ResourceId, ResourceKind, ResourceSnapshot, WorldPoint};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::terrain::Terrain;

/// Nodes are kept this far from the shore so they stay reachable.
const SHORE_CLEARANCE: f32 = 2.0;
/// Spots rolled per ore vein before it is dropped.
const ORE_ATTEMPTS: u32 = 64;

/// Single collectible node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ResourceNode {
    pub(crate) id: ResourceId,
    pub(crate) kind: ResourceKind,
    pub(crate) position: WorldPoint,
    pub(crate) amount: u32,
}

/// Registry of the nodes left on the island.
#[derive(Debug, Default)]
pub(crate) struct ResourceField {
    entries: BTreeMap<ResourceId, ResourceNode>,
    next_resource_id: u32,
}

impl ResourceField {
    /// Scatters the configured number of nodes of each kind over the island.
    pub(crate) fn generate(config: &GameConfig, terrain: &Terrain, rng: &mut ChaCha8Rng) -> Self {
        let mut field = Self::default();
        let spread = (config.island_radius - SHORE_CLEARANCE).max(0.0);

        for kind in ResourceKind::ALL {
            let count = match kind {
                ResourceKind::Wood => config.wood_nodes,
                ResourceKind::Stone => config.stone_nodes,
                ResourceKind::Iron => config.iron_nodes,
            };

            for _ in 0..count {
                let position = match kind {
                    ResourceKind::Iron => match high_ground(terrain, rng, spread) {
                        Some(position) => position,
                        None => {
                            debug!("no high ground found for an ore vein");
                            continue;
                        }
                    },
                    ResourceKind::Wood | ResourceKind::Stone => scatter(rng, spread),
                };
                let (low, high) = kind.yield_range();
                let amount = rng.gen_range(low..=high);
                let _ = field.insert(kind, position, amount);
            }
        }

        field
    }

    /// Adds a node to the field, allocating its identifier.
    pub(crate) fn insert(
        &mut self,
        kind: ResourceKind,
        position: WorldPoint,
        amount: u32,
    ) -> ResourceId {
        let id = ResourceId::new(self.next_resource_id);
        self.next_resource_id = self.next_resource_id.saturating_add(1);
        let _ = self.entries.insert(
            id,
            ResourceNode {
                id,
                kind,
                position,
                amount,
            },
        );
        id
    }

    /// Removes and returns the nearest node strictly within `range` of `position`.
    ///
    /// Equidistant nodes resolve to the lowest identifier.
    pub(crate) fn take_nearest(&mut self, position: WorldPoint, range: f32) -> Option<ResourceNode> {
        let mut best: Option<(ResourceId, f32)> = None;
        for node in self.entries.values() {
            let distance = node.position.distance(position);
            if distance >= range {
                continue;
            }
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((node.id, distance)),
            }
        }

        let (id, _) = best?;
        self.entries.remove(&id)
    }

    pub(crate) fn snapshots(&self) -> Vec<ResourceSnapshot> {
        self.entries
            .values()
            .map(|node| ResourceSnapshot {
                id: node.id,
                kind: node.kind,
                position: node.position,
                amount: node.amount,
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

fn scatter(rng: &mut ChaCha8Rng, spread: f32) -> WorldPoint {
    let angle = rng.gen_range(0.0..TAU);
    let distance = if spread > 0.0 {
        rng.gen_range(0.0..spread)
    } else {
        0.0
    };
    WorldPoint::new(angle.cos() * distance, angle.sin() * distance)
}

/// Rolls spots above the terrain's mid height, narrowing toward the centre
/// after every miss.
fn high_ground(terrain: &Terrain, rng: &mut ChaCha8Rng, spread: f32) -> Option<WorldPoint> {
    let line = terrain.mid_height();
    (0..ORE_ATTEMPTS).find_map(|attempt| {
        let narrowed = spread * (ORE_ATTEMPTS - attempt) as f32 / ORE_ATTEMPTS as f32;
        let candidate = scatter(rng, narrowed);
        (terrain.height_at(candidate) > line).then_some(candidate)
    })
}
