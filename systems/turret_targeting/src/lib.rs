#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic turret targets from world snapshots.

use island_survival_core::{
    BuildingId, BuildingView, EnemyId, EnemyView, SessionSnapshot, TurretTarget, WorldPoint,
};

/// Turret targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TurretTargeting {
    turret_workspace: Vec<TurretWorkspace>,
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TurretTargeting {
    /// Creates a new turret targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes turret targets for the provided world snapshot.
    ///
    /// Each turret selects the nearest enemy strictly closer than `range`;
    /// equidistant enemies resolve to the lowest identifier. The output buffer
    /// is cleared before populating it with the latest assignments.
    pub fn handle(
        &mut self,
        session: SessionSnapshot,
        buildings: &BuildingView,
        enemies: &EnemyView,
        range: f32,
        out: &mut Vec<TurretTarget>,
    ) {
        out.clear();

        if session.is_ended() {
            return;
        }

        self.prepare_turret_workspace(buildings);
        if self.turret_workspace.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);
        if self.enemy_workspace.is_empty() {
            return;
        }

        for turret in &self.turret_workspace {
            let mut best: Option<BestCandidate> = None;

            for candidate in &self.enemy_workspace {
                let distance = turret.position.distance(candidate.position);
                if distance >= range {
                    continue;
                }

                let current = BestCandidate {
                    distance,
                    enemy: candidate.id,
                    position: candidate.position,
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(best_candidate) = best {
                out.push(TurretTarget {
                    turret: turret.id,
                    enemy: best_candidate.enemy,
                    turret_position: turret.position,
                    enemy_position: best_candidate.position,
                });
            }
        }
    }

    fn prepare_turret_workspace(&mut self, buildings: &BuildingView) {
        self.turret_workspace.clear();
        self.turret_workspace
            .extend(buildings.turrets().map(|snapshot| TurretWorkspace {
                id: snapshot.id,
                position: snapshot.position,
            }));
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace
            .extend(enemies.iter().map(|snapshot| EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TurretWorkspace {
    id: BuildingId,
    position: WorldPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: WorldPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance: f32,
    enemy: EnemyId,
    position: WorldPoint,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance != other.distance {
            return self.distance < other.distance;
        }

        self.enemy < other.enemy
    }
}

#[cfg(test)]
mod tests {
    use super::{TurretTarget, TurretTargeting};
    use island_survival_core::{
        BuildingId, BuildingKind, BuildingSnapshot, BuildingView, EndReason, EnemyId,
        EnemySnapshot, EnemyView, Health, SessionSnapshot, WorldPoint,
    };
    use std::time::Duration;

    const RANGE: f32 = 8.0;

    fn running() -> SessionSnapshot {
        SessionSnapshot {
            time_remaining: Duration::from_secs(300),
            elapsed: Duration::ZERO,
            score: 0,
            ended: None,
        }
    }

    fn building(id: u32, kind: BuildingKind, x: f32, z: f32) -> BuildingSnapshot {
        BuildingSnapshot {
            id: BuildingId::new(id),
            kind,
            position: WorldPoint::new(x, z),
        }
    }

    fn enemy(id: u32, x: f32, z: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: WorldPoint::new(x, z),
            health: Health::new(100),
            speed: 1.2,
            target: WorldPoint::ORIGIN,
        }
    }

    #[test]
    fn targets_nearest_enemy_within_range() {
        let mut system = TurretTargeting::new();
        let buildings =
            BuildingView::from_snapshots(vec![building(1, BuildingKind::Turret, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(2, 5.0, 0.0), enemy(3, 0.0, 3.0)]);

        let mut out = Vec::new();
        system.handle(running(), &buildings, &enemies, RANGE, &mut out);

        assert_eq!(
            out,
            vec![TurretTarget {
                turret: BuildingId::new(1),
                enemy: EnemyId::new(3),
                turret_position: WorldPoint::ORIGIN,
                enemy_position: WorldPoint::new(0.0, 3.0),
            }]
        );
    }

    #[test]
    fn enemy_at_exact_range_is_ignored() {
        let mut system = TurretTargeting::new();
        let buildings =
            BuildingView::from_snapshots(vec![building(1, BuildingKind::Turret, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(2, 8.0, 0.0)]);

        let mut out = Vec::new();
        system.handle(running(), &buildings, &enemies, RANGE, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn smaller_enemy_id_is_preferred_when_distances_match() {
        let mut system = TurretTargeting::new();
        let buildings =
            BuildingView::from_snapshots(vec![building(1, BuildingKind::Turret, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(20, 4.0, 0.0), enemy(10, -4.0, 0.0)]);

        let mut out = Vec::new();
        system.handle(running(), &buildings, &enemies, RANGE, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(10));
    }

    #[test]
    fn walls_and_traps_never_target() {
        let mut system = TurretTargeting::new();
        let buildings = BuildingView::from_snapshots(vec![
            building(1, BuildingKind::Wall, 0.0, 0.0),
            building(2, BuildingKind::Trap, 1.0, 0.0),
        ]);
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 2.0, 0.0)]);

        let mut out = Vec::new();
        system.handle(running(), &buildings, &enemies, RANGE, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn ended_session_clears_output() {
        let mut system = TurretTargeting::new();
        let buildings =
            BuildingView::from_snapshots(vec![building(1, BuildingKind::Turret, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(1, 1.0, 1.0)]);
        let mut out = vec![TurretTarget {
            turret: BuildingId::new(99),
            enemy: EnemyId::new(99),
            turret_position: WorldPoint::ORIGIN,
            enemy_position: WorldPoint::ORIGIN,
        }];

        let session = SessionSnapshot {
            ended: Some(EndReason::Overrun),
            ..running()
        };
        system.handle(session, &buildings, &enemies, RANGE, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn each_turret_picks_independently() {
        let mut system = TurretTargeting::new();
        let buildings = BuildingView::from_snapshots(vec![
            building(1, BuildingKind::Turret, -10.0, 0.0),
            building(2, BuildingKind::Turret, 10.0, 0.0),
        ]);
        let enemies = EnemyView::from_snapshots(vec![enemy(1, -8.0, 0.0), enemy(2, 9.0, 0.0)]);

        let mut out = Vec::new();
        system.handle(running(), &buildings, &enemies, RANGE, &mut out);

        let pairs: Vec<_> = out.iter().map(|t| (t.turret.get(), t.enemy.get())).collect();
        assert_eq!(pairs, vec![(1, 1), (2, 2)]);
    }
}
