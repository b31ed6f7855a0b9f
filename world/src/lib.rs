#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Island Survival.

mod buildings;
mod clock;
mod enemies;
mod projectiles;
mod resources;
mod terrain;

use std::time::Duration;

use island_survival_core::{
    BuildingId, BuildingKind, Command, EndReason, EnemyId, Event, GameConfig, Health, Heading,
    Inventory, PlacementError, WorldPoint, WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use self::{
    buildings::{remaining_cooldown, BuildingRegistry},
    clock::SessionClock,
    enemies::EnemyRoster,
    projectiles::ProjectileSwarm,
    resources::ResourceField,
    terrain::Terrain,
};

#[derive(Clone, Copy, Debug)]
struct Player {
    position: WorldPoint,
    inventory: Inventory,
}

impl Player {
    const fn spawned(inventory: Inventory) -> Self {
        Self {
            position: WorldPoint::ORIGIN,
            inventory,
        }
    }
}

/// Represents the authoritative Island Survival world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    seed_source: ChaCha8Rng,
    session_seed: u64,
    terrain: Terrain,
    player: Player,
    resources: ResourceField,
    buildings: BuildingRegistry,
    enemies: EnemyRoster,
    projectiles: ProjectileSwarm,
    clock: SessionClock,
}

impl World {
    /// Creates a new world using the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Creates a new world ready for simulation using the provided tuning.
    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        let mut seed_source = ChaCha8Rng::seed_from_u64(config.seed);
        let session_seed = seed_source.gen();
        let terrain = Terrain::generate(config.island_radius, session_seed);
        let mut world = Self {
            banner: WELCOME_BANNER,
            seed_source,
            session_seed,
            terrain,
            player: Player::spawned(config.starting_inventory),
            resources: ResourceField::default(),
            buildings: BuildingRegistry::new(),
            enemies: EnemyRoster::default(),
            projectiles: ProjectileSwarm::default(),
            clock: SessionClock::new(config.session_length()),
            config,
        };
        world.populate_session();
        world
    }

    fn populate_session(&mut self) {
        self.terrain = Terrain::generate(self.config.island_radius, self.session_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(self.session_seed);
        self.resources = ResourceField::generate(&self.config, &self.terrain, &mut rng);
        self.player = Player::spawned(self.config.starting_inventory);
        self.buildings = BuildingRegistry::new();
        self.enemies = EnemyRoster::default();
        self.projectiles = ProjectileSwarm::default();
        self.clock = SessionClock::new(self.config.session_length());
        info!(
            seed = self.session_seed,
            resources = self.resources.snapshots().len(),
            "session started"
        );
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.session_seed = self.seed_source.gen();
        self.populate_session();
        out_events.push(Event::SessionRestarted);
    }

    fn end_session(&mut self, reason: EndReason, out_events: &mut Vec<Event>) {
        if self.clock.end(reason) {
            let score = self.clock.score();
            info!(?reason, score, "session ended");
            out_events.push(Event::GameEnded { reason, score });
        }
    }

    fn move_player(&mut self, heading: Heading, dt: Duration, out_events: &mut Vec<Event>) {
        let from = self.player.position;
        let distance = self.config.player_speed * dt.as_secs_f32();
        let to = from
            .advanced(heading, distance)
            .clamped_to_radius(self.config.player_boundary());
        if to == from {
            return;
        }
        self.player.position = to;
        out_events.push(Event::PlayerMoved { from, to });
    }

    fn collect_resource(&mut self, out_events: &mut Vec<Event>) {
        let Some(node) = self
            .resources
            .take_nearest(self.player.position, self.config.collection_range)
        else {
            return;
        };

        self.player.inventory.deposit(node.kind, node.amount);
        let score_awarded = node.amount.saturating_mul(node.kind.score_multiplier());
        self.clock.award(score_awarded);
        debug!(resource = node.id.get(), kind = ?node.kind, amount = node.amount, "resource collected");
        out_events.push(Event::ResourceCollected {
            resource: node.id,
            kind: node.kind,
            amount: node.amount,
            score_awarded,
        });
    }

    fn place_building(
        &mut self,
        kind: BuildingKind,
        position: WorldPoint,
        out_events: &mut Vec<Event>,
    ) {
        if let Err(reason) = self.player.inventory.try_spend(kind.cost()) {
            debug!(?kind, ?reason, "building placement rejected");
            out_events.push(Event::BuildingPlacementRejected {
                kind,
                position,
                reason,
            });
            return;
        }

        let building = self.buildings.insert(kind, position);
        self.clock.award(kind.placement_score());
        debug!(building = building.get(), ?kind, "building placed");
        out_events.push(Event::BuildingPlaced {
            building,
            kind,
            position,
        });
    }

    fn spawn_enemy(&mut self, position: WorldPoint, out_events: &mut Vec<Event>) {
        let enemy = self.enemies.spawn(
            position,
            Health::new(self.config.enemy_health),
            self.config.enemy_speed,
            self.player.position,
        );
        debug!(enemy = enemy.get(), x = position.x(), z = position.z(), "enemy spawned");
        out_events.push(Event::EnemySpawned { enemy, position });
    }

    fn step_enemy(
        &mut self,
        id: EnemyId,
        toward: WorldPoint,
        dt: Duration,
        out_events: &mut Vec<Event>,
    ) {
        let Some(enemy) = self.enemies.get_mut(id) else {
            return;
        };
        if let Some(heading) = Heading::between(enemy.position, toward) {
            enemy.position = enemy.position.advanced(heading, enemy.speed * dt.as_secs_f32());
        }
        let position = enemy.position;
        let contact = self.config.contact_radius;

        if position.distance(self.player.position) < contact {
            let _ = self.enemies.remove(id);
            out_events.push(Event::EnemyReachedPlayer { enemy: id });
            self.end_session(EndReason::Overrun, out_events);
            return;
        }

        if let Some(building) = self.buildings.first_within(position, contact) {
            let _ = self.enemies.remove(id);
            if let Some(state) = self.buildings.remove(building) {
                debug!(building = building.get(), enemy = id.get(), "building destroyed");
                out_events.push(Event::BuildingDestroyed {
                    building,
                    kind: state.kind,
                    enemy: id,
                });
            }
            return;
        }

        if position.distance_from_origin() > self.config.cull_radius() {
            let _ = self.enemies.remove(id);
            out_events.push(Event::EnemyCulled { enemy: id });
        }
    }

    fn fire_projectile(&mut self, turret: BuildingId, target: EnemyId, out_events: &mut Vec<Event>) {
        let now = self.clock.elapsed();
        let Some(building) = self.buildings.get_mut(turret) else {
            return;
        };
        if building.kind != BuildingKind::Turret {
            return;
        }
        if !remaining_cooldown(building.last_shot, now, self.config.turret_cooldown()).is_zero() {
            return;
        }
        let Some(enemy) = self.enemies.get(target) else {
            return;
        };
        if building.position.distance(enemy.position) >= self.config.turret_range {
            return;
        }
        let Some(direction) = Heading::between(building.position, enemy.position) else {
            return;
        };

        building.last_shot = Some(now);
        let projectile = self.projectiles.launch(
            building.position,
            direction,
            self.config.projectile_speed,
            self.config.projectile_lifetime(),
        );
        out_events.push(Event::ProjectileFired {
            projectile,
            turret,
            target,
        });
    }

    fn advance_projectiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let hit_radius = self.config.projectile_hit_radius;
        let damage = self.config.projectile_damage;
        let kill_bonus = self.config.kill_bonus;
        let mut spent = Vec::new();

        for projectile in self.projectiles.iter_mut() {
            projectile.position = projectile
                .position
                .advanced(projectile.direction, projectile.speed * dt.as_secs_f32());

            if let Some(enemy_id) = self.enemies.first_within(projectile.position, hit_radius) {
                spent.push(projectile.id);
                let Some(enemy) = self.enemies.get_mut(enemy_id) else {
                    continue;
                };
                enemy.health = enemy.health.damaged(damage);
                let remaining = enemy.health;
                out_events.push(Event::EnemyDamaged {
                    enemy: enemy_id,
                    projectile: projectile.id,
                    remaining,
                });

                if remaining.is_depleted() {
                    let _ = self.enemies.remove(enemy_id);
                    self.clock.award(kill_bonus);
                    debug!(enemy = enemy_id.get(), "enemy killed");
                    out_events.push(Event::EnemyKilled {
                        enemy: enemy_id,
                        score_awarded: kill_bonus,
                    });
                }
                continue;
            }

            projectile.age = projectile.age.saturating_add(dt);
            if projectile.expired() {
                spent.push(projectile.id);
                out_events.push(Event::ProjectileExpired {
                    projectile: projectile.id,
                });
            }
        }

        self.projectiles.compact(&spent);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session has ended only `Tick` (ambient time) and `Restart` have an
/// effect; placement requests are rejected with [`PlacementError::SessionEnded`]
/// and every other gameplay command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.clock.is_ended() {
        match command {
            Command::Tick { dt } => {
                let _ = world.clock.tick(dt);
            }
            Command::Restart => world.restart(out_events),
            Command::PlaceBuilding { kind, position } => {
                out_events.push(Event::BuildingPlacementRejected {
                    kind,
                    position,
                    reason: PlacementError::SessionEnded,
                });
            }
            _ => {}
        }
        return;
    }

    match command {
        Command::Tick { dt } => {
            let expired = world.clock.tick(dt);
            out_events.push(Event::TimeAdvanced { dt });
            if expired {
                world.end_session(EndReason::TimeExpired, out_events);
            }
        }
        Command::MovePlayer { heading, dt } => world.move_player(heading, dt, out_events),
        Command::CollectResource => world.collect_resource(out_events),
        Command::PlaceBuilding { kind, position } => {
            world.place_building(kind, position, out_events);
        }
        Command::SpawnEnemy { position } => world.spawn_enemy(position, out_events),
        Command::StepEnemy { enemy, toward, dt } => {
            world.step_enemy(enemy, toward, dt, out_events);
        }
        Command::FireProjectile { turret, target } => {
            world.fire_projectile(turret, target, out_events);
        }
        Command::AdvanceProjectiles { dt } => world.advance_projectiles(dt, out_events),
        Command::Restart => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use island_survival_core::{
        BuildingView, EnemyView, GameConfig, PlayerSnapshot, ProjectileView, ResourceView,
        SessionSnapshot, TurretCooldownView, WorldPoint,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the tuning the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Seed the current session's terrain and resources were generated from.
    #[must_use]
    pub fn session_seed(world: &World) -> u64 {
        world.session_seed
    }

    /// Height of the terrain at the provided ground position.
    #[must_use]
    pub fn height_at(world: &World, point: WorldPoint) -> f32 {
        world.terrain.height_at(point)
    }

    /// Captures the player's position and inventory.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            inventory: world.player.inventory,
        }
    }

    /// Captures the countdown, score and terminal state of the session.
    #[must_use]
    pub fn session(world: &World) -> SessionSnapshot {
        world.clock.snapshot()
    }

    /// Time that keeps flowing after the session ends, for ambient animation.
    #[must_use]
    pub fn ambient_time(world: &World) -> Duration {
        world.clock.ambient()
    }

    /// Captures a read-only view of the resource nodes left on the island.
    #[must_use]
    pub fn resource_view(world: &World) -> ResourceView {
        ResourceView::from_snapshots(world.resources.snapshots())
    }

    /// Captures a read-only view of the placed buildings.
    #[must_use]
    pub fn building_view(world: &World) -> BuildingView {
        BuildingView::from_snapshots(world.buildings.snapshots())
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.snapshots())
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(world.projectiles.snapshots())
    }

    /// Captures the remaining cooldown of every turret.
    #[must_use]
    pub fn turret_cooldown_view(world: &World) -> TurretCooldownView {
        TurretCooldownView::from_snapshots(
            world
                .buildings
                .cooldowns(world.clock.elapsed(), world.config.turret_cooldown()),
        )
    }
}
