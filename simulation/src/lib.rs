#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver that owns the island world and runs every system in order.
//!
//! Each call to [`Simulation::step`] performs one tick: optional restart, the
//! session clock, player movement, collection, building, turret combat,
//! spawning, enemy pursuit, projectile flight and finally bookkeeping. The
//! resulting state is exposed to renderers through [`Simulation::populate_scene`]
//! and [`Simulation::populate_hud`].

mod high_score;

use std::time::Duration;

use glam::Vec3;
use island_survival_core::{
    format_countdown, BuildingKind, Command, EndReason, Event, GameConfig, SessionSnapshot,
    TurretTarget, WorldPoint,
};
use island_survival_rendering::{
    BuildMenuEntry, Color, FrameInput, GameOverSummary, GhostPresentation, Hud,
    IslandPresentation, Presentation, RenderingError, Scene, SceneBuilding, SceneEnemy,
    ScenePlayer, SceneProjectile, SceneResource, TurretTargetLine,
};
use island_survival_system_builder::{Builder, BuilderInput};
use island_survival_system_gathering::Gathering;
use island_survival_system_movement::{EnemyPursuit, LocomotionIntent, PlayerMovement};
use island_survival_system_spawning::{Config as SpawningConfig, Spawning};
use island_survival_system_statistics::Statistics;
use island_survival_system_turret_combat::TurretCombat;
use island_survival_system_turret_targeting::TurretTargeting;
use island_survival_world::{self as world, query, World};
use tracing::{debug, info, warn};

pub use high_score::{HighScoreError, HighScoreStore, InMemoryHighScoreStore};

const SKY_COLOR: Color = Color::from_rgb_u8(0x87, 0xce, 0xeb);
const WATER_COLOR: Color = Color::from_rgb_u8(0x1e, 0x90, 0xff);
const GROUND_COLOR: Color = Color::from_rgb_u8(0x55, 0x6b, 0x2f);
const PROJECTILE_LIFT: f32 = 0.5;
const TURRET_MUZZLE_LIFT: f32 = 1.0;

/// Island survival session driven one frame at a time.
#[derive(Debug)]
pub struct Simulation<S> {
    world: World,
    player_movement: PlayerMovement,
    gathering: Gathering,
    builder: Builder,
    turret_targeting: TurretTargeting,
    turret_combat: TurretCombat,
    spawning: Spawning,
    pursuit: EnemyPursuit,
    statistics: Statistics,
    store: S,
    high_score: u32,
    turret_targets: Vec<TurretTarget>,
    summary: Option<GameOverSummary>,
    builder_backlog: Vec<Event>,
    frame_events: Vec<Event>,
}

impl<S> Simulation<S>
where
    S: HighScoreStore,
{
    /// Creates a simulation for the provided configuration.
    ///
    /// A store that fails to load is treated as empty; the failure is logged.
    pub fn new(config: GameConfig, mut store: S) -> Self {
        let world = World::with_config(config);
        let high_score = match store.load() {
            Ok(score) => score,
            Err(error) => {
                warn!(%error, "could not load high score, starting from zero");
                0
            }
        };
        let config = query::config(&world);
        let spawning = Spawning::new(SpawningConfig::new(
            config.spawn_interval(),
            config.spawn_radius(),
            query::session_seed(&world),
        ));
        let builder = Builder::new(config.ghost_offset);

        Self {
            world,
            player_movement: PlayerMovement::new(),
            gathering: Gathering::new(),
            builder,
            turret_targeting: TurretTargeting::new(),
            turret_combat: TurretCombat::new(),
            spawning,
            pursuit: EnemyPursuit::new(),
            statistics: Statistics::new(),
            store,
            high_score,
            turret_targets: Vec::new(),
            summary: None,
            builder_backlog: Vec::new(),
            frame_events: Vec::new(),
        }
    }

    /// Advances the session by `dt` using the input captured for this frame.
    pub fn step(&mut self, dt: Duration, input: FrameInput) {
        let mut events = Vec::new();

        if input.restart {
            world::apply(&mut self.world, Command::Restart, &mut events);
        }
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        let turn_rate = query::config(&self.world).camera_turn_rate;
        let mut commands = Vec::new();
        self.player_movement.handle(
            &events,
            LocomotionIntent::new(input.forward, input.strafe, input.turn),
            turn_rate,
            &mut commands,
        );
        self.dispatch(&mut commands, &mut events);

        let player = query::player(&self.world);
        self.gathering.handle(
            query::session(&self.world),
            player.position,
            &query::resource_view(&self.world),
            query::config(&self.world).collection_range,
            input.collect,
            &mut commands,
        );
        self.dispatch(&mut commands, &mut events);

        let mut builder_events = std::mem::take(&mut self.builder_backlog);
        builder_events.extend_from_slice(&events);
        self.builder.handle(
            &builder_events,
            &query::player(&self.world),
            BuilderInput::new(
                input.toggle_build_menu,
                input.select_building,
                input.confirm_placement,
                input.close_menu,
            ),
            &mut commands,
        );
        let builder_seen = events.len();
        self.dispatch(&mut commands, &mut events);

        self.turret_targeting.handle(
            query::session(&self.world),
            &query::building_view(&self.world),
            &query::enemy_view(&self.world),
            query::config(&self.world).turret_range,
            &mut self.turret_targets,
        );
        self.turret_combat.handle(
            query::turret_cooldown_view(&self.world),
            &self.turret_targets,
            &mut commands,
        );
        self.dispatch(&mut commands, &mut events);

        self.spawning.handle(&events, &mut commands);
        self.dispatch(&mut commands, &mut events);

        self.pursuit.handle(
            &events,
            &query::enemy_view(&self.world),
            query::player(&self.world).position,
            &mut commands,
        );
        self.dispatch(&mut commands, &mut events);

        let advanced = advanced_time(&events);
        if !advanced.is_zero() {
            world::apply(
                &mut self.world,
                Command::AdvanceProjectiles { dt: advanced },
                &mut events,
            );
        }

        self.statistics.handle(&events);
        self.settle_session(&events);

        self.builder_backlog = events[builder_seen..].to_vec();
        self.frame_events = events;
    }

    fn dispatch(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }

    fn settle_session(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::SessionRestarted => {
                    self.summary = None;
                    self.turret_targets.clear();
                    info!(
                        seed = query::session_seed(&self.world),
                        "session restarted"
                    );
                }
                Event::GameEnded { reason, score } => self.record_game_over(*reason, *score),
                _ => {}
            }
        }
    }

    fn record_game_over(&mut self, reason: EndReason, score: u32) {
        // The store may have been raised by another session since `new`.
        let stored = match self.store.load() {
            Ok(stored) => Some(stored),
            Err(error) => {
                warn!(%error, "could not reload high score, keeping the cached value");
                None
            }
        };
        self.high_score = self.high_score.max(stored.unwrap_or_default());

        let new_record = score > self.high_score;
        if new_record {
            self.high_score = score;
            if stored.is_some() {
                match self.store.save(score) {
                    Ok(()) => info!(score, "new high score recorded"),
                    Err(error) => warn!(%error, score, "could not persist high score"),
                }
            }
        }

        let stats = self.statistics.last_report().copied().unwrap_or_default();
        debug!(?reason, score, ?stats, "session summary ready");
        self.summary = Some(GameOverSummary {
            final_score: score,
            high_score: self.high_score,
            new_record,
            reason,
            stats,
        });
    }

    /// World owned by the simulation.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Session clock and score.
    #[must_use]
    pub fn session(&self) -> SessionSnapshot {
        query::session(&self.world)
    }

    /// Best score known to the simulation, including the current session once ended.
    #[must_use]
    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Summary of the finished session, if it has ended.
    #[must_use]
    pub const fn summary(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    /// Events emitted by the world during the most recent frame.
    #[must_use]
    pub fn frame_events(&self) -> &[Event] {
        &self.frame_events
    }

    /// Targets acquired by turrets during the most recent frame.
    #[must_use]
    pub fn turret_targets(&self) -> &[TurretTarget] {
        &self.turret_targets
    }

    /// High-score store backing the simulation.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Builds the initial presentation handed to a rendering backend.
    ///
    /// # Errors
    ///
    /// Returns [`RenderingError`] when the configured island cannot be drawn.
    pub fn presentation<T>(&self, window_title: T) -> Result<Presentation, RenderingError>
    where
        T: Into<String>,
    {
        let island = IslandPresentation::new(
            query::config(&self.world).island_radius,
            WATER_COLOR,
            GROUND_COLOR,
        )?;
        let mut scene = Scene::new(island);
        let mut hud = Hud::default();
        self.populate_scene(&mut scene);
        self.populate_hud(&mut hud);
        Ok(Presentation::new(window_title, SKY_COLOR, scene, hud))
    }

    /// Rewrites the scene so it mirrors the world.
    pub fn populate_scene(&self, scene: &mut Scene) {
        let world = &self.world;
        scene.water_phase = query::ambient_time(world).as_secs_f32();
        scene.player = ScenePlayer {
            position: self.elevated(query::player(world).position, 0.0),
            yaw: self.player_movement.yaw(),
        };

        scene.resources.clear();
        scene
            .resources
            .extend(query::resource_view(world).iter().map(|node| SceneResource {
                id: node.id,
                kind: node.kind,
                position: self.elevated(node.position, 0.0),
            }));

        scene.buildings.clear();
        scene
            .buildings
            .extend(query::building_view(world).iter().map(|building| SceneBuilding {
                id: building.id,
                kind: building.kind,
                position: self.elevated(building.position, 0.0),
            }));

        scene.ghost = self.builder.preview().map(|preview| GhostPresentation {
            kind: preview.kind,
            position: self.elevated(preview.position, 0.0),
        });

        scene.enemies.clear();
        scene
            .enemies
            .extend(query::enemy_view(world).iter().map(|enemy| SceneEnemy {
                id: enemy.id,
                position: self.elevated(enemy.position, 0.0),
                health: enemy.health,
            }));

        scene.projectiles.clear();
        scene.projectiles.extend(
            query::projectile_view(world)
                .iter()
                .map(|projectile| SceneProjectile {
                    id: projectile.id,
                    position: self.elevated(projectile.position, PROJECTILE_LIFT),
                }),
        );

        scene.turret_targets.clear();
        scene
            .turret_targets
            .extend(self.turret_targets.iter().map(|target| TurretTargetLine {
                turret: target.turret,
                enemy: target.enemy,
                from: self.elevated(target.turret_position, TURRET_MUZZLE_LIFT),
                to: self.elevated(target.enemy_position, 0.0),
            }));
    }

    /// Rewrites the heads-up display so it mirrors the session.
    pub fn populate_hud(&self, hud: &mut Hud) {
        let session = query::session(&self.world);
        let inventory = query::player(&self.world).inventory;

        hud.inventory = inventory;
        hud.prompt = self.gathering.nearby().map(|nearby| nearby.prompt());
        hud.timer = format_countdown(session.time_remaining);
        hud.score = session.score;
        hud.high_score = self.high_score.max(session.score);
        hud.build_menu = self.builder.menu_open().then(|| {
            BuildingKind::ALL
                .iter()
                .map(|&kind| BuildMenuEntry {
                    kind,
                    cost: kind.cost(),
                    affordable: inventory.can_afford(kind.cost()),
                })
                .collect()
        });
        hud.feedback = self.builder.feedback().map(|feedback| feedback.message());
        hud.game_over = self.summary;
    }

    fn elevated(&self, point: WorldPoint, lift: f32) -> Vec3 {
        let height = query::height_at(&self.world, point);
        Vec3::new(point.x(), height + lift, point.z())
    }
}

fn advanced_time(events: &[Event]) -> Duration {
    events
        .iter()
        .filter_map(|event| match event {
            Event::TimeAdvanced { dt } => Some(*dt),
            _ => None,
        })
        .fold(Duration::ZERO, Duration::saturating_add)
}
