#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Island Survival adapters.

use anyhow::Result as AnyResult;
use glam::Vec3;
use island_survival_core::{
    BuildingId, BuildingKind, EndReason, EnemyId, Health, Inventory, ProjectileId, ResourceCost,
    ResourceId, ResourceKind, SessionStats,
};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
///
/// Axes are level-triggered in `-1.0..=1.0`; the boolean actions are
/// edge-triggered and count once per frame no matter how often they fired.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Walk forward (positive) or backward (negative) relative to the camera.
    pub forward: f32,
    /// Walk right (positive) or left (negative) relative to the camera.
    pub strafe: f32,
    /// Rotate the camera counter-clockwise (positive) or clockwise (negative).
    pub turn: f32,
    /// Whether the build menu key was pressed on this frame.
    pub toggle_build_menu: bool,
    /// Whether the collect key was pressed on this frame.
    pub collect: bool,
    /// Building type chosen from the menu on this frame.
    pub select_building: Option<BuildingKind>,
    /// Whether the adapter detected a placement confirmation on this frame.
    pub confirm_placement: bool,
    /// Whether the build menu was dismissed on this frame.
    pub close_menu: bool,
    /// Whether the player asked for a new session on this frame.
    pub restart: bool,
}

/// Static description of the island drawn beneath every entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IslandPresentation {
    /// Radius of the island measured from the origin.
    pub radius: f32,
    /// Color of the surrounding water.
    pub water_color: Color,
    /// Color of the island ground.
    pub ground_color: Color,
}

impl IslandPresentation {
    /// Creates a new island descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RenderingError::InvalidIslandRadius`] when `radius` is not a
    /// positive finite number.
    pub fn new(radius: f32, water_color: Color, ground_color: Color) -> Result<Self, RenderingError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RenderingError::InvalidIslandRadius { radius });
        }

        Ok(Self {
            radius,
            water_color,
            ground_color,
        })
    }
}

/// Player avatar and camera orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePlayer {
    /// Position of the player standing on the terrain.
    pub position: Vec3,
    /// Camera yaw in radians, measured from the positive x axis.
    pub yaw: f32,
}

/// Resource node drawn on the terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneResource {
    /// Identifier allocated to the node by the world.
    pub id: ResourceId,
    /// Material yielded by the node.
    pub kind: ResourceKind,
    /// Position of the node standing on the terrain.
    pub position: Vec3,
}

/// Building drawn on the terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBuilding {
    /// Identifier allocated to the building by the world.
    pub id: BuildingId,
    /// Kind of building placed.
    pub kind: BuildingKind,
    /// Position of the building standing on the terrain.
    pub position: Vec3,
}

/// Translucent preview of a building awaiting confirmation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostPresentation {
    /// Kind of building selected.
    pub kind: BuildingKind,
    /// Position the building would occupy.
    pub position: Vec3,
}

/// Enemy drawn on the terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Identifier allocated to the enemy by the world.
    pub id: EnemyId,
    /// Position of the enemy standing on the terrain.
    pub position: Vec3,
    /// Hit points left.
    pub health: Health,
}

/// Projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProjectile {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Position of the projectile above the terrain.
    pub position: Vec3,
}

/// Line segment describing an active turret targeting beam.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretTargetLine {
    /// Identifier of the turret emitting the beam.
    pub turret: BuildingId,
    /// Identifier of the enemy being tracked by the turret.
    pub enemy: EnemyId,
    /// Start of the beam.
    pub from: Vec3,
    /// End of the beam.
    pub to: Vec3,
}

/// Scene description combining the island and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Island drawn beneath every entity.
    pub island: IslandPresentation,
    /// Phase of the water animation in seconds; keeps advancing after game over.
    pub water_phase: f32,
    /// Player avatar and camera orientation.
    pub player: ScenePlayer,
    /// Resource nodes left on the island.
    pub resources: Vec<SceneResource>,
    /// Buildings placed on the island.
    pub buildings: Vec<SceneBuilding>,
    /// Building preview awaiting confirmation.
    pub ghost: Option<GhostPresentation>,
    /// Live enemies.
    pub enemies: Vec<SceneEnemy>,
    /// Projectiles in flight.
    pub projectiles: Vec<SceneProjectile>,
    /// Targeting beams emitted by turrets.
    pub turret_targets: Vec<TurretTargetLine>,
}

impl Scene {
    /// Creates an empty scene over the provided island.
    #[must_use]
    pub fn new(island: IslandPresentation) -> Self {
        Self {
            island,
            water_phase: 0.0,
            player: ScenePlayer {
                position: Vec3::ZERO,
                yaw: 0.0,
            },
            resources: Vec::new(),
            buildings: Vec::new(),
            ghost: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            turret_targets: Vec::new(),
        }
    }
}

/// Entry listed by the build menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildMenuEntry {
    /// Building offered by the entry.
    pub kind: BuildingKind,
    /// Materials consumed on placement.
    pub cost: ResourceCost,
    /// Whether the current inventory covers the cost.
    pub affordable: bool,
}

/// Summary shown once the session has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    /// Score reached by the finished session.
    pub final_score: u32,
    /// Best score on record after this session was considered.
    pub high_score: u32,
    /// Whether this session set the record.
    pub new_record: bool,
    /// Why the session ended.
    pub reason: EndReason,
    /// Tallies gathered during the session.
    pub stats: SessionStats,
}

impl GameOverSummary {
    /// Headline describing why the session ended.
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        match self.reason {
            EndReason::TimeExpired => "Time's up!",
            EndReason::Overrun => "Game Over! An enemy reached you.",
        }
    }
}

/// Heads-up display content derived from the simulation each frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    /// Materials currently carried.
    pub inventory: Inventory,
    /// Prompt for the nearby resource, if any.
    pub prompt: Option<String>,
    /// Countdown formatted as `mm:ss`.
    pub timer: String,
    /// Score accumulated so far.
    pub score: u32,
    /// Best score on record.
    pub high_score: u32,
    /// Entries of the build menu while it is open.
    pub build_menu: Option<Vec<BuildMenuEntry>>,
    /// Message about the most recent build interaction.
    pub feedback: Option<String>,
    /// Summary shown once the session has ended.
    pub game_over: Option<GameOverSummary>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
    /// Heads-up display drawn over the scene.
    pub hud: Hud,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene, hud: Hud) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
            hud,
        }
    }
}

/// Tells a backend whether to keep presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Present the next frame.
    Continue,
    /// Stop the backend after this frame.
    Exit,
}

/// Rendering backend capable of presenting Island Survival scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and mutates the scene and HUD
    /// before they are presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene, &mut Hud) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// The island must have a positive radius.
    #[error("island radius must be positive and finite (received {radius})")]
    InvalidIslandRadius {
        /// Provided radius that failed validation.
        radius: f32,
    },
}
