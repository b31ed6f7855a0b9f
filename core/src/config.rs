//! Tunable session parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Inventory;

/// Gameplay tunables shared by the world and the systems.
///
/// Every field is optional when deserialising; omitted values fall back to
/// the defaults below so partial configuration files stay valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for terrain, resource placement and enemy spawn angles.
    pub seed: u64,
    /// Radius of the playable island measured from the origin.
    pub island_radius: f32,
    /// Distance kept between the player and the island edge.
    pub shore_padding: f32,
    /// Player walking speed in world units per second.
    pub player_speed: f32,
    /// Camera rotation speed in radians per second.
    pub camera_turn_rate: f32,
    /// Distance between the player and a freshly selected building ghost.
    pub ghost_offset: f32,
    /// Radius within which the player can harvest a resource node.
    pub collection_range: f32,
    /// Materials the player carries when a session starts.
    pub starting_inventory: Inventory,
    /// Number of trees generated per session.
    pub wood_nodes: u32,
    /// Number of rocks generated per session.
    pub stone_nodes: u32,
    /// Number of ore veins generated per session.
    pub iron_nodes: u32,
    /// Length of a session in seconds.
    pub session_seconds: f32,
    /// Seconds between enemy spawns.
    pub spawn_interval_seconds: f32,
    /// Distance beyond the island radius at which enemies spawn.
    pub spawn_margin: f32,
    /// Distance beyond the island radius at which enemies are culled.
    pub cull_margin: f32,
    /// Enemy speed in world units per second.
    pub enemy_speed: f32,
    /// Hit points of a freshly spawned enemy.
    pub enemy_health: u32,
    /// Distance below which an enemy touches the player or a building.
    pub contact_radius: f32,
    /// Radius within which turrets acquire targets.
    pub turret_range: f32,
    /// Minimum seconds between two shots of the same turret.
    pub turret_cooldown_seconds: f32,
    /// Projectile speed in world units per second.
    pub projectile_speed: f32,
    /// Seconds a projectile stays in flight without a hit.
    pub projectile_lifetime_seconds: f32,
    /// Distance below which a projectile strikes an enemy.
    pub projectile_hit_radius: f32,
    /// Damage dealt by a single projectile.
    pub projectile_damage: u32,
    /// Score awarded for destroying an enemy.
    pub kill_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x51ee_d5ea_1a4d_0001,
            island_radius: 20.0,
            shore_padding: 1.0,
            player_speed: 6.0,
            camera_turn_rate: 1.2,
            ghost_offset: 2.0,
            collection_range: 1.5,
            starting_inventory: Inventory::default(),
            wood_nodes: 20,
            stone_nodes: 15,
            iron_nodes: 8,
            session_seconds: 300.0,
            spawn_interval_seconds: 3.0,
            spawn_margin: 2.0,
            cull_margin: 5.0,
            enemy_speed: 1.2,
            enemy_health: 100,
            contact_radius: 1.0,
            turret_range: 8.0,
            turret_cooldown_seconds: 1.0,
            projectile_speed: 18.0,
            projectile_lifetime_seconds: 3.0,
            projectile_hit_radius: 0.5,
            projectile_damage: 50,
            kill_bonus: 100,
        }
    }
}

impl GameConfig {
    /// Radius the player may roam within.
    #[must_use]
    pub fn player_boundary(&self) -> f32 {
        (self.island_radius - self.shore_padding).max(0.0)
    }

    /// Radius of the circle enemies spawn on.
    #[must_use]
    pub fn spawn_radius(&self) -> f32 {
        self.island_radius + self.spawn_margin
    }

    /// Distance from the origin beyond which enemies are removed.
    #[must_use]
    pub fn cull_radius(&self) -> f32 {
        self.island_radius + self.cull_margin
    }

    /// Countdown at the start of a session.
    #[must_use]
    pub fn session_length(&self) -> Duration {
        seconds(self.session_seconds)
    }

    /// Cadence of the enemy spawner.
    #[must_use]
    pub fn spawn_interval(&self) -> Duration {
        seconds(self.spawn_interval_seconds)
    }

    /// Minimum interval between two shots of one turret.
    #[must_use]
    pub fn turret_cooldown(&self) -> Duration {
        seconds(self.turret_cooldown_seconds)
    }

    /// Flight time after which an unspent projectile disappears.
    #[must_use]
    pub fn projectile_lifetime(&self) -> Duration {
        seconds(self.projectile_lifetime_seconds)
    }
}

fn seconds(value: f32) -> Duration {
    if value.is_nan() || value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(value).unwrap_or(Duration::MAX)
}
