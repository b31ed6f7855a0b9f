#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Island Survival engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod config;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use config::GameConfig;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Island Survival. Five minutes. Build, gather, hold on.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player walk along a heading for the given duration.
    MovePlayer {
        /// Direction of travel on the ground plane.
        heading: Heading,
        /// Duration the player walks at the configured speed.
        dt: Duration,
    },
    /// Requests collection of the nearest resource within reach of the player.
    CollectResource,
    /// Requests placement of a building at the provided position.
    PlaceBuilding {
        /// Type of building to construct.
        kind: BuildingKind,
        /// Ground position at which the building is committed.
        position: WorldPoint,
    },
    /// Requests that a new enemy appear at the provided position.
    SpawnEnemy {
        /// Ground position on the spawn perimeter.
        position: WorldPoint,
    },
    /// Requests that an enemy move toward a ground point for the given duration.
    StepEnemy {
        /// Identifier of the enemy attempting to move.
        enemy: EnemyId,
        /// Ground position the enemy steers toward.
        toward: WorldPoint,
        /// Duration the enemy moves at its own speed.
        dt: Duration,
    },
    /// Requests that a turret fire a projectile at an enemy.
    FireProjectile {
        /// Turret responsible for the shot.
        turret: BuildingId,
        /// Enemy the turret aims at.
        target: EnemyId,
    },
    /// Advances every live projectile and resolves hits.
    AdvanceProjectiles {
        /// Duration of flight to integrate.
        dt: Duration,
    },
    /// Discards the current session and re-enters the initial state.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved between two positions.
    PlayerMoved {
        /// Position occupied before the move.
        from: WorldPoint,
        /// Position occupied after the move, clamped to the island.
        to: WorldPoint,
    },
    /// Confirms that a resource node was harvested.
    ResourceCollected {
        /// Identifier of the node that was removed.
        resource: ResourceId,
        /// Kind of material added to the inventory.
        kind: ResourceKind,
        /// Amount added to the inventory.
        amount: u32,
        /// Score awarded for the collection.
        score_awarded: u32,
    },
    /// Confirms that a building was placed into the world.
    BuildingPlaced {
        /// Identifier assigned to the building by the world.
        building: BuildingId,
        /// Type of building that was placed.
        kind: BuildingKind,
        /// Ground position of the building.
        position: WorldPoint,
    },
    /// Reports that a building placement request was rejected.
    BuildingPlacementRejected {
        /// Type of building requested for placement.
        kind: BuildingKind,
        /// Position provided in the placement request.
        position: WorldPoint,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that an enemy crashed into a building, destroying both.
    BuildingDestroyed {
        /// Identifier of the destroyed building.
        building: BuildingId,
        /// Type of the destroyed building.
        kind: BuildingKind,
        /// Enemy that was consumed by the collision.
        enemy: EnemyId,
    },
    /// Confirms that an enemy entered the world.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Spawn position on the perimeter.
        position: WorldPoint,
    },
    /// Reports that an enemy strayed beyond the play radius and was removed.
    EnemyCulled {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Reports that an enemy reached the player.
    EnemyReachedPlayer {
        /// Identifier of the enemy that made contact.
        enemy: EnemyId,
    },
    /// Confirms that a turret fired.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Turret that fired the projectile.
        turret: BuildingId,
        /// Enemy the shot was aimed at.
        target: EnemyId,
    },
    /// Reports that a projectile struck an enemy.
    EnemyDamaged {
        /// Identifier of the struck enemy.
        enemy: EnemyId,
        /// Projectile consumed by the hit.
        projectile: ProjectileId,
        /// Health left after the hit.
        remaining: Health,
    },
    /// Reports that an enemy's health was depleted.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Score awarded for the kill.
        score_awarded: u32,
    },
    /// Reports that a projectile outlived its lifetime without a hit.
    ProjectileExpired {
        /// Identifier of the expired projectile.
        projectile: ProjectileId,
    },
    /// Announces that the session reached its terminal state.
    GameEnded {
        /// Cause of the session end.
        reason: EndReason,
        /// Score accumulated during the session.
        score: u32,
    },
    /// Announces that all session state was discarded and regenerated.
    SessionRestarted,
}

/// Cause of a session reaching its terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The countdown reached zero.
    TimeExpired,
    /// An enemy made contact with the player.
    Overrun,
}

/// Reasons a building placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The inventory does not cover the building's cost.
    InsufficientResources,
    /// The session already ended, so gameplay commands are frozen.
    SessionEnded,
}

/// Position on the island's ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    z: f32,
}

impl WorldPoint {
    /// Island center.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a new ground position.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Offset along the x axis.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Offset along the z axis.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Distance from the island center.
    #[must_use]
    pub fn distance_from_origin(self) -> f32 {
        self.x.hypot(self.z)
    }

    /// Returns the point reached by travelling `distance` along `heading`.
    #[must_use]
    pub fn advanced(self, heading: Heading, distance: f32) -> Self {
        Self::new(
            self.x + heading.x() * distance,
            self.z + heading.z() * distance,
        )
    }

    /// Pulls the point back toward the origin so it lies within `radius`.
    #[must_use]
    pub fn clamped_to_radius(self, radius: f32) -> Self {
        let distance = self.distance_from_origin();
        if distance <= radius || distance <= f32::EPSILON {
            return self;
        }
        let scale = radius.max(0.0) / distance;
        Self::new(self.x * scale, self.z * scale)
    }
}

/// Unit-length direction on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    x: f32,
    z: f32,
}

impl Heading {
    /// Normalises the provided components, returning `None` for a zero vector.
    #[must_use]
    pub fn from_components(x: f32, z: f32) -> Option<Self> {
        let length = x.hypot(z);
        if !length.is_finite() || length <= f32::EPSILON {
            return None;
        }
        Some(Self {
            x: x / length,
            z: z / length,
        })
    }

    /// Direction pointing from `from` toward `to`, if the points differ.
    #[must_use]
    pub fn between(from: WorldPoint, to: WorldPoint) -> Option<Self> {
        Self::from_components(to.x() - from.x(), to.z() - from.z())
    }

    /// Direction at the provided angle measured from the positive x axis.
    #[must_use]
    pub fn from_angle(radians: f32) -> Self {
        Self {
            x: radians.cos(),
            z: radians.sin(),
        }
    }

    /// X component of the unit vector.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Z component of the unit vector.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }
}

/// Unique identifier assigned to a resource node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Creates a new resource identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(u32);

impl BuildingId {
    /// Creates a new building identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Remaining hit points of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the health left after absorbing `damage`, floored at zero.
    #[must_use]
    pub const fn damaged(self, damage: u32) -> Self {
        Self(self.0.saturating_sub(damage))
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Materials that can be harvested on the island.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Harvested from trees.
    Wood,
    /// Harvested from rocks.
    Stone,
    /// Harvested from ore veins on high ground.
    Iron,
}

impl ResourceKind {
    /// Every resource kind in inventory display order.
    pub const ALL: [ResourceKind; 3] = [Self::Wood, Self::Stone, Self::Iron];

    /// Score awarded per harvested unit of this kind.
    #[must_use]
    pub const fn score_multiplier(self) -> u32 {
        match self {
            Self::Wood => 2,
            Self::Stone => 3,
            Self::Iron => 5,
        }
    }

    /// Inclusive range of yields rolled for freshly generated nodes.
    #[must_use]
    pub const fn yield_range(self) -> (u32, u32) {
        match self {
            Self::Wood => (3, 5),
            Self::Stone => (2, 4),
            Self::Iron => (1, 2),
        }
    }

    /// Human-readable name of the material.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Stone => "Stone",
            Self::Iron => "Iron",
        }
    }
}

/// Types of structures the player can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Cheap barrier that absorbs a single enemy.
    Wall,
    /// Automated defence that shoots nearby enemies.
    Turret,
    /// Ground snare that absorbs a single enemy.
    Trap,
}

impl BuildingKind {
    /// Every building kind in build menu order.
    pub const ALL: [BuildingKind; 3] = [Self::Wall, Self::Turret, Self::Trap];

    /// Materials consumed when the building is placed.
    #[must_use]
    pub const fn cost(self) -> ResourceCost {
        match self {
            Self::Wall => ResourceCost::new(10, 0, 0),
            Self::Turret => ResourceCost::new(5, 5, 0),
            Self::Trap => ResourceCost::new(3, 0, 2),
        }
    }

    /// Score awarded when the building is placed.
    #[must_use]
    pub const fn placement_score(self) -> u32 {
        match self {
            Self::Wall => 50,
            Self::Turret => 100,
            Self::Trap => 75,
        }
    }

    /// Human-readable name of the building.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wall => "Wall",
            Self::Turret => "Turret",
            Self::Trap => "Trap",
        }
    }
}

/// Amount of each material required by a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourceCost {
    wood: u32,
    stone: u32,
    iron: u32,
}

impl ResourceCost {
    /// Creates a cost from explicit material amounts.
    #[must_use]
    pub const fn new(wood: u32, stone: u32, iron: u32) -> Self {
        Self { wood, stone, iron }
    }

    /// Amount of the provided material required.
    #[must_use]
    pub const fn amount(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Iron => self.iron,
        }
    }
}

/// Materials carried by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Inventory {
    wood: u32,
    stone: u32,
    iron: u32,
}

impl Inventory {
    /// Creates an inventory holding the provided amounts.
    #[must_use]
    pub const fn new(wood: u32, stone: u32, iron: u32) -> Self {
        Self { wood, stone, iron }
    }

    /// Amount of the provided material currently held.
    #[must_use]
    pub const fn amount(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Iron => self.iron,
        }
    }

    /// Reports whether every material in `cost` is covered.
    #[must_use]
    pub fn can_afford(&self, cost: ResourceCost) -> bool {
        ResourceKind::ALL
            .iter()
            .all(|kind| self.amount(*kind) >= cost.amount(*kind))
    }

    /// Adds harvested material to the inventory.
    pub fn deposit(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Deducts `cost` in full, or leaves the inventory untouched when it is not affordable.
    pub fn try_spend(&mut self, cost: ResourceCost) -> Result<(), PlacementError> {
        if !self.can_afford(cost) {
            return Err(PlacementError::InsufficientResources);
        }

        for kind in ResourceKind::ALL {
            let slot = self.slot_mut(kind);
            *slot -= cost.amount(kind);
        }
        Ok(())
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Iron => &mut self.iron,
        }
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Ground position of the player.
    pub position: WorldPoint,
    /// Materials currently carried.
    pub inventory: Inventory,
}

/// Immutable representation of a single resource node used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourceSnapshot {
    /// Identifier allocated to the node by the world.
    pub id: ResourceId,
    /// Material yielded by the node.
    pub kind: ResourceKind,
    /// Ground position of the node.
    pub position: WorldPoint,
    /// Amount added to the inventory on collection.
    pub amount: u32,
}

/// Read-only snapshot describing every resource node left on the island.
#[derive(Clone, Debug, Default)]
pub struct ResourceView {
    snapshots: Vec<ResourceSnapshot>,
}

impl ResourceView {
    /// Creates a new resource view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ResourceSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured resource snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceSnapshot> {
        self.snapshots.iter()
    }

    /// Finds the nearest node strictly within `range` of `position`.
    ///
    /// Equidistant nodes resolve to the lowest identifier.
    #[must_use]
    pub fn nearest_within(&self, position: WorldPoint, range: f32) -> Option<&ResourceSnapshot> {
        let mut best: Option<(&ResourceSnapshot, f32)> = None;
        for snapshot in &self.snapshots {
            let distance = snapshot.position.distance(position);
            if distance >= range {
                continue;
            }
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((snapshot, distance)),
            }
        }
        best.map(|(snapshot, _)| snapshot)
    }

    /// Number of nodes captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single building used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingSnapshot {
    /// Identifier allocated to the building by the world.
    pub id: BuildingId,
    /// Kind of building that was constructed.
    pub kind: BuildingKind,
    /// Ground position of the building.
    pub position: WorldPoint,
}

/// Read-only snapshot describing all buildings placed on the island.
#[derive(Clone, Debug, Default)]
pub struct BuildingView {
    snapshots: Vec<BuildingSnapshot>,
}

impl BuildingView {
    /// Creates a new building view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BuildingSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured building snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the turrets captured by the view.
    pub fn turrets(&self) -> impl Iterator<Item = &BuildingSnapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.kind == BuildingKind::Turret)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BuildingSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Ground position of the enemy.
    pub position: WorldPoint,
    /// Hit points left.
    pub health: Health,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Player position recorded when the enemy spawned.
    pub target: WorldPoint,
}

/// Read-only snapshot describing all enemies on the island.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Current ground position of the projectile.
    pub position: WorldPoint,
    /// Direction of flight.
    pub direction: Heading,
    /// Time spent in flight.
    pub age: Duration,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }
}

/// Reports how long a turret must wait before it may fire again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurretCooldownSnapshot {
    /// Turret described by the snapshot.
    pub turret: BuildingId,
    /// Time left until the turret is ready. Zero means ready.
    pub ready_in: Duration,
}

/// Read-only view of turret cooldowns sorted by turret identifier.
#[derive(Clone, Debug, Default)]
pub struct TurretCooldownView {
    snapshots: Vec<TurretCooldownSnapshot>,
}

impl TurretCooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TurretCooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.turret);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TurretCooldownSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TurretCooldownSnapshot> {
        self.snapshots
    }
}

/// Target assignment computed for a turret.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretTarget {
    /// Turret that acquired the target.
    pub turret: BuildingId,
    /// Enemy selected as the target.
    pub enemy: EnemyId,
    /// Ground position of the turret.
    pub turret_position: WorldPoint,
    /// Ground position of the enemy when targeted.
    pub enemy_position: WorldPoint,
}

/// Snapshot of the session clock and score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Countdown left before the session ends.
    pub time_remaining: Duration,
    /// Gameplay time elapsed since the session started.
    pub elapsed: Duration,
    /// Score accumulated so far.
    pub score: u32,
    /// Cause of the session end, once ended.
    pub ended: Option<EndReason>,
}

impl SessionSnapshot {
    /// Reports whether the session reached its terminal state.
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        self.ended.is_some()
    }
}

/// Tallies gathered over one session for the game-over summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Materials harvested during the session.
    pub harvested: Inventory,
    /// Resource nodes collected.
    pub nodes_collected: u32,
    /// Buildings successfully placed.
    pub buildings_placed: u32,
    /// Buildings consumed by enemy contact.
    pub buildings_lost: u32,
    /// Enemies that entered the island.
    pub enemies_spawned: u32,
    /// Enemies destroyed by turret fire.
    pub enemies_killed: u32,
    /// Projectiles launched by turrets.
    pub projectiles_fired: u32,
    /// Projectiles that struck an enemy.
    pub projectile_hits: u32,
}

/// Formats a countdown as `mm:ss`, flooring partial seconds.
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    let seconds = remaining.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_spend_is_all_or_nothing() {
        let mut inventory = Inventory::new(4, 10, 0);

        let result = inventory.try_spend(BuildingKind::Wall.cost());

        assert_eq!(result, Err(PlacementError::InsufficientResources));
        assert_eq!(inventory, Inventory::new(4, 10, 0));
    }

    #[test]
    fn inventory_spend_deducts_exact_cost() {
        let mut inventory = Inventory::new(8, 6, 1);

        inventory
            .try_spend(BuildingKind::Turret.cost())
            .expect("turret is affordable");

        assert_eq!(inventory, Inventory::new(3, 1, 1));
    }

    #[test]
    fn trap_requires_iron() {
        let inventory = Inventory::new(30, 30, 1);
        assert!(!inventory.can_afford(BuildingKind::Trap.cost()));
        assert!(Inventory::new(3, 0, 2).can_afford(BuildingKind::Trap.cost()));
    }

    #[test]
    fn score_multipliers_increase_with_rarity() {
        assert!(ResourceKind::Wood.score_multiplier() < ResourceKind::Stone.score_multiplier());
        assert!(ResourceKind::Stone.score_multiplier() < ResourceKind::Iron.score_multiplier());
    }

    #[test]
    fn health_floors_at_zero() {
        let health = Health::new(100).damaged(50);
        assert_eq!(health, Health::new(50));
        assert!(!health.is_depleted());
        assert!(health.damaged(80).is_depleted());
    }

    #[test]
    fn heading_between_identical_points_is_none() {
        let point = WorldPoint::new(3.0, -2.0);
        assert!(Heading::between(point, point).is_none());
    }

    #[test]
    fn heading_between_is_unit_length() {
        let heading = Heading::between(WorldPoint::ORIGIN, WorldPoint::new(3.0, 4.0))
            .expect("distinct points");
        assert!((heading.x() - 0.6).abs() < 1e-6);
        assert!((heading.z() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn clamped_to_radius_preserves_direction() {
        let clamped = WorldPoint::new(30.0, 40.0).clamped_to_radius(19.0);
        assert!((clamped.distance_from_origin() - 19.0).abs() < 1e-4);
        assert!((clamped.x() / clamped.z() - 0.75).abs() < 1e-4);

        let inside = WorldPoint::new(1.0, 1.0);
        assert_eq!(inside.clamped_to_radius(19.0), inside);
    }

    #[test]
    fn nearest_within_prefers_lowest_id_on_ties() {
        let view = ResourceView::from_snapshots(vec![
            resource(7, WorldPoint::new(1.0, 0.0)),
            resource(3, WorldPoint::new(-1.0, 0.0)),
            resource(1, WorldPoint::new(0.0, 5.0)),
        ]);

        let nearest = view
            .nearest_within(WorldPoint::ORIGIN, 1.5)
            .expect("two nodes in range");
        assert_eq!(nearest.id, ResourceId::new(3));
        assert!(view.nearest_within(WorldPoint::new(10.0, 10.0), 1.5).is_none());
    }

    #[test]
    fn countdown_formats_minutes_and_seconds() {
        assert_eq!(format_countdown(Duration::from_secs(300)), "05:00");
        assert_eq!(format_countdown(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_countdown(Duration::ZERO), "00:00");
    }

    fn resource(id: u32, position: WorldPoint) -> ResourceSnapshot {
        ResourceSnapshot {
            id: ResourceId::new(id),
            kind: ResourceKind::Wood,
            position,
            amount: 3,
        }
    }
}
