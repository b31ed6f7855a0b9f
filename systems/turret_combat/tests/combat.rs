use std::time::Duration;

use island_survival_core::{
    BuildingId, BuildingKind, Command, Event, GameConfig, Inventory, WorldPoint,
};
use island_survival_system_turret_combat::TurretCombat;
use island_survival_system_turret_targeting::TurretTargeting;
use island_survival_world::{self as world, query, World};

fn barren_world() -> World {
    World::with_config(GameConfig {
        starting_inventory: Inventory::new(10, 10, 0),
        wood_nodes: 0,
        stone_nodes: 0,
        iron_nodes: 0,
        enemy_health: 10_000,
        ..GameConfig::default()
    })
}

fn place_turret(world: &mut World, position: WorldPoint) -> BuildingId {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceBuilding {
            kind: BuildingKind::Turret,
            position,
        },
        &mut events,
    );
    match events.as_slice() {
        [Event::BuildingPlaced { building, .. }] => *building,
        other => panic!("turret placement failed: {other:?}"),
    }
}

struct Battery {
    targeting: TurretTargeting,
    combat: TurretCombat,
}

impl Battery {
    fn new() -> Self {
        Self {
            targeting: TurretTargeting::new(),
            combat: TurretCombat::new(),
        }
    }

    /// Runs targeting and combat once, applies the commands and returns the
    /// turrets that actually launched a projectile.
    fn volley(&mut self, world: &mut World) -> Vec<BuildingId> {
        let mut targets = Vec::new();
        self.targeting.handle(
            query::session(world),
            &query::building_view(world),
            &query::enemy_view(world),
            query::config(world).turret_range,
            &mut targets,
        );
        let mut commands = Vec::new();
        self.combat
            .handle(query::turret_cooldown_view(world), &targets, &mut commands);

        let mut events = Vec::new();
        for command in commands {
            world::apply(world, command, &mut events);
        }
        events
            .into_iter()
            .filter_map(|event| match event {
                Event::ProjectileFired { turret, .. } => Some(turret),
                _ => None,
            })
            .collect()
    }
}

fn tick(world: &mut World, millis: u64) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
        &mut events,
    );
}

#[test]
fn turret_waits_out_its_cooldown_between_shots() {
    let mut world = barren_world();
    let turret = place_turret(&mut world, WorldPoint::new(10.0, 0.0));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            position: WorldPoint::new(10.0, 4.0),
        },
        &mut events,
    );
    let mut battery = Battery::new();

    assert_eq!(battery.volley(&mut world), vec![turret]);

    tick(&mut world, 500);
    assert!(battery.volley(&mut world).is_empty(), "half a cooldown in");

    tick(&mut world, 500);
    assert_eq!(battery.volley(&mut world), vec![turret]);
    assert_eq!(query::projectile_view(&world).iter().count(), 2);
}

#[test]
fn only_the_rested_turret_fires() {
    let mut world = barren_world();
    let veteran = place_turret(&mut world, WorldPoint::new(10.0, 0.0));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            position: WorldPoint::new(12.0, 3.0),
        },
        &mut events,
    );
    let mut battery = Battery::new();
    assert_eq!(battery.volley(&mut world), vec![veteran]);

    tick(&mut world, 200);
    let recruit = place_turret(&mut world, WorldPoint::new(14.0, 0.0));

    assert_eq!(battery.volley(&mut world), vec![recruit]);
}

#[test]
fn turrets_hold_fire_without_enemies_in_range() {
    let mut world = barren_world();
    let _ = place_turret(&mut world, WorldPoint::new(-10.0, 0.0));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            position: WorldPoint::new(10.0, 0.0),
        },
        &mut events,
    );
    let mut battery = Battery::new();

    assert!(battery.volley(&mut world).is_empty());
    assert_eq!(query::projectile_view(&world).iter().count(), 0);
}
