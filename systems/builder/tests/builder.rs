use island_survival_core::{
    BuildingKind, Command, EndReason, Event, GameConfig, Inventory, PlacementError,
    PlayerSnapshot, WorldPoint,
};
use island_survival_system_builder::{Builder, BuilderFeedback, BuilderInput, PlacementPreview};
use island_survival_world::{self as world, query, World};

fn player_at(x: f32, z: f32, inventory: Inventory) -> PlayerSnapshot {
    PlayerSnapshot {
        position: WorldPoint::new(x, z),
        inventory,
    }
}

fn toggle() -> BuilderInput {
    BuilderInput {
        toggle_menu: true,
        ..BuilderInput::default()
    }
}

fn select(kind: BuildingKind) -> BuilderInput {
    BuilderInput {
        select: Some(kind),
        ..BuilderInput::default()
    }
}

fn confirm() -> BuilderInput {
    BuilderInput {
        confirm: true,
        ..BuilderInput::default()
    }
}

#[test]
fn selecting_affordable_kind_closes_menu_and_shows_ghost() {
    let mut builder = Builder::new(2.0);
    let player = player_at(1.0, 3.0, Inventory::new(10, 0, 0));
    let mut commands = Vec::new();

    builder.handle(&[], &player, toggle(), &mut commands);
    assert!(builder.menu_open(), "B must open the menu");

    builder.handle(&[], &player, select(BuildingKind::Wall), &mut commands);

    assert!(!builder.menu_open(), "selection closes the menu");
    assert_eq!(
        builder.preview(),
        Some(PlacementPreview::new(
            BuildingKind::Wall,
            WorldPoint::new(3.0, 3.0)
        ))
    );
    assert!(commands.is_empty(), "selection alone never places");
}

#[test]
fn unaffordable_selection_leaves_state_unchanged() {
    let mut builder = Builder::new(2.0);
    let player = player_at(0.0, 0.0, Inventory::new(30, 30, 1));
    let mut commands = Vec::new();

    builder.handle(&[], &player, toggle(), &mut commands);
    builder.handle(&[], &player, select(BuildingKind::Trap), &mut commands);

    assert!(builder.menu_open(), "menu stays open after a refused selection");
    assert_eq!(builder.preview(), None);
    assert_eq!(
        builder.feedback(),
        Some(BuilderFeedback::Unaffordable(BuildingKind::Trap))
    );
}

#[test]
fn selection_requires_an_open_menu() {
    let mut builder = Builder::new(2.0);
    let player = player_at(0.0, 0.0, Inventory::new(10, 10, 10));
    let mut commands = Vec::new();

    builder.handle(&[], &player, select(BuildingKind::Turret), &mut commands);

    assert_eq!(builder.preview(), None);
}

#[test]
fn ghost_follows_player_and_confirm_places_at_last_position() {
    let mut builder = Builder::new(2.0);
    let inventory = Inventory::new(5, 5, 0);
    let mut commands = Vec::new();

    builder.handle(&[], &player_at(0.0, 0.0, inventory), toggle(), &mut commands);
    builder.handle(
        &[],
        &player_at(0.0, 0.0, inventory),
        select(BuildingKind::Turret),
        &mut commands,
    );
    builder.handle(
        &[],
        &player_at(4.0, -1.0, inventory),
        BuilderInput::default(),
        &mut commands,
    );
    assert_eq!(
        builder.preview().map(|preview| preview.position),
        Some(WorldPoint::new(6.0, -1.0))
    );

    builder.handle(&[], &player_at(4.0, -1.0, inventory), confirm(), &mut commands);

    assert_eq!(
        commands,
        vec![Command::PlaceBuilding {
            kind: BuildingKind::Turret,
            position: WorldPoint::new(6.0, -1.0),
        }],
        "confirmation must place at the ghost position",
    );
    assert_eq!(builder.preview(), None, "confirmation clears the selection");
}

#[test]
fn close_menu_discards_selection() {
    let mut builder = Builder::new(2.0);
    let player = player_at(0.0, 0.0, Inventory::new(10, 0, 0));
    let mut commands = Vec::new();

    builder.handle(&[], &player, toggle(), &mut commands);
    builder.handle(&[], &player, select(BuildingKind::Wall), &mut commands);
    builder.handle(
        &[],
        &player,
        BuilderInput {
            close_menu: true,
            confirm: true,
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert!(commands.is_empty(), "a discarded selection cannot be confirmed");
    assert_eq!(builder.preview(), None);
}

#[test]
fn game_over_freezes_the_builder_until_restart() {
    let mut builder = Builder::new(2.0);
    let player = player_at(0.0, 0.0, Inventory::new(10, 0, 0));
    let mut commands = Vec::new();
    builder.handle(&[], &player, toggle(), &mut commands);

    builder.handle(
        &[Event::GameEnded {
            reason: EndReason::Overrun,
            score: 10,
        }],
        &player,
        toggle(),
        &mut commands,
    );
    assert!(!builder.menu_open());

    builder.handle(&[], &player, toggle(), &mut commands);
    assert!(!builder.menu_open(), "input is ignored after the end");

    builder.handle(&[Event::SessionRestarted], &player, toggle(), &mut commands);
    assert!(builder.menu_open());
}

#[test]
fn world_rejection_surfaces_as_feedback() {
    let mut builder = Builder::new(2.0);
    let player = player_at(0.0, 0.0, Inventory::default());
    let mut commands = Vec::new();

    builder.handle(
        &[Event::BuildingPlacementRejected {
            kind: BuildingKind::Wall,
            position: WorldPoint::ORIGIN,
            reason: PlacementError::InsufficientResources,
        }],
        &player,
        BuilderInput::default(),
        &mut commands,
    );

    assert_eq!(
        builder.feedback(),
        Some(BuilderFeedback::Rejected(
            PlacementError::InsufficientResources
        ))
    );
}

#[test]
fn wall_flow_spends_exact_cost_in_the_world() {
    let mut world = World::with_config(GameConfig {
        starting_inventory: Inventory::new(10, 0, 0),
        wood_nodes: 0,
        stone_nodes: 0,
        iron_nodes: 0,
        ..GameConfig::default()
    });
    let mut builder = Builder::new(query::config(&world).ghost_offset);
    let mut events = Vec::new();

    for input in [toggle(), select(BuildingKind::Wall), confirm()] {
        let mut commands = Vec::new();
        builder.handle(&events, &query::player(&world), input, &mut commands);
        events.clear();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }

    assert!(matches!(
        events.as_slice(),
        [Event::BuildingPlaced {
            kind: BuildingKind::Wall,
            ..
        }]
    ));
    let buildings = query::building_view(&world).into_vec();
    assert_eq!(buildings.len(), 1);
    assert_eq!(buildings[0].position, WorldPoint::new(2.0, 0.0));
    assert_eq!(query::player(&world).inventory, Inventory::default());
}
