use std::{
    f32::consts::{PI, TAU},
    time::Duration,
};

use anyhow::Result as AnyResult;
use glam::{Vec2, Vec3};
use island_survival_core::BuildingKind;
use island_survival_rendering::{
    FrameControl, FrameInput, Hud, Presentation, RenderingBackend, Scene, SceneResource,
};
use tracing::{debug, info};

const ALIGNED_WITHIN: f32 = 0.3;
const TURN_GAIN: f32 = 3.0;
const CREEP_SPEED: f32 = 0.25;

/// Source of per-frame input for the headless backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pilot {
    /// Gathers resources and builds turrets on its own.
    Autopilot,
    /// Stands still and waits for the session to end.
    Idle,
}

/// Backend that advances frames at a fixed rate without opening a window.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HeadlessBackend {
    tick: Duration,
    tick_hz: u32,
    max_ticks: u64,
    pilot: Pilot,
}

impl HeadlessBackend {
    /// Creates a backend that presents `tick_hz` frames per simulated second.
    pub(crate) fn new(tick_hz: u32, max_ticks: u64, pilot: Pilot) -> Self {
        let tick_hz = tick_hz.max(1);
        Self {
            tick: Duration::from_nanos(1_000_000_000 / u64::from(tick_hz)),
            tick_hz,
            max_ticks,
            pilot,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene, &mut Hud) -> FrameControl + 'static,
    {
        let Presentation {
            window_title,
            clear_color: _,
            mut scene,
            mut hud,
        } = presentation;

        info!(
            title = %window_title,
            tick_hz = self.tick_hz,
            max_ticks = self.max_ticks,
            pilot = ?self.pilot,
            "headless session running"
        );

        let mut autopilot = Autopilot::default();
        let mut presented = 0_u64;
        while presented < self.max_ticks {
            let input = match self.pilot {
                Pilot::Autopilot => autopilot.next_input(&scene, &hud),
                Pilot::Idle => FrameInput::default(),
            };
            let control = update_scene(self.tick, input, &mut scene, &mut hud);
            presented += 1;

            if presented % u64::from(self.tick_hz) == 0 {
                debug!(timer = %hud.timer, score = hud.score, enemies = scene.enemies.len(), "frame");
            }
            if control == FrameControl::Exit {
                break;
            }
        }

        info!(
            frames = presented,
            score = hud.score,
            timer = %hud.timer,
            "headless session stopped"
        );
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum BuildStep {
    #[default]
    Roaming,
    MenuOpened,
    Selected,
}

/// Scripted player that reacts to the last presented frame.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Autopilot {
    step: BuildStep,
}

impl Autopilot {
    /// Chooses the input for the next frame.
    pub(crate) fn next_input(&mut self, scene: &Scene, hud: &Hud) -> FrameInput {
        if hud.game_over.is_some() {
            self.step = BuildStep::Roaming;
            return FrameInput::default();
        }

        match self.step {
            BuildStep::MenuOpened => {
                self.step = BuildStep::Selected;
                return FrameInput {
                    select_building: Some(BuildingKind::Turret),
                    ..FrameInput::default()
                };
            }
            BuildStep::Selected => {
                self.step = BuildStep::Roaming;
                return if scene.ghost.is_some() {
                    FrameInput {
                        confirm_placement: true,
                        ..FrameInput::default()
                    }
                } else {
                    FrameInput {
                        close_menu: true,
                        ..FrameInput::default()
                    }
                };
            }
            BuildStep::Roaming => {}
        }

        if hud.inventory.can_afford(BuildingKind::Turret.cost()) {
            self.step = BuildStep::MenuOpened;
            return FrameInput {
                toggle_build_menu: hud.build_menu.is_none(),
                ..FrameInput::default()
            };
        }

        if hud.prompt.is_some() {
            return FrameInput {
                collect: true,
                ..FrameInput::default()
            };
        }

        steer_toward_resources(scene)
    }
}

fn steer_toward_resources(scene: &Scene) -> FrameInput {
    let player = scene.player.position;
    let Some(target) = nearest_resource(player, &scene.resources) else {
        return FrameInput::default();
    };

    let offset = ground(target) - ground(player);
    let error = wrap_angle(offset.y.atan2(offset.x) - scene.player.yaw);
    FrameInput {
        forward: if error.abs() < ALIGNED_WITHIN {
            1.0
        } else {
            CREEP_SPEED
        },
        turn: (error * TURN_GAIN).clamp(-1.0, 1.0),
        ..FrameInput::default()
    }
}

fn nearest_resource(player: Vec3, resources: &[SceneResource]) -> Option<Vec3> {
    let origin = ground(player);
    resources
        .iter()
        .map(|resource| resource.position)
        .min_by(|a, b| {
            ground(*a)
                .distance_squared(origin)
                .total_cmp(&ground(*b).distance_squared(origin))
        })
}

fn ground(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use island_survival_core::{Inventory, ResourceId, ResourceKind};
    use island_survival_rendering::{Color, GhostPresentation, IslandPresentation};

    use super::*;

    fn empty_scene() -> Scene {
        let black = Color::new(0.0, 0.0, 0.0, 1.0);
        Scene::new(IslandPresentation::new(20.0, black, black).expect("valid radius"))
    }

    fn resource_at(x: f32, z: f32) -> SceneResource {
        SceneResource {
            id: ResourceId::new(0),
            kind: ResourceKind::Wood,
            position: Vec3::new(x, 0.0, z),
        }
    }

    #[test]
    fn collects_when_prompted() {
        let mut autopilot = Autopilot::default();
        let hud = Hud {
            prompt: Some("Press E to collect Wood".to_owned()),
            ..Hud::default()
        };

        let input = autopilot.next_input(&empty_scene(), &hud);

        assert!(input.collect);
    }

    #[test]
    fn builds_a_turret_once_affordable() {
        let mut autopilot = Autopilot::default();
        let mut scene = empty_scene();
        let hud = Hud {
            inventory: Inventory::new(5, 5, 0),
            ..Hud::default()
        };

        assert!(autopilot.next_input(&scene, &hud).toggle_build_menu);
        assert_eq!(
            autopilot.next_input(&scene, &hud).select_building,
            Some(BuildingKind::Turret)
        );
        scene.ghost = Some(GhostPresentation {
            kind: BuildingKind::Turret,
            position: Vec3::new(2.0, 0.0, 0.0),
        });
        assert!(autopilot.next_input(&scene, &hud).confirm_placement);
    }

    #[test]
    fn turns_toward_the_nearest_resource() {
        let mut scene = empty_scene();
        scene.resources = vec![resource_at(0.0, 10.0), resource_at(-15.0, 0.0)];

        let input = steer_toward_resources(&scene);

        assert!(input.turn > 0.0, "target lies counter-clockwise of the camera");
        assert_eq!(input.forward, CREEP_SPEED);
    }

    #[test]
    fn walks_straight_when_aligned() {
        let mut scene = empty_scene();
        scene.resources = vec![resource_at(6.0, 0.0)];

        let input = steer_toward_resources(&scene);

        assert_eq!(input.forward, 1.0);
        assert_eq!(input.turn, 0.0);
    }

    #[test]
    fn wrap_angle_stays_within_half_turn() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn backend_stops_when_the_frame_asks_to_exit() {
        let frames = Rc::new(Cell::new(0_u32));
        let counter = Rc::clone(&frames);
        let presentation = Presentation::new(
            "test",
            Color::new(0.0, 0.0, 0.0, 1.0),
            empty_scene(),
            Hud::default(),
        );

        HeadlessBackend::new(10, 100, Pilot::Idle)
            .run(presentation, move |dt, _, _, _| {
                assert_eq!(dt, Duration::from_millis(100));
                counter.set(counter.get() + 1);
                if counter.get() == 5 {
                    FrameControl::Exit
                } else {
                    FrameControl::Continue
                }
            })
            .expect("headless run never fails");

        assert_eq!(frames.get(), 5);
    }

    #[test]
    fn backend_respects_the_tick_limit() {
        let frames = Rc::new(Cell::new(0_u32));
        let counter = Rc::clone(&frames);
        let presentation = Presentation::new(
            "test",
            Color::new(0.0, 0.0, 0.0, 1.0),
            empty_scene(),
            Hud::default(),
        );

        HeadlessBackend::new(60, 12, Pilot::Autopilot)
            .run(presentation, move |_, _, _, _| {
                counter.set(counter.get() + 1);
                FrameControl::Continue
            })
            .expect("headless run never fails");

        assert_eq!(frames.get(), 12);
    }
}
