#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement systems that steer the player and the enemies.

use std::time::Duration;

use island_survival_core::{Command, EnemyView, Event, Heading, WorldPoint};

/// Locomotion intent distilled from adapter-provided frame input.
///
/// Each axis is expected in `-1.0..=1.0`; positive values mean forward,
/// right and counter-clockwise respectively.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocomotionIntent {
    /// Walk along the camera's facing direction.
    pub forward: f32,
    /// Walk sideways relative to the camera.
    pub strafe: f32,
    /// Rotate the camera around the player.
    pub turn: f32,
}

impl LocomotionIntent {
    /// Creates a new intent with explicit axis values.
    #[must_use]
    pub const fn new(forward: f32, strafe: f32, turn: f32) -> Self {
        Self {
            forward,
            strafe,
            turn,
        }
    }
}

/// Pure system that turns camera-relative input into player movement commands.
#[derive(Debug, Default)]
pub struct PlayerMovement {
    yaw: f32,
}

impl PlayerMovement {
    /// Creates a new player movement system with the camera facing +x.
    #[must_use]
    pub const fn new() -> Self {
        Self { yaw: 0.0 }
    }

    /// Camera yaw in radians, measured from the positive x axis.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Consumes world events and the current intent to emit a movement command.
    ///
    /// Nothing happens unless the batch contains a `TimeAdvanced` event, which
    /// the world stops broadcasting once the session has ended.
    pub fn handle(
        &mut self,
        events: &[Event],
        intent: LocomotionIntent,
        turn_rate: f32,
        out: &mut Vec<Command>,
    ) {
        let mut dt = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt: step } => dt = dt.saturating_add(*step),
                Event::SessionRestarted => self.yaw = 0.0,
                _ => {}
            }
        }

        if dt.is_zero() {
            return;
        }

        self.yaw += intent.turn.clamp(-1.0, 1.0) * turn_rate * dt.as_secs_f32();

        let forward = intent.forward.clamp(-1.0, 1.0);
        let strafe = intent.strafe.clamp(-1.0, 1.0);
        let (sin, cos) = self.yaw.sin_cos();
        let x = forward * cos + strafe * sin;
        let z = forward * sin - strafe * cos;

        if let Some(heading) = Heading::from_components(x, z) {
            out.push(Command::MovePlayer { heading, dt });
        }
    }
}

/// Pure system that steers every live enemy toward the player.
#[derive(Debug, Default)]
pub struct EnemyPursuit;

impl EnemyPursuit {
    /// Creates a new pursuit system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits one step per enemy, in identifier order, aimed at `player`.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        player: WorldPoint,
        out: &mut Vec<Command>,
    ) {
        let mut dt = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt: step } = event {
                dt = dt.saturating_add(*step);
            }
        }

        if dt.is_zero() {
            return;
        }

        for enemy in enemies.iter() {
            out.push(Command::StepEnemy {
                enemy: enemy.id,
                toward: player,
                dt,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(ms: u64) -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(ms),
        }]
    }

    #[test]
    fn idle_intent_emits_nothing() {
        let mut movement = PlayerMovement::new();
        let mut out = Vec::new();
        movement.handle(&tick(16), LocomotionIntent::default(), 1.2, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn forward_follows_camera_yaw() {
        let mut movement = PlayerMovement::new();
        let mut out = Vec::new();
        movement.handle(&tick(1_000), LocomotionIntent::new(1.0, 0.0, 0.0), 1.2, &mut out);

        match out.as_slice() {
            [Command::MovePlayer { heading, dt }] => {
                assert!((heading.x() - 1.0).abs() < 1e-6);
                assert!(heading.z().abs() < 1e-6);
                assert_eq!(*dt, Duration::from_secs(1));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn turning_accumulates_and_resets_on_restart() {
        let mut movement = PlayerMovement::new();
        let mut out = Vec::new();
        movement.handle(&tick(500), LocomotionIntent::new(0.0, 0.0, 1.0), 1.2, &mut out);
        assert!((movement.yaw() - 0.6).abs() < 1e-6);
        assert!(out.is_empty(), "turning alone does not move the player");

        movement.handle(
            &[Event::SessionRestarted],
            LocomotionIntent::default(),
            1.2,
            &mut out,
        );
        assert_eq!(movement.yaw(), 0.0);
    }

    #[test]
    fn pursuit_steers_at_the_live_player_not_the_spawn_target() {
        use island_survival_core::{EnemyId, EnemySnapshot, Health};

        let enemies = EnemyView::from_snapshots(vec![EnemySnapshot {
            id: EnemyId::new(3),
            position: WorldPoint::new(20.0, 0.0),
            health: Health::new(100),
            speed: 2.0,
            target: WorldPoint::new(0.0, 0.0),
        }]);
        let player = WorldPoint::new(-4.0, 6.0);
        let mut out = Vec::new();

        EnemyPursuit::new().handle(&tick(250), &enemies, player, &mut out);

        assert_eq!(
            out,
            vec![Command::StepEnemy {
                enemy: EnemyId::new(3),
                toward: player,
                dt: Duration::from_millis(250),
            }]
        );
    }
}
