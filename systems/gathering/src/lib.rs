#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that tracks the nearby resource and emits collection commands.

use island_survival_core::{
    Command, ResourceKind, ResourceSnapshot, ResourceView, SessionSnapshot, WorldPoint,
};

/// Resource node currently within the player's reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearbyResource {
    /// Snapshot of the node that a collection would harvest.
    pub node: ResourceSnapshot,
}

impl NearbyResource {
    /// Material the player would receive.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.node.kind
    }

    /// Prompt shown to the player while the node is in reach.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("Press E to collect {}", self.node.kind.label())
    }
}

/// Gathering system that mirrors the world's nearest-node selection.
#[derive(Debug, Default)]
pub struct Gathering {
    nearby: Option<NearbyResource>,
}

impl Gathering {
    /// Creates a new gathering system with nothing in reach.
    #[must_use]
    pub const fn new() -> Self {
        Self { nearby: None }
    }

    /// Node that is currently in reach, if any.
    #[must_use]
    pub const fn nearby(&self) -> Option<NearbyResource> {
        self.nearby
    }

    /// Refreshes the nearby node and emits `CollectResource` when requested.
    ///
    /// Collection is only requested when a node is in reach; the prompt is
    /// cleared once the session has ended.
    pub fn handle(
        &mut self,
        session: SessionSnapshot,
        player: WorldPoint,
        resources: &ResourceView,
        collection_range: f32,
        collect_pressed: bool,
        out: &mut Vec<Command>,
    ) {
        if session.is_ended() {
            self.nearby = None;
            return;
        }

        self.nearby = resources
            .nearest_within(player, collection_range)
            .map(|node| NearbyResource { node: *node });

        if collect_pressed && self.nearby.is_some() {
            out.push(Command::CollectResource);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use island_survival_core::{EndReason, ResourceId};
    use std::time::Duration;

    fn running() -> SessionSnapshot {
        SessionSnapshot {
            time_remaining: Duration::from_secs(300),
            elapsed: Duration::ZERO,
            score: 0,
            ended: None,
        }
    }

    fn view() -> ResourceView {
        ResourceView::from_snapshots(vec![
            ResourceSnapshot {
                id: ResourceId::new(4),
                kind: ResourceKind::Stone,
                position: WorldPoint::new(1.0, 0.0),
                amount: 3,
            },
            ResourceSnapshot {
                id: ResourceId::new(9),
                kind: ResourceKind::Iron,
                position: WorldPoint::new(-1.0, 0.0),
                amount: 1,
            },
        ])
    }

    #[test]
    fn prompt_names_the_nearest_kind() {
        let mut gathering = Gathering::new();
        let mut out = Vec::new();

        gathering.handle(running(), WorldPoint::ORIGIN, &view(), 1.5, false, &mut out);

        let nearby = gathering.nearby().expect("stone is in reach");
        assert_eq!(nearby.kind(), ResourceKind::Stone, "ties resolve to lowest id");
        assert_eq!(nearby.prompt(), "Press E to collect Stone");
        assert!(out.is_empty(), "no key press, no command");
    }

    #[test]
    fn key_press_without_node_is_ignored() {
        let mut gathering = Gathering::new();
        let mut out = Vec::new();

        gathering.handle(
            running(),
            WorldPoint::new(10.0, 10.0),
            &view(),
            1.5,
            true,
            &mut out,
        );

        assert!(gathering.nearby().is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn ended_session_hides_prompt() {
        let mut gathering = Gathering::new();
        let mut out = Vec::new();
        gathering.handle(running(), WorldPoint::ORIGIN, &view(), 1.5, false, &mut out);

        let ended = SessionSnapshot {
            ended: Some(EndReason::TimeExpired),
            ..running()
        };
        gathering.handle(ended, WorldPoint::ORIGIN, &view(), 1.5, true, &mut out);

        assert!(gathering.nearby().is_none());
        assert!(out.is_empty());
    }
}
