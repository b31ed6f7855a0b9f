#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure build-menu system responsible for emitting building placement commands.

use island_survival_core::{
    BuildingKind, Command, Event, PlacementError, PlayerSnapshot, WorldPoint,
};

/// Declarative placement preview describing a potential building.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Kind of building proposed for placement.
    pub kind: BuildingKind,
    /// Ground position the building would occupy if confirmed.
    pub position: WorldPoint,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    #[must_use]
    pub const fn new(kind: BuildingKind, position: WorldPoint) -> Self {
        Self { kind, position }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderInput {
    /// Opens the build menu when closed and closes it when open.
    pub toggle_menu: bool,
    /// Building type picked from the open menu on this frame.
    pub select: Option<BuildingKind>,
    /// Indicates whether the player confirmed the ghost on this frame.
    pub confirm: bool,
    /// Closes the menu and discards any pending selection.
    pub close_menu: bool,
}

impl BuilderInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(
        toggle_menu: bool,
        select: Option<BuildingKind>,
        confirm: bool,
        close_menu: bool,
    ) -> Self {
        Self {
            toggle_menu,
            select,
            confirm,
            close_menu,
        }
    }
}

/// Message surfaced to the player after a build interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderFeedback {
    /// The selected building costs more than the inventory holds.
    Unaffordable(BuildingKind),
    /// The world refused a confirmed placement.
    Rejected(PlacementError),
}

impl BuilderFeedback {
    /// Human-readable description of the feedback.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unaffordable(kind) => format!("Not enough resources for {}", kind.label()),
            Self::Rejected(PlacementError::InsufficientResources) => {
                "Not enough resources".to_owned()
            }
            Self::Rejected(PlacementError::SessionEnded) => "The session is over".to_owned(),
        }
    }
}

/// Build-menu system that translates selections and confirmations into commands.
#[derive(Debug, Clone)]
pub struct Builder {
    ghost_offset: f32,
    menu_open: bool,
    preview: Option<PlacementPreview>,
    feedback: Option<BuilderFeedback>,
    session_ended: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Builder {
    /// Creates a new builder that previews buildings `ghost_offset` units along +x.
    #[must_use]
    pub const fn new(ghost_offset: f32) -> Self {
        Self {
            ghost_offset,
            menu_open: false,
            preview: None,
            feedback: None,
            session_ended: false,
        }
    }

    /// Reports whether the build menu is visible.
    #[must_use]
    pub const fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Ghost awaiting confirmation, if a building type is selected.
    #[must_use]
    pub const fn preview(&self) -> Option<PlacementPreview> {
        self.preview
    }

    /// Most recent feedback for the player.
    #[must_use]
    pub const fn feedback(&self) -> Option<BuilderFeedback> {
        self.feedback
    }

    /// Consumes world events and adapter-derived input to emit builder commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: &PlayerSnapshot,
        input: BuilderInput,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::GameEnded { .. } => {
                    self.session_ended = true;
                    self.reset();
                }
                Event::SessionRestarted => {
                    self.session_ended = false;
                    self.reset();
                }
                Event::BuildingPlacementRejected { reason, .. } => {
                    self.feedback = Some(BuilderFeedback::Rejected(*reason));
                }
                Event::BuildingPlaced { .. } => self.feedback = None,
                _ => {}
            }
        }

        if self.session_ended {
            return;
        }

        if input.toggle_menu {
            self.menu_open = !self.menu_open;
        }

        if let Some(kind) = input.select {
            if self.menu_open {
                self.select(kind, player);
            }
        }

        if input.close_menu {
            self.menu_open = false;
            self.preview = None;
        }

        let Some(preview) = self.preview.as_mut() else {
            return;
        };
        preview.position = ghost_position(player.position, self.ghost_offset);

        if input.confirm {
            out.push(Command::PlaceBuilding {
                kind: preview.kind,
                position: preview.position,
            });
            self.preview = None;
        }
    }

    fn select(&mut self, kind: BuildingKind, player: &PlayerSnapshot) {
        if !player.inventory.can_afford(kind.cost()) {
            self.feedback = Some(BuilderFeedback::Unaffordable(kind));
            return;
        }

        self.feedback = None;
        self.menu_open = false;
        self.preview = Some(PlacementPreview::new(
            kind,
            ghost_position(player.position, self.ghost_offset),
        ));
    }

    fn reset(&mut self) {
        self.menu_open = false;
        self.preview = None;
        self.feedback = None;
    }
}

fn ghost_position(player: WorldPoint, offset: f32) -> WorldPoint {
    WorldPoint::new(player.x() + offset, player.z())
}
