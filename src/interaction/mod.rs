//! # Pointer Interaction
//!
//! The [`InteractionController`] owns the pointer position and the hover
//! state machine. Once per frame it casts the pointer ray against the raycast
//! targets, keeps the nearest hit, and reports hover transitions and the
//! cursor style for that frame. Clicks resolve against the nearest hit of the
//! last frame and the social link table.
//!
//! ## State machine
//!
//! | Current         | Nearest hit this tick       | Next            | Requests              |
//! |-----------------|-----------------------------|-----------------|-----------------------|
//! | `Idle`          | hoverable `n`               | `Hovering(n)`   | enter `n`             |
//! | `Hovering(m)`   | hoverable `n != m`          | `Hovering(n)`   | exit `m`, enter `n`   |
//! | `Hovering(n)`   | `n`                         | `Hovering(n)`   | none                  |
//! | `Hovering(n)`   | nothing, or not hoverable   | `Idle`          | exit `n`              |

pub mod links;

use std::collections::HashSet;

use log::{debug, trace};

use crate::classify::{Classification, RaycastSet};
use crate::gfx::{
    camera::OrbitCamera,
    picking::{Intersection, Raycaster},
    scene::{NodeId, SceneGraph},
};

pub use links::{LinkTarget, OpenLinkRequest, SocialLinkTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering(NodeId),
}

/// Animation request emitted by a hover state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    Enter(NodeId),
    Exit(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

/// Result of one interaction tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickOutcome {
    /// Exit before enter when the hover target changes
    pub transitions: Vec<HoverTransition>,
    pub cursor: CursorStyle,
    pub nearest: Option<Intersection>,
}

/// Converts a position in window pixels to normalized device coordinates
///
/// Both axes map to `[-1, 1]`; y grows upwards.
pub fn normalize_pointer(x: f64, y: f64, width: u32, height: u32) -> (f32, f32) {
    let width = width.max(1) as f64;
    let height = height.max(1) as f64;
    (
        ((x / width) * 2.0 - 1.0) as f32,
        (-(y / height) * 2.0 + 1.0) as f32,
    )
}

pub struct InteractionController {
    raycast_set: RaycastSet,
    hoverable: HashSet<NodeId>,
    pointer_nodes: HashSet<NodeId>,
    links: SocialLinkTable,
    pointer: (f32, f32),
    state: InteractionState,
    current: Option<Intersection>,
    cursor: CursorStyle,
}

impl InteractionController {
    pub fn new(classification: &Classification, links: SocialLinkTable) -> Self {
        Self {
            raycast_set: classification.raycast_set.clone(),
            hoverable: classification.baselines.nodes().collect(),
            pointer_nodes: classification.pointer_nodes.clone(),
            links,
            pointer: (0.0, 0.0),
            state: InteractionState::Idle,
            current: None,
            cursor: CursorStyle::Default,
        }
    }

    /// Stores the pointer for the next tick
    pub fn on_pointer_move(&mut self, ndc_x: f32, ndc_y: f32) {
        self.pointer = (ndc_x, ndc_y);
    }

    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn current_intersection(&self) -> Option<&Intersection> {
        self.current.as_ref()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Click or touch release: link request for the current nearest hit
    ///
    /// No hit, or a hit whose name carries no link marker, yields `None`.
    pub fn on_primary_action(&self, graph: &SceneGraph) -> Option<OpenLinkRequest> {
        let hit = self.current.as_ref()?;
        let node = graph.get(hit.node)?;
        let link = self.links.lookup(node.name())?;

        debug!("Opening {} for {}", link.url, node.name());
        Some(OpenLinkRequest::new(&link.url))
    }

    /// Casts the pointer ray and advances the hover state machine
    pub fn tick(&mut self, graph: &SceneGraph, camera: &OrbitCamera) -> TickOutcome {
        let nearest = if self.raycast_set.is_empty() {
            None
        } else {
            Raycaster::from_camera(self.pointer, camera)
                .intersect_nodes(graph, self.raycast_set.as_slice())
                .into_iter()
                .next()
        };

        trace!("Nearest intersection: {:?}", nearest.map(|hit| hit.node));
        self.resolve(nearest)
    }

    /// Applies one tick's nearest hit to the state machine and cursor
    pub fn resolve(&mut self, nearest: Option<Intersection>) -> TickOutcome {
        self.current = nearest;

        let hovered = nearest
            .map(|hit| hit.node)
            .filter(|node| self.hoverable.contains(node));

        let mut transitions = Vec::new();
        match (self.state, hovered) {
            (InteractionState::Hovering(current), Some(next)) if current == next => {}
            (state, Some(next)) => {
                if let InteractionState::Hovering(previous) = state {
                    transitions.push(HoverTransition::Exit(previous));
                }
                transitions.push(HoverTransition::Enter(next));
                self.state = InteractionState::Hovering(next);
            }
            (InteractionState::Hovering(previous), None) => {
                transitions.push(HoverTransition::Exit(previous));
                self.state = InteractionState::Idle;
            }
            (InteractionState::Idle, None) => {}
        }

        if !transitions.is_empty() {
            debug!("Hover transitions: {:?}", transitions);
        }

        self.cursor = match nearest {
            Some(hit) if self.pointer_nodes.contains(&hit.node) => CursorStyle::Pointer,
            _ => CursorStyle::Default,
        };

        TickOutcome {
            transitions,
            cursor: self.cursor,
            nearest,
        }
    }
}
