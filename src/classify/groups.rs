//! Node collections produced by classification

use std::collections::{BTreeMap, HashSet};

use cgmath::Vector3;

use crate::gfx::scene::{Axis, NodeId, Transform};

/// Nodes eligible for pointer hit-testing, in insertion order, no duplicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaycastSet {
    nodes: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl RaycastSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node`; returns false if it was already present
    pub fn insert(&mut self, node: NodeId) -> bool {
        if self.members.insert(node) {
            self.nodes.push(node);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<NodeId> for RaycastSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = Self::new();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

/// Untouched transform of a hoverable node, captured before any animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverBaseline {
    pub scale: Vector3<f32>,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
}

impl From<&Transform> for HoverBaseline {
    fn from(transform: &Transform) -> Self {
        Self {
            scale: transform.scale,
            position: transform.position,
            rotation: transform.rotation,
        }
    }
}

/// Write-once baseline snapshots keyed by node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverBaselines {
    baselines: BTreeMap<NodeId, HoverBaseline>,
}

impl HoverBaselines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the baseline of `node` unless one already exists
    pub fn capture(&mut self, node: NodeId, transform: &Transform) -> &HoverBaseline {
        self.baselines
            .entry(node)
            .or_insert_with(|| HoverBaseline::from(transform))
    }

    pub fn get(&self, node: NodeId) -> Option<&HoverBaseline> {
        self.baselines.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.baselines.contains_key(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.baselines.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}

/// Nodes spinning around a shared axis
#[derive(Debug, Clone, PartialEq)]
pub struct FanGroup {
    pub axis: Axis,
    pub members: Vec<NodeId>,
}

/// The primary-axis and secondary-axis fan groups
#[derive(Debug, Clone, PartialEq)]
pub struct FanGroups {
    pub primary: FanGroup,
    pub secondary: FanGroup,
}

/// Which of the two fan partitions a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanSlot {
    Primary,
    Secondary,
}

impl FanGroups {
    pub fn new(primary_axis: Axis, secondary_axis: Axis) -> Self {
        Self {
            primary: FanGroup {
                axis: primary_axis,
                members: Vec::new(),
            },
            secondary: FanGroup {
                axis: secondary_axis,
                members: Vec::new(),
            },
        }
    }

    pub(crate) fn push(&mut self, slot: FanSlot, node: NodeId) {
        let group = match slot {
            FanSlot::Primary => &mut self.primary,
            FanSlot::Secondary => &mut self.secondary,
        };
        if !group.members.contains(&node) {
            group.members.push(node);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FanGroup> {
        [&self.primary, &self.secondary].into_iter()
    }

    /// Axis a node spins around, if it is a fan
    pub fn axis_of(&self, node: NodeId) -> Option<Axis> {
        self.iter()
            .find(|group| group.members.contains(&node))
            .map(|group| group.axis)
    }

    pub fn len(&self) -> usize {
        self.primary.members.len() + self.secondary.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
