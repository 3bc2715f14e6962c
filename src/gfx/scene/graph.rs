use std::ops::{Index, IndexMut};

use cgmath::Matrix4;

use crate::gfx::picking::Aabb;

use super::node::{NodeId, SceneNode};

/// Arena-backed scene graph with a single root
///
/// Nodes are never removed; a [`NodeId`] stays valid for the lifetime of the
/// graph that issued it.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: NodeId,
}

impl SceneGraph {
    /// Creates a graph containing only an empty root group
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![SceneNode::group(root_name)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Appends `node` as the last child of `parent`
    pub fn add_node(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, pre-order traversal from the root in child order.
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            order.push(id);
            // Reverse so the first child is visited first
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }

        order
    }

    /// Mesh-bearing nodes in traversal order
    pub fn mesh_nodes(&self) -> Vec<NodeId> {
        self.traverse()
            .into_iter()
            .filter(|id| self.nodes[id.0].is_mesh())
            .collect()
    }

    /// Finds the first node in traversal order whose name equals `name`
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse()
            .into_iter()
            .find(|id| self.nodes[id.0].name() == name)
    }

    /// Accumulated parent-to-world matrix of a node
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        let node = &self.nodes[id.0];
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// World-space bounds of a mesh node under its current transform
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        self.nodes
            .get(id.0)
            .and_then(|node| node.bounds())
            .map(|bounds| bounds.transform(&self.world_matrix(id)))
    }
}

impl Index<NodeId> for SceneGraph {
    type Output = SceneNode;

    fn index(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for SceneGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }
}
