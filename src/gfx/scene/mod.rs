//! # Scene Graph Module
//!
//! This module holds the loaded scene: an arena of named nodes with mutable
//! transforms, optional mesh bounds and a material reference.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - The node arena with depth-first traversal and world matrices
//! - [`SceneNode`] - A named node with transform, bounds and material
//! - [`Transform`] - Position, Euler rotation and scale
//! - [`NodeId`] - Handle identifying a node inside its graph
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::gfx::picking::Aabb;
//! use diorama::gfx::scene::{SceneGraph, SceneNode};
//! use cgmath::Vector3;
//!
//! let mut graph = SceneGraph::new("Room");
//! let bounds = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
//! let fan = graph.add_node(graph.root(), SceneNode::mesh("Cooler1_First", bounds));
//! assert_eq!(graph[fan].name(), "Cooler1_First");
//! ```

pub mod graph;
pub mod node;

// Re-export main types
pub use graph::SceneGraph;
pub use node::{Axis, NodeId, SceneNode, Transform};
