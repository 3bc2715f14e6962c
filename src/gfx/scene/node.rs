//! # Scene Nodes
//!
//! A [`SceneNode`] is one entry in the loaded scene graph. Its name is fixed at
//! load time and carries the classification markers; its [`Transform`] is
//! mutated every frame by fan rotation and hover tweens.

use std::fmt;

use cgmath::{Matrix4, Rad, Vector3, Zero};

use crate::gfx::picking::{Aabb, TriangleMesh};
use crate::gfx::resources::MaterialId;

/// Stable handle of a node inside one [`SceneGraph`](super::SceneGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One of the three local axes of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn of(self, v: Vector3<f32>) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn of_mut(self, v: &mut Vector3<f32>) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }

    /// Unit vector along this axis scaled by `amount`.
    pub fn offset(self, amount: f32) -> Vector3<f32> {
        let mut v = Vector3::zero();
        *self.of_mut(&mut v) = amount;
        v
    }
}

/// Position, Euler rotation (radians, XYZ order) and scale of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local matrix, composed as T * R * S with R = Rx * Ry * Rz.
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }
}

/// A node of the loaded scene graph
pub struct SceneNode {
    name: String,
    pub transform: Transform,
    /// Local-space bounds; `Some` for mesh-bearing nodes only.
    bounds: Option<Aabb>,
    /// Local-space surface for picking; bounds stand in when absent.
    geometry: Option<TriangleMesh>,
    material: Option<MaterialId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    /// Creates a group node without geometry
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            bounds: None,
            geometry: None,
            material: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates a mesh-bearing node with the given local bounds
    pub fn mesh(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_geometry(mut self, geometry: TriangleMesh) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_mesh(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    pub fn geometry(&self) -> Option<&TriangleMesh> {
        self.geometry.as_ref()
    }

    /// Material assigned at classification, `None` keeps the loader default.
    pub fn material(&self) -> Option<&MaterialId> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: MaterialId) {
        self.material = Some(material);
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("mesh", &self.is_mesh())
            .field("material", &self.material)
            .finish()
    }
}
