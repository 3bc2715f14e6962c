//! # Graphics Module
//!
//! Scene-side graphics types for Diorama: the loaded scene graph, material
//! descriptions, the orbit camera and ray casting.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with damped drag and zoom controls
//! - **Scene Graph** ([`scene`]) - Named nodes with transforms, bounds and materials
//! - **Resources** ([`resources`]) - Material and texture descriptors
//! - **Picking** ([`picking`]) - Pointer rays and nearest-hit queries
//!
//! Drawing is left to a [`RenderSurface`](crate::experience::RenderSurface)
//! supplied by the host.

pub mod camera;
pub mod picking;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::OrbitCamera;
pub use scene::SceneGraph;
