//! # Diorama Prelude
//!
//! Commonly used types for hosting a room, in one import.
//!
//! ## Usage
//!
//! ```rust
//! use diorama::prelude::*;
//! ```
//!
//! This brings all essential types into scope, allowing you to write:
//!
//! ```no_run
//! use diorama::prelude::*;
//!
//! struct Headless;
//!
//! impl RenderSurface for Headless {
//!     fn resize(&mut self, _width: u32, _height: u32, _pixel_ratio: f32) {}
//!     fn render(&mut self, _graph: &SceneGraph, _materials: &MaterialLibrary, _camera: &OrbitCamera) {}
//! }
//!
//! fn main() -> diorama::Result<()> {
//!     let graph = load_room("room.obj")?;
//!     let mut app = DioramaApp::new(graph, &RoomConfig::default(), Headless)?;
//!     app.on_link(|request| println!("open {}", request.url));
//!     app.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::DioramaApp;
pub use crate::experience::{Experience, HostUi, RenderSurface};
pub use crate::loader::load_room;

// Configuration and errors
pub use crate::config::{
    CameraSetup, FanConfig, FanPartition, FanSpin, HoverTweenConfig, Markers, RoomConfig,
    SocialLink, TextureGroup,
};
pub use crate::error::{DioramaError, Result};

// Scene and graphics types
pub use crate::gfx::camera::{CameraController, OrbitCamera};
pub use crate::gfx::resources::{Material, MaterialId, MaterialLibrary, Surface};
pub use crate::gfx::scene::{Axis, NodeId, SceneGraph, SceneNode, Transform};

// Core behaviour
pub use crate::animation::{AnimationDriver, Ease};
pub use crate::classify::{Classification, Classifier};
pub use crate::interaction::{
    CursorStyle, HoverTransition, InteractionController, InteractionState, OpenLinkRequest,
};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
