// src/lib.rs
//! Diorama
//!
//! Interactive 3D room core: name-based scene classification, ray-cast hover
//! and click interaction, and procedural animation, hosted on winit.

pub mod animation;
pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod experience;
pub mod gfx;
pub mod interaction;
pub mod loader;
pub mod prelude;

// Re-export main types for convenience
pub use app::DioramaApp;
pub use config::RoomConfig;
pub use error::{DioramaError, Result};
pub use experience::Experience;
