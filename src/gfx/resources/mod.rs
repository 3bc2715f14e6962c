// src/gfx/resources/mod.rs
//! Material and texture descriptions
//!
//! Describes the surfaces assigned to classified nodes. Decoding and GPU
//! upload belong to the host renderer.

pub mod material;
pub mod texture;

// Re-export main types
pub use material::{ColorMap, Material, MaterialId, MaterialLibrary, PhysicalSurface, Surface};
pub use texture::{ColorSpace, FilterMode, TextureSource, VideoSource};
