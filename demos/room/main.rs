//! # Diorama Room Demo
//!
//! Loads an OBJ room, classifies it and runs the interactive host window.
//! Hover marked objects to see them pop, click the Steam logo to request its
//! link, drag to orbit and scroll to zoom.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=diorama=debug cargo run --example room -- assets/room.obj
//! ```
//!
//! Frames are not drawn: the surface below only logs what a renderer would
//! receive.

use anyhow::Context;
use diorama::prelude::*;
use log::{info, trace};

/// Render surface that reports frames to the log
#[derive(Default)]
struct LoggingSurface {
    frames: u64,
}

impl RenderSurface for LoggingSurface {
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        info!("Surface {}x{} @ {}x", width, height, pixel_ratio);
    }

    fn render(&mut self, graph: &SceneGraph, materials: &MaterialLibrary, camera: &OrbitCamera) {
        self.frames += 1;
        if self.frames % 600 == 0 {
            trace!(
                "Frame {}: {} nodes, {} materials, eye {:?}",
                self.frames,
                graph.len(),
                materials.list_materials().len(),
                camera.eye
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/room.obj".to_string());

    let config = RoomConfig::default();
    let graph = load_room(&path).with_context(|| format!("loading {path}"))?;

    let mut app = DioramaApp::new(graph, &config, LoggingSurface::default())?.with_title("Room");
    app.on_link(|request| info!("Would open {} in a new tab", request.url));
    app.run()?;

    Ok(())
}
