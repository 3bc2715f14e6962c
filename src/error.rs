//! Error types for Diorama
//!
//! Only the edges of the crate can fail: asset loading, configuration
//! validation and the window host. Classification, interaction and animation
//! are infallible.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DioramaError {
    #[error("Asset loading error: {0}")]
    AssetLoad(#[from] tobj::LoadError),

    #[error("Scene contains no mesh nodes: {0}")]
    EmptyScene(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window creation error: {0}")]
    Window(#[from] winit::error::OsError),
}

pub type Result<T> = std::result::Result<T, DioramaError>;
