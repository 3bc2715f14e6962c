//! Texture source descriptors
//!
//! Decoding is done by the host renderer; these types only describe where a
//! texture comes from and how it must be sampled.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// Still image texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSource {
    pub path: String,
    /// Baked glTF textures are stored top-down
    pub flip_y: bool,
    pub color_space: ColorSpace,
    pub min_filter: FilterMode,
}

impl TextureSource {
    /// Baked colour texture: no flip, sRGB, linear minification
    pub fn baked(path: &str) -> Self {
        Self {
            path: path.to_string(),
            flip_y: false,
            color_space: ColorSpace::Srgb,
            min_filter: FilterMode::Linear,
        }
    }
}

/// Looping video used as a live texture
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSource {
    pub path: String,
    pub looping: bool,
    pub muted: bool,
    pub plays_inline: bool,
    pub autoplay: bool,
    pub flip_y: bool,
    pub color_space: ColorSpace,
}

impl VideoSource {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            looping: true,
            muted: true,
            plays_inline: true,
            autoplay: true,
            flip_y: false,
            color_space: ColorSpace::Srgb,
        }
    }
}
