//! Configuration for Diorama
//!
//! Every table the room needs is static data: name markers, texture sets,
//! social links, fan partitions, hover tween parameters and the camera setup.
//! [`RoomConfig::default`] describes the shipped room; the builder-style
//! setters swap individual tables for tests or other rooms.

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::animation::tween::Ease;
use crate::error::{DioramaError, Result};
use crate::gfx::resources::VideoSource;
use crate::gfx::scene::Axis;

/// Substrings in node names that tag behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct Markers {
    pub water: String,
    pub glass: String,
    pub bubble: String,
    pub screen: String,
    pub hover: String,
    pub raycast: String,
    pub pointer: String,
    pub fan: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            water: "Water".to_string(),
            glass: "Glass".to_string(),
            bubble: "Bubble".to_string(),
            screen: "Screen".to_string(),
            hover: "Hover".to_string(),
            raycast: "Raycaster".to_string(),
            pointer: "Pointer".to_string(),
            fan: "Cooler".to_string(),
        }
    }
}

impl Markers {
    fn all(&self) -> [(&'static str, &str); 8] {
        [
            ("water", &self.water),
            ("glass", &self.glass),
            ("bubble", &self.bubble),
            ("screen", &self.screen),
            ("hover", &self.hover),
            ("raycast", &self.raycast),
            ("pointer", &self.pointer),
            ("fan", &self.fan),
        ]
    }
}

/// A baked texture set selected by a key in the node name.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureGroup {
    pub key: String,
    pub day: String,
    /// Registered only when present; never applied by the classifier.
    pub night: Option<String>,
}

impl TextureGroup {
    pub fn new(key: &str, day: &str) -> Self {
        Self {
            key: key.to_string(),
            day: day.to_string(),
            night: None,
        }
    }

    pub fn with_night(mut self, night: &str) -> Self {
        // An empty path means "no night texture"
        self.night = if night.is_empty() {
            None
        } else {
            Some(night.to_string())
        };
        self
    }
}

/// Name marker that opens an external link when clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub marker: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(marker: &str, url: &str) -> Self {
        Self {
            marker: marker.to_string(),
            url: url.to_string(),
        }
    }
}

/// Explicit whitelist of fan indices spinning around one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct FanPartition {
    pub axis: Axis,
    pub indices: Vec<u32>,
}

impl FanPartition {
    pub fn new(axis: Axis, indices: &[u32]) -> Self {
        Self {
            axis,
            indices: indices.to_vec(),
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }
}

/// How the per-tick fan increment relates to wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FanSpin {
    /// Fixed increment per frame; speed follows the display refresh rate.
    PerFrame,
    /// Increment scaled by `dt * reference_hz`, so speed is the same as
    /// `PerFrame` at `reference_hz` on every display.
    TimeScaled { reference_hz: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FanConfig {
    pub primary: FanPartition,
    pub secondary: FanPartition,
    /// Radians added per tick (or per reference tick when time-scaled).
    pub increment: f32,
    pub spin: FanSpin,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            primary: FanPartition::new(Axis::Z, &[1, 2, 4, 5, 6, 7, 8, 9]),
            secondary: FanPartition::new(Axis::X, &[3]),
            increment: 0.1,
            spin: FanSpin::PerFrame,
        }
    }
}

/// Parameters of the hover enter/exit tweens.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTweenConfig {
    pub scale_factor: f32,
    /// Offset along one axis while hovered. Only that component moves; the
    /// position tween holds the other two at their baseline values.
    pub position_offset: (Axis, f32),
    /// Same as `position_offset` for rotation; `None` leaves rotation alone.
    pub rotation_offset: Option<(Axis, f32)>,
    pub enter_duration: f32,
    pub exit_duration: f32,
    pub ease: Ease,
}

impl Default for HoverTweenConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.4,
            position_offset: (Axis::X, PI / 8.0),
            rotation_offset: None,
            enter_duration: 0.5,
            exit_duration: 0.3,
            ease: Ease::BounceOut,
        }
    }
}

/// Initial camera placement and orbit limits.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSetup {
    pub fov_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle measured from the up axis.
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub damping: f32,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            position: Vector3::new(20.0 / 1.2, 11.0 / 1.2, 13.0 / 1.2),
            target: Vector3::new(0.0, 3.0, 0.0),
            min_distance: 10.0,
            max_distance: 35.0,
            min_polar: 0.0,
            max_polar: PI / 2.0,
            min_azimuth: 0.0,
            max_azimuth: PI / 2.0,
            damping: 0.05,
        }
    }
}

/// Complete static description of a room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomConfig {
    pub markers: Markers,
    /// Evaluated in order; the first key contained in a node name wins.
    pub texture_groups: Vec<TextureGroup>,
    pub screen_video: VideoSource,
    /// Evaluated in order; a click opens at most the first matching link.
    pub social_links: Vec<SocialLink>,
    pub fans: FanConfig,
    pub hover: HoverTweenConfig,
    pub camera: CameraSetup,
    pub max_pixel_ratio: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            texture_groups: vec![
                TextureGroup::new("First", "/textures/Texture_Set_One.webp").with_night(""),
                TextureGroup::new("Second", "/textures/Texture_Set_Two.webp").with_night(""),
                TextureGroup::new("Third", "/textures/Texture_Set_Three.webp").with_night(""),
                TextureGroup::new("Fourth", "/textures/Texture_Set_Four.webp").with_night(""),
            ],
            screen_video: VideoSource::new("/textures/video/Screen.mp4"),
            social_links: vec![SocialLink::new(
                "Steam",
                "https://steamcommunity.com/id/2201763",
            )],
            fans: FanConfig::default(),
            hover: HoverTweenConfig::default(),
            camera: CameraSetup::default(),
            max_pixel_ratio: 2.0,
        }
    }
}

impl RoomConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn texture_groups(mut self, groups: Vec<TextureGroup>) -> Self {
        self.texture_groups = groups;
        self
    }

    pub fn social_links(mut self, links: Vec<SocialLink>) -> Self {
        self.social_links = links;
        self
    }

    pub fn fans(mut self, fans: FanConfig) -> Self {
        self.fans = fans;
        self
    }

    pub fn fan_spin(mut self, spin: FanSpin) -> Self {
        self.fans.spin = spin;
        self
    }

    pub fn hover(mut self, hover: HoverTweenConfig) -> Self {
        self.hover = hover;
        self
    }

    pub fn camera(mut self, camera: CameraSetup) -> Self {
        self.camera = camera;
        self
    }

    /// Checks the tables for contradictions that would make classification
    /// ambiguous or the tweens degenerate.
    pub fn validate(&self) -> Result<()> {
        for (field, marker) in self.markers.all() {
            if marker.is_empty() {
                return Err(DioramaError::Config(format!("{field} marker is empty")));
            }
        }

        for group in &self.texture_groups {
            if group.key.is_empty() {
                return Err(DioramaError::Config("texture group with empty key".into()));
            }
            if group.day.is_empty() {
                return Err(DioramaError::Config(format!(
                    "texture group '{}' has no day texture",
                    group.key
                )));
            }
        }

        for link in &self.social_links {
            if link.marker.is_empty() {
                return Err(DioramaError::Config(format!(
                    "social link '{}' has an empty marker",
                    link.url
                )));
            }
        }

        if let Some(index) = self
            .fans
            .primary
            .indices
            .iter()
            .find(|i| self.fans.secondary.contains(**i))
        {
            return Err(DioramaError::Config(format!(
                "fan index {index} is in both partitions"
            )));
        }
        if self.fans.primary.axis == self.fans.secondary.axis {
            return Err(DioramaError::Config(
                "fan partitions must use different axes".into(),
            ));
        }
        if let FanSpin::TimeScaled { reference_hz } = self.fans.spin {
            if reference_hz <= 0.0 {
                return Err(DioramaError::Config("reference_hz must be positive".into()));
            }
        }

        if self.hover.scale_factor <= 0.0 {
            return Err(DioramaError::Config("hover scale factor must be positive".into()));
        }
        if self.hover.enter_duration <= 0.0 || self.hover.exit_duration <= 0.0 {
            return Err(DioramaError::Config("hover durations must be positive".into()));
        }

        if self.max_pixel_ratio <= 0.0 {
            return Err(DioramaError::Config("max pixel ratio must be positive".into()));
        }

        Ok(())
    }
}
