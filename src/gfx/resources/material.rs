//! Material system
//!
//! Provides the surface descriptions used by the room and centralized storage.
//! Materials are stored in [`MaterialLibrary`] and nodes reference them by ID,
//! so shared surfaces like glass are described once.

use std::collections::HashMap;

use crate::config::RoomConfig;

use super::texture::{TextureSource, VideoSource};

/// Material ID for referencing materials
pub type MaterialId = String;

pub const DEFAULT: &str = "default";
pub const WATER: &str = "water";
pub const GLASS: &str = "glass";
pub const BUBBLE: &str = "bubble";
pub const SCREEN: &str = "screen";

/// ID of the day material for a texture group key
pub fn textured_id(key: &str) -> MaterialId {
    format!("texture:{key}")
}

/// Image or video bound as the colour map of an unlit surface
#[derive(Debug, Clone, PartialEq)]
pub enum ColorMap {
    Image(TextureSource),
    Video(VideoSource),
}

/// Physically based surface parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalSurface {
    pub base_color: [f32; 4],
    pub transparent: bool,
    pub transmission: f32,
    pub metallic: f32,
    pub roughness: f32,
    pub ior: f32,
    pub thickness: f32,
    pub specular_intensity: f32,
    pub env_map_intensity: f32,
    pub depth_write: bool,
}

impl Default for PhysicalSurface {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            transparent: false,
            transmission: 0.0,
            metallic: 0.0,
            roughness: 1.0,
            ior: 1.5,
            thickness: 0.0,
            specular_intensity: 1.0,
            env_map_intensity: 1.0,
            depth_write: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Whatever the asset loader assigned
    Default,
    Physical(PhysicalSurface),
    /// Ignores lighting; colour times optional map
    Unlit { color: [f32; 3], map: Option<ColorMap> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: MaterialId,
    pub surface: Surface,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: DEFAULT.to_string(),
            surface: Surface::Default,
        }
    }
}

impl Material {
    pub fn new(name: &str, surface: Surface) -> Self {
        Self {
            name: name.to_string(),
            surface,
        }
    }

    /// Translucent blue water
    pub fn water() -> Self {
        Self::new(
            WATER,
            Surface::Physical(PhysicalSurface {
                base_color: hex_rgba(0x558BC8, 0.66),
                transparent: true,
                depth_write: false,
                ..PhysicalSurface::default()
            }),
        )
    }

    /// Clear transmissive glass lit by the environment map
    pub fn glass() -> Self {
        Self::new(
            GLASS,
            Surface::Physical(PhysicalSurface {
                transmission: 1.0,
                metallic: 0.0,
                roughness: 0.0,
                ior: 1.5,
                thickness: 0.01,
                specular_intensity: 1.0,
                env_map_intensity: 1.0,
                depth_write: false,
                ..PhysicalSurface::default()
            }),
        )
    }

    /// Plain unlit white
    pub fn bubble() -> Self {
        Self::new(
            BUBBLE,
            Surface::Unlit {
                color: [1.0, 1.0, 1.0],
                map: None,
            },
        )
    }

    /// Unlit surface showing a looping video
    pub fn screen(video: VideoSource) -> Self {
        Self::new(
            SCREEN,
            Surface::Unlit {
                color: [1.0, 1.0, 1.0],
                map: Some(ColorMap::Video(video)),
            },
        )
    }

    /// Unlit surface showing a baked texture set
    pub fn textured(key: &str, texture: TextureSource) -> Self {
        Self::new(
            &textured_id(key),
            Surface::Unlit {
                color: [1.0, 1.0, 1.0],
                map: Some(ColorMap::Image(texture)),
            },
        )
    }

    /// Colour map of this material, if any
    pub fn map(&self) -> Option<&ColorMap> {
        match &self.surface {
            Surface::Unlit { map, .. } => map.as_ref(),
            _ => None,
        }
    }
}

fn hex_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// Manages all materials of a room
///
/// Built once from the room configuration. Night textures are registered
/// alongside but never bound to a material.
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    materials: HashMap<MaterialId, Material>,
    night_textures: HashMap<String, TextureSource>,
}

impl MaterialLibrary {
    /// Creates a library holding only the default material
    pub fn new() -> Self {
        let mut materials = HashMap::new();
        materials.insert(DEFAULT.to_string(), Material::default());
        Self {
            materials,
            night_textures: HashMap::new(),
        }
    }

    /// Every material the classifier can assign for this room
    pub fn from_config(config: &RoomConfig) -> Self {
        let mut library = Self::new();
        library.add_material(Material::water());
        library.add_material(Material::glass());
        library.add_material(Material::bubble());
        library.add_material(Material::screen(config.screen_video.clone()));

        for group in &config.texture_groups {
            library.add_material(Material::textured(
                &group.key,
                TextureSource::baked(&group.day),
            ));
            if let Some(night) = &group.night {
                library
                    .night_textures
                    .insert(group.key.clone(), TextureSource::baked(night));
            }
        }

        library
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_default_material(&self) -> &Material {
        &self.materials[DEFAULT]
    }

    /// Material for a node with fallback to default
    pub fn get_material_for_node(&self, material_id: Option<&MaterialId>) -> &Material {
        material_id
            .and_then(|id| self.get_material(id))
            .unwrap_or_else(|| self.get_default_material())
    }

    pub fn night_texture(&self, key: &str) -> Option<&TextureSource> {
        self.night_textures.get(key)
    }

    /// Lists all material IDs
    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextureGroup;

    #[test]
    fn test_library_from_default_config() {
        let library = MaterialLibrary::from_config(&RoomConfig::default());

        for id in [WATER, GLASS, BUBBLE, SCREEN] {
            assert!(library.get_material(id).is_some(), "missing {id}");
        }
        let first = library.get_material(&textured_id("First")).unwrap();
        match first.map() {
            Some(ColorMap::Image(texture)) => {
                assert_eq!(texture.path, "/textures/Texture_Set_One.webp");
                assert!(!texture.flip_y);
            }
            other => panic!("unexpected map {other:?}"),
        }
        assert!(library.night_texture("First").is_none());
    }

    #[test]
    fn test_night_textures_registered_but_not_bound() {
        let config = RoomConfig::new().texture_groups(vec![
            TextureGroup::new("First", "day.webp").with_night("night.webp")
        ]);
        let library = MaterialLibrary::from_config(&config);

        assert_eq!(library.night_texture("First").unwrap().path, "night.webp");
        let day = library.get_material(&textured_id("First")).unwrap();
        assert_eq!(
            day.map(),
            Some(&ColorMap::Image(TextureSource::baked("day.webp")))
        );
    }

    #[test]
    fn test_unknown_material_falls_back_to_default() {
        let library = MaterialLibrary::new();
        let missing = "missing".to_string();
        assert_eq!(library.get_material_for_node(Some(&missing)).name, DEFAULT);
        assert_eq!(library.get_material_for_node(None).name, DEFAULT);
    }
}
