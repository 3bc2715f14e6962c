//! Ordered material rule table
//!
//! Each rule pairs a name marker with a category. Rules are evaluated in
//! table order and the first marker contained in a node name decides its
//! material. Special surfaces come before the texture groups, and texture
//! groups keep the order of [`RoomConfig::texture_groups`].

use crate::config::RoomConfig;
use crate::gfx::resources::material::{self, MaterialId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Water,
    Glass,
    Bubble,
    Screen,
    TextureGroup(String),
}

impl RuleCategory {
    pub fn material_id(&self) -> MaterialId {
        match self {
            RuleCategory::Water => material::WATER.to_string(),
            RuleCategory::Glass => material::GLASS.to_string(),
            RuleCategory::Bubble => material::BUBBLE.to_string(),
            RuleCategory::Screen => material::SCREEN.to_string(),
            RuleCategory::TextureGroup(key) => material::textured_id(key),
        }
    }

    pub fn is_texture_group(&self) -> bool {
        matches!(self, RuleCategory::TextureGroup(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRule {
    pub marker: String,
    pub category: RuleCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<MaterialRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<MaterialRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &RoomConfig) -> Self {
        let markers = &config.markers;
        let mut rules = vec![
            MaterialRule {
                marker: markers.water.clone(),
                category: RuleCategory::Water,
            },
            MaterialRule {
                marker: markers.glass.clone(),
                category: RuleCategory::Glass,
            },
            MaterialRule {
                marker: markers.bubble.clone(),
                category: RuleCategory::Bubble,
            },
            MaterialRule {
                marker: markers.screen.clone(),
                category: RuleCategory::Screen,
            },
        ];
        rules.extend(config.texture_groups.iter().map(|group| MaterialRule {
            marker: group.key.clone(),
            category: RuleCategory::TextureGroup(group.key.clone()),
        }));

        Self { rules }
    }

    /// First rule whose marker `name` contains
    pub fn evaluate(&self, name: &str) -> Option<&RuleCategory> {
        self.rules
            .iter()
            .find(|rule| name.contains(rule.marker.as_str()))
            .map(|rule| &rule.category)
    }
}
