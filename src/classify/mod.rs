//! # Scene Classification
//!
//! One-time pass over a freshly loaded [`SceneGraph`] that sorts mesh nodes
//! into behaviour groups by the markers in their names.
//!
//! For every mesh node, in depth-first order:
//!
//! 1. The [`RuleTable`] picks at most one material (first matching rule wins).
//!    Nodes matching no rule keep their loader material.
//! 2. Nodes in a texture group whose name carries the fan marker and an index
//!    in one of the fan partitions join that partition's [`FanGroup`].
//! 3. Independently of the material, raycast-marked nodes join the
//!    [`RaycastSet`], hover-marked nodes get a [`HoverBaseline`] and
//!    pointer-marked nodes are remembered for cursor feedback.

pub mod groups;
pub mod rules;

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::config::{FanConfig, Markers, RoomConfig};
use crate::gfx::scene::{NodeId, SceneGraph};

pub use groups::{FanGroup, FanGroups, FanSlot, HoverBaseline, HoverBaselines, RaycastSet};
pub use rules::{MaterialRule, RuleCategory, RuleTable};

/// Everything classification learned about a scene
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Material rule chosen per node; unmatched nodes are absent
    pub categories: BTreeMap<NodeId, RuleCategory>,
    pub raycast_set: RaycastSet,
    pub fan_groups: FanGroups,
    pub baselines: HoverBaselines,
    pub pointer_nodes: HashSet<NodeId>,
}

impl Classification {
    pub fn category_of(&self, node: NodeId) -> Option<&RuleCategory> {
        self.categories.get(&node)
    }

    pub fn is_hoverable(&self, node: NodeId) -> bool {
        self.baselines.contains(node)
    }
}

pub struct Classifier {
    rules: RuleTable,
    markers: Markers,
    fans: FanConfig,
}

impl Classifier {
    pub fn new(config: &RoomConfig) -> Self {
        Self {
            rules: RuleTable::from_config(config),
            markers: config.markers.clone(),
            fans: config.fans.clone(),
        }
    }

    /// Classifies every mesh node and assigns its material
    ///
    /// Transforms are only read, never written.
    pub fn classify(&self, graph: &mut SceneGraph) -> Classification {
        let mut classification = Classification {
            categories: BTreeMap::new(),
            raycast_set: RaycastSet::new(),
            fan_groups: FanGroups::new(self.fans.primary.axis, self.fans.secondary.axis),
            baselines: HoverBaselines::new(),
            pointer_nodes: HashSet::new(),
        };

        for id in graph.mesh_nodes() {
            let node = &mut graph[id];
            let name = node.name().to_string();

            if let Some(category) = self.rules.evaluate(&name) {
                node.set_material(category.material_id());

                if category.is_texture_group() {
                    if let Some(slot) = self.fan_slot(&name) {
                        classification.fan_groups.push(slot, id);
                    }
                }

                classification.categories.insert(id, category.clone());
            }

            if name.contains(self.markers.hover.as_str()) {
                classification.baselines.capture(id, &node.transform);
            }
            if name.contains(self.markers.raycast.as_str()) {
                classification.raycast_set.insert(id);
            }
            if name.contains(self.markers.pointer.as_str()) {
                classification.pointer_nodes.insert(id);
            }
        }

        debug!(
            "Classified {} nodes: {} raycast targets, {} hoverable, {} fans",
            classification.categories.len(),
            classification.raycast_set.len(),
            classification.baselines.len(),
            classification.fan_groups.len()
        );

        classification
    }

    /// Partition of a fan-marked name, by its exact numeric suffix
    fn fan_slot(&self, name: &str) -> Option<FanSlot> {
        let index = fan_index(name, &self.markers.fan)?;
        if self.fans.primary.contains(index) {
            Some(FanSlot::Primary)
        } else if self.fans.secondary.contains(index) {
            Some(FanSlot::Secondary)
        } else {
            None
        }
    }
}

/// Number written directly after an occurrence of `marker` in `name`
///
/// Occurrences are scanned left to right and the first one followed by digits
/// wins: `"Cooler12_First"` gives 12 and `"Cooler_Cooler3"` gives 3. A name
/// with no such occurrence gives `None`.
pub fn fan_index(name: &str, marker: &str) -> Option<u32> {
    name.match_indices(marker).find_map(|(start, _)| {
        let rest = &name[start + marker.len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..end].parse().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::Aabb;
    use crate::gfx::resources::material;
    use crate::gfx::scene::{Axis, SceneNode, Transform};
    use cgmath::Vector3;
    use rand::seq::SliceRandom;

    fn unit_box() -> Aabb {
        Aabb::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5))
    }

    fn graph_of(names: &[&str]) -> SceneGraph {
        let mut graph = SceneGraph::new("Scene");
        let root = graph.root();
        for name in names {
            graph.add_node(root, SceneNode::mesh(*name, unit_box()));
        }
        graph
    }

    fn classify(graph: &mut SceneGraph) -> Classification {
        Classifier::new(&RoomConfig::default()).classify(graph)
    }

    const ROOM: &[&str] = &[
        "Water_Tank",
        "Glass_Window_First",
        "Bubble_01",
        "Screen_Monitor",
        "Desk_First",
        "Cooler1_Second",
        "Cooler3_Third",
        "Cooler10_Third",
        "Steam_Logo_Fourth_Raycaster_Hover_Pointer",
        "Chair_Second_Raycaster",
        "Floor",
    ];

    #[test]
    fn test_fan_index_parsing() {
        assert_eq!(fan_index("Cooler3_First", "Cooler"), Some(3));
        assert_eq!(fan_index("PC_Cooler12", "Cooler"), Some(12));
        assert_eq!(fan_index("Cooler_First", "Cooler"), None);
        assert_eq!(fan_index("Fan_First", "Cooler"), None);
        assert_eq!(fan_index("Cooler_Cooler3_First", "Cooler"), Some(3));
        assert_eq!(fan_index("Cooler7_Cooler3", "Cooler"), Some(7));
    }

    #[test]
    fn test_materials_assigned_by_rule_priority() {
        let mut graph = graph_of(ROOM);
        let result = classify(&mut graph);

        let material_of = |name: &str| {
            let id = graph.find_by_name(name).unwrap();
            graph[id].material().cloned()
        };

        assert_eq!(material_of("Water_Tank").as_deref(), Some(material::WATER));
        assert_eq!(material_of("Glass_Window_First").as_deref(), Some(material::GLASS));
        assert_eq!(material_of("Bubble_01").as_deref(), Some(material::BUBBLE));
        assert_eq!(material_of("Screen_Monitor").as_deref(), Some(material::SCREEN));
        assert_eq!(material_of("Desk_First"), Some(material::textured_id("First")));
        assert_eq!(material_of("Floor"), None);

        let floor = graph.find_by_name("Floor").unwrap();
        assert!(result.category_of(floor).is_none());
    }

    #[test]
    fn test_fan_partitions() {
        let mut graph = graph_of(ROOM);
        let result = classify(&mut graph);

        let cooler1 = graph.find_by_name("Cooler1_Second").unwrap();
        let cooler3 = graph.find_by_name("Cooler3_Third").unwrap();
        let cooler10 = graph.find_by_name("Cooler10_Third").unwrap();

        assert_eq!(result.fan_groups.primary.members, vec![cooler1]);
        assert_eq!(result.fan_groups.secondary.members, vec![cooler3]);
        assert_eq!(result.fan_groups.axis_of(cooler1), Some(Axis::Z));
        assert_eq!(result.fan_groups.axis_of(cooler3), Some(Axis::X));
        assert_eq!(result.fan_groups.axis_of(cooler10), None);
    }

    #[test]
    fn test_fan_marker_repeated_in_name() {
        let mut graph = graph_of(&["Cooler_Cooler3_First"]);
        let result = classify(&mut graph);
        let fan = graph.find_by_name("Cooler_Cooler3_First").unwrap();
        assert_eq!(result.fan_groups.axis_of(fan), Some(Axis::X));
    }

    #[test]
    fn test_fans_only_join_from_texture_groups() {
        let mut graph = graph_of(&["Cooler1_Glass", "Cooler2"]);
        let result = classify(&mut graph);
        assert!(result.fan_groups.is_empty());
    }

    #[test]
    fn test_fan_matching_two_texture_keys_joins_once() {
        let mut graph = graph_of(&["Cooler4_First_Second"]);
        let result = classify(&mut graph);
        assert_eq!(result.fan_groups.len(), 1);
    }

    #[test]
    fn test_tagging_is_independent_of_material() {
        let mut graph = graph_of(ROOM);
        let result = classify(&mut graph);

        let steam = graph
            .find_by_name("Steam_Logo_Fourth_Raycaster_Hover_Pointer")
            .unwrap();
        let chair = graph.find_by_name("Chair_Second_Raycaster").unwrap();

        assert_eq!(result.raycast_set.as_slice(), &[steam, chair]);
        assert!(result.is_hoverable(steam));
        assert!(!result.is_hoverable(chair));
        assert!(result.pointer_nodes.contains(&steam));
        assert!(!result.pointer_nodes.contains(&chair));
    }

    #[test]
    fn test_baseline_captures_loaded_transform() {
        let mut graph = SceneGraph::new("Scene");
        let transform = Transform::from_position(Vector3::new(1.0, 2.0, 3.0))
            .with_scale(Vector3::new(0.5, 0.5, 0.5));
        let id = graph.add_node(
            graph.root(),
            SceneNode::mesh("Book_Hover_First", unit_box()).with_transform(transform),
        );

        let result = classify(&mut graph);
        let baseline = result.baselines.get(id).unwrap();
        assert_eq!(baseline.position, transform.position);
        assert_eq!(baseline.scale, transform.scale);
        assert_eq!(graph[id].transform, transform);
    }

    #[test]
    fn test_group_nodes_are_skipped() {
        let mut graph = SceneGraph::new("Scene");
        let group = graph.add_node(graph.root(), SceneNode::group("Water_Raycaster_Hover"));
        let result = classify(&mut graph);

        assert!(result.raycast_set.is_empty());
        assert!(!result.is_hoverable(group));
        assert!(graph[group].material().is_none());
    }

    #[test]
    fn test_raycast_set_independent_of_traversal_order() {
        let mut rng = rand::rng();
        let mut names: Vec<String> = (0..20).map(|i| format!("Item{i}_Raycaster")).collect();

        for _ in 0..5 {
            names.shuffle(&mut rng);
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut graph = graph_of(&refs);
            let result = classify(&mut graph);

            assert_eq!(result.raycast_set.len(), names.len());
            for id in graph.mesh_nodes() {
                let count = result
                    .raycast_set
                    .as_slice()
                    .iter()
                    .filter(|n| **n == id)
                    .count();
                assert_eq!(count, 1);
            }
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let mut first = graph_of(ROOM);
        let mut second = graph_of(ROOM);

        assert_eq!(classify(&mut first), classify(&mut second));
        for (a, b) in first.traverse().into_iter().zip(second.traverse()) {
            assert_eq!(first[a].material(), second[b].material());
        }
    }
}
