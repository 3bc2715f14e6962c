//! OBJ room loading
//!
//! Builds a [`SceneGraph`] from an OBJ file: one mesh node per OBJ object,
//! named after the object so the classifier can read its markers. Each node's
//! pivot is moved to the centre of its bounds, which is where hover tweens
//! scale around. The triangulated surface is kept on the node for picking.

use std::path::Path;

use cgmath::Vector3;
use log::{debug, info, warn};

use crate::error::{DioramaError, Result};
use crate::gfx::picking::{Aabb, TriangleMesh};
use crate::gfx::scene::{SceneGraph, SceneNode, Transform};

/// Loads an OBJ room into a fresh scene graph
///
/// Nodes whose OBJ object references an MTL material keep that material's
/// name as their material id. Objects without vertices are skipped; fails
/// when nothing with geometry remains.
pub fn load_room(path: impl AsRef<Path>) -> Result<SceneGraph> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    let materials = materials.unwrap_or_else(|err| {
        warn!("No MTL materials for {}: {}", path.display(), err);
        Vec::new()
    });

    let root_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Scene".to_string());
    let mut graph = SceneGraph::new(&root_name);
    let root = graph.root();

    for (i, model) in models.iter().enumerate() {
        if model.mesh.positions.is_empty() {
            debug!("Skipping object {:?} without vertices", model.name);
            continue;
        }

        let name = if model.name.is_empty() {
            format!("object_{}", i)
        } else {
            model.name.clone()
        };

        let vertices: Vec<[f32; 3]> = model
            .mesh
            .positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        let bounds = Aabb::from_vertices(&vertices);
        let center: Vector3<f32> = bounds.center();

        let geometry = TriangleMesh::new(
            vertices
                .iter()
                .map(|v| Vector3::new(v[0], v[1], v[2]) - center)
                .collect(),
            model.mesh.indices.clone(),
        );

        let mut node = SceneNode::mesh(name, bounds.translated(-center))
            .with_geometry(geometry)
            .with_transform(Transform::from_position(center));

        if let Some(material) = model
            .mesh
            .material_id
            .and_then(|id| materials.get(id))
            .filter(|material| !material.name.is_empty())
        {
            node.set_material(material.name.clone());
        }

        graph.add_node(root, node);
    }

    let loaded = graph.len() - 1;
    if loaded == 0 {
        warn!("{} contains no objects with geometry", path.display());
        return Err(DioramaError::EmptyScene(path.display().to_string()));
    }

    info!("Loaded {} objects from {}", loaded, path.display());
    Ok(graph)
}
