//! # Ray Casting
//!
//! Hit-testing of scene nodes from a pointer position. The pointer arrives in
//! normalized device coordinates, is unprojected through the camera into a
//! world-space ray, and the ray is tested against the surfaces of a set of
//! candidate nodes.
//!
//! ## How it works
//!
//! 1. **Pointer to Ray**: Unproject the NDC point on the far plane and shoot a ray from the eye
//! 2. **Broad Phase**: Reject candidates whose world-space bounds the ray misses
//! 3. **Narrow Phase**: Move the ray into node space and test each triangle of the node's
//!    [`TriangleMesh`]; nodes without triangles use their bounds as the surface
//! 4. **Ordering**: Sort hits by distance; equal distances keep candidate order
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::gfx::picking::Raycaster;
//! # use diorama::gfx::{camera::OrbitCamera, scene::SceneGraph};
//! # fn run(camera: &OrbitCamera, graph: &SceneGraph, targets: &[diorama::gfx::scene::NodeId]) {
//! let raycaster = Raycaster::from_camera((0.0, 0.0), camera);
//! if let Some(hit) = raycaster.intersect_nodes(graph, targets).first() {
//!     println!("Nearest node: {} at {}", hit.node, hit.distance);
//! }
//! # }
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4, Zero};

use crate::gfx::{
    camera::OrbitCamera,
    scene::{NodeId, SceneGraph},
};

pub mod triangle;

pub use triangle::TriangleMesh;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::new(first[0], first[1], first[2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    /// Same box moved by `offset`
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed_corners: Vec<[f32; 3]> = corners
            .iter()
            .map(|corner| {
                let transformed = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
                [
                    transformed.x / transformed.w,
                    transformed.y / transformed.w,
                    transformed.z / transformed.w,
                ]
            })
            .collect();

        Self::from_vertices(&transformed_corners)
    }
}

/// A ray hit against one scene node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: NodeId,
    /// Distance from the ray origin (the camera eye) to the hit
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Casts a pointer ray through the camera and hit-tests scene nodes
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    ray: Ray,
}

impl Raycaster {
    /// Builds the picking ray for a pointer in normalized device coordinates
    ///
    /// `ndc` is in `[-1, 1]` on both axes with +y pointing up.
    pub fn from_camera(ndc: (f32, f32), camera: &OrbitCamera) -> Self {
        let (ndc_x, ndc_y) = ndc;

        let inv_view_proj = camera
            .view_projection_matrix()
            .invert()
            .unwrap_or(Matrix4::from_scale(1.0));

        // Far plane in NDC
        let world_far = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far_3d = Vector3::new(
            world_far.x / world_far.w,
            world_far.y / world_far.w,
            world_far.z / world_far.w,
        );

        Self {
            ray: Ray::new(camera.eye, far_3d - camera.eye),
        }
    }

    pub fn from_ray(ray: Ray) -> Self {
        Self { ray }
    }

    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Hits against `targets`, nearest first
    ///
    /// Hits at equal distance keep the order of `targets` (stable sort).
    /// Nodes without mesh bounds are never hit.
    pub fn intersect_nodes(&self, graph: &SceneGraph, targets: &[NodeId]) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = targets
            .iter()
            .filter_map(|&node| {
                let distance = self.intersect_node(graph, node)?;
                Some(Intersection {
                    node,
                    distance,
                    point: self.ray.point_at(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Distance along the ray to the surface of `node`
    fn intersect_node(&self, graph: &SceneGraph, node: NodeId) -> Option<f32> {
        let bounds_hit = graph.world_bounds(node)?.intersect_ray(&self.ray)?;
        let Some(geometry) = graph.get(node)?.geometry() else {
            return Some(bounds_hit);
        };

        // The direction stays unnormalized in node space, so `t` is still the
        // world-space distance along the unit world ray.
        let to_local = graph.world_matrix(node).invert()?;
        let origin = to_local * self.ray.origin.extend(1.0);
        let direction = to_local * self.ray.direction.extend(0.0);
        geometry.intersect(origin.truncate() / origin.w, direction.truncate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{SceneNode, Transform};

    fn unit_box() -> Aabb {
        Aabb::new(Vector3::new(-0.5, -0.5, -0.5), Vector3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.center(), Vector3::zero());
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_camera_ray_points_through_center() {
        let camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let raycaster = Raycaster::from_camera((0.0, 0.0), &camera);
        let ray = raycaster.ray();

        assert!((ray.origin - Vector3::new(0.0, 0.0, 10.0)).magnitude() < 1e-4);
        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_intersections_sorted_nearest_first() {
        let mut graph = SceneGraph::new("root");
        let far = graph.add_node(
            graph.root(),
            SceneNode::mesh("far", unit_box())
                .with_transform(Transform::from_position(Vector3::new(0.0, 0.0, -3.0))),
        );
        let near = graph.add_node(graph.root(), SceneNode::mesh("near", unit_box()));
        let off = graph.add_node(
            graph.root(),
            SceneNode::mesh("off", unit_box())
                .with_transform(Transform::from_position(Vector3::new(5.0, 0.0, 0.0))),
        );

        let raycaster = Raycaster::from_ray(Ray::new(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::new(0.0, 0.0, -1.0),
        ));
        let hits = raycaster.intersect_nodes(&graph, &[far, near, off]);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].node, near);
        assert_eq!(hits[1].node, far);
        assert_eq!(hits[0].distance, 9.5);
    }

    #[test]
    fn test_equal_distance_keeps_candidate_order() {
        let mut graph = SceneGraph::new("root");
        let a = graph.add_node(graph.root(), SceneNode::mesh("a", unit_box()));
        let b = graph.add_node(graph.root(), SceneNode::mesh("b", unit_box()));

        let raycaster = Raycaster::from_ray(Ray::new(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::new(0.0, 0.0, -1.0),
        ));

        assert_eq!(raycaster.intersect_nodes(&graph, &[b, a])[0].node, b);
        assert_eq!(raycaster.intersect_nodes(&graph, &[a, b])[0].node, a);
    }

    #[test]
    fn test_surface_decides_nearest_not_bounds() {
        let mut graph = SceneGraph::new("root");
        let plank_bounds = Aabb::new(Vector3::new(-2.0, -0.05, -2.0), Vector3::new(2.0, 0.05, 2.0));
        let plank = graph.add_node(
            graph.root(),
            SceneNode::mesh("Shelf_Raycaster", plank_bounds)
                .with_geometry(TriangleMesh::cuboid(&plank_bounds))
                .with_transform(
                    Transform::default()
                        .with_rotation(Vector3::new(0.0, 0.0, std::f32::consts::FRAC_PI_4)),
                ),
        );
        let mug_bounds = Aabb::new(Vector3::new(-0.25, -0.25, -0.25), Vector3::new(0.25, 0.25, 0.25));
        let mug = graph.add_node(
            graph.root(),
            SceneNode::mesh("Mug_Raycaster_Hover", mug_bounds)
                .with_geometry(TriangleMesh::cuboid(&mug_bounds))
                .with_transform(Transform::from_position(Vector3::new(1.2, -1.2, -3.0))),
        );

        // Inside the plank's world bounds but well off its surface
        let raycaster = Raycaster::from_ray(Ray::new(
            Vector3::new(1.2, -1.2, 10.0),
            Vector3::new(0.0, 0.0, -1.0),
        ));
        assert!(graph
            .world_bounds(plank)
            .unwrap()
            .intersect_ray(raycaster.ray())
            .is_some());

        let hits = raycaster.intersect_nodes(&graph, &[plank, mug]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].node, mug);
        assert!((hits[0].distance - 12.75).abs() < 1e-4);
    }

    #[test]
    fn test_surface_hit_distance_is_world_space() {
        let mut graph = SceneGraph::new("root");
        let bounds = unit_box();
        let node = graph.add_node(
            graph.root(),
            SceneNode::mesh("scaled", bounds)
                .with_geometry(TriangleMesh::cuboid(&bounds))
                .with_transform(
                    Transform::from_position(Vector3::new(0.0, 0.0, 2.0))
                        .with_scale(Vector3::new(4.0, 4.0, 4.0)),
                ),
        );

        let raycaster = Raycaster::from_ray(Ray::new(
            Vector3::new(0.5, 0.5, 10.0),
            Vector3::new(0.0, 0.0, -1.0),
        ));
        let hits = raycaster.intersect_nodes(&graph, &[node]);

        // Front face at z = 2 + 0.5 * 4
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 4.0).abs() < 1e-4);
        assert!((hits[0].point.z - 4.0).abs() < 1e-4);
    }
}
