//! Triangle geometry for surface-accurate picking

use cgmath::{InnerSpace, Vector3};

use super::Aabb;

// Below this the ray is treated as parallel to the triangle
const PARALLEL_EPSILON: f32 = 1e-9;

/// Indexed triangle list in node-local space
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    vertices: Vec<Vector3<f32>>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Every three indices form one triangle; a trailing partial triangle is ignored
    pub fn new(vertices: Vec<Vector3<f32>>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Closed box surface covering `bounds`, twelve triangles
    pub fn cuboid(bounds: &Aabb) -> Self {
        let (lo, hi) = (bounds.min, bounds.max);
        let vertices = vec![
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -z
            4, 5, 6, 4, 6, 7, // +z
            0, 1, 5, 0, 5, 4, // -y
            3, 7, 6, 3, 6, 2, // +y
            0, 4, 7, 0, 7, 3, // -x
            1, 2, 6, 1, 6, 5, // +x
        ];
        Self::new(vertices, indices)
    }

    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Nearest ray parameter `t` at which `origin + t * direction` meets a
    /// triangle, both faces counted
    ///
    /// `direction` does not need to be normalized; `t` is in its units.
    /// Triangles with out-of-range indices are skipped.
    pub fn intersect(&self, origin: Vector3<f32>, direction: Vector3<f32>) -> Option<f32> {
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let a = *self.vertices.get(tri[0] as usize)?;
                let b = *self.vertices.get(tri[1] as usize)?;
                let c = *self.vertices.get(tri[2] as usize)?;
                intersect_triangle(origin, direction, a, b, c)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Möller–Trumbore ray/triangle test
fn intersect_triangle(
    origin: Vector3<f32>,
    direction: Vector3<f32>,
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
