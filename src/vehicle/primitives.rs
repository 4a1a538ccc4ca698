//! Hard-edged mesh primitives the vehicle builders are assembled from.
//!
//! Every face gets its own four vertices so normals stay flat; the bodies are
//! deliberately angular rather than smooth-interpolated.

#![allow(dead_code)]

use glam::Vec3;

/// Triangle mesh with flat per-face normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some((min, max))
    }

    /// One quad, CCW seen from outside. The normal comes from the winding.
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        let base = self.positions.len() as u32;
        let normal = (b - a).cross(c - a).normalize_or_zero();
        self.positions.extend([a, b, c, d]);
        self.normals.extend([normal; 4]);
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Axis-aligned box between `min` and `max`.
    pub fn push_box(&mut self, min: Vec3, max: Vec3) {
        self.push_hexahedron(box_corners(min, max));
    }

    /// Arbitrary 8-corner solid. Corner order matches [`box_corners`]:
    /// 0-3 run counter-clockwise on the front (-Z) face starting at
    /// (min x, min y), 4-7 are the same corners on the back (+Z) face.
    /// Callers keep each face planar (slope whole edges, not single corners).
    pub fn push_hexahedron(&mut self, c: [Vec3; 8]) {
        self.push_quad(c[1], c[0], c[3], c[2]); // front  (-Z)
        self.push_quad(c[4], c[5], c[6], c[7]); // back   (+Z)
        self.push_quad(c[0], c[4], c[7], c[3]); // left   (-X)
        self.push_quad(c[5], c[1], c[2], c[6]); // right  (+X)
        self.push_quad(c[3], c[7], c[6], c[2]); // top    (+Y)
        self.push_quad(c[0], c[1], c[5], c[4]); // bottom (-Y)
    }

    /// Cylinder with its axis along X, for wheels.
    pub fn push_cylinder(&mut self, center: Vec3, radius: f32, half_width: f32, segments: u32) {
        let segments = segments.max(3);
        let left = center - Vec3::X * half_width;
        let right = center + Vec3::X * half_width;
        for i in 0..segments {
            let a0 = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let a1 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;
            let r0 = Vec3::new(0.0, a0.cos(), a0.sin()) * radius;
            let r1 = Vec3::new(0.0, a1.cos(), a1.sin()) * radius;

            // Side band.
            self.push_quad(left + r0, left + r1, right + r1, right + r0);

            // Caps as triangle fans, one triangle per segment.
            let base = self.positions.len() as u32;
            self.positions.extend([left, left + r1, left + r0]);
            self.normals.extend([-Vec3::X; 3]);
            self.indices.extend([base, base + 1, base + 2]);

            let base = self.positions.len() as u32;
            self.positions.extend([right, right + r0, right + r1]);
            self.normals.extend([Vec3::X; 3]);
            self.indices.extend([base, base + 1, base + 2]);
        }
    }

    /// Append `other`, keeping indices consistent.
    pub fn extend_from(&mut self, other: &SurfaceMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|index| index + base));
    }
}

/// Corners of an axis-aligned box in the order [`SurfaceMesh::push_hexahedron`]
/// expects.
pub fn box_corners(min: Vec3, max: Vec3) -> [Vec3; 8] {
    [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_six_flat_faces() {
        let mut mesh = SurfaceMesh::new();
        mesh.push_box(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for normal in &mesh.normals {
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::splat(-1.0));
        assert_eq!(max, Vec3::splat(1.0));
    }

    #[test]
    fn box_normals_point_outward() {
        let mut mesh = SurfaceMesh::new();
        mesh.push_box(Vec3::splat(-1.0), Vec3::splat(1.0));
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            // For a cube centered at the origin every face normal points
            // away from the center.
            assert!(position.dot(*normal) > 0.0);
        }
    }

    #[test]
    fn cylinder_bounds_match_radius() {
        let mut mesh = SurfaceMesh::new();
        mesh.push_cylinder(Vec3::new(1.0, 0.5, 0.0), 0.5, 0.2, 16);
        let (min, max) = mesh.bounds().unwrap();
        assert!((min.x - 0.8).abs() < 1e-5);
        assert!((max.x - 1.2).abs() < 1e-5);
        assert!((max.y - 1.0).abs() < 1e-2);
        assert!(min.y > -0.01);
    }

    #[test]
    fn extend_from_offsets_indices() {
        let mut a = SurfaceMesh::new();
        a.push_box(Vec3::ZERO, Vec3::ONE);
        let mut b = SurfaceMesh::new();
        b.push_box(Vec3::splat(2.0), Vec3::splat(3.0));
        let verts_a = a.positions.len() as u32;
        a.extend_from(&b);
        assert_eq!(a.triangle_count(), 24);
        assert!(a.indices[36..].iter().all(|index| *index >= verts_a));
    }
}
