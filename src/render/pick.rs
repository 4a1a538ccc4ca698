//! Panel picking.
//!
//! Casts a camera ray against every addressable panel and reports the
//! nearest hit. Panels are identified by the id they were tagged with at
//! build time; when several bounding solids overlap along the ray the
//! smallest intersection distance wins.

use crate::vehicle::{primitives::SurfaceMesh, VehicleRig};
use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// The ray carried into another coordinate space.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            dir: matrix.transform_vector3(self.dir).normalize_or_zero(),
        }
    }
}

/// Result of a pick: which panel, and how far along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelHit<'a> {
    pub panel_id: &'a str,
    pub distance: f32,
}

/// Möller–Trumbore ray/triangle intersection. Returns the hit distance, or
/// `None` for misses and parallel rays. Both triangle sides count: panels
/// are closed solids, so culling would only hide legitimate front hits on
/// mirrored winding.
fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;
    let edge1 = b - a;
    let edge2 = c - a;
    let h = ray.dir.cross(edge2);
    let det = edge1.dot(h);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(h) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

fn ray_mesh(ray: &Ray, mesh: &SurfaceMesh) -> Option<f32> {
    let mut nearest: Option<f32> = None;
    for triangle in mesh.indices.chunks_exact(3) {
        let a = mesh.positions[triangle[0] as usize];
        let b = mesh.positions[triangle[1] as usize];
        let c = mesh.positions[triangle[2] as usize];
        if let Some(t) = ray_triangle(ray, a, b, c) {
            if nearest.map_or(true, |best| t < best) {
                nearest = Some(t);
            }
        }
    }
    nearest
}

/// Find the nearest addressable panel under a world-space ray. `spin` is the
/// vehicle's current yaw; the ray is rotated into model space so picking
/// stays consistent while the vehicle auto-rotates.
pub fn pick_panel<'a>(rig: &'a VehicleRig, ray: &Ray, spin: f32) -> Option<PanelHit<'a>> {
    let to_model = Mat4::from_rotation_y(-spin);
    let model_ray = ray.transformed(&to_model);
    let mut best: Option<PanelHit<'a>> = None;
    for panel in rig.panels() {
        if let Some(distance) = ray_mesh(&model_ray, &panel.mesh) {
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(PanelHit {
                    panel_id: panel.id,
                    distance,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{build_vehicle, VehicleCategory};

    fn down_ray(x: f32, z: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, 10.0, z),
            dir: -Vec3::Y,
        }
    }

    #[test]
    fn triangle_hit_and_miss() {
        let ray = Ray {
            origin: Vec3::new(0.2, 0.2, -1.0),
            dir: Vec3::Z,
        };
        let t = ray_triangle(&ray, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!((t.unwrap() - 1.0).abs() < 1e-5);
        let miss = Ray {
            origin: Vec3::new(2.0, 2.0, -1.0),
            dir: Vec3::Z,
        };
        assert!(ray_triangle(&miss, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn straight_down_over_the_cabin_hits_the_roof() {
        let rig = build_vehicle(VehicleCategory::Sedan);
        let hit = pick_panel(&rig, &down_ray(0.0, 0.3), 0.0).unwrap();
        assert_eq!(hit.panel_id, "roof");
    }

    #[test]
    fn nearest_panel_wins_along_the_ray() {
        let rig = build_vehicle(VehicleCategory::Sedan);
        // Over the hood the ray passes the hood first, then the body sides.
        let hit = pick_panel(&rig, &down_ray(0.3, -1.2), 0.0).unwrap();
        assert_eq!(hit.panel_id, "hood");
    }

    #[test]
    fn empty_space_misses() {
        let rig = build_vehicle(VehicleCategory::Sedan);
        assert!(pick_panel(&rig, &down_ray(8.0, 8.0), 0.0).is_none());
    }

    #[test]
    fn spin_rotates_the_pick_space() {
        let rig = build_vehicle(VehicleCategory::Sedan);
        // The sedan nose sits at -Z. After a half turn it faces +Z, so a ray
        // above +Z territory over the hood region must hit the hood.
        let hit = pick_panel(&rig, &down_ray(0.0, 1.2), std::f32::consts::PI).unwrap();
        assert_eq!(hit.panel_id, "hood");
    }

    #[test]
    fn wheels_and_glass_are_not_pickable() {
        let rig = build_vehicle(VehicleCategory::Sedan);
        // A ray through a wheel center, below the body's lower face.
        let ray = Ray {
            origin: Vec3::new(-5.0, 0.1, -1.4),
            dir: Vec3::X,
        };
        // Whatever it hits must be an addressable panel, never trim.
        if let Some(hit) = pick_panel(&rig, &ray, 0.0) {
            assert!(rig.contains(hit.panel_id));
        }
    }
}
