//! Orbit camera around the vehicle.
//!
//! Yaw is unbounded, pitch and distance are clamped to fixed ranges so the
//! camera can neither flip over the vehicle nor clip through it.

use crate::render::pick::Ray;
use glam::{Mat4, Vec3, Vec4};

pub const PITCH_MIN: f32 = 0.08;
pub const PITCH_MAX: f32 = 1.35;
pub const DISTANCE_MIN: f32 = 3.0;
pub const DISTANCE_MAX: f32 = 18.0;

const FOV_Y: f32 = 40.0 * std::f32::consts::PI / 180.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 120.0;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
    aspect: f32,
}

impl OrbitCamera {
    /// Camera framing the given bounds, looking slightly down from the
    /// front-left quarter.
    pub fn framing(center: Vec3, extent: Vec3) -> Self {
        let radius = extent.x.max(extent.y).max(extent.z);
        let distance = if radius > 0.0 { radius * 2.6 } else { 6.0 };
        Self {
            yaw: -0.7,
            pitch: 0.42,
            distance: distance.clamp(DISTANCE_MIN, DISTANCE_MAX),
            target: center,
            aspect: 16.0 / 9.0,
        }
    }

    /// Re-aim at new bounds without losing the user's orientation.
    pub fn reframe(&mut self, center: Vec3, extent: Vec3) {
        let radius = extent.x.max(extent.y).max(extent.z);
        let distance = if radius > 0.0 { radius * 2.6 } else { 6.0 };
        self.target = center;
        self.distance = distance.clamp(DISTANCE_MIN, DISTANCE_MAX);
    }

    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(PITCH_MIN, PITCH_MAX);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(DISTANCE_MIN, DISTANCE_MAX);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn eye(&self) -> Vec3 {
        let cos_pitch = self.pitch.cos();
        let offset = Vec3::new(
            self.yaw.cos() * cos_pitch,
            self.pitch.sin(),
            self.yaw.sin() * cos_pitch,
        ) * self.distance;
        self.target + offset
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y, self.aspect, Z_NEAR, Z_FAR)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// World-space ray through a framebuffer pixel (origin top-left).
    pub fn screen_ray(&self, px: f32, py: f32, width: u32, height: u32) -> Ray {
        let ndc_x = px / width.max(1) as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - py / height.max(1) as f32 * 2.0;
        let inverse = self.view_projection().inverse();
        let near = inverse * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Ray {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_and_distance_stay_clamped() {
        let mut camera = OrbitCamera::framing(Vec3::ZERO, Vec3::splat(2.0));
        camera.orbit(0.0, 10.0);
        assert!((camera.pitch - PITCH_MAX).abs() < 1e-6);
        camera.orbit(0.0, -20.0);
        assert!((camera.pitch - PITCH_MIN).abs() < 1e-6);
        camera.zoom(100.0);
        assert!((camera.distance - DISTANCE_MAX).abs() < 1e-6);
        camera.zoom(-100.0);
        assert!((camera.distance - DISTANCE_MIN).abs() < 1e-6);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut camera = OrbitCamera::framing(Vec3::ZERO, Vec3::splat(2.0));
        camera.orbit(100.0, 0.0);
        assert!(camera.yaw > 90.0);
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = OrbitCamera::framing(Vec3::new(0.0, 0.7, 0.0), Vec3::splat(2.0));
        let ray = camera.screen_ray(400.0, 300.0, 800, 600);
        let to_target = (camera.target - ray.origin).normalize();
        assert!(ray.dir.dot(to_target) > 0.999, "dir {:?}", ray.dir);
    }

    #[test]
    fn corner_rays_diverge() {
        let camera = OrbitCamera::framing(Vec3::ZERO, Vec3::splat(2.0));
        let a = camera.screen_ray(0.0, 0.0, 800, 600);
        let b = camera.screen_ray(800.0, 600.0, 800, 600);
        assert!(a.dir.dot(b.dir) < 0.999);
    }
}
