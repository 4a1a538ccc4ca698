//! Scene composition and the per-frame render path.
//!
//! Owns the framebuffer, the three-point light rig, the baked gradient
//! environment and the ground plane, and turns a vehicle rig plus per-panel
//! shading into finished frames. Still captures are taken from the same
//! framebuffer the viewport shows.

#![allow(dead_code)]

pub mod camera;
pub mod pick;
pub mod raster;
pub mod shading;

pub use camera::OrbitCamera;
pub use pick::{pick_panel, PanelHit, Ray};
pub use shading::SurfaceShading;

use crate::vehicle::VehicleRig;
use base64::Engine as _;
use glam::{Mat4, Vec3};
use image::RgbaImage;
use raster::Framebuffer;
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("PNG encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// A finished still frame.
pub struct Capture {
    image: RgbaImage,
}

impl Capture {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>, CaptureError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// `data:image/png;base64,…` form for hosts that embed the capture.
    pub fn data_uri(&self) -> Result<String, CaptureError> {
        let bytes = self.png_bytes()?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(format!("data:image/png;base64,{encoded}"))
    }
}

/// Externally supplied 2D concept image projected onto body panels.
pub struct MockupTexture {
    image: RgbaImage,
}

impl MockupTexture {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Planar projection along the surface's dominant normal axis,
    /// normalized into the vehicle bounds. Returns linear RGB.
    pub fn sample(&self, position: Vec3, normal: Vec3, center: Vec3, extent: Vec3) -> Vec3 {
        let extent = extent.max(Vec3::splat(1e-3));
        let local = (position - center) / extent; // -1..1 per axis
        let (u, v) = if normal.x.abs() >= normal.y.abs() && normal.x.abs() >= normal.z.abs() {
            (local.z * normal.x.signum(), local.y)
        } else if normal.y.abs() >= normal.z.abs() {
            (local.x, local.z)
        } else {
            (-local.x * normal.z.signum(), local.y)
        };
        let tx = ((u * 0.5 + 0.5) * (self.image.width() - 1) as f32)
            .clamp(0.0, (self.image.width() - 1) as f32) as u32;
        let ty = ((0.5 - v * 0.5) * (self.image.height() - 1) as f32)
            .clamp(0.0, (self.image.height() - 1) as f32) as u32;
        let pixel = self.image.get_pixel(tx, ty);
        Vec3::new(
            srgb_to_linear(pixel[0]),
            srgb_to_linear(pixel[1]),
            srgb_to_linear(pixel[2]),
        )
    }
}

fn srgb_to_linear(byte: u8) -> f32 {
    (byte as f32 / 255.0).powf(2.2)
}

#[derive(Debug, Clone, Copy)]
struct DirectionalLight {
    /// Direction the light travels, normalized.
    dir: Vec3,
    color: Vec3,
}

/// Gradient sky/ground reflection model, baked once at startup.
#[derive(Debug, Clone, Copy)]
struct Environment {
    zenith: Vec3,
    horizon: Vec3,
    ground: Vec3,
}

impl Environment {
    fn studio() -> Self {
        Self {
            zenith: Vec3::new(0.5, 0.62, 0.78),
            horizon: Vec3::new(0.85, 0.88, 0.9),
            ground: Vec3::new(0.18, 0.17, 0.16),
        }
    }

    fn sample(&self, dir: Vec3) -> Vec3 {
        if dir.y >= 0.0 {
            self.horizon.lerp(self.zenith, dir.y.clamp(0.0, 1.0).powf(0.6))
        } else {
            self.horizon.lerp(self.ground, (-dir.y).clamp(0.0, 1.0).powf(0.4))
        }
    }
}

const GROUND_HALF_SIZE: f32 = 24.0;
const GROUND_ALBEDO: Vec3 = Vec3::new(0.23, 0.23, 0.24);
const HEMI_SKY: Vec3 = Vec3::new(0.4, 0.43, 0.48);
const HEMI_GROUND: Vec3 = Vec3::new(0.13, 0.12, 0.11);

pub struct SceneRenderer {
    fb: Framebuffer,
    lights: [DirectionalLight; 3],
    env: Environment,
    frames_rendered: u64,
}

impl SceneRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        log::info!("Scene renderer initialized ({width}×{height})");
        Self {
            fb: Framebuffer::new(width, height),
            lights: [
                // Key, fill, rim.
                DirectionalLight {
                    dir: Vec3::new(-0.5, -1.0, -0.45).normalize(),
                    color: Vec3::new(1.0, 0.98, 0.94) * 2.1,
                },
                DirectionalLight {
                    dir: Vec3::new(0.75, -0.35, 0.2).normalize(),
                    color: Vec3::new(0.35, 0.38, 0.45) * 0.9,
                },
                DirectionalLight {
                    dir: Vec3::new(0.15, -0.25, 0.95).normalize(),
                    color: Vec3::new(0.5, 0.5, 0.55) * 0.8,
                },
            ],
            env: Environment::studio(),
            frames_rendered: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.fb.width()
    }

    pub fn height(&self) -> u32 {
        self.fb.height()
    }

    /// Match the framebuffer to the host viewport. Idempotent for repeated
    /// calls with the same size; the current frame content is discarded on
    /// an actual change.
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.fb.width() && height == self.fb.height() {
            return;
        }
        self.fb = Framebuffer::new(width, height);
        log::debug!("Framebuffer resized to {width}×{height}");
    }

    /// Render one frame. `shadings` runs parallel to `rig.panels()`; `spin`
    /// is the vehicle yaw in radians.
    pub fn render(
        &mut self,
        rig: &VehicleRig,
        shadings: &[SurfaceShading],
        camera: &OrbitCamera,
        spin: f32,
        mockup: Option<&MockupTexture>,
    ) {
        debug_assert_eq!(shadings.len(), rig.panels().len());
        let view_proj = camera.view_projection();
        let eye = camera.eye();
        let model = Mat4::from_rotation_y(spin);
        let to_model = Mat4::from_rotation_y(-spin);

        self.fb
            .clear(self.env.zenith * 0.85, self.env.horizon * 0.65);

        self.draw_ground(rig, &view_proj, &to_model);

        for trim in rig.trim() {
            let shading = SurfaceShading::trim(trim.tint, trim.roughness);
            let lights = self.lights;
            let env = self.env;
            raster::draw_mesh(&mut self.fb, &trim.mesh, &model, &view_proj, |world, normal| {
                (shade_surface(&shading, world, normal, eye, &lights, &env, None), 1.0)
            });
        }

        let center = rig.center();
        let extent = rig.extent();
        for (panel, shading) in rig.panels().iter().zip(shadings) {
            let lights = self.lights;
            let env = self.env;
            let textured = mockup.filter(|_| panel.accepts_mockup);
            raster::draw_mesh(&mut self.fb, &panel.mesh, &model, &view_proj, |world, normal| {
                let base_override = textured.map(|texture| {
                    let local = to_model.transform_point3(world);
                    let local_normal = to_model.transform_vector3(normal);
                    texture.sample(local, local_normal, center, extent)
                });
                let film = shade_surface(shading, world, normal, eye, &lights, &env, base_override);
                // Translucent film (PPF) reads as a coat over the existing
                // paint, so composite against the neutral body right here
                // instead of blending geometry.
                let rgb = if shading.opacity < 1.0 {
                    let under = SurfaceShading {
                        emissive: shading.emissive,
                        ..SurfaceShading::neutral()
                    };
                    let paint =
                        shade_surface(&under, world, normal, eye, &lights, &env, base_override);
                    paint.lerp(film, shading.opacity)
                } else {
                    film
                };
                (rgb, 1.0)
            });
        }

        self.frames_rendered += 1;
    }

    fn draw_ground(&mut self, rig: &VehicleRig, view_proj: &Mat4, to_model: &Mat4) {
        let mut quad = crate::vehicle::primitives::SurfaceMesh::new();
        quad.push_quad(
            Vec3::new(-GROUND_HALF_SIZE, 0.0, GROUND_HALF_SIZE),
            Vec3::new(GROUND_HALF_SIZE, 0.0, GROUND_HALF_SIZE),
            Vec3::new(GROUND_HALF_SIZE, 0.0, -GROUND_HALF_SIZE),
            Vec3::new(-GROUND_HALF_SIZE, 0.0, -GROUND_HALF_SIZE),
        );
        let shadow_extent = rig.extent().max(Vec3::splat(0.5)) * 1.15;
        let key = self.lights[0];
        let env = self.env;
        let to_model = *to_model;
        raster::draw_mesh(&mut self.fb, &quad, &Mat4::IDENTITY, view_proj, |world, normal| {
            let n_dot_l = normal.dot(-key.dir).max(0.0);
            let mut rgb = GROUND_ALBEDO * (env.ground * 0.6 + key.color * n_dot_l * 0.35);
            // Soft elliptical contact shadow under the footprint.
            let local = to_model.transform_point3(world);
            let d = (local.x / shadow_extent.x).powi(2) + (local.z / shadow_extent.z).powi(2);
            rgb *= 0.3 + 0.7 * smoothstep(0.4, 1.35, d);
            (rgb, 1.0)
        });
    }

    /// The current frame as 8-bit RGBA for display.
    pub fn frame_rgba(&self) -> Vec<u8> {
        self.fb.to_rgba_bytes()
    }

    /// Still capture of the last rendered frame, or `None` if no frame has
    /// completed yet.
    pub fn capture(&self) -> Option<Capture> {
        if self.frames_rendered == 0 {
            return None;
        }
        let bytes = self.fb.to_rgba_bytes();
        RgbaImage::from_raw(self.fb.width(), self.fb.height(), bytes)
            .map(|image| Capture { image })
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

fn smoothstep(lower: f32, upper: f32, value: f32) -> f32 {
    let t = ((value - lower) / (upper - lower)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Per-fragment lighting shared by panels and trim.
fn shade_surface(
    shading: &SurfaceShading,
    world: Vec3,
    normal: Vec3,
    eye: Vec3,
    lights: &[DirectionalLight; 3],
    env: &Environment,
    base_override: Option<Vec3>,
) -> Vec3 {
    let view = (eye - world).normalize_or_zero();
    let n_dot_v = normal.dot(view).max(0.0);

    let mut base = shading.base_color;
    if let Some(shift) = shading.shift_color {
        // Iridescence: fade to the second color at grazing angles.
        base = base.lerp(shift, (1.0 - n_dot_v).powi(2));
    }
    if let Some(texture_color) = base_override {
        base = texture_color;
    }

    let f0 = Vec3::splat(0.04).lerp(base, shading.metalness);
    let diffuse_albedo = base * (1.0 - shading.metalness);
    let shininess = 4.0 + (1.0 - shading.roughness).powi(2) * 380.0;

    let mut out = Vec3::ZERO;
    for light in lights {
        let to_light = -light.dir;
        let n_dot_l = normal.dot(to_light).max(0.0);
        if n_dot_l <= 0.0 {
            continue;
        }
        let half = (to_light + view).normalize_or_zero();
        let spec = normal.dot(half).max(0.0).powf(shininess);
        out += light.color * n_dot_l * (diffuse_albedo + f0 * spec);
    }

    // Hemisphere fill.
    let hemi = HEMI_GROUND.lerp(HEMI_SKY, normal.y * 0.5 + 0.5);
    out += hemi * diffuse_albedo;

    // Baked environment reflection, fresnel weighted.
    let reflected = reflect(-view, normal);
    let fresnel = f0 + (Vec3::ONE - f0) * (1.0 - n_dot_v).powi(5);
    let gloss = (1.0 - shading.roughness).powi(2);
    out += env.sample(reflected) * fresnel * gloss * shading.env_strength;

    // Clearcoat adds a second, always-smooth mirror lobe.
    if shading.clearcoat > 0.0 {
        let coat_fresnel = 0.04 + 0.96 * (1.0 - n_dot_v).powi(5);
        let coat_gloss = 1.0 - shading.clearcoat_roughness;
        out += env.sample(reflected) * coat_fresnel * coat_gloss * shading.clearcoat;
    }

    out + shading.emissive
}
