//! Depth-buffered CPU triangle rasterizer.
//!
//! Geometry-only engine: callers hand in a mesh, its transforms and a
//! per-fragment shade closure `(world position, world normal) -> (linear
//! RGB, alpha)`. Triangles are clipped against the near plane, projected,
//! filled with perspective-correct world positions, then depth tested and
//! alpha blended into the framebuffer. Tone mapping happens once on readout.

use crate::vehicle::primitives::SurfaceMesh;
use glam::{Mat4, Vec3, Vec4};

/// Minimum clip-space w; triangles are clipped against this plane so
/// geometry behind the camera never projects.
const W_MIN: f32 = 0.05;

#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<Vec3>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let len = (width * height) as usize;
        Self {
            width,
            height,
            color: vec![Vec3::ZERO; len],
            depth: vec![f32::MAX; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset depth and fill the background with a vertical gradient.
    pub fn clear(&mut self, top: Vec3, bottom: Vec3) {
        self.depth.fill(f32::MAX);
        for row in 0..self.height {
            let t = row as f32 / (self.height - 1).max(1) as f32;
            let shade = top.lerp(bottom, t);
            let start = (row * self.width) as usize;
            self.color[start..start + self.width as usize].fill(shade);
        }
    }

    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Tone-mapped, gamma-encoded 8-bit RGBA copy of the frame.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.color.len() * 4);
        for linear in &self.color {
            let mapped = aces_tone_map(*linear);
            bytes.push(encode_channel(mapped.x));
            bytes.push(encode_channel(mapped.y));
            bytes.push(encode_channel(mapped.z));
            bytes.push(255);
        }
        bytes
    }
}

fn encode_channel(linear: f32) -> u8 {
    (linear_to_gamma(linear) * 255.0).clamp(0.0, 255.0) as u8
}

fn linear_to_gamma(value: f32) -> f32 {
    value.max(0.0).powf(1.0 / 2.2)
}

/// ACES filmic fit; keeps chrome highlights from clipping to flat white.
fn aces_tone_map(color: Vec3) -> Vec3 {
    let a = 2.51;
    let b = 0.03;
    let c = 2.43;
    let d = 0.59;
    let e = 0.14;
    let mapped = (color * (a * color + Vec3::splat(b)))
        / (color * (c * color + Vec3::splat(d)) + Vec3::splat(e));
    mapped.clamp(Vec3::ZERO, Vec3::ONE)
}

#[derive(Debug, Clone, Copy)]
struct ClipVert {
    clip: Vec4,
    world: Vec3,
}

fn lerp_vert(a: &ClipVert, b: &ClipVert, t: f32) -> ClipVert {
    ClipVert {
        clip: a.clip.lerp(b.clip, t),
        world: a.world.lerp(b.world, t),
    }
}

/// Sutherland-Hodgman against the `w = W_MIN` plane. A triangle yields at
/// most four vertices.
fn clip_near(input: &[ClipVert]) -> Vec<ClipVert> {
    let mut output = Vec::with_capacity(4);
    for (index, current) in input.iter().enumerate() {
        let previous = &input[(index + input.len() - 1) % input.len()];
        let current_in = current.clip.w >= W_MIN;
        let previous_in = previous.clip.w >= W_MIN;
        if current_in != previous_in {
            let t = (W_MIN - previous.clip.w) / (current.clip.w - previous.clip.w);
            output.push(lerp_vert(previous, current, t));
        }
        if current_in {
            output.push(*current);
        }
    }
    output
}

#[derive(Debug, Clone, Copy)]
struct ScreenVert {
    x: f32,
    y: f32,
    z: f32,
    inv_w: f32,
    world_over_w: Vec3,
}

fn to_screen(vert: &ClipVert, width: u32, height: u32) -> ScreenVert {
    let inv_w = 1.0 / vert.clip.w;
    let ndc = vert.clip.truncate() * inv_w;
    ScreenVert {
        x: (ndc.x + 1.0) * 0.5 * width as f32,
        y: (1.0 - ndc.y) * 0.5 * height as f32,
        z: ndc.z,
        inv_w,
        world_over_w: vert.world * inv_w,
    }
}

fn edge(a: &ScreenVert, b: &ScreenVert, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Rasterize a mesh. `shade` runs once per covered, depth-passing pixel.
pub fn draw_mesh<F>(
    fb: &mut Framebuffer,
    mesh: &SurfaceMesh,
    model: &Mat4,
    view_proj: &Mat4,
    shade: F,
) where
    F: Fn(Vec3, Vec3) -> (Vec3, f32),
{
    let mvp = *view_proj * *model;
    for triangle in mesh.indices.chunks_exact(3) {
        let verts = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ]
        .map(|index| {
            let world = model.transform_point3(mesh.positions[index]);
            ClipVert {
                clip: mvp * mesh.positions[index].extend(1.0),
                world,
            }
        });
        let normal = model
            .transform_vector3(mesh.normals[triangle[0] as usize])
            .normalize_or_zero();

        let clipped = clip_near(&verts);
        if clipped.len() < 3 {
            continue;
        }
        let screen: Vec<ScreenVert> = clipped
            .iter()
            .map(|vert| to_screen(vert, fb.width, fb.height))
            .collect();
        for fan in 1..screen.len() - 1 {
            raster_triangle(fb, &screen[0], &screen[fan], &screen[fan + 1], normal, &shade);
        }
    }
}

fn raster_triangle<F>(
    fb: &mut Framebuffer,
    v0: &ScreenVert,
    v1: &ScreenVert,
    v2: &ScreenVert,
    normal: Vec3,
    shade: &F,
) where
    F: Fn(Vec3, Vec3) -> (Vec3, f32),
{
    let area = edge(v0, v1, v2.x, v2.y);
    if area.abs() < 1e-8 {
        return;
    }
    let inv_area = 1.0 / area;

    let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as u32;
    let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).clamp(0, fb.width as i64) as u32;
    let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as u32;
    let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i64).clamp(0, fb.height as i64) as u32;

    for py in min_y..max_y {
        for px in min_x..max_x {
            let cx = px as f32 + 0.5;
            let cy = py as f32 + 0.5;
            let l0 = edge(v1, v2, cx, cy) * inv_area;
            let l1 = edge(v2, v0, cx, cy) * inv_area;
            let l2 = edge(v0, v1, cx, cy) * inv_area;
            if l0 < 0.0 || l1 < 0.0 || l2 < 0.0 {
                continue;
            }
            let depth = l0 * v0.z + l1 * v1.z + l2 * v2.z;
            let index = fb.pixel_index(px, py);
            if !(0.0..=1.0).contains(&depth) || depth >= fb.depth[index] {
                continue;
            }
            let inv_w = l0 * v0.inv_w + l1 * v1.inv_w + l2 * v2.inv_w;
            let world =
                (l0 * v0.world_over_w + l1 * v1.world_over_w + l2 * v2.world_over_w) / inv_w;
            let (rgb, alpha) = shade(world, normal);
            let alpha = alpha.clamp(0.0, 1.0);
            fb.color[index] = fb.color[index].lerp(rgb, alpha);
            fb.depth[index] = depth;
        }
    }
}
