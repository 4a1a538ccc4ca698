//! Procedural vehicle geometry.
//!
//! One builder per body style composes a vehicle out of box/cylinder
//! primitives and tags every user-addressable surface ("panel") with a stable
//! id at construction time. Wheels and glass are decorative trim and cannot
//! be targeted. Builders are pure: building the same category twice yields
//! structurally equivalent, independent rigs.

#![allow(dead_code)]

pub mod primitives;

use glam::Vec3;
use primitives::{box_corners, SurfaceMesh};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported body styles. Adding a variant forces every dispatch site to
/// handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Sedan,
    Suv,
    PickupTruck,
    SprinterVan,
    TransitVan,
    BoxTruck,
}

impl VehicleCategory {
    pub const ALL: [Self; 6] = [
        Self::Sedan,
        Self::Suv,
        Self::PickupTruck,
        Self::SprinterVan,
        Self::TransitVan,
        Self::BoxTruck,
    ];

    /// Parse a host-supplied token. Unrecognized tokens fall back to the
    /// sedan; the host never sees an error for a bad category.
    pub fn from_token(token: &str) -> Self {
        match token {
            "sedan" => Self::Sedan,
            "suv" => Self::Suv,
            "pickup_truck" => Self::PickupTruck,
            "sprinter_van" => Self::SprinterVan,
            "transit_van" => Self::TransitVan,
            "box_truck" => Self::BoxTruck,
            other => {
                log::debug!("Unknown vehicle category '{other}', using sedan");
                Self::Sedan
            }
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::PickupTruck => "pickup_truck",
            Self::SprinterVan => "sprinter_van",
            Self::TransitVan => "transit_van",
            Self::BoxTruck => "box_truck",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
            Self::PickupTruck => "Pickup Truck",
            Self::SprinterVan => "Sprinter Van",
            Self::TransitVan => "Transit Van",
            Self::BoxTruck => "Box Truck",
        }
    }
}

/// One addressable wrap surface.
#[derive(Debug, Clone)]
pub struct PanelSurface {
    pub id: &'static str,
    pub mesh: SurfaceMesh,
    /// Whole-body surfaces accept the 2D mockup texture override; bumpers
    /// and roofs do not.
    pub accepts_mockup: bool,
}

/// Decorative geometry (wheels, glass). Rendered but never targeted.
#[derive(Debug, Clone)]
pub struct TrimSurface {
    pub mesh: SurfaceMesh,
    pub tint: Vec3,
    pub roughness: f32,
}

/// A built vehicle: panel arena plus trim, with precomputed bounds for
/// camera framing. Panels are addressed by id through the arena map, never
/// by direct reference.
#[derive(Debug, Clone)]
pub struct VehicleRig {
    category: VehicleCategory,
    panels: Vec<PanelSurface>,
    index: HashMap<&'static str, usize>,
    trim: Vec<TrimSurface>,
    center: Vec3,
    extent: Vec3,
}

impl VehicleRig {
    pub fn category(&self) -> VehicleCategory {
        self.category
    }

    pub fn panels(&self) -> &[PanelSurface] {
        &self.panels
    }

    pub fn trim(&self) -> &[TrimSurface] {
        &self.trim
    }

    pub fn panel(&self, id: &str) -> Option<&PanelSurface> {
        self.index.get(id).map(|&slot| &self.panels[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn panel_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.panels.iter().map(|panel| panel.id)
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Center of the overall bounds.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Half-size of the overall bounds.
    pub fn extent(&self) -> Vec3 {
        self.extent
    }
}

/// Build the rig for a category. Exhaustive over the variant set.
pub fn build_vehicle(category: VehicleCategory) -> VehicleRig {
    let builder = match category {
        VehicleCategory::Sedan => build_sedan(),
        VehicleCategory::Suv => build_suv(),
        VehicleCategory::PickupTruck => build_pickup(),
        VehicleCategory::SprinterVan => build_van(VanPlan::sprinter()),
        VehicleCategory::TransitVan => build_van(VanPlan::transit()),
        VehicleCategory::BoxTruck => build_box_truck(),
    };
    builder.finish(category)
}

const GLASS_TINT: Vec3 = Vec3::new(0.07, 0.09, 0.12);
const GLASS_ROUGHNESS: f32 = 0.05;
const TIRE_TINT: Vec3 = Vec3::new(0.04, 0.04, 0.045);
const TIRE_ROUGHNESS: f32 = 0.9;
const WHEEL_SEGMENTS: u32 = 16;

struct RigBuilder {
    panels: Vec<PanelSurface>,
    trim: Vec<TrimSurface>,
}

impl RigBuilder {
    fn new() -> Self {
        Self {
            panels: Vec::new(),
            trim: Vec::new(),
        }
    }

    fn panel(&mut self, id: &'static str, accepts_mockup: bool, mesh: SurfaceMesh) {
        debug_assert!(
            self.panels.iter().all(|panel| panel.id != id),
            "duplicate panel id {id}"
        );
        self.panels.push(PanelSurface {
            id,
            mesh,
            accepts_mockup,
        });
    }

    fn glass(&mut self, mesh: SurfaceMesh) {
        self.trim.push(TrimSurface {
            mesh,
            tint: GLASS_TINT,
            roughness: GLASS_ROUGHNESS,
        });
    }

    /// Four wheels at `±track/2` on X, `±wheelbase/2` on Z.
    fn wheels(&mut self, track: f32, wheelbase: f32, radius: f32, width: f32) {
        let mut mesh = SurfaceMesh::new();
        for x in [-track / 2.0, track / 2.0] {
            for z in [-wheelbase / 2.0, wheelbase / 2.0] {
                mesh.push_cylinder(
                    Vec3::new(x, radius, z),
                    radius,
                    width / 2.0,
                    WHEEL_SEGMENTS,
                );
            }
        }
        self.trim.push(TrimSurface {
            mesh,
            tint: TIRE_TINT,
            roughness: TIRE_ROUGHNESS,
        });
    }

    fn finish(self, category: VehicleCategory) -> VehicleRig {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for mesh in self
            .panels
            .iter()
            .map(|panel| &panel.mesh)
            .chain(self.trim.iter().map(|trim| &trim.mesh))
        {
            if let Some((mesh_min, mesh_max)) = mesh.bounds() {
                min = min.min(mesh_min);
                max = max.max(mesh_max);
            }
        }
        if min.x > max.x {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
        }
        let index = self
            .panels
            .iter()
            .enumerate()
            .map(|(slot, panel)| (panel.id, slot))
            .collect();
        VehicleRig {
            category,
            panels: self.panels,
            index,
            trim: self.trim,
            center: (min + max) * 0.5,
            extent: (max - min) * 0.5,
        }
    }
}

/// Sloped solid: an axis-aligned footprint whose top edge heights differ at
/// the front and back, used for hoods, windshields and trunk lids.
fn sloped(
    min_x: f32,
    max_x: f32,
    min_y: f32,
    front_top_y: f32,
    back_top_y: f32,
    front_z: f32,
    back_z: f32,
) -> SurfaceMesh {
    let mut corners = box_corners(
        Vec3::new(min_x, min_y, front_z),
        Vec3::new(max_x, front_top_y, back_z),
    );
    corners[6].y = back_top_y;
    corners[7].y = back_top_y;
    let mut mesh = SurfaceMesh::new();
    mesh.push_hexahedron(corners);
    mesh
}

fn boxed(min: Vec3, max: Vec3) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::new();
    mesh.push_box(min, max);
    mesh
}

/// Split the lower body into left/right halves so each side is its own
/// addressable panel; together they read as one slab.
fn side_pair(
    builder: &mut RigBuilder,
    half_width: f32,
    bottom: f32,
    top: f32,
    front_z: f32,
    back_z: f32,
) {
    builder.panel(
        "left_side",
        true,
        boxed(
            Vec3::new(-half_width, bottom, front_z),
            Vec3::new(0.0, top, back_z),
        ),
    );
    builder.panel(
        "right_side",
        true,
        boxed(
            Vec3::new(0.0, bottom, front_z),
            Vec3::new(half_width, top, back_z),
        ),
    );
}

fn build_sedan() -> RigBuilder {
    let mut b = RigBuilder::new();
    let (hl, hw) = (2.3, 0.92); // half length / width
    let ground = 0.17;
    let body_top = 0.64;
    let roof_top = 1.38;
    let cabin_w = hw * 0.88;
    let bumper_depth = 0.34;

    b.panel(
        "front_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, -hl),
            Vec3::new(hw, 0.56, -hl + bumper_depth),
        ),
    );
    b.panel(
        "rear_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, hl - bumper_depth),
            Vec3::new(hw, 0.56, hl),
        ),
    );
    side_pair(&mut b, hw, ground, body_top, -hl + bumper_depth, hl - bumper_depth);

    // Hood slopes up toward the windshield base.
    b.panel(
        "hood",
        true,
        sloped(-hw * 0.96, hw * 0.96, body_top, body_top + 0.03, body_top + 0.12, -1.94, -0.72),
    );
    // Trunk lid slopes down toward the tail.
    b.panel(
        "trunk",
        true,
        sloped(-hw * 0.94, hw * 0.94, body_top, body_top + 0.13, body_top + 0.04, 1.22, 1.94),
    );
    b.panel(
        "roof",
        false,
        boxed(
            Vec3::new(-cabin_w, roof_top - 0.06, -0.26),
            Vec3::new(cabin_w, roof_top, 0.86),
        ),
    );

    // Glasshouse: windshield, rear window, side glass.
    b.glass(sloped(-cabin_w, cabin_w, body_top, body_top + 0.12, roof_top - 0.06, -0.72, -0.26));
    b.glass(sloped(-cabin_w, cabin_w, body_top, roof_top - 0.06, body_top + 0.13, 0.86, 1.22));
    b.glass(boxed(
        Vec3::new(-cabin_w, body_top, -0.22),
        Vec3::new(-cabin_w + 0.05, roof_top - 0.08, 0.82),
    ));
    b.glass(boxed(
        Vec3::new(cabin_w - 0.05, body_top, -0.22),
        Vec3::new(cabin_w, roof_top - 0.08, 0.82),
    ));

    b.wheels(2.0 * hw - 0.22, 2.8, 0.34, 0.24);
    b
}

fn build_suv() -> RigBuilder {
    let mut b = RigBuilder::new();
    let (hl, hw) = (2.4, 0.97);
    let ground = 0.24;
    let body_top = 0.92;
    let roof_top = 1.78;
    let cabin_w = hw * 0.9;
    let bumper_depth = 0.36;

    b.panel(
        "front_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, -hl),
            Vec3::new(hw, 0.72, -hl + bumper_depth),
        ),
    );
    b.panel(
        "rear_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, hl - bumper_depth),
            Vec3::new(hw, 0.72, hl),
        ),
    );
    side_pair(&mut b, hw, ground, body_top, -hl + bumper_depth, hl - bumper_depth);

    b.panel(
        "hood",
        true,
        sloped(-hw * 0.96, hw * 0.96, body_top, body_top + 0.04, body_top + 0.1, -2.02, -0.95),
    );
    // Tailgate stands nearly upright at the back of the cabin.
    b.panel(
        "tailgate",
        true,
        boxed(
            Vec3::new(-cabin_w, body_top, 1.76),
            Vec3::new(cabin_w, roof_top - 0.3, 2.02),
        ),
    );
    b.panel(
        "roof",
        false,
        boxed(
            Vec3::new(-cabin_w, roof_top - 0.07, -0.5),
            Vec3::new(cabin_w, roof_top, 1.72),
        ),
    );

    b.glass(sloped(-cabin_w, cabin_w, body_top, body_top + 0.1, roof_top - 0.07, -0.95, -0.5));
    b.glass(boxed(
        Vec3::new(-cabin_w, body_top, -0.46),
        Vec3::new(-cabin_w + 0.05, roof_top - 0.1, 1.7),
    ));
    b.glass(boxed(
        Vec3::new(cabin_w - 0.05, body_top, -0.46),
        Vec3::new(cabin_w, roof_top - 0.1, 1.7),
    ));
    b.glass(boxed(
        Vec3::new(-cabin_w + 0.08, roof_top - 0.3, 1.72),
        Vec3::new(cabin_w - 0.08, roof_top - 0.09, 1.78),
    ));

    b.wheels(2.0 * hw - 0.24, 2.9, 0.4, 0.27);
    b
}

fn build_pickup() -> RigBuilder {
    let mut b = RigBuilder::new();
    let (hl, hw) = (2.7, 0.99);
    let ground = 0.3;
    let body_top = 0.98;
    let cab_top = 1.86;
    let cab_w = hw * 0.92;
    let bumper_depth = 0.36;
    let bed_front = 0.25;

    b.panel(
        "front_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, -hl),
            Vec3::new(hw, 0.78, -hl + bumper_depth),
        ),
    );
    b.panel(
        "rear_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, hl - 0.22),
            Vec3::new(hw, 0.74, hl),
        ),
    );

    b.panel(
        "hood",
        true,
        sloped(-hw * 0.96, hw * 0.96, body_top, body_top + 0.05, body_top + 0.12, -2.3, -1.15),
    );

    // Cab: fenders and doors up to the beltline, shell above it.
    let mut cab = SurfaceMesh::new();
    cab.push_box(
        Vec3::new(-hw, ground, -hl + bumper_depth),
        Vec3::new(hw, body_top, bed_front),
    );
    cab.extend_from(&sloped(-cab_w, cab_w, body_top, body_top + 0.12, cab_top, -1.15, -0.72));
    cab.push_box(
        Vec3::new(-cab_w, body_top, -0.72),
        Vec3::new(cab_w, cab_top, bed_front - 0.05),
    );
    b.panel("cab", true, cab);

    // Bed: floor plus three walls; the tailgate closes the back.
    let bed_top = body_top + 0.08;
    let mut bed = SurfaceMesh::new();
    bed.push_box(
        Vec3::new(-hw, ground, bed_front),
        Vec3::new(hw, 0.62, hl - 0.22),
    );
    bed.push_box(
        Vec3::new(-hw, 0.62, bed_front),
        Vec3::new(-hw + 0.09, bed_top, hl - 0.22),
    );
    bed.push_box(
        Vec3::new(hw - 0.09, 0.62, bed_front),
        Vec3::new(hw, bed_top, hl - 0.22),
    );
    bed.push_box(
        Vec3::new(-hw + 0.09, 0.62, bed_front),
        Vec3::new(hw - 0.09, bed_top, bed_front + 0.08),
    );
    b.panel("bed", true, bed);

    b.panel(
        "tailgate",
        true,
        boxed(
            Vec3::new(-hw, 0.62, hl - 0.22),
            Vec3::new(hw, bed_top, hl - 0.1),
        ),
    );

    b.glass(sloped(
        -cab_w + 0.03,
        cab_w - 0.03,
        body_top + 0.06,
        body_top + 0.16,
        cab_top - 0.02,
        -1.13,
        -0.74,
    ));
    b.glass(boxed(
        Vec3::new(-cab_w, body_top + 0.06, -0.68),
        Vec3::new(-cab_w + 0.05, cab_top - 0.08, bed_front - 0.12),
    ));
    b.glass(boxed(
        Vec3::new(cab_w - 0.05, body_top + 0.06, -0.68),
        Vec3::new(cab_w, cab_top - 0.08, bed_front - 0.12),
    ));

    b.wheels(2.0 * hw - 0.26, 3.4, 0.43, 0.3);
    b
}

struct VanPlan {
    half_length: f32,
    half_width: f32,
    roof_top: f32,
    nose_length: f32,
}

impl VanPlan {
    fn sprinter() -> Self {
        Self {
            half_length: 2.95,
            half_width: 1.0,
            roof_top: 2.45,
            nose_length: 0.95,
        }
    }

    fn transit() -> Self {
        Self {
            half_length: 2.7,
            half_width: 1.0,
            roof_top: 2.2,
            nose_length: 0.85,
        }
    }
}

/// Shared body plan for the Sprinter/Transit variants; proportions differ,
/// the panel set does not.
fn build_van(plan: VanPlan) -> RigBuilder {
    let mut b = RigBuilder::new();
    let hl = plan.half_length;
    let hw = plan.half_width;
    let roof_top = plan.roof_top;
    let ground = 0.3;
    let hood_top = 1.0;
    let belt = 1.15;
    let cargo_front = -hl + plan.nose_length + 0.9;
    let bumper_depth = 0.3;

    b.panel(
        "front_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, -hl),
            Vec3::new(hw, 0.72, -hl + bumper_depth),
        ),
    );
    b.panel(
        "rear_bumper",
        false,
        boxed(
            Vec3::new(-hw, ground, hl - 0.18),
            Vec3::new(hw, 0.62, hl),
        ),
    );

    // Short sloped nose.
    b.panel(
        "hood",
        true,
        sloped(
            -hw * 0.95,
            hw * 0.95,
            ground,
            hood_top,
            belt,
            -hl + bumper_depth,
            -hl + plan.nose_length,
        ),
    );

    side_pair(&mut b, hw, ground, roof_top - 0.1, -hl + plan.nose_length, hl - 0.18);

    b.panel(
        "rear_doors",
        true,
        boxed(
            Vec3::new(-hw * 0.94, 0.5, hl - 0.3),
            Vec3::new(hw * 0.94, roof_top - 0.2, hl - 0.16),
        ),
    );
    b.panel(
        "roof",
        false,
        boxed(
            Vec3::new(-hw * 0.94, roof_top - 0.1, -hl + plan.nose_length + 0.1),
            Vec3::new(hw * 0.94, roof_top, hl - 0.2),
        ),
    );

    // Windshield leans against the body's front face, proud of the sides.
    b.glass(sloped(
        -hw * 0.9,
        hw * 0.9,
        belt,
        belt + 0.05,
        roof_top - 0.15,
        -hl + plan.nose_length - 0.35,
        -hl + plan.nose_length + 0.05,
    ));
    b.glass(boxed(
        Vec3::new(-hw - 0.02, belt, -hl + plan.nose_length + 0.15),
        Vec3::new(-hw + 0.03, roof_top - 0.55, cargo_front),
    ));
    b.glass(boxed(
        Vec3::new(hw - 0.03, belt, -hl + plan.nose_length + 0.15),
        Vec3::new(hw + 0.02, roof_top - 0.55, cargo_front),
    ));

    b.wheels(2.0 * hw - 0.26, hl * 1.15, 0.38, 0.26);
    b
}

fn build_box_truck() -> RigBuilder {
    let mut b = RigBuilder::new();
    let hl = 3.4;
    let hw = 1.1;
    let ground = 0.4;
    let cab_top = 1.95;
    let box_top = 2.9;
    let cab_back = -hl + 2.1;
    let box_front = cab_back + 0.15;
    let cab_w = hw * 0.88;

    b.panel(
        "front_bumper",
        false,
        boxed(
            Vec3::new(-cab_w, ground - 0.1, -hl),
            Vec3::new(cab_w, 0.72, -hl + 0.28),
        ),
    );
    b.panel(
        "rear_bumper",
        false,
        boxed(
            Vec3::new(-hw * 0.9, ground - 0.05, hl - 0.14),
            Vec3::new(hw * 0.9, 0.62, hl),
        ),
    );

    b.panel(
        "hood",
        true,
        sloped(-cab_w * 0.96, cab_w * 0.96, 0.98, 1.04, 1.14, -hl + 0.28, -hl + 1.0),
    );

    let mut cab = SurfaceMesh::new();
    cab.push_box(
        Vec3::new(-cab_w, ground, -hl + 0.28),
        Vec3::new(cab_w, 0.98, cab_back),
    );
    cab.extend_from(&sloped(
        -cab_w * 0.94,
        cab_w * 0.94,
        1.14,
        1.24,
        cab_top,
        -hl + 1.0,
        -hl + 1.45,
    ));
    cab.push_box(
        Vec3::new(-cab_w * 0.94, 0.98, -hl + 1.45),
        Vec3::new(cab_w * 0.94, cab_top, cab_back),
    );
    b.panel("cab", true, cab);

    // Cargo box rides on the frame behind the cab.
    b.panel(
        "box",
        true,
        boxed(
            Vec3::new(-hw, ground + 0.25, box_front),
            Vec3::new(hw, box_top, hl - 0.14),
        ),
    );

    // Shifted forward of the cab slope so the glass band sits proud of it.
    b.glass(sloped(
        -cab_w * 0.9,
        cab_w * 0.9,
        1.16,
        1.3,
        cab_top,
        -hl + 0.96,
        -hl + 1.4,
    ));
    b.glass(boxed(
        Vec3::new(-cab_w * 0.94 - 0.02, 1.2, -hl + 1.5),
        Vec3::new(-cab_w * 0.94 + 0.03, cab_top - 0.1, cab_back - 0.1),
    ));
    b.glass(boxed(
        Vec3::new(cab_w * 0.94 - 0.03, 1.2, -hl + 1.5),
        Vec3::new(cab_w * 0.94 + 0.02, cab_top - 0.1, cab_back - 0.1),
    ));

    b.wheels(2.0 * hw - 0.3, hl * 1.3, 0.48, 0.32);
    b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_builds_addressable_panels() {
        for category in VehicleCategory::ALL {
            let rig = build_vehicle(category);
            assert!(rig.panel_count() > 0, "{category:?} has no panels");
            assert!(!rig.trim().is_empty(), "{category:?} has no trim");
            assert!(rig.extent().length() > 0.0);
        }
    }

    #[test]
    fn panel_ids_are_unique_within_a_rig() {
        for category in VehicleCategory::ALL {
            let rig = build_vehicle(category);
            let mut seen = std::collections::HashSet::new();
            for id in rig.panel_ids() {
                assert!(seen.insert(id), "{category:?} repeats panel id {id}");
            }
        }
    }

    #[test]
    fn rebuilds_are_structurally_equivalent() {
        for category in VehicleCategory::ALL {
            let first = build_vehicle(category);
            let second = build_vehicle(category);
            let ids_a: Vec<_> = first.panel_ids().collect();
            let ids_b: Vec<_> = second.panel_ids().collect();
            assert_eq!(ids_a, ids_b);
            for (a, b) in first.panels().iter().zip(second.panels()) {
                assert_eq!(a.mesh, b.mesh, "{category:?} panel {} differs", a.id);
            }
        }
    }

    #[test]
    fn pickup_exposes_truck_panels() {
        let rig = build_vehicle(VehicleCategory::PickupTruck);
        for id in ["cab", "bed", "hood", "front_bumper", "rear_bumper"] {
            assert!(rig.contains(id), "pickup missing panel {id}");
        }
    }

    #[test]
    fn unknown_token_falls_back_to_sedan() {
        assert_eq!(VehicleCategory::from_token("hovercraft"), VehicleCategory::Sedan);
        assert_eq!(
            VehicleCategory::from_token("box_truck"),
            VehicleCategory::BoxTruck
        );
    }

    #[test]
    fn tokens_round_trip() {
        for category in VehicleCategory::ALL {
            assert_eq!(VehicleCategory::from_token(category.token()), category);
        }
    }

    #[test]
    fn mockup_never_lands_on_bumpers_or_roof() {
        for category in VehicleCategory::ALL {
            let rig = build_vehicle(category);
            for panel in rig.panels() {
                if matches!(panel.id, "front_bumper" | "rear_bumper" | "roof") {
                    assert!(!panel.accepts_mockup, "{category:?} {}", panel.id);
                }
            }
            assert!(
                rig.panels().iter().any(|panel| panel.accepts_mockup),
                "{category:?} has no mockup surface"
            );
        }
    }

    #[test]
    fn panel_lookup_is_by_id_only() {
        let rig = build_vehicle(VehicleCategory::Sedan);
        assert!(rig.panel("hood").is_some());
        assert!(rig.panel("bed").is_none());
        assert_eq!(rig.panel("roof").unwrap().id, "roof");
    }
}
