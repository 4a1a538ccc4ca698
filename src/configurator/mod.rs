//! The configurator facade: one value owning the vehicle rig, camera,
//! renderer, interaction state and the panel → material mapping.
//!
//! This is the control surface the host drives. Every operation degrades to
//! a safe default instead of failing toward the host: unknown categories
//! become sedans, unknown panel ids are no-ops, failed mockup loads keep the
//! previous shading. Dropping the configurator releases the renderer, the
//! loop state and the mockup loader thread.

#![allow(dead_code)]

pub mod mockup;

use crate::catalog::WrapMaterial;
use crate::interact::{transition, Effect, InteractionState, PointerEvent};
use crate::render::{
    pick_panel, shading, Capture, MockupTexture, OrbitCamera, SceneRenderer, SurfaceShading,
};
use crate::vehicle::{build_vehicle, VehicleCategory, VehicleRig};
use mockup::MockupLoader;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Vehicle yaw advance per frame while auto-rotate is active.
pub const AUTO_ROTATE_STEP: f32 = 0.005;

/// One panel's applied material: the id pair plus a snapshot of the record
/// as it was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelConfig {
    pub panel_id: String,
    pub material_id: String,
    pub material: WrapMaterial,
}

/// Target of an apply operation. The host-facing `"all"` token maps onto
/// [`PanelTarget::All`].
#[derive(Debug, Clone, PartialEq)]
pub enum PanelTarget {
    Panel(String),
    All,
}

impl PanelTarget {
    pub fn from_token(token: &str) -> Self {
        if token == "all" {
            Self::All
        } else {
            Self::Panel(token.to_string())
        }
    }
}

pub struct Configurator {
    rig: VehicleRig,
    camera: OrbitCamera,
    renderer: SceneRenderer,
    interaction: InteractionState,
    configs: HashMap<String, PanelConfig>,
    spin: f32,
    mockup_loader: MockupLoader,
    mockup_texture: Option<MockupTexture>,
}

impl Configurator {
    pub fn new(category: VehicleCategory, width: u32, height: u32) -> Self {
        let rig = build_vehicle(category);
        let mut camera = OrbitCamera::framing(rig.center(), rig.extent());
        camera.set_aspect(width.max(1) as f32 / height.max(1) as f32);
        log::info!(
            "Configurator ready: {} with {} panels",
            category.label(),
            rig.panel_count()
        );
        Self {
            rig,
            camera,
            renderer: SceneRenderer::new(width, height),
            interaction: InteractionState::default(),
            configs: HashMap::new(),
            spin: 0.0,
            mockup_loader: MockupLoader::new(),
            mockup_texture: None,
        }
    }

    pub fn category(&self) -> VehicleCategory {
        self.rig.category()
    }

    pub fn rig(&self) -> &VehicleRig {
        &self.rig
    }

    /// Rebuild the vehicle wholesale. Configs, hover and selection that
    /// refer to panels absent from the new body style are dropped; an
    /// in-flight mockup load for the old vehicle is invalidated.
    pub fn set_category(&mut self, category: VehicleCategory) {
        self.rig = build_vehicle(category);
        self.configs.retain(|panel_id, _| self.rig.contains(panel_id));
        let rig = &self.rig;
        self.interaction.retain_panels(|panel_id| rig.contains(panel_id));
        self.camera.reframe(rig.center(), rig.extent());
        self.mockup_loader.invalidate();
        self.mockup_texture = None;
        log::info!(
            "Vehicle rebuilt as {} ({} panels)",
            category.label(),
            self.rig.panel_count()
        );
    }

    /// Token form of [`Self::set_category`]; unknown tokens build a sedan.
    pub fn set_category_token(&mut self, token: &str) {
        self.set_category(VehicleCategory::from_token(token));
    }

    /// Assign a material to one panel or to every panel that currently
    /// exists. Unknown panel ids are silent no-ops.
    pub fn apply_material(&mut self, target: &PanelTarget, material: &WrapMaterial) {
        match target {
            PanelTarget::Panel(panel_id) => {
                if !self.rig.contains(panel_id) {
                    log::debug!("Ignoring material for unknown panel '{panel_id}'");
                    return;
                }
                self.configs.insert(
                    panel_id.clone(),
                    PanelConfig {
                        panel_id: panel_id.clone(),
                        material_id: material.id.clone(),
                        material: material.clone(),
                    },
                );
            }
            PanelTarget::All => {
                for panel_id in self.rig.panel_ids() {
                    self.configs.insert(
                        panel_id.to_string(),
                        PanelConfig {
                            panel_id: panel_id.to_string(),
                            material_id: material.id.clone(),
                            material: material.clone(),
                        },
                    );
                }
            }
        }
    }

    /// Owned snapshot of the current configuration, ordered by panel id.
    /// Never exposes references into renderer-owned state.
    pub fn configuration(&self) -> Vec<PanelConfig> {
        let mut entries: Vec<PanelConfig> = self.configs.values().cloned().collect();
        entries.sort_by(|a, b| a.panel_id.cmp(&b.panel_id));
        entries
    }

    /// Clear every panel back to the neutral default.
    pub fn reset(&mut self) {
        self.configs.clear();
        self.mockup_texture = None;
        log::info!("Configuration reset");
    }

    pub fn hovered(&self) -> Option<&str> {
        self.interaction.hovered()
    }

    pub fn selected(&self) -> Option<&str> {
        self.interaction.selected()
    }

    pub fn auto_rotate(&self) -> bool {
        self.interaction.auto_rotate
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Feed one pointer event through the state machine and apply the
    /// resulting camera/selection effects. Completes synchronously; the
    /// render loop is never blocked.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let width = self.renderer.width();
        let height = self.renderer.height();
        let rig = &self.rig;
        let camera = &self.camera;
        let spin = self.spin;
        let (next, effects) = transition(&self.interaction, &event, |x, y| {
            let ray = camera.screen_ray(x, y, width, height);
            pick_panel(rig, &ray, spin).map(|hit| hit.panel_id.to_string())
        });
        self.interaction = next;
        for effect in effects {
            match effect {
                Effect::Orbit { yaw, pitch } => self.camera.orbit(yaw, pitch),
                Effect::Zoom { delta } => self.camera.zoom(delta),
                Effect::HoverChanged { current, .. } => {
                    log::debug!("Hover -> {current:?}");
                }
                Effect::SelectionChanged { current, .. } => {
                    log::debug!("Selection -> {current:?}");
                }
            }
        }
    }

    /// Advance one frame: auto-rotation, mockup load completion, and a full
    /// redraw into the internal framebuffer.
    pub fn tick(&mut self) {
        if self.interaction.auto_rotate {
            self.spin += AUTO_ROTATE_STEP;
        }
        if let Some(image) = self.mockup_loader.poll() {
            log::info!("Mockup texture applied ({}×{})", image.width(), image.height());
            self.mockup_texture = Some(MockupTexture::new(image));
        }
        self.render_frame();
    }

    /// Keep framebuffer resolution and camera aspect in lockstep with the
    /// host viewport. Safe to call repeatedly with the same size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.camera
            .set_aspect(width.max(1) as f32 / height.max(1) as f32);
    }

    /// Begin loading a mockup concept image; it is applied to body panels
    /// when (and if) decoding completes.
    pub fn request_mockup(&mut self, path: PathBuf) {
        self.mockup_loader.request(path);
    }

    pub fn mockup_applied(&self) -> bool {
        self.mockup_texture.is_some()
    }

    /// Still image of the configurator exactly as currently posed,
    /// including in-progress rotation. `None` until the render loop has
    /// produced its first frame.
    pub fn capture(&mut self) -> Option<Capture> {
        if self.renderer.frames_rendered() == 0 {
            log::debug!("Capture requested before the first frame");
            return None;
        }
        self.render_frame();
        self.renderer.capture()
    }

    /// Current frame as RGBA bytes for the host viewport.
    pub fn frame_rgba(&self) -> Vec<u8> {
        self.renderer.frame_rgba()
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.renderer.width(), self.renderer.height())
    }

    fn render_frame(&mut self) {
        let shadings = self.panel_shadings();
        self.renderer.render(
            &self.rig,
            &shadings,
            &self.camera,
            self.spin,
            self.mockup_texture.as_ref(),
        );
    }

    /// Shading for every panel, derived fresh from the config store and the
    /// interaction state; selection takes precedence over hover.
    fn panel_shadings(&self) -> Vec<SurfaceShading> {
        self.rig
            .panels()
            .iter()
            .map(|panel| {
                let material = self.configs.get(panel.id).map(|config| &config.material);
                let selected = self.interaction.selected() == Some(panel.id);
                let hovered = self.interaction.hovered() == Some(panel.id);
                shading::resolve(material, selected, hovered)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MaterialCatalog, MaterialCategory};

    fn configurator(category: VehicleCategory) -> Configurator {
        Configurator::new(category, 160, 90)
    }

    fn material(id: &str, category: MaterialCategory) -> WrapMaterial {
        WrapMaterial {
            id: id.into(),
            name: id.into(),
            brand: "Test".into(),
            category,
            color: [0.5, 0.1, 0.1],
            secondary_color: None,
            roughness: 0.2,
            metalness: 0.3,
            clearcoat: None,
            clearcoat_roughness: None,
            env_reflectivity: None,
            ppf_opacity: None,
        }
    }

    #[test]
    fn apply_to_all_covers_every_panel_exactly_once() {
        let mut cfg = configurator(VehicleCategory::Suv);
        let gloss = material("gloss-1", MaterialCategory::Gloss);
        cfg.apply_material(&PanelTarget::All, &gloss);
        let snapshot = cfg.configuration();
        assert_eq!(snapshot.len(), cfg.rig().panel_count());
        assert!(snapshot.iter().all(|entry| entry.material_id == "gloss-1"));
        let mut ids: Vec<_> = snapshot.iter().map(|entry| entry.panel_id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), snapshot.len());
    }

    #[test]
    fn hood_then_all_round_trip() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        let gloss = material("m", MaterialCategory::Gloss);
        cfg.apply_material(&PanelTarget::Panel("hood".into()), &gloss);
        let first = cfg.configuration();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].panel_id, "hood");

        cfg.apply_material(&PanelTarget::All, &gloss);
        let second = cfg.configuration();
        assert_eq!(second.len(), cfg.rig().panel_count());
        let hood = second.iter().find(|entry| entry.panel_id == "hood").unwrap();
        assert_eq!(hood.material_id, "m");
    }

    #[test]
    fn unknown_panel_is_a_silent_no_op() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        let gloss = material("m", MaterialCategory::Gloss);
        cfg.apply_material(&PanelTarget::Panel("cargo_pod".into()), &gloss);
        assert!(cfg.configuration().is_empty());
    }

    #[test]
    fn all_token_parses_to_the_all_target() {
        assert_eq!(PanelTarget::from_token("all"), PanelTarget::All);
        assert_eq!(
            PanelTarget::from_token("hood"),
            PanelTarget::Panel("hood".into())
        );
    }

    #[test]
    fn reset_empties_the_configuration_and_neutralizes_shading() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        cfg.apply_material(&PanelTarget::All, &material("m", MaterialCategory::Chrome));
        assert!(!cfg.configuration().is_empty());
        cfg.reset();
        assert!(cfg.configuration().is_empty());
        assert!(cfg
            .panel_shadings()
            .iter()
            .all(|s| *s == SurfaceShading::neutral()));
    }

    #[test]
    fn category_change_drops_stale_panels() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        cfg.apply_material(&PanelTarget::All, &material("m", MaterialCategory::Gloss));
        assert!(cfg.configuration().iter().any(|e| e.panel_id == "trunk"));

        cfg.set_category(VehicleCategory::PickupTruck);
        let snapshot = cfg.configuration();
        assert!(snapshot.iter().all(|e| cfg.rig().contains(&e.panel_id)));
        assert!(!snapshot.iter().any(|e| e.panel_id == "trunk"));
        // Surviving panels keep their material.
        assert!(snapshot.iter().any(|e| e.panel_id == "hood"));
    }

    #[test]
    fn chrome_and_matte_shade_the_hood_differently() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        let hood_slot = cfg
            .rig()
            .panels()
            .iter()
            .position(|panel| panel.id == "hood")
            .unwrap();

        cfg.apply_material(
            &PanelTarget::Panel("hood".into()),
            &material("chrome", MaterialCategory::Chrome),
        );
        let chrome = cfg.panel_shadings()[hood_slot];
        cfg.apply_material(
            &PanelTarget::Panel("hood".into()),
            &material("matte", MaterialCategory::Matte),
        );
        let matte = cfg.panel_shadings()[hood_slot];
        assert!(chrome.roughness <= 0.05);
        assert!((chrome.metalness - 1.0).abs() < 1e-6);
        assert!(matte.roughness > chrome.roughness);
        assert_ne!(chrome, matte);
    }

    #[test]
    fn capture_is_none_before_the_first_frame() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        assert!(cfg.capture().is_none());
        cfg.tick();
        let capture = cfg.capture().expect("first frame done");
        assert_eq!(capture.image().width(), 160);
    }

    #[test]
    fn auto_rotate_spins_until_the_first_drag() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        cfg.tick();
        cfg.tick();
        assert!(cfg.spin() > 0.0);
        assert!(cfg.auto_rotate());

        cfg.handle_pointer(PointerEvent::Down { x: 40.0, y: 40.0 });
        cfg.handle_pointer(PointerEvent::Move { x: 60.0, y: 40.0 });
        cfg.handle_pointer(PointerEvent::Up { x: 60.0, y: 40.0 });
        assert!(!cfg.auto_rotate());
        let spin = cfg.spin();
        cfg.tick();
        assert_eq!(cfg.spin(), spin);
    }

    #[test]
    fn click_on_the_vehicle_selects_then_empty_space_clears() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        cfg.tick();
        // The camera frames the vehicle, so the viewport center is on it.
        cfg.handle_pointer(PointerEvent::Down { x: 80.0, y: 45.0 });
        cfg.handle_pointer(PointerEvent::Up { x: 80.0, y: 45.0 });
        let selected = cfg.selected().map(str::to_string);
        assert!(selected.is_some(), "center click should hit a panel");
        assert!(cfg.rig().contains(selected.as_deref().unwrap()));

        // Top-left corner is sky.
        cfg.handle_pointer(PointerEvent::Down { x: 1.0, y: 1.0 });
        cfg.handle_pointer(PointerEvent::Up { x: 1.0, y: 1.0 });
        assert_eq!(cfg.selected(), None);
    }

    #[test]
    fn hover_does_not_disturb_selection_precedence() {
        let mut cfg = configurator(VehicleCategory::Sedan);
        cfg.tick();
        cfg.handle_pointer(PointerEvent::Down { x: 80.0, y: 45.0 });
        cfg.handle_pointer(PointerEvent::Up { x: 80.0, y: 45.0 });
        let selected = cfg.selected().map(str::to_string).expect("selection");

        // Hover the same panel: its shading must stay the selection shading.
        cfg.handle_pointer(PointerEvent::Move { x: 80.0, y: 45.0 });
        let slot = cfg
            .rig()
            .panels()
            .iter()
            .position(|panel| panel.id == selected)
            .unwrap();
        let shading_now = cfg.panel_shadings()[slot];
        let selected_only = shading::resolve(None, true, false);
        assert_eq!(shading_now.emissive, selected_only.emissive);
    }

    #[test]
    fn built_in_catalog_materials_apply_cleanly() {
        let catalog = MaterialCatalog::built_in();
        let mut cfg = configurator(VehicleCategory::BoxTruck);
        for entry in catalog.materials() {
            cfg.apply_material(&PanelTarget::Panel("box".into()), entry);
        }
        let snapshot = cfg.configuration();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot[0].material_id,
            catalog.materials().last().unwrap().id
        );
    }
}
