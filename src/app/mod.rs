mod timing;

use crate::catalog::MaterialCatalog;
use crate::configurator::{Configurator, PanelTarget};
use crate::interact::PointerEvent;
use crate::ui::{self, UiAction, UiState};
use crate::vehicle::VehicleCategory;
use std::time::Instant;
use timing::FrameTiming;

const APP_TITLE: &str = "Wrapviz - Vehicle Wrap Configurator";
/// Upper bound on the software framebuffer's larger dimension; the frame is
/// stretched to the viewport when the window is bigger.
const MAX_RENDER_DIM: f32 = 960.0;

pub struct WrapvizApp {
    configurator: Configurator,
    catalog: MaterialCatalog,
    ui: UiState,
    timing: FrameTiming,
    viewport_texture: Option<egui::TextureHandle>,
}

impl WrapvizApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let catalog = MaterialCatalog::built_in();
        log::info!("Catalog loaded with {} materials", catalog.len());
        Self {
            configurator: Configurator::new(VehicleCategory::Sedan, 960, 540),
            catalog,
            ui: UiState::new(),
            timing: FrameTiming::new(APP_TITLE.to_string()),
            viewport_texture: None,
        }
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::SetCategory(category) => {
                self.configurator.set_category(category);
                self.ui.set_status(format!("Vehicle: {}", category.label()));
            }
            UiAction::ApplyToSelectedPanel => {
                let Some(material) = self
                    .ui
                    .selected_material()
                    .and_then(|index| self.catalog.materials().get(index))
                    .cloned()
                else {
                    return;
                };
                let Some(panel_id) = self.configurator.selected().map(str::to_string) else {
                    return;
                };
                self.configurator
                    .apply_material(&PanelTarget::Panel(panel_id.clone()), &material);
                self.ui
                    .set_status(format!("{} applied to {panel_id}", material.name));
            }
            UiAction::ApplyToAllPanels => {
                let Some(material) = self
                    .ui
                    .selected_material()
                    .and_then(|index| self.catalog.materials().get(index))
                    .cloned()
                else {
                    return;
                };
                self.configurator.apply_material(&PanelTarget::All, &material);
                self.ui
                    .set_status(format!("{} applied to all panels", material.name));
            }
            UiAction::Reset => {
                self.configurator.reset();
                self.ui.set_status("Configuration reset");
            }
            UiAction::CapturePng => self.handle_capture_action(),
            UiAction::ExportConfig => self.handle_export_action(),
            UiAction::LoadMockup => self.handle_mockup_action(),
        }
    }

    fn handle_capture_action(&mut self) {
        let Some(capture) = self.configurator.capture() else {
            self.ui.set_status("Nothing rendered yet");
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("wrap-capture.png")
            .save_file()
        else {
            return;
        };
        match capture.png_bytes().map(|bytes| std::fs::write(&path, bytes)) {
            Ok(Ok(())) => {
                log::info!("Capture saved to {path:?}");
                self.ui.set_status(format!("Capture saved: {}", path.display()));
            }
            Ok(Err(err)) => {
                log::warn!("Failed to write capture: {err}");
                self.ui.set_status(format!("Capture failed: {err}"));
            }
            Err(err) => {
                log::warn!("Failed to encode capture: {err}");
                self.ui.set_status(format!("Capture failed: {err}"));
            }
        }
    }

    fn handle_export_action(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Config", &["json"])
            .set_file_name("wrap-config.json")
            .save_file()
        else {
            return;
        };
        let snapshot = self.configurator.configuration();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    log::warn!("Failed to write config: {err}");
                    self.ui.set_status(format!("Export failed: {err}"));
                } else {
                    self.ui
                        .set_status(format!("Exported {} entries", snapshot.len()));
                }
            }
            Err(err) => {
                log::warn!("Failed to serialize config: {err}");
                self.ui.set_status(format!("Export failed: {err}"));
            }
        }
    }

    fn handle_mockup_action(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", &["png", "jpg", "jpeg"])
            .pick_file()
        else {
            return;
        };
        self.configurator.request_mockup(path);
        self.ui.set_status("Loading mockup…");
    }

    /// The 3D viewport: forwards pointer input to the configurator and
    /// paints the software-rendered frame as a texture.
    fn viewport(&mut self, ui: &mut egui::Ui) {
        let (rect, _response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return;
        }

        let pixels_per_point = ui.ctx().pixels_per_point();
        let scale =
            (MAX_RENDER_DIM / (rect.width().max(rect.height()) * pixels_per_point)).min(1.0);
        let fb_width = (rect.width() * pixels_per_point * scale).round().max(1.0) as u32;
        let fb_height = (rect.height() * pixels_per_point * scale).round().max(1.0) as u32;
        self.configurator.resize(fb_width, fb_height);

        self.forward_pointer_input(ui, rect, fb_width, fb_height);
        self.configurator.tick();

        let rgba = self.configurator.frame_rgba();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [fb_width as usize, fb_height as usize],
            &rgba,
        );
        match &mut self.viewport_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.viewport_texture = Some(ui.ctx().load_texture(
                    "viewport",
                    image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
        if let Some(texture) = &self.viewport_texture {
            ui.painter().image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }

    fn forward_pointer_input(
        &mut self,
        ui: &egui::Ui,
        rect: egui::Rect,
        fb_width: u32,
        fb_height: u32,
    ) {
        // Viewport-relative position in framebuffer pixels.
        let to_fb = |pos: egui::Pos2| {
            (
                (pos.x - rect.min.x) / rect.width() * fb_width as f32,
                (pos.y - rect.min.y) / rect.height() * fb_height as f32,
            )
        };

        let mut events = Vec::new();
        ui.input(|input| {
            let latest = input.pointer.latest_pos();
            match latest {
                Some(pos) if rect.contains(pos) || input.pointer.any_down() => {
                    let (x, y) = to_fb(pos);
                    if input.pointer.primary_pressed() && rect.contains(pos) {
                        events.push(PointerEvent::Down { x, y });
                    }
                    if input.pointer.delta() != egui::Vec2::ZERO {
                        events.push(PointerEvent::Move { x, y });
                    }
                    if input.pointer.primary_released() {
                        events.push(PointerEvent::Up { x, y });
                    }
                    let scroll = input.raw_scroll_delta.y;
                    if scroll != 0.0 && rect.contains(pos) {
                        events.push(PointerEvent::Wheel {
                            delta: scroll / 40.0,
                        });
                    }
                }
                _ => {
                    if !input.pointer.any_down() {
                        events.push(PointerEvent::Left);
                    }
                }
            }
        });
        for event in events {
            self.configurator.handle_pointer(event);
        }
    }
}

impl eframe::App for WrapvizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.timing.update(ctx, Instant::now());

        let actions = egui::SidePanel::left("controls")
            .default_width(270.0)
            .show(ctx, |ui| {
                ui::draw_controls(
                    ui,
                    &mut self.ui,
                    &self.catalog,
                    &self.configurator,
                    self.timing.fps(),
                )
            })
            .inner;
        for action in actions {
            self.handle_action(action);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| self.viewport(ui));

        // The vehicle keeps auto-rotating while idle, so redraw continuously.
        ctx.request_repaint();
    }
}

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("🚀 Wrapviz - vehicle wrap configurator");
    log::info!("   Drag to orbit, scroll to zoom, click a panel to select it");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };
    if let Err(err) = eframe::run_native(
        "wrapviz",
        native_options,
        Box::new(|cc| Ok(Box::new(WrapvizApp::new(cc)))),
    ) {
        log::error!("Event loop error: {err}");
    }

    log::info!("👋 Goodbye!");
}
