//! Control panel for the demo host.
//!
//! Pure egui widgets over the configurator's public surface; every mutation
//! is returned as a [`UiAction`] and executed by the app, so this module
//! never holds renderer state.

use crate::catalog::MaterialCatalog;
use crate::configurator::Configurator;
use crate::vehicle::VehicleCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetCategory(VehicleCategory),
    ApplyToSelectedPanel,
    ApplyToAllPanels,
    Reset,
    CapturePng,
    ExportConfig,
    LoadMockup,
}

pub struct UiState {
    selected_material: Option<usize>,
    status: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            selected_material: None,
            status: String::new(),
        }
    }

    pub fn selected_material(&self) -> Option<usize> {
        self.selected_material
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn draw_controls(
    ui: &mut egui::Ui,
    state: &mut UiState,
    catalog: &MaterialCatalog,
    configurator: &Configurator,
    fps: f32,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    ui.heading("Vehicle");
    let mut category = configurator.category();
    egui::ComboBox::from_id_salt("vehicle-category")
        .selected_text(category.label())
        .show_ui(ui, |ui| {
            for candidate in VehicleCategory::ALL {
                ui.selectable_value(&mut category, candidate, candidate.label());
            }
        });
    if category != configurator.category() {
        actions.push(UiAction::SetCategory(category));
    }

    ui.separator();
    ui.heading("Wrap materials");
    egui::ScrollArea::vertical()
        .max_height(280.0)
        .show(ui, |ui| {
            for (index, material) in catalog.materials().iter().enumerate() {
                let text = format!(
                    "{} — {}  ({})",
                    material.brand,
                    material.name,
                    material.category.label()
                );
                if ui
                    .selectable_label(state.selected_material == Some(index), text)
                    .clicked()
                {
                    state.selected_material = Some(index);
                }
            }
        });

    ui.add_space(6.0);
    let has_material = state.selected_material.is_some();
    let has_panel = configurator.selected().is_some();
    if ui
        .add_enabled(
            has_material && has_panel,
            egui::Button::new("Apply to selected panel"),
        )
        .clicked()
    {
        actions.push(UiAction::ApplyToSelectedPanel);
    }
    if ui
        .add_enabled(has_material, egui::Button::new("Apply to all panels"))
        .clicked()
    {
        actions.push(UiAction::ApplyToAllPanels);
    }
    if ui.button("Reset configuration").clicked() {
        actions.push(UiAction::Reset);
    }

    ui.separator();
    if ui.button("Capture PNG…").clicked() {
        actions.push(UiAction::CapturePng);
    }
    if ui.button("Export config…").clicked() {
        actions.push(UiAction::ExportConfig);
    }
    if ui.button("Load mockup…").clicked() {
        actions.push(UiAction::LoadMockup);
    }

    ui.separator();
    let panel_label = configurator
        .selected()
        .or(configurator.hovered())
        .unwrap_or("—");
    ui.label(format!("Panel: {panel_label}"));
    ui.label(format!(
        "Applied: {} / {}",
        configurator.configuration().len(),
        configurator.rig().panel_count()
    ));
    if configurator.mockup_applied() {
        ui.label("Mockup: applied");
    }
    ui.label(format!("{fps:.0} fps"));
    if !state.status.is_empty() {
        ui.separator();
        ui.label(&state.status);
    }

    actions
}
