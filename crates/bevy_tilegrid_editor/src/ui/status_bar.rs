//! Status line below the canvas

use bevy_egui::egui;

use crate::canvas::{CanvasSignals, MapCanvas};
use crate::project::Project;

/// Result from rendering the status bar
#[derive(Default)]
pub struct StatusBarResult {
    /// The user picked another active layer
    pub set_layer: Option<i32>,
}

pub fn render_status_bar(
    ui: &mut egui::Ui,
    canvas: &MapCanvas,
    signals: &CanvasSignals,
    project: &Project,
) -> StatusBarResult {
    let mut result = StatusBarResult::default();

    ui.horizontal(|ui| {
        ui.label(format!("Camera position: {}", signals.camera_offset));
        ui.separator();
        ui.label(format!("Zoom amount: {:.1}", signals.zoom));
        ui.separator();

        let mut layer = canvas.layer();
        ui.label("Layer:");
        if ui.add(egui::DragValue::new(&mut layer).speed(0.1)).changed() {
            result.set_layer = Some(layer);
        }

        if let Some(tile) = canvas.hovered_tile() {
            ui.separator();
            ui.label(format!("Cursor: {}", tile));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let marker = if project.is_dirty() { "*" } else { "" };
            ui.label(format!(
                "{}{} ({} tiles)",
                project.name(),
                marker,
                project.map_data.len()
            ));
        });
    });

    result
}
