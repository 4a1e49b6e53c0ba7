//! Editor UI components using bevy_egui
//!
//! This module provides the menu bar, status line, tile inspector and the
//! central canvas view.

mod canvas_view;
mod dialogs;
mod inspector;
mod menu_bar;
mod status_bar;

pub use canvas_view::{render_canvas_view, to_pointer_button};
pub use dialogs::*;
pub use inspector::{render_inspector, InspectorResult, InspectorState};
pub use menu_bar::*;
pub use status_bar::{render_status_bar, StatusBarResult};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::canvas::{CanvasSignals, MapCanvas};
use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::EditorState;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// UI state for panel visibility and sizes
#[derive(Resource)]
pub struct UiState {
    pub show_inspector: bool,
    pub inspector_width: f32,
    pub inspector: InspectorState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_inspector: true,
            inspector_width: 280.0,
            inspector: InspectorState::default(),
        }
    }
}

fn render_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut editor_state: ResMut<EditorState>,
    mut project: ResMut<Project>,
    preferences: Res<EditorPreferences>,
    mut canvas: ResMut<MapCanvas>,
    mut signals: ResMut<CanvasSignals>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Menu bar
    render_menu_bar(ctx, &mut ui_state, &mut editor_state, &preferences);

    // File actions and error popups
    render_dialogs(
        ctx,
        &mut editor_state,
        &mut project,
        &mut canvas,
        &mut signals,
    );

    // Bottom panel - status line
    let status = egui::TopBottomPanel::bottom("status_bar")
        .show(ctx, |ui| render_status_bar(ui, &canvas, &signals, &project))
        .inner;
    if let Some(layer) = status.set_layer {
        canvas.set_layer(layer, &*project, &mut signals);
    }

    // Right panel - Inspector
    let mut inspector_result = InspectorResult::default();
    if ui_state.show_inspector {
        let UiState {
            inspector_width,
            inspector,
            ..
        } = &mut *ui_state;
        egui::SidePanel::right("inspector")
            .resizable(true)
            .default_width(*inspector_width)
            .show(ctx, |ui| {
                *inspector_width = ui.available_width();
                egui::ScrollArea::vertical()
                    .id_salt("inspector_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        inspector_result =
                            render_inspector(ui, inspector, signals.current_tile, &mut project);
                    });
            });
    }

    // Handle inspector actions
    if let Some(position) = inspector_result.changed {
        canvas.refresh_tile(position, &*project);
    }
    if inspector_result.delete {
        editor_state.pending_action = Some(PendingAction::DeleteTile);
    }

    // Central canvas
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            render_canvas_view(ui, &mut canvas, &mut project, &mut signals);
        });
}
