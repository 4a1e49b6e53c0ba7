//! Systems that drive the map canvas from bevy input and editor actions

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::canvas::{CanvasSignals, MapCanvas};
use crate::project::Project;
use crate::ui::PendingAction;
use crate::EditorState;

/// Browser-style pixels per wheel line
const PIXELS_PER_LINE: f32 = 100.0;

/// Plugin for canvas input and action processing
pub struct EditorToolsPlugin;

impl Plugin for EditorToolsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_zoom_input, process_canvas_actions).chain(),
        );
    }
}

/// Convert a bevy wheel event to a browser-style delta (positive scrolls down)
pub fn wheel_delta(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => -y,
    }
}

/// System to handle zoom input
#[allow(deprecated)] // EventReader is deprecated but still works in Bevy 0.17
fn handle_zoom_input(
    mut contexts: EguiContexts,
    mut canvas: ResMut<MapCanvas>,
    mut signals: ResMut<CanvasSignals>,
    mut scroll_events: bevy::ecs::event::EventReader<MouseWheel>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Only zoom while the pointer is over the canvas and egui isn't dragging something
    let blocked = !canvas.is_hovered() || ctx.is_using_pointer();

    for event in scroll_events.read() {
        if blocked {
            continue;
        }
        let zoom = canvas.zoom(wheel_delta(event.unit, event.y), &mut signals);
        bevy::log::debug!("zoom {}", zoom);
    }
}

/// System to process pending actions that act on the canvas
#[allow(deprecated)]
fn process_canvas_actions(
    mut editor_state: ResMut<EditorState>,
    mut project: ResMut<Project>,
    mut canvas: ResMut<MapCanvas>,
    mut signals: ResMut<CanvasSignals>,
    mut exit: bevy::ecs::event::EventWriter<AppExit>,
) {
    let Some(action) = editor_state.pending_action.take() else {
        return;
    };

    match action {
        PendingAction::DeleteTile => {
            canvas.delete_selected(&mut *project, &mut signals);
        }
        PendingAction::Deselect => {
            canvas.deselect(&*project, &mut signals);
        }
        PendingAction::Exit => {
            if project.is_dirty() {
                bevy::log::warn!("Exiting with unsaved changes in '{}'", project.name());
            }
            exit.write(AppExit::Success);
        }
        // File operations are handled in the dialogs
        _ => {
            editor_state.pending_action = Some(action);
        }
    }
}
