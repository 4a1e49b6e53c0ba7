//! File actions and popup dialogs

use bevy_egui::egui;

use crate::canvas::{CanvasSignals, MapCanvas};
use crate::project::Project;
use crate::EditorState;

/// An editor action requested from the menu or the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    /// Delete the selected tile
    DeleteTile,
    /// Clear the tile selection
    Deselect,
}

/// Render all dialogs
pub fn render_dialogs(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    project: &mut Project,
    canvas: &mut MapCanvas,
    signals: &mut CanvasSignals,
) {
    render_error_dialog(ctx, editor_state);

    // Handle pending file actions
    if let Some(action) = editor_state.pending_action.take() {
        match action {
            PendingAction::New => {
                if project.is_dirty() {
                    bevy::log::warn!("Discarding unsaved changes in '{}'", project.name());
                }
                canvas.replace_store(project, Project::default(), signals);
                bevy::log::info!("Started a new project");
            }
            PendingAction::Open => {
                #[cfg(feature = "native")]
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Map Project", &["json"])
                        .pick_file()
                    {
                        match Project::load(&path) {
                            Ok(loaded) => {
                                canvas.replace_store(project, loaded, signals);
                                // Add to recent projects
                                editor_state.pending_add_recent_project = Some(path);
                            }
                            Err(e) => {
                                editor_state.error_message =
                                    Some(format!("Failed to load project: {}", e));
                            }
                        }
                    }
                }
                #[cfg(not(feature = "native"))]
                {
                    editor_state.error_message =
                        Some("File dialogs are not available in this build".to_string());
                }
            }
            PendingAction::Save => {
                if project.path.is_some() {
                    if let Err(e) = project.save_current() {
                        editor_state.error_message = Some(format!("Failed to save: {}", e));
                    }
                } else {
                    // No path set, trigger Save As
                    editor_state.pending_action = Some(PendingAction::SaveAs);
                }
            }
            PendingAction::SaveAs => {
                #[cfg(feature = "native")]
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Map Project", &["json"])
                        .set_file_name(format!("{}.json", project.name()))
                        .save_file()
                    {
                        match project.save(&path) {
                            Ok(()) => {
                                // Add to recent projects
                                editor_state.pending_add_recent_project = Some(path);
                            }
                            Err(e) => {
                                editor_state.error_message = Some(format!("Failed to save: {}", e));
                            }
                        }
                    }
                }
                #[cfg(not(feature = "native"))]
                {
                    editor_state.error_message =
                        Some("File dialogs are not available in this build".to_string());
                }
            }
            _ => {
                // Put other actions back
                editor_state.pending_action = Some(action);
            }
        }
    }
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}
