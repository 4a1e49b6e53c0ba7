//! Menu bar UI

use bevy_egui::egui;
use std::path::PathBuf;

use super::{PendingAction, UiState};
use crate::preferences::EditorPreferences;
use crate::EditorState;

/// File menu entries before the recent list: label, action, shortcut hint
const OPEN_ENTRIES: [(&str, PendingAction, &str); 2] = [
    ("New Project", PendingAction::New, "Ctrl+N"),
    ("Open Project...", PendingAction::Open, "Ctrl+O"),
];

/// File menu entries after the recent list
const SAVE_ENTRIES: [(&str, PendingAction, &str); 2] = [
    ("Save", PendingAction::Save, "Ctrl+S"),
    ("Save As...", PendingAction::SaveAs, "Ctrl+Shift+S"),
];

/// Numbered label for an entry in the recent projects submenu
pub fn recent_label(index: usize, name: &str) -> String {
    format!("{}. {}", index + 1, name)
}

/// A menu button that queues `action` and closes the menu
fn action_button(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    (label, action, shortcut): (&str, PendingAction, &str),
) {
    if ui
        .add(egui::Button::new(label).shortcut_text(shortcut))
        .clicked()
    {
        editor_state.pending_action = Some(action);
        ui.close();
    }
}

fn render_recent_menu(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    preferences: &EditorPreferences,
) {
    if preferences.recent_projects.is_empty() {
        ui.label("(No recent projects)");
        return;
    }

    for (index, recent) in preferences.recent_projects.iter().enumerate() {
        if ui
            .button(recent_label(index, &recent.name))
            .on_hover_text(&recent.path)
            .clicked()
        {
            editor_state.pending_open_recent_project = Some(PathBuf::from(&recent.path));
            ui.close();
        }
    }
    ui.separator();
    if ui.button("Clear Recent Projects").clicked() {
        editor_state.pending_clear_recent_projects = true;
        ui.close();
    }
}

/// Render the menu bar
pub fn render_menu_bar(
    ctx: &egui::Context,
    ui_state: &mut UiState,
    editor_state: &mut EditorState,
    preferences: &EditorPreferences,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                for entry in OPEN_ENTRIES {
                    action_button(ui, editor_state, entry);
                }
                ui.menu_button("Open Recent", |ui| {
                    render_recent_menu(ui, editor_state, preferences);
                });

                ui.separator();
                for entry in SAVE_ENTRIES {
                    action_button(ui, editor_state, entry);
                }

                ui.separator();
                action_button(ui, editor_state, ("Exit", PendingAction::Exit, ""));
            });

            ui.menu_button("View", |ui| {
                if ui
                    .checkbox(&mut ui_state.show_inspector, "Inspector")
                    .clicked()
                {
                    ui.close();
                }
            });
        });
    });
}
