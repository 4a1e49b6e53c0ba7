//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::canvas::CanvasSignals;
use crate::ui::PendingAction;
use crate::EditorState;

/// Map the keys pressed this frame to an editor action
pub fn shortcut_action(keyboard: &ButtonInput<KeyCode>, has_selection: bool) -> Option<PendingAction> {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if ctrl {
        // Ctrl+Shift+S - Save As
        if keyboard.just_pressed(KeyCode::KeyS) && shift {
            return Some(PendingAction::SaveAs);
        }
        // Ctrl+S - Save
        if keyboard.just_pressed(KeyCode::KeyS) {
            return Some(PendingAction::Save);
        }
        // Ctrl+O - Open
        if keyboard.just_pressed(KeyCode::KeyO) {
            return Some(PendingAction::Open);
        }
        // Ctrl+N - New
        if keyboard.just_pressed(KeyCode::KeyN) {
            return Some(PendingAction::New);
        }
        return None;
    }

    // Delete key
    if keyboard.just_pressed(KeyCode::Delete) || keyboard.just_pressed(KeyCode::Backspace) {
        if has_selection {
            return Some(PendingAction::DeleteTile);
        }
    }

    // Escape key - clear selection
    if keyboard.just_pressed(KeyCode::Escape) && has_selection {
        return Some(PendingAction::Deselect);
    }

    None
}

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    mut contexts: EguiContexts,
    keyboard: Res<ButtonInput<KeyCode>>,
    signals: Res<CanvasSignals>,
    mut editor_state: ResMut<EditorState>,
) {
    // Only when not typing in text fields
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    if let Some(action) = shortcut_action(&keyboard, signals.current_tile.is_some()) {
        editor_state.pending_action = Some(action);
    }
}
