//! Standalone tile-grid map editor binary
//!
//! Run with: bevy_tilegrid_editor

use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_tilegrid_editor::canvas::{CanvasSignals, MapCanvas};
use bevy_tilegrid_editor::preferences::EditorPreferences;
use bevy_tilegrid_editor::project::Project;
use bevy_tilegrid_editor::EditorPlugin;
use std::path::PathBuf;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tile Grid Editor".to_string(),
                ..default()
            }),
            ..default()
        }))
        // Only redraw on input or when the canvas asks for it
        .insert_resource(WinitSettings::desktop_app())
        .add_plugins(EditorPlugin::default())
        .add_systems(Startup, auto_open_last_project)
        .run();
}

/// System to auto-open the last project on startup if enabled in preferences
fn auto_open_last_project(
    mut project: ResMut<Project>,
    mut canvas: ResMut<MapCanvas>,
    mut signals: ResMut<CanvasSignals>,
    preferences: Res<EditorPreferences>,
) {
    if !preferences.auto_open_last_project {
        return;
    }

    if let Some(recent) = preferences.last_project() {
        let path = PathBuf::from(&recent.path);
        if path.exists() {
            canvas.replace_store(&mut *project, Project::load_or_default(&path), &mut signals);
            info!("Auto-opened last project: {}", recent.name);
        } else {
            warn!(
                "Last project file not found: {} ({})",
                recent.name, recent.path
            );
        }
    }
}
