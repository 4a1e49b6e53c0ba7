//! bevy_tilegrid_editor - Interactive tile-grid map editor for Bevy
//!
//! This crate provides an infinite 2D tile-grid canvas with:
//! - Pan (left drag) and stepped zoom (mouse wheel)
//! - Click-to-create tiles and single-tile selection
//! - A tile edit form (name, description, search terms, tags)
//! - Project management (save/load, recent projects)
//!
//! The canvas engine in [`canvas`] is independent of the bevy app and can be
//! driven headless; [`EditorPlugin`] wires it into bevy and egui.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_tilegrid_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::default())
//!         .run();
//! }
//! ```

pub mod canvas;
pub mod commands;
pub mod preferences;
pub mod project;
pub mod tools;
pub mod ui;

// Re-export the data model
pub use bevy_tilegrid_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::path::PathBuf;

use canvas::{CanvasConfig, CanvasSignals, MapCanvas, TilePalette};
use commands::handle_keyboard_shortcuts;
use project::Project;
use tools::EditorToolsPlugin;
use ui::{EditorUiPlugin, PendingAction};

/// Main editor plugin with configurable canvas settings
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use bevy_tilegrid_editor::EditorPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_tile_size(16.0)
///             .with_initial_zoom(2.0)
///             .with_origin_marker(false)
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    pub canvas_config: CanvasConfig,
}

impl EditorPlugin {
    /// Create an editor plugin with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tile edge length in world units (default: 10)
    pub fn with_tile_size(mut self, size: f32) -> Self {
        self.canvas_config.tile_size = size.max(1.0);
        self
    }

    /// Set the initial zoom level (0.5 to 4.0, default: 1.0)
    pub fn with_initial_zoom(mut self, zoom: f32) -> Self {
        self.canvas_config.initial_zoom = self.canvas_config.zoom.quantize(zoom);
        self
    }

    /// Set whether the world origin cross is drawn (default: true)
    pub fn with_origin_marker(mut self, show: bool) -> Self {
        self.canvas_config.show_origin_marker = show;
        self
    }

    /// Set the maximum pointer travel in pixels that still counts as a click (default: 5)
    pub fn with_click_tolerance(mut self, pixels: f32) -> Self {
        self.canvas_config.click_tolerance = pixels;
        self
    }

    /// Set the tile colours
    pub fn with_palette(mut self, palette: TilePalette) -> Self {
        self.canvas_config.palette = palette;
        self
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        bevy::log::info!(
            "EditorPlugin: tile size {}, initial zoom {}",
            self.canvas_config.tile_size,
            self.canvas_config.initial_zoom
        );

        // Load user preferences
        let preferences = preferences::EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        let canvas = MapCanvas::new(self.canvas_config.clone());
        let mut signals = CanvasSignals::default();
        canvas.publish(&mut signals);

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .add_plugins(EditorToolsPlugin)
            .init_resource::<EditorState>()
            .insert_resource(preferences)
            .insert_resource(Project::default())
            .insert_resource(canvas)
            .insert_resource(signals)
            .add_systems(Startup, setup_editor_camera)
            .add_systems(Update, handle_keyboard_shortcuts)
            .add_systems(Update, handle_recent_projects);
    }
}

/// Persist preferences, logging rather than surfacing failures
fn save_preferences(preferences: &preferences::EditorPreferences) {
    if let Err(e) = preferences.save() {
        bevy::log::error!("Failed to save preferences: {}", e);
    }
}

/// System to handle recent projects updates
fn handle_recent_projects(
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<preferences::EditorPreferences>,
    mut project: ResMut<Project>,
    mut canvas: ResMut<MapCanvas>,
    mut signals: ResMut<CanvasSignals>,
) {
    if let Some(path) = editor_state.pending_add_recent_project.take() {
        let name = project.name();
        preferences.add_recent_project(path, name);
        save_preferences(&preferences);
    }

    if let Some(path) = editor_state.pending_open_recent_project.take() {
        match Project::load(&path) {
            Ok(loaded) => {
                canvas.replace_store(&mut *project, loaded, &mut signals);
                let name = project.name();
                preferences.add_recent_project(path, name);
            }
            Err(e) => {
                editor_state.error_message = Some(format!("Failed to load project: {}", e));
                // A recent entry that can't be loaded is dropped from the list
                preferences.remove_recent_project(&path.to_string_lossy());
            }
        }
        save_preferences(&preferences);
    }

    if editor_state.pending_clear_recent_projects {
        editor_state.pending_clear_recent_projects = false;
        preferences.clear_recent_projects();
        save_preferences(&preferences);
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    // Only spawn if no Camera2d exists
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Global editor state
#[derive(Resource)]
pub struct EditorState {
    pub pending_action: Option<PendingAction>,
    pub error_message: Option<String>,

    // Recent projects handling
    pub pending_add_recent_project: Option<PathBuf>,
    pub pending_open_recent_project: Option<PathBuf>,
    pub pending_clear_recent_projects: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            pending_action: None,
            error_message: None,

            pending_add_recent_project: None,
            pending_open_recent_project: None,
            pending_clear_recent_projects: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_builder() {
        let plugin = EditorPlugin::new()
            .with_tile_size(16.0)
            .with_initial_zoom(9.0)
            .with_origin_marker(false)
            .with_click_tolerance(3.0);

        assert_eq!(plugin.canvas_config.tile_size, 16.0);
        assert_eq!(plugin.canvas_config.initial_zoom, 4.0);
        assert!(!plugin.canvas_config.show_origin_marker);
        assert_eq!(plugin.canvas_config.click_tolerance, 3.0);
    }

    #[test]
    fn test_initial_zoom_is_quantized() {
        let plugin = EditorPlugin::new().with_initial_zoom(1.26);
        assert!((plugin.canvas_config.initial_zoom - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_new_editor_state_is_idle() {
        let state = EditorState::default();
        assert!(state.pending_action.is_none());
        assert!(state.error_message.is_none());
        assert!(state.pending_open_recent_project.is_none());
        assert!(!state.pending_clear_recent_projects);
    }
}
