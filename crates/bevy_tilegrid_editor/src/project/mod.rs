//! Project management for the map editor
//!
//! This module handles project file save/load and the Project resource.
//! `Project` is the host side of the canvas data bridge: it implements
//! [`TileStore`] over its map data and marks itself dirty on every mutation.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use bevy_tilegrid_core::{MapData, Position, Tile, TileStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Name given to projects that were never named
pub const DEFAULT_PROJECT_NAME: &str = "New Project";

/// The entire editor project
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub version: u32,
    pub id: Uuid,
    pub project_name: String,
    #[serde(default)]
    pub map_data: MapData,
    #[serde(skip)]
    pub path: Option<PathBuf>,
    #[serde(skip)]
    pub dirty: bool,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: 1,
            id: Uuid::new_v4(),
            project_name: name.into(),
            map_data: MapData::default(),
            path: None,
            dirty: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Display name, falling back to the file stem
    pub fn name(&self) -> String {
        if !self.project_name.is_empty() {
            return self.project_name.clone();
        }
        self.path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
    }
}

impl TileStore for Project {
    fn get(&self, position: &Position) -> Option<&Tile> {
        self.map_data.get(position)
    }

    fn get_mut(&mut self, position: &Position) -> Option<&mut Tile> {
        self.map_data.get_mut(position)
    }

    fn set(&mut self, position: Position, tile: Tile) {
        self.map_data.set(position, tile);
        self.dirty = true;
    }

    fn delete(&mut self, position: &Position) -> Option<Tile> {
        let removed = self.map_data.delete(position);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    fn positions_on_layer(&self, z: i32) -> Vec<Position> {
        self.map_data.positions_on_layer(z)
    }
}
