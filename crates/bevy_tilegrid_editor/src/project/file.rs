//! Project file save/load operations

use super::Project;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
    #[error("No file path set")]
    NoPath,
}

impl Project {
    /// Load project from file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;

        let mut project: Project =
            serde_json::from_str(&content).map_err(|e| ProjectError::ParseError(e.to_string()))?;

        project.path = Some(path.to_path_buf());
        project.dirty = false;

        Ok(project)
    }

    /// Load project from file, falling back to a fresh project if it is
    /// missing or corrupted
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(project) => project,
            Err(e) => {
                bevy::log::error!(
                    "Project data at {:?} is corrupted, using default project: {}",
                    path,
                    e
                );
                Self::default()
            }
        }
    }

    /// Save project to file
    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ProjectError::SerializeError(e.to_string()))?;

        std::fs::write(path, content)?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;

        bevy::log::info!("Saved project to {:?}", path);
        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), ProjectError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(ProjectError::NoPath)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_tilegrid_core::{Position, Tag, Tile, TileStore};

    #[test]
    fn test_save_then_load_keeps_tiles_and_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");

        let mut project = Project::new("World");
        let pos = Position::new(-4, 7, 0);
        project.set(
            pos,
            Tile::new("Well", "A deep well", pos).with_tags(vec![Tag::parse("water:fresh:cold").unwrap()]),
        );
        project.save(&path).unwrap();
        assert!(!project.is_dirty());
        assert_eq!(project.path.as_deref(), Some(path.as_path()));

        let loaded = Project::load(&path).unwrap();
        assert_eq!(loaded.id, project.id);
        assert_eq!(loaded.project_name, "World");
        let tile = loaded.get(&pos).unwrap();
        assert_eq!(tile.name, "Well");
        assert!(tile.tags[0].has_extra("cold"));
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn test_save_current_requires_path() {
        let mut project = Project::default();
        assert!(matches!(project.save_current(), Err(ProjectError::NoPath)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        project.save(&path).unwrap();
        project.mark_dirty();
        project.save_current().unwrap();
        assert!(!project.is_dirty());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Project::load(&missing), Err(ProjectError::IoError(_))));

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(Project::load(&corrupt), Err(ProjectError::ParseError(_))));
    }

    #[test]
    fn test_corrupted_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"version":1,"id":"6b9f1b9e-8c4e-4a57-9d3e-3f3b3c1d2a10","projectName":"x",
               "mapData":{"name":"m","tiles":[{"name":"t","description":"","position":"0,0,0","tags":["broken"]}]}}"#,
        )
        .unwrap();

        let project = Project::load_or_default(&path);
        assert_eq!(project.project_name, super::super::DEFAULT_PROJECT_NAME);
        assert!(project.map_data.is_empty());
        assert!(project.path.is_none());
    }
}
