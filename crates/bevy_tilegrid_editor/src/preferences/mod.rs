//! User preferences persisted between editor sessions

mod file;

pub use file::*;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of entries kept in the recent projects list
pub const MAX_RECENT_PROJECTS: usize = 10;

/// A project that was recently opened or saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentProject {
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EditorPreferences {
    /// Reopen the most recent project on startup
    pub auto_open_last_project: bool,
    /// Most recent first
    pub recent_projects: Vec<RecentProject>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            auto_open_last_project: true,
            recent_projects: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Move a project to the front of the recent list
    pub fn add_recent_project(&mut self, path: PathBuf, name: String) {
        let path = path.to_string_lossy().to_string();
        self.remove_recent_project(&path);
        self.recent_projects.insert(0, RecentProject { path, name });
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }

    pub fn remove_recent_project(&mut self, path: &str) {
        self.recent_projects.retain(|r| r.path != path);
    }

    pub fn clear_recent_projects(&mut self) {
        self.recent_projects.clear();
    }

    pub fn last_project(&self) -> Option<&RecentProject> {
        self.recent_projects.first()
    }
}
