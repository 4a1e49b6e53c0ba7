//! A single addressable map cell

use crate::{Position, Tag};
use serde::{Deserialize, Serialize};

/// Name given to tiles created by clicking an empty cell
pub const DEFAULT_TILE_NAME: &str = "New Tile";

/// A tile with its metadata.
///
/// Persisted as
/// `{ "name", "description", "search": [..], "position": "x,y,z", "tags": ["key:value[:extra]*", ..] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub name: String,
    pub description: String,
    /// Free-text search terms
    #[serde(default)]
    pub search: Vec<String>,
    pub position: Position,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Tile {
    /// Create an untagged tile
    pub fn new(name: impl Into<String>, description: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            search: Vec::new(),
            position,
            tags: Vec::new(),
        }
    }

    /// The tile created when the user clicks an empty cell
    pub fn new_default(position: Position) -> Self {
        Self::new(DEFAULT_TILE_NAME, "", position)
    }

    /// Builder-style tag list
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// A tile is tagged iff its tag list is non-empty
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_default_tile() {
        let tile = Tile::new_default(Position::new(3, -2, 0));
        assert_eq!(tile.name, "New Tile");
        assert!(tile.description.is_empty());
        assert!(tile.search.is_empty());
        assert!(!tile.is_tagged());
    }

    #[test]
    fn test_tagged_iff_tags_non_empty() {
        let tile = Tile::new_default(Position::zero()).with_tags(vec![Tag::default()]);
        assert!(tile.is_tagged());
    }

    #[test]
    fn test_persisted_shape() {
        let mut tile = Tile::new("Well", "A deep well", Position::new(1, 2, 0))
            .with_tags(vec![Tag::parse("water:fresh:cold").unwrap()]);
        tile.search = vec!["water".to_string()];

        let value = serde_json::to_value(&tile).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Well",
                "description": "A deep well",
                "search": ["water"],
                "position": "1,2,0",
                "tags": ["water:fresh:cold"],
            })
        );
    }

    #[test]
    fn test_load_rejects_bad_tag() {
        let json = r#"{"name":"x","description":"","position":"0,0,0","tags":["broken"]}"#;
        assert!(serde_json::from_str::<Tile>(json).is_err());
    }
}
