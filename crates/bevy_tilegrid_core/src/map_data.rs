//! Map data - the authoritative tile collection for a map

use crate::{Position, Tag, Tile, TileStore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named map holding at most one tile per position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub name: String,
    /// Tiles keyed by position; persisted as an array of tile objects
    #[serde(default, with = "tiles_as_list")]
    pub tiles: HashMap<Position, Tile>,
    /// Tag vocabulary known to the map
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Default for MapData {
    fn default() -> Self {
        Self::new("New Map")
    }
}

impl MapData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiles: HashMap::new(),
            tags: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Add a tag to the vocabulary unless an equal key/value pair is already known
    pub fn register_tag(&mut self, tag: Tag) -> bool {
        if self.tags.iter().any(|t| t.equals_tag(&tag)) {
            return false;
        }
        self.tags.push(tag);
        true
    }
}

impl TileStore for MapData {
    fn get(&self, position: &Position) -> Option<&Tile> {
        self.tiles.get(position)
    }

    fn get_mut(&mut self, position: &Position) -> Option<&mut Tile> {
        self.tiles.get_mut(position)
    }

    fn set(&mut self, position: Position, mut tile: Tile) {
        tile.position = position;
        self.tiles.insert(position, tile);
    }

    fn delete(&mut self, position: &Position) -> Option<Tile> {
        self.tiles.remove(position)
    }

    fn positions_on_layer(&self, z: i32) -> Vec<Position> {
        let mut positions: Vec<Position> =
            self.tiles.keys().filter(|p| p.z == z).copied().collect();
        positions.sort();
        positions
    }
}

mod tiles_as_list {
    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        tiles: &HashMap<Position, Tile>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut sorted: Vec<&Tile> = tiles.values().collect();
        sorted.sort_by_key(|t| t.position);
        serializer.collect_seq(sorted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Position, Tile>, D::Error> {
        let list = Vec::<Tile>::deserialize(deserializer)?;
        let mut tiles = HashMap::with_capacity(list.len());
        for tile in list {
            let position = tile.position;
            if tiles.insert(position, tile).is_some() {
                return Err(D::Error::custom(format!(
                    "duplicate tile at position {}",
                    position
                )));
            }
        }
        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_operations() {
        let mut map = MapData::default();
        let pos = Position::new(3, -2, 0);

        assert!(!map.contains(&pos));
        map.set(pos, Tile::new_default(pos));
        assert!(map.contains(&pos));
        assert!(!map.is_tagged(&pos));

        map.get_mut(&pos).unwrap().tags.push(Tag::default());
        assert!(map.is_tagged(&pos));

        let removed = map.delete(&pos);
        assert!(removed.is_some());
        assert!(map.is_empty());
    }

    #[test]
    fn test_set_replaces_and_normalizes_position() {
        let mut map = MapData::default();
        let pos = Position::new(1, 1, 0);
        map.set(pos, Tile::new("first", "", Position::zero()));
        map.set(pos, Tile::new("second", "", Position::zero()));

        assert_eq!(map.len(), 1);
        let tile = map.get(&pos).unwrap();
        assert_eq!(tile.name, "second");
        assert_eq!(tile.position, pos);
    }

    #[test]
    fn test_positions_on_layer() {
        let mut map = MapData::default();
        for pos in [
            Position::new(2, 0, 0),
            Position::new(0, 0, 1),
            Position::new(-1, 5, 0),
        ] {
            map.set(pos, Tile::new_default(pos));
        }
        assert_eq!(
            map.positions_on_layer(0),
            vec![Position::new(-1, 5, 0), Position::new(2, 0, 0)]
        );
        assert_eq!(map.positions_on_layer(1), vec![Position::new(0, 0, 1)]);
        assert!(map.positions_on_layer(7).is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_tiles() {
        let mut map = MapData::new("Overworld");
        let pos = Position::new(4, 4, 0);
        map.set(
            pos,
            Tile::new_default(pos).with_tags(vec![Tag::parse("town:capital").unwrap()]),
        );
        map.register_tag(Tag::parse("town:capital").unwrap());

        let json = serde_json::to_string(&map).unwrap();
        let loaded: MapData = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, map);
    }

    #[test]
    fn test_duplicate_positions_rejected() {
        let json = r#"{
            "name": "dupes",
            "tiles": [
                {"name": "a", "description": "", "position": "0,0,0"},
                {"name": "b", "description": "", "position": "0,0,0"}
            ]
        }"#;
        let err = serde_json::from_str::<MapData>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate tile at position 0,0,0"));
    }

    #[test]
    fn test_register_tag_deduplicates() {
        let mut map = MapData::default();
        assert!(map.register_tag(Tag::parse("a:b").unwrap()));
        assert!(!map.register_tag(Tag::parse("a:b:extra").unwrap()));
        assert_eq!(map.tags.len(), 1);
    }
}
