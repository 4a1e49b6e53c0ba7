//! Core data structures for bevy_tilegrid
//!
//! This crate provides the fundamental types for representing a sparse tile map:
//! - `Position` - An integer grid cell `(x, y, z)` with a canonical `"x,y,z"` key
//! - `Tag` - `key:value[:extra]*` metadata attached to a tile
//! - `Tile` - One addressable cell with a name, description, search terms and tags
//! - `MapData` - The authoritative tile collection for a map
//! - `TileStore` - The synchronous get/set/delete contract the editor canvas mutates

mod map_data;
mod position;
mod store;
mod tag;
mod tile;

pub use map_data::MapData;
pub use position::{Position, PositionError};
pub use store::TileStore;
pub use tag::{Tag, TagError};
pub use tile::{Tile, DEFAULT_TILE_NAME};
