//! The tile store contract consumed by the editor canvas

use crate::{Position, Tile};

/// Authoritative, synchronous tile storage keyed by position.
///
/// The canvas engine reads tile existence and tags through this trait and
/// writes new tiles, edits and deletions back into it. At most one tile exists
/// per position; `set` replaces any previous tile at that key.
pub trait TileStore {
    fn get(&self, position: &Position) -> Option<&Tile>;

    fn get_mut(&mut self, position: &Position) -> Option<&mut Tile>;

    fn set(&mut self, position: Position, tile: Tile);

    fn delete(&mut self, position: &Position) -> Option<Tile>;

    fn contains(&self, position: &Position) -> bool {
        self.get(position).is_some()
    }

    /// Whether the tile at `position` exists and carries at least one tag
    fn is_tagged(&self, position: &Position) -> bool {
        self.get(position).is_some_and(Tile::is_tagged)
    }

    /// Positions of every stored tile on layer `z`
    fn positions_on_layer(&self, z: i32) -> Vec<Position>;
}
