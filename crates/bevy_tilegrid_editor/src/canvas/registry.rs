//! Tile registry - render entries for the tiles currently on the canvas
//!
//! Render entries live in flat tables indexed by a generational
//! [`RenderHandle`]. A position map points each occupied cell at its handle.
//! The registry mirrors the authoritative tile store but does not own tile
//! metadata; it only keeps what drawing needs (shape and visual state).

use bevy::math::Vec2;
use bevy_tilegrid_core::Position;
use std::collections::HashMap;

use super::coords::tile_to_world_center;

/// Visual state of a rendered tile.
///
/// `Untagged`/`Tagged` are derived from the tile's tag list; `Selected` is a
/// transient overlay that is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileVisual {
    Untagged,
    Tagged,
    Selected,
}

impl TileVisual {
    /// Persisted state for a tile with or without tags
    pub fn derived(tagged: bool) -> Self {
        if tagged {
            TileVisual::Tagged
        } else {
            TileVisual::Untagged
        }
    }
}

/// Opaque handle to a render entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle {
    index: u32,
    generation: u32,
}

/// World-space quad drawn for a tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileShape {
    pub center: Vec2,
    pub size: f32,
}

/// Arena of render entries keyed by tile position
#[derive(Debug, Default)]
pub struct TileRegistry {
    tile_size: f32,
    // Flat tables, one slot per entry
    positions: Vec<Position>,
    shapes: Vec<TileShape>,
    visuals: Vec<TileVisual>,
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_slots: Vec<u32>,
    by_position: HashMap<Position, RenderHandle>,
}

impl TileRegistry {
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            ..Default::default()
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.by_position.contains_key(position)
    }

    fn handle(&self, position: &Position) -> Option<RenderHandle> {
        self.by_position.get(position).copied()
    }

    /// Create the render entry for a tile.
    ///
    /// A position has at most one entry; inserting an occupied position keeps
    /// the existing entry and returns its handle.
    pub fn insert(&mut self, position: Position, visual: TileVisual) -> RenderHandle {
        if let Some(existing) = self.handle(&position) {
            bevy::log::warn!("{} already has a render entry", position);
            return existing;
        }

        let shape = TileShape {
            center: tile_to_world_center(position, self.tile_size),
            size: self.tile_size,
        };

        let handle = if let Some(index) = self.free_slots.pop() {
            let slot = index as usize;
            self.positions[slot] = position;
            self.shapes[slot] = shape;
            self.visuals[slot] = visual;
            self.alive[slot] = true;
            RenderHandle {
                index,
                generation: self.generations[slot],
            }
        } else {
            let index = self.positions.len() as u32;
            self.positions.push(position);
            self.shapes.push(shape);
            self.visuals.push(visual);
            self.generations.push(0);
            self.alive.push(true);
            RenderHandle {
                index,
                generation: 0,
            }
        };

        self.by_position.insert(position, handle);
        handle
    }

    /// Destroy the render entry at a position
    pub fn remove(&mut self, position: &Position) -> bool {
        let Some(handle) = self.by_position.remove(position) else {
            return false;
        };
        let slot = handle.index as usize;
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free_slots.push(handle.index);
        true
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        let tile_size = self.tile_size;
        *self = Self::new(tile_size);
    }

    fn slot(&self, handle: RenderHandle) -> Option<usize> {
        let slot = handle.index as usize;
        (self.alive.get(slot).copied().unwrap_or(false) && self.generations[slot] == handle.generation)
            .then_some(slot)
    }

    /// Whether a handle still refers to a live entry
    #[cfg(test)]
    fn is_live(&self, handle: RenderHandle) -> bool {
        self.slot(handle).is_some()
    }

    pub fn visual(&self, position: &Position) -> Option<TileVisual> {
        let slot = self.slot(self.handle(position)?)?;
        Some(self.visuals[slot])
    }

    /// Change the visual state of a rendered tile, returning false if it has no entry
    pub fn set_visual(&mut self, position: &Position, visual: TileVisual) -> bool {
        let Some(slot) = self.handle(position).and_then(|h| self.slot(h)) else {
            return false;
        };
        self.visuals[slot] = visual;
        true
    }

    #[cfg(test)]
    fn shape(&self, position: &Position) -> Option<TileShape> {
        let slot = self.slot(self.handle(position)?)?;
        Some(self.shapes[slot])
    }

    /// Live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileShape, TileVisual)> + '_ {
        (0..self.positions.len())
            .filter(|&slot| self.alive[slot])
            .map(|slot| (self.positions[slot], self.shapes[slot], self.visuals[slot]))
    }

    /// Positions currently drawn as selected
    pub fn selected_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, _, visual)| *visual == TileVisual::Selected)
            .map(|(position, _, _)| position)
            .collect()
    }
}
