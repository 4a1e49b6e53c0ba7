//! Screen <-> world <-> tile coordinate conversion
//!
//! [`screen_to_tile`] is the single source of truth for hit-testing. The
//! placement functions ([`tile_to_world_center`], [`tile_to_screen_center`])
//! are only used to position render entries. World-to-tile truncates with
//! `floor`, so the mapping is lossy: only tile centres are guaranteed to map
//! back to the tile they came from.

use bevy::math::Vec2;
use bevy_tilegrid_core::Position;

use super::camera::Camera;

/// Convert a canvas pixel to a world point
pub fn screen_to_world(screen: Vec2, camera: &Camera) -> Vec2 {
    let half = camera.size * 0.5;
    let midpoint = half - camera.offset;
    half - ((half - screen) / camera.scale + midpoint)
}

/// Convert a world point to a canvas pixel
pub fn world_to_screen(world: Vec2, camera: &Camera) -> Vec2 {
    camera.size * 0.5 + (world - camera.offset) * camera.scale
}

/// Tile grid coordinate containing a world point
pub fn world_to_tile(world: Vec2, tile_size: f32, layer: i32) -> Position {
    let tile = (world / tile_size).floor();
    Position::new(tile.x as i32, tile.y as i32, layer)
}

/// Take a canvas `(x, y)` pixel and convert it to a tile position on `layer`
pub fn screen_to_tile(screen: Vec2, camera: &Camera, tile_size: f32, layer: i32) -> Position {
    world_to_tile(screen_to_world(screen, camera), tile_size, layer)
}

/// World-space centre of a tile
pub fn tile_to_world_center(position: Position, tile_size: f32) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32) * tile_size + Vec2::splat(tile_size * 0.5)
}

/// Canvas pixel at the centre of a tile
pub fn tile_to_screen_center(position: Position, camera: &Camera, tile_size: f32) -> Vec2 {
    world_to_screen(tile_to_world_center(position, tile_size), camera)
}
