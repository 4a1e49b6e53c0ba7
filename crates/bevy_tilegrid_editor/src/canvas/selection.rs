//! Single-tile selection state machine
//!
//! Every rendered tile is `Untagged`, `Tagged` or `Selected`, and at most one
//! position on the whole map is `Selected`. Selecting a tile is done in two
//! explicit steps: demote the previously selected tile (if any) to its
//! derived state, then promote the new one. No step re-enters `toggle`.

use bevy::log::{error, warn};
use bevy_tilegrid_core::{Position, TileStore};

use super::registry::{TileRegistry, TileVisual};

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The tile became the current tile; `previous` was demoted first
    Selected { previous: Option<Position> },
    /// The tile was the current tile and went back to its derived state
    Deselected,
    /// Registry and store disagreed about the tile; nothing was selected
    Inconsistent,
}

/// Tracks the one active tile
#[derive(Debug, Default)]
pub struct SelectionMachine {
    current: Option<Position>,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected tile, if any
    pub fn current(&self) -> Option<Position> {
        self.current
    }

    /// Toggle the selection state of the tile at `position`
    pub fn toggle<S: TileStore + ?Sized>(
        &mut self,
        position: Position,
        registry: &mut TileRegistry,
        store: &S,
    ) -> ToggleOutcome {
        let Some(visual) = registry.visual(&position) else {
            error!("{} does not exist, could not toggle", position);
            return ToggleOutcome::Inconsistent;
        };

        match visual {
            TileVisual::Untagged | TileVisual::Tagged => {
                let previous = self.current.take();
                if let Some(previous) = previous.filter(|p| *p != position) {
                    demote(previous, registry, store);
                }

                registry.set_visual(&position, TileVisual::Selected);
                self.current = Some(position);
                ToggleOutcome::Selected { previous }
            }
            TileVisual::Selected => {
                self.current = None;
                if demote(position, registry, store) {
                    ToggleOutcome::Deselected
                } else {
                    ToggleOutcome::Inconsistent
                }
            }
        }
    }

    /// Deselect the current tile, if any
    pub fn deselect<S: TileStore + ?Sized>(
        &mut self,
        registry: &mut TileRegistry,
        store: &S,
    ) -> Option<Position> {
        let current = self.current?;
        self.toggle(current, registry, store);
        Some(current)
    }

    /// Forget the current tile without touching its render entry.
    ///
    /// Used when the entry itself is being destroyed or rebuilt.
    pub fn clear(&mut self) -> Option<Position> {
        self.current.take()
    }

    /// Re-derive the colour of a tile after its tags changed.
    ///
    /// A selected tile keeps its overlay; the new state shows once it is deselected.
    pub fn refresh<S: TileStore + ?Sized>(
        &mut self,
        position: Position,
        registry: &mut TileRegistry,
        store: &S,
    ) {
        match registry.visual(&position) {
            Some(TileVisual::Selected) => {}
            Some(_) => {
                demote(position, registry, store);
            }
            None => {
                if store.contains(&position) {
                    warn!("{} is stored but not rendered, nothing to refresh", position);
                }
            }
        }
    }
}

/// Put a tile back into its derived state.
///
/// Returns false when the tile had no render entry or no stored data. A render
/// entry without stored data is stale and is removed.
fn demote<S: TileStore + ?Sized>(
    position: Position,
    registry: &mut TileRegistry,
    store: &S,
) -> bool {
    if !registry.contains(&position) {
        warn!("{} is not rendered, could not deselect", position);
        return false;
    }

    let Some(tile) = store.get(&position) else {
        error!(
            "tile data for {} did not exist, dropping its render entry",
            position
        );
        registry.remove(&position);
        return false;
    };

    registry.set_visual(&position, TileVisual::derived(tile.is_tagged()))
}
