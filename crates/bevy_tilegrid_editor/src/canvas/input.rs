//! Pointer input interpretation for the map canvas
//!
//! Raw pointer events are classified into pans, clicks, deselects and zooms.
//! A left press followed by a release less than `click_tolerance` pixels away
//! (Manhattan distance) is a click; anything further was a drag that panned
//! the camera while the button was held.

use bevy::log::{debug, warn};
use bevy::math::Vec2;

/// Mouse button reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

/// Device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerDevice {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Raw input events the canvas consumes. Positions are canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        button: PointerButton,
        position: Vec2,
        device: PointerDevice,
    },
    Up {
        button: PointerButton,
        position: Vec2,
        device: PointerDevice,
    },
    Move {
        position: Vec2,
    },
    /// Browser-style wheel delta: positive values scroll down (zoom out)
    Wheel {
        delta_y: f32,
    },
    Enter,
    Leave,
    ContextMenu,
    Resize {
        size: Vec2,
    },
}

impl PointerEvent {
    pub fn mouse_down(button: PointerButton, position: Vec2) -> Self {
        Self::Down {
            button,
            position,
            device: PointerDevice::Mouse,
        }
    }

    pub fn mouse_up(button: PointerButton, position: Vec2) -> Self {
        Self::Up {
            button,
            position,
            device: PointerDevice::Mouse,
        }
    }
}

/// Semantic action produced by the input handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Pan the camera by a screen-space delta
    Pan(Vec2),
    /// Click at a canvas pixel
    Click(Vec2),
    /// Drop the current selection
    Deselect,
    /// Zoom by a wheel delta
    Zoom(f32),
}

/// Press/drag bookkeeping for the left button
#[derive(Debug, Clone)]
pub struct PointerInput {
    click_tolerance: f32,
    left_click_start: Vec2,
    last_drag_point: Option<Vec2>,
    left_click_down: bool,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl PointerInput {
    pub fn new(click_tolerance: f32) -> Self {
        Self {
            click_tolerance,
            left_click_start: Vec2::ZERO,
            last_drag_point: None,
            left_click_down: false,
        }
    }

    /// Whether the left button is currently held
    pub fn is_dragging(&self) -> bool {
        self.left_click_down
    }

    pub fn pointer_down(&mut self, button: PointerButton, position: Vec2, device: PointerDevice) {
        if device != PointerDevice::Mouse {
            debug!("{:?} pointer down ignored", device);
            return;
        }

        match button {
            PointerButton::Left => {
                self.left_click_start = position;
                self.left_click_down = true;
            }
            PointerButton::Right | PointerButton::Middle => {}
            PointerButton::Other(code) => {
                warn!("unhandled mouse button {} pressed", code);
            }
        }
    }

    /// Advance a held drag to the current pointer position.
    ///
    /// The first tick of a drag only records its starting point.
    pub fn update(&mut self, position: Vec2) -> Option<PointerAction> {
        if !self.left_click_down {
            return None;
        }

        match self.last_drag_point.replace(position) {
            Some(last) => {
                let delta = last - position;
                (delta != Vec2::ZERO).then_some(PointerAction::Pan(delta))
            }
            None => None,
        }
    }

    pub fn pointer_up(
        &mut self,
        button: PointerButton,
        position: Vec2,
        device: PointerDevice,
    ) -> Option<PointerAction> {
        if device != PointerDevice::Mouse {
            debug!("{:?} pointer up ignored", device);
            return None;
        }

        match button {
            PointerButton::Left => {
                if !self.left_click_down {
                    debug!("left button released without a press on the canvas");
                    return None;
                }
                self.left_click_down = false;
                self.last_drag_point = None;

                let travel = (self.left_click_start - position).abs();
                // Account for mouse wiggle
                (travel.x + travel.y < self.click_tolerance)
                    .then_some(PointerAction::Click(position))
            }
            PointerButton::Right => Some(PointerAction::Deselect),
            PointerButton::Middle => None,
            PointerButton::Other(code) => {
                warn!("unhandled mouse button {} released", code);
                None
            }
        }
    }

    /// Abandon a drag, e.g. when the pointer leaves the window mid-press
    pub fn cancel(&mut self) {
        self.left_click_down = false;
        self.last_drag_point = None;
    }
}
