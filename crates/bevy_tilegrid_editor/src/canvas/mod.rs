//! Map canvas engine
//!
//! [`MapCanvas`] ties together the camera, the coordinate mapper, the tile
//! registry, the selection machine, pointer input and the render scheduler.
//! It owns none of the shared project state: the tile store and the
//! UI-facing [`CanvasSignals`] are passed into every call that touches them,
//! so the engine runs headless in unit tests.
//!
//! Every store insert/delete made here is paired, in the same call, with the
//! matching registry insert/delete.

pub mod camera;
pub mod coords;
pub mod input;
pub mod registry;
pub mod scheduler;
pub mod selection;

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use bevy_tilegrid_core::{Position, Tile, TileStore, DEFAULT_TILE_NAME};

use camera::{Camera, ZoomSettings};
use input::{PointerAction, PointerButton, PointerEvent, PointerInput};
use registry::{TileRegistry, TileVisual};
use scheduler::{RedrawRequester, RenderScheduler};
use selection::{SelectionMachine, ToggleOutcome};

/// sRGBA colour, 8 bits per channel
pub type Rgba = [u8; 4];

/// Colours used to draw the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TilePalette {
    pub untagged: Rgba,
    pub tagged: Rgba,
    pub selected: Rgba,
    pub border: Rgba,
    pub origin_marker: Rgba,
}

impl Default for TilePalette {
    fn default() -> Self {
        Self {
            untagged: [255, 0, 0, 255],
            tagged: [0, 0, 255, 255],
            selected: [0, 128, 0, 255],
            border: [255, 255, 255, 255],
            origin_marker: [255, 255, 255, 255],
        }
    }
}

impl TilePalette {
    pub fn fill(&self, visual: TileVisual) -> Rgba {
        match visual {
            TileVisual::Untagged => self.untagged,
            TileVisual::Tagged => self.tagged,
            TileVisual::Selected => self.selected,
        }
    }
}

/// Canvas engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Tile edge length in world units
    pub tile_size: f32,
    /// Border drawn inside each tile, in world units
    pub border_width: f32,
    pub zoom: ZoomSettings,
    pub initial_zoom: f32,
    /// Manhattan distance in pixels under which a press/release pair is a click
    pub click_tolerance: f32,
    /// Name given to tiles created by clicking an empty cell
    pub default_tile_name: String,
    pub palette: TilePalette,
    pub show_origin_marker: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            tile_size: 10.0,
            border_width: 1.0,
            zoom: ZoomSettings::default(),
            initial_zoom: 1.0,
            click_tolerance: 5.0,
            default_tile_name: DEFAULT_TILE_NAME.to_string(),
            palette: TilePalette::default(),
            show_origin_marker: true,
        }
    }
}

/// Read-only projections of the canvas for the surrounding UI
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CanvasSignals {
    pub zoom: f32,
    /// Camera offset floored to whole world units, with the active layer as z
    pub camera_offset: Position,
    pub current_tile: Option<Position>,
}

impl Default for CanvasSignals {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            camera_offset: Position::zero(),
            current_tile: None,
        }
    }
}

/// How the host should treat an event after the canvas saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Handled,
    /// Handled, and the host's default behaviour (page scroll, context menu) must not run
    SuppressDefault,
    Ignored,
}

/// What a click on the grid did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A new tile was stored, rendered and selected
    Created(Position),
    /// The cell was stored but not rendered; its render entry was created
    Materialized(Position),
    /// The selection of an existing tile was toggled
    Toggled(Position, ToggleOutcome),
}

/// Screen-space rectangle to fill, produced by [`MapCanvas::draw_list`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub center: Vec2,
    pub size: Vec2,
    pub color: Rgba,
}

/// The map canvas engine
#[derive(Resource, Debug)]
pub struct MapCanvas {
    config: CanvasConfig,
    camera: Camera,
    registry: TileRegistry,
    selection: SelectionMachine,
    input: PointerInput,
    scheduler: RenderScheduler,
    layer: i32,
    hovered: bool,
    /// Last known pointer position over the canvas
    pointer: Option<Vec2>,
}

impl Default for MapCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl MapCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        let mut camera = Camera::default();
        camera.set_zoom(config.initial_zoom, &config.zoom);

        let mut canvas = Self {
            registry: TileRegistry::new(config.tile_size),
            input: PointerInput::new(config.click_tolerance),
            selection: SelectionMachine::new(),
            scheduler: RenderScheduler::new(),
            camera,
            config,
            layer: 0,
            hovered: false,
            pointer: None,
        };
        // Ensure we render at least once
        canvas.scheduler.render();
        canvas
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Active layer used as z for hit-testing and rendering
    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn current_tile(&self) -> Option<Position> {
        self.selection.current()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether a left-button drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// Tile under the pointer while it is over the canvas
    pub fn hovered_tile(&self) -> Option<Position> {
        self.pointer.map(|p| self.tile_at(p))
    }

    /// Write the UI-facing projections
    pub fn publish(&self, signals: &mut CanvasSignals) {
        signals.zoom = self.camera.zoom_factor();
        signals.camera_offset = Position::new(
            self.camera.offset.x.floor() as i32,
            self.camera.offset.y.floor() as i32,
            self.layer,
        );
        signals.current_tile = self.selection.current();
    }

    /// Tile under a canvas pixel
    pub fn tile_at(&self, screen: Vec2) -> Position {
        coords::screen_to_tile(screen, &self.camera, self.config.tile_size, self.layer)
    }

    /// Feed one raw input event through the canvas
    pub fn handle_event<S: TileStore + ?Sized>(
        &mut self,
        event: PointerEvent,
        store: &mut S,
        signals: &mut CanvasSignals,
    ) -> EventDisposition {
        match event {
            PointerEvent::Down {
                button,
                position,
                device,
            } => {
                self.input.pointer_down(button, position, device);
                EventDisposition::Handled
            }
            PointerEvent::Move { position } => {
                self.pointer = Some(position);
                self.tick(position, signals);
                EventDisposition::Handled
            }
            PointerEvent::Up {
                button,
                position,
                device,
            } => {
                if button == PointerButton::Left {
                    // Apply any drag motion since the last tick before classifying
                    self.tick(position, signals);
                }
                if let Some(action) = self.input.pointer_up(button, position, device) {
                    self.apply(action, store, signals);
                }
                EventDisposition::Handled
            }
            PointerEvent::Wheel { delta_y } => {
                self.apply(PointerAction::Zoom(delta_y), store, signals);
                EventDisposition::SuppressDefault
            }
            PointerEvent::Enter => {
                self.hovered = true;
                self.scheduler.start();
                EventDisposition::Handled
            }
            PointerEvent::Leave => {
                self.hovered = false;
                self.pointer = None;
                self.scheduler.stop();
                EventDisposition::Handled
            }
            PointerEvent::ContextMenu => EventDisposition::SuppressDefault,
            PointerEvent::Resize { size } => {
                if size == self.camera.size {
                    return EventDisposition::Ignored;
                }
                self.resize(size, signals);
                EventDisposition::Handled
            }
        }
    }

    /// Per-frame/pointer-move update while a drag may be in progress
    pub fn tick(&mut self, pointer: Vec2, signals: &mut CanvasSignals) {
        if let Some(PointerAction::Pan(delta)) = self.input.update(pointer) {
            self.pan(delta, signals);
        }
    }

    fn apply<S: TileStore + ?Sized>(
        &mut self,
        action: PointerAction,
        store: &mut S,
        signals: &mut CanvasSignals,
    ) {
        match action {
            PointerAction::Pan(delta) => self.pan(delta, signals),
            PointerAction::Click(screen) => {
                self.click(screen, store, signals);
            }
            PointerAction::Deselect => {
                self.deselect(store, signals);
            }
            PointerAction::Zoom(delta) => {
                self.zoom(delta, signals);
            }
        }
    }

    pub fn pan(&mut self, delta_screen: Vec2, signals: &mut CanvasSignals) {
        self.camera.pan(delta_screen);
        self.publish(signals);
    }

    /// Apply a browser-style wheel delta, returning the new zoom
    pub fn zoom(&mut self, wheel_delta_y: f32, signals: &mut CanvasSignals) -> f32 {
        let zoom = self.camera.zoom(wheel_delta_y, &self.config.zoom);
        self.publish(signals);
        self.scheduler.render();
        zoom
    }

    /// Set the zoom directly (quantized and clamped)
    pub fn set_zoom(&mut self, zoom: f32, signals: &mut CanvasSignals) -> f32 {
        let zoom = self.camera.set_zoom(zoom, &self.config.zoom);
        self.publish(signals);
        self.scheduler.render();
        zoom
    }

    pub fn resize(&mut self, size: Vec2, signals: &mut CanvasSignals) {
        self.camera.resize(size);
        self.publish(signals);
        self.scheduler.render();
    }

    /// Interpret a click at a canvas pixel
    pub fn click<S: TileStore + ?Sized>(
        &mut self,
        screen: Vec2,
        store: &mut S,
        signals: &mut CanvasSignals,
    ) -> ClickOutcome {
        let position = self.tile_at(screen);
        debug!("click at {:?} hit tile {}", screen, position);

        let outcome = if store.contains(&position) {
            if !self.registry.contains(&position) {
                warn!("{} not currently rendered, rendering now", position);
                self.add_tile(position, &*store);
                ClickOutcome::Materialized(position)
            } else {
                ClickOutcome::Toggled(position, self.toggle_inner(position, &*store))
            }
        } else {
            // An entry without stored data belongs to a store that has since been replaced
            if self.registry.remove(&position) {
                warn!("dropping stale render entry for {}", position);
                if self.selection.current() == Some(position) {
                    self.selection.clear();
                }
            }
            let tile = Tile::new(self.config.default_tile_name.clone(), "", position);
            store.set(position, tile);
            self.add_tile(position, &*store);
            self.toggle_inner(position, &*store);
            info!("created tile {}", position);
            ClickOutcome::Created(position)
        };

        self.publish(signals);
        outcome
    }

    /// Create the render entry for a stored tile in its derived state
    fn add_tile<S: TileStore + ?Sized>(&mut self, position: Position, store: &S) {
        let visual = TileVisual::derived(store.is_tagged(&position));
        self.registry.insert(position, visual);
        self.scheduler.render();
    }

    fn toggle_inner<S: TileStore + ?Sized>(&mut self, position: Position, store: &S) -> ToggleOutcome {
        let outcome = self.selection.toggle(position, &mut self.registry, store);
        self.scheduler.render();
        outcome
    }

    /// Toggle the selection of a rendered tile
    pub fn toggle<S: TileStore + ?Sized>(
        &mut self,
        position: Position,
        store: &S,
        signals: &mut CanvasSignals,
    ) -> ToggleOutcome {
        let outcome = self.toggle_inner(position, store);
        self.publish(signals);
        outcome
    }

    /// Drop the current selection, if any
    pub fn deselect<S: TileStore + ?Sized>(
        &mut self,
        store: &S,
        signals: &mut CanvasSignals,
    ) -> Option<Position> {
        let deselected = self.selection.deselect(&mut self.registry, store);
        if deselected.is_some() {
            self.scheduler.render();
        }
        self.publish(signals);
        deselected
    }

    /// Re-derive a tile's colour after its metadata was edited
    pub fn refresh_tile<S: TileStore + ?Sized>(&mut self, position: Position, store: &S) {
        self.selection.refresh(position, &mut self.registry, store);
        self.scheduler.render();
    }

    /// Delete the selected tile from both the registry and the store
    pub fn delete_selected<S: TileStore + ?Sized>(
        &mut self,
        store: &mut S,
        signals: &mut CanvasSignals,
    ) -> Option<Tile> {
        let Some(position) = self.selection.clear() else {
            debug!("delete requested with no tile selected");
            self.publish(signals);
            return None;
        };

        self.registry.remove(&position);
        let removed = store.delete(&position);
        if removed.is_none() {
            warn!("{} was selected but not stored", position);
        }
        info!("deleted tile {}", position);

        // Force a complete redraw
        self.scheduler.render();
        self.publish(signals);
        removed
    }

    /// Drop every render entry and materialize one per stored tile on the active layer
    pub fn rebuild<S: TileStore + ?Sized>(&mut self, store: &S, signals: &mut CanvasSignals) {
        self.registry.clear();
        self.selection.clear();
        self.input.cancel();

        for position in store.positions_on_layer(self.layer) {
            self.registry
                .insert(position, TileVisual::derived(store.is_tagged(&position)));
        }
        info!(
            "rebuilt canvas with {} tiles on layer {}",
            self.registry.len(),
            self.layer
        );

        self.scheduler.render();
        self.publish(signals);
    }

    /// Swap the backing store for `replacement` and rebuild from it before
    /// anything else can read the registry
    pub fn replace_store<S: TileStore>(
        &mut self,
        store: &mut S,
        replacement: S,
        signals: &mut CanvasSignals,
    ) {
        *store = replacement;
        self.rebuild(&*store, signals);
    }

    /// Switch the active layer
    pub fn set_layer<S: TileStore + ?Sized>(
        &mut self,
        layer: i32,
        store: &S,
        signals: &mut CanvasSignals,
    ) {
        if layer == self.layer {
            return;
        }
        self.layer = layer;
        self.rebuild(store, signals);
    }

    /// Give the scheduler a chance to request the next frame
    pub fn frame(&mut self, requester: &dyn RedrawRequester) -> bool {
        self.scheduler.frame(requester)
    }

    /// Draw the scene: origin marker first, then every visible tile as a
    /// border quad with its fill on top. Positions and sizes are canvas pixels.
    pub fn draw_list(&self) -> Vec<DrawRect> {
        let scale = self.camera.scale;
        let palette = &self.config.palette;
        let mut rects = Vec::with_capacity(self.registry.len() * 2 + 2);

        if self.config.show_origin_marker {
            let origin = coords::world_to_screen(Vec2::ZERO, &self.camera);
            let length = self.config.tile_size;
            let thickness = self.config.tile_size * 0.05;
            for size in [Vec2::new(thickness, length), Vec2::new(length, thickness)] {
                rects.push(DrawRect {
                    center: origin,
                    size: size * scale,
                    color: palette.origin_marker,
                });
            }
        }

        let (view_min, view_max) = self.camera.visible_world_rect();
        for (_, shape, visual) in self.registry.iter() {
            let half = Vec2::splat(shape.size * 0.5);
            let min = shape.center - half;
            let max = shape.center + half;
            if max.x < view_min.x || min.x > view_max.x || max.y < view_min.y || min.y > view_max.y {
                continue;
            }

            let center = coords::world_to_screen(shape.center, &self.camera);
            rects.push(DrawRect {
                center,
                size: Vec2::splat(shape.size) * scale,
                color: palette.border,
            });
            let inner = (shape.size - self.config.border_width * 2.0).max(0.0);
            rects.push(DrawRect {
                center,
                size: Vec2::splat(inner) * scale,
                color: palette.fill(visual),
            });
        }

        rects
    }
}

#[cfg(test)]
mod tests {
    use super::input::PointerDevice;
    use super::scheduler::tests::CountingRequester;
    use super::*;
    use bevy_tilegrid_core::{MapData, Tag};

    const VIEW: Vec2 = Vec2::new(400.0, 400.0);

    fn setup() -> (MapCanvas, MapData, CanvasSignals) {
        let mut canvas = MapCanvas::default();
        let mut signals = CanvasSignals::default();
        canvas.resize(VIEW, &mut signals);
        (canvas, MapData::default(), signals)
    }

    /// Canvas pixel at the centre of a tile
    fn pixel(canvas: &MapCanvas, x: i32, y: i32) -> Vec2 {
        coords::tile_to_screen_center(
            Position::new(x, y, canvas.layer()),
            canvas.camera(),
            canvas.config().tile_size,
        )
    }

    fn left_click(canvas: &mut MapCanvas, store: &mut MapData, signals: &mut CanvasSignals, at: Vec2) {
        canvas.handle_event(PointerEvent::mouse_down(PointerButton::Left, at), store, signals);
        canvas.handle_event(PointerEvent::mouse_up(PointerButton::Left, at), store, signals);
    }

    #[test]
    fn test_renders_once_on_construction() {
        let canvas = MapCanvas::default();
        assert_eq!(canvas.scheduler().render_count(), 1);
        assert!(canvas.scheduler().is_pending());
    }

    #[test]
    fn test_click_empty_cell_creates_and_selects_then_toggles_back() {
        let (mut canvas, mut store, mut signals) = setup();
        let target = Position::new(3, -2, 0);
        let at = pixel(&canvas, 3, -2);

        left_click(&mut canvas, &mut store, &mut signals, at);
        let tile = store.get(&target).expect("tile created");
        assert_eq!(tile.name, "New Tile");
        assert_eq!(canvas.registry().visual(&target), Some(TileVisual::Selected));
        assert_eq!(signals.current_tile, Some(target));

        left_click(&mut canvas, &mut store, &mut signals, at);
        assert_eq!(canvas.registry().visual(&target), Some(TileVisual::Untagged));
        assert_eq!(signals.current_tile, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_selecting_b_leaves_a_in_derived_state() {
        let (mut canvas, mut store, mut signals) = setup();
        let a = Position::new(0, 0, 0);
        let b = Position::new(4, 1, 0);

        canvas.click(pixel(&canvas, 0, 0), &mut store, &mut signals);
        store.get_mut(&a).unwrap().tags.push(Tag::default());
        canvas.refresh_tile(a, &store);

        canvas.click(pixel(&canvas, 4, 1), &mut store, &mut signals);
        assert_eq!(canvas.registry().visual(&a), Some(TileVisual::Tagged));
        assert_eq!(canvas.registry().visual(&b), Some(TileVisual::Selected));
        assert_eq!(canvas.registry().selected_positions(), vec![b]);
        assert_eq!(signals.current_tile, Some(b));
    }

    #[test]
    fn test_click_stored_but_unrendered_materializes_only() {
        let (mut canvas, mut store, mut signals) = setup();
        let pos = Position::new(2, 2, 0);
        store.set(pos, Tile::new_default(pos).with_tags(vec![Tag::default()]));

        let outcome = canvas.click(pixel(&canvas, 2, 2), &mut store, &mut signals);
        assert_eq!(outcome, ClickOutcome::Materialized(pos));
        assert_eq!(canvas.registry().visual(&pos), Some(TileVisual::Tagged));
        assert_eq!(signals.current_tile, None);

        let outcome = canvas.click(pixel(&canvas, 2, 2), &mut store, &mut signals);
        assert_eq!(
            outcome,
            ClickOutcome::Toggled(pos, ToggleOutcome::Selected { previous: None })
        );
    }

    #[test]
    fn test_delete_selected_removes_from_registry_and_store() {
        let (mut canvas, mut store, mut signals) = setup();
        let pos = Position::new(-1, -1, 0);
        canvas.click(pixel(&canvas, -1, -1), &mut store, &mut signals);
        let renders_before = canvas.scheduler().render_count();

        let removed = canvas.delete_selected(&mut store, &mut signals);
        assert_eq!(removed.map(|t| t.position), Some(pos));
        assert!(!canvas.registry().contains(&pos));
        assert!(!store.contains(&pos));
        assert_eq!(signals.current_tile, None);
        assert!(canvas.scheduler().render_count() > renders_before);

        assert!(canvas.delete_selected(&mut store, &mut signals).is_none());
    }

    #[test]
    fn test_drag_pans_instead_of_clicking() {
        let (mut canvas, mut store, mut signals) = setup();
        let start = Vec2::new(200.0, 200.0);

        canvas.handle_event(PointerEvent::mouse_down(PointerButton::Left, start), &mut store, &mut signals);
        canvas.handle_event(PointerEvent::Move { position: start }, &mut store, &mut signals);
        canvas.handle_event(
            PointerEvent::Move {
                position: start + Vec2::new(30.0, 0.0),
            },
            &mut store,
            &mut signals,
        );
        canvas.handle_event(
            PointerEvent::mouse_up(PointerButton::Left, start + Vec2::new(40.0, 10.0)),
            &mut store,
            &mut signals,
        );

        assert!(store.is_empty());
        assert!(canvas.registry().is_empty());
        // Content follows the pointer: the camera moves the opposite way
        assert_eq!(canvas.camera().offset, Vec2::new(-40.0, -10.0));
        assert_eq!(signals.camera_offset, Position::new(-40, -10, 0));
    }

    #[test]
    fn test_small_wiggle_still_clicks_at_release_point() {
        let (mut canvas, mut store, mut signals) = setup();
        let start = pixel(&canvas, 1, 1);
        let release = start + Vec2::new(2.0, 2.0);

        canvas.handle_event(PointerEvent::mouse_down(PointerButton::Left, start), &mut store, &mut signals);
        canvas.handle_event(PointerEvent::Move { position: start }, &mut store, &mut signals);
        canvas.handle_event(PointerEvent::mouse_up(PointerButton::Left, release), &mut store, &mut signals);

        // The wiggle panned the camera by 2px before the click landed
        let expected = canvas.tile_at(release);
        assert!(store.contains(&expected));
        assert_eq!(signals.current_tile, Some(expected));
    }

    #[test]
    fn test_right_click_deselects() {
        let (mut canvas, mut store, mut signals) = setup();
        canvas.click(pixel(&canvas, 0, 0), &mut store, &mut signals);
        assert!(signals.current_tile.is_some());

        canvas.handle_event(
            PointerEvent::mouse_up(PointerButton::Right, Vec2::ZERO),
            &mut store,
            &mut signals,
        );
        assert_eq!(signals.current_tile, None);
        assert!(canvas.registry().selected_positions().is_empty());
    }

    #[test]
    fn test_wheel_zooms_and_suppresses_default() {
        let (mut canvas, mut store, mut signals) = setup();
        let disposition =
            canvas.handle_event(PointerEvent::Wheel { delta_y: -300.0 }, &mut store, &mut signals);
        assert_eq!(disposition, EventDisposition::SuppressDefault);
        assert!((signals.zoom - 1.3).abs() < 1e-6);

        for _ in 0..50 {
            canvas.handle_event(PointerEvent::Wheel { delta_y: 900.0 }, &mut store, &mut signals);
        }
        assert_eq!(signals.zoom, 0.5);
    }

    #[test]
    fn test_touch_and_context_menu_are_not_edits() {
        let (mut canvas, mut store, mut signals) = setup();
        let at = pixel(&canvas, 0, 0);
        for event in [
            PointerEvent::Down {
                button: PointerButton::Left,
                position: at,
                device: PointerDevice::Touch,
            },
            PointerEvent::Up {
                button: PointerButton::Left,
                position: at,
                device: PointerDevice::Touch,
            },
        ] {
            canvas.handle_event(event, &mut store, &mut signals);
        }
        assert!(store.is_empty());
        assert_eq!(
            canvas.handle_event(PointerEvent::ContextMenu, &mut store, &mut signals),
            EventDisposition::SuppressDefault
        );
    }

    #[test]
    fn test_hover_gates_render_loop() {
        let (mut canvas, mut store, mut signals) = setup();
        let requester = CountingRequester::default();

        // Pending construction/resize render is presented once
        assert!(canvas.frame(&requester));
        assert!(!canvas.frame(&requester));

        canvas.handle_event(PointerEvent::Enter, &mut store, &mut signals);
        assert!(canvas.is_hovered());
        assert!(canvas.frame(&requester));
        assert!(canvas.frame(&requester));

        canvas.handle_event(PointerEvent::Leave, &mut store, &mut signals);
        assert!(!canvas.frame(&requester));

        // Structural changes still render while the loop is stopped
        canvas.click(pixel(&canvas, 5, 5), &mut store, &mut signals);
        assert!(canvas.frame(&requester));
        assert_eq!(requester.0.get(), 4);
    }

    #[test]
    fn test_hovered_tile_follows_pointer() {
        let (mut canvas, mut store, mut signals) = setup();
        assert_eq!(canvas.hovered_tile(), None);

        canvas.handle_event(PointerEvent::Enter, &mut store, &mut signals);
        canvas.handle_event(
            PointerEvent::Move {
                position: pixel(&canvas, -3, 4),
            },
            &mut store,
            &mut signals,
        );
        assert_eq!(canvas.hovered_tile(), Some(Position::new(-3, 4, 0)));

        canvas.handle_event(PointerEvent::Leave, &mut store, &mut signals);
        assert_eq!(canvas.hovered_tile(), None);
    }

    #[test]
    fn test_resize_recenters_and_renders() {
        let (mut canvas, mut store, mut signals) = setup();
        canvas.pan(Vec2::new(55.0, 0.0), &mut signals);
        let renders = canvas.scheduler().render_count();

        let disposition = canvas.handle_event(
            PointerEvent::Resize {
                size: Vec2::new(800.0, 500.0),
            },
            &mut store,
            &mut signals,
        );
        assert_eq!(disposition, EventDisposition::Handled);
        assert_eq!(canvas.camera().offset, Vec2::ZERO);
        assert_eq!(signals.camera_offset, Position::zero());
        assert_eq!(canvas.scheduler().render_count(), renders + 1);

        let same = canvas.handle_event(
            PointerEvent::Resize {
                size: Vec2::new(800.0, 500.0),
            },
            &mut store,
            &mut signals,
        );
        assert_eq!(same, EventDisposition::Ignored);
    }

    #[test]
    fn test_rebuild_and_layer_switch() {
        let (mut canvas, mut store, mut signals) = setup();
        for pos in [Position::new(0, 0, 0), Position::new(1, 0, 0), Position::new(0, 0, 1)] {
            store.set(pos, Tile::new_default(pos));
        }
        canvas.click(pixel(&canvas, 9, 9), &mut store, &mut signals);
        assert!(signals.current_tile.is_some());

        canvas.rebuild(&store, &mut signals);
        assert_eq!(canvas.registry().len(), 3);
        assert_eq!(signals.current_tile, None);
        assert!(canvas.registry().selected_positions().is_empty());

        canvas.set_layer(1, &store, &mut signals);
        assert_eq!(canvas.registry().len(), 1);
        assert!(canvas.registry().contains(&Position::new(0, 0, 1)));
        assert_eq!(signals.camera_offset.z, 1);

        let created = canvas.click(pixel(&canvas, 3, 3), &mut store, &mut signals);
        assert_eq!(created, ClickOutcome::Created(Position::new(3, 3, 1)));
    }

    #[test]
    fn test_replace_store_rebuilds_before_next_click() {
        let (mut canvas, mut store, mut signals) = setup();
        let a = Position::new(2, 2, 0);
        let b = Position::new(5, 0, 0);
        canvas.click(pixel(&canvas, 2, 2), &mut store, &mut signals);
        assert_eq!(signals.current_tile, Some(a));

        let mut replacement = MapData::new("Other");
        replacement.set(b, Tile::new_default(b));
        canvas.replace_store(&mut store, replacement, &mut signals);

        assert_eq!(store.name, "Other");
        assert_eq!(signals.current_tile, None);
        assert!(!canvas.registry().contains(&a));
        assert_eq!(canvas.registry().visual(&b), Some(TileVisual::Untagged));

        // The cell is empty in the new store, so the click creates a selected tile
        let outcome = canvas.click(pixel(&canvas, 2, 2), &mut store, &mut signals);
        assert_eq!(outcome, ClickOutcome::Created(a));
        assert_eq!(canvas.registry().visual(&a), Some(TileVisual::Selected));
        assert_eq!(signals.current_tile, Some(a));
    }

    #[test]
    fn test_click_drops_entry_left_over_from_swapped_store() {
        let (mut canvas, mut store, mut signals) = setup();
        let a = Position::new(1, 1, 0);
        canvas.click(pixel(&canvas, 1, 1), &mut store, &mut signals);

        // Store swapped without a rebuild
        store = MapData::default();
        let outcome = canvas.click(pixel(&canvas, 1, 1), &mut store, &mut signals);

        assert_eq!(outcome, ClickOutcome::Created(a));
        assert_eq!(canvas.registry().len(), 1);
        assert_eq!(canvas.registry().visual(&a), Some(TileVisual::Selected));
        assert_eq!(signals.current_tile, Some(a));
    }

    #[test]
    fn test_draw_list_colors_follow_visual_state() {
        let (mut canvas, mut store, mut signals) = setup();
        let palette = canvas.config().palette.clone();

        canvas.click(pixel(&canvas, 0, 0), &mut store, &mut signals);
        let rects = canvas.draw_list();
        // Origin marker (2) + border and fill for one tile
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[2].color, palette.border);
        assert_eq!(rects[3].color, palette.selected);
        assert_eq!(rects[2].center, pixel(&canvas, 0, 0));
        assert_eq!(rects[2].size, Vec2::splat(10.0));
        assert_eq!(rects[3].size, Vec2::splat(8.0));

        canvas.deselect(&store, &mut signals);
        assert_eq!(canvas.draw_list()[3].color, palette.untagged);
    }

    #[test]
    fn test_draw_list_culls_offscreen_tiles() {
        let (mut canvas, mut store, mut signals) = setup();
        let far = Position::new(1000, 0, 0);
        store.set(far, Tile::new_default(far));
        canvas.rebuild(&store, &mut signals);

        assert_eq!(canvas.draw_list().len(), 2);

        canvas.pan(Vec2::new(10_000.0, 0.0), &mut signals);
        assert_eq!(canvas.draw_list().len(), 4);
    }

    #[test]
    fn test_draw_list_scales_with_zoom() {
        let (mut canvas, mut store, mut signals) = setup();
        canvas.set_zoom(2.0, &mut signals);
        canvas.click(pixel(&canvas, 0, 0), &mut store, &mut signals);

        let rects = canvas.draw_list();
        assert_eq!(rects[2].size, Vec2::splat(20.0));
        assert_eq!(rects[2].center, Vec2::new(210.0, 210.0));
    }
}
