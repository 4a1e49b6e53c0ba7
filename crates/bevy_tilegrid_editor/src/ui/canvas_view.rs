//! Central canvas view: feeds egui pointer input into the map canvas and
//! paints its draw list

use bevy::math::Vec2;
use bevy_egui::egui;

use crate::canvas::input::{PointerButton, PointerEvent};
use crate::canvas::scheduler::RedrawRequester;
use crate::canvas::{CanvasSignals, DrawRect, MapCanvas};
use crate::project::Project;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(20, 20, 24);

impl RedrawRequester for egui::Context {
    fn request_redraw(&self) {
        self.request_repaint();
    }
}

pub fn to_pointer_button(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Left,
        egui::PointerButton::Secondary => PointerButton::Right,
        egui::PointerButton::Middle => PointerButton::Middle,
        egui::PointerButton::Extra1 => PointerButton::Other(3),
        egui::PointerButton::Extra2 => PointerButton::Other(4),
    }
}

/// Render the map canvas into the remaining space of `ui`
pub fn render_canvas_view(
    ui: &mut egui::Ui,
    canvas: &mut MapCanvas,
    project: &mut Project,
    signals: &mut CanvasSignals,
) {
    let (response, painter) =
        ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let rect = response.rect;
    let local = |pos: egui::Pos2| Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);

    canvas.handle_event(
        PointerEvent::Resize {
            size: Vec2::new(rect.width(), rect.height()),
        },
        project,
        signals,
    );

    // Hover gates the continuous render loop
    let inside = response.contains_pointer();
    if inside != canvas.is_hovered() {
        let event = if inside {
            PointerEvent::Enter
        } else {
            PointerEvent::Leave
        };
        canvas.handle_event(event, project, signals);
    }

    let events = ui.input(|i| i.events.clone());
    for event in events {
        let pointer_event = match event {
            egui::Event::PointerMoved(pos) if inside || canvas.is_dragging() => {
                Some(PointerEvent::Move {
                    position: local(pos),
                })
            }
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                ..
            } if inside => Some(PointerEvent::mouse_down(to_pointer_button(button), local(pos))),
            egui::Event::PointerButton {
                pos,
                button,
                pressed: false,
                ..
            } => {
                let button = to_pointer_button(button);
                // A drag may end anywhere; other releases only count over the canvas
                (inside || (button == PointerButton::Left && canvas.is_dragging()))
                    .then(|| PointerEvent::mouse_up(button, local(pos)))
            }
            _ => None,
        };

        if let Some(pointer_event) = pointer_event {
            canvas.handle_event(pointer_event, project, signals);
        }
    }

    painter.rect_filled(rect, 0.0, BACKGROUND);
    for DrawRect {
        center,
        size,
        color,
    } in canvas.draw_list()
    {
        let [r, g, b, a] = color;
        painter.rect_filled(
            egui::Rect::from_center_size(
                rect.min + egui::vec2(center.x, center.y),
                egui::vec2(size.x, size.y),
            ),
            0.0,
            egui::Color32::from_rgba_unmultiplied(r, g, b, a),
        );
    }

    canvas.frame(ui.ctx());
}
