//! Tile edit form
//!
//! Edits are written into the project immediately; the caller mirrors the
//! tile's derived colour back into the canvas when [`InspectorResult::changed`]
//! is set.

use bevy_egui::egui;
use bevy_tilegrid_core::{MapData, Position, Tag};

use crate::project::Project;

/// Form state that outlives a single frame
#[derive(Default)]
pub struct InspectorState {
    /// Tile the buffers below were loaded from
    position: Option<Position>,
    /// Search terms as typed, so separators survive between frames
    search_buffer: String,
}

/// Result from rendering the inspector
#[derive(Default)]
pub struct InspectorResult {
    /// A tile's data was edited
    pub changed: Option<Position>,
    /// The Delete button was pressed
    pub delete: bool,
}

/// Split a comma separated list of search terms
pub fn parse_search_terms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render the tile inspector
pub fn render_inspector(
    ui: &mut egui::Ui,
    state: &mut InspectorState,
    current_tile: Option<Position>,
    project: &mut Project,
) -> InspectorResult {
    let mut result = InspectorResult::default();

    ui.heading("Tile");
    ui.separator();

    let Some(position) = current_tile else {
        state.position = None;
        ui.label("no tile selected");
        ui.separator();
        ui.add_enabled(false, egui::Button::new("Delete"));
        return result;
    };

    let MapData {
        tiles,
        tags: vocabulary,
        ..
    } = &mut project.map_data;

    let Some(tile) = tiles.get_mut(&position) else {
        ui.label(format!("{} has no stored data", position));
        return result;
    };

    if state.position != Some(position) {
        state.position = Some(position);
        state.search_buffer = tile.search.join(", ");
    }

    let mut changed = false;
    let mut learned: Vec<Tag> = Vec::new();

    ui.label(format!("Current tile: {}", position));
    ui.add_space(4.0);

    egui::Grid::new("tile_fields")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Name");
            changed |= ui.text_edit_singleline(&mut tile.name).changed();
            ui.end_row();

            ui.label("Description");
            changed |= ui.text_edit_multiline(&mut tile.description).changed();
            ui.end_row();

            ui.label("Search");
            if ui
                .text_edit_singleline(&mut state.search_buffer)
                .on_hover_text("Comma separated")
                .changed()
            {
                tile.search = parse_search_terms(&state.search_buffer);
                changed = true;
            }
            ui.end_row();
        });

    ui.separator();
    ui.strong("Tags");

    let mut remove = None;
    egui::Grid::new("tile_tags")
        .num_columns(4)
        .striped(true)
        .show(ui, |ui| {
            ui.label("Key");
            ui.label("Value");
            ui.label("Extra");
            ui.label("");
            ui.end_row();

            for (index, tag) in tile.tags.iter_mut().enumerate() {
                // Edits containing ':' are rejected, so the field keeps its old text
                let mut key_text = tag.key().to_string();
                let key = ui.add(egui::TextEdit::singleline(&mut key_text).desired_width(70.0));
                if key.changed() && tag.set_key(&key_text).is_ok() {
                    changed = true;
                }

                let mut value_text = tag.value().to_string();
                let value =
                    ui.add(egui::TextEdit::singleline(&mut value_text).desired_width(70.0));
                if value.changed() && tag.set_value(&value_text).is_ok() {
                    changed = true;
                }

                if key.lost_focus() || value.lost_focus() {
                    learned.push(tag.clone());
                }

                let mut extra = tag.extra_string();
                if ui
                    .add(egui::TextEdit::singleline(&mut extra).desired_width(90.0))
                    .on_hover_text("a:b:c")
                    .changed()
                {
                    tag.set_extra_string(&extra);
                    changed = true;
                }

                if ui.small_button("x").on_hover_text("Remove tag").clicked() {
                    remove = Some(index);
                }
                ui.end_row();
            }
        });

    if let Some(index) = remove {
        tile.tags.remove(index);
        changed = true;
    }

    ui.horizontal(|ui| {
        if ui.button("Add Tag").clicked() {
            tile.tags.push(Tag::default());
            changed = true;
        }

        ui.add_enabled_ui(!vocabulary.is_empty(), |ui| {
            ui.menu_button("Add Known Tag", |ui| {
                for known in vocabulary.iter() {
                    if ui.button(known.to_string()).clicked() {
                        tile.tags.push(known.clone());
                        changed = true;
                        ui.close();
                    }
                }
            });
        });
    });

    ui.separator();
    if ui.button("Delete").clicked() {
        result.delete = true;
    }

    for tag in learned {
        project.map_data.register_tag(tag);
    }

    if changed {
        project.mark_dirty();
        result.changed = Some(position);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_terms() {
        assert_eq!(
            parse_search_terms(" cave, dark ,,water "),
            vec!["cave", "dark", "water"]
        );
        assert!(parse_search_terms(" , ").is_empty());
        assert!(parse_search_terms("").is_empty());
    }
}
