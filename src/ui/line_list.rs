use crate::app::GraphApp;
use crate::palette::{to_hex, ColorSlot};
use crate::registry::{Direction, LineEntry};

/// Edits collected while the registry is borrowed for display
enum LineAction {
    Select(usize),
    Recolor(usize, ColorSlot, String),
}

/// Render the line list (left sidebar), newest line first
pub fn render_line_list(app: &mut GraphApp, ui: &mut eframe::egui::Ui) {
    ui.heading("Lines");
    ui.separator();

    if app.registry.is_empty() {
        ui.label("Nothing plotted yet");
        return;
    }

    let mut actions = Vec::new();

    eframe::egui::ScrollArea::vertical()
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui| {
            for (index, entry) in app.registry.entries().iter().enumerate() {
                let is_selected = app.state.ui.selected_line == Some(index);

                ui.horizontal(|ui| {
                    let mut primary = entry.colors().primary_color();
                    if ui
                        .color_edit_button_srgba(&mut primary)
                        .on_hover_text("Line colour")
                        .changed()
                    {
                        actions.push(LineAction::Recolor(index, ColorSlot::Primary, to_hex(primary)));
                    }

                    // Models never draw a best-fit line
                    if let LineEntry::Data(_) = entry {
                        let mut secondary = entry.colors().secondary_color();
                        if ui
                            .color_edit_button_srgba(&mut secondary)
                            .on_hover_text("Best fit colour")
                            .changed()
                        {
                            actions.push(LineAction::Recolor(
                                index,
                                ColorSlot::Secondary,
                                to_hex(secondary),
                            ));
                        }
                    }

                    let icon = if entry.is_model() { "∿" } else { "📈" };
                    if ui
                        .selectable_label(is_selected, format!("{} {}", icon, entry.label()))
                        .clicked()
                    {
                        actions.push(LineAction::Select(index));
                    }
                });
            }
        });

    for action in actions {
        match action {
            LineAction::Select(index) => {
                let label = app
                    .registry
                    .get(index)
                    .map(|e| e.label().to_string())
                    .unwrap_or_default();
                app.state.ui.select_line(Some(index), &label);
            }
            LineAction::Recolor(index, slot, hex) => {
                let result = app.set_line_color(index, slot, &hex);
                app.report(result);
            }
        }
    }

    ui.separator();
    render_selected_line(app, ui);
}

fn render_selected_line(app: &mut GraphApp, ui: &mut eframe::egui::Ui) {
    let Some(index) = app.state.ui.selected_line.filter(|&i| i < app.registry.len()) else {
        ui.label("Select a line to edit it");
        return;
    };

    ui.label("Label:");
    let response = ui.text_edit_singleline(&mut app.state.ui.label_edit);
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter));

    ui.horizontal(|ui| {
        if ui.button("✔ Rename").clicked() || submitted {
            let text = app.state.ui.label_edit.clone();
            let result = app.set_line_label(index, &text);
            app.report(result);
        }

        if ui
            .add_enabled(index > 0, eframe::egui::Button::new("⏶"))
            .on_hover_text("Move up")
            .clicked()
        {
            app.move_line(index, Direction::Up);
        }
        if ui
            .add_enabled(index + 1 < app.registry.len(), eframe::egui::Button::new("⏷"))
            .on_hover_text("Move down")
            .clicked()
        {
            app.move_line(index, Direction::Down);
        }
        if ui.button("🗑").on_hover_text("Delete line").clicked() {
            let result = app.delete_line(index);
            app.report(result);
        }
    });
}
