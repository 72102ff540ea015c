//! Modal dialogs for adding lines, editing titles and the model range

use crate::app::GraphApp;
use crate::data::Transform;
use crate::models::Model;
use crate::registry::RenderStrategy;
use crate::state::Modal;
use eframe::egui::{Align2, ComboBox, Context, Grid, Ui, Window};

/// What the user pressed at the bottom of a dialog
#[derive(PartialEq)]
enum Choice {
    Pending,
    Confirm,
    Cancel,
}

fn dialog_buttons(ui: &mut Ui, confirm: &str) -> Choice {
    let mut choice = Choice::Pending;
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(confirm).clicked() {
            choice = Choice::Confirm;
        }
        if ui.button("Cancel").clicked() {
            choice = Choice::Cancel;
        }
    });
    choice
}

fn dialog_window(title: &str) -> Window<'static> {
    Window::new(title)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
}

/// Render whichever dialog is open
pub fn render_dialogs(app: &mut GraphApp, ctx: &Context) {
    let choice = match app.state.ui.modal() {
        Modal::None => return,
        Modal::AddPlot => render_add_plot(app, ctx),
        Modal::AddModel => render_add_model(app, ctx),
        Modal::Titles => render_titles(app, ctx),
        Modal::Range => render_range(app, ctx),
    };

    match choice {
        Choice::Pending => {}
        Choice::Cancel => app.state.ui.close_modal(),
        Choice::Confirm => {
            let result = match app.state.ui.modal() {
                Modal::AddPlot => app.add_plot(),
                Modal::AddModel => app.submit_model(),
                Modal::Titles => {
                    app.apply_titles();
                    Ok(())
                }
                Modal::Range => app.apply_range(),
                Modal::None => Ok(()),
            };
            // A failed submit keeps the dialog open so the input can be fixed
            if result.is_ok() {
                app.state.ui.close_modal();
            }
            app.report(result);
        }
    }
}

fn column_combo(ui: &mut Ui, id: &str, selected: &mut String, columns: &[String]) {
    ComboBox::from_id_salt(id)
        .selected_text(selected.as_str())
        .show_ui(ui, |ui| {
            for column in columns {
                ui.selectable_value(selected, column.clone(), column);
            }
        });
}

fn transform_combo(ui: &mut Ui, id: &str, selected: &mut Transform) {
    ComboBox::from_id_salt(id)
        .selected_text(selected.name())
        .show_ui(ui, |ui| {
            for transform in Transform::ALL {
                ui.selectable_value(selected, transform, transform.name());
            }
        });
}

fn render_add_plot(app: &mut GraphApp, ctx: &Context) -> Choice {
    let columns = app.state.column_names();
    let form = &mut app.state.ui.plot_form;
    let mut choice = Choice::Pending;

    dialog_window("➕ Add Plot").show(ctx, |ui| {
        Grid::new("plot_form").num_columns(3).show(ui, |ui| {
            ui.label("X:");
            column_combo(ui, "plot_x_column", &mut form.x_column, &columns);
            transform_combo(ui, "plot_x_transform", &mut form.x_transform);
            ui.end_row();

            ui.label("Y:");
            column_combo(ui, "plot_y_column", &mut form.y_column, &columns);
            transform_combo(ui, "plot_y_transform", &mut form.y_transform);
            ui.end_row();
        });

        ui.separator();
        ui.horizontal(|ui| {
            for strategy in RenderStrategy::ALL {
                ui.radio_value(&mut form.strategy, strategy, strategy.name());
            }
        });
        ui.checkbox(&mut form.show_best_fit, "Line of best fit");
        ui.checkbox(&mut form.show_correlation, "Pearson's r");
        ui.checkbox(&mut form.scale_y, "Standardise y");

        let hint = form.selection().default_label();
        ui.horizontal(|ui| {
            ui.label("Label:");
            ui.add(eframe::egui::TextEdit::singleline(&mut form.label).hint_text(hint));
        });

        choice = dialog_buttons(ui, "Plot");
    });
    choice
}

fn render_add_model(app: &mut GraphApp, ctx: &Context) -> Choice {
    let form = &mut app.state.ui.model_form;
    let mut choice = Choice::Pending;

    dialog_window("∿ Add Model").show(ctx, |ui| {
        let mut model = form.model;
        ComboBox::from_id_salt("model_kind")
            .selected_text(model.name())
            .show_ui(ui, |ui| {
                for candidate in Model::ALL {
                    ui.selectable_value(&mut model, candidate, candidate.name());
                }
            });
        if model != form.model || form.inputs.len() != model.param_names().len() {
            form.select(model);
        }

        Grid::new("model_params").num_columns(2).show(ui, |ui| {
            for (name, input) in model.param_names().iter().zip(form.inputs.iter_mut()) {
                ui.label(format!("{} =", name));
                ui.text_edit_singleline(input);
                ui.end_row();
            }
        });

        choice = dialog_buttons(ui, "Add");
    });
    choice
}

fn render_titles(app: &mut GraphApp, ctx: &Context) -> Choice {
    let form = &mut app.state.ui.title_form;
    let mut choice = Choice::Pending;

    dialog_window("🏷 Titles").show(ctx, |ui| {
        Grid::new("title_form").num_columns(2).show(ui, |ui| {
            ui.label("Title:");
            ui.text_edit_singleline(&mut form.title);
            ui.end_row();
            ui.label("X axis:");
            ui.text_edit_singleline(&mut form.x_label);
            ui.end_row();
            ui.label("Y axis:");
            ui.text_edit_singleline(&mut form.y_label);
            ui.end_row();
        });
        choice = dialog_buttons(ui, "Apply");
    });
    choice
}

fn render_range(app: &mut GraphApp, ctx: &Context) -> Choice {
    let form = &mut app.state.ui.range_form;
    let mut choice = Choice::Pending;

    dialog_window("↔ Model Range").show(ctx, |ui| {
        Grid::new("range_form").num_columns(2).show(ui, |ui| {
            ui.label("Min x:");
            ui.text_edit_singleline(&mut form.min);
            ui.end_row();
            ui.label("Max x:");
            ui.text_edit_singleline(&mut form.max);
            ui.end_row();
        });
        choice = dialog_buttons(ui, "Apply");
    });
    choice
}

/// Show the last error until dismissed
pub fn render_notice(app: &mut GraphApp, ctx: &Context) {
    let Some(notice) = app.state.ui.notice.clone() else {
        return;
    };

    let mut dismissed = false;
    Window::new(format!("⚠ {}", notice.title))
        .id(eframe::egui::Id::new("notice"))
        .anchor(Align2::CENTER_TOP, [0.0, 40.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&notice.message);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        app.state.ui.clear_error();
    }
}
