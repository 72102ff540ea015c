use crate::app::GraphApp;
use crate::render::Projection;
use crate::state::Modal;
use eframe::egui::ComboBox;

/// Render the toolbar: file access, dialog launchers and view toggles
pub fn render_toolbar(app: &mut GraphApp, ctx: &eframe::egui::Context, ui: &mut eframe::egui::Ui) {
    ui.horizontal(|ui| {
        // File operations
        if ui.button("📂").on_hover_text("Open Data File").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Data Files", &["csv", "parquet"])
                .pick_file()
            {
                app.open_file(path);
            }
        }

        if !app.state.recent_files.is_empty() {
            ComboBox::from_id_salt("recent_files")
                .selected_text("📋")
                .show_ui(ui, |ui| {
                    ui.label("Recent Files:");
                    ui.separator();
                    for path in app.state.recent_files.clone() {
                        if let Some(name) = path.file_name() {
                            if ui.button(name.to_string_lossy()).clicked() {
                                app.open_file(path.clone());
                            }
                        }
                    }
                });
        }

        match app.state.data.as_ref() {
            Some(source) if app.state.loading => {
                ui.spinner();
                ui.label(format!("📄 {}", source.display_name()));
            }
            Some(source) => {
                let label = ui.label(format!("📄 {} ({} rows)", source.display_name(), source.height()));
                if let Some(path) = source.file_path() {
                    label.on_hover_text(path.display().to_string());
                }
            }
            None if app.state.loading => {
                ui.spinner();
                ui.label("Loading...");
            }
            None => {
                ui.label("No file loaded");
            }
        }

        ui.separator();

        let has_data = app.state.has_data();
        if ui
            .add_enabled(has_data, eframe::egui::Button::new("➕ Plot"))
            .on_hover_text("Plot two columns")
            .clicked()
        {
            app.open_modal(Modal::AddPlot);
        }
        if ui.button("∿ Model").on_hover_text("Add a model curve").clicked() {
            let model = app.state.ui.model_form.model;
            app.state.ui.model_form.select(model);
            app.open_modal(Modal::AddModel);
        }
        if ui.button("🏷 Titles").clicked() {
            let view = &app.state.view;
            app.state.ui.title_form.title = view.title.clone();
            app.state.ui.title_form.x_label = view.x_label.clone();
            app.state.ui.title_form.y_label = view.y_label.clone();
            app.open_modal(Modal::Titles);
        }
        if ui.button("↔ Range").on_hover_text("Model x range").clicked() {
            if let Some(range) = app.registry.model_range() {
                app.state.ui.range_form.min = range.min.to_string();
                app.state.ui.range_form.max = range.max.to_string();
            }
            app.open_modal(Modal::Range);
        }
        if ui
            .add_enabled(!app.registry.is_empty(), eframe::egui::Button::new("🗑 Clear"))
            .clicked()
        {
            app.clear_plot();
        }

        ui.separator();

        let mut projection = app.surface.projection();
        ComboBox::from_id_salt("projection")
            .selected_text(projection.name())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut projection, Projection::Cartesian, Projection::Cartesian.name());
                ui.selectable_value(&mut projection, Projection::Polar, Projection::Polar.name());
            });
        app.set_projection(projection);

        ui.toggle_value(&mut app.state.view.show_grid, "⊞").on_hover_text("Grid (G)");
        ui.toggle_value(&mut app.state.view.show_legend, "🏷").on_hover_text("Legend (L)");

        ui.separator();
        if ui
            .button(if app.state.view.dark_mode { "🌙" } else { "☀" })
            .on_hover_text("Toggle theme (T)")
            .clicked()
        {
            app.state.view.toggle_dark_mode();
        }
        if ui.button("❓").on_hover_text("Help (F1)").clicked() {
            app.state.view.show_help = !app.state.view.show_help;
        }
    });

    // Handle drag and drop
    let dropped = ctx.input(|i| {
        i.raw
            .dropped_files
            .first()
            .and_then(|f| f.path.clone())
    });
    if let Some(path) = dropped {
        app.open_file(path);
    }
}
