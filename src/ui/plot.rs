use crate::app::GraphApp;
use crate::render::painter;
use crate::render::Projection;
use egui_plot::{Corner, Legend, Plot};

/// Render the central plot from the current scene
pub fn render_plot(app: &mut GraphApp, ui: &mut eframe::egui::Ui) {
    profiling::scope!("render_plot");

    let view = &app.state.view;
    if !view.title.is_empty() {
        ui.vertical_centered(|ui| {
            ui.heading(&view.title);
        });
    }

    let plot_height = ui.available_height().max(200.0);
    let polar = app.surface.projection() == Projection::Polar;

    let mut plot = Plot::new("plot")
        .show_grid(view.show_grid && !polar)
        .height(plot_height);

    if polar {
        // The polar grid is part of the scene, and circles must stay round
        plot = plot.data_aspect(1.0).show_axes(false);
    } else if let Some((x_label, y_label)) = view.axis_labels() {
        plot = plot.x_axis_label(x_label.to_string()).y_axis_label(y_label.to_string());
    }

    if view.show_legend {
        plot = plot.legend(
            Legend::default()
                .position(Corner::RightTop)
                .follow_insertion_order(true),
        );
    }

    if app.state.view.reset_bounds {
        plot = plot.reset();
        app.state.view.reset_bounds = false;
    }

    let primitives = app.surface.scene().primitives();
    let plot_response = plot.show(ui, |plot_ui| {
        painter::paint(plot_ui, primitives);
    });

    // Handle right-click context menu
    plot_response.response.context_menu(|ui| {
        if ui.button("Reset View").clicked() {
            app.state.view.reset_bounds = true;
            ui.close();
        }
        if ui.button("Toggle Grid").clicked() {
            app.state.view.show_grid = !app.state.view.show_grid;
            ui.close();
        }
        if ui.button("Toggle Legend").clicked() {
            app.state.view.show_legend = !app.state.view.show_legend;
            ui.close();
        }
    });
}
