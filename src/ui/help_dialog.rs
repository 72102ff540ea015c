use crate::app::GraphApp;

const KEYS: &[(&str, &str)] = &[
    ("R", "Reset view"),
    ("G", "Toggle grid"),
    ("L", "Toggle legend"),
    ("T", "Toggle dark/light theme"),
    ("H / F1", "Toggle this help"),
    ("Esc", "Close this help"),
];

const MOUSE: &[(&str, &str)] = &[
    ("Scroll", "Zoom"),
    ("Drag", "Pan"),
    ("Right-click", "Plot menu"),
    ("Drop file", "Load a CSV or Parquet table"),
];

const LINES: &[(&str, &str)] = &[
    ("Top of list", "Newest line, drawn over the others"),
    ("⏶ / ⏷", "Change drawing order"),
    ("Colour buttons", "Line and best-fit colours"),
];

fn shortcut_grid(ui: &mut eframe::egui::Ui, id: &str, rows: &[(&str, &str)]) {
    eframe::egui::Grid::new(id).num_columns(2).striped(true).show(ui, |ui| {
        for (input, action) in rows {
            ui.strong(*input);
            ui.label(*action);
            ui.end_row();
        }
    });
}

pub fn render_help_dialog(app: &mut GraphApp, ctx: &eframe::egui::Context) {
    if !app.state.view.show_help {
        return;
    }

    let mut open = true;
    eframe::egui::Window::new("⌨ Help")
        .open(&mut open)
        .anchor(eframe::egui::Align2::RIGHT_TOP, [-20.0, 60.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Keyboard");
            shortcut_grid(ui, "help_keys", KEYS);
            ui.separator();
            ui.heading("Mouse");
            shortcut_grid(ui, "help_mouse", MOUSE);
            ui.separator();
            ui.heading("Lines");
            shortcut_grid(ui, "help_lines", LINES);
        });

    app.state.view.show_help = open;
}
