use std::path::PathBuf;

use eframe::egui;

use crate::config::EngineConfig;
use crate::data::{build_sections, LoadResult, LoadWorker};
use crate::error::{PlotError, Result};
use crate::palette::ColorSlot;
use crate::registry::{Direction, PlotRegistry};
use crate::render::{Projection, RenderSurface};
use crate::state::{self, Modal};
use crate::ui;

pub struct GraphApp {
    pub state: state::AppState,
    pub registry: PlotRegistry,
    pub surface: RenderSurface,
    worker: LoadWorker,
}

impl Default for GraphApp {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GraphApp {
    pub fn new(config: EngineConfig) -> Self {
        let registry = PlotRegistry::new(config.palette.clone());
        Self {
            state: state::AppState::default(),
            registry,
            surface: RenderSurface::new(Projection::default(), config),
            worker: LoadWorker::spawn(),
        }
    }

    /// Show a failed operation as a notice
    pub fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            log::warn!("{}", e);
            self.state.ui.set_error(&e);
        }
    }

    /// Rebuild the scene. The first statistics warning becomes the notice.
    pub fn redraw(&mut self) {
        let warnings = self.surface.redraw(&self.registry);
        if let Some(first) = warnings.into_iter().next() {
            self.state.ui.set_error(&first);
        }
    }

    /// Queue a table for loading on the background worker
    pub fn open_file(&mut self, path: PathBuf) {
        self.worker.request_load(path);
        self.state.loading = true;
    }

    /// Pick up finished loads
    pub fn poll_worker(&mut self) {
        while let Some(result) = self.worker.poll() {
            match result {
                LoadResult::Loaded { source, .. } => self.state.set_data(source),
                LoadResult::Failed { error, .. } => self.state.ui.set_error(&error),
            }
        }
        self.state.loading = self.worker.is_busy();
    }

    /// Ingest the columns chosen in the add-plot form as a new data line
    pub fn add_plot(&mut self) -> Result<()> {
        profiling::scope!("add_plot");

        let form = &self.state.ui.plot_form;
        let source = self.state.data.as_ref().ok_or_else(|| PlotError::NoNumericData {
            x_column: form.x_column.clone(),
            y_column: form.y_column.clone(),
        })?;

        let rows = source.rows()?;
        let mut series = build_sections(&rows, &form.selection())?;
        if form.scale_y {
            series.scale_y();
        }

        let options = form.options();
        self.registry.add_data_line(series, options, None);
        self.state.ui.select_line(None, "");
        self.redraw();
        Ok(())
    }

    /// Add the model described by the add-model form
    pub fn submit_model(&mut self) -> Result<()> {
        let form = &self.state.ui.model_form;
        let parameters = form.parameters()?;
        self.registry.add_model_line(form.model, parameters, None)?;
        self.state.ui.select_line(None, "");
        self.redraw();
        Ok(())
    }

    pub fn move_line(&mut self, index: usize, direction: Direction) {
        if self.registry.move_line(index, direction) {
            let moved_to = match direction {
                Direction::Up => index - 1,
                Direction::Down => index + 1,
            };
            self.state.ui.selected_line = Some(moved_to);
            self.redraw();
        }
    }

    pub fn delete_line(&mut self, index: usize) -> Result<()> {
        self.registry.delete(index)?;
        self.state.ui.select_line(None, "");
        self.redraw();
        Ok(())
    }

    pub fn set_line_color(&mut self, index: usize, slot: ColorSlot, hex: &str) -> Result<()> {
        self.registry.set_color(index, slot, hex)?;
        self.redraw();
        Ok(())
    }

    pub fn set_line_label(&mut self, index: usize, text: &str) -> Result<()> {
        self.registry.set_label(index, text)?;
        self.redraw();
        Ok(())
    }

    pub fn clear_plot(&mut self) {
        self.registry.clear();
        self.state.ui.select_line(None, "");
        self.redraw();
    }

    /// Apply the range dialog as the model evaluation range
    pub fn apply_range(&mut self) -> Result<()> {
        let (min, max) = self.state.ui.range_form.parse()?;
        self.registry.set_model_range(min, max)?;
        self.redraw();
        Ok(())
    }

    pub fn apply_titles(&mut self) {
        let form = &self.state.ui.title_form;
        self.state
            .view
            .set_titles(form.title.clone(), form.x_label.clone(), form.y_label.clone());
    }

    pub fn set_projection(&mut self, projection: Projection) {
        if self.surface.projection() != projection {
            self.state.view.projection = projection;
            self.surface.set_projection(projection);
            self.state.view.reset_plot_bounds();
            self.redraw();
        }
    }

    /// Open a dialog, refusing while another is open
    pub fn open_modal(&mut self, modal: Modal) {
        if !self.state.ui.open_modal(modal) {
            log::debug!("{:?} ignored while {:?} is open", modal, self.state.ui.modal());
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::R) {
                self.state.view.reset_bounds = true;
            }
            if i.key_pressed(egui::Key::G) {
                self.state.view.show_grid = !self.state.view.show_grid;
            }
            if i.key_pressed(egui::Key::L) {
                self.state.view.show_legend = !self.state.view.show_legend;
            }
            if i.key_pressed(egui::Key::T) {
                self.state.view.toggle_dark_mode();
            }
            if i.key_pressed(egui::Key::H) || i.key_pressed(egui::Key::F1) {
                self.state.view.show_help = !self.state.view.show_help;
            }
            if i.key_pressed(egui::Key::Escape) {
                self.state.view.show_help = false;
            }
        });
    }
}

impl eframe::App for GraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();

        self.poll_worker();
        if self.state.loading {
            ctx.request_repaint();
        }

        if self.state.view.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::render_toolbar(self, ctx, ui);
        });

        egui::SidePanel::left("lines")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui::render_line_list(self, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::render_plot(self, ui);
        });

        ui::render_dialogs(self, ctx);
        ui::render_notice(self, ctx);
        ui::render_help_dialog(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;
    use crate::models::Model;
    use crate::registry::LineEntry;
    use polars::prelude::*;

    fn app_with_table() -> GraphApp {
        let mut app = GraphApp::default();
        let df = df!(
            "time" => ["0", "1", "2", "3", "x", "5"],
            "height" => ["3", "5", "7", "9", "11", "13"]
        )
        .unwrap();
        app.state.set_data(DataSource::from_dataframe(df, None).unwrap());
        app
    }

    #[test]
    fn test_add_plot_creates_sections() {
        let mut app = app_with_table();
        app.add_plot().unwrap();

        assert_eq!(app.registry.len(), 1);
        match &app.registry.entries()[0] {
            LineEntry::Data(line) => {
                assert_eq!(line.label, "height vs time");
                assert_eq!(line.series.section_count(), 2);
            }
            LineEntry::Model(_) => panic!("expected a data line"),
        }
        assert_eq!(app.surface.scene().legend().len(), 1);
    }

    #[test]
    fn test_add_plot_without_numbers_leaves_registry() {
        let mut app = GraphApp::default();
        let df = df!("a" => ["x", "y"], "b" => ["1", "2"]).unwrap();
        app.state.set_data(DataSource::from_dataframe(df, None).unwrap());

        let before = app.registry.axis_range();
        let err = app.add_plot().unwrap_err();
        assert!(matches!(err, PlotError::NoNumericData { .. }));
        assert!(app.registry.is_empty());
        assert_eq!(app.registry.axis_range(), before);

        app.report(Err(err));
        assert_eq!(
            app.state.ui.notice.as_ref().map(|n| n.title.as_str()),
            Some("Type Failure")
        );
    }

    #[test]
    fn test_submit_model() {
        let mut app = app_with_table();
        app.state.ui.model_form.select(Model::Exponential);
        app.state.ui.model_form.inputs = vec!["1".into(), "-3".into(), "0".into()];
        assert!(matches!(
            app.submit_model(),
            Err(PlotError::InvalidParameters { .. })
        ));
        assert!(app.registry.is_empty());

        app.state.ui.model_form.inputs[1] = "2".into();
        app.submit_model().unwrap();
        assert_eq!(app.registry.len(), 1);
        // No range yet, so nothing is drawn
        assert!(app.surface.scene().is_empty());

        app.add_plot().unwrap();
        assert_eq!(app.surface.scene().legend().len(), 2);
    }

    #[test]
    fn test_line_editing() {
        let mut app = app_with_table();
        app.add_plot().unwrap();
        app.state.ui.plot_form.label = "second".to_string();
        app.add_plot().unwrap();

        app.move_line(0, Direction::Down);
        assert_eq!(app.state.ui.selected_line, Some(1));
        assert_eq!(app.registry.entries()[1].label(), "second");

        app.set_line_label(1, "renamed").unwrap();
        assert!(app.set_line_color(0, ColorSlot::Primary, "nope").is_err());
        app.set_line_color(0, ColorSlot::Primary, "#ff0000").unwrap();

        app.delete_line(1).unwrap();
        assert_eq!(app.registry.len(), 1);
        assert!(app.delete_line(3).is_err());

        app.clear_plot();
        assert!(app.registry.is_empty());
        assert!(app.surface.scene().is_empty());
    }

    #[test]
    fn test_range_and_titles() {
        let mut app = app_with_table();
        app.state.ui.range_form.min = "abc".into();
        assert!(app.apply_range().is_err());

        // Empty boxes read as zero, and an empty interval is rejected
        app.state.ui.range_form.min = String::new();
        assert!(matches!(
            app.apply_range(),
            Err(PlotError::InvalidRange { .. })
        ));

        app.state.ui.range_form.max = "3".into();
        app.apply_range().unwrap();
        assert_eq!(app.registry.model_range().map(|r| (r.min, r.max)), Some((0.0, 3.0)));

        app.state.ui.range_form.min = "-5".into();
        app.state.ui.range_form.max = "5".into();
        app.apply_range().unwrap();
        assert_eq!(app.registry.model_range().map(|r| r.min), Some(-5.0));

        app.state.ui.title_form.title = "Drop test".into();
        app.apply_titles();
        assert_eq!(app.state.view.title, "Drop test");

        app.set_projection(Projection::Polar);
        assert_eq!(app.surface.projection(), Projection::Polar);
        assert!(app.state.view.axis_labels().is_none());
    }
}
