//! Application state management
//!
//! Presentation state for the desktop shell: the loaded table, view options
//! and dialog state. The plot itself lives in the
//! [`PlotRegistry`](crate::registry::PlotRegistry) owned by the app.

mod ui;
mod view;

pub use ui::{Modal, ModelForm, Notice, PlotForm, RangeForm, TitleForm, UiState};
pub use view::ViewState;

use crate::data::DataSource;
use std::path::PathBuf;

/// Maximum number of remembered files
const RECENT_FILES: usize = 8;

#[derive(Default)]
pub struct AppState {
    /// Current data source
    pub data: Option<DataSource>,

    pub view: ViewState,

    pub ui: UiState,

    /// Recently opened files, newest first
    pub recent_files: Vec<PathBuf>,

    /// A load is running on the worker
    pub loading: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .as_ref()
            .map(DataSource::column_names)
            .unwrap_or_default()
    }

    /// Install a freshly loaded table and point the plot form at it
    pub fn set_data(&mut self, source: DataSource) {
        if let Some(path) = source.file_path() {
            self.remember_file(path.to_path_buf());
        }
        self.ui.plot_form.reset_columns(&source.column_names());
        self.data = Some(source);
    }

    fn remember_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(RECENT_FILES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_set_data_updates_form_and_recents() {
        let mut state = AppState::new();
        assert!(!state.has_data());

        let df = df!("t" => [1.0f64, 2.0], "h" => [3.0f64, 4.0]).unwrap();
        let source = DataSource::from_dataframe(df, Some(PathBuf::from("drop.csv"))).unwrap();
        state.set_data(source);

        assert!(state.has_data());
        assert_eq!(state.column_names(), vec!["t", "h"]);
        assert_eq!(state.ui.plot_form.x_column, "t");
        assert_eq!(state.ui.plot_form.y_column, "h");
        assert_eq!(state.recent_files, vec![PathBuf::from("drop.csv")]);

        let df = df!("a" => [1.0f64]).unwrap();
        state.set_data(DataSource::from_dataframe(df, Some(PathBuf::from("drop.csv"))).unwrap());
        assert_eq!(state.recent_files.len(), 1);
    }
}
