//! UI interaction state
//!
//! Holds the open dialog, the form buffers behind each dialog, and the
//! current notice. None of this is visible to the plotting core.

use crate::data::{AxisSelection, Transform};
use crate::error::{PlotError, Result};
use crate::models::{parse_parameter, Model};
use crate::registry::{DataLineOptions, RenderStrategy};

/// Which dialog currently owns the screen. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    AddPlot,
    AddModel,
    Titles,
    Range,
}

/// Message shown to the user after a failed operation
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// Inputs of the add-plot dialog
#[derive(Debug, Clone, Default)]
pub struct PlotForm {
    pub x_column: String,
    pub y_column: String,
    pub x_transform: Transform,
    pub y_transform: Transform,
    pub strategy: RenderStrategy,
    pub show_best_fit: bool,
    pub show_correlation: bool,
    pub scale_y: bool,
    /// Empty means `<y> vs <x>`
    pub label: String,
}

impl PlotForm {
    /// Point the column pickers at the first two columns of a new table
    pub fn reset_columns(&mut self, columns: &[String]) {
        self.x_column = columns.first().cloned().unwrap_or_default();
        self.y_column = columns
            .get(1)
            .or_else(|| columns.first())
            .cloned()
            .unwrap_or_default();
    }

    pub fn selection(&self) -> AxisSelection {
        AxisSelection::new(self.x_column.clone(), self.y_column.clone())
            .with_transforms(self.x_transform, self.y_transform)
    }

    pub fn options(&self) -> DataLineOptions {
        let label = if self.label.trim().is_empty() {
            self.selection().default_label()
        } else {
            self.label.clone()
        };
        DataLineOptions::new(label)
            .with_strategy(self.strategy)
            .with_best_fit(self.show_best_fit)
            .with_correlation(self.show_correlation)
    }
}

/// Inputs of the add-model dialog
#[derive(Debug, Clone, Default)]
pub struct ModelForm {
    pub model: Model,
    pub inputs: Vec<String>,
}

impl ModelForm {
    /// Switch model, keeping one input box per parameter
    pub fn select(&mut self, model: Model) {
        self.model = model;
        self.inputs
            .resize(model.param_names().len(), String::new());
    }

    /// Parse every input box. Empty boxes count as zero.
    pub fn parameters(&self) -> Result<Vec<f64>> {
        let count = self.model.param_names().len();
        (0..count)
            .map(|i| parse_parameter(self.inputs.get(i).map_or("", String::as_str)))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TitleForm {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

#[derive(Debug, Clone, Default)]
pub struct RangeForm {
    pub min: String,
    pub max: String,
}

impl RangeForm {
    /// Parse both bounds. Empty boxes count as zero.
    pub fn parse(&self) -> Result<(f64, f64)> {
        Ok((parse_parameter(&self.min)?, parse_parameter(&self.max)?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    modal: Modal,

    /// Notice from the last failed operation
    pub notice: Option<Notice>,

    /// Entry highlighted in the line list
    pub selected_line: Option<usize>,

    /// Label being edited for the selected line
    pub label_edit: String,

    pub plot_form: PlotForm,
    pub model_form: ModelForm,
    pub title_form: TitleForm,
    pub range_form: RangeForm,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    /// Open `modal` unless another dialog is already open
    pub fn open_modal(&mut self, modal: Modal) -> bool {
        if self.modal != Modal::None && self.modal != modal {
            return false;
        }
        self.modal = modal;
        true
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.modal == modal
    }

    /// Set an error notice
    pub fn set_error(&mut self, error: &PlotError) {
        self.notice = Some(Notice {
            title: error.title().to_string(),
            message: error.user_message(),
        });
    }

    pub fn clear_error(&mut self) {
        self.notice = None;
    }

    pub fn has_error(&self) -> bool {
        self.notice.is_some()
    }

    pub fn select_line(&mut self, index: Option<usize>, label: &str) {
        self.selected_line = index;
        self.label_edit = label.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_modal_at_a_time() {
        let mut ui = UiState::new();
        assert!(ui.open_modal(Modal::AddPlot));
        assert!(!ui.open_modal(Modal::Titles));
        assert!(ui.is_open(Modal::AddPlot));
        assert!(ui.open_modal(Modal::AddPlot));

        ui.close_modal();
        assert!(ui.open_modal(Modal::Titles));
    }

    #[test]
    fn test_model_form_parameters() {
        let mut form = ModelForm::default();
        form.select(Model::Exponential);
        assert_eq!(form.inputs.len(), 3);
        form.inputs[0] = "2".to_string();
        form.inputs[1] = " 0.5".to_string();
        assert_eq!(form.parameters().unwrap(), vec![2.0, 0.5, 0.0]);

        form.inputs[2] = "many".to_string();
        assert!(matches!(
            form.parameters(),
            Err(PlotError::NonNumericParameter { .. })
        ));

        form.select(Model::Linear);
        assert_eq!(form.inputs.len(), 2);
    }

    #[test]
    fn test_plot_form_defaults() {
        let mut form = PlotForm::default();
        form.reset_columns(&["time".to_string(), "height".to_string()]);
        assert_eq!(form.options().label, "height vs time");

        form.label = "drop".to_string();
        assert_eq!(form.options().label, "drop");

        form.reset_columns(&["only".to_string()]);
        assert_eq!(form.y_column, "only");
    }

    #[test]
    fn test_notice_from_error() {
        let mut ui = UiState::new();
        ui.set_error(&PlotError::InvalidParameters {
            model: "y = ar^x + c".to_string(),
        });
        let notice = ui.notice.clone().unwrap();
        assert_eq!(notice.title, "Input Failure");
        assert_eq!(notice.message, "You input invalid numbers.");
        ui.clear_error();
        assert!(!ui.has_error());
    }

    #[test]
    fn test_range_form() {
        let form = RangeForm {
            min: "-1".to_string(),
            max: "4.5".to_string(),
        };
        assert_eq!(form.parse().unwrap(), (-1.0, 4.5));

        let empty_min = RangeForm {
            min: String::new(),
            max: "1".to_string(),
        };
        assert_eq!(empty_min.parse().unwrap(), (0.0, 1.0));

        let bad = RangeForm {
            min: "1".to_string(),
            max: "ten".to_string(),
        };
        assert!(matches!(
            bad.parse(),
            Err(PlotError::NonNumericParameter { .. })
        ));
    }
}
