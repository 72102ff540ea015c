//! View and presentation state

use crate::render::Projection;

/// Titles and display toggles for the main plot
#[derive(Debug, Clone)]
pub struct ViewState {
    pub projection: Projection,

    /// Plot title, shown above the plot in both projections
    pub title: String,

    /// Axis captions, Cartesian only
    pub x_label: String,
    pub y_label: String,

    pub dark_mode: bool,
    pub show_grid: bool,
    pub show_legend: bool,
    pub show_help: bool,

    /// Reset zoom bounds on the next frame
    pub reset_bounds: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            dark_mode: true,
            show_grid: true,
            show_legend: true,
            show_help: false,
            reset_bounds: false,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title and axis captions. Under the polar projection only the
    /// title is shown.
    pub fn set_titles(
        &mut self,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) {
        self.title = title.into();
        self.x_label = x_label.into();
        self.y_label = y_label.into();
    }

    /// Axis captions for the current projection
    pub fn axis_labels(&self) -> Option<(&str, &str)> {
        match self.projection {
            Projection::Cartesian => Some((&self.x_label, &self.y_label)),
            Projection::Polar => None,
        }
    }

    pub fn reset_plot_bounds(&mut self) {
        self.reset_bounds = true;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}
