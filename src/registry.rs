//! Plot registry
//!
//! Ordered collection of everything on the plot. Index 0 is the most recently
//! added entry and is drawn last, so it sits on top. The registry also tracks
//! the x range covered by all data lines and the palette cursor used to
//! colour new entries.
//!
//! Every operation validates its input before mutating, so a failed call
//! leaves the registry exactly as it was.

use crate::data::Series;
use crate::error::{PlotError, Result};
use crate::models::Model;
use crate::palette::{ColorPair, ColorSlot, Palette, PaletteCursor};

/// How a data line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStrategy {
    #[default]
    Scatter,
    Line,
    SmoothedLine,
}

impl RenderStrategy {
    pub const ALL: [RenderStrategy; 3] = [
        RenderStrategy::Scatter,
        RenderStrategy::Line,
        RenderStrategy::SmoothedLine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RenderStrategy::Scatter => "Scatter",
            RenderStrategy::Line => "Line",
            RenderStrategy::SmoothedLine => "Smoothed Line",
        }
    }
}

/// Per-line options chosen when data is ingested
#[derive(Debug, Clone, PartialEq)]
pub struct DataLineOptions {
    pub label: String,
    pub strategy: RenderStrategy,
    pub show_best_fit: bool,
    pub show_correlation: bool,
}

impl DataLineOptions {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            strategy: RenderStrategy::default(),
            show_best_fit: false,
            show_correlation: false,
        }
    }

    pub fn with_strategy(mut self, strategy: RenderStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_best_fit(mut self, show: bool) -> Self {
        self.show_best_fit = show;
        self
    }

    pub fn with_correlation(mut self, show: bool) -> Self {
        self.show_correlation = show;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataLine {
    pub series: Series,
    pub label: String,
    pub strategy: RenderStrategy,
    pub show_best_fit: bool,
    pub show_correlation: bool,
    pub colors: ColorPair,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelLine {
    pub label: String,
    pub model: Model,
    pub parameters: Vec<f64>,
    pub colors: ColorPair,
}

impl ModelLine {
    /// Sample the curve over `[min, max]`
    pub fn generate(&self, min: f64, max: f64, samples: usize) -> (Vec<f64>, Vec<f64>) {
        self.model.generate(&self.parameters, min, max, samples)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineEntry {
    Data(DataLine),
    Model(ModelLine),
}

impl LineEntry {
    pub fn label(&self) -> &str {
        match self {
            LineEntry::Data(line) => &line.label,
            LineEntry::Model(line) => &line.label,
        }
    }

    pub fn colors(&self) -> &ColorPair {
        match self {
            LineEntry::Data(line) => &line.colors,
            LineEntry::Model(line) => &line.colors,
        }
    }

    fn label_mut(&mut self) -> &mut String {
        match self {
            LineEntry::Data(line) => &mut line.label,
            LineEntry::Model(line) => &mut line.label,
        }
    }

    fn colors_mut(&mut self) -> &mut ColorPair {
        match self {
            LineEntry::Data(line) => &mut line.colors,
            LineEntry::Model(line) => &mut line.colors,
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, LineEntry::Model(_))
    }
}

/// Closed x interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PlotError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest range covering both
    pub fn union(self, other: AxisRange) -> AxisRange {
        AxisRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn of_series(series: &Series) -> AxisRange {
        let (min, max) = series.x_bounds();
        AxisRange { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards index 0 (drawn later)
    Up,
    Down,
}

#[derive(Debug, Clone, Default)]
pub struct PlotRegistry {
    entries: Vec<LineEntry>,
    axis_range: Option<AxisRange>,
    model_range_override: Option<AxisRange>,
    palette: Palette,
    cursor: PaletteCursor,
}

impl PlotRegistry {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LineEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// x range covered by every data line, `None` when there are none
    pub fn axis_range(&self) -> Option<AxisRange> {
        self.axis_range
    }

    /// Range models are evaluated over: the explicit override if one was set,
    /// otherwise the data axis range
    pub fn model_range(&self) -> Option<AxisRange> {
        self.model_range_override.or(self.axis_range)
    }

    pub fn model_range_override(&self) -> Option<AxisRange> {
        self.model_range_override
    }

    pub fn palette_cursor(&self) -> PaletteCursor {
        self.cursor
    }

    /// Entries in paint order: oldest first, newest (index 0) last
    pub fn draw_order(&self) -> impl Iterator<Item = (usize, &LineEntry)> {
        self.entries.iter().enumerate().rev()
    }

    fn take_colors(&mut self, colors: Option<ColorPair>) -> ColorPair {
        colors.unwrap_or_else(|| self.cursor.next_pair(&self.palette))
    }

    /// Insert a data line on top and widen the axis range. Returns its index.
    pub fn add_data_line(
        &mut self,
        series: Series,
        options: DataLineOptions,
        colors: Option<ColorPair>,
    ) -> usize {
        let range = AxisRange::of_series(&series);
        self.axis_range = Some(match self.axis_range {
            Some(current) => current.union(range),
            None => range,
        });

        let colors = self.take_colors(colors);
        log::debug!(
            "added data line '{}' ({} points), axis range {:?}",
            options.label,
            series.point_count(),
            self.axis_range
        );

        self.entries.insert(
            0,
            LineEntry::Data(DataLine {
                series,
                label: options.label,
                strategy: options.strategy,
                show_best_fit: options.show_best_fit,
                show_correlation: options.show_correlation,
                colors,
            }),
        );
        0
    }

    /// Insert a model curve on top. The label is built from the parameters.
    pub fn add_model_line(
        &mut self,
        model: Model,
        parameters: Vec<f64>,
        colors: Option<ColorPair>,
    ) -> Result<usize> {
        if !model.validate(&parameters) {
            return Err(PlotError::InvalidParameters {
                model: model.name().to_string(),
            });
        }

        let label = model.label(&parameters);
        let colors = self.take_colors(colors);
        log::debug!("added model line '{}'", label);

        self.entries.insert(
            0,
            LineEntry::Model(ModelLine {
                label,
                model,
                parameters,
                colors,
            }),
        );
        Ok(0)
    }

    /// Swap with the neighbour in `direction`. Returns false, changing
    /// nothing, when that would leave the list.
    pub fn move_line(&mut self, index: usize, direction: Direction) -> bool {
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        };
        match target {
            Some(target) if index < self.entries.len() && target < self.entries.len() => {
                self.entries.swap(index, target);
                true
            }
            _ => false,
        }
    }

    pub fn delete(&mut self, index: usize) -> Result<LineEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        if !removed.is_model() {
            self.recompute_axis_range();
        }
        log::debug!("deleted '{}', axis range {:?}", removed.label(), self.axis_range);
        Ok(removed)
    }

    pub fn set_color(&mut self, index: usize, slot: ColorSlot, hex: &str) -> Result<()> {
        self.check_index(index)?;
        self.entries[index].colors_mut().set(slot, hex)
    }

    pub fn set_label(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        *self.entries[index].label_mut() = text.into();
        Ok(())
    }

    /// Override the interval models are evaluated over
    pub fn set_model_range(&mut self, min: f64, max: f64) -> Result<()> {
        let range = AxisRange::new(min, max)?;
        if range.span() <= 0.0 {
            return Err(PlotError::InvalidRange { min, max });
        }
        self.model_range_override = Some(range);
        Ok(())
    }

    /// Remove every entry and reset ranges and the palette cursor
    pub fn clear(&mut self) {
        self.entries.clear();
        self.axis_range = None;
        self.model_range_override = None;
        self.cursor.reset();
        log::debug!("registry cleared");
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(PlotError::InvalidLineIndex {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    fn recompute_axis_range(&mut self) {
        self.axis_range = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                LineEntry::Data(line) => Some(AxisRange::of_series(&line.series)),
                LineEntry::Model(_) => None,
            })
            .reduce(AxisRange::union);
    }
}
