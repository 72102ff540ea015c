//! Series builder
//!
//! Turns a stream of raw rows into aligned x/y section lists. A section is a
//! maximal run of rows where both values parsed and survived their transform;
//! anything else closes the current section.

use super::stats::calculate_statistics_vec;
use super::transform::Transform;
use crate::error::{PlotError, Result};
use std::collections::HashMap;

/// One input row: column name to raw cell text
pub type Row = HashMap<String, String>;

/// Columns and transforms for one ingest
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSelection {
    pub x_column: String,
    pub y_column: String,
    pub x_transform: Transform,
    pub y_transform: Transform,
}

impl AxisSelection {
    pub fn new(x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        Self {
            x_column: x_column.into(),
            y_column: y_column.into(),
            x_transform: Transform::Identity,
            y_transform: Transform::Identity,
        }
    }

    pub fn with_transforms(mut self, x_transform: Transform, y_transform: Transform) -> Self {
        self.x_transform = x_transform;
        self.y_transform = y_transform;
        self
    }

    /// Default legend label, e.g. `height vs time`
    pub fn default_label(&self) -> String {
        format!("{} vs {}", self.y_column, self.x_column)
    }
}

/// Aligned x/y section lists.
///
/// Both lists always hold the same number of sections, paired sections have
/// the same non-zero length, and every value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    sections_x: Vec<Vec<f64>>,
    sections_y: Vec<Vec<f64>>,
}

impl Series {
    /// Validate and wrap externally produced sections
    pub fn from_sections(sections_x: Vec<Vec<f64>>, sections_y: Vec<Vec<f64>>) -> Result<Self> {
        if sections_x.len() != sections_y.len() {
            return Err(PlotError::MisalignedSections(format!(
                "{} x sections but {} y sections",
                sections_x.len(),
                sections_y.len()
            )));
        }
        if sections_x.is_empty() {
            return Err(PlotError::MisalignedSections("no sections".to_string()));
        }
        for (i, (xs, ys)) in sections_x.iter().zip(&sections_y).enumerate() {
            if xs.len() != ys.len() {
                return Err(PlotError::MisalignedSections(format!(
                    "section {} has {} x values but {} y values",
                    i,
                    xs.len(),
                    ys.len()
                )));
            }
            if xs.is_empty() {
                return Err(PlotError::MisalignedSections(format!("section {} is empty", i)));
            }
            if xs.iter().chain(ys).any(|v| !v.is_finite()) {
                return Err(PlotError::MisalignedSections(format!(
                    "section {} has a non-finite value",
                    i
                )));
            }
        }
        Ok(Self {
            sections_x,
            sections_y,
        })
    }

    pub fn sections_x(&self) -> &[Vec<f64>] {
        &self.sections_x
    }

    pub fn sections_y(&self) -> &[Vec<f64>] {
        &self.sections_y
    }

    /// Paired sections in order
    pub fn sections(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.sections_x
            .iter()
            .zip(&self.sections_y)
            .map(|(xs, ys)| (xs.as_slice(), ys.as_slice()))
    }

    pub fn section_count(&self) -> usize {
        self.sections_x.len()
    }

    pub fn point_count(&self) -> usize {
        self.sections_x.iter().map(Vec::len).sum()
    }

    pub fn flat_x(&self) -> Vec<f64> {
        self.sections_x.concat()
    }

    pub fn flat_y(&self) -> Vec<f64> {
        self.sections_y.concat()
    }

    /// (min, max) over every x value
    pub fn x_bounds(&self) -> (f64, f64) {
        self.sections_x
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            })
    }

    /// Centre y on zero and scale it to unit sample standard deviation.
    ///
    /// A constant series (standard deviation exactly zero) is only centred.
    pub fn scale_y(&mut self) {
        let (mean, std_dev) = calculate_statistics_vec(&self.flat_y());
        let std_dev = if std_dev.is_finite() { std_dev } else { 0.0 };
        for y in self.sections_y.iter_mut().flatten() {
            *y = if std_dev != 0.0 {
                (*y - mean) / std_dev
            } else {
                *y - mean
            };
        }
    }
}

fn read_value(row: &Row, column: &str, transform: Transform) -> Option<f64> {
    let raw = row.get(column)?.trim();
    let value = raw.parse::<f64>().ok()?;
    transform.apply(value).ok()
}

/// Build sections from `rows` using the columns and transforms in `selection`
pub fn build_sections<'a, I>(rows: I, selection: &AxisSelection) -> Result<Series>
where
    I: IntoIterator<Item = &'a Row>,
{
    profiling::scope!("build_sections");

    let mut sections_x: Vec<Vec<f64>> = vec![Vec::new()];
    let mut sections_y: Vec<Vec<f64>> = vec![Vec::new()];
    let mut data_found = false;
    let mut skipped = 0usize;

    for row in rows {
        let x = read_value(row, &selection.x_column, selection.x_transform);
        // y is only read once x is known to be valid
        let y = x.and_then(|_| read_value(row, &selection.y_column, selection.y_transform));

        let current = sections_x.len() - 1;
        match (x, y) {
            (Some(x), Some(y)) => {
                sections_x[current].push(x);
                sections_y[current].push(y);
                data_found = true;
            }
            _ => {
                skipped += 1;
                if !sections_x[current].is_empty() {
                    sections_x.push(Vec::new());
                    sections_y.push(Vec::new());
                }
            }
        }
    }

    if !data_found {
        return Err(PlotError::NoNumericData {
            x_column: selection.x_column.clone(),
            y_column: selection.y_column.clone(),
        });
    }

    if sections_x.last().is_some_and(Vec::is_empty) {
        sections_x.pop();
        sections_y.pop();
    }

    log::debug!(
        "built {} section(s) from '{}' vs '{}', {} row(s) skipped",
        sections_x.len(),
        selection.y_column,
        selection.x_column,
        skipped
    );

    Series::from_sections(sections_x, sections_y)
}
