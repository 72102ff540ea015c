//! Error types for GraphOxide
//!
//! Every failure the engine can report is a variant here. None of them are
//! fatal: the shell turns them into a notice and leaves the registry as it was.

use thiserror::Error;

/// Main error type for GraphOxide operations
#[derive(Error, Debug)]
pub enum PlotError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// An ingest produced zero valid (x, y) pairs
    #[error("No numeric data found in columns '{x_column}' and '{y_column}'")]
    NoNumericData { x_column: String, y_column: String },

    /// Section lists handed to the registry do not line up pairwise
    #[error("Misaligned sections: {0}")]
    MisalignedSections(String),

    /// A model parameter field could not be parsed as a number
    #[error("Parameter '{text}' is not a number")]
    NonNumericParameter { text: String },

    /// Model validator rejected the supplied parameters
    #[error("Invalid parameters for model '{model}'")]
    InvalidParameters { model: String },

    /// Fewer than two distinct x-values for a linear fit
    #[error("Best fit requires at least 2 distinct x-values")]
    DegenerateFit,

    /// Pearson's r is undefined for the given values
    #[error("Correlation is undefined: {0}")]
    DegenerateCorrelation(String),

    /// Index does not refer to a registry entry
    #[error("Line index {index} out of range (lines: {len})")]
    InvalidLineIndex { index: usize, len: usize },

    /// Color text is not a valid hex color
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// Model range bounds are not finite
    #[error("Invalid range {min} to {max}")]
    InvalidRange { min: f64, max: f64 },

    /// Animation frame with a radius count that does not match the positions
    #[error("Frame has {positions} positions but {radii} radii")]
    FrameMismatch { positions: usize, radii: usize },

    /// Animation frame with a colour index count that does not match the positions
    #[error("Frame has {positions} positions but {colors} colour indices")]
    ColorIndexMismatch { positions: usize, colors: usize },

    /// Transform name is not in the catalog
    #[error("Unknown transform '{0}'")]
    UnknownTransform(String),

    /// Model name is not in the catalog
    #[error("Unknown model '{0}'")]
    UnknownModel(String),
}

/// Result type alias for GraphOxide operations
pub type Result<T> = std::result::Result<T, PlotError>;

/// UI-friendly error message formatting
impl PlotError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            PlotError::FileIo(e) => format!("File error: {}", e),
            PlotError::Polars(e) => format!("Data error: {}", e),
            PlotError::Json(e) => format!("Config error: {}", e),
            PlotError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            PlotError::NoNumericData { .. } => "The data you selected is not numerical.".to_string(),
            PlotError::MisalignedSections(msg) => format!("Internal data error: {}", msg),
            PlotError::NonNumericParameter { .. } => "You didn't input a number.".to_string(),
            PlotError::InvalidParameters { .. } => "You input invalid numbers.".to_string(),
            PlotError::DegenerateFit => {
                "Line of best fit needs at least two different x-values".to_string()
            }
            PlotError::DegenerateCorrelation(msg) => format!("Pearson's r unavailable: {}", msg),
            PlotError::InvalidLineIndex { index, len } => {
                format!("Line {} does not exist ({} lines)", index, len)
            }
            PlotError::InvalidColor(color) => format!("'{}' is not a hex color", color),
            PlotError::InvalidRange { .. } => "You didn't input valid numbers.".to_string(),
            PlotError::FrameMismatch { positions, radii } => {
                format!("{} positions but {} radii", positions, radii)
            }
            PlotError::ColorIndexMismatch { positions, colors } => {
                format!("{} positions but {} colour indices", positions, colors)
            }
            PlotError::UnknownTransform(name) => format!("Unknown transform '{}'", name),
            PlotError::UnknownModel(name) => format!("Unknown model '{}'", name),
        }
    }

    /// Get a short title for the error (for notices)
    pub fn title(&self) -> &'static str {
        match self {
            PlotError::FileIo(_) => "No File",
            PlotError::Polars(_) => "Data Error",
            PlotError::Json(_) => "Configuration Error",
            PlotError::UnsupportedFormat { .. } => "Unsupported Format",
            PlotError::NoNumericData { .. } => "Type Failure",
            PlotError::MisalignedSections(_) => "Data Error",
            PlotError::NonNumericParameter { .. } | PlotError::InvalidParameters { .. } => {
                "Input Failure"
            }
            PlotError::DegenerateFit | PlotError::DegenerateCorrelation(_) => "Statistics",
            PlotError::InvalidLineIndex { .. } => "Invalid Line",
            PlotError::InvalidColor(_) => "Invalid Colour",
            PlotError::InvalidRange { .. } => "Input Failure",
            PlotError::FrameMismatch { .. } | PlotError::ColorIndexMismatch { .. } => {
                "Animation Error"
            }
            PlotError::UnknownTransform(_) | PlotError::UnknownModel(_) => "Unknown Name",
        }
    }
}
