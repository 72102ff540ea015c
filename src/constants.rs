//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application. Most of them only seed [`crate::config::EngineConfig`] and can
//! be overridden from the configuration file.

/// Smoothing defaults
pub mod smoothing {
    /// Exponent applied to the point count when choosing the bucket edge count
    pub const DEFAULT_EXPONENT: f64 = 2.0 / 3.0;

    /// Divisor applied after the exponent
    pub const DEFAULT_DIVISOR: f64 = 1.6;

    /// Fewest bucket edges ever used (one bucket)
    pub const MIN_EDGES: usize = 2;
}

/// Scatter marker density defaults
pub mod scatter {
    /// Above this many points markers become translucent
    pub const DENSE_THRESHOLD: usize = 50;

    /// Above this many points markers become faint
    pub const VERY_DENSE_THRESHOLD: usize = 300;

    /// Marker opacity above [`DENSE_THRESHOLD`]
    pub const DENSE_ALPHA: f32 = 0.7;

    /// Marker opacity above [`VERY_DENSE_THRESHOLD`]
    pub const VERY_DENSE_ALPHA: f32 = 0.15;

    /// Cross marker radius in screen points
    pub const MARKER_RADIUS: f32 = 3.0;
}

/// Plotting and curve sampling defaults
pub mod plot {
    /// Samples used when evaluating a model curve over the axis range
    pub const MODEL_SAMPLES: usize = 2000;

    /// Samples used for a best-fit line under the polar projection
    pub const POLAR_FIT_SAMPLES: usize = 2000;

    /// Significant digits in the best-fit label
    pub const FIT_LABEL_DIGITS: usize = 5;

    /// Significant digits in the correlation annotation
    pub const CORRELATION_DIGITS: usize = 4;

    /// Line width for data and model lines
    pub const LINE_WIDTH: f32 = 1.5;
}

/// Polar grid layout
pub mod polar {
    /// Angle between radial spokes, in degrees
    pub const SPOKE_STEP_DEG: f64 = 15.0;

    /// Vertices used to draw one grid ring
    pub const RING_SEGMENTS: usize = 180;

    /// Target number of rings
    pub const RING_COUNT: usize = 5;
}

/// Animation surface defaults
pub mod animation {
    /// Pause between frames to yield to the display
    pub const FRAME_PAUSE_MS: u64 = 10;

    /// Vertices used to draw one body
    pub const CIRCLE_SEGMENTS: usize = 32;

    /// Minor gridlines between two major gridlines
    pub const MINOR_DIVISIONS: usize = 5;
}

/// Numeric precision constants
pub mod numeric {
    /// Convergence tolerance for the incomplete beta continued fraction
    pub const BETA_TOLERANCE: f64 = 3e-14;

    /// Iteration cap for the incomplete beta continued fraction
    pub const BETA_MAX_ITERATIONS: usize = 300;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "graph-oxide.json";
}
