pub mod series;
pub mod smooth;
pub mod source;
pub mod stats;
pub mod transform;
pub mod worker;

// Re-export key types for convenience
pub use series::{build_sections, AxisSelection, Row, Series};
pub use smooth::smooth;
pub use source::DataSource;
pub use stats::{best_fit, correlation, Correlation, LinearFit, Stats};
pub use transform::Transform;
pub use worker::{LoadResult, LoadWorker};
