pub mod config;
pub mod detection;
pub mod error;
pub mod grid;
pub mod models;
pub mod pipeline;

pub use config::ClassifierConfig;
pub use detection::{build_standard_pipeline, classify_grid};
pub use error::ShapeError;
pub use grid::Grid;
pub use models::{BoundingBox, ClassificationReport, RegionStats, Residual, ShapeClassification};
pub use pipeline::{DebugConfig, Pipeline, PipelineContext, PipelineState, PipelineStep};
