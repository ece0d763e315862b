#[allow(dead_code)]
mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shapeclass for tests
#[allow(unused_imports)]
pub use shapeclass::{
    BoundingBox, ClassificationReport, ClassifierConfig, Grid, ShapeClassification, ShapeError,
};
