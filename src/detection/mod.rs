pub mod classify;
pub mod morphology;
pub mod regions;
pub mod residual;
pub mod size;
pub mod steps;

use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::models::ClassificationReport;
use crate::pipeline::Pipeline;

/// Build the standard classification pipeline:
/// labeling, selection, size checks, residual analysis, verdict.
pub fn build_standard_pipeline(config: ClassifierConfig, verbose: bool) -> Pipeline {
    use self::morphology::ImageprocOpener;
    use self::regions::ImageprocLabeler;
    use self::steps::*;

    Pipeline::new(config)
        .with_verbose(verbose)
        .add_step(Arc::new(LabelRegionsStep {
            labeler: Box::new(ImageprocLabeler),
        }))
        .add_step(Arc::new(SelectRegionStep))
        .add_step(Arc::new(SizeValidationStep))
        .add_step(Arc::new(ResidualAnalysisStep {
            opener: Box::new(ImageprocOpener),
        }))
        .add_step(Arc::new(ClassificationStep))
}

/// Classify a grid with the standard pipeline
pub fn classify_grid(grid: Grid, config: &ClassifierConfig) -> Result<ClassificationReport> {
    build_standard_pipeline(config.clone(), false).classify(grid)
}
