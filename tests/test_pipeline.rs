mod common;

use common::*;
use shapeclass::detection::steps::{ClassificationStep, SizeValidationStep};
use shapeclass::{Pipeline, build_standard_pipeline};
use std::sync::Arc;

#[test]
fn standard_pipeline_threads_state_through_every_step() {
    let pipeline = build_standard_pipeline(ClassifierConfig::default(), false);
    let state = pipeline.run(Canvas::blank().fill_rect(2, 3, 6, 6).to_grid()).unwrap();

    assert_eq!(state.regions.len(), 1);
    assert_eq!(state.bbox, Some(BoundingBox::new(2, 3, 6, 6)));
    let residual = state.residual.expect("residual analysis ran");
    assert_eq!(residual.points, vec![(0, 0), (5, 0), (0, 5), (5, 5)]);
    assert_eq!(residual.missing_corners, 0);
    assert!(matches!(state.verdict, Some(ShapeClassification::Square { .. })));
}

#[test]
fn step_without_bounding_box_fails() {
    let pipeline = Pipeline::new(ClassifierConfig::default()).add_step(Arc::new(SizeValidationStep));
    let err = pipeline.run(Canvas::blank().disk(4, 4, 7).to_grid()).unwrap_err();
    assert!(matches!(err, ShapeError::MissingStageInput { .. }));
}

#[test]
fn report_without_verdict_fails() {
    let pipeline = Pipeline::new(ClassifierConfig::default()).add_step(Arc::new(ClassificationStep));
    let err = pipeline.classify(Canvas::blank().disk(4, 4, 7).to_grid()).unwrap_err();
    assert!(matches!(err, ShapeError::MissingStageInput { .. }));
}

#[test]
fn debug_mode_saves_each_step() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let out = dir.path().join("debug");

    let pipeline = build_standard_pipeline(ClassifierConfig::default(), false).with_debug(out.clone())?;
    pipeline.classify(Canvas::blank().disk(4, 4, 7).to_grid())?;

    for step_dir in [
        "00_input",
        "01_region_labeling",
        "02_region_selection",
        "03_size_validation",
        "04_residual_analysis",
        "05_classification",
    ] {
        assert!(out.join(step_dir).join("01.png").is_file(), "missing {}", step_dir);
    }

    let selected = image::open(out.join("02_region_selection/01.png"))?.to_luma8();
    assert_eq!(selected.dimensions(), (7, 7));

    Ok(())
}

#[test]
fn debug_mode_rejects_non_empty_directory() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join("leftover.txt"), "x")?;

    let result = build_standard_pipeline(ClassifierConfig::default(), false)
        .with_debug(dir.path().to_path_buf());
    assert!(matches!(result, Err(ShapeError::Debug(_))));

    Ok(())
}
