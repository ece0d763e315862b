use crate::detection::classify::decide;
use crate::detection::morphology::MorphologicalOpener;
use crate::detection::regions::{RegionLabeler, select_biggest};
use crate::detection::residual::analyze_residual;
use crate::detection::size::validate_size;
use crate::error::{Result, ShapeError};
use crate::pipeline::{PipelineContext, PipelineState, PipelineStep};

/// Label 8-connected foreground regions
pub struct LabelRegionsStep {
    pub labeler: Box<dyn RegionLabeler>,
}

impl PipelineStep for LabelRegionsStep {
    fn process(&self, mut state: PipelineState, context: &PipelineContext) -> Result<PipelineState> {
        if context.verbose {
            println!("Origin = \n{}", state.grid);
        }
        state.regions = self.labeler.label(&state.grid);
        log::debug!("labeled {} foreground regions", state.regions.len());
        Ok(state)
    }

    fn name(&self) -> &str {
        "Region Labeling"
    }
}

/// Choose the dominant region's bounding box
pub struct SelectRegionStep;

impl PipelineStep for SelectRegionStep {
    fn process(&self, mut state: PipelineState, _context: &PipelineContext) -> Result<PipelineState> {
        let bbox = select_biggest(&state.regions);
        log::info!("found biggest bounding box: {}", bbox);
        if let Some(crop) = state.grid.crop(&bbox) {
            state.image = crop;
        }
        state.bbox = Some(bbox);
        Ok(state)
    }

    fn name(&self) -> &str {
        "Region Selection"
    }
}

/// Decay confidence for each failed size check
pub struct SizeValidationStep;

impl PipelineStep for SizeValidationStep {
    fn process(&self, mut state: PipelineState, context: &PipelineContext) -> Result<PipelineState> {
        let bbox = state.require_bbox(self.name())?;
        let check = validate_size(&bbox, state.confidence, &context.config);
        state.confidence = check.confidence;
        state.reasons.extend(check.reasons);
        Ok(state)
    }

    fn name(&self) -> &str {
        "Size Validation"
    }
}

/// Open the cropped region and record what was removed
pub struct ResidualAnalysisStep {
    pub opener: Box<dyn MorphologicalOpener>,
}

impl PipelineStep for ResidualAnalysisStep {
    fn process(&self, mut state: PipelineState, context: &PipelineContext) -> Result<PipelineState> {
        let bbox = state.require_bbox(self.name())?;
        let element = context.config.structuring_element;
        let residual = analyze_residual(&state.grid, &bbox, self.opener.as_ref(), element)?;

        if context.verbose {
            println!("Kernel = \n{}", element);
            println!("Cropped = \n{}", residual.source);
            println!("Opened = \n{}", residual.opened);
            println!("Diff = \n{}", residual.diff);
        }

        state.image = residual.diff.clone();
        state.residual = Some(residual);
        Ok(state)
    }

    fn name(&self) -> &str {
        "Residual Analysis"
    }
}

/// Produce the final verdict
pub struct ClassificationStep;

impl PipelineStep for ClassificationStep {
    fn process(&self, mut state: PipelineState, context: &PipelineContext) -> Result<PipelineState> {
        let bbox = state.require_bbox(self.name())?;
        let residual = state
            .residual
            .as_ref()
            .ok_or_else(|| ShapeError::MissingStageInput {
                step: self.name().to_string(),
                missing: "residual",
            })?;

        let verdict = decide(&bbox, state.confidence, &state.reasons, residual, &context.config);
        log::debug!("verdict: {}", verdict);
        state.confidence = verdict.confidence();
        state.verdict = Some(verdict);
        Ok(state)
    }

    fn name(&self) -> &str {
        "Classification"
    }
}
