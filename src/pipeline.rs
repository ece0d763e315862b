use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::error::{Result, ShapeError};
use crate::grid::Grid;
use crate::models::{BoundingBox, ClassificationReport, RegionStats, Residual, ShapeClassification};

/// State threaded through the pipeline.
/// Each step reads what earlier steps produced and fills in its own part.
#[derive(Clone, Debug)]
pub struct PipelineState {
    /// The parsed input grid (shared, never mutated)
    pub grid: Arc<Grid>,

    /// Raster produced by the latest step (used for debug output)
    pub image: Grid,

    pub regions: Vec<RegionStats>,
    pub bbox: Option<BoundingBox>,

    /// Running confidence, starts at 1.0 and only decays
    pub confidence: f64,

    /// Size penalty reasons
    pub reasons: Vec<String>,

    pub residual: Option<Residual>,
    pub verdict: Option<ShapeClassification>,
}

impl PipelineState {
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            image: grid.clone(),
            grid: Arc::new(grid),
            regions: Vec::new(),
            bbox: None,
            confidence: 1.0,
            reasons: Vec::new(),
            residual: None,
            verdict: None,
        }
    }

    /// Bounding box chosen so far, or an error naming the step that needed it
    pub fn require_bbox(&self, step: &str) -> Result<BoundingBox> {
        self.bbox.ok_or_else(|| ShapeError::MissingStageInput {
            step: step.to_string(),
            missing: "bounding box",
        })
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Context available to all pipeline steps
#[derive(Clone)]
pub struct PipelineContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
    pub config: ClassifierConfig,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    fn process(&self, state: PipelineState, context: &PipelineContext) -> Result<PipelineState>;

    /// Human-readable name for this step (used in verbose output and debug directories)
    fn name(&self) -> &str;
}

/// Linear pipeline: every step runs once, in order
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext {
                verbose: false,
                debug: None,
                config,
            },
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory.
    /// The directory must be empty or non-existent.
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        let io_err = |source| ShapeError::Io {
            path: output_dir.clone(),
            source,
        };
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir).map_err(io_err)?;
            if entries.count() > 0 {
                return Err(ShapeError::Debug(format!(
                    "debug directory is not empty: {}",
                    output_dir.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&output_dir).map_err(io_err)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Run every step on `grid` and return the final state
    pub fn run(&self, grid: Grid) -> Result<PipelineState> {
        let mut state = PipelineState::from_grid(grid);
        self.save_debug_image(0, "input", &state.image)?;

        for (step_idx, step) in self.steps.iter().enumerate() {
            log::debug!("running step: {}", step.name());
            state = step.process(state, &self.context)?;
            self.save_debug_image(step_idx + 1, step.name(), &state.image)?;
        }

        Ok(state)
    }

    /// Run the pipeline and collect the verdict with its supporting data
    pub fn classify(&self, grid: Grid) -> Result<ClassificationReport> {
        let state = self.run(grid)?;
        let bounding_box = state.require_bbox("report")?;
        let result = state.verdict.ok_or_else(|| ShapeError::MissingStageInput {
            step: "report".to_string(),
            missing: "verdict",
        })?;

        Ok(ClassificationReport {
            bounding_box,
            penalties: state.reasons,
            result,
        })
    }

    fn save_debug_image(&self, step_idx: usize, step_name: &str, image: &Grid) -> Result<()> {
        let Some(debug_config) = &self.context.debug else {
            return Ok(());
        };
        if image.is_empty() {
            return Ok(());
        }

        let step_dir_name = format!(
            "{:02}_{}",
            step_idx,
            step_name.to_lowercase().replace(' ', "_")
        );
        let step_dir = debug_config.output_dir.join(&step_dir_name);
        std::fs::create_dir_all(&step_dir).map_err(|source| ShapeError::Io {
            path: step_dir.clone(),
            source,
        })?;

        image
            .to_image()
            .save(step_dir.join("01.png"))
            .map_err(|e| ShapeError::Debug(format!("failed to save {}/01.png: {}", step_dir_name, e)))?;

        if self.context.verbose {
            println!("  Debug: saved {}/01.png", step_dir_name);
        }
        Ok(())
    }
}
