use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::detection::morphology::StructuringElement;
use crate::error::{Result, ShapeError};

/// Upper bound on `grid_width * grid_height`
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Parameters of the classification pipeline.
///
/// Every field has a default, so a JSON config only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Smallest accepted bounding box width
    pub min_diameter: u32,
    /// Largest accepted bounding box width
    pub max_diameter: u32,
    /// Multiplier applied once per failed size check
    pub size_decay: f64,
    /// Multiplier applied once per corner that survived opening
    pub corner_decay: f64,
    /// Below this a residual-bearing shape is reported as unknown
    pub min_confidence: f64,
    pub structuring_element: StructuringElement,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            grid_width: 15,
            grid_height: 15,
            min_diameter: 5,
            max_diameter: 10,
            size_decay: 0.8,
            corner_decay: 0.9,
            min_confidence: 0.5,
            structuring_element: StructuringElement::Cross,
        }
    }
}

impl ClassifierConfig {
    /// Load a config from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ShapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| ShapeError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ShapeError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if u64::from(self.grid_width) * u64::from(self.grid_height) > MAX_GRID_CELLS {
            return Err(ShapeError::Config(format!(
                "grid {}x{} exceeds {} cells",
                self.grid_width, self.grid_height, MAX_GRID_CELLS
            )));
        }
        if self.min_diameter > self.max_diameter {
            return Err(ShapeError::Config(format!(
                "min_diameter {} exceeds max_diameter {}",
                self.min_diameter, self.max_diameter
            )));
        }
        for (name, value) in [("size_decay", self.size_decay), ("corner_decay", self.corner_decay)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ShapeError::Config(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ShapeError::Config(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}
