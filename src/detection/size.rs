use crate::config::ClassifierConfig;
use crate::models::BoundingBox;

/// Outcome of the size checks
#[derive(Debug, Clone, PartialEq)]
pub struct SizeCheck {
    pub confidence: f64,
    /// One entry per failed check
    pub reasons: Vec<String>,
}

/// Apply the three independent size checks to `bbox`.
///
/// Each failed check multiplies the confidence by `size_decay`. The checks
/// never stop the pipeline, even for a degenerate box.
pub fn validate_size(bbox: &BoundingBox, confidence: f64, config: &ClassifierConfig) -> SizeCheck {
    let mut confidence = confidence;
    let mut reasons = Vec::new();

    if bbox.width != bbox.height {
        reasons.push(format!(
            "Bounding box has different width and height ({} vs {})",
            bbox.width, bbox.height
        ));
        confidence *= config.size_decay;
    }
    if bbox.width < config.min_diameter {
        reasons.push(format!(
            "Width is too small to be valid. Actual: {}, expected at least {}",
            bbox.width, config.min_diameter
        ));
        confidence *= config.size_decay;
    }
    if bbox.width > config.max_diameter {
        reasons.push(format!(
            "Width is too big to be valid. Actual: {}, expected at most {}",
            bbox.width, config.max_diameter
        ));
        confidence *= config.size_decay;
    }

    for reason in &reasons {
        log::info!("size penalty: {}", reason);
    }

    SizeCheck { confidence, reasons }
}
