use crate::config::ClassifierConfig;
use crate::models::{BoundingBox, Residual, ShapeClassification, format_confidence};

/// Turn the residual evidence and running confidence into a verdict.
///
/// No residual means opening preserved the whole region, which only a
/// disk-like shape survives. Otherwise each corner that survived opening
/// decays confidence in a square, and four surviving corners are never a square.
pub fn decide(
    bbox: &BoundingBox,
    confidence: f64,
    size_reasons: &[String],
    residual: &Residual,
    config: &ClassifierConfig,
) -> ShapeClassification {
    if residual.points.is_empty() {
        return ShapeClassification::Circle {
            diameter: bbox.width,
            center: bbox.center(),
            confidence,
        };
    }

    let confidence = confidence * config.corner_decay.powi(i32::from(residual.missing_corners));

    let cause = if residual.missing_corners == 4 {
        Some("all four corners survived opening".to_string())
    } else if confidence < config.min_confidence {
        Some(format!(
            "confidence {} below threshold {}",
            format_confidence(confidence),
            format_confidence(config.min_confidence)
        ))
    } else {
        None
    };

    match cause {
        Some(cause) => {
            let mut parts = size_reasons.to_vec();
            parts.push(cause);
            ShapeClassification::Unknown {
                confidence,
                reason: parts.join("; "),
            }
        }
        None => ShapeClassification::Square {
            side: bbox.width,
            top_left: (bbox.x, bbox.y),
            confidence,
        },
    }
}
