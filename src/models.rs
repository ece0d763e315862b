use serde::Serialize;
use std::fmt;

use crate::grid::Grid;

/// Axis-aligned box in grid coordinates. A zero box means no region was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Midpoint of the top-left and (exclusive) bottom-right corners
    pub fn center(&self) -> (f64, f64) {
        (
            (2 * self.x + self.width) as f64 / 2.0,
            (2 * self.y + self.height) as f64 / 2.0,
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}

/// Statistics of one labeled foreground region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionStats {
    pub label: u32,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub pixel_count: u32,
}

impl RegionStats {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.min_x, self.min_y, self.width(), self.height())
    }
}

/// What morphological opening removed from the cropped region
#[derive(Debug, Clone)]
pub struct Residual {
    /// (x, y) positions inside the crop that opening eliminated
    pub points: Vec<(u32, u32)>,
    /// Number of crop corners (0..=4) that opening did not remove
    pub missing_corners: u8,
    pub source: Grid,
    pub opened: Grid,
    pub diff: Grid,
}

/// Final verdict of one classification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ShapeClassification {
    Circle {
        diameter: u32,
        center: (f64, f64),
        confidence: f64,
    },
    Square {
        side: u32,
        top_left: (u32, u32),
        confidence: f64,
    },
    Unknown {
        confidence: f64,
        reason: String,
    },
}

impl ShapeClassification {
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Circle { confidence, .. }
            | Self::Square { confidence, .. }
            | Self::Unknown { confidence, .. } => *confidence,
        }
    }
}

impl fmt::Display for ShapeClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle {
                diameter,
                center,
                confidence,
            } => write!(
                f,
                "Circle. Confidence: {}. Diameter: {}. Center: ({}, {})",
                format_confidence(*confidence),
                diameter,
                center.0,
                center.1
            ),
            Self::Square {
                side,
                top_left,
                confidence,
            } => write!(
                f,
                "Square. Confidence: {}. Side length: {}. Top left corner: ({}, {})",
                format_confidence(*confidence),
                side,
                top_left.0,
                top_left.1
            ),
            Self::Unknown { confidence, .. } => {
                write!(f, "Unknown shape. Confidence: {}", format_confidence(*confidence))
            }
        }
    }
}

/// Everything reported for one classified grid
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub bounding_box: BoundingBox,
    /// Failed size checks, in evaluation order
    pub penalties: Vec<String>,
    pub result: ShapeClassification,
}

/// Up to four decimals, trailing zeros trimmed, at least one decimal kept
pub fn format_confidence(value: f64) -> String {
    let text = format!("{:.4}", value);
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_formatting() {
        assert_eq!(format_confidence(1.0), "1.0");
        assert_eq!(format_confidence(0.8 * 0.8), "0.64");
        assert_eq!(format_confidence(0.9 * 0.9 * 0.9), "0.729");
        assert_eq!(format_confidence(0.0), "0.0");
    }

    #[test]
    fn center_is_not_rounded() {
        assert_eq!(BoundingBox::new(4, 4, 7, 7).center(), (7.5, 7.5));
        assert_eq!(BoundingBox::new(2, 3, 6, 6).center(), (5.0, 6.0));
    }

    #[test]
    fn verdict_lines() {
        let circle = ShapeClassification::Circle {
            diameter: 7,
            center: (7.5, 7.5),
            confidence: 1.0,
        };
        assert_eq!(
            circle.to_string(),
            "Circle. Confidence: 1.0. Diameter: 7. Center: (7.5, 7.5)"
        );

        let square = ShapeClassification::Square {
            side: 6,
            top_left: (2, 3),
            confidence: 0.9,
        };
        assert_eq!(
            square.to_string(),
            "Square. Confidence: 0.9. Side length: 6. Top left corner: (2, 3)"
        );
    }
}
