use crate::detection::morphology::{MorphologicalOpener, StructuringElement};
use crate::error::{Result, ShapeError};
use crate::grid::Grid;
use crate::models::{BoundingBox, Residual};

/// Crop `grid` to `bbox`, open the crop and collect what opening removed.
///
/// Fails with `NoForeground` for an empty box, since there is no crop to
/// take corners from.
pub fn analyze_residual(
    grid: &Grid,
    bbox: &BoundingBox,
    opener: &dyn MorphologicalOpener,
    element: StructuringElement,
) -> Result<Residual> {
    if bbox.is_empty() {
        return Err(ShapeError::NoForeground);
    }
    let source = grid
        .crop(bbox)
        .ok_or_else(|| ShapeError::BoxOutOfRange(bbox.to_string()))?;

    let opened = opener.open(&source, element);
    let diff = source.difference(&opened);

    let mut points = Vec::new();
    for y in 0..diff.height() {
        for x in 0..diff.width() {
            if diff.get(x, y) == 1 {
                points.push((x, y));
            }
        }
    }

    let missing_corners = count_missing_corners(&diff);
    log::debug!(
        "residual: {} points, {} corners survived opening",
        points.len(),
        missing_corners
    );

    Ok(Residual {
        points,
        missing_corners,
        source,
        opened,
        diff,
    })
}

/// Corners of `diff` that are not marked as removed
fn count_missing_corners(diff: &Grid) -> u8 {
    let (right, bottom) = (diff.width() - 1, diff.height() - 1);
    [(0, 0), (right, 0), (0, bottom), (right, bottom)]
        .into_iter()
        .filter(|&(x, y)| diff.get(x, y) == 0)
        .count() as u8
}
