use image::Luma;
use imageproc::region_labelling::{Connectivity, connected_components};
use std::collections::BTreeMap;

use crate::grid::Grid;
use crate::models::{BoundingBox, RegionStats};

/// Partitions foreground pixels into connected regions
pub trait RegionLabeler: Send + Sync {
    /// One entry per foreground region, in label order. Background is never reported.
    fn label(&self, grid: &Grid) -> Vec<RegionStats>;
}

/// 8-connected labeling backed by imageproc
pub struct ImageprocLabeler;

impl RegionLabeler for ImageprocLabeler {
    fn label(&self, grid: &Grid) -> Vec<RegionStats> {
        let labeled = connected_components(&grid.to_image(), Connectivity::Eight, Luma([0u8]));

        let mut regions: BTreeMap<u32, (u32, u32, u32, u32, u32)> = BTreeMap::new();
        for (x, y, label) in labeled.enumerate_pixels() {
            let label_val = label[0];
            if label_val == 0 {
                continue;
            }

            regions
                .entry(label_val)
                .and_modify(|(min_x, min_y, max_x, max_y, count)| {
                    *min_x = (*min_x).min(x);
                    *min_y = (*min_y).min(y);
                    *max_x = (*max_x).max(x);
                    *max_y = (*max_y).max(y);
                    *count += 1;
                })
                .or_insert((x, y, x, y, 1));
        }

        regions
            .into_iter()
            .map(|(label, (min_x, min_y, max_x, max_y, count))| RegionStats {
                label,
                min_x,
                min_y,
                max_x,
                max_y,
                pixel_count: count,
            })
            .collect()
    }
}

/// Pick the "biggest" region box.
///
/// A region replaces the current best when it is wider OR taller than it,
/// so the result depends on label order and need not have the largest area.
/// Returns the zero box when there are no regions.
pub fn select_biggest(regions: &[RegionStats]) -> BoundingBox {
    let mut best = BoundingBox::default();
    for region in regions {
        let candidate = region.bounding_box();
        if candidate.width > best.width || candidate.height > best.height {
            log::debug!("region {} replaces best box: {}", region.label, candidate);
            best = candidate;
        }
    }
    best
}
