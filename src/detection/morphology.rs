use image::GrayImage;
use image::imageops;
use imageproc::distance_transform::Norm;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::Grid;

/// 3x3 structuring element used for opening
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuringElement {
    /// 0 1 0 / 1 1 1 / 0 1 0
    #[default]
    Cross,
    /// All ones
    Square,
}

impl StructuringElement {
    pub fn kernel(&self) -> [[u8; 3]; 3] {
        match self {
            Self::Cross => [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
            Self::Square => [[1, 1, 1], [1, 1, 1], [1, 1, 1]],
        }
    }

    /// Distance norm whose unit ball is this element
    fn norm(&self) -> Norm {
        match self {
            Self::Cross => Norm::L1,
            Self::Square => Norm::LInf,
        }
    }
}

impl fmt::Display for StructuringElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.kernel() {
            writeln!(f, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

/// Erosion followed by dilation
pub trait MorphologicalOpener: Send + Sync {
    /// Same dimensions as `image`; pixels outside `image` count as background.
    fn open(&self, image: &Grid, element: StructuringElement) -> Grid;
}

/// Opening backed by imageproc's distance-transform morphology
pub struct ImageprocOpener;

impl MorphologicalOpener for ImageprocOpener {
    fn open(&self, image: &Grid, element: StructuringElement) -> Grid {
        if image.is_empty() {
            return image.clone();
        }

        // imageproc ignores out-of-image pixels when eroding, so a region
        // touching the border would never lose its edge. Surround it with
        // background first.
        let (width, height) = (image.width(), image.height());
        let mut padded = GrayImage::new(width + 2, height + 2);
        imageops::replace(&mut padded, &image.to_image(), 1, 1);

        let opened = imageproc::morphology::open(&padded, element.norm(), 1);
        let inner = imageops::crop_imm(&opened, 1, 1, width, height).to_image();
        Grid::from_image(&inner)
    }
}
