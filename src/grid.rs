use image::{GrayImage, Luma};
use std::fmt;
use std::path::Path;

use crate::config::ClassifierConfig;
use crate::error::{Result, ShapeError};
use crate::models::BoundingBox;

/// Dense binary raster, cells are 0 (background) or 1 (foreground)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl Grid {
    /// All-background grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Read a grid file from disk
    pub fn load(path: &Path, config: &ClassifierConfig) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ShapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&String::from_utf8_lossy(&bytes), config)
    }

    /// Parse `grid_height` lines of at least `grid_width` '0'/'1' characters.
    /// Extra characters and extra lines are ignored.
    pub fn parse(text: &str, config: &ClassifierConfig) -> Result<Self> {
        let (width, height) = (config.grid_width, config.grid_height);
        let mut grid = Self::new(width, height);
        let mut lines = text.lines();

        for y in 0..height {
            let line_no = y as usize + 1;
            let line = lines.next().ok_or_else(|| ShapeError::MalformedInput {
                line: line_no,
                reason: format!("expected {} lines, found {}", height, y),
            })?;
            let bytes = line.as_bytes();
            if bytes.len() < width as usize {
                return Err(ShapeError::MalformedInput {
                    line: line_no,
                    reason: format!("expected at least {} characters, found {}", width, bytes.len()),
                });
            }

            for x in 0..width {
                let value = match bytes[x as usize] {
                    b'0' => 0,
                    b'1' => 1,
                    other => {
                        return Err(ShapeError::MalformedInput {
                            line: line_no,
                            reason: format!(
                                "unexpected character {:?} at column {}",
                                other as char,
                                x + 1
                            ),
                        });
                    }
                };
                grid.set(x, y, value);
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 1).count()
    }

    /// Copy of the region covered by `bbox`, or None if it does not fit
    pub fn crop(&self, bbox: &BoundingBox) -> Option<Grid> {
        if bbox.x + bbox.width > self.width || bbox.y + bbox.height > self.height {
            return None;
        }
        let mut out = Grid::new(bbox.width, bbox.height);
        for y in 0..bbox.height {
            for x in 0..bbox.width {
                out.set(x, y, self.get(bbox.x + x, bbox.y + y));
            }
        }
        Some(out)
    }

    /// Write `sub` into this grid with its top-left corner at (x, y), clipped to bounds
    pub fn embed(&mut self, sub: &Grid, x: u32, y: u32) {
        for sy in 0..sub.height {
            for sx in 0..sub.width {
                let (tx, ty) = (x + sx, y + sy);
                if tx < self.width && ty < self.height {
                    self.set(tx, ty, sub.get(sx, sy));
                }
            }
        }
    }

    /// Pixels set here but not in `other`. Both grids must share dimensions.
    pub fn difference(&self, other: &Grid) -> Grid {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        Grid {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(a, b)| a.saturating_sub(*b))
                .collect(),
        }
    }

    /// Render as an 8-bit image with foreground at 255
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.get(x, y) * 255]))
    }

    /// Any non-zero pixel becomes foreground
    pub fn from_image(img: &GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            cells: img.pixels().map(|p| u8::from(p[0] > 0)).collect(),
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: Vec<String> = (0..self.width).map(|x| self.get(x, y).to_string()).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
