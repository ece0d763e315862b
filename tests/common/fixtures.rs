use shapeclass::{ClassifierConfig, Grid};
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const SIZE: usize = 15;

/// 15x15 drawing surface for building test grids
#[derive(Clone)]
pub struct Canvas {
    cells: [[u8; SIZE]; SIZE],
}

impl Canvas {
    pub fn blank() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    pub fn fill_rect(mut self, x: usize, y: usize, width: usize, height: usize) -> Self {
        for row in &mut self.cells[y..y + height] {
            for cell in &mut row[x..x + width] {
                *cell = 1;
            }
        }
        self
    }

    /// Filled disk inscribed in the `diameter` square at (x, y)
    pub fn disk(mut self, x: usize, y: usize, diameter: usize) -> Self {
        let r = diameter as f64 / 2.0;
        for dy in 0..diameter {
            for dx in 0..diameter {
                let (fx, fy) = (dx as f64 + 0.5 - r, dy as f64 + 0.5 - r);
                if fx * fx + fy * fy <= r * r {
                    self.cells[y + dy][x + dx] = 1;
                }
            }
        }
        self
    }

    /// Horizontally centered runs, one per row, inside a box as wide as the widest run
    pub fn centered_rows(mut self, x: usize, y: usize, widths: &[usize]) -> Self {
        let box_width = widths.iter().copied().max().unwrap_or(0);
        for (dy, &width) in widths.iter().enumerate() {
            let start = x + (box_width - width) / 2;
            for cell in &mut self.cells[y + dy][start..start + width] {
                *cell = 1;
            }
        }
        self
    }

    /// One-pixel-wide plus sign with arms of length `arm` around (cx, cy)
    pub fn plus(mut self, cx: usize, cy: usize, arm: usize) -> Self {
        for i in cx - arm..=cx + arm {
            self.cells[cy][i] = 1;
        }
        for i in cy - arm..=cy + arm {
            self.cells[i][cx] = 1;
        }
        self
    }

    pub fn clear(mut self, x: usize, y: usize) -> Self {
        self.cells[y][x] = 0;
        self
    }

    pub fn to_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| if *c == 1 { '1' } else { '0' }).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_grid(&self) -> Grid {
        Grid::parse(&self.to_text(), &ClassifierConfig::default()).expect("canvas is a valid grid")
    }

    /// Write the grid to a temp file that lives as long as the returned handle
    pub fn to_file(&self) -> NamedTempFile {
        write_temp(&self.to_text())
    }
}

pub fn write_temp(contents: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("Failed to create temp grid file");
    std::fs::write(file.path(), contents).expect("Failed to write temp grid file");
    file
}

pub fn temp_path(file: &NamedTempFile) -> PathBuf {
    file.path().to_path_buf()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
