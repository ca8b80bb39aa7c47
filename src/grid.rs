use serde::{Deserialize, Serialize};

use crate::{material::Color, math::Vector2};

/// The fixed cell grid everything is lit on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,

    /// Width of a cell divided by its height, as displayed. Terminal
    /// characters are roughly twice as tall as wide, so they sit near 0.5.
    #[serde(default = "default_aspect")]
    pub aspect: f64,
}

fn default_aspect() -> f64 {
    1.
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(100, 70)
    }
}

impl Grid {
    /// A grid of square cells.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            aspect: default_aspect(),
        }
    }

    pub fn with_aspect(self, aspect: f64) -> Self {
        Self { aspect, ..self }
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Clamp a cell onto the grid.
    pub fn clamp(&self, (x, y): (i32, i32)) -> (i32, i32) {
        (
            x.clamp(0, (self.width - 1).max(0)),
            y.clamp(0, (self.height - 1).max(0)),
        )
    }

    /// Row-major index of an in-grid cell.
    pub fn index(&self, (x, y): (i32, i32)) -> usize {
        (y * self.width + x) as usize
    }

    pub fn len(&self) -> usize {
        (self.width.max(0) * self.height.max(0)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clamp an inclusive-exclusive column range onto the grid.
    pub fn columns(&self, from: i32, to: i32) -> std::ops::Range<i32> {
        from.max(0)..to.min(self.width)
    }

    /// Clamp an inclusive-exclusive row range onto the grid.
    pub fn rows(&self, from: i32, to: i32) -> std::ops::Range<i32> {
        from.max(0)..to.min(self.height)
    }
}

/// An object cell that can bounce light, with its outward normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectiveSurface {
    pub cell: (i32, i32),
    pub normal: Vector2,
    pub color: Color,
}

/// Which cells are covered by an object, and by what color.
///
/// Any occupied cell blocks rays regardless of which object owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct Occupancy {
    grid: Grid,
    cells: Vec<Option<Color>>,

    /// Reflective cells in rasterization order.
    pub surfaces: Vec<ReflectiveSurface>,
}

impl Occupancy {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: vec![None; grid.len()],
            surfaces: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mark a cell as covered. Cells off the grid are ignored, and a later
    /// object overwrites the color of an earlier one.
    pub fn fill(&mut self, cell: (i32, i32), color: Color) {
        if self.grid.contains(cell) {
            let i = self.grid.index(cell);
            self.cells[i] = Some(color);
        }
    }

    pub fn add_surface(&mut self, surface: ReflectiveSurface) {
        self.surfaces.push(surface);
    }

    pub fn is_occupied(&self, cell: (i32, i32)) -> bool {
        self.color_at(cell).is_some()
    }

    pub fn color_at(&self, cell: (i32, i32)) -> Option<Color> {
        if self.grid.contains(cell) {
            self.cells[self.grid.index(cell)]
        } else {
            None
        }
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
