use crate::{
    grid::{Grid, Occupancy},
    lighting::PointLight,
    material::Color,
};

/// Cells with no more energy than this are drawn pure black.
pub const DARK_THRESHOLD: f64 = 0.1;

/// Lit cells are pushed this much brighter before channels saturate.
pub const BRIGHTNESS_BOOST: f64 = 1.1;

/// What occupies a cell of the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Open space, shaded by accumulated light.
    Empty,

    /// Part of an object, always drawn in the object's flat color.
    Object(Color),

    /// The cell holding the light.
    Light,
}

/// The result of lighting one frame: per-cell kind, accumulated energy and tint.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    grid: Grid,
    light_color: Color,
    light_intensity: f64,
    kinds: Vec<CellKind>,
    intensity: Vec<f64>,
    tint: Vec<Color>,
    lit: Vec<bool>,
}

impl FrameBuffer {
    /// A black frame with objects and the light placed. Objects take
    /// precedence over the light when both share a cell.
    pub fn new(occupancy: &Occupancy, light: &PointLight) -> Self {
        let grid = *occupancy.grid();
        let mut kinds = vec![CellKind::Empty; grid.len()];
        for y in 0..grid.height {
            for x in 0..grid.width {
                if let Some(color) = occupancy.color_at((x, y)) {
                    kinds[grid.index((x, y))] = CellKind::Object(color);
                }
            }
        }
        if grid.contains(light.position) && !occupancy.is_occupied(light.position) {
            kinds[grid.index(light.position)] = CellKind::Light;
        }

        Self {
            grid,
            light_color: light.color,
            light_intensity: light.intensity,
            kinds,
            intensity: vec![0.; grid.len()],
            tint: vec![Color::black(); grid.len()],
            lit: vec![false; grid.len()],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    /// The kind of a cell. Off-grid cells read as empty.
    pub fn kind(&self, cell: (i32, i32)) -> CellKind {
        self.slot(cell)
            .map(|i| self.kinds[i])
            .unwrap_or(CellKind::Empty)
    }

    pub fn is_occupied(&self, cell: (i32, i32)) -> bool {
        matches!(self.kind(cell), CellKind::Object(_))
    }

    /// Accumulated energy of a cell.
    pub fn intensity(&self, cell: (i32, i32)) -> f64 {
        self.slot(cell).map(|i| self.intensity[i]).unwrap_or(0.)
    }

    /// Accumulated hue of a cell, before brightness scaling.
    pub fn tint(&self, cell: (i32, i32)) -> Color {
        self.slot(cell)
            .map(|i| self.tint[i])
            .unwrap_or_else(Color::black)
    }

    /// Whether light reached this cell directly from the source.
    pub fn is_lit(&self, cell: (i32, i32)) -> bool {
        self.slot(cell).map(|i| self.lit[i]).unwrap_or(false)
    }

    /// An open cell the light cannot see.
    pub fn is_shadowed(&self, cell: (i32, i32)) -> bool {
        self.grid.contains(cell) && self.kind(cell) == CellKind::Empty && !self.is_lit(cell)
    }

    /// Record the light's own cell.
    pub(crate) fn light_source(&mut self, cell: (i32, i32), energy: f64) {
        if let Some(i) = self.slot(cell) {
            self.intensity[i] = energy;
            self.tint[i] = self.light_color;
            self.lit[i] = true;
        }
    }

    /// Record direct light reaching an open cell.
    pub(crate) fn illuminate(&mut self, cell: (i32, i32), energy: f64) {
        if let Some(i) = self.slot(cell) {
            self.intensity[i] += energy;
            self.tint[i] = self.light_color;
            self.lit[i] = true;
        }
    }

    /// Add reflected energy to a cell and blend its tint in. The new tint is
    /// weighted by its share of the cell's total energy after the add, so
    /// the result depends on the order contributions arrive in.
    pub(crate) fn deposit(&mut self, cell: (i32, i32), energy: f64, tint: Color) {
        use crate::math::Lerp;

        if let Some(i) = self.slot(cell) {
            self.intensity[i] += energy;
            let total = self.intensity[i];
            if total <= 0. {
                return;
            }

            if total - energy <= 0. {
                self.tint[i] = tint;
            } else {
                self.tint[i] = self.tint[i].lerp(tint, energy / total);
            }
        }
    }

    /// The color a renderer should paint for a cell.
    pub fn display_color(&self, cell: (i32, i32)) -> Color {
        match self.kind(cell) {
            CellKind::Object(color) => color,
            CellKind::Light => self.light_color,
            CellKind::Empty => {
                let intensity = self.intensity(cell);
                if intensity <= DARK_THRESHOLD {
                    Color::black()
                } else {
                    let brightness = (intensity / self.light_intensity).min(1.);
                    self.tint(cell).scale(brightness * BRIGHTNESS_BOOST)
                }
            }
        }
    }

    /// Every cell's display color, row-major.
    pub fn composite(&self) -> Vec<Color> {
        self.cells().map(|cell| self.display_color(cell)).collect()
    }

    /// All cell coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (w, h) = (self.grid.width, self.grid.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }

    fn slot(&self, cell: (i32, i32)) -> Option<usize> {
        if self.grid.contains(cell) {
            Some(self.grid.index(cell))
        } else {
            None
        }
    }
}
