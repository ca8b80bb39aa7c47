use crate::{
    grid::{Occupancy, ReflectiveSurface},
    material::Color,
    math::Vector2,
};

use super::{Rasterize, SceneObject};

/// Width of the reflective rim, in cells, measured inward from the radius.
pub const RIM_WIDTH: f64 = 0.5;

/// A circle. The radius is measured in cell widths, so on grids with
/// non-square cells it spans fewer rows than columns and still looks round.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f64,
    pub color: Color,
}

impl Circle {
    pub fn new(center: Vector2, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

impl Rasterize for Circle {
    fn rasterize(&self, occupancy: &mut Occupancy, reflective: bool) {
        let grid = *occupancy.grid();
        if !(self.radius >= 0. && self.center.x.is_finite() && self.center.y.is_finite()) {
            return;
        }
        if !(grid.aspect.is_finite() && grid.aspect > 0.) {
            return;
        }

        let (cx, cy) = (self.center.x, self.center.y);
        let reach_y = self.radius * grid.aspect;
        let columns = grid.columns(
            (cx - self.radius).floor() as i32,
            ((cx + self.radius).ceil() as i32).saturating_add(1),
        );
        let rows = grid.rows(
            (cy - reach_y).floor() as i32,
            ((cy + reach_y).ceil() as i32).saturating_add(1),
        );

        for y in rows {
            for x in columns.clone() {
                let offset = Vector2::new(x as f64 - cx, (y as f64 - cy) / grid.aspect);
                let distance = offset.magnitude();
                if distance > self.radius {
                    continue;
                }

                occupancy.fill((x, y), self.color);

                if reflective && distance >= self.radius - RIM_WIDTH {
                    // the exact center has no outward direction
                    if let Some(normal) = offset.normalize() {
                        occupancy.add_surface(ReflectiveSurface {
                            cell: (x, y),
                            normal,
                            color: self.color,
                        });
                    }
                }
            }
        }
    }
}

impl SceneObject for Circle {
    fn move_to(&mut self, cell: (i32, i32)) {
        self.center = Vector2::from_cell(cell);
    }
}
