use crate::{
    grid::{Occupancy, ReflectiveSurface},
    material::Color,
    math::Vector2,
};

use super::{Rasterize, SceneObject};

/// An axis-aligned rectangle anchored at its top-left cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    pub origin: (i32, i32),
    pub width: i32,
    pub height: i32,
    pub color: Color,
}

impl Square {
    pub fn new(origin: (i32, i32), width: i32, height: i32, color: Color) -> Self {
        Self {
            origin,
            width,
            height,
            color,
        }
    }

    /// A square that looks square on screen: `size` columns wide and as many
    /// rows as cover the same height given the cell aspect ratio.
    pub fn aspect_corrected(origin: (i32, i32), size: i32, aspect: f64, color: Color) -> Self {
        let height = (size as f64 * aspect.max(0.)) as i32;
        Self::new(origin, size, height, color)
    }

    /// One past the bottom-right cell, pinned at the edge of the coordinate space.
    fn far_corner(&self) -> (i32, i32) {
        let (sx, sy) = self.origin;
        (sx.saturating_add(self.width), sy.saturating_add(self.height))
    }

    /// The outward normal of an edge cell. Left and right edges win over top
    /// and bottom, so corners face sideways.
    fn edge_normal(&self, (x, y): (i32, i32)) -> Option<Vector2> {
        let (sx, sy) = self.origin;
        let (right, bottom) = self.far_corner();
        if x == sx {
            Some(Vector2::new(-1., 0.))
        } else if x == right - 1 {
            Some(Vector2::new(1., 0.))
        } else if y == sy {
            Some(Vector2::new(0., -1.))
        } else if y == bottom - 1 {
            Some(Vector2::new(0., 1.))
        } else {
            None
        }
    }
}

impl Rasterize for Square {
    fn rasterize(&self, occupancy: &mut Occupancy, reflective: bool) {
        let grid = *occupancy.grid();
        let (sx, sy) = self.origin;
        let (right, bottom) = self.far_corner();

        // negative sizes produce empty ranges
        for y in grid.rows(sy, bottom) {
            for x in grid.columns(sx, right) {
                occupancy.fill((x, y), self.color);

                if !reflective {
                    continue;
                }
                if let Some(normal) = self.edge_normal((x, y)) {
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

impl SceneObject for Square {
    fn move_to(&mut self, cell: (i32, i32)) {
        self.origin = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn raster(square: &Square, grid: Grid) -> Occupancy {
        let mut occ = Occupancy::new(grid);
        square.rasterize(&mut occ, true);
        occ
    }

    #[test]
    fn test_aspect_corrected_height() {
        let sq = Square::aspect_corrected((0, 0), 5, 0.875, Color::white());
        assert_eq!((sq.width, sq.height), (5, 4));
        let sq = Square::aspect_corrected((0, 0), 10, 0.5, Color::white());
        assert_eq!((sq.width, sq.height), (10, 5));
        let sq = Square::aspect_corrected((0, 0), 3, 1., Color::white());
        assert_eq!((sq.width, sq.height), (3, 3));
    }

    #[test]
    fn test_fills_rectangle() {
        let occ = raster(&Square::new((2, 3), 4, 2, Color::white()), Grid::new(10, 10));
        assert_eq!(occ.count(), 8);
        assert!(occ.is_occupied((2, 3)));
        assert!(occ.is_occupied((5, 4)));
        assert!(!occ.is_occupied((6, 4)));
        assert!(!occ.is_occupied((2, 5)));
    }

    #[test]
    fn test_edge_priority() {
        let occ = raster(&Square::new((1, 1), 4, 4, Color::white()), Grid::new(10, 10));
        let normal_at = |cell| occ.surfaces.iter().find(|s| s.cell == cell).map(|s| s.normal);

        assert_eq!(normal_at((1, 1)), Some(Vector2::new(-1., 0.)));
        assert_eq!(normal_at((4, 4)), Some(Vector2::new(1., 0.)));
        assert_eq!(normal_at((2, 1)), Some(Vector2::new(0., -1.)));
        assert_eq!(normal_at((3, 4)), Some(Vector2::new(0., 1.)));
        assert_eq!(normal_at((2, 2)), None);
        assert_eq!(occ.surfaces.len(), 12);
    }

    #[test]
    fn test_single_cell_faces_left() {
        let occ = raster(&Square::new((2, 2), 1, 1, Color::white()), Grid::new(6, 6));
        assert_eq!(occ.surfaces.len(), 1);
        assert_eq!(occ.surfaces[0].normal, Vector2::new(-1., 0.));
    }

    #[test]
    fn test_negative_size_is_empty() {
        let occ = raster(&Square::new((2, 2), -3, 4, Color::white()), Grid::new(6, 6));
        assert_eq!(occ.count(), 0);
    }

    #[test]
    fn test_clipped_loses_hidden_edge() {
        let occ = raster(&Square::new((-2, 0), 4, 2, Color::white()), Grid::new(6, 6));
        assert_eq!(occ.count(), 4);
        assert!(occ
            .surfaces
            .iter()
            .all(|s| s.normal != Vector2::new(-1., 0.)));
    }

    #[test]
    fn test_far_origin_does_not_overflow() {
        let square = Square::new((i32::MAX, 0), 5, 5, Color::white());
        assert_eq!(raster(&square, Grid::new(10, 10)).count(), 0);

        let square = Square::new((0, i32::MAX - 1), 3, i32::MAX, Color::white());
        assert_eq!(raster(&square, Grid::new(10, 10)).count(), 0);
    }
}
