use rayon::prelude::*;

use crate::{
    frame::{CellKind, FrameBuffer},
    grid::Occupancy,
};

use super::{occluded, PointLight};

/// Energy the light delivers straight to an open cell, or `None` when the cell is in shadow.
pub fn direct_energy(light: &PointLight, occupancy: &Occupancy, cell: (i32, i32)) -> Option<f64> {
    if occluded(occupancy, light.origin(), cell, None) {
        return None;
    }

    let (x, y) = cell;
    let (lx, ly) = light.position;
    let distance = (((x - lx).pow(2) + (y - ly).pow(2)) as f64).sqrt();
    Some(light.falloff(distance))
}

/// Light every open cell the source can see. Returns how many cells were lit.
///
/// Cells are independent here, so they are shaded in parallel and written
/// back in order.
pub fn illuminate(frame: &mut FrameBuffer, occupancy: &Occupancy, light: &PointLight) -> usize {
    let cells: Vec<(i32, i32)> = frame.cells().collect();

    let energies = cells
        .par_iter()
        .map(|&cell| match frame.kind(cell) {
            CellKind::Empty => direct_energy(light, occupancy, cell),
            _ => None,
        })
        .collect::<Vec<_>>();

    if frame.kind(light.position) == CellKind::Light {
        frame.light_source(light.position, light.source_energy());
    }

    let mut lit = 0;
    for (cell, energy) in cells.into_iter().zip(energies) {
        if let Some(energy) = energy {
            frame.illuminate(cell, energy);
            lit += 1;
        }
    }
    lit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::Grid, material::Color};

    fn scene() -> (Occupancy, PointLight) {
        let mut occ = Occupancy::new(Grid::new(6, 6));
        occ.fill((2, 2), Color::new(0xb0, 0, 0));
        (occ, PointLight::new((0, 0), 100.))
    }

    #[test]
    fn test_direct_energy() {
        let (occ, light) = scene();
        assert_eq!(direct_energy(&light, &occ, (0, 4)), Some(50.));
        assert_eq!(direct_energy(&light, &occ, (4, 4)), None);
    }

    #[test]
    fn test_illuminate_frame() {
        let (occ, light) = scene();
        let mut frame = FrameBuffer::new(&occ, &light);
        let lit = illuminate(&mut frame, &occ, &light);

        assert_eq!(frame.intensity((0, 0)), 200.);
        assert!(frame.is_lit((0, 0)));
        assert!(frame.is_shadowed((4, 4)));
        assert!(frame.is_shadowed((5, 5)));
        assert!(!frame.is_shadowed((0, 4)));
        assert_eq!(frame.intensity((2, 2)), 0.);
        // 36 cells minus the object, the light and the shadowed diagonal
        assert_eq!(lit, 36 - 1 - 1 - frame.cells().filter(|&c| frame.is_shadowed(c)).count());
    }

    #[test]
    fn test_neighbours_capped_at_intensity() {
        let mut occ = Occupancy::new(Grid::new(3, 3));
        occ.fill((2, 2), Color::white());
        let light = PointLight::new((1, 1), 200.);
        let mut frame = FrameBuffer::new(&occ, &light);
        illuminate(&mut frame, &occ, &light);
        assert_eq!(frame.intensity((1, 0)), 200.);
        assert!(frame.intensity((0, 0)) <= 200.);
    }
}
