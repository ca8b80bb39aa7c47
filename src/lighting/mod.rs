mod direct;
mod point;
mod reflection;

use crate::{
    grid::Occupancy,
    math::{Ray, Vector2},
};

pub use direct::*;
pub use point::*;
pub use reflection::*;

/// Whether anything opaque sits strictly between the light and a cell.
///
/// The ray is sampled at whole steps `1..trunc(distance)`, skipping the
/// light's own cell. `ignore` exempts one cell, used when the target itself
/// is part of an object.
pub fn occluded(
    occupancy: &Occupancy,
    light: Vector2,
    target: (i32, i32),
    ignore: Option<(i32, i32)>,
) -> bool {
    let (ray, distance) = match Ray::between(light, Vector2::from_cell(target)) {
        Some(r) => r,
        None => return false,
    };

    let blocked = ray
        .march(1..distance as u32)
        .filter(|&cell| Some(cell) != ignore)
        .any(|cell| occupancy.is_occupied(cell));
    blocked
}
