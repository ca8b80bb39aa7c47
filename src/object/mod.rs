mod circle;
mod square;

use crate::grid::Occupancy;

pub use circle::*;
pub use square::*;

/// A trait that represents any shape that can be rasterized onto the grid.
pub trait Rasterize {
    /// Fill the cells this shape covers. When `reflective` is set, edge cells
    /// are also recorded as reflective surfaces.
    fn rasterize(&self, occupancy: &mut Occupancy, reflective: bool);
}

/// A trait that represents any opaque object in the scene.
pub trait SceneObject: Rasterize + Send + Sync {
    /// Relocate the object's anchor cell.
    fn move_to(&mut self, cell: (i32, i32));
}
