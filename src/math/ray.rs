use std::ops::Range;

use super::Vector2;

#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector2,
    pub direction: Vector2,
}

impl Ray {
    /// Instantiate a new Ray. The direction is expected to be already normalized.
    pub fn new(origin: Vector2, direction: Vector2) -> Self {
        Self { origin, direction }
    }

    /// Build a ray from one point toward another, along with the distance between them.
    /// Returns `None` when both points coincide.
    pub fn between(from: Vector2, to: Vector2) -> Option<(Ray, f64)> {
        let delta = to - from;
        let distance = delta.magnitude();
        let direction = delta.normalize()?;
        Some((Ray::new(from, direction), distance))
    }

    pub fn along(&self, t: f64) -> Vector2 {
        self.origin + self.direction * t
    }

    /// Step along the ray in unit increments, yielding the cell under each sample.
    pub fn march(&self, steps: Range<u32>) -> impl Iterator<Item = (i32, i32)> + '_ {
        steps.map(move |t| self.along(t as f64).cell())
    }
}
