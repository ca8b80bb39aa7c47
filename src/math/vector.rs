use std::ops::{Add, Div, Mul, Sub};

/// A vector in 2D grid space. `x` grows to the right, `y` grows downward.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Instantiate a new Vector2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The center-less position of an integer cell.
    pub fn from_cell((x, y): (i32, i32)) -> Self {
        Self::new(x as f64, y as f64)
    }

    /// Find the dot product between two Vector2s.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Find the magnitude of this Vector2.
    pub fn magnitude(self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    /// Normalize this Vector2 by dividing it by its own magnitude.
    ///
    /// Returns `None` for a zero-length vector.
    pub fn normalize(self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude > 0. {
            Some(self / magnitude)
        } else {
            None
        }
    }

    /// Reflect this vector about a unit normal, `2(N·V)N - V`.
    ///
    /// Both vectors point away from the surface.
    pub fn reflect(self, normal: Self) -> Self {
        normal * (2. * normal.dot(self)) - self
    }

    /// The integer cell containing this point, rounding toward negative infinity.
    pub fn cell(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_is_none() {
        assert_eq!(Vector2::default().normalize(), None);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = Vector2::new(3., 4.).normalize().unwrap();
        assert!((n.magnitude() - 1.).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_about_axis() {
        // light arriving from up-left bounces off a left-facing wall toward down-left
        let to_light = Vector2::new(-1., -1.).normalize().unwrap();
        let r = to_light.reflect(Vector2::new(-1., 0.));
        assert!((r.x - to_light.x).abs() < 1e-12);
        assert!((r.y + to_light.y).abs() < 1e-12);
    }

    #[test]
    fn test_cell_floors_negative() {
        assert_eq!(Vector2::new(-0.5, 2.9).cell(), (-1, 2));
    }
}
