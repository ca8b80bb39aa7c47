use crate::{material::Color, math::Vector2};

/// The dimmest a light can be turned down to.
pub const MIN_INTENSITY: f64 = 10.;

/// The brightest a light can be turned up to.
pub const MAX_INTENSITY: f64 = 200.;

/// A point light, which is a light that emits in all directions from a single cell.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    /// The cell this light sits in.
    pub position: (i32, i32),

    /// The intensity of this light, kept within `MIN_INTENSITY..=MAX_INTENSITY`.
    pub intensity: f64,

    /// The color of this light.
    pub color: Color,
}

/// Pull an intensity into the allowed range. NaN counts as the dimmest setting.
pub fn clamp_intensity(intensity: f64) -> f64 {
    if intensity.is_nan() {
        return MIN_INTENSITY;
    }
    intensity.clamp(MIN_INTENSITY, MAX_INTENSITY)
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: (0, 0),
            intensity: 100.,
            color: Color::warm_white(),
        }
    }
}

impl PointLight {
    pub fn new(position: (i32, i32), intensity: f64) -> Self {
        Self {
            position,
            intensity: clamp_intensity(intensity),
            ..Default::default()
        }
    }

    pub fn origin(&self) -> Vector2 {
        Vector2::from_cell(self.position)
    }

    /// Energy deposited into the light's own cell.
    pub fn source_energy(&self) -> f64 {
        self.intensity * 2.
    }

    /// Energy reaching an unshadowed cell at `distance`. Never exceeds the
    /// light's own intensity, even for neighbouring cells.
    pub fn falloff(&self, distance: f64) -> f64 {
        let distance = distance.max(1.);
        (self.intensity / (distance * 0.5)).min(self.intensity)
    }

    /// Energy a surface at `distance` sends back along its reflected ray,
    /// before the per-step falloff.
    pub fn reflection_strength(&self, distance: f64) -> f64 {
        self.intensity * 0.4 / (distance * 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_intensity() {
        assert_eq!(PointLight::new((0, 0), 500.).intensity, MAX_INTENSITY);
        assert_eq!(PointLight::new((0, 0), 0.).intensity, MIN_INTENSITY);
        assert_eq!(PointLight::new((0, 0), f64::NAN).intensity, MIN_INTENSITY);
    }

    #[test]
    fn test_falloff_clamped_near_light() {
        let light = PointLight::new((0, 0), 200.);
        assert!(light.falloff(1.) <= 200.);
        assert!(light.falloff(0.) <= 200.);
        assert_eq!(light.falloff(1.), 200.);
    }

    #[test]
    fn test_falloff_decreases() {
        let light = PointLight::new((0, 0), 100.);
        assert_eq!(light.falloff(4.), 50.);
        assert!(light.falloff(10.) < light.falloff(4.));
    }

    #[test]
    fn test_reflection_strength() {
        let light = PointLight::new((0, 0), 100.);
        assert!((light.reflection_strength(10.) - 40.).abs() < 1e-9);
    }
}
