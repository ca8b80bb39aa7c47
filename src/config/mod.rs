mod loader;

use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    lighting::clamp_intensity,
    material::Color,
    math::Vector2,
    object::Square,
    scene::SceneState,
};

pub use loader::load_config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scene file not found: {0}")]
    NotFound(String),

    #[error("could not read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse scene file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid scene: {0}")]
    Invalid(String),
}

/// The built-in layouts a scene file starts from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Square-ish pixels, reflections on.
    #[default]
    Canvas,

    /// Character cells, light following the pointer.
    Terminal,
}

impl Preset {
    pub fn scene(self) -> SceneState {
        match self {
            Self::Canvas => SceneState::canvas(),
            Self::Terminal => SceneState::terminal(),
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canvas" => Ok(Self::Canvas),
            "terminal" => Ok(Self::Terminal),
            other => Err(ConfigError::Invalid(format!("unknown preset {:?}", other))),
        }
    }
}

/// A scene file. Anything left out falls back to the preset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub preset: Preset,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub circle: CircleConfig,
    #[serde(default)]
    pub square: SquareConfig,
    #[serde(default)]
    pub light: LightConfig,
    pub reflections: Option<bool>,
    pub diffusion: Option<f64>,
    pub follow_pointer: Option<bool>,

    /// Fixes the reflection jitter sequence.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GridConfig {
    pub width: Option<i32>,
    pub height: Option<i32>,

    /// Cell width over cell height.
    pub aspect: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CircleConfig {
    pub center: Option<[f64; 2]>,
    pub radius: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SquareConfig {
    pub origin: Option<[i32; 2]>,

    /// Width in cells. The height follows from the grid aspect unless given.
    pub size: Option<i32>,
    pub height: Option<i32>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LightConfig {
    pub position: Option<[i32; 2]>,
    pub intensity: Option<f64>,
    pub color: Option<Color>,
}

impl SceneConfig {
    /// A config that only picks a preset.
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            ..Default::default()
        }
    }

    /// Apply this file on top of its preset.
    ///
    /// Grid size and diffusion must be sensible; light position and
    /// intensity are pulled into range instead.
    pub fn build(&self) -> Result<SceneState, ConfigError> {
        let mut scene = self.preset.scene();

        let grid = &mut scene.grid;
        if let Some(width) = self.grid.width {
            grid.width = width;
        }
        if let Some(height) = self.grid.height {
            grid.height = height;
        }
        if let Some(aspect) = self.grid.aspect {
            grid.aspect = aspect;
        }
        if grid.width <= 0 || grid.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                grid.width, grid.height
            )));
        }
        if !(grid.aspect.is_finite() && grid.aspect > 0.) {
            return Err(ConfigError::Invalid(format!(
                "grid aspect must be positive, got {}",
                grid.aspect
            )));
        }

        let circle = &mut scene.circle;
        if let Some([x, y]) = self.circle.center {
            circle.center = Vector2::new(x, y);
        }
        if let Some(radius) = self.circle.radius {
            if radius.is_nan() {
                return Err(ConfigError::Invalid("circle radius must be a number".to_string()));
            }
            circle.radius = radius;
        }
        if let Some(color) = self.circle.color {
            circle.color = color;
        }

        let square = &mut scene.square;
        if let Some([x, y]) = self.square.origin {
            square.origin = (x, y);
        }
        if let Some(size) = self.square.size {
            let aspect = scene.grid.aspect;
            *square = Square::aspect_corrected(square.origin, size, aspect, square.color);
        }
        if let Some(height) = self.square.height {
            square.height = height;
        }
        if let Some(color) = self.square.color {
            square.color = color;
        }

        if let Some(intensity) = self.light.intensity {
            if intensity.is_nan() {
                return Err(ConfigError::Invalid("light intensity must be a number".to_string()));
            }
            let clamped = clamp_intensity(intensity);
            if clamped != intensity {
                warn!("light intensity {} clamped to {}", intensity, clamped);
            }
            scene.light.intensity = clamped;
        }
        if let Some([x, y]) = self.light.position {
            scene.light.position = (x, y);
        }
        let position = scene.grid.clamp(scene.light.position);
        if position != scene.light.position {
            warn!(
                "light position {:?} clamped onto the grid at {:?}",
                scene.light.position, position
            );
            scene.light.position = position;
        }
        if let Some(color) = self.light.color {
            scene.light.color = color;
        }

        if let Some(reflections) = self.reflections {
            scene.reflections = reflections;
        }
        if let Some(diffusion) = self.diffusion {
            if !(diffusion.is_finite() && diffusion >= 0.) {
                return Err(ConfigError::Invalid(format!(
                    "diffusion must be zero or more, got {}",
                    diffusion
                )));
            }
            scene.diffusion = diffusion;
        }
        if let Some(follow) = self.follow_pointer {
            scene.follow_pointer = follow;
        }
        scene.pointer = scene.grid.clamp(scene.pointer);

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::MAX_INTENSITY;

    #[test]
    fn test_preset_from_str() {
        assert_eq!("terminal".parse::<Preset>().unwrap(), Preset::Terminal);
        assert!(matches!("opengl".parse::<Preset>(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_build_defaults_to_preset() {
        let scene = SceneConfig::preset(Preset::Terminal).build().unwrap();
        assert_eq!(scene, SceneState::terminal());
    }

    #[test]
    fn test_build_rejects_empty_grid() {
        let mut config = SceneConfig::default();
        config.grid.width = Some(0);
        assert!(matches!(config.build(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.grid.aspect = Some(-1.);
        assert!(matches!(config.build(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_build_rejects_negative_diffusion() {
        let config = SceneConfig {
            diffusion: Some(-0.5),
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_build_clamps_light() {
        let mut config = SceneConfig::default();
        config.grid.width = Some(10);
        config.grid.height = Some(10);
        config.light.intensity = Some(900.);
        config.light.position = Some([40, -3]);

        let scene = config.build().unwrap();
        assert_eq!(scene.light.intensity, MAX_INTENSITY);
        assert_eq!(scene.light.position, (9, 0));
    }

    #[test]
    fn test_explicit_square_height() {
        let mut config = SceneConfig::default();
        config.square.size = Some(4);
        config.square.height = Some(9);
        let scene = config.build().unwrap();
        assert_eq!((scene.square.width, scene.square.height), (4, 9));
        assert_eq!(scene.square.origin, (70, 10));
    }

    #[test]
    fn test_build_rejects_nan_intensity() {
        let mut config = SceneConfig::default();
        config.light.intensity = Some(f64::NAN);
        assert!(matches!(config.build(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_build_rejects_nan_radius() {
        let mut config = SceneConfig::default();
        config.circle.radius = Some(f64::NAN);
        assert!(matches!(config.build(), Err(ConfigError::Invalid(_))));
    }
}
