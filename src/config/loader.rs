use std::path::Path;

use log::info;

use super::{ConfigError, SceneConfig};

/// Load a scene description from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: SceneConfig = serde_yaml::from_str(&content)?;
    info!("loaded scene from {} ({:?} preset)", path.display(), config.preset);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Preset, material::Color};

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/scene.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.yaml");
        std::fs::write(&file, "grid: [width: 3").unwrap();

        let result = load_config(&file);
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_bad_color() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("color.yaml");
        std::fs::write(&file, "circle:\n  color: \"#12\"\n").unwrap();

        let result = load_config(&file);
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_nan_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nan.yaml");
        std::fs::write(&file, "light:\n  intensity: .nan\n").unwrap();

        let config = load_config(&file).unwrap();
        assert!(matches!(config.build(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scene.yaml");

        let content = r##"
preset: terminal
grid:
  width: 60
  height: 30
circle:
  center: [20, 12]
  radius: 8
  color: "#2040FF"
square:
  origin: [45, 5]
  size: 6
light:
  position: [3, 4]
  intensity: 150
reflections: true
diffusion: 0
seed: 9
"##;
        std::fs::write(&file, content).unwrap();

        let config = load_config(&file).unwrap();
        assert_eq!(config.preset, Preset::Terminal);
        assert_eq!(config.seed, Some(9));

        let scene = config.build().unwrap();
        assert_eq!((scene.grid.width, scene.grid.height), (60, 30));
        assert_eq!(scene.grid.aspect, 0.5);
        assert_eq!(scene.circle.radius, 8.);
        assert_eq!(scene.circle.color, Color::new(0x20, 0x40, 0xff));
        assert_eq!(scene.square.origin, (45, 5));
        assert_eq!((scene.square.width, scene.square.height), (6, 3));
        assert_eq!(scene.light.position, (3, 4));
        assert_eq!(scene.light.intensity, 150.);
        assert!(scene.reflections);
        assert!(scene.follow_pointer);
    }

    #[test]
    fn test_load_config_empty_uses_preset() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.yaml");
        std::fs::write(&file, "{}\n").unwrap();

        let scene = load_config(&file).unwrap().build().unwrap();
        assert_eq!(scene, crate::scene::SceneState::canvas());
    }
}
