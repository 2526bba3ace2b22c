//! Scene configuration
//!
//! Optional RON file; every field falls back to the built-in default.

use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::rasterizer::{Camera, RasterSettings, SizingMode, Vec3};
use super::store::{DEFAULT_SEED, DEFAULT_SPHERE_COUNT};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Startup parameters for the scene and camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub sphere_count: usize,
    pub seed: u64,
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub sizing: SizingMode,
    pub cull_behind_camera: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let camera = Camera::default();
        let settings = RasterSettings::default();
        Self {
            sphere_count: DEFAULT_SPHERE_COUNT,
            seed: DEFAULT_SEED,
            eye: camera.eye,
            target: camera.target,
            fov_y: camera.fov_y,
            sizing: settings.sizing,
            cull_behind_camera: settings.cull_behind_camera,
        }
    }
}

impl SceneConfig {
    /// Parse and validate config from a RON string
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(ConfigError::Invalid(format!(
                "fov_y must be in (0, pi), got {}",
                self.fov_y
            )));
        }
        if (self.eye - self.target).len() == 0.0 {
            return Err(ConfigError::Invalid("eye and target coincide".to_string()));
        }
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.eye, self.target, self.fov_y)
    }

    pub fn raster_settings(&self) -> RasterSettings {
        RasterSettings {
            sizing: self.sizing,
            cull_behind_camera: self.cull_behind_camera,
        }
    }
}

/// Load config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    SceneConfig::from_ron_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_struct_uses_defaults() {
        let config = SceneConfig::from_ron_str("()").expect("defaults");
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.sphere_count, 2000);
        assert_eq!(config.seed, 1337);
    }

    #[test]
    fn test_partial_override() {
        let config = SceneConfig::from_ron_str(
            "(sphere_count: 50, eye: (x: 0.0, y: 5.0, z: 30.0), sizing: Silhouette)",
        )
        .expect("valid config");
        assert_eq!(config.sphere_count, 50);
        assert_eq!(config.eye, Vec3::new(0.0, 5.0, 30.0));
        assert_eq!(config.sizing, SizingMode::Silhouette);
        assert_eq!(config.seed, 1337);
        assert!(config.cull_behind_camera);
    }

    #[test]
    fn test_rejects_bad_fov() {
        let err = SceneConfig::from_ron_str("(fov_y: 3.5)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_degenerate_camera() {
        let err = SceneConfig::from_ron_str("(eye: (x: 0.0, y: 0.0, z: 0.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = SceneConfig::from_ron_str("(sphere_count: \"many\")").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/nonexistent/sphere-field.ron").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let config = SceneConfig { sphere_count: 7, ..Default::default() };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())
            .expect("serializable");
        let path = std::env::temp_dir().join(format!("sphere_field_cfg_{}.ron", std::process::id()));
        std::fs::write(&path, text).expect("writable temp dir");
        let loaded = load_config(&path).expect("loads");
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }
}
