//! Scene configuration file serialization

use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::deform::DEFAULT_RING_COUNT;
use crate::object::MaterialProperties;
use crate::session::DEFAULT_SPRING_STIFFNESS;

/// Serializable description of a haptic scene
///
/// Placement and tuning only; mesh geometry comes from the mesh-source
/// collaborator at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub objects: Vec<ObjectConfig>,
    /// Initial deformation radius in rings
    pub ring_count: usize,
    /// Spring constant for anchored force rendering
    pub spring_stiffness: f32,
}

/// Placement and material of one haptic object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub material: MaterialProperties,
}

impl ObjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            material: MaterialProperties::default(),
        }
    }

    /// Compose the object's initial rigid transform
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mut plate = ObjectConfig::new("plate");
        plate.scale = 1.3;
        let mut bowl = ObjectConfig::new("bowl");
        bowl.translation = Vec3::new(0.0, 0.5, 0.0);
        Self {
            name: "tangible scene".into(),
            objects: vec![plate, bowl],
            ring_count: DEFAULT_RING_COUNT,
            spring_stiffness: DEFAULT_SPRING_STIFFNESS,
        }
    }
}

impl SceneConfig {
    /// Save the scene config to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load a scene config from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

/// Configuration-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_layout() {
        let config = SceneConfig::default();
        assert_eq!(config.objects.len(), 2);
        assert_eq!(config.ring_count, DEFAULT_RING_COUNT);
        let bowl = &config.objects[1];
        assert_eq!(bowl.translation, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_object_transform_composition() {
        let mut config = ObjectConfig::new("plate");
        config.scale = 2.0;
        config.translation = Vec3::X;
        let transform = config.transform();
        let p = transform.transform_point3(Vec3::Y);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");

        let config = SceneConfig::default();
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();

        assert_eq!(loaded.name, config.name);
        assert_eq!(loaded.objects.len(), config.objects.len());
        assert_eq!(loaded.spring_stiffness, config.spring_stiffness);
        assert_eq!(loaded.objects[0].scale, 1.3);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = SceneConfig::load("/nonexistent/scene.ron");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
