//! Haptic object definition

use glam::Mat4;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mesh::DeformableMesh;

/// A rigid body in the scene that can be felt, touched and dragged
///
/// Created at scene-init time; only the transform, material, touched flag
/// and mesh vertex positions change afterwards.
#[derive(Debug, Clone)]
pub struct HapticObject {
    /// External shape identity reported by the input collaborator
    pub id: Uuid,
    pub name: String,
    /// Rigid transform (position + orientation + scale)
    pub transform: Mat4,
    pub material: MaterialProperties,
    /// Whether the proxy currently rests on this object
    pub touched: bool,
    pub mesh: DeformableMesh,
}

impl HapticObject {
    /// Create an object at the identity transform with default material
    pub fn new(name: impl Into<String>, mesh: DeformableMesh) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transform: Mat4::IDENTITY,
            material: MaterialProperties::default(),
            touched: false,
            mesh,
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: MaterialProperties) -> Self {
        self.material = material;
        self
    }
}

/// Haptic surface coefficients fed to the force renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    pub stiffness: f32,
    pub damping: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            stiffness: 0.8,
            damping: 0.0,
            static_friction: 0.5,
            dynamic_friction: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_new_object_defaults() {
        let mesh = DeformableMesh::from_positions(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        )
        .unwrap();
        let object = HapticObject::new("plate", mesh);
        assert_eq!(object.transform, Mat4::IDENTITY);
        assert!(!object.touched);
        assert_eq!(object.material.stiffness, 0.8);
        assert_eq!(object.material.static_friction, 0.5);
    }
}
