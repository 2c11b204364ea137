//! Rigid transform helpers

use glam::{Mat4, Vec3, Vec4};

/// A transform whose inverse was requested but does not exist
///
/// Surfaced before any inverse is used so that downstream math never sees
/// NaN components.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("transform is not invertible (determinant {determinant})")]
pub struct SingularTransform {
    pub determinant: f32,
}

/// Invert a transform, rejecting singular or non-finite matrices
pub fn checked_inverse(transform: Mat4) -> Result<Mat4, SingularTransform> {
    let determinant = transform.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return Err(SingularTransform { determinant });
    }
    Ok(transform.inverse())
}

/// Extract the translation column of a transform
pub fn translation_of(transform: Mat4) -> Vec3 {
    transform.w_axis.truncate()
}

/// The same transform with its translation zeroed (rotation/scale part only)
pub fn without_translation(transform: Mat4) -> Mat4 {
    let mut m = transform;
    m.w_axis = Vec4::W;
    m
}

/// The same transform with its translation replaced
pub fn with_translation(transform: Mat4, translation: Vec3) -> Mat4 {
    let mut m = transform;
    m.w_axis = translation.extend(1.0);
    m
}
