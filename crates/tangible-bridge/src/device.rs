//! Haptic device abstraction

use glam::Vec3;

/// The black-box force/position I/O service
///
/// Each servo tick is bracketed by `begin_frame` / `end_frame`. Position is
/// the raw device position, distinct from the proxy the graphics loop sees.
pub trait HapticDevice: Send {
    fn begin_frame(&mut self) -> Result<(), DeviceError>;
    fn end_frame(&mut self) -> Result<(), DeviceError>;
    /// Current raw device position
    fn position(&self) -> Vec3;
    /// Output a force to the device for this frame
    fn set_force(&mut self, force: Vec3) -> Result<(), DeviceError>;
}

/// Device-side errors, split by recoverability
///
/// A force error degrades the session to non-deforming drag; a scheduler
/// error permanently stops haptic servicing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeviceError {
    #[error("force output error: {0}")]
    Force(String),
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

impl DeviceError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DeviceError::Scheduler(_))
    }
}
