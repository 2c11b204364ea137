//! Simulated haptic device for tests and headless demos

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use crate::device::{DeviceError, HapticDevice};

/// Scriptable stand-in for a real haptic device
///
/// Clones share the same underlying state, so a handle kept outside the
/// servo loop can move the stylus and inspect output forces while the loop
/// owns its copy.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDevice {
    inner: Arc<Mutex<SimInner>>,
}

#[derive(Debug, Default)]
struct SimInner {
    position: Vec3,
    forces: Vec<Vec3>,
    pending_error: Option<DeviceError>,
    in_frame: bool,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the simulated stylus
    pub fn set_position(&self, position: Vec3) {
        self.inner.lock().position = position;
    }

    /// Most recent force output, if any was sent
    pub fn last_force(&self) -> Option<Vec3> {
        self.inner.lock().forces.last().copied()
    }

    /// Total number of force outputs so far
    pub fn force_count(&self) -> usize {
        self.inner.lock().forces.len()
    }

    /// Fail the next `end_frame` with the given error
    pub fn inject_error(&self, error: DeviceError) {
        self.inner.lock().pending_error = Some(error);
    }
}

impl HapticDevice for SimulatedDevice {
    fn begin_frame(&mut self) -> Result<(), DeviceError> {
        self.inner.lock().in_frame = true;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock();
        inner.in_frame = false;
        match inner.pending_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn position(&self) -> Vec3 {
        self.inner.lock().position
    }

    fn set_force(&mut self, force: Vec3) -> Result<(), DeviceError> {
        self.inner.lock().forces.push(force);
        Ok(())
    }
}
