//! High-rate force/deformation servo loop

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tangible_core::{SingularTransform, apply_tick, checked_inverse};

use crate::device::{DeviceError, HapticDevice};
use crate::shared::{SceneState, SharedScene};

/// What the host scheduler should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoDirective {
    /// Reschedule the callback
    Continue,
    /// Haptic servicing stopped; do not reschedule
    Stop,
}

/// Fatal precondition violations detected inside the servo loop
#[derive(Debug, thiserror::Error)]
pub enum ServoError {
    #[error(transparent)]
    SingularTransform(#[from] SingularTransform),
}

/// The per-device-tick force and deformation driver
///
/// Owns the device; shares the scene with the graphics/interaction loop.
pub struct ServoLoop<D: HapticDevice> {
    device: D,
    scene: SharedScene,
}

impl<D: HapticDevice> ServoLoop<D> {
    pub fn new(device: D, scene: SharedScene) -> Self {
        Self { device, scene }
    }

    /// Service one device tick
    ///
    /// While force rendering is enabled and an object is anchor-edited:
    /// reads the device position, sends the restoring spring force toward
    /// the anchor, and applies one deformation tick at the candidate proxy
    /// position transformed into the object's local space. The disable flag
    /// is observed here, at the top of the tick; a tick in flight always
    /// completes all its ring updates.
    pub fn tick(&mut self) -> Result<ServoDirective, ServoError> {
        if let Err(error) = self.device.begin_frame() {
            return Ok(self.recover(error));
        }
        let device_position = self.device.position();

        let mut force = None;
        {
            let mut scene = self.scene.lock();
            let SceneState { registry, session } = &mut *scene;
            let active = match (session.force_rendering(), session.dragged_object()) {
                (true, Some(object_id)) => {
                    let index = registry.index_of(object_id);
                    if index.is_none() {
                        // Stale session reference; skip the tick rather than guess
                        tracing::warn!("dragged object {object_id} not in registry");
                    }
                    index
                }
                _ => None,
            };
            if let Some(index) = active {
                if let Some(anchor) = session.anchor_edit() {
                    let candidate = anchor.initial_proxy_position
                        + (device_position - anchor.initial_device_position);
                    force = Some((anchor.anchor - device_position) * session.spring_stiffness());

                    let object = registry.object_mut(index);
                    let inverse = checked_inverse(object.transform)?;
                    let local_target = inverse.transform_point3(candidate);
                    apply_tick(
                        &mut object.mesh,
                        &anchor.rings,
                        local_target,
                        session.ring_count(),
                    );
                    session.set_anchored_proxy_position(candidate);
                }
            }
        }

        if let Some(force) = force {
            if let Err(error) = self.device.set_force(force) {
                return Ok(self.recover(error));
            }
        }
        if let Err(error) = self.device.end_frame() {
            return Ok(self.recover(error));
        }
        Ok(ServoDirective::Continue)
    }

    /// Run ticks at a fixed period until stopped
    pub fn run(mut self, period: Duration, shutdown: Arc<AtomicBool>) -> Result<(), ServoError> {
        while !shutdown.load(Ordering::Relaxed) {
            match self.tick() {
                Ok(ServoDirective::Continue) => std::thread::sleep(period),
                Ok(ServoDirective::Stop) => break,
                Err(error) => {
                    tracing::error!("haptic servicing stopped: {error}");
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    fn recover(&mut self, error: DeviceError) -> ServoDirective {
        match error {
            DeviceError::Force(reason) => {
                tracing::warn!("force error, disabling force rendering: {reason}");
                self.scene.lock().session.disable_force_rendering();
                ServoDirective::Continue
            }
            DeviceError::Scheduler(reason) => {
                tracing::error!("scheduler error, haptic servicing stopped: {reason}");
                ServoDirective::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::shared_scene;
    use crate::sim::SimulatedDevice;
    use glam::{Mat4, Vec3};
    use tangible_core::{
        GestureState, HapticObject, InteractionSession, ObjectRegistry, box_mesh,
    };

    fn anchored_scene() -> (SharedScene, SimulatedDevice, ServoLoop<SimulatedDevice>) {
        let mut registry = ObjectRegistry::new();
        registry.insert(HapticObject::new("plate", box_mesh([1.0; 3]).unwrap()));
        let id = registry.object(0).id;

        let mut session = InteractionSession::new();
        session.button_down(id, Mat4::IDENTITY, &mut registry);
        session
            .toggle_anchor_edit(
                Vec3::new(0.4, 0.4, 0.4),
                Vec3::ZERO,
                Vec3::ZERO,
                &registry,
            )
            .unwrap();

        let scene = shared_scene(registry, session);
        let device = SimulatedDevice::new();
        let servo = ServoLoop::new(device.clone(), scene.clone());
        (scene, device, servo)
    }

    #[test]
    fn test_spring_force_law() {
        let (_, device, mut servo) = anchored_scene();
        device.set_position(Vec3::new(0.1, 0.0, 0.0));
        assert_eq!(servo.tick().unwrap(), ServoDirective::Continue);
        // force = (anchor - device) * stiffness with anchor at the origin
        let force = device.last_force().unwrap();
        approx::assert_relative_eq!(force.x, -0.01, epsilon = 1e-6);
        approx::assert_relative_eq!(force.y, 0.0, epsilon = 1e-6);
        approx::assert_relative_eq!(force.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_deformation_accumulates_across_ticks() {
        let (scene, device, mut servo) = anchored_scene();
        device.set_position(Vec3::new(0.2, 0.0, 0.0));
        let root = scene.lock().session.anchor_edit().unwrap().root;

        servo.tick().unwrap();
        let after_one = {
            let scene = scene.lock();
            let mesh = &scene.registry.object(0).mesh;
            assert_eq!(mesh.position(root), Vec3::splat(0.5), "root pinned");
            mesh.position(0)
        };
        servo.tick().unwrap();
        let after_two = scene.lock().registry.object(0).mesh.position(0);
        assert!((after_two - after_one).length() > 0.0);
    }

    #[test]
    fn test_anchored_proxy_position_published() {
        let (scene, device, mut servo) = anchored_scene();
        device.set_position(Vec3::new(0.1, 0.0, 0.0));
        servo.tick().unwrap();
        let published = scene
            .lock()
            .session
            .anchor_edit()
            .unwrap()
            .anchored_proxy_position;
        // entry proxy (0.4, 0.4, 0.4) plus device delta (0.1, 0, 0)
        assert!((published - Vec3::new(0.5, 0.4, 0.4)).length() < 1e-6);
    }

    #[test]
    fn test_idle_tick_outputs_no_force() {
        let mut registry = ObjectRegistry::new();
        registry.insert(HapticObject::new("plate", box_mesh([1.0; 3]).unwrap()));
        let scene = shared_scene(registry, InteractionSession::new());
        let device = SimulatedDevice::new();
        let mut servo = ServoLoop::new(device.clone(), scene);
        assert_eq!(servo.tick().unwrap(), ServoDirective::Continue);
        assert_eq!(device.force_count(), 0);
    }

    #[test]
    fn test_force_error_degrades_to_non_deforming_drag() {
        let (scene, device, mut servo) = anchored_scene();
        device.inject_error(DeviceError::Force("amp fault".into()));
        assert_eq!(servo.tick().unwrap(), ServoDirective::Continue);

        let scene_guard = scene.lock();
        assert!(!scene_guard.session.force_rendering());
        // Drag survives in degraded mode
        assert_eq!(scene_guard.session.state(), GestureState::Dragging);
        drop(scene_guard);

        // Subsequent ticks are quiet
        let forces_before = device.force_count();
        servo.tick().unwrap();
        assert_eq!(device.force_count(), forces_before);
    }

    #[test]
    fn test_scheduler_error_stops_servicing() {
        let (_, device, mut servo) = anchored_scene();
        device.inject_error(DeviceError::Scheduler("host shutdown".into()));
        assert_eq!(servo.tick().unwrap(), ServoDirective::Stop);
    }

    #[test]
    fn test_singular_object_transform_is_fatal() {
        let (scene, _, mut servo) = anchored_scene();
        scene.lock().registry.object_mut(0).transform = Mat4::ZERO;
        assert!(servo.tick().is_err());
    }
}
