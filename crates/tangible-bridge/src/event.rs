//! Discrete input events and user controls

use glam::{Mat4, Vec3};
use uuid::Uuid;

use tangible_core::SingularTransform;

use crate::shared::SceneState;

/// Discrete events delivered by the input collaborator
///
/// Objects are identified by their external shape identity; events for
/// unknown objects are normal absence and no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Button pressed while the proxy touches an object
    ButtonDown(Uuid),
    ButtonUp,
    Touch(Uuid),
    Untouch(Uuid),
    /// Continuous motion while in contact with an object
    Motion(Uuid),
}

/// User controls (keyboard, abstracted)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ToggleAnchorEdit,
    IncreaseRingCount,
    DecreaseRingCount,
    ToggleCursorStyle,
    ToggleWorkspaceConstraint,
}

/// Continuous position/orientation sample accompanying events and frames
#[derive(Debug, Clone, Copy)]
pub struct ProxySample {
    /// Raw device position
    pub device_position: Vec3,
    /// Proxy (stylus tip) position in world space
    pub proxy_position: Vec3,
    /// Full proxy transform in world space
    pub proxy_transform: Mat4,
}

impl ProxySample {
    /// Sample with the device and proxy co-located at `position`, unrotated
    pub fn at(position: Vec3) -> Self {
        Self {
            device_position: position,
            proxy_position: position,
            proxy_transform: Mat4::from_translation(position),
        }
    }
}

impl SceneState {
    /// Apply one discrete input event
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        sample: &ProxySample,
    ) -> Result<(), SingularTransform> {
        match event {
            InputEvent::ButtonDown(id) => {
                self.session
                    .button_down(id, sample.proxy_transform, &mut self.registry);
                Ok(())
            }
            InputEvent::ButtonUp => {
                self.session.button_up();
                Ok(())
            }
            InputEvent::Touch(id) => {
                self.session.touch(id, &mut self.registry);
                Ok(())
            }
            InputEvent::Untouch(id) => {
                self.session.untouch(id, &mut self.registry);
                Ok(())
            }
            InputEvent::Motion(_) => self
                .session
                .motion(sample.proxy_position, &mut self.registry),
        }
    }

    /// Apply one user control action
    pub fn handle_control(
        &mut self,
        action: ControlAction,
        sample: &ProxySample,
    ) -> Result<(), SingularTransform> {
        match action {
            ControlAction::ToggleAnchorEdit => self.session.toggle_anchor_edit(
                sample.proxy_position,
                sample.device_position,
                sample.device_position,
                &self.registry,
            ),
            ControlAction::IncreaseRingCount => {
                self.session.increase_ring_count();
                Ok(())
            }
            ControlAction::DecreaseRingCount => {
                self.session.decrease_ring_count();
                Ok(())
            }
            ControlAction::ToggleCursorStyle => {
                self.session.toggle_cursor_style();
                Ok(())
            }
            ControlAction::ToggleWorkspaceConstraint => {
                self.session.toggle_workspace_constraint(sample.proxy_position);
                Ok(())
            }
        }
    }

    /// Per-displayed-frame update (ordinary drag-transform tracking)
    pub fn frame_update(&mut self, sample: &ProxySample) -> Result<(), SingularTransform> {
        self.session
            .update_drag_transform(sample.proxy_transform, &mut self.registry)
    }
}
