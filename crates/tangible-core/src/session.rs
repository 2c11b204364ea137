//! Gesture state machine for proxy/object interaction

use glam::{Mat4, Vec3};
use uuid::Uuid;

use crate::deform::{DEFAULT_RING_COUNT, MAX_RING_COUNT, RingPartition};
use crate::mesh::nearest_vertex;
use crate::registry::ObjectRegistry;
use crate::transform::{
    SingularTransform, checked_inverse, translation_of, with_translation, without_translation,
};

/// Default spring stiffness for anchored force rendering
pub const DEFAULT_SPRING_STIFFNESS: f32 = 0.1;
/// Half extent of the proxy-workspace constraint box
pub const WORKSPACE_HALF_EXTENT: f32 = 0.25;

/// Observable gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No object grabbed
    Idle,
    /// Button held on a touched object, whole-body drag
    Dragging,
    /// Anchor-edit sub-mode of Dragging: contact drags local geometry
    AnchorEditing,
}

/// Visual style of the proxy cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Pencil,
    Cone,
}

/// Axis-aligned box constraining the proxy workspace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl ConstraintBox {
    pub fn around(center: Vec3, half_extent: f32) -> Self {
        Self {
            min: center - Vec3::splat(half_extent),
            max: center + Vec3::splat(half_extent),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn clamp(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone)]
struct DragState {
    object: Uuid,
    start_proxy_transform: Mat4,
    start_object_transform: Mat4,
}

/// Everything captured when anchor-edit mode is entered
#[derive(Debug, Clone)]
pub struct AnchorEdit {
    /// Proxy position at entry
    pub initial_proxy_position: Vec3,
    /// Raw device position at entry
    pub initial_device_position: Vec3,
    /// Fixed point the restoring spring force pulls toward
    pub anchor: Vec3,
    /// Deformation root vertex in the dragged object's mesh
    pub root: usize,
    /// Ring partition rebuilt at entry, stale after exit until re-entry
    pub rings: RingPartition,
    /// Latest candidate proxy position published by the force loop
    pub anchored_proxy_position: Vec3,
}

/// Interaction session state shared by the graphics and force loops
///
/// Holds the dragged-object reference, drag-start transforms, the touched
/// vertex, anchor-edit state and the user-adjustable knobs. Components refer
/// to registry objects by id; the registry stays the single owner.
#[derive(Debug, Clone)]
pub struct InteractionSession {
    drag: Option<DragState>,
    touched_vertex: Option<usize>,
    anchor_edit: Option<AnchorEdit>,
    force_rendering: bool,
    ring_count: usize,
    spring_stiffness: f32,
    cursor_style: CursorStyle,
    workspace_constraint: Option<ConstraintBox>,
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionSession {
    pub fn new() -> Self {
        Self {
            drag: None,
            touched_vertex: None,
            anchor_edit: None,
            force_rendering: false,
            ring_count: DEFAULT_RING_COUNT,
            spring_stiffness: DEFAULT_SPRING_STIFFNESS,
            cursor_style: CursorStyle::default(),
            workspace_constraint: None,
        }
    }

    /// Current gesture state
    ///
    /// After a recoverable force error the session reports `Dragging`: the
    /// drag survives in a degraded, non-deforming mode.
    pub fn state(&self) -> GestureState {
        match (&self.drag, self.force_rendering) {
            (None, _) => GestureState::Idle,
            (Some(_), false) => GestureState::Dragging,
            (Some(_), true) => GestureState::AnchorEditing,
        }
    }

    pub fn dragged_object(&self) -> Option<Uuid> {
        self.drag.as_ref().map(|drag| drag.object)
    }

    pub fn touched_vertex(&self) -> Option<usize> {
        self.touched_vertex
    }

    pub fn anchor_edit(&self) -> Option<&AnchorEdit> {
        self.anchor_edit.as_ref()
    }

    pub fn force_rendering(&self) -> bool {
        self.force_rendering
    }

    /// Drop out of force rendering, e.g. after a recoverable device error
    pub fn disable_force_rendering(&mut self) {
        self.force_rendering = false;
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn spring_stiffness(&self) -> f32 {
        self.spring_stiffness
    }

    pub fn set_spring_stiffness(&mut self, stiffness: f32) {
        self.spring_stiffness = stiffness;
    }

    pub fn set_ring_count(&mut self, ring_count: usize) {
        self.ring_count = ring_count.clamp(1, MAX_RING_COUNT);
    }

    pub fn increase_ring_count(&mut self) {
        self.set_ring_count(self.ring_count + 1);
    }

    pub fn decrease_ring_count(&mut self) {
        self.set_ring_count(self.ring_count.saturating_sub(1));
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor_style
    }

    pub fn toggle_cursor_style(&mut self) {
        self.cursor_style = match self.cursor_style {
            CursorStyle::Pencil => CursorStyle::Cone,
            CursorStyle::Cone => CursorStyle::Pencil,
        };
    }

    pub fn workspace_constraint(&self) -> Option<&ConstraintBox> {
        self.workspace_constraint.as_ref()
    }

    /// Toggle the proxy-workspace constraint; entering captures a box around
    /// the current proxy position
    pub fn toggle_workspace_constraint(&mut self, proxy_position: Vec3) {
        self.workspace_constraint = match self.workspace_constraint {
            Some(_) => None,
            None => Some(ConstraintBox::around(proxy_position, WORKSPACE_HALF_EXTENT)),
        };
    }

    // ============== Event Transitions ==============

    /// Button pressed while the proxy touches `object_id`
    ///
    /// Records the drag-start proxy and object transforms and makes the
    /// target the only touched object. Unknown ids leave the session idle.
    pub fn button_down(
        &mut self,
        object_id: Uuid,
        proxy_transform: Mat4,
        registry: &mut ObjectRegistry,
    ) {
        let Some(index) = registry.index_of(object_id) else {
            return;
        };
        let start_object_transform = registry.object(index).transform;
        for (i, object) in registry.iter_mut().enumerate() {
            object.touched = i == index;
        }
        self.drag = Some(DragState {
            object: object_id,
            start_proxy_transform: proxy_transform,
            start_object_transform,
        });
        tracing::debug!("drag started on object {object_id}");
    }

    /// Button released: back to Idle from any state
    pub fn button_up(&mut self) {
        self.drag = None;
        self.anchor_edit = None;
        self.force_rendering = false;
    }

    /// Proxy came to rest on an object
    pub fn touch(&mut self, object_id: Uuid, registry: &mut ObjectRegistry) {
        if let Some(object) = registry.get_mut(object_id) {
            object.touched = true;
        }
    }

    /// Proxy left an object's surface
    pub fn untouch(&mut self, object_id: Uuid, registry: &mut ObjectRegistry) {
        if let Some(object) = registry.get_mut(object_id) {
            object.touched = false;
        }
    }

    /// Continuous proxy motion while dragging
    ///
    /// Tracks the mesh vertex nearest to the proxy in the dragged object's
    /// local space and copies that vertex's friction coefficient into the
    /// object's static-friction slot.
    pub fn motion(
        &mut self,
        proxy_position: Vec3,
        registry: &mut ObjectRegistry,
    ) -> Result<(), SingularTransform> {
        let Some(drag) = &self.drag else {
            return Ok(());
        };
        let Some(index) = registry.index_of(drag.object) else {
            return Ok(());
        };
        let object = registry.object_mut(index);
        let local = checked_inverse(object.transform)?.transform_point3(proxy_position);
        if let Some(nearest) = nearest_vertex(local, object.mesh.positions()) {
            self.touched_vertex = Some(nearest);
            object.material.static_friction = object.mesh.friction()[nearest];
        }
        Ok(())
    }

    /// Toggle anchor-edit mode
    ///
    /// No-op while Idle. While Dragging, captures the reference positions,
    /// locates the deformation root under the proxy, rebuilds the ring
    /// partition and enables force rendering. While AnchorEditing, disables
    /// force rendering; the ring data is left stale until the next entry.
    pub fn toggle_anchor_edit(
        &mut self,
        proxy_position: Vec3,
        device_position: Vec3,
        anchor_position: Vec3,
        registry: &ObjectRegistry,
    ) -> Result<(), SingularTransform> {
        if self.force_rendering {
            self.force_rendering = false;
            tracing::debug!("anchor edit off");
            return Ok(());
        }
        let Some(drag) = &self.drag else {
            return Ok(());
        };
        let Some(index) = registry.index_of(drag.object) else {
            return Ok(());
        };
        let object = registry.object(index);

        let local = checked_inverse(object.transform)?.transform_point3(proxy_position);
        let Some(root) = nearest_vertex(local, object.mesh.positions()) else {
            return Ok(());
        };
        let rings = RingPartition::expand(object.mesh.adjacency(), root as u32, MAX_RING_COUNT);

        self.anchor_edit = Some(AnchorEdit {
            initial_proxy_position: proxy_position,
            initial_device_position: device_position,
            anchor: anchor_position,
            root,
            rings,
            anchored_proxy_position: proxy_position,
        });
        self.force_rendering = true;
        tracing::debug!(root, "anchor edit on");
        Ok(())
    }

    /// Publish the force loop's latest candidate proxy position
    pub fn set_anchored_proxy_position(&mut self, position: Vec3) {
        if let Some(anchor) = &mut self.anchor_edit {
            anchor.anchored_proxy_position = position;
        }
    }

    // ============== Frame Updates ==============

    /// Ordinary drag-transform update, once per displayed frame
    ///
    /// Skipped while force rendering (anchor-edit moves vertices instead of
    /// the whole body). The translation delta is applied directly; the
    /// rotation delta is applied about the current proxy position so rotation
    /// stays visually centered on the grip point.
    pub fn update_drag_transform(
        &self,
        proxy_transform: Mat4,
        registry: &mut ObjectRegistry,
    ) -> Result<(), SingularTransform> {
        let Some(drag) = &self.drag else {
            return Ok(());
        };
        if self.force_rendering {
            return Ok(());
        }
        let Some(index) = registry.index_of(drag.object) else {
            return Ok(());
        };

        let proxy_position = translation_of(proxy_transform);
        let start_position = translation_of(drag.start_proxy_transform);
        let delta_translation = proxy_position - start_position;

        let start_rotation = without_translation(drag.start_proxy_transform);
        let current_rotation = without_translation(proxy_transform);
        let delta_rotation = current_rotation * checked_inverse(start_rotation)?;

        let about_grip = Mat4::from_translation(proxy_position)
            * delta_rotation
            * Mat4::from_translation(-proxy_position);

        registry.object_mut(index).transform = about_grip
            * Mat4::from_translation(delta_translation)
            * drag.start_object_transform;
        Ok(())
    }

    /// Proxy transform to draw
    ///
    /// While force rendering, the cursor sticks to the anchored candidate
    /// position rather than the raw proxy.
    pub fn display_proxy_transform(&self, raw: Mat4) -> Mat4 {
        match (&self.anchor_edit, self.force_rendering) {
            (Some(anchor), true) => with_translation(raw, anchor.anchored_proxy_position),
            _ => raw,
        }
    }
}
