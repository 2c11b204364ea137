//! State shared between the force and graphics loops

use std::sync::Arc;

use glam::{Mat4, Vec3};
use parking_lot::Mutex;

use tangible_core::{InteractionSession, ObjectRegistry};

/// Registry plus session, guarded as one unit
///
/// The force loop writes mesh vertex positions during deformation ticks; the
/// graphics loop writes object transforms during drags and reads everything
/// for rendering. Explicit locking replaces any reliance on device-SDK
/// snapshotting; critical sections are kept to a single tick or frame update.
#[derive(Debug)]
pub struct SceneState {
    pub registry: ObjectRegistry,
    pub session: InteractionSession,
}

impl SceneState {
    pub fn new(registry: ObjectRegistry, session: InteractionSession) -> Self {
        Self { registry, session }
    }

    /// Copy out everything the rendering collaborator needs for one frame
    ///
    /// Recomputes vertex normals from the current (possibly deformed)
    /// positions, then snapshots under the same lock so the frame is
    /// consistent.
    pub fn render_snapshot(&mut self, raw_proxy_transform: Mat4) -> RenderSnapshot {
        let objects = self
            .registry
            .iter_mut()
            .map(|object| {
                object.mesh.recompute_normals();
                ObjectSnapshot {
                    name: object.name.clone(),
                    transform: object.transform,
                    positions: object.mesh.positions().to_vec(),
                    normals: object.mesh.normals().to_vec(),
                    colors: object.mesh.colors().to_vec(),
                    touched: object.touched,
                }
            })
            .collect();
        RenderSnapshot {
            objects,
            proxy_transform: self.session.display_proxy_transform(raw_proxy_transform),
        }
    }
}

/// Handle to the scene shared across threads
pub type SharedScene = Arc<Mutex<SceneState>>;

/// Create a shared scene handle
pub fn shared_scene(registry: ObjectRegistry, session: InteractionSession) -> SharedScene {
    Arc::new(Mutex::new(SceneState::new(registry, session)))
}

/// Per-frame drawing data extracted under one lock
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub objects: Vec<ObjectSnapshot>,
    /// Proxy transform with the anchored-position override applied
    pub proxy_transform: Mat4,
}

/// One object's drawing data
#[derive(Debug, Clone)]
pub struct ObjectSnapshot {
    pub name: String,
    pub transform: Mat4,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub touched: bool,
}
