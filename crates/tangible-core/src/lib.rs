//! Haptic Interaction Core
//!
//! This crate contains the engine behind a force-feedback scene:
//! - DeformableMesh: triangle mesh with per-vertex attributes and adjacency
//! - ObjectRegistry: the rigid bodies that can be felt, grabbed and dragged
//! - InteractionSession: the gesture state machine (drag, rotate, anchor-edit)
//! - RingPartition / falloff: localized elastic deformation around a contact
//! - SceneConfig: serializable scene description

pub mod config;
pub mod deform;
pub mod mesh;
pub mod object;
pub mod primitive;
pub mod registry;
pub mod session;
pub mod transform;

pub use config::*;
pub use deform::*;
pub use mesh::*;
pub use object::*;
pub use primitive::*;
pub use registry::*;
pub use session::*;
pub use transform::*;
