//! Force/Position Bridge
//!
//! Connects a haptic device (a black-box force/position I/O service) to the
//! interaction core:
//! - HapticDevice: the device seam, with recoverable/fatal error taxonomy
//! - SharedScene: mutex-guarded state crossing the force and graphics loops
//! - ServoLoop: the high-rate tick computing spring force and deformation
//! - InputEvent / ControlAction: discrete events from the input collaborator
//! - SimulatedDevice: scripted device for tests and headless demos

pub mod device;
pub mod event;
pub mod servo;
pub mod shared;
pub mod sim;

pub use device::*;
pub use event::*;
pub use servo::*;
pub use shared::*;
pub use sim::*;
