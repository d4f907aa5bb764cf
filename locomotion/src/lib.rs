//! First-person locomotion shared by the game client and its tests.
//!
//! Per tick, in order:
//! 1. mouse look updates camera pitch/yaw (`look`)
//! 2. camera-relative horizontal movement plus gravity, each swept through the host (`movement`)
//! 3. the body turns toward the camera when the head-turn rule says so (`body`)
//!
//! The host owns transforms and collision; see [`CharacterHost`].

pub mod angles;
pub mod body;
pub mod config;
pub mod controller;
pub mod host;
pub mod look;
pub mod movement;
pub mod player;

pub use body::{BodyTurn, is_forward_only, reconcile_body_yaw};
pub use config::LocomotionConfig;
pub use controller::{FirstPersonController, TickReport};
pub use host::{CharacterHost, LocomotionInput};
pub use look::{CameraOrientation, yaw_of, yaw_rotation};
pub use movement::{MovementResolver, PlanarBasis};
pub use player::*;
