//! Body/camera yaw reconciliation ("head twist").
//!
//! The camera looks around freely inside a cone of `max_head_turn` degrees
//! around the body's facing. Outside that cone, or while walking straight
//! ahead, the body turns toward the camera at a fixed rate.

use crate::angles::{delta_angle, move_towards_angle};
use crate::player::FORWARD_ONLY_DEADZONE;

/// What the body did this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyTurn {
    /// Body left alone; camera is inside the head-turn cone.
    #[default]
    Holding,
    /// Walking straight ahead, body turning to face the camera.
    Aligning,
    /// Camera outside the head-turn cone, body catching up.
    CatchingUp,
}

impl BodyTurn {
    pub fn is_turning(self) -> bool {
        !matches!(self, BodyTurn::Holding)
    }
}

/// True when input means "walk straight ahead" (forward with no strafe).
#[inline]
pub fn is_forward_only(horizontal: f32, vertical: f32) -> bool {
    vertical > 0.0 && horizontal.abs() < FORWARD_ONLY_DEADZONE
}

/// Decide whether the body turns this tick and return its new yaw.
///
/// The decision is re-evaluated every tick with no memory, so a catch-up stops
/// as soon as the difference falls back within `max_head_turn`.
pub fn reconcile_body_yaw(
    body_yaw: f32,
    camera_yaw: f32,
    horizontal: f32,
    vertical: f32,
    max_head_turn: f32,
    turn_speed: f32,
    dt: f32,
) -> (BodyTurn, f32) {
    let turn = if is_forward_only(horizontal, vertical) {
        BodyTurn::Aligning
    } else if delta_angle(body_yaw, camera_yaw).abs() > max_head_turn {
        BodyTurn::CatchingUp
    } else {
        BodyTurn::Holding
    };

    match turn {
        BodyTurn::Holding => (turn, body_yaw),
        _ => (turn, move_towards_angle(body_yaw, camera_yaw, turn_speed * dt)),
    }
}
