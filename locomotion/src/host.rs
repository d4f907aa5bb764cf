//! Seam between the locomotion logic and whatever owns the character's transforms.

use bevy::prelude::*;

/// Transform and collision access the controller needs from its host.
///
/// The camera and body rotations are absolute. `move_character` is a
/// collision-aware sweep: the host resolves collisions for each call on its
/// own and updates the grounded state it reports.
pub trait CharacterHost {
    fn camera_rotation(&self) -> Quat;
    fn set_camera_rotation(&mut self, rotation: Quat);

    fn body_rotation(&self) -> Quat;
    fn set_body_rotation(&mut self, rotation: Quat);

    /// Sweep the character by `displacement`, stopping or sliding on contact.
    fn move_character(&mut self, displacement: Vec3);

    /// Whether the character touched walkable ground during the last move.
    fn is_grounded(&self) -> bool;
}

/// One tick of sampled input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocomotionInput {
    /// Strafe intent, right positive, in `[-1, 1]`.
    pub horizontal: f32,
    /// Forward intent, forward positive, in `[-1, 1]`.
    pub vertical: f32,
    /// Pointer delta, right positive.
    pub look_x: f32,
    /// Pointer delta, up positive.
    pub look_y: f32,
}

impl LocomotionInput {
    pub fn new(horizontal: f32, vertical: f32, look_x: f32, look_y: f32) -> Self {
        Self {
            horizontal,
            vertical,
            look_x,
            look_y,
        }
    }

    /// Movement-only input.
    pub fn movement(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, 0.0, 0.0)
    }

    /// Clamp intent axes to `[-1, 1]` and zero out non-finite values.
    pub fn sanitized(self) -> Self {
        fn axis(v: f32) -> f32 {
            if v.is_finite() {
                v.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
        fn delta(v: f32) -> f32 {
            if v.is_finite() {
                v
            } else {
                0.0
            }
        }
        Self {
            horizontal: axis(self.horizontal),
            vertical: axis(self.vertical),
            look_x: delta(self.look_x),
            look_y: delta(self.look_y),
        }
    }
}
