//! Mouse look: integrates pointer deltas into camera pitch/yaw.
//!
//! Conventions (degrees):
//! - yaw 0 faces world -Z, positive yaw turns right (clockwise seen from above)
//! - positive pitch looks down
//!
//! In Bevy: +X is right, +Y is up, -Z is forward. Bevy rotations are
//! counter-clockwise, so both angles are negated when building a `Quat`.

use bevy::prelude::*;

use crate::angles::wrap_degrees;
use crate::player::PITCH_LIMIT;

/// Camera orientation owned by the look controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraOrientation {
    /// Vertical tilt in degrees, always within `[-PITCH_LIMIT, PITCH_LIMIT]`.
    pitch: f32,
    /// Heading in degrees, always within `[0, 360)`.
    yaw: f32,
}

impl CameraOrientation {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self {
            pitch: clamp_pitch(pitch),
            yaw: wrap_degrees(yaw),
        }
    }

    /// Recover pitch/yaw from an existing camera rotation (roll is dropped).
    pub fn from_rotation(rotation: Quat) -> Self {
        // YXZ keeps the X angle within [-90, 90], so no pitch fold is needed
        let (y, x, _) = rotation.to_euler(EulerRot::YXZ);
        Self::new(-x.to_degrees(), -y.to_degrees())
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Integrate one tick of pointer motion.
    ///
    /// `look_y` is positive when the pointer moves up, which tilts the camera up.
    /// A step that overflows to a non-finite value is dropped for that axis.
    pub fn apply_pointer_delta(&mut self, look_x: f32, look_y: f32, sensitivity: f32, dt: f32) {
        let scale = sensitivity * dt;
        let pitch_step = finite_or_zero(look_y * scale);
        let yaw_step = finite_or_zero(look_x * scale);
        self.pitch = clamp_pitch(self.pitch - pitch_step);
        self.yaw = wrap_degrees(self.yaw + yaw_step);
    }

    /// Absolute camera rotation for (pitch, yaw, 0).
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            0.0,
        )
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

/// Yaw-only rotation facing `yaw` degrees.
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(-yaw.to_radians())
}

/// Heading of a rotation in degrees, wrapped to `[0, 360)`.
pub fn yaw_of(rotation: Quat) -> f32 {
    let (y, _, _) = rotation.to_euler(EulerRot::YXZ);
    wrap_degrees(-y.to_degrees())
}

fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

fn finite_or_zero(step: f32) -> f32 {
    if step.is_finite() {
        step
    } else {
        0.0
    }
}
