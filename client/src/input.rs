//! Player input handling
//!
//! Keyboard keys drive two smoothed movement axes; mouse motion is summed per
//! frame into a look delta. `InputState::sample` turns both into the
//! `LocomotionInput` the controller consumes.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use locomotion::LocomotionInput;

use crate::settings::{ClientSettings, InputTuning};

/// Client-side input state
#[derive(Resource, Default, Debug)]
pub struct InputState {
    /// Smoothed strafe axis (right positive)
    pub horizontal: f32,
    /// Smoothed forward axis (forward positive)
    pub vertical: f32,
    /// Mouse delta for this frame, in look units (up positive)
    pub look: Vec2,
}

impl InputState {
    pub fn sample(&self) -> LocomotionInput {
        LocomotionInput::new(self.horizontal, self.vertical, self.look.x, self.look.y)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Raw key state for one axis: -1, 0 or 1.
fn key_axis(keyboard: &ButtonInput<KeyCode>, negative: &[KeyCode], positive: &[KeyCode]) -> f32 {
    let mut axis = 0.0;
    if positive.iter().any(|k| keyboard.pressed(*k)) {
        axis += 1.0;
    }
    if negative.iter().any(|k| keyboard.pressed(*k)) {
        axis -= 1.0;
    }
    axis
}

/// Move `current` toward the raw key `target` like a keyboard virtual axis.
///
/// Held keys ramp at `axis_sensitivity`, released keys fall back at
/// `axis_gravity`, and reversing direction restarts from zero when `axis_snap`
/// is set.
pub fn smooth_axis(current: f32, target: f32, tuning: &InputTuning, dt: f32) -> f32 {
    if target == 0.0 {
        let step = tuning.axis_gravity * dt;
        return if current.abs() <= step {
            0.0
        } else {
            current - current.signum() * step
        };
    }

    let start = if tuning.axis_snap && current != 0.0 && current.signum() != target.signum() {
        0.0
    } else {
        current
    };
    let step = tuning.axis_sensitivity * dt;
    let diff = target - start;
    if diff.abs() <= step {
        target
    } else {
        start + diff.signum() * step
    }
}

/// Handle keyboard input for movement
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<ClientSettings>,
    time: Res<Time>,
    mut input_state: ResMut<InputState>,
) {
    let dt = time.delta_secs();
    let horizontal = key_axis(
        &keyboard,
        &[KeyCode::KeyA, KeyCode::ArrowLeft],
        &[KeyCode::KeyD, KeyCode::ArrowRight],
    );
    let vertical = key_axis(
        &keyboard,
        &[KeyCode::KeyS, KeyCode::ArrowDown],
        &[KeyCode::KeyW, KeyCode::ArrowUp],
    );

    input_state.horizontal = smooth_axis(input_state.horizontal, horizontal, &settings.input, dt);
    input_state.vertical = smooth_axis(input_state.vertical, vertical, &settings.input, dt);
}

/// Handle mouse input for looking around
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    settings: Res<ClientSettings>,
    mut input_state: ResMut<InputState>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    // Screen Y grows downward; look_y is positive when moving the mouse up
    input_state.look = Vec2::new(delta.x, -delta.y) * settings.input.pointer_scale;
}

/// Drop held axes and pending look when gameplay stops
pub fn clear_input(mut input_state: ResMut<InputState>) {
    input_state.clear();
}
