//! Cursor capture
//!
//! The cursor is locked and hidden while playing so raw mouse motion drives
//! the camera. Escape releases it (pausing) and resumes again.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::states::GameState;

fn set_cursor_grab(
    windows: &Query<Entity, With<PrimaryWindow>>,
    cursor_opts: &mut Query<&mut CursorOptions>,
    grab: bool,
) {
    let Ok(window_entity) = windows.single() else {
        return;
    };
    if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
        cursor.grab_mode = if grab {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        cursor.visible = !grab;
    }
}

/// Lock the cursor (on entering `Playing`)
pub fn grab_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
) {
    set_cursor_grab(&windows, &mut cursor_opts, true);
    info!("Cursor captured");
}

/// Release the cursor (on entering `Paused`)
pub fn release_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
) {
    set_cursor_grab(&windows, &mut cursor_opts, false);
    info!("Cursor released");
}

/// Escape pauses
pub fn handle_escape_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Paused);
    }
}

/// Escape resumes
pub fn handle_resume_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Playing);
    }
}

/// Re-lock on click while playing (the OS may drop the grab on focus loss)
pub fn regrab_on_click(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mouse_button: Res<ButtonInput<MouseButton>>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        set_cursor_grab(&windows, &mut cursor_opts, true);
    }
}
