//! Game state machine

use bevy::prelude::*;

/// Main game states
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Cursor captured, input drives the character
    #[default]
    Playing,
    /// Cursor released, character idles (gravity still applies)
    Paused,
}
