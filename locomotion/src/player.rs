//! Player-related constants

/// Camera pitch limit in degrees (applies symmetrically up and down)
pub const PITCH_LIMIT: f32 = 80.0;

/// Strafe input below this magnitude still counts as "straight ahead"
pub const FORWARD_ONLY_DEADZONE: f32 = 0.01;

/// Walking speed (units per second)
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;

/// Vertical acceleration (negative pulls down)
pub const DEFAULT_GRAVITY: f32 = -9.81;

/// Pointer look sensitivity (degrees per pointer unit per second)
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 200.0;

/// How far the camera may look away from the body before the body follows (degrees)
pub const DEFAULT_MAX_HEAD_TURN: f32 = 90.0;

/// Body turn rate (degrees per second)
pub const DEFAULT_BODY_TURN_SPEED: f32 = 360.0;

/// Vertical velocity held while grounded, so the next ground check still hits
pub const DEFAULT_GROUNDED_VERTICAL_VELOCITY: f32 = -2.0;
