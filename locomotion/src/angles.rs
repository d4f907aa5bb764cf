//! Degree-based angle helpers.
//!
//! All orientation state in this crate is kept in degrees, with yaw wrapped to
//! `[0, 360)`. These helpers keep that invariant intact under float rounding.

/// Full turn in degrees.
pub const FULL_TURN: f32 = 360.0;

/// Wrap an angle into `[0, 360)`.
///
/// `rem_euclid` can round tiny negative inputs up to exactly `360.0`, so that
/// case folds back to zero. Non-finite input also maps to zero.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    if !wrapped.is_finite() || wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest difference from `current` to `target`, in `(-180, 180]`.
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let diff = wrap_degrees(target - current);
    if diff > 180.0 {
        diff - FULL_TURN
    } else {
        diff
    }
}

/// Step `current` toward `target` along the shortest arc by at most `max_delta`.
///
/// Lands exactly on `target` when it is within reach. The result is wrapped.
pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let max_delta = max_delta.max(0.0);
    let diff = delta_angle(current, target);
    if diff.abs() <= max_delta {
        return wrap_degrees(target);
    }
    wrap_degrees(current + diff.signum() * max_delta)
}
