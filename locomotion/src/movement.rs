//! Camera-relative movement and vertical gravity integration.
//!
//! Movement is always horizontal: the camera's forward/right axes are
//! flattened onto the XZ plane so pitch never changes walking speed.
//! Vertical motion is integrated separately and handed to the host as its own
//! displacement.

use bevy::prelude::*;

use crate::look::yaw_rotation;

/// Horizontal movement basis with a fallback for degenerate camera axes.
#[derive(Clone, Copy, Debug)]
pub struct PlanarBasis {
    pub forward: Vec3,
    pub right: Vec3,
    degenerate: bool,
}

impl PlanarBasis {
    /// Basis for a camera facing `yaw` degrees with no pitch.
    pub fn from_yaw(yaw: f32) -> Self {
        let rotation = yaw_rotation(yaw);
        Self {
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
            degenerate: false,
        }
    }

    /// Flatten camera axes onto the horizontal plane.
    ///
    /// An axis with no horizontal component (camera looking straight up or
    /// down) keeps the last valid flattened axis instead of becoming NaN.
    pub fn update(&mut self, camera_forward: Vec3, camera_right: Vec3) {
        let forward = flatten(camera_forward);
        let right = flatten(camera_right);

        let degenerate = forward.is_none() || right.is_none();
        if degenerate && !self.degenerate {
            warn!("Camera axis has no horizontal component; reusing last movement basis");
        }
        self.degenerate = degenerate;

        if let Some(forward) = forward {
            self.forward = forward;
        }
        if let Some(right) = right {
            self.right = right;
        }
    }
}

#[inline]
fn flatten(axis: Vec3) -> Option<Vec3> {
    Vec3::new(axis.x, 0.0, axis.z).try_normalize()
}

/// Combine intent axes into a movement direction, capped at unit length.
///
/// Capping keeps diagonal input from moving faster than a single axis.
pub fn compose_move_dir(forward: Vec3, right: Vec3, horizontal: f32, vertical: f32) -> Vec3 {
    let move_dir = forward * vertical + right * horizontal;
    if move_dir.length_squared() > 1.0 {
        move_dir.normalize()
    } else {
        move_dir
    }
}

/// Persistent movement state between ticks.
#[derive(Clone, Copy, Debug)]
pub struct MovementResolver {
    basis: PlanarBasis,
    vertical_velocity: f32,
}

impl MovementResolver {
    pub fn new(initial_yaw: f32) -> Self {
        Self {
            basis: PlanarBasis::from_yaw(initial_yaw),
            vertical_velocity: 0.0,
        }
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn basis(&self) -> &PlanarBasis {
        &self.basis
    }

    /// Horizontal displacement for this tick.
    pub fn horizontal_displacement(
        &mut self,
        camera_forward: Vec3,
        camera_right: Vec3,
        horizontal: f32,
        vertical: f32,
        move_speed: f32,
        dt: f32,
    ) -> Vec3 {
        self.basis.update(camera_forward, camera_right);
        let move_dir = compose_move_dir(self.basis.forward, self.basis.right, horizontal, vertical);
        move_dir * move_speed * dt
    }

    /// Advance vertical velocity and return this tick's vertical displacement.
    ///
    /// While grounded and falling the velocity is pinned to `grounded_velocity`
    /// rather than accumulating further.
    pub fn vertical_displacement(
        &mut self,
        grounded: bool,
        gravity: f32,
        grounded_velocity: f32,
        dt: f32,
    ) -> Vec3 {
        if grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = grounded_velocity;
        } else {
            self.vertical_velocity += gravity * dt;
        }
        Vec3::new(0.0, self.vertical_velocity * dt, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::look::CameraOrientation;

    const EPS: f32 = 1e-4;

    #[test]
    fn diagonal_is_not_faster() {
        let basis = PlanarBasis::from_yaw(0.0);
        let straight = compose_move_dir(basis.forward, basis.right, 0.0, 1.0);
        let diagonal = compose_move_dir(basis.forward, basis.right, 1.0, 1.0);
        assert!((straight.length() - diagonal.length()).abs() < EPS);

        let mut resolver = MovementResolver::new(37.0);
        let cam = CameraOrientation::new(0.0, 37.0);
        let a = resolver.horizontal_displacement(cam.forward(), cam.right(), 1.0, 0.0, 5.0, 0.02);
        let b = resolver.horizontal_displacement(cam.forward(), cam.right(), 1.0, 1.0, 5.0, 0.02);
        assert!((a.length() - b.length()).abs() < EPS);
        assert!((a.length() - 0.1).abs() < EPS);
    }

    #[test]
    fn partial_input_is_not_boosted() {
        let basis = PlanarBasis::from_yaw(0.0);
        let slow = compose_move_dir(basis.forward, basis.right, 0.0, 0.4);
        assert!((slow.length() - 0.4).abs() < EPS);
    }

    #[test]
    fn pitch_does_not_change_speed() {
        let mut resolver = MovementResolver::new(0.0);
        let level = CameraOrientation::new(0.0, 120.0);
        let tilted = CameraOrientation::new(75.0, 120.0);

        let a = resolver.horizontal_displacement(level.forward(), level.right(), 0.0, 1.0, 5.0, 0.1);
        let b = resolver.horizontal_displacement(tilted.forward(), tilted.right(), 0.0, 1.0, 5.0, 0.1);
        assert!((a - b).length() < EPS);
        assert_eq!(b.y, 0.0);
    }

    #[test]
    fn degenerate_forward_reuses_last_basis() {
        let mut resolver = MovementResolver::new(0.0);
        let cam = CameraOrientation::new(0.0, 90.0);
        resolver.horizontal_displacement(cam.forward(), cam.right(), 0.0, 1.0, 5.0, 0.1);

        let d = resolver.horizontal_displacement(Vec3::NEG_Y, cam.right(), 0.0, 1.0, 5.0, 0.1);
        assert!(d.is_finite());
        assert!((d.normalize() - Vec3::X).length() < EPS);
    }

    #[test]
    fn degenerate_before_any_valid_axis_uses_initial_yaw() {
        let mut resolver = MovementResolver::new(180.0);
        let d = resolver.horizontal_displacement(Vec3::Y, Vec3::ZERO, 1.0, 1.0, 1.0, 1.0);
        assert!(d.is_finite());
        // Facing +Z: forward is +Z, right is -X
        let expected = Vec3::new(-1.0, 0.0, 1.0).normalize();
        assert!((d - expected).length() < EPS);
    }

    #[test]
    fn grounded_velocity_resets_without_accumulating() {
        let mut resolver = MovementResolver::new(0.0);
        resolver.vertical_velocity = -7.0;

        for _ in 0..5 {
            let d = resolver.vertical_displacement(true, -9.81, -2.0, 0.02);
            assert_eq!(resolver.vertical_velocity(), -2.0);
            assert!((d.y - -0.04).abs() < EPS);
        }
    }

    #[test]
    fn airborne_velocity_accumulates_gravity() {
        let mut resolver = MovementResolver::new(0.0);
        resolver.vertical_displacement(false, -10.0, -2.0, 0.1);
        resolver.vertical_displacement(false, -10.0, -2.0, 0.1);
        assert!((resolver.vertical_velocity() - -2.0).abs() < EPS);

        // Grounded but at rest still picks up gravity this tick
        let mut resting = MovementResolver::new(0.0);
        resting.vertical_displacement(true, -10.0, -2.0, 0.1);
        assert!((resting.vertical_velocity() - -1.0).abs() < EPS);
    }
}
