//! First-person controller: runs look, movement and body reconciliation once per tick.

use bevy::prelude::*;

use crate::body::{reconcile_body_yaw, BodyTurn};
use crate::config::LocomotionConfig;
use crate::host::{CharacterHost, LocomotionInput};
use crate::look::{yaw_of, yaw_rotation, CameraOrientation};
use crate::movement::MovementResolver;

/// Side effects of a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Camera orientation written this tick.
    pub camera: CameraOrientation,
    /// Horizontal sweep requested from the host.
    pub horizontal_displacement: Vec3,
    /// Vertical sweep requested from the host.
    pub vertical_displacement: Vec3,
    /// Vertical velocity after gravity/grounding.
    pub vertical_velocity: f32,
    /// Grounded state the host reported before gravity was applied.
    pub grounded: bool,
    pub body_yaw_before: f32,
    pub body_yaw_after: f32,
    pub body_turn: BodyTurn,
}

/// Locomotion state for one character.
#[derive(Clone, Copy, Debug)]
pub struct FirstPersonController {
    config: LocomotionConfig,
    camera: CameraOrientation,
    movement: MovementResolver,
    last_body_turn: BodyTurn,
}

impl FirstPersonController {
    /// Build a controller, deriving the camera orientation from the host's current camera.
    pub fn new(config: LocomotionConfig, host: &impl CharacterHost) -> Self {
        Self::from_camera_rotation(config, host.camera_rotation())
    }

    pub fn from_camera_rotation(config: LocomotionConfig, camera_rotation: Quat) -> Self {
        let camera = CameraOrientation::from_rotation(camera_rotation);
        Self {
            config,
            camera,
            movement: MovementResolver::new(camera.yaw()),
            last_body_turn: BodyTurn::Holding,
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Replace the tuning; orientation and velocity carry over.
    pub fn set_config(&mut self, config: LocomotionConfig) {
        self.config = config;
    }

    pub fn camera(&self) -> CameraOrientation {
        self.camera
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.movement.vertical_velocity()
    }

    /// Advance one tick: look, then move, then reconcile the body.
    ///
    /// A negative or non-finite `dt` is treated as zero.
    pub fn tick(
        &mut self,
        dt: f32,
        input: LocomotionInput,
        host: &mut impl CharacterHost,
    ) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let input = input.sanitized();
        let cfg = self.config;

        // --- Look ---
        self.camera
            .apply_pointer_delta(input.look_x, input.look_y, cfg.look_sensitivity, dt);
        host.set_camera_rotation(self.camera.rotation());

        // --- Horizontal movement ---
        let horizontal_displacement = self.movement.horizontal_displacement(
            self.camera.forward(),
            self.camera.right(),
            input.horizontal,
            input.vertical,
            cfg.move_speed,
            dt,
        );
        host.move_character(horizontal_displacement);

        // --- Gravity ---
        let grounded = host.is_grounded();
        let vertical_displacement = self.movement.vertical_displacement(
            grounded,
            cfg.gravity,
            cfg.grounded_vertical_velocity,
            dt,
        );
        host.move_character(vertical_displacement);

        // --- Body ---
        let body_yaw_before = yaw_of(host.body_rotation());
        let (body_turn, body_yaw_after) = reconcile_body_yaw(
            body_yaw_before,
            self.camera.yaw(),
            input.horizontal,
            input.vertical,
            cfg.max_head_turn,
            cfg.body_turn_speed,
            dt,
        );
        if body_turn.is_turning() {
            host.set_body_rotation(yaw_rotation(body_yaw_after));
        }
        if body_turn != self.last_body_turn {
            debug!(
                "Body turn {:?} -> {:?} (body {:.1}, camera {:.1})",
                self.last_body_turn,
                body_turn,
                body_yaw_before,
                self.camera.yaw()
            );
            self.last_body_turn = body_turn;
        }

        TickReport {
            camera: self.camera,
            horizontal_displacement,
            vertical_displacement,
            vertical_velocity: self.movement.vertical_velocity(),
            grounded,
            body_yaw_before,
            body_yaw_after,
            body_turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::delta_angle;

    const EPS: f32 = 1e-3;

    /// Host with a flat floor at y = 0.
    #[derive(Default)]
    struct FloorHost {
        position: Vec3,
        camera: Quat,
        body: Quat,
        grounded: bool,
        moves: Vec<Vec3>,
        camera_writes: usize,
        body_writes: usize,
    }

    impl CharacterHost for FloorHost {
        fn camera_rotation(&self) -> Quat {
            self.camera
        }
        fn set_camera_rotation(&mut self, rotation: Quat) {
            self.camera = rotation;
            self.camera_writes += 1;
        }
        fn body_rotation(&self) -> Quat {
            self.body
        }
        fn set_body_rotation(&mut self, rotation: Quat) {
            self.body = rotation;
            self.body_writes += 1;
        }
        fn move_character(&mut self, displacement: Vec3) {
            self.moves.push(displacement);
            let mut next = self.position + displacement;
            self.grounded = next.y <= 0.0;
            if self.grounded {
                next.y = 0.0;
            }
            self.position = next;
        }
        fn is_grounded(&self) -> bool {
            self.grounded
        }
    }

    fn controller(host: &FloorHost) -> FirstPersonController {
        FirstPersonController::new(LocomotionConfig::default(), host)
    }

    #[test]
    fn initial_orientation_comes_from_host_camera() {
        let host = FloorHost {
            camera: CameraOrientation::new(20.0, 135.0).rotation(),
            ..Default::default()
        };
        let pc = controller(&host);
        assert!((pc.camera().pitch() - 20.0).abs() < EPS);
        assert!((pc.camera().yaw() - 135.0).abs() < EPS);
    }

    #[test]
    fn tick_issues_two_separate_moves() {
        let mut host = FloorHost::default();
        let mut pc = controller(&host);
        let report = pc.tick(0.02, LocomotionInput::movement(0.0, 1.0), &mut host);

        assert_eq!(host.moves.len(), 2);
        assert_eq!(host.moves[0], report.horizontal_displacement);
        assert_eq!(host.moves[1], report.vertical_displacement);
        assert_eq!(host.moves[0].y, 0.0);
        assert_eq!(host.moves[1].x, 0.0);
        assert_eq!(host.moves[1].z, 0.0);
        assert_eq!(host.camera_writes, 1);
    }

    #[test]
    fn walks_forward_along_camera_heading() {
        let mut host = FloorHost {
            camera: CameraOrientation::new(30.0, 90.0).rotation(),
            body: yaw_rotation(90.0),
            ..Default::default()
        };
        let mut pc = controller(&host);
        for _ in 0..50 {
            pc.tick(0.02, LocomotionInput::movement(0.0, 1.0), &mut host);
        }
        // 5 m/s for 1 s toward +X
        assert!((host.position.x - 5.0).abs() < 1e-2);
        assert!(host.position.z.abs() < 1e-2);
        assert_eq!(host.position.y, 0.0);
    }

    #[test]
    fn grounded_velocity_settles_at_constant() {
        let mut host = FloorHost {
            position: Vec3::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let mut pc = controller(&host);

        let mut landed = false;
        for _ in 0..200 {
            let report = pc.tick(0.02, LocomotionInput::default(), &mut host);
            if report.grounded && landed {
                assert_eq!(report.vertical_velocity, -2.0);
            }
            landed |= report.grounded;
        }
        assert!(landed);
        assert_eq!(host.position.y, 0.0);
        assert_eq!(pc.vertical_velocity(), -2.0);
    }

    #[test]
    fn looking_around_while_idle_keeps_body_until_threshold() {
        let mut host = FloorHost::default();
        let mut pc = controller(&host);

        // 45 degrees right in one tick: 1.125 units * 200 deg/s * 0.2 s
        pc.tick(0.2, LocomotionInput::new(0.0, 0.0, 1.125, 0.0), &mut host);
        assert!((pc.camera().yaw() - 45.0).abs() < EPS);
        for _ in 0..20 {
            let report = pc.tick(0.02, LocomotionInput::default(), &mut host);
            assert_eq!(report.body_turn, BodyTurn::Holding);
        }
        assert_eq!(host.body_writes, 0);
        assert!(yaw_of(host.body).abs() < EPS);
    }

    #[test]
    fn walking_forward_aligns_body() {
        let mut host = FloorHost {
            camera: CameraOrientation::new(0.0, 60.0).rotation(),
            ..Default::default()
        };
        let mut pc = controller(&host);
        for _ in 0..20 {
            pc.tick(0.02, LocomotionInput::movement(0.0, 1.0), &mut host);
        }
        assert!(delta_angle(yaw_of(host.body), 60.0).abs() < EPS);
    }

    #[test]
    fn body_never_turns_faster_than_rate() {
        let mut host = FloorHost {
            camera: CameraOrientation::new(0.0, 179.0).rotation(),
            ..Default::default()
        };
        let mut pc = controller(&host);
        let max_step = pc.config().body_turn_speed * 0.02;
        for _ in 0..40 {
            let report = pc.tick(0.02, LocomotionInput::movement(0.0, 1.0), &mut host);
            let step = delta_angle(report.body_yaw_before, report.body_yaw_after).abs();
            assert!(step <= max_step + EPS);
        }
    }

    #[test]
    fn negative_dt_is_inert() {
        let mut host = FloorHost::default();
        let mut pc = controller(&host);
        let report = pc.tick(-1.0, LocomotionInput::new(1.0, 1.0, 50.0, 50.0), &mut host);
        assert_eq!(report.horizontal_displacement, Vec3::ZERO);
        assert_eq!(report.vertical_displacement, Vec3::ZERO);
        assert_eq!(pc.camera(), CameraOrientation::default());
        assert_eq!(host.position, Vec3::ZERO);
    }

    #[test]
    fn oversized_axes_are_clamped() {
        let mut host = FloorHost::default();
        let mut pc = controller(&host);
        let report = pc.tick(0.1, LocomotionInput::movement(0.0, 25.0), &mut host);
        assert!((report.horizontal_displacement.length() - 0.5).abs() < EPS);
    }
}
