//! Player character systems
//!
//! Spawns the character rig and drives it with the shared locomotion
//! controller each frame.
//!
//! The rig is three entities:
//! - root: capsule collider + translation, never rotated
//! - body: child mesh, yaw-only rotation (turned by the head-twist rule)
//! - camera: child `Camera3d`, absolute pitch/yaw rotation
//!
//! Because the root never rotates, the children's local rotations are their
//! world rotations.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier;
use locomotion::{
    CameraOrientation, CharacterHost, FirstPersonController, LocomotionInput, TickReport,
};

use crate::input::InputState;
use crate::settings::{
    CharacterSettings, ClientSettings, ReloadSettings, ReloadStatus, SettingsPath,
};
use crate::states::GameState;

// =============================================================================
// COMPONENTS
// =============================================================================

/// Root of the player rig; points at the body and camera children
#[derive(Component, Clone, Copy, Debug)]
pub struct PlayerRig {
    pub body: Entity,
    pub camera: Entity,
}

/// Marker for the body child
#[derive(Component)]
pub struct PlayerBody;

/// Marker for the first-person camera child
#[derive(Component)]
pub struct PlayerCamera;

/// Locomotion state plus what the host saw last frame
#[derive(Component, Debug)]
pub struct PlayerLocomotion {
    pub controller: FirstPersonController,
    /// Grounded flag reported by the most recent sweep
    pub grounded: bool,
    pub last_report: TickReport,
}

/// Sweep settings for the character capsule
#[derive(Component, Clone, Copy, Debug)]
pub struct CharacterMotion {
    pub controller: rapier::control::KinematicCharacterController,
}

impl CharacterMotion {
    pub fn from_settings(character: &CharacterSettings) -> Self {
        Self {
            controller: rapier::control::KinematicCharacterController {
                offset: CharacterLength::Absolute(character.skin_width),
                slide: true,
                autostep: (character.step_offset > 0.0).then(|| CharacterAutostep {
                    max_height: CharacterLength::Absolute(character.step_offset),
                    min_width: CharacterLength::Absolute(character.radius * 0.5),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: character.slope_limit.to_radians(),
                min_slope_slide_angle: character.slope_limit.to_radians(),
                ..default()
            },
        }
    }

    /// Sweep `collider` from `from` by `desired` against everything in the
    /// context except `entity`'s own collider.
    ///
    /// Returns the translation actually allowed and whether the capsule ends
    /// up on walkable ground.
    pub fn sweep(
        &self,
        context: &RapierContext,
        entity: Entity,
        collider: &Collider,
        from: Vec3,
        desired: Vec3,
    ) -> (Vec3, bool) {
        let dt = context.simulation.integration_parameters.dt;
        let filter = QueryFilter::default().exclude_collider(entity);
        context.with_query_pipeline(filter, |query_pipeline| {
            let movement = self.controller.move_shape(
                dt,
                &query_pipeline.query_pipeline,
                &*collider.raw,
                &(from, Quat::IDENTITY).into(),
                desired.into(),
                |_| {},
            );
            (movement.translation.into(), movement.grounded)
        })
    }
}

// =============================================================================
// HOST ADAPTER
// =============================================================================

/// `CharacterHost` over the rig transforms.
///
/// `sweep(from, desired)` performs the collision-aware move and returns the
/// translation actually applied plus whether the capsule ended up grounded.
pub struct RigHost<'a, S>
where
    S: FnMut(Vec3, Vec3) -> (Vec3, bool),
{
    pub root: &'a mut Transform,
    pub body: &'a mut Transform,
    pub camera: &'a mut Transform,
    pub grounded: bool,
    pub sweep: S,
}

impl<S> CharacterHost for RigHost<'_, S>
where
    S: FnMut(Vec3, Vec3) -> (Vec3, bool),
{
    fn camera_rotation(&self) -> Quat {
        self.camera.rotation
    }

    fn set_camera_rotation(&mut self, rotation: Quat) {
        self.camera.rotation = rotation;
    }

    fn body_rotation(&self) -> Quat {
        self.body.rotation
    }

    fn set_body_rotation(&mut self, rotation: Quat) {
        self.body.rotation = rotation;
    }

    fn move_character(&mut self, displacement: Vec3) {
        let (applied, grounded) = (self.sweep)(self.root.translation, displacement);
        self.root.translation += applied;
        self.grounded = grounded;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

// =============================================================================
// SPAWNING
// =============================================================================

/// Spawn the player rig at the configured spawn point
pub fn spawn_player(
    mut commands: Commands,
    settings: Res<ClientSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ch = settings.character;
    let camera_orientation = CameraOrientation::new(ch.initial_pitch, ch.initial_yaw);
    let rig = spawn_rig(&mut commands, &settings);

    // Body mesh with a nose marker so the body's facing is visible
    commands.entity(rig.body).insert((
        Mesh3d(meshes.add(Capsule3d::new(ch.radius, ch.half_segment() * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.55, 0.8))),
    ));
    commands.entity(rig.body).with_children(|parent| {
        parent.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.2, 0.2, 0.4))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.4, 0.2))),
            Transform::from_xyz(0.0, ch.eye_offset() - 0.2, -ch.radius),
        ));
    });

    commands.entity(rig.camera).insert((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 70.0_f32.to_radians(),
            near: 0.05,
            ..default()
        }),
    ));

    info!(
        "Spawned player at {:?} (pitch {:.1}, yaw {:.1})",
        ch.spawn_position,
        camera_orientation.pitch(),
        camera_orientation.yaw()
    );
}

/// Spawn the physics side of the rig: collider root plus body and camera
/// children, without any rendering components.
pub fn spawn_rig(commands: &mut Commands, settings: &ClientSettings) -> PlayerRig {
    let ch = settings.character;
    let camera_orientation = CameraOrientation::new(ch.initial_pitch, ch.initial_yaw);
    let camera_rotation = camera_orientation.rotation();

    let root = commands
        .spawn((
            Name::new("Player"),
            Transform::from_translation(Vec3::from(ch.spawn_position)),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(ch.half_segment(), ch.radius),
            CharacterMotion::from_settings(&ch),
            PlayerLocomotion {
                controller: FirstPersonController::from_camera_rotation(
                    settings.locomotion,
                    camera_rotation,
                ),
                grounded: false,
                last_report: TickReport::default(),
            },
        ))
        .id();

    // Body starts facing the camera heading
    let body = commands
        .spawn((
            Name::new("PlayerBody"),
            PlayerBody,
            Transform::from_rotation(locomotion::yaw_rotation(camera_orientation.yaw())),
            Visibility::default(),
            ChildOf(root),
        ))
        .id();

    let camera = commands
        .spawn((
            Name::new("PlayerCamera"),
            PlayerCamera,
            Transform::from_xyz(0.0, ch.eye_offset(), 0.0).with_rotation(camera_rotation),
            ChildOf(root),
        ))
        .id();

    let rig = PlayerRig { body, camera };
    commands.entity(root).insert(rig);
    rig
}

// =============================================================================
// LOCOMOTION
// =============================================================================

/// Run one locomotion tick for every player rig.
///
/// Input is neutral while paused, so the character still settles under gravity.
pub fn drive_locomotion(
    time: Res<Time>,
    input_state: Res<InputState>,
    game_state: Res<State<GameState>>,
    rapier_context: ReadRapierContext,
    mut players: Query<(
        Entity,
        &PlayerRig,
        &Collider,
        &CharacterMotion,
        &mut PlayerLocomotion,
    )>,
    mut transforms: Query<&mut Transform>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    let dt = time.delta_secs();
    let input = if *game_state.get() == GameState::Playing {
        input_state.sample()
    } else {
        LocomotionInput::default()
    };

    for (entity, rig, collider, motion, mut locomotion) in players.iter_mut() {
        let Ok([mut root, mut body, mut camera]) =
            transforms.get_many_mut([entity, rig.body, rig.camera])
        else {
            continue;
        };

        let mut host = RigHost {
            root: &mut *root,
            body: &mut *body,
            camera: &mut *camera,
            grounded: locomotion.grounded,
            sweep: |from: Vec3, desired: Vec3| {
                motion.sweep(&context, entity, collider, from, desired)
            },
        };

        let report = locomotion.controller.tick(dt, input, &mut host);
        let grounded = host.grounded;

        if grounded != locomotion.grounded {
            trace!("Player grounded: {}", grounded);
        }
        locomotion.grounded = grounded;
        locomotion.last_report = report;
    }
}

/// F5 asks for a settings reload
pub fn request_settings_reload(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut reload: MessageWriter<ReloadSettings>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        reload.write(ReloadSettings);
    }
}

/// Re-read the settings file and apply it to every player
pub fn reload_settings(
    mut requests: MessageReader<ReloadSettings>,
    path: Res<SettingsPath>,
    mut settings: ResMut<ClientSettings>,
    mut status: ResMut<ReloadStatus>,
    mut players: Query<(&mut PlayerLocomotion, &mut CharacterMotion)>,
) {
    // Several requests in one frame collapse into a single read
    if requests.read().count() == 0 {
        return;
    }

    match ClientSettings::load(&path.0) {
        Ok(loaded) => {
            // Capsule size is fixed at spawn; only tuning and sweep options change
            for (mut locomotion, mut motion) in players.iter_mut() {
                locomotion.controller.set_config(loaded.locomotion);
                *motion = CharacterMotion::from_settings(&loaded.character);
            }
            *settings = loaded;
            *status = ReloadStatus::Applied;
            info!("Reloaded locomotion settings from {:?}", path.0);
        }
        Err(e) => {
            warn!("Settings reload failed, keeping current values: {}", e);
            *status = ReloadStatus::Failed(e);
        }
    }
}
