//! World systems
//!
//! A small test course: flat ground, a ramp, a staircase and a few walls to
//! walk into.

use bevy::light::{light_consts::lux, CascadeShadowConfigBuilder};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

// =============================================================================
// COMPONENTS
// =============================================================================

/// Root entity for all static world geometry
#[derive(Component)]
pub struct ClientWorldRoot;

/// Half size of the ground slab (x/z)
const GROUND_HALF_EXTENT: f32 = 60.0;

// =============================================================================
// SPAWNING
// =============================================================================

/// Spawn the static test course
pub fn spawn_world(
    mut commands: Commands,
    world_roots: Query<Entity, With<ClientWorldRoot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !world_roots.is_empty() {
        return;
    }

    commands.insert_resource(ClearColor(Color::srgb(0.55, 0.7, 0.9)));
    commands.insert_resource(AmbientLight {
        brightness: 400.0,
        ..default()
    });

    let root = commands
        .spawn((
            Name::new("World"),
            ClientWorldRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    commands.spawn((
        DirectionalLight {
            illuminance: lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        CascadeShadowConfigBuilder {
            num_cascades: 2,
            maximum_distance: 60.0,
            ..default()
        }
        .build(),
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
        ChildOf(root),
    ));

    let ground_mat = materials.add(Color::srgb(0.45, 0.5, 0.42));
    let block_mat = materials.add(Color::srgb(0.7, 0.68, 0.62));

    // --- Ground (top surface at y = 0) ---
    spawn_block(
        &mut commands,
        &mut meshes,
        ground_mat,
        root,
        Vec3::new(GROUND_HALF_EXTENT, 0.5, GROUND_HALF_EXTENT),
        Transform::from_xyz(0.0, -0.5, 0.0),
    );

    // --- Ramp (20 degrees, walkable) ---
    spawn_block(
        &mut commands,
        &mut meshes,
        block_mat.clone(),
        root,
        Vec3::new(2.0, 0.1, 5.0),
        Transform::from_xyz(8.0, 1.6, -10.0)
            .with_rotation(Quat::from_rotation_x(20.0_f32.to_radians())),
    );

    // --- Steep ramp (60 degrees, too steep to climb) ---
    spawn_block(
        &mut commands,
        &mut meshes,
        block_mat.clone(),
        root,
        Vec3::new(2.0, 0.1, 3.0),
        Transform::from_xyz(-8.0, 2.5, -10.0)
            .with_rotation(Quat::from_rotation_x(60.0_f32.to_radians())),
    );

    // --- Stairs (0.25 rise per step, inside the default step offset) ---
    for i in 0..8 {
        let rise = 0.25 * (i + 1) as f32;
        spawn_block(
            &mut commands,
            &mut meshes,
            block_mat.clone(),
            root,
            Vec3::new(1.5, rise * 0.5, 0.4),
            Transform::from_xyz(0.0, rise * 0.5, -6.0 - 0.8 * i as f32),
        );
    }

    // --- Walls ---
    for (x, z, hx, hz) in [(12.0, 4.0, 0.25, 4.0), (-12.0, 4.0, 0.25, 4.0), (0.0, 10.0, 6.0, 0.25)] {
        spawn_block(
            &mut commands,
            &mut meshes,
            block_mat.clone(),
            root,
            Vec3::new(hx, 1.5, hz),
            Transform::from_xyz(x, 1.5, z),
        );
    }

    info!("Spawned test course");
}

/// Static box with matching render mesh and collider
fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    parent: Entity,
    half_extents: Vec3,
    transform: Transform,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(half_extents * 2.0))),
        MeshMaterial3d(material),
        transform,
        RigidBody::Fixed,
        Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        ChildOf(parent),
    ));
}
