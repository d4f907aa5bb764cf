//! Locomotion debug overlay (F3)
//!
//! Shows the camera angles, body yaw and head-turn decision, vertical
//! velocity and grounded state of the local player.

use bevy::prelude::*;

use super::styles::{PANEL_BACKGROUND, TEXT_COLOR};
use crate::systems::PlayerLocomotion;

pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlayEnabled>();
        app.add_systems(Startup, spawn_debug_overlay);
        app.add_systems(Update, (toggle_debug_overlay, update_debug_overlay).chain());
    }
}

/// Whether the overlay is visible
#[derive(Resource, Default)]
pub struct DebugOverlayEnabled(pub bool);

/// Marker for the overlay panel
#[derive(Component)]
struct DebugOverlay;

/// Marker for the stats text
#[derive(Component)]
struct DebugStatsText;

fn spawn_debug_overlay(mut commands: Commands) {
    commands
        .spawn((
            DebugOverlay,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            BorderRadius::all(Val::Px(4.0)),
            Visibility::Hidden, // Hidden until toggled on
        ))
        .with_children(|parent| {
            parent.spawn((
                DebugStatsText,
                Text::new("Locomotion: --"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
        });
}

fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut enabled: ResMut<DebugOverlayEnabled>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        enabled.0 = !enabled.0;
        info!("Debug overlay: {}", if enabled.0 { "ON" } else { "OFF" });
    }
}

fn update_debug_overlay(
    enabled: Res<DebugOverlayEnabled>,
    players: Query<&PlayerLocomotion>,
    mut overlay_query: Query<&mut Visibility, With<DebugOverlay>>,
    mut text_query: Query<&mut Text, With<DebugStatsText>>,
) {
    for mut visibility in overlay_query.iter_mut() {
        *visibility = if enabled.0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if !enabled.0 {
        return;
    }

    let Some(locomotion) = players.iter().next() else {
        return;
    };
    for mut text in text_query.iter_mut() {
        text.0 = format_stats(locomotion);
    }
}

/// Overlay text for one player
pub fn format_stats(locomotion: &PlayerLocomotion) -> String {
    let report = &locomotion.last_report;
    let camera = locomotion.controller.camera();
    format!(
        "Pitch: {:6.1}  Yaw: {:6.1}\nBody yaw: {:6.1}  ({:?})\nVertical velocity: {:6.2}\nGrounded: {}",
        camera.pitch(),
        camera.yaw(),
        report.body_yaw_after,
        report.body_turn,
        locomotion.controller.vertical_velocity(),
        locomotion.grounded,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use locomotion::{CameraOrientation, FirstPersonController, LocomotionConfig, TickReport};

    #[test]
    fn stats_show_orientation_and_grounding() {
        let locomotion = PlayerLocomotion {
            controller: FirstPersonController::from_camera_rotation(
                LocomotionConfig::default(),
                CameraOrientation::new(-12.5, 270.0).rotation(),
            ),
            grounded: true,
            last_report: TickReport {
                body_yaw_after: 200.0,
                ..Default::default()
            },
        };
        let text = format_stats(&locomotion);
        assert!(text.contains("-12.5"), "{text}");
        assert!(text.contains("270.0"), "{text}");
        assert!(text.contains("200.0"), "{text}");
        assert!(text.contains("(Holding)"), "{text}");
        assert!(text.contains("Grounded: true"), "{text}");
    }
}
