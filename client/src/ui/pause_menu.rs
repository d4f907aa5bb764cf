//! Pause screen
//!
//! Shown while the cursor is released. Lists the live locomotion tuning next
//! to the controls, and can re-read the settings file without leaving the
//! pause state.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::styles::*;
use crate::settings::{ClientSettings, ReloadSettings, ReloadStatus};
use crate::states::GameState;

pub struct PauseMenuPlugin;

impl Plugin for PauseMenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Paused), spawn_pause_screen);
        app.add_systems(OnExit(GameState::Paused), despawn_pause_screen);
        app.add_systems(
            Update,
            (pause_actions, refresh_tuning_panel).run_if(in_state(GameState::Paused)),
        );
    }
}

/// Key bindings listed on the pause screen
const CONTROLS: &[(&str, &str)] = &[
    ("W A S D / arrows", "move"),
    ("Mouse", "look"),
    ("Esc", "resume"),
    ("Click", "re-lock cursor"),
    ("F3", "debug overlay"),
    ("F5", "reload settings"),
];

#[derive(Component)]
struct PauseScreen;

/// Text listing the current tuning values
#[derive(Component)]
struct TuningPanel;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
enum PauseAction {
    Resume,
    Reload,
    Quit,
}

impl PauseAction {
    fn label(self) -> &'static str {
        match self {
            PauseAction::Resume => "RESUME",
            PauseAction::Reload => "RELOAD SETTINGS",
            PauseAction::Quit => "QUIT",
        }
    }
}

/// Tuning summary for the pause screen
pub fn tuning_summary(settings: &ClientSettings, status: &ReloadStatus) -> String {
    let loco = &settings.locomotion;
    let mut text = format!(
        "Move speed        {:.1} u/s\n\
         Gravity           {:.2} u/s²\n\
         Look sensitivity  {:.0} °/unit/s\n\
         Max head turn     {:.0}°\n\
         Body turn speed   {:.0}°/s\n\
         Pointer scale     {:.2}",
        loco.move_speed,
        loco.gravity,
        loco.look_sensitivity,
        loco.max_head_turn,
        loco.body_turn_speed,
        settings.input.pointer_scale,
    );
    match status {
        ReloadStatus::NotReloaded => {}
        ReloadStatus::Applied => text.push_str("\n\nSettings reloaded"),
        ReloadStatus::Failed(e) => text.push_str(&format!("\n\nReload failed: {e}")),
    }
    text
}

fn controls_summary() -> String {
    CONTROLS
        .iter()
        .map(|(key, action)| format!("{key:<18}{action}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn spawn_pause_screen(
    mut commands: Commands,
    settings: Res<ClientSettings>,
    status: Res<ReloadStatus>,
) {
    let panel_text = TextFont {
        font_size: 16.0,
        ..default()
    };

    commands
        .spawn((
            PauseScreen,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
        ))
        .with_children(|screen| {
            screen.spawn((Text::new("PAUSED"), title_text_style(), TextColor(TEXT_COLOR)));

            screen
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(48.0),
                    ..default()
                })
                .with_children(|panels| {
                    panels.spawn((
                        TuningPanel,
                        Text::new(tuning_summary(&settings, &status)),
                        panel_text.clone(),
                        TextColor(TEXT_COLOR),
                    ));
                    panels.spawn((
                        Text::new(controls_summary()),
                        panel_text.clone(),
                        TextColor(TEXT_MUTED),
                    ));
                });

            screen
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    ..default()
                })
                .with_children(|row| {
                    for action in [PauseAction::Resume, PauseAction::Reload, PauseAction::Quit] {
                        row.spawn((
                            Button,
                            action,
                            button_style(),
                            BackgroundColor(BUTTON_NORMAL),
                            BorderRadius::all(Val::Px(4.0)),
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new(action.label()),
                                button_text_style(),
                                TextColor(TEXT_COLOR),
                            ));
                        });
                    }
                });
        });
}

fn despawn_pause_screen(mut commands: Commands, screens: Query<Entity, With<PauseScreen>>) {
    for entity in screens.iter() {
        commands.entity(entity).despawn();
    }
}

fn pause_actions(
    mut buttons: Query<(&Interaction, &PauseAction, &mut BackgroundColor), Changed<Interaction>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut reload: MessageWriter<ReloadSettings>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, action, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_NORMAL,
        };
        if *interaction != Interaction::Pressed {
            continue;
        }

        match action {
            PauseAction::Resume => next_state.set(GameState::Playing),
            PauseAction::Reload => {
                reload.write(ReloadSettings);
            }
            PauseAction::Quit => {
                info!("Quit from pause screen");
                exit.write(AppExit::Success);
            }
        }
    }
}

/// Rewrite the tuning panel after a reload
fn refresh_tuning_panel(
    settings: Res<ClientSettings>,
    status: Res<ReloadStatus>,
    mut panels: Query<&mut Text, With<TuningPanel>>,
) {
    if !settings.is_changed() && !status.is_changed() {
        return;
    }
    for mut text in panels.iter_mut() {
        text.0 = tuning_summary(&settings, &status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_live_tuning() {
        let mut settings = ClientSettings::default();
        settings.locomotion.move_speed = 7.5;
        settings.locomotion.max_head_turn = 60.0;

        let text = tuning_summary(&settings, &ReloadStatus::NotReloaded);
        assert!(text.contains("7.5 u/s"), "{text}");
        assert!(text.contains("60°"), "{text}");
        assert!(!text.contains("reload"), "{text}");
    }

    #[test]
    fn summary_reports_reload_outcome() {
        let settings = ClientSettings::default();
        let applied = tuning_summary(&settings, &ReloadStatus::Applied);
        assert!(applied.ends_with("Settings reloaded"));

        let failed = tuning_summary(&settings, &ReloadStatus::Failed("bad radius".into()));
        assert!(failed.ends_with("Reload failed: bad radius"));
    }

    #[test]
    fn controls_cover_every_binding() {
        let text = controls_summary();
        assert_eq!(text.lines().count(), CONTROLS.len());
        assert!(text.contains("F5"));
    }
}
