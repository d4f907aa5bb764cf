//! First-person locomotion client - renders a test course and drives the
//! player rig from keyboard and mouse input

mod input;
mod settings;
mod states;
mod systems;
mod ui;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;
use settings::{settings_path, ClientSettings, ReloadSettings, ReloadStatus, SettingsPath};
use states::GameState;

/// Get the asset path - for bundled macOS apps, use path relative to executable
fn get_asset_path() -> String {
    // Try to find assets relative to executable (for .app bundles)
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                return bundled_assets.to_string_lossy().to_string();
            }
        }
    }
    // Fall back to default "assets" folder (for development)
    "assets".to_string()
}

fn main() {
    let asset_path = get_asset_path();
    let settings_file = settings_path(&asset_path);

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "First-Person Locomotion".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_path,
                ..default()
            }),
    );

    // Rapier provides the collision-aware sweep used for every move
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());

    // Settings must exist before the player spawns
    info!("Reading settings from {:?}", settings_file);
    app.insert_resource(ClientSettings::load_or_default(&settings_file));
    app.insert_resource(SettingsPath(settings_file));
    app.init_resource::<ReloadStatus>();
    app.add_message::<ReloadSettings>();

    app.init_state::<GameState>();
    app.init_resource::<input::InputState>();

    app.add_plugins(ui::PauseMenuPlugin);
    app.add_plugins(ui::DebugOverlayPlugin);

    app.add_systems(Startup, (systems::spawn_world, systems::spawn_player));

    // Cursor follows the game state
    app.add_systems(OnEnter(GameState::Playing), systems::grab_cursor);
    app.add_systems(
        OnEnter(GameState::Paused),
        (systems::release_cursor, input::clear_input),
    );
    app.add_systems(
        Update,
        (systems::handle_escape_key, systems::regrab_on_click)
            .run_if(in_state(GameState::Playing)),
    );
    app.add_systems(
        Update,
        systems::handle_resume_key.run_if(in_state(GameState::Paused)),
    );

    // ORDER MATTERS: sample input -> locomotion tick
    app.add_systems(
        Update,
        (
            (input::handle_keyboard_input, input::handle_mouse_input)
                .run_if(in_state(GameState::Playing)),
            systems::drive_locomotion,
        )
            .chain(),
    );
    app.add_systems(
        Update,
        (systems::request_settings_reload, systems::reload_settings).chain(),
    );

    app.run();
}
