//! Shared UI styles

use bevy::prelude::*;

/// Button colors
pub const BUTTON_NORMAL: Color = Color::srgb(0.10, 0.12, 0.14);
pub const BUTTON_HOVERED: Color = Color::srgb(0.16, 0.20, 0.24);
pub const BUTTON_PRESSED: Color = Color::srgb(0.20, 0.36, 0.52);

/// Translucent panel behind overlays
pub const PANEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

/// Text colors
pub const TEXT_COLOR: Color = Color::srgb(0.90, 0.92, 0.94);
pub const TEXT_MUTED: Color = Color::srgb(0.50, 0.54, 0.58);

/// Standard button style
pub fn button_style() -> Node {
    Node {
        width: Val::Px(240.0),
        height: Val::Px(50.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        margin: UiRect::all(Val::Px(8.0)),
        ..default()
    }
}

/// Standard button text style
pub fn button_text_style() -> TextFont {
    TextFont {
        font_size: 22.0,
        ..default()
    }
}

/// Title text style
pub fn title_text_style() -> TextFont {
    TextFont {
        font_size: 56.0,
        ..default()
    }
}
