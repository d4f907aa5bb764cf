//! UI module

pub mod debug_overlay;
pub mod pause_menu;
pub mod styles;

pub use debug_overlay::DebugOverlayPlugin;
pub use pause_menu::PauseMenuPlugin;
