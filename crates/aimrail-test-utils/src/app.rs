//! Bevy test app builders with various plugin combinations.

use bevy::prelude::*;

/// Create a minimal test app with only the core plugin.
///
/// Provides `AimrailSet` system ordering and core resources but no scene
/// sync or blend systems.
pub fn minimal_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(aimrail_core::AimrailCorePlugin);
    app.finish();
    app.cleanup();
    app
}

/// Create a test app with the full blend pipeline: scene sync, episode
/// starts, and per-frame blend ticks.
pub fn blend_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(aimrail_core::AimrailCorePlugin);
    app.add_plugins(aimrail_blend::AimrailBlendPlugin);
    app.finish();
    app.cleanup();
    app
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
