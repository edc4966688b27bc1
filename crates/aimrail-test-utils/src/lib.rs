//! Shared test fixtures and utilities for aimrail crates.
//!
//! Provides reusable helpers for building Bevy test apps, spawning scene
//! targets, characters, and bindings, and deterministic RNG setup.

pub mod app;
pub mod rng;
pub mod spawn;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use app::{blend_test_app, minimal_test_app};
pub use rng::seeded_rng;
pub use spawn::{spawn_binding, spawn_character, spawn_target, spawn_tagged_target};
