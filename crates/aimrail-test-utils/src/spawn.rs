//! Entity spawn helpers for tests.

use bevy::prelude::*;
use nalgebra::Vector3;

use aimrail_blend::aimrail_blend_core::controller::BindingConfig;
use aimrail_blend::aimrail_blend_core::scene::SceneTag;
use aimrail_blend::components::{CharacterBody, IkBinding, SceneName, ScenePosition, SceneTagged};

/// Spawn a named scene target at a position.
pub fn spawn_target(world: &mut World, name: &str, position: Vector3<f32>) -> Entity {
    world
        .spawn((SceneName::new(name), ScenePosition(position)))
        .id()
}

/// Spawn a tagged scene target (player or camera) at a position.
pub fn spawn_tagged_target(world: &mut World, tag: SceneTag, position: Vector3<f32>) -> Entity {
    world.spawn((SceneTagged(tag), ScenePosition(position))).id()
}

/// Spawn a character entity whose rail set is evicted on despawn.
pub fn spawn_character(world: &mut World) -> Entity {
    world.spawn(CharacterBody).id()
}

/// Spawn a binding entity driving `character` with the given config.
pub fn spawn_binding(world: &mut World, character: Entity, config: BindingConfig) -> Entity {
    world.spawn(IkBinding::new(character, config)).id()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
