//! ECS components for scene objects, characters, and IK bindings.
//!
//! Target entities carry [`SceneName`] (and optionally [`SceneTagged`]) plus
//! [`ScenePosition`]; character entities carry [`CharacterBody`]; each
//! activation site is its own entity with an [`IkBinding`] pointing at the
//! character it drives.

use bevy::prelude::*;
use nalgebra::Vector3;

use aimrail_blend_core::controller::{BindingConfig, BlendController};
use aimrail_blend_core::scene::SceneTag;
use aimrail_blend_core::types::CharacterId;

// ---------------------------------------------------------------------------
// Scene components
// ---------------------------------------------------------------------------

/// Lookup name for a scene object. Target resolution matches against this
/// (player aliases excepted, which route through [`SceneTagged`]).
#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneName(pub String);

impl SceneName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Well-known-role marker mirrored into the scene index so alias resolution
/// can find the player or camera without a name match.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneTagged(pub SceneTag);

/// World position sampled into the scene index each frame.
///
/// Kept separate from any render transform so headless simulations can
/// drive it directly.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ScenePosition(pub Vector3<f32>);

impl ScenePosition {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vector3::new(x, y, z))
    }
}

// ---------------------------------------------------------------------------
// CharacterBody
// ---------------------------------------------------------------------------

/// Marker for a character whose body parts are IK-driven.
///
/// Despawning a tagged entity evicts its rail set from the registry via the
/// cleanup observer.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CharacterBody;

/// The registry key for a character entity.
///
/// Entity bits are stable for the entity's lifetime, which is exactly the
/// lifetime of its rail set.
#[must_use]
pub const fn character_id(entity: Entity) -> CharacterId {
    CharacterId(entity.to_bits())
}

// ---------------------------------------------------------------------------
// IkBinding
// ---------------------------------------------------------------------------

/// One activation site: a [`BlendController`] bound to a character entity.
///
/// A character typically owns several binding entities (head aim, hand
/// reach, releases) and the animation driver fires an
/// [`EpisodeStart`](crate::messages::EpisodeStart) at whichever one its
/// state machine enters.
#[derive(Component, Debug)]
pub struct IkBinding {
    /// The character this binding drives.
    pub character: Entity,
    /// Blend state machine for this site.
    pub controller: BlendController,
}

impl IkBinding {
    /// Create a binding for `character` from a [`BindingConfig`].
    #[must_use]
    pub fn new(character: Entity, config: BindingConfig) -> Self {
        Self {
            character,
            controller: BlendController::new(config),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
