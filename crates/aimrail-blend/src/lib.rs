//! Bevy plugin wrapping [`aimrail_blend_core`] for ECS integration.
//!
//! Add [`AimrailBlendPlugin`] after
//! [`AimrailCorePlugin`](aimrail_core::AimrailCorePlugin), spawn target
//! entities with scene components and characters with binding entities, then
//! fire [`EpisodeStart`](messages::EpisodeStart) messages from your animation
//! driver. Each frame the plugin mirrors the scene, starts pending episodes,
//! and publishes one [`IkCommand`](messages::IkCommand) per ticking binding.
//!
//! # Example
//!
//! ```
//! use bevy::prelude::*;
//! use aimrail_blend::prelude::*;
//! use aimrail_core::prelude::*;
//!
//! let mut app = App::new();
//! app.add_plugins(AimrailCorePlugin);
//! app.add_plugins(AimrailBlendPlugin);
//!
//! let lever = app
//!     .world_mut()
//!     .spawn((SceneName::new("lever"), ScenePosition::new(4.0, 1.0, 0.0)))
//!     .id();
//! let character = app.world_mut().spawn(CharacterBody).id();
//! app.world_mut().spawn(IkBinding::new(
//!     character,
//!     BindingConfig::aim("lever", BodyPart::RightHand),
//! ));
//! # let _ = lever;
//! ```

pub mod components;
pub mod config;
pub mod messages;
pub mod systems;

/// Re-export the core crate for downstream convenience.
pub use aimrail_blend_core;

use std::collections::HashMap;

use bevy::prelude::*;

use aimrail_blend_core::registry::RailRegistry;
use aimrail_blend_core::scene::SceneIndex;
use aimrail_blend_core::types::{BodyPart, CharacterId};
use aimrail_core::AimrailSet;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Resource holding the shared [`RailRegistry`].
#[derive(Resource, Debug, Default)]
pub struct Rails(pub RailRegistry);

/// Resource holding the per-frame [`SceneIndex`] snapshot, rebuilt in
/// [`AimrailSet::Sense`].
#[derive(Resource, Debug, Default)]
pub struct SceneCache(pub SceneIndex);

/// Resource mapping each (character, part) slot to the binding entity whose
/// episode currently owns it.
///
/// Starting an episode claims the slot and implicitly stops the previous
/// binding's ticking, the way entering an animation state exits the one
/// before it.
#[derive(Resource, Debug, Default)]
pub struct ActiveEpisodes(pub HashMap<(CharacterId, BodyPart), Entity>);

// ---------------------------------------------------------------------------
// AimrailBlendPlugin
// ---------------------------------------------------------------------------

/// Bevy plugin that runs the scene-sync → episode-start → blend-tick
/// pipeline each frame.
///
/// Requires [`AimrailCorePlugin`](aimrail_core::AimrailCorePlugin) to be
/// added first (it provides
/// [`SimConfig`](aimrail_core::config::SimConfig) and the system-set
/// ordering).
pub struct AimrailBlendPlugin;

impl Plugin for AimrailBlendPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Rails>()
            .init_resource::<SceneCache>()
            .init_resource::<ActiveEpisodes>()
            .add_message::<messages::EpisodeStart>()
            .add_message::<messages::IkCommand>()
            .add_systems(
                Update,
                (
                    systems::scene_sync_system.in_set(AimrailSet::Sense),
                    systems::episode_start_system.in_set(AimrailSet::Retarget),
                    systems::blend_tick_system.in_set(AimrailSet::Blend),
                ),
            )
            .add_observer(systems::character_removed);
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::components::{
        CharacterBody, IkBinding, SceneName, ScenePosition, SceneTagged, character_id,
    };
    pub use crate::config::RigConfig;
    pub use crate::messages::{EpisodeStart, IkCommand};
    pub use crate::{ActiveEpisodes, AimrailBlendPlugin, Rails, SceneCache};
    // Re-export core types so users don't need a separate import.
    pub use aimrail_blend_core::prelude::*;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
