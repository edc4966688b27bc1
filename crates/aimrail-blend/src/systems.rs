//! Bevy systems for the blend pipeline.
//!
//! Three stages per frame, ordered by
//! [`AimrailSet`](aimrail_core::AimrailSet):
//!
//! 1. **Sense** — [`scene_sync_system`] mirrors scene components into the
//!    [`SceneCache`] so target resolution sees this frame's positions.
//! 2. **Retarget** — [`episode_start_system`] consumes
//!    [`EpisodeStart`] messages and starts controller episodes.
//! 3. **Blend** — [`blend_tick_system`] advances every binding one
//!    `control_dt` step and publishes [`IkCommand`] messages.

use bevy::ecs::lifecycle::Remove;
use bevy::prelude::*;

use aimrail_blend_core::error::BlendError;
use aimrail_blend_core::scene::SceneObject;
use aimrail_blend_core::types::ObjectHandle;
use aimrail_core::config::SimConfig;

use crate::components::{
    CharacterBody, IkBinding, SceneName, ScenePosition, SceneTagged, character_id,
};
use crate::messages::{EpisodeStart, IkCommand};
use crate::{ActiveEpisodes, Rails, SceneCache};

/// Rebuilds the [`SceneCache`] from scene components.
///
/// Handles are entity bits, so a handle captured at episode start keeps
/// resolving to the same entity across rebuilds (continuous tracking
/// depends on this).
pub fn scene_sync_system(
    mut scene: ResMut<SceneCache>,
    query: Query<(
        Entity,
        Option<&SceneName>,
        Option<&SceneTagged>,
        &ScenePosition,
    )>,
) {
    scene.0.clear();
    for (entity, name, tagged, position) in &query {
        let object = SceneObject {
            name: name.map(|n| n.0.clone()).unwrap_or_default(),
            tag: tagged.map(|t| t.0),
            position: position.0,
        };
        scene.0.insert(ObjectHandle(entity.to_bits()), object);
    }
}

/// Starts a controller episode for each [`EpisodeStart`] message.
///
/// The started binding claims its (character, part) slot in
/// [`ActiveEpisodes`], stopping whichever binding ticked it before. The
/// claim happens even when the start fails: the failed site still replaced
/// the previous one, it just commands nothing.
///
/// An unresolvable target logs once and disables the binding; subsequent
/// starts for that binding are silent no-ops until something calls
/// [`reset`](aimrail_blend_core::controller::BlendController::reset) on it.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are extracted by value
pub fn episode_start_system(
    mut starts: MessageReader<EpisodeStart>,
    mut bindings: Query<&mut IkBinding>,
    mut rails: ResMut<Rails>,
    mut active: ResMut<ActiveEpisodes>,
    scene: Res<SceneCache>,
) {
    for start in starts.read() {
        let Ok(mut binding) = bindings.get_mut(start.binding) else {
            warn!(
                "aimrail-blend: episode start for missing binding {:?}",
                start.binding
            );
            continue;
        };
        let character = character_id(binding.character);
        let part = binding.controller.config().body_part;
        active.0.insert((character, part), start.binding);
        match binding.controller.begin_episode(character, &mut rails.0, &scene.0) {
            Ok(()) => {}
            // Already disabled: the failure was logged when it happened.
            Err(BlendError::Disabled) => {}
            Err(err) => error!("aimrail-blend: {character}: {err}"),
        }
    }
}

/// Advances each slot-owning binding one blend tick and publishes the
/// resulting directives. Uses [`SimConfig::control_dt`] as the timestep.
///
/// Bindings that lost their slot to a later episode are skipped, so a
/// superseded engage stops commanding the part it handed over.
#[allow(clippy::cast_possible_truncation)] // f64 → f32 control_dt
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are extracted by value
pub fn blend_tick_system(
    sim_config: Res<SimConfig>,
    mut rails: ResMut<Rails>,
    scene: Res<SceneCache>,
    active: Res<ActiveEpisodes>,
    mut bindings: Query<(Entity, &mut IkBinding)>,
    mut commands_out: MessageWriter<IkCommand>,
) {
    let dt = sim_config.control_dt as f32;
    for (entity, mut binding) in &mut bindings {
        let character = binding.character;
        let part = binding.controller.config().body_part;
        if active.0.get(&(character_id(character), part)) != Some(&entity) {
            continue;
        }
        if let Some(directive) = binding.controller.tick(dt, &mut rails.0, &scene.0) {
            commands_out.write(IkCommand {
                character,
                directive,
            });
        }
    }
}

/// Evicts a despawned character's rail set from the registry and drops its
/// episode slots.
pub fn character_removed(
    trigger: On<Remove, CharacterBody>,
    mut rails: ResMut<Rails>,
    mut active: ResMut<ActiveEpisodes>,
) {
    let character = character_id(trigger.entity);
    rails.0.remove(character);
    active.0.retain(|(id, _), _| *id != character);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AimrailBlendPlugin;
    use aimrail_blend_core::controller::{BindingConfig, BlendPhase, ControllerStatus};
    use aimrail_blend_core::scene::{SceneLookup, SceneTag};
    use aimrail_blend_core::types::BodyPart;
    use aimrail_core::AimrailCorePlugin;
    use nalgebra::Vector3;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(AimrailCorePlugin);
        app.add_plugins(AimrailBlendPlugin);
        app.finish();
        app.cleanup();
        app
    }

    #[test]
    fn scene_sync_mirrors_components() {
        let mut app = test_app();
        let lever = app
            .world_mut()
            .spawn((SceneName::new("lever"), ScenePosition::new(4.0, 0.0, 0.0)))
            .id();
        app.world_mut().spawn((
            SceneTagged(SceneTag::Player),
            ScenePosition::new(0.0, 1.7, 0.0),
        ));

        app.update();

        let scene = app.world().resource::<SceneCache>();
        assert_eq!(scene.0.len(), 2);
        let handle = scene.0.find_named("lever").unwrap();
        assert_eq!(handle, ObjectHandle(lever.to_bits()));
        assert!(scene.0.find_tagged(SceneTag::Player).is_some());
    }

    #[test]
    fn scene_sync_drops_despawned_objects() {
        let mut app = test_app();
        let lever = app
            .world_mut()
            .spawn((SceneName::new("lever"), ScenePosition::default()))
            .id();
        app.update();
        assert_eq!(app.world().resource::<SceneCache>().0.len(), 1);

        app.world_mut().entity_mut(lever).despawn();
        app.update();
        assert!(app.world().resource::<SceneCache>().0.is_empty());
    }

    #[test]
    fn episode_start_begins_engaging() {
        let mut app = test_app();
        app.world_mut()
            .spawn((SceneName::new("lever"), ScenePosition::new(4.0, 0.0, 0.0)));
        let character = app.world_mut().spawn(CharacterBody).id();
        let binding = app
            .world_mut()
            .spawn(IkBinding::new(
                character,
                BindingConfig::aim("lever", BodyPart::RightHand),
            ))
            .id();

        // Scene cache must be populated before the start lands.
        app.update();
        app.world_mut().write_message(EpisodeStart { binding });
        app.update();

        let binding_ref = app.world().get::<IkBinding>(binding).unwrap();
        assert_eq!(binding_ref.controller.phase(), BlendPhase::Engaging);
        let rails = app.world().resource::<Rails>();
        assert!(rails.0.is_active(character_id(character), BodyPart::RightHand));
    }

    #[test]
    fn unresolvable_target_disables_binding() {
        let mut app = test_app();
        let character = app.world_mut().spawn(CharacterBody).id();
        let binding = app
            .world_mut()
            .spawn(IkBinding::new(
                character,
                BindingConfig::aim("ghost", BodyPart::Head),
            ))
            .id();

        app.update();
        app.world_mut().write_message(EpisodeStart { binding });
        app.update();
        // A second start must be swallowed without panicking.
        app.world_mut().write_message(EpisodeStart { binding });
        app.update();

        let binding_ref = app.world().get::<IkBinding>(binding).unwrap();
        assert_eq!(binding_ref.controller.status(), ControllerStatus::Disabled);
    }

    #[test]
    fn start_for_missing_binding_is_harmless() {
        let mut app = test_app();
        let bogus = app.world_mut().spawn_empty().id();
        app.world_mut().entity_mut(bogus).despawn();
        app.world_mut().write_message(EpisodeStart { binding: bogus });
        app.update();
    }

    #[test]
    fn despawned_character_leaves_registry() {
        let mut app = test_app();
        let character = app.world_mut().spawn(CharacterBody).id();
        {
            let mut rails = app.world_mut().resource_mut::<Rails>();
            rails
                .0
                .set_rail_position(character_id(character), BodyPart::Head, Vector3::zeros());
        }
        assert_eq!(app.world().resource::<Rails>().0.len(), 1);

        app.world_mut().entity_mut(character).despawn();
        app.update();
        assert!(app.world().resource::<Rails>().0.is_empty());
    }
}
