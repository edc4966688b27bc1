//! Buffered messages between the animation driver and the blend systems.

use bevy::prelude::*;

use aimrail_blend_core::types::IkDirective;

/// Fired by the animation driver when its state machine enters an
/// activation site. Consumed once per frame in
/// [`AimrailSet::Retarget`](aimrail_core::AimrailSet::Retarget).
#[derive(Message, Clone, Copy, Debug)]
pub struct EpisodeStart {
    /// The [`IkBinding`](crate::components::IkBinding) entity to start.
    pub binding: Entity,
}

/// One per ticking binding per frame: the directive to forward to the
/// skeleton solver for `character`.
#[derive(Message, Clone, Debug)]
pub struct IkCommand {
    /// The character entity the directive applies to.
    pub character: Entity,
    /// What the solver should do this tick.
    pub directive: IkDirective,
}
