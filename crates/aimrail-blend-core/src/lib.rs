//! Engine-agnostic IK aim-rail blending for animated characters.
//!
//! Pure Rust library with no game engine dependencies. A character's tracked
//! body part (head or hand) never aims at a logical target directly; it aims
//! at a synthetic movable point — a *rail* — stored per (character, part) in
//! a [`RailRegistry`]. When an activation episode begins, the rail either
//! snaps to the new target (nothing was in flight) or lerps over from its
//! current position (a previous target was live), so successive targets hand
//! over without discontinuities.
//!
//! # Pipeline
//!
//! ```text
//! begin_episode ──► RailRegistry (flag flip, rail snap/snapshot)
//! tick(dt)      ──► weight ramp ──► rail lerp ──► IkDirective
//! ```
//!
//! # Quick Start
//!
//! ```
//! use aimrail_blend_core::prelude::*;
//! use nalgebra::Vector3;
//!
//! let mut registry = RailRegistry::new();
//! let mut scene = SceneIndex::new();
//! scene.spawn(SceneObject::named("lever", Vector3::new(2.0, 1.0, 0.0)));
//!
//! let config = BindingConfig::aim("lever", BodyPart::RightHand);
//! let mut controller = BlendController::new(config);
//! controller
//!     .begin_episode(CharacterId(1), &mut registry, &scene)
//!     .unwrap();
//!
//! let dt = 1.0 / 60.0;
//! if let Some(directive) = controller.tick(dt, &mut registry, &scene) {
//!     // forward to the skeleton solver
//!     let _ = directive;
//! }
//! ```

pub mod controller;
pub mod error;
pub mod ramp;
pub mod registry;
pub mod scene;
pub mod types;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::controller::{BindingConfig, BlendController, BlendPhase, ControllerStatus};
    pub use crate::error::BlendError;
    pub use crate::ramp::{weight_step, RAMP_DIVISOR};
    pub use crate::registry::{RailRegistry, RailSet};
    pub use crate::scene::{SceneIndex, SceneLookup, SceneObject, SceneTag};
    pub use crate::types::{BodyPart, CharacterId, IkDirective, LookAtWeights, ObjectHandle};
}
