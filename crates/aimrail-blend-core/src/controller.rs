//! Per-(character, part) blend controller.
//!
//! One [`BlendController`] instance drives one activation episode of one
//! body part. The external animation driver calls
//! [`begin_episode`](BlendController::begin_episode) when its state machine
//! enters the activation site and [`tick`](BlendController::tick) every
//! simulation step; a transition away is modeled implicitly by the next
//! episode start flipping the registry flags.
//!
//! # Phases
//!
//! The phase is decided once at episode start from the requested on/off flag
//! and the registry's prior flag, then drives every tick:
//!
//! | requested | was active | phase        | behavior                          |
//! |-----------|------------|--------------|-----------------------------------|
//! | off       | no         | Idle         | emit nothing                      |
//! | off       | yes        | Disengaging  | weight 1→0 at the last rail pos   |
//! | on        | no         | Engaging     | rail snapped once, weight 0→1     |
//! | on        | yes        | Engaged      | full weight, rail lerps to target |

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::BlendError;
use crate::ramp::{weight_step, DEFAULT_SPEED};
use crate::registry::RailRegistry;
use crate::scene::SceneLookup;
use crate::types::{BodyPart, CharacterId, IkDirective, LookAtWeights, ObjectHandle};

// ---------------------------------------------------------------------------
// BindingConfig
// ---------------------------------------------------------------------------

const fn default_speed() -> f32 {
    DEFAULT_SPEED
}
const fn default_offset() -> [f32; 3] {
    [0.0; 3]
}

/// Configuration for one activation site: which part aims where, how fast,
/// and whether the target is re-sampled every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Scene name of the target object (alias rules apply, see
    /// [`SceneLookup::resolve_target`]). Ignored when `activate` is false.
    #[serde(default)]
    pub target: String,

    /// Body part this binding drives.
    #[serde(default)]
    pub body_part: BodyPart,

    /// Whether this episode turns IK on (aim) or off (release).
    #[serde(default)]
    pub activate: bool,

    /// World-space offset added to the target position.
    #[serde(default = "default_offset")]
    pub offset: [f32; 3],

    /// Ramp speed: 10 is a one-second full ramp, 1 a ten-second ramp.
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Re-sample the target's position every tick instead of freezing it at
    /// episode start.
    #[serde(default)]
    pub continuous_track: bool,

    /// Clamp the blend weight at 1 in the up-ramp branches. Off by default:
    /// the legacy behavior lets the weight (and hence the re-target lerp
    /// fraction) run past 1.
    #[serde(default)]
    pub clamp_weight: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            body_part: BodyPart::Head,
            activate: false,
            offset: default_offset(),
            speed: default_speed(),
            continuous_track: false,
            clamp_weight: false,
        }
    }
}

impl BindingConfig {
    /// An activation binding: aim `body_part` at the object named `target`.
    pub fn aim(target: impl Into<String>, body_part: BodyPart) -> Self {
        Self {
            target: target.into(),
            body_part,
            activate: true,
            ..Self::default()
        }
    }

    /// A release binding: return `body_part` to its animated pose.
    #[must_use]
    pub fn release(body_part: BodyPart) -> Self {
        Self {
            body_part,
            activate: false,
            ..Self::default()
        }
    }

    /// Builder: set the world-space offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: [f32; 3]) -> Self {
        self.offset = offset;
        self
    }

    /// Builder: set the ramp speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: enable continuous target tracking.
    #[must_use]
    pub const fn with_tracking(mut self, continuous_track: bool) -> Self {
        self.continuous_track = continuous_track;
        self
    }

    /// Builder: clamp the weight at 1 instead of the legacy overshoot.
    #[must_use]
    pub const fn with_clamp(mut self, clamp_weight: bool) -> Self {
        self.clamp_weight = clamp_weight;
        self
    }

    /// The offset as a vector.
    #[must_use]
    pub fn offset_vec(&self) -> Vector3<f32> {
        Vector3::new(self.offset[0], self.offset[1], self.offset[2])
    }
}

// ---------------------------------------------------------------------------
// BlendPhase / ControllerStatus
// ---------------------------------------------------------------------------

/// Blend state, fixed at episode start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendPhase {
    /// Not requesting IK and nothing was in flight.
    #[default]
    Idle,
    /// Weight rising toward 1 at a rail snapped to the target.
    Engaging,
    /// Weight held at 1 while the rail lerps toward the new target.
    Engaged,
    /// Weight falling toward 0 at the rail's last position.
    Disengaging,
}

impl BlendPhase {
    /// Phase for an episode given the requested flag and the registry's
    /// prior flag.
    #[must_use]
    pub const fn from_entry(requested_on: bool, was_active: bool) -> Self {
        match (requested_on, was_active) {
            (false, false) => Self::Idle,
            (false, true) => Self::Disengaging,
            (true, false) => Self::Engaging,
            (true, true) => Self::Engaged,
        }
    }
}

/// Whether the controller will accept episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControllerStatus {
    #[default]
    Ready,
    /// A configuration failure (unresolvable target name) shut this
    /// instance down. Terminal until [`BlendController::reset`].
    Disabled,
}

// ---------------------------------------------------------------------------
// BlendController
// ---------------------------------------------------------------------------

/// The per-episode IK blend state machine.
#[derive(Debug, Clone)]
pub struct BlendController {
    config: BindingConfig,
    status: ControllerStatus,
    phase: BlendPhase,
    character: Option<CharacterId>,
    target_handle: Option<ObjectHandle>,
    target_position: Vector3<f32>,
    start_rail_position: Vector3<f32>,
    weight: f32,
}

impl BlendController {
    /// Create a controller for a binding. No registry or scene access
    /// happens until the first episode start.
    #[must_use]
    pub fn new(config: BindingConfig) -> Self {
        Self {
            config,
            status: ControllerStatus::Ready,
            phase: BlendPhase::Idle,
            character: None,
            target_handle: None,
            target_position: Vector3::zeros(),
            start_rail_position: Vector3::zeros(),
            weight: 0.0,
        }
    }

    /// Begin an activation episode for `character`.
    ///
    /// Resolves the target (when activating), flips the registry's active
    /// flag unconditionally, and snaps or snapshots the rail so the first
    /// tick blends from the right place.
    ///
    /// # Errors
    ///
    /// - [`BlendError::TargetNotFound`] if the configured name resolves to
    ///   nothing; the controller disables itself permanently.
    /// - [`BlendError::Disabled`] if a previous failure already disabled
    ///   this instance. No logging or side effects; callers decide whether
    ///   to [`reset`](Self::reset) and retry.
    pub fn begin_episode(
        &mut self,
        character: CharacterId,
        registry: &mut RailRegistry,
        scene: &impl SceneLookup,
    ) -> Result<(), BlendError> {
        if self.status == ControllerStatus::Disabled {
            return Err(BlendError::Disabled);
        }

        if self.config.activate {
            let Some(handle) = scene.resolve_target(&self.config.target) else {
                self.status = ControllerStatus::Disabled;
                return Err(BlendError::TargetNotFound {
                    name: self.config.target.clone(),
                });
            };
            let Some(position) = scene.world_position(handle) else {
                self.status = ControllerStatus::Disabled;
                return Err(BlendError::TargetNotFound {
                    name: self.config.target.clone(),
                });
            };
            self.target_handle = Some(handle);
            self.target_position = position + self.config.offset_vec();
        }

        let part = self.config.body_part;
        let was_active = registry.is_active(character, part);
        registry.set_active(character, part, self.config.activate);

        if was_active {
            // A previous episode left a live rail; blend away from it.
            self.start_rail_position = registry.rail_position(character, part);
        } else if self.config.activate {
            // Nothing in flight: the rail appears at the target and only
            // the weight ramps.
            registry.set_rail_position(character, part, self.target_position);
        }

        self.weight = if self.config.activate { 0.0 } else { 1.0 };
        self.phase = BlendPhase::from_entry(self.config.activate, was_active);
        self.character = Some(character);
        Ok(())
    }

    /// Advance one simulation step of `dt` seconds.
    ///
    /// Returns the IK directive to forward to the skeleton solver, or
    /// `None` when this tick commands nothing (idle, disabled, not yet
    /// started, or a finished disengage).
    pub fn tick(
        &mut self,
        dt: f32,
        registry: &mut RailRegistry,
        scene: &impl SceneLookup,
    ) -> Option<IkDirective> {
        if self.status == ControllerStatus::Disabled {
            return None;
        }
        let character = self.character?;
        let part = self.config.body_part;

        if self.config.continuous_track {
            if let Some(handle) = self.target_handle {
                if let Some(position) = scene.world_position(handle) {
                    self.target_position = position + self.config.offset_vec();
                }
            }
        }

        let step = weight_step(dt, self.config.speed);

        match self.phase {
            BlendPhase::Idle => None,
            BlendPhase::Disengaging => {
                // Short-circuit before decrementing: the final emitted
                // weight may dip just below zero, after which the episode
                // goes quiet.
                if self.weight <= 0.0 {
                    return None;
                }
                self.weight -= step;
                let position = registry.rail_position(character, part);
                Some(self.release_directive(position))
            }
            BlendPhase::Engaged => {
                self.weight += step;
                if self.config.clamp_weight {
                    self.weight = self.weight.min(1.0);
                }
                // The weight doubles as the lerp fraction here; without the
                // clamp flag the rail overshoots past the target exactly as
                // the legacy system did.
                let position = self
                    .start_rail_position
                    .lerp(&self.target_position, self.weight);
                registry.set_rail_position(character, part, position);
                Some(self.full_directive(position))
            }
            BlendPhase::Engaging => {
                self.weight += step;
                if self.config.clamp_weight {
                    self.weight = self.weight.min(1.0);
                }
                let position = registry.rail_position(character, part);
                Some(self.ramp_directive(position))
            }
        }
    }

    /// Clear a `Disabled` status (and all episode state) so the driver can
    /// retry after fixing the scene or the config.
    pub fn reset(&mut self) {
        self.status = ControllerStatus::Ready;
        self.phase = BlendPhase::Idle;
        self.character = None;
        self.target_handle = None;
        self.target_position = Vector3::zeros();
        self.start_rail_position = Vector3::zeros();
        self.weight = 0.0;
    }

    fn full_directive(&self, position: Vector3<f32>) -> IkDirective {
        if self.config.body_part.is_hand() {
            IkDirective::Goal {
                part: self.config.body_part,
                position,
                weight: 1.0,
            }
        } else {
            IkDirective::LookAt {
                position,
                weights: LookAtWeights::full(),
            }
        }
    }

    fn ramp_directive(&self, position: Vector3<f32>) -> IkDirective {
        if self.config.body_part.is_hand() {
            IkDirective::Goal {
                part: self.config.body_part,
                position,
                weight: self.weight,
            }
        } else {
            IkDirective::LookAt {
                position,
                weights: LookAtWeights::ramp(self.weight),
            }
        }
    }

    fn release_directive(&self, position: Vector3<f32>) -> IkDirective {
        if self.config.body_part.is_hand() {
            IkDirective::Goal {
                part: self.config.body_part,
                position,
                weight: self.weight,
            }
        } else {
            IkDirective::LookAt {
                position,
                weights: LookAtWeights::release(self.weight),
            }
        }
    }

    // -- accessors --

    /// The binding configuration.
    #[must_use]
    pub const fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Current blend weight.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> BlendPhase {
        self.phase
    }

    /// Ready or disabled.
    #[must_use]
    pub const fn status(&self) -> ControllerStatus {
        self.status
    }

    /// The character bound at the last episode start.
    #[must_use]
    pub const fn character(&self) -> Option<CharacterId> {
        self.character
    }

    /// The target position captured at episode start (or the latest
    /// continuous-tracking sample).
    #[must_use]
    pub const fn target_position(&self) -> Vector3<f32> {
        self.target_position
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
