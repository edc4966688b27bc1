use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::BlendError;

// ---------------------------------------------------------------------------
// CharacterId / ObjectHandle
// ---------------------------------------------------------------------------

/// Stable identity of a character, used as the rail registry key.
///
/// Opaque to this crate; an ECS layer typically packs an entity id in here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// Handle to a scene object resolvable through [`SceneLookup`](crate::scene::SceneLookup).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObjectHandle(pub u64);

// ---------------------------------------------------------------------------
// BodyPart
// ---------------------------------------------------------------------------

/// Body part driven by a blend controller.
///
/// Discriminants are stable and index the per-character rail slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BodyPart {
    #[default]
    Head = 0,
    LeftHand = 1,
    RightHand = 2,
}

impl BodyPart {
    /// All parts, in discriminant order.
    pub const ALL: [Self; 3] = [Self::Head, Self::LeftHand, Self::RightHand];

    /// Rail slot index for this part.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this part is driven by a hand IK goal (as opposed to look-at).
    #[must_use]
    pub const fn is_hand(self) -> bool {
        matches!(self, Self::LeftHand | Self::RightHand)
    }
}

impl TryFrom<u8> for BodyPart {
    type Error = BlendError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Head),
            1 => Ok(Self::LeftHand),
            2 => Ok(Self::RightHand),
            other => Err(BlendError::UnknownBodyPart(other)),
        }
    }
}

impl FromStr for BodyPart {
    type Err = BlendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(Self::Head),
            "left_hand" => Ok(Self::LeftHand),
            "right_hand" => Ok(Self::RightHand),
            other => Err(BlendError::UnknownBodyPartName(other.to_owned())),
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Head => "head",
            Self::LeftHand => "left_hand",
            Self::RightHand => "right_hand",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// LookAtWeights
// ---------------------------------------------------------------------------

/// Weight split for a head look-at command.
///
/// The body/head/eyes ratios are fixed; only the lead `weight` scalar is
/// animated by the blend ramp. `clamp` limits how far the look-at may turn
/// the head away from its animated pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAtWeights {
    pub weight: f32,
    pub body: f32,
    pub head: f32,
    pub eyes: f32,
    pub clamp: f32,
}

impl LookAtWeights {
    /// Full influence while the rail itself is being re-targeted.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            weight: 1.0,
            body: 0.0,
            head: 1.0,
            eyes: 1.0,
            clamp: 0.5,
        }
    }

    /// Ramping up from the animated pose toward the rail.
    #[must_use]
    pub const fn ramp(weight: f32) -> Self {
        Self {
            weight,
            body: 0.0,
            head: 1.0,
            eyes: 1.0,
            clamp: 0.5,
        }
    }

    /// Ramping back down to the animated pose; the wider clamp lets the
    /// release start from wherever the head ended up.
    #[must_use]
    pub const fn release(weight: f32) -> Self {
        Self {
            weight,
            body: 0.0,
            head: 1.0,
            eyes: 1.0,
            clamp: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// IkDirective
// ---------------------------------------------------------------------------

/// One tick's pose command toward the external skeleton solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IkDirective {
    /// Head look-at: aim the head at `position` with the given weight split.
    LookAt {
        position: Vector3<f32>,
        weights: LookAtWeights,
    },
    /// Hand goal: place the hand effector at `position` with `weight`
    /// influence over the animated pose.
    Goal {
        part: BodyPart,
        position: Vector3<f32>,
        weight: f32,
    },
}

impl IkDirective {
    /// The commanded position, regardless of variant.
    #[must_use]
    pub const fn position(&self) -> Vector3<f32> {
        match self {
            Self::LookAt { position, .. } | Self::Goal { position, .. } => *position,
        }
    }

    /// The animated influence scalar (the look-at lead weight for heads).
    #[must_use]
    pub const fn weight(&self) -> f32 {
        match self {
            Self::LookAt { weights, .. } => weights.weight,
            Self::Goal { weight, .. } => *weight,
        }
    }

    /// The body part this directive drives.
    #[must_use]
    pub const fn part(&self) -> BodyPart {
        match self {
            Self::LookAt { .. } => BodyPart::Head,
            Self::Goal { part, .. } => *part,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
