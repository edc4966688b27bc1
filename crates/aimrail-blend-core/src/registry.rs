//! Per-character rail storage shared across controller episodes.
//!
//! A [`RailSet`] is the durable "where is this part currently aiming" memory
//! for one character: up to three rail positions (head, left hand, right
//! hand) and their active flags. Controller instances are transient — one
//! per activation episode — but they all read and write the same rail slot,
//! which is what lets a new episode blend away from whatever the previous
//! one was doing.
//!
//! The registry is a plain value owned by the caller. There is no interior
//! mutability and no locking: the driving state machine guarantees a single
//! writer per (character, part) slot per tick, and multi-threaded character
//! simulation would need to partition the registry by character first.

use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::types::{BodyPart, CharacterId};

// ---------------------------------------------------------------------------
// RailSet
// ---------------------------------------------------------------------------

/// One character's rails: a position slot and an active flag per body part.
///
/// Rail slots start unset; the first read snaps them to the origin, matching
/// a freshly spawned rail object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RailSet {
    rails: [Option<Vector3<f32>>; 3],
    active: [bool; 3],
}

impl RailSet {
    /// An empty rail set: no slots created, all parts inactive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rail position for `part`, creating the slot at the origin if it
    /// does not exist yet.
    pub fn rail_position(&mut self, part: BodyPart) -> Vector3<f32> {
        *self.rails[part.index()].get_or_insert_with(Vector3::zeros)
    }

    /// Move the rail for `part`, creating the slot if needed.
    pub fn set_rail_position(&mut self, part: BodyPart, position: Vector3<f32>) {
        self.rails[part.index()] = Some(position);
    }

    /// Whether IK is currently commanded on for `part`.
    #[must_use]
    pub const fn is_active(&self, part: BodyPart) -> bool {
        self.active[part.index()]
    }

    /// Set the active flag for `part`.
    pub fn set_active(&mut self, part: BodyPart, active: bool) {
        self.active[part.index()] = active;
    }

    /// Whether the rail slot for `part` has been created.
    #[must_use]
    pub const fn has_rail(&self, part: BodyPart) -> bool {
        self.rails[part.index()].is_some()
    }
}

// ---------------------------------------------------------------------------
// RailRegistry
// ---------------------------------------------------------------------------

/// Mapping from character identity to that character's [`RailSet`].
///
/// Entries are created lazily on first use and persist until the caller
/// evicts them with [`remove`](Self::remove) — typically when the character
/// despawns. Absence is never an error.
#[derive(Debug, Clone, Default)]
pub struct RailRegistry {
    sets: HashMap<CharacterId, RailSet>,
}

impl RailRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The rail set for `character`, created empty if absent.
    pub fn get_or_create(&mut self, character: CharacterId) -> &mut RailSet {
        self.sets.entry(character).or_default()
    }

    /// Read-only access to a character's rail set, if it exists.
    #[must_use]
    pub fn get(&self, character: CharacterId) -> Option<&RailSet> {
        self.sets.get(&character)
    }

    /// The rail position for (`character`, `part`), creating the entry and
    /// slot as needed.
    pub fn rail_position(&mut self, character: CharacterId, part: BodyPart) -> Vector3<f32> {
        self.get_or_create(character).rail_position(part)
    }

    /// Move the rail for (`character`, `part`).
    pub fn set_rail_position(
        &mut self,
        character: CharacterId,
        part: BodyPart,
        position: Vector3<f32>,
    ) {
        self.get_or_create(character).set_rail_position(part, position);
    }

    /// Whether IK is active for (`character`, `part`). A missing entry
    /// reads as inactive.
    #[must_use]
    pub fn is_active(&self, character: CharacterId, part: BodyPart) -> bool {
        self.sets
            .get(&character)
            .is_some_and(|set| set.is_active(part))
    }

    /// Set the active flag for (`character`, `part`), creating the entry if
    /// needed.
    pub fn set_active(&mut self, character: CharacterId, part: BodyPart, active: bool) {
        self.get_or_create(character).set_active(part, active);
    }

    /// Evict a character's rails. Call when the character is destroyed so
    /// the registry does not accumulate stale entries.
    pub fn remove(&mut self, character: CharacterId) -> Option<RailSet> {
        self.sets.remove(&character)
    }

    /// Number of characters with rail sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the registry holds no rail sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const NPC: CharacterId = CharacterId(7);

    #[test]
    fn rail_set_starts_empty_and_inactive() {
        let set = RailSet::new();
        for part in BodyPart::ALL {
            assert!(!set.is_active(part));
            assert!(!set.has_rail(part));
        }
    }

    #[test]
    fn rail_slot_created_at_origin_on_first_read() {
        let mut set = RailSet::new();
        let pos = set.rail_position(BodyPart::Head);
        assert!(pos.norm() < f32::EPSILON);
        assert!(set.has_rail(BodyPart::Head));
        // Other slots untouched.
        assert!(!set.has_rail(BodyPart::LeftHand));
    }

    #[test]
    fn rail_position_persists_across_reads() {
        let mut set = RailSet::new();
        set.set_rail_position(BodyPart::LeftHand, Vector3::new(1.0, 2.0, 3.0));
        let pos = set.rail_position(BodyPart::LeftHand);
        assert!((pos - Vector3::new(1.0, 2.0, 3.0)).norm() < f32::EPSILON);
    }

    #[test]
    fn active_flags_are_per_part() {
        let mut set = RailSet::new();
        set.set_active(BodyPart::RightHand, true);
        assert!(set.is_active(BodyPart::RightHand));
        assert!(!set.is_active(BodyPart::Head));
        assert!(!set.is_active(BodyPart::LeftHand));
    }

    #[test]
    fn registry_creates_lazily() {
        let mut registry = RailRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(NPC).is_none());

        let _ = registry.rail_position(NPC, BodyPart::Head);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(NPC).is_some());
    }

    #[test]
    fn missing_entry_reads_inactive() {
        let registry = RailRegistry::new();
        assert!(!registry.is_active(NPC, BodyPart::Head));
    }

    #[test]
    fn characters_are_independent() {
        let mut registry = RailRegistry::new();
        let other = CharacterId(8);
        registry.set_rail_position(NPC, BodyPart::Head, Vector3::new(5.0, 0.0, 0.0));
        registry.set_active(NPC, BodyPart::Head, true);

        assert!(!registry.is_active(other, BodyPart::Head));
        let pos = registry.rail_position(other, BodyPart::Head);
        assert!(pos.norm() < f32::EPSILON);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_evicts_character() {
        let mut registry = RailRegistry::new();
        registry.set_active(NPC, BodyPart::LeftHand, true);
        let evicted = registry.remove(NPC).unwrap();
        assert!(evicted.is_active(BodyPart::LeftHand));
        assert!(registry.is_empty());
        // Removing again is a no-op.
        assert!(registry.remove(NPC).is_none());
    }

    #[test]
    fn serde_roundtrip_rail_set() {
        let mut set = RailSet::new();
        set.set_rail_position(BodyPart::Head, Vector3::new(1.0, 2.0, 3.0));
        set.set_active(BodyPart::Head, true);
        let json = serde_json::to_string(&set).unwrap();
        let back: RailSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
