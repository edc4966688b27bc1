//! Scene object lookup and target-name resolution.
//!
//! The controller resolves its target once per episode start through a
//! [`SceneLookup`]. Names are matched exactly, except for a small alias
//! table: `"player"`, `"player container"`, and `"player(clone)"` (any
//! case) all resolve to the object tagged [`SceneTag::Player`], falling
//! back to the object tagged [`SceneTag::MainCamera`] when no player is
//! present.

use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::types::ObjectHandle;

/// Target names that resolve to the player (or the camera as fallback)
/// rather than by exact name match. Compared case-insensitively.
pub const PLAYER_ALIASES: [&str; 3] = ["player", "player container", "player(clone)"];

// ---------------------------------------------------------------------------
// SceneTag
// ---------------------------------------------------------------------------

/// Well-known object roles the alias table can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneTag {
    Player,
    MainCamera,
}

// ---------------------------------------------------------------------------
// SceneLookup
// ---------------------------------------------------------------------------

/// World/scene query seam consumed by the blend controller.
///
/// Implementations answer name and tag lookups plus position sampling; the
/// alias rules live in the provided [`resolve_target`](Self::resolve_target)
/// so every implementation gets identical resolution behavior.
pub trait SceneLookup {
    /// Object with exactly this name, if any.
    fn find_named(&self, name: &str) -> Option<ObjectHandle>;

    /// First object carrying this tag, if any.
    fn find_tagged(&self, tag: SceneTag) -> Option<ObjectHandle>;

    /// Current world position of an object.
    fn world_position(&self, handle: ObjectHandle) -> Option<Vector3<f32>>;

    /// Resolve a configured target name, applying the player alias table.
    fn resolve_target(&self, name: &str) -> Option<ObjectHandle> {
        let lowered = name.to_lowercase();
        if PLAYER_ALIASES.contains(&lowered.as_str()) {
            self.find_tagged(SceneTag::Player)
                .or_else(|| self.find_tagged(SceneTag::MainCamera))
        } else {
            self.find_named(name)
        }
    }
}

// ---------------------------------------------------------------------------
// SceneObject
// ---------------------------------------------------------------------------

/// A named, optionally tagged, positioned object in a [`SceneIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub tag: Option<SceneTag>,
    pub position: Vector3<f32>,
}

impl SceneObject {
    /// An untagged object.
    pub fn named(name: impl Into<String>, position: Vector3<f32>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            position,
        }
    }

    /// A tagged object.
    pub fn tagged(name: impl Into<String>, tag: SceneTag, position: Vector3<f32>) -> Self {
        Self {
            name: name.into(),
            tag: Some(tag),
            position,
        }
    }
}

// ---------------------------------------------------------------------------
// SceneIndex
// ---------------------------------------------------------------------------

/// Default [`SceneLookup`] implementation: a flat handle→object map.
///
/// An ECS layer rebuilds or updates this from its own component queries;
/// tests and scripted scenarios populate it directly with
/// [`spawn`](Self::spawn).
#[derive(Debug, Clone, Default)]
pub struct SceneIndex {
    objects: HashMap<ObjectHandle, SceneObject>,
    next_handle: u64,
}

impl SceneIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object under a caller-chosen handle (ECS layers pack
    /// entity bits in here). Replaces any existing object at that handle.
    pub fn insert(&mut self, handle: ObjectHandle, object: SceneObject) {
        self.objects.insert(handle, object);
    }

    /// Insert an object under a fresh handle and return it.
    pub fn spawn(&mut self, object: SceneObject) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(handle, object);
        handle
    }

    /// Move an existing object. Returns `false` if the handle is unknown.
    pub fn set_position(&mut self, handle: ObjectHandle, position: Vector3<f32>) -> bool {
        match self.objects.get_mut(&handle) {
            Some(object) => {
                object.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove an object.
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SceneObject> {
        self.objects.remove(&handle)
    }

    /// Drop all objects, keeping handle allocation state.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneLookup for SceneIndex {
    fn find_named(&self, name: &str) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(handle, _)| *handle)
    }

    fn find_tagged(&self, tag: SceneTag) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .find(|(_, object)| object.tag == Some(tag))
            .map(|(handle, _)| *handle)
    }

    fn world_position(&self, handle: ObjectHandle) -> Option<Vector3<f32>> {
        self.objects.get(&handle).map(|object| object.position)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
