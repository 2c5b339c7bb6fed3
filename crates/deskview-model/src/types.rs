// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core identifier types shared between the viewer core and engine adapters

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Type-safe per-model element identifier
///
/// A `LocalId` is unique within one loaded model, distinct from any global
/// IFC identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default)]
pub struct LocalId(pub u32);

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for LocalId {
    fn from(id: u32) -> Self {
        LocalId(id)
    }
}

impl From<LocalId> for u32 {
    fn from(id: LocalId) -> Self {
        id.0
    }
}

/// Opaque identifier of one loaded model within an engine
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default)]
pub struct ModelId(pub String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        ModelId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        ModelId(id.to_string())
    }
}

/// A fully qualified reference to one element of one model
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ElementRef {
    pub model_id: ModelId,
    pub local_id: LocalId,
}

impl ElementRef {
    pub fn new(model_id: impl Into<ModelId>, local_id: impl Into<LocalId>) -> Self {
        Self {
            model_id: model_id.into(),
            local_id: local_id.into(),
        }
    }
}

/// Selection map: model id to the set of selected element ids
///
/// Ordered containers keep singleton extraction deterministic.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct ModelIdMap(pub BTreeMap<ModelId, BTreeSet<LocalId>>);

impl ModelIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map holding exactly one element
    pub fn singleton(model_id: ModelId, local_id: LocalId) -> Self {
        let mut ids = BTreeSet::new();
        ids.insert(local_id);
        let mut map = BTreeMap::new();
        map.insert(model_id, ids);
        ModelIdMap(map)
    }

    /// The single element this map implies, if any
    ///
    /// The viewer always operates on singleton selections; for maps carrying
    /// more than one element this returns the first in model-id/local-id order.
    pub fn as_singleton(&self) -> Option<ElementRef> {
        let (model_id, ids) = self.0.iter().next()?;
        let local_id = ids.iter().next()?;
        Some(ElementRef {
            model_id: model_id.clone(),
            local_id: *local_id,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|ids| ids.is_empty())
    }

    /// Total number of elements across all models
    pub fn len(&self) -> usize {
        self.0.values().map(|ids| ids.len()).sum()
    }

    pub fn insert(&mut self, model_id: ModelId, local_id: LocalId) {
        self.0.entry(model_id).or_default().insert(local_id);
    }
}

/// Handle to the host UI container an engine world renders into
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ContainerHandle(pub String);

impl ContainerHandle {
    pub fn new(id: impl Into<String>) -> Self {
        ContainerHandle(id.into())
    }

    /// An empty handle is the "falsy container" failure of viewer bootstrap
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Revocable local URL of the materialized background-worker script
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WorkerUrl(pub String);

impl WorkerUrl {
    pub fn new(url: impl Into<String>) -> Self {
        WorkerUrl(url.into())
    }
}

impl fmt::Display for WorkerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one 2D overlay element owned by an [`crate::OverlayScene`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

/// Fixed IFC type-name pattern used for category queries
///
/// Categories are matched by substring against upper-cased IFC type names,
/// mirroring the fixed patterns the import engine accepts.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CategoryPattern(pub String);

impl CategoryPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        CategoryPattern(pattern.into())
    }

    pub fn matches(&self, category: &str) -> bool {
        category.to_ascii_uppercase().contains(&self.0)
    }
}

/// Building storeys category pattern
pub const BUILDING_STOREY_PATTERN: &str = "IFCBUILDINGSTOREY";

/// Furnishing elements (workplace/desk) category pattern
pub const FURNISHING_ELEMENT_PATTERN: &str = "IFCFURNISHINGELEMENT";
