//! Registry of independent viewer instances
//!
//! The manager owns every [`ViewerInstance`] keyed by caller-chosen id.
//! Instances never share state; two viewers with different ids can hold
//! different models with independent selections concurrently.

use crate::error::{Result, ViewerError};
use crate::instance::ViewerInstance;
use deskview_model::EngineRuntime;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// Debug snapshot of one registered viewer
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ViewerInfo {
    pub viewer_id: String,
    pub has_model: bool,
    pub is_loading: bool,
}

pub struct ViewerManager {
    runtime: Arc<dyn EngineRuntime>,
    viewers: FxHashMap<String, ViewerInstance>,
}

impl ViewerManager {
    pub fn new(runtime: Arc<dyn EngineRuntime>) -> Self {
        Self {
            runtime,
            viewers: FxHashMap::default(),
        }
    }

    /// Get or create the viewer registered under `id`
    ///
    /// Idempotent: calling again with an existing id returns the same live
    /// instance untouched.
    pub fn create_viewer(&mut self, id: &str) -> &mut ViewerInstance {
        match self.viewers.entry(id.to_string()) {
            Entry::Occupied(entry) => {
                debug!("[ViewerManager] Reusing existing viewer instance: {id}");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!("[ViewerManager] Creating viewer instance: {id}");
                entry.insert(ViewerInstance::new(id, Arc::clone(&self.runtime)))
            }
        }
    }

    pub fn get_viewer(&self, id: &str) -> Result<&ViewerInstance> {
        self.viewers
            .get(id)
            .ok_or_else(|| ViewerError::ViewerNotFound(id.to_string()))
    }

    pub fn get_viewer_mut(&mut self, id: &str) -> Result<&mut ViewerInstance> {
        self.viewers
            .get_mut(id)
            .ok_or_else(|| ViewerError::ViewerNotFound(id.to_string()))
    }

    pub fn has_viewer(&self, id: &str) -> bool {
        self.viewers.contains_key(id)
    }

    /// Registered viewer ids, sorted for stable output
    pub fn active_viewer_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.viewers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn active_viewers_count(&self) -> usize {
        self.viewers.len()
    }

    /// Snapshot of all registered viewers, sorted by id
    pub fn viewers_info(&self) -> Vec<ViewerInfo> {
        let mut info: Vec<ViewerInfo> = self
            .viewers
            .values()
            .map(|v| ViewerInfo {
                viewer_id: v.id().to_string(),
                has_model: v.has_model(),
                is_loading: v.is_loading(),
            })
            .collect();
        info.sort_by(|a, b| a.viewer_id.cmp(&b.viewer_id));
        info
    }

    /// Dispose and unregister one viewer; a no-op for unknown ids
    pub fn dispose_viewer(&mut self, id: &str) {
        match self.viewers.remove(id) {
            Some(mut viewer) => viewer.dispose(),
            None => warn!("[ViewerManager] dispose_viewer: no viewer registered as '{id}'"),
        }
    }

    /// Dispose and unregister every viewer
    pub fn dispose_all_viewers(&mut self) {
        debug!(
            "[ViewerManager] Disposing all {} viewer instance(s)",
            self.viewers.len()
        );
        for (_, mut viewer) in self.viewers.drain() {
            viewer.dispose();
        }
    }
}
