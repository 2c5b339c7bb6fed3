//! Building-storey extraction
//!
//! Levels are loaded once per model and sorted ascending by elevation with a
//! stable sort, so equal elevations keep their extraction order. A failed
//! load recovers to an empty list; level extraction never takes the viewer
//! down.

use crate::data_access;
use crate::instance::ViewerInstance;
use deskview_model::ModelId;
use log::{debug, error};
use std::cmp::Ordering;

impl ViewerInstance {
    /// Extract and store the storeys of the given model
    pub fn load_levels(&mut self, model_id: &ModelId) {
        self.levels.is_loading = true;
        self.levels.data.clear();

        let result = self
            .model_by_id(model_id)
            .map(std::sync::Arc::clone)
            .and_then(|model| data_access::fetch_levels(model.as_ref()));
        match result {
            Ok(mut levels) => {
                levels.sort_by(|a, b| {
                    a.elevation.partial_cmp(&b.elevation).unwrap_or(Ordering::Equal)
                });
                debug!("[Viewer {}] Loaded {} level(s)", self.id(), levels.len());
                self.levels.data = levels;
            }
            Err(e) => {
                error!("[Viewer {}] Error loading levels: {e}", self.id());
                self.levels.data = Vec::new();
            }
        }
        self.levels.is_loading = false;
    }

    pub fn clear_levels(&mut self) {
        self.levels.clear();
    }
}
