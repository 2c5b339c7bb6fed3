//! Selection, hover, and pick handling
//!
//! At most one element is highlighted per viewer. Every reassignment clears
//! the previous visual first, the camera frames the new selection, and the
//! marker layer is kept in sync. Hover runs on a separate layer guarded by
//! a monotonic ticket so late samples from stale cursor positions are
//! dropped instead of sticking.

use crate::instance::ViewerInstance;
use deskview_model::{ElementRef, LocalId, ModelIdMap};
use log::{debug, warn};

impl ViewerInstance {
    /// Highlight the single element the map implies
    ///
    /// An empty map clears instead. Re-selecting the already highlighted
    /// element is a no-op: no visual churn, no camera movement.
    pub fn highlight_set(&mut self, map: &ModelIdMap) {
        let Some(target) = map.as_singleton() else {
            self.highlight_clear();
            return;
        };
        if self.selection.highlighted.as_ref() == Some(&target) {
            debug!("[Viewer {}] Element already highlighted: {}", self.id(), target.local_id);
            return;
        }
        let Some(highlighter) = self.core.highlighter.clone() else {
            warn!("[Viewer {}] Highlighter not initialized", self.id());
            return;
        };

        // Clear the old visual before the record moves on, so a failure
        // can never leave two elements lit
        if let Err(e) = highlighter.clear_highlight() {
            warn!("[Viewer {}] Error clearing highlight: {e}", self.id());
        }
        self.selection.highlighted = Some(target);
        if let Err(e) = highlighter.apply_highlight(map) {
            warn!("[Viewer {}] Error applying highlight: {e}", self.id());
        }

        // Camera framing is best effort; a failed animation must not undo
        // the selection
        if let Some(world) = &self.core.world {
            if let Err(e) = world.camera().fit_to_items(map) {
                warn!("[Viewer {}] Error fitting camera to selection: {e}", self.id());
            }
        }
        self.sync_marker_selection();
    }

    /// Drop the highlight, visually and in state
    pub fn highlight_clear(&mut self) {
        if let Some(highlighter) = &self.core.highlighter {
            if let Err(e) = highlighter.clear_highlight() {
                warn!("[Viewer {}] Error clearing highlight: {e}", self.id());
            }
        }
        self.selection.highlighted = None;
        self.sync_marker_selection();
    }

    /// Take a ticket for a hover sample about to be resolved
    ///
    /// The matching [`Self::complete_hover_sample`] is only honored while
    /// its ticket is still the newest one.
    pub fn begin_hover_sample(&mut self) -> u64 {
        self.selection.hover_seq += 1;
        self.selection.hover_seq
    }

    /// Resolve a hover sample; stale tickets are dropped
    pub fn complete_hover_sample(&mut self, ticket: u64, hit: Option<ElementRef>) {
        if ticket != self.selection.hover_seq {
            debug!("[Viewer {}] Dropping stale hover sample {ticket}", self.id());
            return;
        }
        if self.selection.hovered == hit {
            return;
        }
        if let Some(highlighter) = &self.core.highlighter {
            if let Err(e) = highlighter.clear_hover() {
                warn!("[Viewer {}] Error clearing hover: {e}", self.id());
            }
            if let Some(element) = &hit {
                let map = ModelIdMap::singleton(element.model_id.clone(), element.local_id);
                if let Err(e) = highlighter.apply_hover(&map) {
                    warn!("[Viewer {}] Error applying hover: {e}", self.id());
                }
            }
        }
        self.selection.hovered = hit;
    }

    /// Clear the hover layer and invalidate any in-flight sample
    pub fn hover_clear(&mut self) {
        self.selection.hover_seq += 1;
        if let Some(highlighter) = &self.core.highlighter {
            if let Err(e) = highlighter.clear_hover() {
                warn!("[Viewer {}] Error clearing hover: {e}", self.id());
            }
        }
        self.selection.hovered = None;
    }

    /// Resolve a double-click at screen coordinates into a selection change
    ///
    /// Empty space clears the selection; a hit on a non-workplace element
    /// clears too, so double-clicking a wall deselects.
    pub fn handle_double_click(&mut self, x: f64, y: f64) {
        let Some(world) = self.core.world.clone() else {
            warn!("[Viewer {}] Double-click before core init ignored", self.id());
            return;
        };
        match world.raycaster().cast(x, y) {
            Ok(Some(hit)) => self.select_workplace_by_id(hit.target.local_id),
            Ok(None) => self.highlight_clear(),
            Err(e) => warn!("[Viewer {}] Raycast failed: {e}", self.id()),
        }
    }

    /// Select the workplace with the given element id
    ///
    /// Ids that do not belong to a workplace card clear the selection
    /// instead; without a loaded model this is a no-op.
    pub fn select_workplace_by_id(&mut self, local_id: LocalId) {
        let Some(model) = &self.model.model else {
            return;
        };
        let is_workplace = self.workplaces.cards.iter().any(|c| c.local_id == local_id);
        if !is_workplace {
            self.highlight_clear();
            return;
        }
        let map = ModelIdMap::singleton(model.model_id().clone(), local_id);
        self.highlight_set(&map);
    }

    /// Honor a deep-link employee id once, after cards are loaded
    ///
    /// The pending id is consumed whether or not it resolves, so later
    /// reloads never re-trigger the selection.
    pub fn select_workplace_from_route(&mut self, directory: &crate::EmployeeDirectory) {
        let Some(employee_id) = self.route_employee_id.take() else {
            return;
        };
        let Some(employee) = directory.get_employee_by_id(&employee_id) else {
            debug!("[Viewer {}] Route employee '{employee_id}' not found", self.id());
            return;
        };
        let Some(number) = employee.workplace_number.as_deref() else {
            return;
        };
        let Some(card) = self
            .workplaces
            .cards
            .iter()
            .find(|c| c.workplace_number == number)
        else {
            debug!(
                "[Viewer {}] Route employee '{employee_id}' has no workplace card",
                self.id()
            );
            return;
        };
        let local_id = card.local_id;
        self.select_workplace_by_id(local_id);
    }
}
