//! 3D workplace marker lifecycle
//!
//! Markers are 2D overlays anchored above each workplace element. The set is
//! rebuilt in full whenever the card data changes; filter changes only flip
//! visibility flags on existing markers. Marker clicks arrive through an
//! explicit per-instance queue that the embedding layer pumps, keeping the
//! overlay UI decoupled from selection.

use crate::error::{Result, ViewerError};
use crate::instance::ViewerInstance;
use deskview_model::{FragmentModel, LocalId, ModelIdMap, Point3};
use log::{debug, error, warn};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Vertical offset lifting marker anchors above the element's center
pub const MARKER_ANCHOR_LIFT: f64 = 0.5;

/// One live overlay marker
#[derive(Clone, PartialEq, Debug)]
pub struct MarkerObject {
    pub workplace_id: LocalId,
    pub overlay: deskview_model::OverlayId,
    pub anchor: Point3,
    pub visible: bool,
}

/// Marker channel state owned by one instance
#[derive(Default)]
pub(crate) struct MarkerSet {
    pub ready: bool,
    pub objects: Vec<MarkerObject>,
    /// Clicked workplace ids waiting to be pumped into selection
    pub pending_select: VecDeque<LocalId>,
}

impl ViewerInstance {
    /// Open the marker channel; requires the scene core
    pub fn init_markers(&mut self) -> Result<()> {
        if !self.core.is_initialized() {
            return Err(ViewerError::CoreNotInitialized);
        }
        self.markers.ready = true;
        self.markers.pending_select.clear();
        Ok(())
    }

    /// Rebuild all markers from the current workplace cards
    ///
    /// Always starts by removing existing markers. Cards whose element
    /// center cannot be resolved are skipped with a warning; the rest of
    /// the batch still gets markers.
    pub fn create_markers_for_workplaces(&mut self) {
        let Some(world) = self.core.world.clone() else {
            error!("[Viewer {}] Cannot create markers: world not initialized", self.id());
            return;
        };
        self.clear_all_markers();
        let Some(model) = self.model.model.clone() else {
            warn!("[Viewer {}] Cannot create markers: no model loaded", self.id());
            return;
        };

        let cards = self.workplaces.cards.clone();
        debug!("[Viewer {}] Creating {} marker(s)", self.id(), cards.len());
        let overlays = world.overlays();
        for card in cards {
            let Some(anchor) = self.element_anchor(model.as_ref(), card.local_id) else {
                warn!(
                    "[Viewer {}] Could not get position for workplace {}",
                    self.id(),
                    card.workplace_number
                );
                continue;
            };
            match overlays.add_marker(anchor, &card.workplace_number) {
                Ok(id) => self.markers.objects.push(MarkerObject {
                    workplace_id: card.local_id,
                    overlay: id,
                    anchor,
                    visible: true,
                }),
                Err(e) => error!(
                    "[Viewer {}] Error adding marker for workplace {}: {e}",
                    self.id(),
                    card.workplace_number
                ),
            }
        }
    }

    /// Anchor point of one element: bounding-box center, lifted
    fn element_anchor(&self, model: &dyn FragmentModel, local_id: LocalId) -> Option<Point3> {
        let map = ModelIdMap::singleton(model.model_id().clone(), local_id);
        match model.bboxes(&map) {
            Ok(boxes) => boxes.first().map(|b| b.center().lifted(MARKER_ANCHOR_LIFT)),
            Err(e) => {
                warn!("[Viewer {}] Error getting center for {local_id}: {e}", self.id());
                None
            }
        }
    }

    /// Remove every marker; idempotent
    pub fn clear_all_markers(&mut self) {
        let overlays = self.core.world.as_ref().map(|w| w.overlays());
        for marker in self.markers.objects.drain(..) {
            if let Some(overlays) = &overlays {
                if let Err(e) = overlays.remove_marker(marker.overlay) {
                    warn!("Error removing marker: {e}");
                }
            }
        }
    }

    /// Flip one marker's visibility; unknown ids are a no-op
    pub fn update_marker_visibility(&mut self, local_id: LocalId, visible: bool) {
        let Some(marker) = self
            .markers
            .objects
            .iter_mut()
            .find(|m| m.workplace_id == local_id)
        else {
            return;
        };
        if let Some(world) = &self.core.world {
            if let Err(e) = world.overlays().set_marker_visible(marker.overlay, visible) {
                warn!("Error updating marker visibility: {e}");
            }
        }
        marker.visible = visible;
        self.workplaces.marker_flags.set_visibility(local_id, visible);
    }

    /// Re-derive every marker's visibility from the current filters
    pub(crate) fn update_markers_visibility(&mut self) {
        let visible: FxHashSet<LocalId> = self
            .filtered_workplace_cards()
            .iter()
            .map(|c| c.local_id)
            .collect();
        let all: Vec<LocalId> = self.workplaces.cards.iter().map(|c| c.local_id).collect();
        for id in all {
            self.update_marker_visibility(id, visible.contains(&id));
        }
    }

    /// Mirror the current highlight onto marker styling, exclusively
    pub(crate) fn sync_marker_selection(&mut self) {
        let selected = self.selection.highlighted.as_ref().map(|e| e.local_id);
        let previous = self.workplaces.marker_flags.selected;
        if previous == selected {
            return;
        }
        let overlays = self.core.world.as_ref().map(|w| w.overlays());

        if let Some(previous_id) = previous {
            if let (Some(overlays), Some(marker)) = (
                &overlays,
                self.markers.objects.iter().find(|m| m.workplace_id == previous_id),
            ) {
                if let Err(e) = overlays.set_marker_selected(marker.overlay, false) {
                    warn!("Error deselecting marker: {e}");
                }
            }
        }
        if let Some(selected_id) = selected {
            if let (Some(overlays), Some(marker)) = (
                &overlays,
                self.markers.objects.iter().find(|m| m.workplace_id == selected_id),
            ) {
                if let Err(e) = overlays.set_marker_selected(marker.overlay, true) {
                    warn!("Error selecting marker: {e}");
                }
            }
        }
        self.workplaces.marker_flags.selected = selected;
    }

    /// Record a click on the marker of the given workplace
    pub fn marker_clicked(&mut self, local_id: LocalId) {
        if !self.markers.ready {
            warn!("[Viewer {}] Marker channel not initialized; click dropped", self.id());
            return;
        }
        self.markers.pending_select.push_back(local_id);
    }

    /// Turn queued marker clicks into selection changes
    pub fn pump_marker_events(&mut self) {
        while let Some(local_id) = self.markers.pending_select.pop_front() {
            self.select_workplace_by_id(local_id);
        }
    }

    /// Close the marker channel and remove all markers
    pub fn dispose_markers(&mut self) {
        self.clear_all_markers();
        self.markers.ready = false;
        self.markers.pending_select.clear();
        self.workplaces.marker_flags.clear();
    }
}
