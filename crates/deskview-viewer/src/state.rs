//! State containers carried by a [`crate::ViewerInstance`]
//!
//! One struct per concern: scene core handles, model lifecycle, selection,
//! levels, workplaces, and list filters. The instance owns one of each; the
//! operation modules mutate them through `&mut self` methods only, so every
//! state transition is an explicit call.

use deskview_model::{
    ContainerHandle, ElementRef, FragmentModel, HighlightDriver, LocalId, ModelImporter,
    RenderWorld, WorkerUrl,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// One building storey extracted from the model
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Storey elevation in model units; levels are sorted ascending by this
    pub elevation: f64,
    pub local_id: LocalId,
}

/// One workplace card: a furnishing element joined with the employee directory
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WorkplaceCardData {
    pub local_id: LocalId,
    /// Domain identifier from the Identity Data / Comments property
    pub workplace_number: String,
    /// Resolved storey, when the Constraints / Level property matched one
    pub level: Option<Level>,
    pub employee_name: Option<String>,
    pub employee_avatar_url: Option<String>,
    /// True exactly when an employee resolved for the workplace number
    pub is_occupied: bool,
}

/// Level restriction applied to the workplace card list
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum LevelFilter {
    #[default]
    All,
    /// Exact level-name match against each card's resolved level
    Level(String),
}

/// Occupancy restriction applied to the workplace card list
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum OccupancyFilter {
    #[default]
    All,
    Occupied,
    Vacant,
}

/// Composable card-list filters; all three apply conjunctively
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FilterState {
    pub level: LevelFilter,
    pub occupancy: OccupancyFilter,
    /// Case-insensitive substring match on workplace number and employee name
    pub search: String,
}

impl FilterState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Scene bootstrap handles; all present after `init_core`, all absent before
#[derive(Default)]
pub struct CoreState {
    pub container: Option<ContainerHandle>,
    pub world: Option<Arc<dyn RenderWorld>>,
    pub highlighter: Option<Arc<dyn HighlightDriver>>,
    pub worker_url: Option<WorkerUrl>,
}

impl CoreState {
    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    pub fn clear(&mut self) {
        self.container = None;
        self.world = None;
        self.highlighter = None;
        self.worker_url = None;
    }
}

/// Model manager state: importer plus at most one loaded model
#[derive(Default)]
pub struct ModelState {
    pub importer: Option<Arc<dyn ModelImporter>>,
    pub model: Option<Arc<dyn FragmentModel>>,
    pub is_loading: bool,
    /// Load progress 0-100, shared with the in-flight import callback.
    /// Replaced with a fresh cell on each load and on clear, so a late
    /// callback from an abandoned import writes into an orphaned cell.
    pub progress: Arc<AtomicU8>,
}

impl ModelState {
    pub fn loading_progress(&self) -> u8 {
        self.progress.load(Ordering::Relaxed)
    }

    /// Install a fresh progress cell for a new load and return it
    pub fn begin_progress(&mut self) -> Arc<AtomicU8> {
        self.progress = Arc::new(AtomicU8::new(0));
        Arc::clone(&self.progress)
    }

    pub fn clear(&mut self) {
        self.importer = None;
        self.model = None;
        self.is_loading = false;
        self.progress = Arc::new(AtomicU8::new(0));
    }
}

/// Clamp a raw engine progress value into the 0-100 range
pub(crate) fn clamp_progress(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Selection state: at most one highlighted and one hovered element
#[derive(Default)]
pub struct SelectionState {
    pub highlighted: Option<ElementRef>,
    pub hovered: Option<ElementRef>,
    /// Monotonic ticket for hover samples; completions carrying a stale
    /// ticket are dropped so out-of-order results cannot stick
    pub hover_seq: u64,
}

impl SelectionState {
    pub fn clear(&mut self) {
        self.highlighted = None;
        self.hovered = None;
        // hover_seq keeps counting so in-flight samples stay invalidated
    }
}

/// Extracted building storeys
#[derive(Default)]
pub struct LevelState {
    pub data: Vec<Level>,
    pub is_loading: bool,
}

impl LevelState {
    pub fn clear(&mut self) {
        self.data.clear();
        self.is_loading = false;
    }
}

/// Marker presentation flags, kept alongside the card list
///
/// These mirror what the overlay scene shows and survive even when a marker
/// object failed to build, so visibility updates stay pure flag flips.
#[derive(Default)]
pub struct MarkerFlags {
    pub selected: Option<LocalId>,
    visibility: FxHashMap<LocalId, bool>,
}

impl MarkerFlags {
    /// Visibility defaults to true until a filter hides the marker
    pub fn is_visible(&self, id: LocalId) -> bool {
        self.visibility.get(&id).copied().unwrap_or(true)
    }

    pub fn set_visibility(&mut self, id: LocalId, visible: bool) {
        self.visibility.insert(id, visible);
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.visibility.clear();
    }
}

/// Workplace aggregation state: cards plus their marker flags
#[derive(Default)]
pub struct WorkplaceState {
    pub cards: Vec<WorkplaceCardData>,
    pub is_loading: bool,
    pub marker_flags: MarkerFlags,
}

impl WorkplaceState {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.is_loading = false;
        self.marker_flags.clear();
    }
}
