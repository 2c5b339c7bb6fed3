//! One isolated viewer instance
//!
//! A `ViewerInstance` owns the full state of one embedded viewer: scene core,
//! model manager, selection, levels, workplaces, filters, and markers. The
//! operation methods live in the concern modules ([`crate::core`],
//! [`crate::model_manager`], [`crate::selection`], ...) as further `impl`
//! blocks on this type.

use crate::markers::MarkerSet;
use crate::state::{
    CoreState, FilterState, LevelState, ModelState, SelectionState, WorkplaceState,
};
use deskview_model::EngineRuntime;
use log::debug;
use std::sync::Arc;

pub struct ViewerInstance {
    id: String,
    pub(crate) runtime: Arc<dyn EngineRuntime>,
    pub core: CoreState,
    pub model: ModelState,
    pub selection: SelectionState,
    pub levels: LevelState,
    pub workplaces: WorkplaceState,
    pub filters: FilterState,
    pub(crate) markers: MarkerSet,
    /// Deep-link employee id, consumed once after the first successful load
    pub(crate) route_employee_id: Option<String>,
}

impl ViewerInstance {
    pub(crate) fn new(id: impl Into<String>, runtime: Arc<dyn EngineRuntime>) -> Self {
        Self {
            id: id.into(),
            runtime,
            core: CoreState::default(),
            model: ModelState::default(),
            selection: SelectionState::default(),
            levels: LevelState::default(),
            workplaces: WorkplaceState::default(),
            filters: FilterState::default(),
            markers: MarkerSet::default(),
            route_employee_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_model(&self) -> bool {
        self.model.model.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.model.is_loading
    }

    /// Remember a deep-link target to select after the next load
    pub fn set_route_employee_id(&mut self, employee_id: Option<String>) {
        self.route_employee_id = employee_id;
    }

    /// Reset all state containers to their defaults without touching engine
    /// resources; [`Self::dispose`] releases those first
    pub fn reset(&mut self) {
        self.core.clear();
        self.model.clear();
        self.selection.clear();
        self.levels.clear();
        self.workplaces.clear();
        self.filters.clear();
        self.route_employee_id = None;
    }

    /// Tear down the instance in dependency order: markers, then the model
    /// manager, then the scene core, then the state containers
    ///
    /// Safe to call on a partially initialized or already disposed instance;
    /// individual release failures are logged and never abort the teardown.
    pub fn dispose(&mut self) {
        debug!("[Viewer {}] Disposing...", self.id);
        self.dispose_markers();
        self.dispose_model_manager();
        self.dispose_core();
        self.reset();
        debug!("[Viewer {}] Disposed", self.id);
    }
}
