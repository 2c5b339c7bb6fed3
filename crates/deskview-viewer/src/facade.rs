//! High-level viewer flows
//!
//! The facade sequences the concern modules into the flows the embedding
//! layer actually runs: one-shot setup, full load pipelines (by path and
//! from picked bytes), and camera reset. Loads are serialized per instance;
//! a new load always tears the previous model's derived data down first.

use crate::directory::EmployeeDirectory;
use crate::error::{Result, ViewerError};
use crate::instance::ViewerInstance;
use deskview_model::{ContainerHandle, ModelId};
use log::debug;

impl ViewerInstance {
    /// One-shot bootstrap: scene core, model manager, marker channel
    ///
    /// An optional deep-link employee id is remembered and honored once
    /// after the first successful load.
    pub fn setup_viewer(
        &mut self,
        container: ContainerHandle,
        route_employee_id: Option<String>,
    ) -> Result<()> {
        self.init_core(container)?;
        self.init_model_manager()?;
        self.init_markers()?;
        self.route_employee_id = route_employee_id;
        Ok(())
    }

    /// Full load pipeline for a model at a path/URL
    ///
    /// Tears down data derived from any previous model, loads the file,
    /// then runs extraction in order: levels, workplace cards, markers,
    /// and finally the pending deep-link selection.
    pub fn load_ifc(
        &mut self,
        path: &str,
        name: &str,
        directory: &EmployeeDirectory,
    ) -> Result<ModelId> {
        self.teardown_model_data();
        let model = self.load_model_by_path(path, name)?;
        let model_id = model.model_id().clone();
        self.run_extraction(&model_id, directory);
        Ok(model_id)
    }

    /// Full load pipeline for an already-picked file (file-input flow)
    pub fn handle_file_change(
        &mut self,
        name: &str,
        bytes: &[u8],
        directory: &EmployeeDirectory,
    ) -> Result<ModelId> {
        self.teardown_model_data();
        let model = self.load_model_from_bytes(bytes, name)?;
        let model_id = model.model_id().clone();
        self.run_extraction(&model_id, directory);
        Ok(model_id)
    }

    /// Drop everything derived from the current model, then the model itself
    fn teardown_model_data(&mut self) {
        if self.has_model() {
            debug!("[Viewer {}] Replacing loaded model", self.id());
        }
        self.highlight_clear();
        self.hover_clear();
        self.clear_workplaces();
        self.clear_levels();
        self.unload_model();
    }

    fn run_extraction(&mut self, model_id: &ModelId, directory: &EmployeeDirectory) {
        self.load_levels(model_id);
        self.load_workplace_cards(model_id, directory);
        self.create_markers_for_workplaces();
        self.select_workplace_from_route(directory);
    }

    /// Return the camera to its home position
    pub fn reset_camera(&self) -> Result<()> {
        let Some(world) = &self.core.world else {
            return Err(ViewerError::CoreNotInitialized);
        };
        world.camera().reset()?;
        Ok(())
    }
}
