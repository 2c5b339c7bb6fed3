//! Model loading lifecycle
//!
//! The model manager owns the importer and at most one loaded model per
//! instance. Loading follows a strict flag protocol: `is_loading` flips on
//! before any work, progress is clamped into 0-100 as the importer reports,
//! and both settle back (false / 0) on every exit path, success or failure.

use crate::error::{Result, ViewerError};
use crate::instance::ViewerInstance;
use crate::state::clamp_progress;
use deskview_model::FragmentModel;
use log::{debug, error};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

impl ViewerInstance {
    /// Install the importer backed by the core's worker URL
    ///
    /// Requires [`Self::init_core`] to have completed.
    pub fn init_model_manager(&mut self) -> Result<()> {
        let Some(worker_url) = self.core.worker_url.clone() else {
            return Err(ViewerError::CoreNotInitialized);
        };
        let importer = self.runtime.create_importer(&worker_url)?;
        self.model.importer = Some(importer);
        debug!("[Viewer {}] Model manager initialized", self.id());
        Ok(())
    }

    /// Fetch an IFC file by path/URL and load it into the scene
    pub fn load_model_by_path(&mut self, path: &str, name: &str) -> Result<Arc<dyn FragmentModel>> {
        if self.model.importer.is_none() {
            return Err(ViewerError::ImporterNotInitialized);
        }
        self.model.is_loading = true;
        let progress = self.model.begin_progress();

        let runtime = Arc::clone(&self.runtime);
        let result = match runtime.fetch_bytes(path) {
            Ok(bytes) => self.import_and_attach(&bytes, name, progress),
            Err(e) => Err(e.into()),
        };
        self.settle_load(result, name)
    }

    /// Load an IFC file from bytes already in memory (file-picker flow)
    pub fn load_model_from_bytes(&mut self, bytes: &[u8], name: &str) -> Result<Arc<dyn FragmentModel>> {
        if self.model.importer.is_none() {
            return Err(ViewerError::ImporterNotInitialized);
        }
        self.model.is_loading = true;
        let progress = self.model.begin_progress();

        let result = self.import_and_attach(bytes, name, progress);
        self.settle_load(result, name)
    }

    fn import_and_attach(
        &mut self,
        bytes: &[u8],
        name: &str,
        progress: Arc<AtomicU8>,
    ) -> Result<Arc<dyn FragmentModel>> {
        let importer = self
            .model
            .importer
            .clone()
            .ok_or(ViewerError::ImporterNotInitialized)?;
        let world = self.core.world.clone().ok_or(ViewerError::CoreNotInitialized)?;

        let model = importer.load(
            bytes,
            name,
            Box::new(move |raw| progress.store(clamp_progress(raw), Ordering::Relaxed)),
        )?;
        self.model.progress.store(100, Ordering::Relaxed);

        // Registration hook: put the new model into the scene and render once
        world.attach_model(&model)?;
        world.force_update()?;

        self.model.model = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Settle the loading flags on every exit path
    fn settle_load(
        &mut self,
        result: Result<Arc<dyn FragmentModel>>,
        name: &str,
    ) -> Result<Arc<dyn FragmentModel>> {
        self.model.is_loading = false;
        self.model.progress.store(0, Ordering::Relaxed);
        match &result {
            Ok(model) => {
                debug!("[Viewer {}] Model '{name}' loaded: {}", self.id(), model.model_id());
            }
            Err(e) => {
                error!("[Viewer {}] Error loading model '{name}': {e}", self.id());
            }
        }
        result
    }

    /// Dispose the loaded model, if any
    pub fn unload_model(&mut self) {
        if let Some(model) = self.model.model.take() {
            debug!("[Viewer {}] Unloading model {}", self.id(), model.model_id());
            model.dispose();
        }
    }

    /// Release the model and the importer
    pub fn dispose_model_manager(&mut self) {
        self.unload_model();
        self.model.clear();
    }
}
