//! Scene bootstrap and teardown
//!
//! `init_core` turns an empty instance into a live one: world (scene, camera,
//! renderer), highlight driver, and the materialized worker URL the importer
//! will need. Handles are stored as they are produced, so a failure partway
//! through leaves whatever exists cleanly releasable by `dispose_core`.

use crate::error::{Result, ViewerError};
use crate::instance::ViewerInstance;
use deskview_model::ContainerHandle;
use log::{debug, error, warn};

impl ViewerInstance {
    /// Bootstrap the 3D scene into the given UI container
    ///
    /// Fails fast when the container handle is empty or when the core is
    /// already initialized; re-initialization requires an explicit
    /// [`Self::dispose_core`] first.
    pub fn init_core(&mut self, container: ContainerHandle) -> Result<()> {
        if container.is_empty() {
            return Err(ViewerError::MissingContainer);
        }
        if self.core.is_initialized() {
            return Err(ViewerError::CoreAlreadyInitialized);
        }

        debug!("[Viewer {}] Initializing core in '{}'", self.id(), container.0);
        self.core.container = Some(container.clone());

        let world = match self.runtime.create_world(&container) {
            Ok(world) => world,
            Err(e) => {
                error!("[Viewer {}] Error initializing viewer: {e}", self.id());
                return Err(e.into());
            }
        };
        self.core.world = Some(world.clone());

        let highlighter = match self.runtime.create_highlighter(&world) {
            Ok(highlighter) => highlighter,
            Err(e) => {
                error!("[Viewer {}] Error initializing viewer: {e}", self.id());
                return Err(e.into());
            }
        };
        self.core.highlighter = Some(highlighter);

        let worker_url = match self.runtime.materialize_worker_script() {
            Ok(url) => url,
            Err(e) => {
                error!("[Viewer {}] Error initializing viewer: {e}", self.id());
                return Err(e.into());
            }
        };
        self.core.worker_url = Some(worker_url);

        debug!("[Viewer {}] Core initialized", self.id());
        Ok(())
    }

    /// Release the scene core: revoke the worker URL, dispose the world,
    /// clear all handles
    ///
    /// Tolerant of partial initialization; release failures are logged and
    /// the teardown continues so the instance always ends up empty.
    pub fn dispose_core(&mut self) {
        if let Some(url) = self.core.worker_url.take() {
            if let Err(e) = self.runtime.revoke_worker_url(&url) {
                warn!("[Viewer {}] Error revoking worker URL: {e}", self.id());
            }
        }
        if let Some(world) = self.core.world.take() {
            if let Err(e) = world.dispose() {
                warn!("[Viewer {}] Error disposing world: {e}", self.id());
            }
        }
        self.core.clear();
    }
}
