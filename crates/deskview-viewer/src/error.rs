//! Error types for viewer orchestration

use deskview_model::{EngineError, ModelId};
use thiserror::Error;

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Errors raised by the viewer state/orchestration layer
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Lookup of an unregistered viewer id
    #[error("Viewer instance '{0}' not found. Create it with create_viewer() first.")]
    ViewerNotFound(String),

    /// A data query named a model id that is not the loaded one
    #[error("Model not found: {0}")]
    ModelNotFound(ModelId),

    /// Scene bootstrap was called without a usable UI container
    #[error("Container element is required to initialize the viewer")]
    MissingContainer,

    /// Scene bootstrap was called twice on the same instance
    #[error("Viewer core is already initialized")]
    CoreAlreadyInitialized,

    /// An operation needs the scene core (world/worker URL) first
    #[error("Viewer core is not initialized. Call init_core() first.")]
    CoreNotInitialized,

    /// A load was requested before the model manager was initialized
    #[error("Importer is not initialized. Call init_model_manager() first.")]
    ImporterNotInitialized,

    /// An operation needs a loaded model
    #[error("No model is loaded")]
    NoModelLoaded,

    /// An engine-boundary call failed
    #[error(transparent)]
    Engine(#[from] EngineError),
}
