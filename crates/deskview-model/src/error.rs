// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for engine-boundary operations

use thiserror::Error;

/// Result type alias for engine-boundary operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors raised by external engine collaborators
#[derive(Error, Debug)]
pub enum EngineError {
    /// World/scene/renderer bootstrap failed
    #[error("Failed to create world: {0}")]
    WorldCreation(String),

    /// Fetching or materializing the background-worker script failed
    #[error("Worker script error: {0}")]
    WorkerScript(String),

    /// Importing model bytes failed
    #[error("Model import failed: {0}")]
    Import(String),

    /// A bulk category/item/bounding-box query failed
    #[error("Model query failed: {0}")]
    Query(String),

    /// Camera framing/animation failed
    #[error("Camera error: {0}")]
    Camera(String),

    /// Screen-point raycast failed
    #[error("Raycast error: {0}")]
    Raycast(String),

    /// Creating or mutating a 2D overlay failed
    #[error("Overlay error: {0}")]
    Overlay(String),

    /// Releasing an engine resource failed
    #[error("Disposal error: {0}")]
    Disposal(String),

    /// IO error (local file reads on native targets)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Create a new query error
    pub fn query(msg: impl Into<String>) -> Self {
        EngineError::Query(msg.into())
    }

    /// Create a new overlay error
    pub fn overlay(msg: impl Into<String>) -> Self {
        EngineError::Overlay(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        EngineError::Other(msg.into())
    }
}
