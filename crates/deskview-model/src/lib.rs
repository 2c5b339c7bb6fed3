// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DeskView Model - Trait definitions and shared types for the DeskView viewer core
//!
//! This crate provides the boundary between the viewer state/orchestration layer
//! and its external collaborators: the 3D rendering engine and the IFC
//! import/geometry engine. It defines traits that engine adapters implement,
//! allowing the viewer core to drive scene bootstrap, model loading, bulk
//! property queries, highlighting, camera framing, and 2D overlay markers
//! without depending on any concrete engine.
//!
//! # Architecture
//!
//! The crate is organized around several key traits:
//!
//! - [`EngineRuntime`] - Factory for worlds, highlighters, and importers
//! - [`RenderWorld`] - A live scene/camera/renderer bundle
//! - [`ModelImporter`] - Loads IFC bytes into a [`FragmentModel`]
//! - [`FragmentModel`] - Bulk category/property/bounding-box queries
//! - [`HighlightDriver`] - Highlight, hover, and outline visuals
//! - [`CameraControls`] / [`Raycaster`] / [`OverlayScene`] - Per-world services
//!
//! # Example
//!
//! ```ignore
//! use deskview_model::{EngineRuntime, ContainerHandle};
//!
//! fn bootstrap(runtime: &dyn EngineRuntime) -> deskview_model::EngineResult<()> {
//!     let world = runtime.create_world(&ContainerHandle::new("viewer-a"))?;
//!     let highlighter = runtime.create_highlighter(&world)?;
//!     world.force_update()?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod geometry;
pub mod properties;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use geometry::*;
pub use properties::*;
pub use traits::*;
pub use types::*;
