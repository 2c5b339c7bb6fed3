//! DeskView Viewer - multi-instance viewer state and orchestration
//!
//! This crate holds everything above the engine boundary: the viewer-instance
//! registry, scene bootstrap, model loading, level and workplace extraction,
//! selection/highlighting, and 3D marker lifecycle. Engine concerns (rendering,
//! IFC import, raycasting, overlays) stay behind the traits in
//! [`deskview_model`]; this crate only sequences them and owns the state.
//!
//! # Usage
//!
//! ```ignore
//! use deskview_viewer::{ViewerManager, EmployeeDirectory};
//! use deskview_model::ContainerHandle;
//!
//! let mut manager = ViewerManager::new(runtime);
//! let directory = EmployeeDirectory::default();
//!
//! let viewer = manager.create_viewer("main");
//! viewer.setup_viewer(ContainerHandle::new("viewer-root"), None)?;
//! viewer.load_ifc("/models/office.ifc", "office", &directory)?;
//! ```

pub mod core;
pub mod data_access;
pub mod directory;
pub mod error;
pub mod facade;
pub mod instance;
pub mod levels;
pub mod markers;
pub mod model_manager;
pub mod registry;
pub mod selection;
pub mod state;
pub mod workplace;

#[cfg(test)]
pub(crate) mod testutil;

pub use data_access::FormattedPsets;
pub use directory::{Employee, EmployeeDirectory};
pub use error::{Result, ViewerError};
pub use instance::ViewerInstance;
pub use markers::{MarkerObject, MARKER_ANCHOR_LIFT};
pub use registry::{ViewerInfo, ViewerManager};
pub use state::{
    Level, LevelFilter, OccupancyFilter, WorkplaceCardData,
};
