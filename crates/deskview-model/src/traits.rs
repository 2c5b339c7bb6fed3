// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine-boundary traits
//!
//! These traits define the viewer core's view of its external collaborators:
//! the 3D rendering engine (worlds, camera, raycasts, overlays, highlight
//! visuals) and the IFC import/geometry engine (model loading and bulk
//! queries). Adapters resolve their own asynchrony internally; every method
//! here is synchronous and returns an [`EngineResult`].

use crate::{
    BoundingBox, CategoryPattern, ContainerHandle, ElementRef, EngineResult, ItemRecord, LocalId,
    ModelId, ModelIdMap, OverlayId, Point3, WorkerUrl,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Progress callback for model imports, receiving raw percent values
///
/// Values are unclamped engine output; the model manager clamps them
/// into 0–100 before exposing them.
pub type ProgressCallback = Box<dyn Fn(i32) + Send + Sync>;

/// Configuration for bulk item-data queries
#[derive(Clone, Debug, Default)]
pub struct ItemQueryConfig {
    /// Include the default attributes (Name, Elevation, Tag, ...)
    pub attributes_default: bool,
    /// Explicit attribute names to include when `attributes_default` is false
    pub attributes: Vec<String>,
    /// Expand defining relations into raw property sets
    pub with_property_sets: bool,
}

impl ItemQueryConfig {
    /// Default attributes only, no property-set expansion
    pub fn attributes_only() -> Self {
        Self {
            attributes_default: true,
            ..Self::default()
        }
    }

    /// Name/NominalValue pairs with property-set relations expanded
    pub fn with_psets() -> Self {
        Self {
            attributes_default: false,
            attributes: vec!["Name".to_string(), "NominalValue".to_string()],
            with_property_sets: true,
        }
    }
}

/// A loaded model handle exposing bulk queries
///
/// Mirrors the import engine's fragments-model surface: category listing,
/// item-data fetches, and bounding-box lookups. All queries are bulk
/// operations; per-item access goes through single-element slices.
pub trait FragmentModel: Send + Sync {
    /// The engine-assigned id of this model
    fn model_id(&self) -> &ModelId;

    /// List element ids grouped by category for the given fixed patterns
    ///
    /// # Returns
    /// A map from matched category name to the ids in that category
    fn items_of_categories(
        &self,
        patterns: &[CategoryPattern],
    ) -> EngineResult<HashMap<String, Vec<LocalId>>>;

    /// Bulk-fetch raw item records for the given ids
    ///
    /// Records come back in the order of `ids`. Malformed attribute or
    /// property shapes are preserved as-is for the caller to validate.
    fn items_data(&self, ids: &[LocalId], config: &ItemQueryConfig) -> EngineResult<Vec<ItemRecord>>;

    /// Bounding boxes of the elements in `map`, in map iteration order
    fn bboxes(&self, map: &ModelIdMap) -> EngineResult<Vec<BoundingBox>>;

    /// Release the model's engine-side resources
    fn dispose(&self);
}

/// Loads IFC bytes into a [`FragmentModel`]
pub trait ModelImporter: Send + Sync {
    /// Import a model from raw IFC bytes
    ///
    /// # Arguments
    /// * `bytes` - The IFC file content
    /// * `name` - Display name; becomes the model id in most engines
    /// * `on_progress` - Receives raw percent values during processing
    fn load(
        &self,
        bytes: &[u8],
        name: &str,
        on_progress: ProgressCallback,
    ) -> EngineResult<Arc<dyn FragmentModel>>;
}

/// Camera framing and navigation for one world
pub trait CameraControls: Send + Sync {
    /// Animate the camera to frame the given elements
    fn fit_to_items(&self, map: &ModelIdMap) -> EngineResult<()>;

    /// Return to the fixed home position/target
    fn reset(&self) -> EngineResult<()>;
}

/// Result of a successful screen-point raycast
#[derive(Clone, PartialEq, Debug)]
pub struct RayHit {
    /// The element under the cursor
    pub target: ElementRef,
    /// World-space intersection point
    pub point: Point3,
}

/// Screen-point picking service for one world
pub trait Raycaster: Send + Sync {
    /// Cast a ray through normalized screen coordinates
    ///
    /// # Returns
    /// `Ok(None)` when no element lies under the point
    fn cast(&self, x: f64, y: f64) -> EngineResult<Option<RayHit>>;
}

/// Highlight, hover, and outline visuals for one world
///
/// The driver owns the visual state only; which element is highlighted is
/// tracked by the viewer core. Highlight and hover are independent layers
/// with their own clear operations.
pub trait HighlightDriver: Send + Sync {
    /// Apply the persistent selection highlight to the given elements
    fn apply_highlight(&self, map: &ModelIdMap) -> EngineResult<()>;

    /// Remove the persistent selection highlight
    fn clear_highlight(&self) -> EngineResult<()>;

    /// Apply the transient hover treatment to the given elements
    fn apply_hover(&self, map: &ModelIdMap) -> EngineResult<()>;

    /// Remove the transient hover treatment
    fn clear_hover(&self) -> EngineResult<()>;

    /// Replace the faint all-workplaces outline set
    fn set_outline(&self, map: &ModelIdMap) -> EngineResult<()>;

    /// Remove the faint all-workplaces outline set
    fn clear_outline(&self) -> EngineResult<()>;
}

/// 2D overlay elements anchored to world-space points
pub trait OverlayScene: Send + Sync {
    /// Create one overlay marker at `anchor` labelled with `label`
    fn add_marker(&self, anchor: Point3, label: &str) -> EngineResult<OverlayId>;

    /// Toggle an overlay's visibility without destroying it
    fn set_marker_visible(&self, id: OverlayId, visible: bool) -> EngineResult<()>;

    /// Toggle an overlay's selected styling
    fn set_marker_selected(&self, id: OverlayId, selected: bool) -> EngineResult<()>;

    /// Destroy an overlay and its UI mount
    fn remove_marker(&self, id: OverlayId) -> EngineResult<()>;
}

/// A live scene/camera/renderer bundle created by [`EngineRuntime::create_world`]
pub trait RenderWorld: Send + Sync {
    /// Add a loaded model's object graph to the scene and bind the camera
    fn attach_model(&self, model: &Arc<dyn FragmentModel>) -> EngineResult<()>;

    /// Force a render update (used after scene mutations)
    fn force_update(&self) -> EngineResult<()>;

    fn camera(&self) -> Arc<dyn CameraControls>;

    fn overlays(&self) -> Arc<dyn OverlayScene>;

    fn raycaster(&self) -> Arc<dyn Raycaster>;

    /// Tear down the world, its scene graph, and the renderer
    fn dispose(&self) -> EngineResult<()>;
}

/// Entry point to the external 3D/import engine
///
/// One runtime serves any number of viewer instances; every created world is
/// independent. The runtime also covers the byte-level IO the viewer needs
/// (model fetches, worker-script materialization) so the core stays free of
/// platform IO.
pub trait EngineRuntime: Send + Sync {
    /// Create a world attached to the given UI container and start its render loop
    fn create_world(&self, container: &ContainerHandle) -> EngineResult<Arc<dyn RenderWorld>>;

    /// Create the highlight/outline driver for a world
    fn create_highlighter(
        &self,
        world: &Arc<dyn RenderWorld>,
    ) -> EngineResult<Arc<dyn HighlightDriver>>;

    /// Install the import engine backed by the given worker script
    fn create_importer(&self, worker_url: &WorkerUrl) -> EngineResult<Arc<dyn ModelImporter>>;

    /// Fetch raw bytes at a path or URL (model files)
    fn fetch_bytes(&self, path: &str) -> EngineResult<Vec<u8>>;

    /// Fetch the background-worker script and materialize it as a revocable local URL
    fn materialize_worker_script(&self) -> EngineResult<WorkerUrl>;

    /// Revoke a worker URL created by [`Self::materialize_worker_script`]
    fn revoke_worker_url(&self, url: &WorkerUrl) -> EngineResult<()>;
}
