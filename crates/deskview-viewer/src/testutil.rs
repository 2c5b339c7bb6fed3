//! Scripted engine mocks shared by the module tests
//!
//! `TestBed` wires one mock runtime with observable worlds, highlighters,
//! cameras, raycasters, and overlays, plus a scripted model whose storeys
//! and workplaces each test declares. Failure toggles simulate the engine
//! misbehaving at every boundary the viewer has to tolerate.

use crate::instance::ViewerInstance;
use deskview_model::{
    AttributeValue, BoundingBox, CameraControls, CategoryPattern, ContainerHandle, ElementRef,
    EngineError, EngineResult, EngineRuntime, FragmentModel, HighlightDriver, ItemQueryConfig,
    ItemRecord, LocalId, ModelId, ModelIdMap, ModelImporter, OverlayId, OverlayScene, Point3,
    ProgressCallback, RawProperty, RawPropertySet, RayHit, Raycaster, RenderWorld, WorkerUrl,
    BUILDING_STOREY_PATTERN, FURNISHING_ELEMENT_PATTERN,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Build a storey record the way a bulk attributes query returns it
pub(crate) fn storey(id: u32, name: &str, elevation: f64) -> ItemRecord {
    ItemRecord::new(LocalId(id))
        .with_category("IFCBUILDINGSTOREY")
        .with_attribute("Name", AttributeValue::from(name))
        .with_attribute("Elevation", AttributeValue::from(elevation))
}

/// Build a furnishing record with the standard workplace property sets
pub(crate) fn workplace(id: u32, number: Option<&str>, level: Option<&str>) -> ItemRecord {
    let mut record = ItemRecord::new(LocalId(id))
        .with_category("IFCFURNISHINGELEMENT")
        .with_attribute("Name", AttributeValue::from("Desk"));
    let mut identity = Vec::new();
    if let Some(number) = number {
        identity.push(RawProperty::new("Comments", AttributeValue::from(number)));
    }
    record = record.with_property_set(RawPropertySet::new("Identity Data", identity));
    if let Some(level) = level {
        record = record.with_property_set(RawPropertySet::new(
            "Constraints",
            vec![RawProperty::new(
                "Level",
                AttributeValue::Text(format!("Level: {level}")),
            )],
        ));
    }
    record
}

/// Shared scripting state mutated by tests and read by the mocks
#[derive(Default)]
pub(crate) struct EngineScript {
    storeys: Mutex<Vec<ItemRecord>>,
    workplaces: Mutex<Vec<ItemRecord>>,
    fail_queries: AtomicBool,
    dropped_bboxes: Mutex<FxHashSet<LocalId>>,
    model_disposed: AtomicBool,
    progress_script: Mutex<Vec<i32>>,
    fail_import: AtomicBool,
}

pub(crate) struct MockModel {
    id: ModelId,
    script: Arc<EngineScript>,
}

impl FragmentModel for MockModel {
    fn model_id(&self) -> &ModelId {
        &self.id
    }

    fn items_of_categories(
        &self,
        patterns: &[CategoryPattern],
    ) -> EngineResult<HashMap<String, Vec<LocalId>>> {
        if self.script.fail_queries.load(Ordering::Relaxed) {
            return Err(EngineError::query("scripted query failure"));
        }
        let mut out = HashMap::new();
        for pattern in patterns {
            if pattern.matches(BUILDING_STOREY_PATTERN) {
                let ids = self.script.storeys.lock().unwrap().iter().map(|r| r.local_id).collect();
                out.insert(BUILDING_STOREY_PATTERN.to_string(), ids);
            }
            if pattern.matches(FURNISHING_ELEMENT_PATTERN) {
                let ids =
                    self.script.workplaces.lock().unwrap().iter().map(|r| r.local_id).collect();
                out.insert(FURNISHING_ELEMENT_PATTERN.to_string(), ids);
            }
        }
        Ok(out)
    }

    fn items_data(
        &self,
        ids: &[LocalId],
        _config: &ItemQueryConfig,
    ) -> EngineResult<Vec<ItemRecord>> {
        if self.script.fail_queries.load(Ordering::Relaxed) {
            return Err(EngineError::query("scripted query failure"));
        }
        let storeys = self.script.storeys.lock().unwrap();
        let workplaces = self.script.workplaces.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| {
                storeys
                    .iter()
                    .chain(workplaces.iter())
                    .find(|r| r.local_id == *id)
                    .cloned()
            })
            .collect())
    }

    fn bboxes(&self, map: &ModelIdMap) -> EngineResult<Vec<BoundingBox>> {
        if self.script.fail_queries.load(Ordering::Relaxed) {
            return Err(EngineError::query("scripted query failure"));
        }
        let dropped = self.script.dropped_bboxes.lock().unwrap();
        let mut boxes = Vec::new();
        for ids in map.0.values() {
            for id in ids {
                if !dropped.contains(id) {
                    boxes.push(BoundingBox::new(
                        Point3::new(-1.0, -0.5, -1.0),
                        Point3::new(1.0, 0.5, 1.0),
                    ));
                }
            }
        }
        Ok(boxes)
    }

    fn dispose(&self) {
        self.script.model_disposed.store(true, Ordering::Relaxed);
    }
}

struct MockImporter {
    model: Arc<MockModel>,
    script: Arc<EngineScript>,
}

impl ModelImporter for MockImporter {
    fn load(
        &self,
        _bytes: &[u8],
        _name: &str,
        on_progress: ProgressCallback,
    ) -> EngineResult<Arc<dyn FragmentModel>> {
        for raw in self.script.progress_script.lock().unwrap().iter() {
            on_progress(*raw);
        }
        if self.script.fail_import.load(Ordering::Relaxed) {
            return Err(EngineError::Import("scripted import failure".to_string()));
        }
        Ok(Arc::clone(&self.model) as Arc<dyn FragmentModel>)
    }
}

#[derive(Default)]
pub(crate) struct MockCamera {
    fits: AtomicUsize,
    resets: AtomicUsize,
    fail_flag: AtomicBool,
}

impl MockCamera {
    pub fn fit_calls(&self) -> usize {
        self.fits.load(Ordering::Relaxed)
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::Relaxed)
    }

    pub fn fail(&self, fail: bool) {
        self.fail_flag.store(fail, Ordering::Relaxed);
    }
}

impl CameraControls for MockCamera {
    fn fit_to_items(&self, _map: &ModelIdMap) -> EngineResult<()> {
        if self.fail_flag.load(Ordering::Relaxed) {
            return Err(EngineError::Camera("scripted camera failure".to_string()));
        }
        self.fits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn reset(&self) -> EngineResult<()> {
        self.resets.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockRaycaster {
    next: Mutex<Option<RayHit>>,
    fail_flag: AtomicBool,
}

impl MockRaycaster {
    pub fn set_next_hit(&self, hit: Option<RayHit>) {
        *self.next.lock().unwrap() = hit;
    }

    pub fn fail(&self, fail: bool) {
        self.fail_flag.store(fail, Ordering::Relaxed);
    }
}

impl Raycaster for MockRaycaster {
    fn cast(&self, _x: f64, _y: f64) -> EngineResult<Option<RayHit>> {
        if self.fail_flag.load(Ordering::Relaxed) {
            return Err(EngineError::Raycast("scripted raycast failure".to_string()));
        }
        Ok(self.next.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub(crate) struct MockHighlighter {
    highlight_apply_count: AtomicUsize,
    highlight_clear_count: AtomicUsize,
    hover_apply_count: AtomicUsize,
    hover_clear_count: AtomicUsize,
    outline_map: Mutex<Option<ModelIdMap>>,
}

impl MockHighlighter {
    pub fn highlight_applies(&self) -> usize {
        self.highlight_apply_count.load(Ordering::Relaxed)
    }

    pub fn highlight_clears(&self) -> usize {
        self.highlight_clear_count.load(Ordering::Relaxed)
    }

    pub fn hover_applies(&self) -> usize {
        self.hover_apply_count.load(Ordering::Relaxed)
    }

    pub fn hover_clears(&self) -> usize {
        self.hover_clear_count.load(Ordering::Relaxed)
    }

    pub fn outline(&self) -> Option<ModelIdMap> {
        self.outline_map.lock().unwrap().clone()
    }
}

impl HighlightDriver for MockHighlighter {
    fn apply_highlight(&self, _map: &ModelIdMap) -> EngineResult<()> {
        self.highlight_apply_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn clear_highlight(&self) -> EngineResult<()> {
        self.highlight_clear_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn apply_hover(&self, _map: &ModelIdMap) -> EngineResult<()> {
        self.hover_apply_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn clear_hover(&self) -> EngineResult<()> {
        self.hover_clear_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn set_outline(&self, map: &ModelIdMap) -> EngineResult<()> {
        *self.outline_map.lock().unwrap() = Some(map.clone());
        Ok(())
    }

    fn clear_outline(&self) -> EngineResult<()> {
        *self.outline_map.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
struct MarkerRecord {
    visible: bool,
    selected: bool,
}

#[derive(Default)]
pub(crate) struct MockOverlays {
    next_id: AtomicU64,
    markers: Mutex<FxHashMap<OverlayId, MarkerRecord>>,
    fail_labels: Mutex<FxHashSet<String>>,
}

impl MockOverlays {
    pub fn live_markers(&self) -> usize {
        self.markers.lock().unwrap().len()
    }

    pub fn selected_markers(&self) -> usize {
        self.markers.lock().unwrap().values().filter(|m| m.selected).count()
    }

    pub fn fail_add_for(&self, label: &str) {
        self.fail_labels.lock().unwrap().insert(label.to_string());
    }
}

impl OverlayScene for MockOverlays {
    fn add_marker(&self, _anchor: Point3, label: &str) -> EngineResult<OverlayId> {
        if self.fail_labels.lock().unwrap().contains(label) {
            return Err(EngineError::overlay(format!("scripted add failure for '{label}'")));
        }
        let id = OverlayId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.markers.lock().unwrap().insert(
            id,
            MarkerRecord {
                visible: true,
                selected: false,
            },
        );
        Ok(id)
    }

    fn set_marker_visible(&self, id: OverlayId, visible: bool) -> EngineResult<()> {
        match self.markers.lock().unwrap().get_mut(&id) {
            Some(marker) => {
                marker.visible = visible;
                Ok(())
            }
            None => Err(EngineError::overlay("unknown marker")),
        }
    }

    fn set_marker_selected(&self, id: OverlayId, selected: bool) -> EngineResult<()> {
        match self.markers.lock().unwrap().get_mut(&id) {
            Some(marker) => {
                marker.selected = selected;
                Ok(())
            }
            None => Err(EngineError::overlay("unknown marker")),
        }
    }

    fn remove_marker(&self, id: OverlayId) -> EngineResult<()> {
        match self.markers.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(EngineError::overlay("unknown marker")),
        }
    }
}

pub(crate) struct MockWorld {
    overlay_scene: Arc<MockOverlays>,
    camera_controls: Arc<MockCamera>,
    ray: Arc<MockRaycaster>,
    attached: AtomicUsize,
    update_count: AtomicUsize,
    disposed: AtomicBool,
}

impl MockWorld {
    pub fn attached_models(&self) -> usize {
        self.attached.load(Ordering::Relaxed)
    }

    pub fn updates(&self) -> usize {
        self.update_count.load(Ordering::Relaxed)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Relaxed)
    }
}

impl RenderWorld for MockWorld {
    fn attach_model(&self, _model: &Arc<dyn FragmentModel>) -> EngineResult<()> {
        self.attached.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn force_update(&self) -> EngineResult<()> {
        self.update_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn camera(&self) -> Arc<dyn CameraControls> {
        Arc::clone(&self.camera_controls) as Arc<dyn CameraControls>
    }

    fn overlays(&self) -> Arc<dyn OverlayScene> {
        Arc::clone(&self.overlay_scene) as Arc<dyn OverlayScene>
    }

    fn raycaster(&self) -> Arc<dyn Raycaster> {
        Arc::clone(&self.ray) as Arc<dyn Raycaster>
    }

    fn dispose(&self) -> EngineResult<()> {
        self.disposed.store(true, Ordering::Relaxed);
        Ok(())
    }
}

pub(crate) struct MockRuntime {
    script: Arc<EngineScript>,
    pub world: Arc<MockWorld>,
    pub highlighter: Arc<MockHighlighter>,
    model: Arc<MockModel>,
    fetchable: Mutex<FxHashMap<String, Vec<u8>>>,
    worker_counter: AtomicU64,
    revoked: AtomicUsize,
}

impl MockRuntime {
    pub fn new() -> Self {
        let script = Arc::new(EngineScript {
            progress_script: Mutex::new(vec![10, 50, 100]),
            ..EngineScript::default()
        });
        let world = Arc::new(MockWorld {
            overlay_scene: Arc::new(MockOverlays::default()),
            camera_controls: Arc::new(MockCamera::default()),
            ray: Arc::new(MockRaycaster::default()),
            attached: AtomicUsize::new(0),
            update_count: AtomicUsize::new(0),
            disposed: AtomicBool::new(false),
        });
        let model = Arc::new(MockModel {
            id: ModelId::new("office"),
            script: Arc::clone(&script),
        });
        let mut fetchable = FxHashMap::default();
        fetchable.insert("/models/office.ifc".to_string(), b"ISO-10303-21;".to_vec());
        Self {
            script,
            world,
            highlighter: Arc::new(MockHighlighter::default()),
            model,
            fetchable: Mutex::new(fetchable),
            worker_counter: AtomicU64::new(0),
            revoked: AtomicUsize::new(0),
        }
    }

    pub fn set_storeys(&self, storeys: Vec<ItemRecord>) {
        *self.script.storeys.lock().unwrap() = storeys;
    }

    pub fn set_workplaces(&self, workplaces: Vec<ItemRecord>) {
        *self.script.workplaces.lock().unwrap() = workplaces;
    }

    pub fn set_progress_script(&self, script: Vec<i32>) {
        *self.script.progress_script.lock().unwrap() = script;
    }

    pub fn fail_import(&self, fail: bool) {
        self.script.fail_import.store(fail, Ordering::Relaxed);
    }

    pub fn fail_queries(&self, fail: bool) {
        self.script.fail_queries.store(fail, Ordering::Relaxed);
    }

    pub fn drop_bbox(&self, id: LocalId) {
        self.script.dropped_bboxes.lock().unwrap().insert(id);
    }

    pub fn model_disposed(&self) -> bool {
        self.script.model_disposed.load(Ordering::Relaxed)
    }

    pub fn revoked_urls(&self) -> usize {
        self.revoked.load(Ordering::Relaxed)
    }
}

impl EngineRuntime for MockRuntime {
    fn create_world(&self, _container: &ContainerHandle) -> EngineResult<Arc<dyn RenderWorld>> {
        Ok(Arc::clone(&self.world) as Arc<dyn RenderWorld>)
    }

    fn create_highlighter(
        &self,
        _world: &Arc<dyn RenderWorld>,
    ) -> EngineResult<Arc<dyn HighlightDriver>> {
        Ok(Arc::clone(&self.highlighter) as Arc<dyn HighlightDriver>)
    }

    fn create_importer(&self, _worker_url: &WorkerUrl) -> EngineResult<Arc<dyn ModelImporter>> {
        Ok(Arc::new(MockImporter {
            model: Arc::clone(&self.model),
            script: Arc::clone(&self.script),
        }))
    }

    fn fetch_bytes(&self, path: &str) -> EngineResult<Vec<u8>> {
        self.fetchable
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::other(format!("404: {path}")))
    }

    fn materialize_worker_script(&self) -> EngineResult<WorkerUrl> {
        let n = self.worker_counter.fetch_add(1, Ordering::Relaxed);
        Ok(WorkerUrl::new(format!("blob:mock-worker-{n}")))
    }

    fn revoke_worker_url(&self, _url: &WorkerUrl) -> EngineResult<()> {
        self.revoked.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// One mock runtime plus direct handles to its observable parts
pub(crate) struct TestBed {
    pub runtime: Arc<MockRuntime>,
    pub world: Arc<MockWorld>,
    pub highlighter: Arc<MockHighlighter>,
    pub camera: Arc<MockCamera>,
    pub raycaster: Arc<MockRaycaster>,
    pub overlays: Arc<MockOverlays>,
}

impl TestBed {
    pub fn new() -> Self {
        let runtime = Arc::new(MockRuntime::new());
        let world = Arc::clone(&runtime.world);
        Self {
            highlighter: Arc::clone(&runtime.highlighter),
            camera: Arc::clone(&world.camera_controls),
            raycaster: Arc::clone(&world.ray),
            overlays: Arc::clone(&world.overlay_scene),
            world,
            runtime,
        }
    }

    /// A bed whose model and fetch path are ready for loading
    pub fn office() -> Self {
        Self::new()
    }

    pub fn with_storeys(self, storeys: Vec<ItemRecord>) -> Self {
        self.runtime.set_storeys(storeys);
        self
    }

    pub fn with_workplaces(self, workplaces: Vec<ItemRecord>) -> Self {
        self.runtime.set_workplaces(workplaces);
        self
    }

    /// A fresh, untouched instance
    pub fn viewer(&self) -> ViewerInstance {
        ViewerInstance::new("test", Arc::clone(&self.runtime) as Arc<dyn EngineRuntime>)
    }

    /// An instance with the scene core initialized
    pub fn viewer_with_core(&self) -> ViewerInstance {
        let mut viewer = self.viewer();
        viewer
            .init_core(ContainerHandle::new("viewer-root"))
            .expect("core init");
        viewer
    }

    /// An instance fully set up but without a model
    pub fn ready_viewer(&self) -> ViewerInstance {
        let mut viewer = self.viewer();
        viewer
            .setup_viewer(ContainerHandle::new("viewer-root"), None)
            .expect("viewer setup");
        viewer
    }

    /// An instance with the office model loaded
    pub fn loaded_viewer(&self) -> ViewerInstance {
        let mut viewer = self.ready_viewer();
        viewer
            .load_model_by_path("/models/office.ifc", "office")
            .expect("model load");
        viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_model_answers_category_queries() {
        let bed = TestBed::new().with_storeys(vec![storey(1, "Ground", 0.0)]);
        let categories = bed
            .runtime
            .model
            .items_of_categories(&[CategoryPattern::new(BUILDING_STOREY_PATTERN)])
            .unwrap();
        assert_eq!(categories[BUILDING_STOREY_PATTERN], vec![LocalId(1)]);
        assert!(!categories.contains_key(FURNISHING_ELEMENT_PATTERN));
    }

    #[test]
    fn test_workplace_builder_shapes_psets() {
        let record = workplace(5, Some("WP-001"), Some("Ground"));
        let psets = crate::data_access::format_item_psets(&record.property_sets);
        assert_eq!(
            psets.get("Identity Data", "Comments").unwrap().as_text(),
            Some("WP-001")
        );
        assert_eq!(
            psets.get("Constraints", "Level").unwrap().as_text(),
            Some("Level: Ground")
        );
    }

    #[test]
    fn test_hover_hit_shape() {
        let hit = RayHit {
            target: ElementRef::new("office", 3u32),
            point: Point3::new(0.0, 0.0, 0.0),
        };
        assert_eq!(hit.target.local_id, LocalId(3));
    }
}
