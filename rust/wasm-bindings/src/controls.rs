// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer controls exposed to JavaScript
//!
//! Owns the camera, the orbit controller and the loaded model meshes. The
//! host wires canvas events to the `on*` handlers and copies
//! `cameraPosition`/`cameraTarget` into its renderer camera each frame.

use crate::web_ifc::{IfcApi, JsIfcParser};
use ifc_processor_viewer::{
    load_model, BoundingBox, Camera, MeshScene, ModelMesh, OrbitControls, Point3, Scene,
};
use wasm_bindgen::prelude::*;

/// Result of a model load, as seen by JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Items added to the scene
    pub loaded: u32,
    /// Items skipped after a geometry failure
    pub skipped: u32,
    /// Items without vertex data
    pub empty: u32,
}

/// Orbit camera plus loaded model geometry
#[wasm_bindgen]
pub struct ViewerControls {
    camera: Camera,
    controls: OrbitControls,
    scene: MeshScene,
}

impl Default for ViewerControls {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ViewerControls {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            controls: OrbitControls::new(),
            scene: MeshScene::new(),
        }
    }

    /// `mousedown` handler (client coordinates)
    #[wasm_bindgen(js_name = onMouseDown)]
    pub fn on_mouse_down(&mut self, x: f64, y: f64) {
        self.controls.begin_drag(x, y);
    }

    /// `mousemove` handler; rotates the camera while a button is held
    #[wasm_bindgen(js_name = onMouseMove)]
    pub fn on_mouse_move(&mut self, x: f64, y: f64) {
        self.controls.continue_drag(&mut self.camera, x, y);
    }

    /// `mouseup` handler
    #[wasm_bindgen(js_name = onMouseUp)]
    pub fn on_mouse_up(&mut self) {
        self.controls.end_drag();
    }

    /// `wheel` handler taking `WheelEvent.deltaY`
    #[wasm_bindgen(js_name = onWheel)]
    pub fn on_wheel(&mut self, delta_y: f64) {
        self.controls.wheel(&mut self.camera, delta_y);
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.controls.is_dragging()
    }

    /// Camera position as `[x, y, z]`
    #[wasm_bindgen(getter, js_name = cameraPosition)]
    pub fn camera_position(&self) -> Vec<f64> {
        let p = self.camera.position;
        vec![p.x, p.y, p.z]
    }

    /// Camera look-at target as `[x, y, z]`
    #[wasm_bindgen(getter, js_name = cameraTarget)]
    pub fn camera_target(&self) -> Vec<f64> {
        let t = self.camera.target;
        vec![t.x, t.y, t.z]
    }

    /// Put the camera back at its initial placement
    #[wasm_bindgen(js_name = resetCamera)]
    pub fn reset_camera(&mut self) {
        self.camera = Camera::default();
    }

    /// Frame the loaded model
    #[wasm_bindgen(js_name = fitToModel)]
    pub fn fit_to_model(&mut self) {
        let bounds = self.scene.model_bounds();
        self.controls.fit_to_bounds(&mut self.camera, &bounds);
    }

    /// Frame an arbitrary box given by its corners
    #[wasm_bindgen(js_name = fitToBox)]
    #[allow(clippy::too_many_arguments)]
    pub fn fit_to_box(
        &mut self,
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) {
        let bounds = BoundingBox::from_corners(
            Point3::new(min_x, min_y, min_z),
            Point3::new(max_x, max_y, max_z),
        );
        self.controls.fit_to_bounds(&mut self.camera, &bounds);
    }

    /// Replace the loaded model with `data`, decoded by web-ifc, and frame it.
    ///
    /// Items web-ifc cannot process are skipped. Throws when the file
    /// itself cannot be opened.
    #[wasm_bindgen(js_name = loadModel)]
    pub fn load_model(&mut self, api: &IfcApi, data: &[u8]) -> Result<LoadSummary, JsError> {
        let mut parser = JsIfcParser::new(api.clone());
        let report = load_model(
            &mut parser,
            &mut self.scene,
            &mut self.camera,
            &self.controls,
            data,
        )
        .map_err(|e| JsError::new(&e.to_string()))?;

        Ok(LoadSummary {
            loaded: report.loaded as u32,
            skipped: report.skipped as u32,
            empty: report.empty as u32,
        })
    }

    /// Remove the loaded model
    #[wasm_bindgen(js_name = clearModel)]
    pub fn clear_model(&mut self) {
        self.scene.clear_model();
    }

    #[wasm_bindgen(getter, js_name = meshCount)]
    pub fn mesh_count(&self) -> usize {
        self.scene.len()
    }

    #[wasm_bindgen(js_name = meshExpressId)]
    pub fn mesh_express_id(&self, index: usize) -> Option<u32> {
        self.mesh(index).map(|m| m.express_id)
    }

    #[wasm_bindgen(js_name = meshPositions)]
    pub fn mesh_positions(&self, index: usize) -> Option<Vec<f32>> {
        self.mesh(index).map(|m| m.positions.clone())
    }

    #[wasm_bindgen(js_name = meshNormals)]
    pub fn mesh_normals(&self, index: usize) -> Option<Vec<f32>> {
        self.mesh(index).map(|m| m.normals.clone())
    }

    #[wasm_bindgen(js_name = meshIndices)]
    pub fn mesh_indices(&self, index: usize) -> Option<Vec<u32>> {
        self.mesh(index).map(|m| m.indices.clone())
    }

    /// RGBA color in 0-1 range
    #[wasm_bindgen(js_name = meshColor)]
    pub fn mesh_color(&self, index: usize) -> Option<Vec<f32>> {
        self.mesh(index).map(|m| m.color.to_vec())
    }
}

impl ViewerControls {
    fn mesh(&self, index: usize) -> Option<&ModelMesh> {
        self.scene.get(index)
    }

    /// Add a mesh decoded outside the bindings
    pub fn add_mesh(&mut self, mesh: ModelMesh) {
        self.scene.add_mesh(mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_processor_viewer::GeometryItem;

    #[test]
    fn test_drag_moves_camera_only_while_pressed() {
        let mut viewer = ViewerControls::new();
        let start = viewer.camera_position();

        viewer.on_mouse_move(50.0, 50.0);
        assert_eq!(viewer.camera_position(), start);

        viewer.on_mouse_down(0.0, 0.0);
        assert!(viewer.is_dragging());
        viewer.on_mouse_move(30.0, 0.0);
        assert_ne!(viewer.camera_position(), start);

        viewer.on_mouse_up();
        let released = viewer.camera_position();
        viewer.on_mouse_move(90.0, 90.0);
        assert_eq!(viewer.camera_position(), released);
    }

    #[test]
    fn test_fit_to_box() {
        let mut viewer = ViewerControls::new();
        viewer.fit_to_box(0.0, 0.0, 0.0, 2.0, 2.0, 2.0);
        assert_eq!(viewer.camera_position(), vec![3.0, 3.0, 3.0]);
        assert_eq!(viewer.camera_target(), vec![1.0, 1.0, 1.0]);

        viewer.reset_camera();
        assert_eq!(viewer.camera_position(), vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_fit_to_model_and_mesh_accessors() {
        let mut viewer = ViewerControls::new();
        viewer.fit_to_model();
        assert_eq!(viewer.camera_position(), vec![10.0, 10.0, 10.0]);

        viewer.add_mesh(ModelMesh::from_geometry(GeometryItem::new(
            9,
            vec![0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0],
            vec![0, 1, 2],
        )));
        viewer.fit_to_model();

        assert_eq!(viewer.mesh_count(), 1);
        assert_eq!(viewer.mesh_express_id(0), Some(9));
        assert_eq!(viewer.mesh_indices(0), Some(vec![0, 1, 2]));
        assert_eq!(viewer.mesh_color(0).map(|c| c.len()), Some(4));
        assert_eq!(viewer.mesh_positions(1), None);
        assert_eq!(viewer.camera_position(), vec![6.0, 6.0, 4.0]);

        viewer.clear_model();
        assert_eq!(viewer.mesh_count(), 0);
    }

    #[test]
    fn test_wheel_zooms() {
        let mut viewer = ViewerControls::new();
        viewer.on_wheel(-100.0);
        let zoomed_in = viewer.camera_position();
        assert!((zoomed_in[0] - 9.0).abs() < 1e-9);

        viewer.on_wheel(0.0);
        assert_eq!(viewer.camera_position(), zoomed_in);
    }
}
