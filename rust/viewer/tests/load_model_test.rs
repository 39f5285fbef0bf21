// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model loading against an in-memory parser.

use ifc_processor_viewer::{
    load_model, Camera, Error, GeometryItem, LoadReport, MeshScene, ModelHandle, ModelParser,
    OrbitControls, Point3, Result, Scene,
};
use std::collections::HashMap;

/// Parser serving canned geometry; items missing from `geometry` fail.
#[derive(Default)]
struct FakeParser {
    products: Vec<u32>,
    geometry: HashMap<u32, GeometryItem>,
    reject_open: bool,
    fail_enumeration: bool,
    open: Vec<ModelHandle>,
    closed: Vec<ModelHandle>,
}

impl FakeParser {
    fn with_item(mut self, item: GeometryItem) -> Self {
        self.products.push(item.express_id);
        self.geometry.insert(item.express_id, item);
        self
    }

    fn with_broken_item(mut self, id: u32) -> Self {
        self.products.push(id);
        self
    }
}

impl ModelParser for FakeParser {
    fn open_model(&mut self, data: &[u8]) -> Result<ModelHandle> {
        if self.reject_open || data.is_empty() {
            return Err(Error::ModelOpen("unreadable buffer".into()));
        }
        let handle = ModelHandle(self.open.len() as u32);
        self.open.push(handle);
        Ok(handle)
    }

    fn product_ids(&self, _handle: ModelHandle) -> Result<Vec<u32>> {
        if self.fail_enumeration {
            return Err(Error::Enumerate("corrupt index".into()));
        }
        Ok(self.products.clone())
    }

    fn geometry(&self, _handle: ModelHandle, express_id: u32) -> Result<GeometryItem> {
        self.geometry
            .get(&express_id)
            .cloned()
            .ok_or_else(|| Error::item(express_id, "unsupported representation"))
    }

    fn close_model(&mut self, handle: ModelHandle) {
        self.closed.push(handle);
    }
}

fn box_corner_triangle(id: u32, min: f32, max: f32) -> GeometryItem {
    GeometryItem::new(
        id,
        vec![min, min, min, max, min, min, max, max, max],
        vec![0, 1, 2],
    )
}

#[test]
fn loads_items_and_fits_camera() {
    let mut parser = FakeParser::default()
        .with_item(box_corner_triangle(10, 0.0, 1.0))
        .with_item(box_corner_triangle(11, 1.0, 2.0));
    let mut scene = MeshScene::new();
    let mut camera = Camera::default();
    let controls = OrbitControls::new();

    let report = load_model(&mut parser, &mut scene, &mut camera, &controls, b"ISO-10303-21;").unwrap();

    assert_eq!(report, LoadReport { loaded: 2, skipped: 0, empty: 0 });
    assert_eq!(scene.len(), 2);
    assert_eq!(camera.position, Point3::new(3.0, 3.0, 3.0));
    assert_eq!(camera.target, Point3::new(1.0, 1.0, 1.0));
    assert_eq!(parser.closed, parser.open);
}

#[test]
fn failing_items_are_skipped() {
    let mut parser = FakeParser::default()
        .with_broken_item(1)
        .with_item(box_corner_triangle(2, 0.0, 2.0))
        .with_broken_item(3)
        .with_item(GeometryItem::new(4, Vec::new(), Vec::new()));
    let mut scene = MeshScene::new();
    let mut camera = Camera::default();

    let report = load_model(&mut parser, &mut scene, &mut camera, &OrbitControls::new(), b"data").unwrap();

    assert_eq!(report, LoadReport { loaded: 1, skipped: 2, empty: 1 });
    assert_eq!(scene.get(0).map(|m| m.express_id), Some(2));
    assert_eq!(camera.position, Point3::new(3.0, 3.0, 3.0));
}

#[test]
fn reload_replaces_previous_model() {
    let mut scene = MeshScene::new();
    let mut camera = Camera::default();
    let controls = OrbitControls::new();

    let mut first = FakeParser::default().with_item(box_corner_triangle(1, 0.0, 10.0));
    load_model(&mut first, &mut scene, &mut camera, &controls, b"a").unwrap();

    let mut second = FakeParser::default().with_item(box_corner_triangle(2, 0.0, 2.0));
    load_model(&mut second, &mut scene, &mut camera, &controls, b"b").unwrap();

    assert_eq!(scene.len(), 1);
    assert_eq!(scene.model_meshes().next().map(|m| m.express_id), Some(2));
    assert_eq!(camera.position, Point3::new(3.0, 3.0, 3.0));
}

#[test]
fn unreadable_file_leaves_camera_alone() {
    let mut parser = FakeParser {
        reject_open: true,
        ..FakeParser::default()
    };
    let mut scene = MeshScene::new();
    let mut camera = Camera::default();

    let err = load_model(&mut parser, &mut scene, &mut camera, &OrbitControls::new(), b"junk").unwrap_err();

    assert!(matches!(err, Error::ModelOpen(_)));
    assert!(scene.is_empty());
    assert_eq!(camera, Camera::default());
    assert!(parser.closed.is_empty());
}

#[test]
fn unreadable_file_keeps_previous_model() {
    let mut scene = MeshScene::new();
    let mut camera = Camera::default();
    let controls = OrbitControls::new();

    let mut first = FakeParser::default().with_item(box_corner_triangle(7, 0.0, 2.0));
    load_model(&mut first, &mut scene, &mut camera, &controls, b"model").unwrap();
    let framed = camera;

    let mut broken = FakeParser {
        reject_open: true,
        ..FakeParser::default()
    };
    let err = load_model(&mut broken, &mut scene, &mut camera, &controls, b"junk").unwrap_err();

    assert!(matches!(err, Error::ModelOpen(_)));
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.get(0).map(|m| m.express_id), Some(7));
    assert_eq!(camera, framed);
    assert!(broken.closed.is_empty());
}

#[test]
fn enumeration_failure_still_closes_model() {
    let mut parser = FakeParser {
        fail_enumeration: true,
        ..FakeParser::default()
    };
    let mut scene = MeshScene::new();
    let mut camera = Camera::default();

    let err = load_model(&mut parser, &mut scene, &mut camera, &OrbitControls::new(), b"x").unwrap_err();

    assert!(matches!(err, Error::Enumerate(_)));
    assert_eq!(parser.closed, vec![ModelHandle(0)]);
    assert_eq!(camera, Camera::default());
}

#[test]
fn iterate_geometry_reports_each_item() {
    let mut parser = FakeParser::default()
        .with_item(box_corner_triangle(5, 0.0, 1.0))
        .with_broken_item(6);
    let handle = parser.open_model(b"x").unwrap();

    let results: Vec<(u32, bool)> = parser
        .iterate_geometry(handle)
        .unwrap()
        .map(|(id, geometry)| (id, geometry.is_ok()))
        .collect();

    assert_eq!(results, vec![(5, true), (6, false)]);
}
