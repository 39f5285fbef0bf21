// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Browser tests; run with `wasm-pack test --headless --firefox rust/wasm-bindings`.

#![cfg(target_arch = "wasm32")]

use ifc_processor_viewer::{FrameScheduler, RenderLoop};
use ifc_processor_wasm::{
    is_ifc_file_name, start_render_loop, AnimationFrameScheduler, ViewerControls,
};
use js_sys::Function;
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn render_loop_can_be_cancelled() {
    let render_loop = start_render_loop(Function::new_no_args("")).unwrap();
    assert!(render_loop.is_running());

    render_loop.cancel();
    render_loop.cancel();
    assert!(!render_loop.is_running());
}

#[wasm_bindgen_test]
fn cancelled_frame_is_released() {
    let scheduler = Rc::new(AnimationFrameScheduler::new().unwrap());
    let handle = RenderLoop::start(
        Rc::clone(&scheduler) as Rc<dyn FrameScheduler>,
        || {},
    );
    assert_eq!(scheduler.pending_frames(), 1);

    handle.cancel();
    assert_eq!(scheduler.pending_frames(), 0);
    assert_eq!(Rc::strong_count(&scheduler), 2);

    drop(handle);
    assert_eq!(Rc::strong_count(&scheduler), 1);
}

#[wasm_bindgen_test]
fn rejects_non_ifc_names() {
    assert!(is_ifc_file_name("tower.IFC"));
    assert!(!is_ifc_file_name("tower.txt"));
}

#[wasm_bindgen_test]
fn wheel_then_fit() {
    let mut viewer = ViewerControls::new();
    viewer.on_wheel(1.0);
    viewer.fit_to_box(0.0, 0.0, 0.0, 2.0, 2.0, 2.0);
    assert_eq!(viewer.camera_position(), vec![3.0, 3.0, 3.0]);
}
