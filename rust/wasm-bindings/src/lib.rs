// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Processor WebAssembly Bindings
//!
//! Browser surface of the viewer: pointer and wheel handlers for the orbit
//! camera, model loading through web-ifc, and a cancellable render loop
//! built on `requestAnimationFrame`. Drawing stays with the JavaScript
//! renderer, which reads the camera and meshes back from [`ViewerControls`].

use wasm_bindgen::prelude::*;

#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

mod controls;
mod scheduler;
mod utils;
mod web_ifc;

pub use controls::{LoadSummary, ViewerControls};
pub use scheduler::{start_render_loop, AnimationFrameScheduler, JsRenderLoop};
pub use web_ifc::{IfcApi, JsIfcParser};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
    utils::init_logging();
}

/// Get the version of the viewer bindings
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check whether a file name carries the `.ifc` extension
#[wasm_bindgen(js_name = isIfcFileName)]
pub fn is_ifc_file_name(name: &str) -> bool {
    ifc_processor_viewer::is_ifc_file_name(name)
}
