// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `requestAnimationFrame` scheduling for the render loop

use crate::utils::js_error_message;
use ifc_processor_viewer::{Error, FrameId, FrameScheduler, RenderLoop, RenderLoopHandle, Result};
use js_sys::Function;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// [`FrameScheduler`] backed by the browser window
///
/// Frame closures stay owned here until they have run or been cancelled, so
/// a cancelled frame is freed instead of staying registered with wasm-bindgen.
pub struct AnimationFrameScheduler {
    window: web_sys::Window,
    frames: RefCell<HashMap<i32, Closure<dyn FnMut()>>>,
    // Frames whose callback has returned; dropped on the next request
    finished: Rc<RefCell<Vec<i32>>>,
}

impl AnimationFrameScheduler {
    /// Fails outside a window context (e.g. in a worker)
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Scheduler("No global window".into()))?;
        Ok(Self {
            window,
            frames: RefCell::new(HashMap::new()),
            finished: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Number of frame closures still held
    pub fn pending_frames(&self) -> usize {
        self.sweep_finished();
        self.frames.borrow().len()
    }

    fn sweep_finished(&self) {
        let finished: Vec<i32> = self.finished.borrow_mut().drain(..).collect();
        let mut frames = self.frames.borrow_mut();
        for id in finished {
            frames.remove(&id);
        }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, frame: Box<dyn FnOnce()>) -> Result<FrameId> {
        // The frame currently running is not in `finished` yet, so this never
        // drops a closure that is still executing
        self.sweep_finished();

        let own_id = Rc::new(Cell::new(None::<i32>));
        let finished = Rc::clone(&self.finished);
        let closure_id = Rc::clone(&own_id);
        let callback = Closure::once(move || {
            frame();
            if let Some(id) = closure_id.get() {
                finished.borrow_mut().push(id);
            }
        });

        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| Error::Scheduler(js_error_message(&e)))?;

        own_id.set(Some(id));
        self.frames.borrow_mut().insert(id, callback);
        Ok(FrameId(id))
    }

    fn cancel_frame(&self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id.0) {
            tracing::warn!(frame = id.0, error = %js_error_message(&e), "cancelAnimationFrame failed");
        }
        // Release the map borrow before the closure and its captures drop
        let cancelled = self.frames.borrow_mut().remove(&id.0);
        drop(cancelled);
    }
}

/// Running render loop; call `cancel()` when the view is torn down
#[wasm_bindgen(js_name = RenderLoop)]
pub struct JsRenderLoop {
    handle: RenderLoopHandle,
}

#[wasm_bindgen(js_class = RenderLoop)]
impl JsRenderLoop {
    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    #[wasm_bindgen(getter, js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.handle.frame_count() as f64
    }
}

/// Call `callback` once per animation frame until the returned loop is
/// cancelled or freed.
///
/// Example:
/// ```javascript
/// const loop = startRenderLoop(() => renderer.render(scene, camera));
/// // on teardown
/// loop.cancel();
/// ```
#[wasm_bindgen(js_name = startRenderLoop)]
pub fn start_render_loop(callback: Function) -> std::result::Result<JsRenderLoop, JsError> {
    let scheduler = AnimationFrameScheduler::new().map_err(|e| JsError::new(&e.to_string()))?;

    let handle = RenderLoop::start(Rc::new(scheduler), move || {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            tracing::error!(error = %js_error_message(&e), "Render callback threw");
        }
    });

    Ok(JsRenderLoop { handle })
}
