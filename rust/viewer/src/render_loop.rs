// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-frame render loop with explicit cancellation
//!
//! The host environment schedules one callback per display refresh
//! through a [`FrameScheduler`]. [`RenderLoop::start`] keeps re-scheduling
//! the frame callback until the returned [`RenderLoopHandle`] is cancelled
//! or dropped, so the loop can never outlive the view that owns it.
//!
//! Everything here runs on the single event-dispatch thread.

use crate::error::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifier of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// Host-provided per-frame scheduling (e.g. `requestAnimationFrame`)
pub trait FrameScheduler {
    /// Schedule `frame` to run once on the next display refresh
    fn request_frame(&self, frame: Box<dyn FnOnce()>) -> Result<FrameId>;

    /// Cancel a frame that has not run yet
    fn cancel_frame(&self, id: FrameId);
}

struct LoopState {
    running: Cell<bool>,
    pending: Cell<Option<FrameId>>,
    frames: Cell<u64>,
    on_frame: RefCell<Box<dyn FnMut()>>,
}

/// Repeating frame loop driven by a [`FrameScheduler`]
pub struct RenderLoop;

impl RenderLoop {
    /// Start invoking `on_frame` once per frame until the handle is
    /// cancelled or dropped
    pub fn start<F>(scheduler: Rc<dyn FrameScheduler>, on_frame: F) -> RenderLoopHandle
    where
        F: FnMut() + 'static,
    {
        let state = Rc::new(LoopState {
            running: Cell::new(true),
            pending: Cell::new(None),
            frames: Cell::new(0),
            on_frame: RefCell::new(Box::new(on_frame)),
        });

        schedule_next(&state, &scheduler);
        tracing::debug!(running = state.running.get(), "Render loop started");

        RenderLoopHandle { state, scheduler }
    }
}

fn schedule_next(state: &Rc<LoopState>, scheduler: &Rc<dyn FrameScheduler>) {
    let frame_state = Rc::clone(state);
    let frame_scheduler = Rc::clone(scheduler);

    let frame = Box::new(move || {
        frame_state.pending.set(None);
        if !frame_state.running.get() {
            return;
        }

        (frame_state.on_frame.borrow_mut())();
        frame_state.frames.set(frame_state.frames.get() + 1);

        // The callback may have cancelled the loop
        if frame_state.running.get() {
            schedule_next(&frame_state, &frame_scheduler);
        }
    });

    match scheduler.request_frame(frame) {
        Ok(id) => state.pending.set(Some(id)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to schedule frame, stopping render loop");
            state.running.set(false);
        }
    }
}

/// Cancel handle for a running [`RenderLoop`]. Dropping it stops the loop.
pub struct RenderLoopHandle {
    state: Rc<LoopState>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl RenderLoopHandle {
    /// Stop scheduling frames and cancel the pending one. Idempotent.
    pub fn cancel(&self) {
        if !self.state.running.replace(false) {
            return;
        }
        if let Some(id) = self.state.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        tracing::debug!(frames = self.state.frames.get(), "Render loop cancelled");
    }

    /// Whether frames are still being scheduled
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Number of frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.state.frames.get()
    }
}

impl Drop for RenderLoopHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
