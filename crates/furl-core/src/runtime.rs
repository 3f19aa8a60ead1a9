//! Single-threaded frame-callback runtime.
//!
//! The engine never spins its own loop: a host (windowing shell, test
//! harness) registers interest in frames through [`Runtime`] and pumps it by
//! calling [`Runtime::drain_frame_callbacks`] with the current frame time.
//! Callbacks are one-shot; anything that wants the next frame re-registers.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Identifier for a registered frame callback, used for cancellation.
pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    needs_frame: Cell<bool>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            needs_frame: Cell::new(false),
        }
    }

    fn register_frame_callback(
        &self,
        callback: Box<dyn FnOnce(u64) + 'static>,
    ) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.needs_frame.set(true);
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Take the current batch before invoking anything: callbacks may
        // register follow-up callbacks for the next frame, and those must not
        // run in this drain.
        let mut pending: SmallVec<[Box<dyn FnOnce(u64) + 'static>; 8]> = SmallVec::new();
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
        }
        if !pending.is_empty() {
            log::trace!("draining {} frame callbacks", pending.len());
        }
        for callback in pending {
            callback(frame_time_nanos);
        }
        if self.frame_callbacks.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }
}

/// Cloneable handle to the shared runtime. One per UI event loop.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    /// Registers a one-shot callback invoked on the next drained frame.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackId {
        self.inner.register_frame_callback(Box::new(callback))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        self.inner.cancel_frame_callback(id);
    }

    /// Runs every callback registered before this call with the given frame
    /// time in nanoseconds. Hosts call this once per vsync/tick.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    /// Whether anything is waiting on a frame. Hosts may idle when false.
    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
