use crate::runtime::{FrameCallbackId, Runtime};

/// Frame-time access scoped to a [`Runtime`].
#[derive(Clone)]
pub struct FrameClock {
    runtime: Runtime,
}

impl FrameClock {
    pub fn new(runtime: Runtime) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    /// Schedules `callback` for the next frame, passing the frame time in
    /// nanoseconds. Dropping the returned registration cancels it.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        FrameCallbackRegistration::new(self.runtime.clone(), id)
    }

    /// Like [`Self::with_frame_nanos`] but delivers milliseconds.
    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            callback(nanos / 1_000_000);
        })
    }
}

/// Handle to a scheduled frame callback. Cancels on drop so a torn-down
/// owner can never be called back.
pub struct FrameCallbackRegistration {
    runtime: Runtime,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: Runtime, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}
