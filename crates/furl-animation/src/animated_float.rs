//! The single animated progress value behind a sheet.
//!
//! Exactly one of two driving modes is active at any instant: direct writes
//! (while a drag owns the value) or a timed settle running on frame
//! callbacks. A settle's completion closure fires only when the settle runs
//! to its end uninterrupted; any interruption drops it silently, which is
//! what lets the engine guarantee one lifecycle callback per logical
//! transition.

use crate::easing::SettleSpec;
use furl_core::{FrameCallbackRegistration, FrameClock, Runtime};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type FinishedCallback = Box<dyn FnOnce() + 'static>;
type ValueListener = Rc<dyn Fn(f32) + 'static>;

pub struct AnimatedFloat {
    inner: Rc<RefCell<AnimatedFloatInner>>,
}

struct AnimatedFloatInner {
    clock: FrameClock,
    current: f32,
    start: f32,
    target: f32,
    spec: SettleSpec,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_finished: Option<FinishedCallback>,
    listener: Option<ValueListener>,
}

impl AnimatedFloat {
    pub fn new(initial: f32, runtime: Runtime) -> Self {
        let inner = AnimatedFloatInner {
            clock: FrameClock::new(runtime),
            current: initial,
            start: initial,
            target: initial,
            spec: SettleSpec::default(),
            start_time_nanos: None,
            registration: None,
            on_finished: None,
            listener: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Current value, valid at any time, including mid-settle.
    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Observes every value change (direct writes and settle frames).
    pub fn set_listener(&self, listener: impl Fn(f32) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Direct-mode write. Interrupts any running settle; its completion
    /// closure is dropped.
    pub fn set_value(&self, value: f32) {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            inner.interrupt();
            inner.current = value;
            inner.start = value;
            inner.target = value;
            inner.listener.clone()
        };
        notify(listener, value);
    }

    /// Interrupts any running settle and returns the in-flight value, which
    /// becomes the caller's new baseline. No completion fires.
    pub fn stop(&self) -> f32 {
        let mut inner = self.inner.borrow_mut();
        inner.interrupt();
        let value = inner.current;
        inner.start = value;
        inner.target = value;
        value
    }

    /// Jump to `value` with no animation and no completion callback.
    pub fn snap_to(&self, value: f32) {
        self.set_value(value);
    }

    /// Starts a settle toward `target`. A previous settle, if any, is
    /// interrupted first and never completes. `on_finished` fires exactly
    /// once, on the frame the settle reaches its target, or never if this
    /// settle is itself interrupted.
    pub fn settle_to(&self, target: f32, spec: SettleSpec, on_finished: impl FnOnce() + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.interrupt();
            log::trace!(
                "settle {:.1} -> {target:.1} over {}ms",
                inner.current,
                spec.duration_millis
            );
            inner.start = inner.current;
            inner.target = target;
            inner.spec = spec;
            inner.start_time_nanos = None;
            inner.on_finished = Some(Box::new(on_finished));
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatedFloatInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak: Weak<RefCell<AnimatedFloatInner>> = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatedFloatInner>>, frame_time_nanos: u64) {
        let mut finished = None;
        let listener;
        let value;
        let mut schedule_next = false;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let duration_nanos = (inner.spec.duration_millis * 1_000_000).max(1);
            let linear = (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
            let eased = inner.spec.easing.transform(linear);

            inner.current = inner.start + (inner.target - inner.start) * eased;

            if linear >= 1.0 {
                inner.current = inner.target;
                inner.start = inner.target;
                inner.start_time_nanos = None;
                finished = inner.on_finished.take();
            } else {
                schedule_next = true;
            }
            value = inner.current;
            listener = inner.listener.clone();
        }

        notify(listener, value);
        if schedule_next {
            Self::schedule_frame(this);
        } else if let Some(callback) = finished {
            callback();
        }
    }
}

impl AnimatedFloatInner {
    /// Cancels the pending frame and drops the completion closure, so an
    /// interrupted settle can never report completion.
    fn interrupt(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.on_finished = None;
        self.start_time_nanos = None;
    }
}

impl Clone for AnimatedFloat {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

fn notify(listener: Option<ValueListener>, value: f32) {
    if let Some(listener) = listener {
        listener(value);
    }
}
