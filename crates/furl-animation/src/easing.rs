//! Monotonic easing curves for settle transitions.

/// Easing functions applied to the linear fraction of a settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// cubic-bezier(0.25, 0.10, 0.25, 1.0) — the curve the sheet settles
    /// with by default.
    Standard,
    /// cubic-bezier(0.4, 0.0, 0.2, 1.0), material standard.
    FastOutSlowIn,
    /// cubic-bezier(0.0, 0.0, 0.58, 1.0).
    EaseOut,
}

impl Easing {
    /// Apply the easing to a linear fraction in [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::Standard => cubic_bezier(0.25, 0.10, 0.25, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve evaluation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric t matching the x fraction, clamped
    // to [0, 1].
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        // Binary subdivision fallback when Newton-Raphson stalls.
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Settle specification: fixed duration plus easing. Springs are
/// intentionally not supported; the settle must terminate at a deterministic
/// time for a given spec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing applied over the duration.
    pub easing: Easing,
}

impl SettleSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }
}

impl Default for SettleSpec {
    fn default() -> Self {
        Self::new(250, Easing::Standard)
    }
}
