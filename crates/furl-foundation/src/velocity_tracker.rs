//! Release-velocity estimation for snap decisions.
//!
//! Impulse-strategy 1D velocity tracker: velocity is derived from the
//! kinetic energy the touch imparted over its recent samples, which is far
//! more robust against jittery move events than a two-point difference.

/// Ring buffer size for position samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute to the estimate.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped moving.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker over absolute positions.
#[derive(Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Records a position at the given timestamp in milliseconds.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Velocity in units/second. Zero when fewer than two usable samples
    /// exist or the pointer had stopped.
    pub fn calculate_velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current_index = self.index;
        let mut previous = newest;

        while let Some(sample) = self.samples[current_index] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (previous.time_ms - sample.time_ms).abs() as f32;
            previous = sample;

            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }

            positions[count] = sample.position;
            times[count] = -age;

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions, &times, count) * 1000.0
    }

    /// Velocity in units/second clamped to `max_velocity` in magnitude.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse-strategy velocity over the collected window, in units/ms.
fn impulse_velocity(positions: &[f32; HISTORY_SIZE], times: &[f32; HISTORY_SIZE], count: usize) -> f32 {
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let delta = positions[i] - positions[i - 1];
        let v_curr = delta / (current_time - next_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1, sign carried through.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
