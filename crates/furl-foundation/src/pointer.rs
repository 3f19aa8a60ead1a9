//! Minimal single-pointer touch events.
//!
//! Hosts translate whatever their platform delivers into this stream. Within
//! one touch the engine relies on causal order: Down, then Moves, then one
//! Up or Cancel.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
    /// Event timestamp in milliseconds, used for velocity tracking.
    pub time_ms: i64,
}

impl TouchEvent {
    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Down,
            x,
            y,
            time_ms,
        }
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Move,
            x,
            y,
            time_ms,
        }
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Up,
            x,
            y,
            time_ms,
        }
    }

    pub fn cancel(x: f32, y: f32, time_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            x,
            y,
            time_ms,
        }
    }
}
