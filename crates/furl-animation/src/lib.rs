//! Animation layer for the furl sheet engine.
//!
//! Fixed-duration eased settles only: the settle's terminal value and
//! completion frame are fully determined by its spec, which keeps the
//! engine's lifecycle-callback contract testable.

mod animated_float;
mod easing;

pub use animated_float::AnimatedFloat;
pub use easing::{Easing, SettleSpec};

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
