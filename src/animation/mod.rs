//! Time-based tweening for cosmetic transitions
//!
//! Unrelated to the game tick: the front end feeds wall-clock milliseconds into
//! [`Animator::advance`] once per frame.

pub mod animator;
pub mod easing;

pub use animator::{Animator, UpdateFn};
pub use easing::{lerp, Easing};
