//! Retro Snake - classic Snake on a fixed-tick grid
//!
//! This library provides:
//! - Core game logic and session lifecycle (game module)
//! - Keyed tweens with easing for cosmetic transitions (animation module)
//! - High score and config persistence (storage module)
//! - Terminal front end (input, render and modes modules)

pub mod animation;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod storage;
