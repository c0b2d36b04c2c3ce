//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The presentation layer drives a [`GameSession`] and observes it through
//! [`GameListener`]s.

pub mod config;
pub mod direction;
pub mod engine;
pub mod events;
pub mod grid;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::{Difficulty, GameConfig, SpeedSettings};
pub use direction::Direction;
pub use engine::{GameEngine, StepOutcome};
pub use events::{EventQueue, GameEvent, GameListener, GameOverReport};
pub use grid::{Grid, Position};
pub use session::GameSession;
pub use state::{GameOverCause, GameState, Phase, Snake};
