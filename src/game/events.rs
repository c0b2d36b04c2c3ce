//! Observer interface between the simulation and whatever presents it

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::grid::Position;
use super::state::{GameOverCause, GameState};

/// Summary handed to listeners when a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverReport {
    pub final_score: u32,
    pub cause: GameOverCause,
    /// High score before this game ended
    pub previous_high_score: u32,
}

impl GameOverReport {
    pub fn is_new_high_score(&self) -> bool {
        self.final_score > self.previous_high_score
    }
}

/// Receives simulation events. Every method defaults to a no-op.
pub trait GameListener {
    /// After every tick and every phase transition
    fn on_state_change(&mut self, _state: &GameState) {}

    /// Once per tick in which food was consumed
    fn on_food_eaten(&mut self, _state: &GameState) {}

    /// Once per transition into game over
    fn on_game_over(&mut self, _report: &GameOverReport) {}
}

/// Owned copy of an event, for listeners that defer handling
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StateChanged { score: u32, tick_interval_ms: u64 },
    FoodEaten { at: Position, score: u32 },
    GameOver(GameOverReport),
}

/// Listener that queues events for the frame loop to drain later.
///
/// Clones share one queue, so keep a clone and hand the other to
/// [`GameSession::subscribe`](super::session::GameSession::subscribe).
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<GameEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<GameEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: GameEvent) {
        self.events.borrow_mut().push_back(event);
    }
}

impl GameListener for EventQueue {
    fn on_state_change(&mut self, state: &GameState) {
        self.push(GameEvent::StateChanged {
            score: state.score,
            tick_interval_ms: state.tick_interval_ms,
        });
    }

    fn on_food_eaten(&mut self, state: &GameState) {
        self.push(GameEvent::FoodEaten {
            at: state.snake.head(),
            score: state.score,
        });
    }

    fn on_game_over(&mut self, report: &GameOverReport) {
        self.push(GameEvent::GameOver(*report));
    }
}
