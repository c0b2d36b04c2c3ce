//! Session lifecycle: phase transitions, the tick clock and event fan-out

use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GameEngine, StepOutcome},
    events::{GameListener, GameOverReport},
    state::{GameOverCause, GameState, Phase},
};

/// A single player's game, driven by explicit `advance` calls
pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    listeners: Vec<Box<dyn GameListener>>,
    /// Time accumulated towards the next tick while running
    elapsed_ms: u64,
}

impl GameSession {
    /// Validate `config` and start a session on the start screen
    pub fn new(config: GameConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self::with_engine(GameEngine::new(config)))
    }

    /// Wrap an existing engine, whose config must already be validated
    pub fn with_engine(mut engine: GameEngine) -> Self {
        let state = engine.new_state();
        Self {
            engine,
            state,
            listeners: Vec::new(),
            elapsed_ms: 0,
        }
    }

    /// Seed the high score read from persistent storage
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.state.high_score = high_score;
        self
    }

    pub fn subscribe(&mut self, listener: impl GameListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Request a turn for the next tick.
    ///
    /// Reversals of the current direction are dropped so they cannot clobber
    /// an earlier valid request; later requests replace earlier ones.
    pub fn submit_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.state.phase, Phase::Running | Phase::Paused) {
            return false;
        }

        if self.state.snake.direction.is_opposite(direction) {
            debug!(?direction, "ignoring reversal");
            return false;
        }

        self.state.pending_direction = direction;
        true
    }

    /// Begin a game from the start screen or the game-over screen
    pub fn start(&mut self) -> bool {
        if !matches!(self.state.phase, Phase::NotStarted | Phase::GameOver) {
            return false;
        }

        self.engine.reset(&mut self.state);
        self.state.phase = Phase::Running;
        self.elapsed_ms = 0;

        info!(high_score = self.state.high_score, "game started");
        self.emit_state_change();
        true
    }

    /// Toggle between running and paused
    pub fn pause(&mut self) -> bool {
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                debug!(elapsed_ms = self.elapsed_ms, "paused");
                self.emit_state_change();
                true
            }
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != Phase::Paused {
            return false;
        }

        self.state.phase = Phase::Running;
        debug!(elapsed_ms = self.elapsed_ms, "resumed");
        self.emit_state_change();
        true
    }

    /// Back to the start screen with a fresh board
    pub fn restart(&mut self) -> bool {
        if self.state.phase == Phase::NotStarted {
            return false;
        }

        self.engine.reset(&mut self.state);
        self.elapsed_ms = 0;

        debug!("restarted");
        self.emit_state_change();
        true
    }

    /// Feed wall-clock time into the tick clock.
    ///
    /// At most one step runs per call; leftover time past the interval is
    /// dropped. Nothing accumulates unless the game is running.
    pub fn advance(&mut self, delta_ms: u64) -> Option<StepOutcome> {
        if self.state.phase != Phase::Running {
            return None;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms < self.state.tick_interval_ms {
            return None;
        }

        self.elapsed_ms = 0;
        Some(self.tick())
    }

    /// Run one step immediately, regardless of the tick clock
    pub fn tick(&mut self) -> StepOutcome {
        let outcome = self.engine.step(&mut self.state);

        match outcome {
            StepOutcome::Idle => {}
            StepOutcome::Moved { ate_food } => {
                if ate_food {
                    debug!(
                        score = self.state.score,
                        interval_ms = self.state.tick_interval_ms,
                        "food eaten"
                    );
                    self.emit_food_eaten();
                }
                self.emit_state_change();
            }
            StepOutcome::Ended(cause) => {
                if cause == GameOverCause::BoardFilled {
                    self.emit_food_eaten();
                }
                self.finish(cause);
            }
        }

        outcome
    }

    /// Time accumulated towards the next tick
    pub fn pending_ms(&self) -> u64 {
        self.elapsed_ms
    }

    fn finish(&mut self, cause: GameOverCause) {
        let report = GameOverReport {
            final_score: self.state.score,
            cause,
            previous_high_score: self.state.high_score,
        };

        if report.is_new_high_score() {
            self.state.high_score = report.final_score;
        }

        info!(
            score = report.final_score,
            ?cause,
            new_high_score = report.is_new_high_score(),
            "game over"
        );

        self.emit_state_change();
        for listener in &mut self.listeners {
            listener.on_game_over(&report);
        }
    }

    fn emit_state_change(&mut self) {
        let Self { listeners, state, .. } = self;
        for listener in listeners.iter_mut() {
            listener.on_state_change(state);
        }
    }

    fn emit_food_eaten(&mut self) {
        let Self { listeners, state, .. } = self;
        for listener in listeners.iter_mut() {
            listener.on_food_eaten(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::{EventQueue, GameEvent};
    use crate::game::grid::Position;

    fn session() -> GameSession {
        GameSession::with_engine(GameEngine::with_seed(GameConfig::default(), 17))
    }

    #[test]
    fn test_starts_not_started() {
        let session = session();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(GameSession::new(GameConfig::new(0, 20)).is_err());

        let mut config = GameConfig::new(4, 4);
        config.initial_snake_length = 4;
        assert!(GameSession::new(config).is_err());

        let session = GameSession::new(GameConfig::small()).unwrap();
        assert!(session.config().validate().is_ok());
    }

    #[test]
    fn test_start_resets_board() {
        let mut session = session().with_high_score(70);
        assert!(session.start());

        let state = session.state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.high_score, 70);
        assert_eq!(state.tick_interval_ms, 150);
        assert_eq!(state.pending_direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert!(!state.snake.contains(state.food));

        // Already running
        assert!(!session.start());
    }

    #[test]
    fn test_commands_rejected_in_wrong_phase() {
        let mut session = session();

        assert!(!session.pause());
        assert!(!session.resume());
        assert!(!session.restart());
        assert!(!session.submit_direction(Direction::Up));
        assert_eq!(session.advance(1_000), None);
    }

    #[test]
    fn test_advance_waits_for_interval() {
        let mut session = session();
        session.start();
        session.state.food = Position::new(0, 0);

        assert_eq!(session.advance(100), None);
        assert_eq!(session.pending_ms(), 100);
        assert_eq!(
            session.advance(50),
            Some(StepOutcome::Moved { ate_food: false })
        );
        assert_eq!(session.pending_ms(), 0);
        assert_eq!(session.state().snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut session = session();
        session.start();
        session.state.food = Position::new(0, 0);

        session.advance(120);
        assert!(session.pause());
        assert_eq!(session.phase(), Phase::Paused);

        assert_eq!(session.advance(10_000), None);
        assert_eq!(session.pending_ms(), 120);
        assert_eq!(session.state().snake.head(), Position::new(10, 10));

        assert!(session.pause());
        assert_eq!(session.phase(), Phase::Running);
        assert!(session.advance(30).is_some());
    }

    #[test]
    fn test_direction_requests_collapse_to_latest() {
        let mut session = session();
        session.start();
        session.state.food = Position::new(0, 0);

        assert!(session.submit_direction(Direction::Up));
        assert!(session.submit_direction(Direction::Down));
        assert!(!session.submit_direction(Direction::Left));
        assert_eq!(session.state().pending_direction, Direction::Down);

        session.tick();
        assert_eq!(session.state().snake.direction, Direction::Down);
        assert_eq!(session.state().snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_direction_accepted_while_paused() {
        let mut session = session();
        session.start();
        session.pause();

        assert!(session.submit_direction(Direction::Up));
        assert_eq!(session.state().pending_direction, Direction::Up);
    }

    #[test]
    fn test_game_over_updates_high_score() {
        let mut session = session().with_high_score(20);
        let queue = EventQueue::new();
        session.subscribe(queue.clone());
        session.start();
        queue.drain();

        session.state.score = 30;
        session.state.snake.body[0] = Position::new(19, 10);
        session.state.food = Position::new(0, 0);
        let outcome = session.tick();

        assert_eq!(outcome, StepOutcome::Ended(GameOverCause::Wall));
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.state().high_score, 30);

        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            GameEvent::GameOver(GameOverReport {
                final_score: 30,
                cause: GameOverCause::Wall,
                previous_high_score: 20,
            })
        );
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut session = session().with_high_score(100);
        session.start();
        session.state.score = 30;
        session.state.snake.body[0] = Position::new(19, 10);
        session.state.food = Position::new(0, 0);

        session.tick();

        assert_eq!(session.state().high_score, 100);
        assert_eq!(session.state().score, 30);
    }

    #[test]
    fn test_food_event_fires_once_per_meal() {
        let mut session = session();
        let queue = EventQueue::new();
        session.subscribe(queue.clone());
        session.start();
        queue.drain();

        session.state.food = Position::new(11, 10);
        session.tick();

        let events = queue.drain();
        let meals = events
            .iter()
            .filter(|e| matches!(e, GameEvent::FoodEaten { .. }))
            .count();
        assert_eq!(meals, 1);
        assert_eq!(
            events.last(),
            Some(&GameEvent::StateChanged {
                score: 10,
                tick_interval_ms: 148
            })
        );

        session.state.food = Position::new(0, 0);
        session.tick();
        assert!(queue
            .drain()
            .iter()
            .all(|e| !matches!(e, GameEvent::FoodEaten { .. })));
    }

    #[test]
    fn test_restart_returns_to_start_screen() {
        let mut session = session();
        session.start();
        session.state.food = Position::new(11, 10);
        session.tick();
        assert_eq!(session.state().snake.len(), 4);

        assert!(session.restart());
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().snake.len(), 3);
        assert_eq!(session.state().tick_interval_ms, 150);
        assert!(session.start());
    }

    #[test]
    fn test_start_from_game_over() {
        let mut session = session();
        session.start();
        session.state.snake.body[0] = Position::new(19, 10);
        session.tick();
        assert_eq!(session.phase(), Phase::GameOver);

        assert!(session.start());
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.state().score, 0);
    }
}
