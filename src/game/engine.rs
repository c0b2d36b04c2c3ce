use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::Direction,
    grid::Position,
    state::{GameOverCause, GameState, Phase, Snake},
};

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved; `ate_food` is set when it grew this step
    Moved { ate_food: bool },
    /// The game ended this step
    Ended(GameOverCause),
    /// The state was not running, nothing happened
    Idle,
}

impl StepOutcome {
    pub fn ate_food(&self) -> bool {
        matches!(self, StepOutcome::Moved { ate_food: true })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::Ended(_))
    }
}

/// The game engine that handles all game rules.
///
/// The engine owns the configuration and the random source for food
/// placement; the state it mutates is passed in by the caller.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration.
    ///
    /// `config` must already pass [`GameConfig::validate`]; otherwise the
    /// starting snake may not fit the grid.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible.
    /// The same validation requirement as [`GameEngine::new`] applies.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh state: snake centered and facing right, first food placed
    pub fn new_state(&mut self) -> GameState {
        let grid = self.config.grid();
        let snake = Snake::new(grid.center(), Direction::Right, self.config.initial_snake_length);
        // validate() guarantees the initial snake leaves a free cell
        let food = self.spawn_food(&snake).unwrap_or(Position::new(0, 0));

        GameState::new(snake, food, grid, self.config.initial_speed_ms)
    }

    /// Reset `state` for a new game, keeping its high score
    pub fn reset(&mut self, state: &mut GameState) {
        let high_score = state.high_score;
        *state = self.new_state();
        state.high_score = high_score;
    }

    /// Execute one discrete step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepOutcome {
        if state.phase != Phase::Running {
            return StepOutcome::Idle;
        }

        // Prevent 180 degree turns
        let requested = state.pending_direction;
        if !state.snake.direction.is_opposite(requested) {
            state.snake.direction = requested;
        }
        state.pending_direction = state.snake.direction;

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.steps += 1;

        if let Some(cause) = self.check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            return StepOutcome::Ended(cause);
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);

        if ate_food {
            state.score += self.config.points_per_food;
            state.tick_interval_ms = state
                .tick_interval_ms
                .saturating_sub(self.config.speed_step_ms)
                .max(self.config.min_speed_ms);

            match self.spawn_food(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    state.phase = Phase::GameOver;
                    return StepOutcome::Ended(GameOverCause::BoardFilled);
                }
            }
        }

        StepOutcome::Moved { ate_food }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<GameOverCause> {
        if !state.is_in_bounds(pos) {
            return Some(GameOverCause::Wall);
        }

        let tail_vacates = self.config.allow_tail_chase && pos != state.food;
        if state.snake.blocks(pos, tail_vacates) {
            return Some(GameOverCause::SelfCollision);
        }

        None
    }

    /// Spawn food at a uniformly random cell not covered by the snake.
    ///
    /// Returns `None` when the snake fills the whole board.
    pub fn spawn_food(&mut self, snake: &Snake) -> Option<Position> {
        let grid = self.config.grid();
        if snake.len() >= grid.cell_count() {
            return None;
        }

        // Rejection sampling is cheap while the board is mostly empty; once the
        // snake dominates it, pick from the free cells directly.
        if snake.len() * 2 <= grid.cell_count() {
            loop {
                let x = self.rng.gen_range(0..grid.width) as i32;
                let y = self.rng.gen_range(0..grid.height) as i32;
                let pos = Position::new(x, y);

                if !snake.contains(pos) {
                    return Some(pos);
                }
            }
        }

        let free: Vec<Position> = grid.cells().filter(|pos| !snake.contains(*pos)).collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.gen_range(0..free.len())])
    }
}
