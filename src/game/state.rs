use super::direction::Direction;
use super::grid::{Grid, Position};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |prev| Some(prev.moved_in_direction(back)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty());
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if the head would hit the body when moving to `pos`.
    ///
    /// With `tail_vacates` the last segment is ignored, since it leaves its
    /// cell in the same step.
    pub fn blocks(&self, pos: Position, tail_vacates: bool) -> bool {
        let occupied = if tail_vacates && self.body.len() > 1 {
            &self.body[..self.body.len() - 1]
        } else {
            &self.body[..]
        };
        occupied.contains(&pos)
    }

    /// Push a new head; the tail is dropped unless the snake grows
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// The snake covers every cell, so no food can be placed
    BoardFilled,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Never on the snake, except after `GameOverCause::BoardFilled`, where it
    /// is left on the head cell that ate the last food
    pub food: Position,
    /// Latest accepted direction request, consumed at the next tick
    pub pending_direction: Direction,
    pub grid: Grid,
    pub score: u32,
    /// Current tick interval in milliseconds
    pub tick_interval_ms: u64,
    pub high_score: u32,
    pub phase: Phase,
    pub steps: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid: Grid, tick_interval_ms: u64) -> Self {
        let pending_direction = snake.direction;
        Self {
            snake,
            food,
            pending_direction,
            grid,
            score: 0,
            tick_interval_ms,
            high_score: 0,
            phase: Phase::NotStarted,
            steps: 0,
        }
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }

    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
