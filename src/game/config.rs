use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Largest accepted grid side, in cells
pub const MAX_GRID_SIDE: usize = 4096;

/// Configuration for a game session
///
/// Loadable from JSON; missing fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Tick interval when a game starts, in milliseconds
    pub initial_speed_ms: u64,
    /// Floor for the tick interval; the game never gets faster than this
    pub min_speed_ms: u64,
    /// How much the tick interval shrinks per food eaten
    pub speed_step_ms: u64,
    /// Score awarded per food
    pub points_per_food: u32,

    /// Let the head move into the cell the tail is leaving this step.
    ///
    /// Off by default: the tail still counts as occupied during the
    /// collision check.
    pub allow_tail_chase: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            initial_speed_ms: 150,
            min_speed_ms: 80,
            speed_step_ms: 2,
            points_per_food: 10,
            allow_tail_chase: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Apply the speed settings of a difficulty preset
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        let speed = difficulty.speed();
        self.initial_speed_ms = speed.initial_speed_ms;
        self.min_speed_ms = speed.min_speed_ms;
        self.speed_step_ms = speed.speed_step_ms;
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(format!(
                "grid sides are limited to {} cells, got {}x{}",
                MAX_GRID_SIDE, self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The starting body extends left from the center cell
        let room = self.grid_width / 2 + 1;
        if self.initial_snake_length > room {
            return Err(format!(
                "initial_snake_length ({}) does not fit a grid {} cells wide (max {})",
                self.initial_snake_length, self.grid_width, room
            ));
        }

        let cells = self
            .grid_width
            .checked_mul(self.grid_height)
            .ok_or_else(|| "grid has too many cells".to_string())?;
        if self.initial_snake_length >= cells {
            return Err("initial snake leaves no room for food".to_string());
        }

        if self.min_speed_ms == 0 {
            return Err("min_speed_ms must be positive".to_string());
        }

        if self.min_speed_ms > self.initial_speed_ms {
            return Err(format!(
                "min_speed_ms ({}) cannot exceed initial_speed_ms ({})",
                self.min_speed_ms, self.initial_speed_ms
            ));
        }

        Ok(())
    }
}

/// Speed ramp of a difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedSettings {
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    pub speed_step_ms: u64,
}

/// Named difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    pub fn speed(&self) -> SpeedSettings {
        let (initial_speed_ms, min_speed_ms, speed_step_ms) = match self {
            Difficulty::Easy => (200, 120, 1),
            Difficulty::Normal => (150, 80, 2),
            Difficulty::Hard => (100, 60, 3),
            Difficulty::Insane => (80, 40, 4),
        };

        SpeedSettings {
            initial_speed_ms,
            min_speed_ms,
            speed_step_ms,
        }
    }
}
