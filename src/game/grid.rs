use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The discrete board the snake lives on, `width` x `height` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        let inside = |coord: i32, side: usize| {
            usize::try_from(coord).map_or(false, |coord| coord < side)
        };
        inside(pos.x, self.width) && inside(pos.y, self.height)
    }

    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Center cell, rounding towards the bottom-right on even sizes
    pub fn center(&self) -> Position {
        Position::new(coord(self.width / 2), coord(self.height / 2))
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let (width, height) = (coord(self.width), coord(self.height));
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// Cell index as a coordinate, saturating on sides no valid config produces
fn coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
