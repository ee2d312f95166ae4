//! Grid coordinates and headings.
//!
//! Screen convention: `x` grows to the right, `y` grows downward, so `Up`
//! is `(0, -1)`.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A cell on the square game board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// Creates a cell.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Whether the cell lies inside a `grid_size × grid_size` board.
    pub fn in_bounds(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.vector();
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// One of the four movement headings. Doubles as the agent's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `(0, -1)`
    Up,
    /// `(0, 1)`
    Down,
    /// `(-1, 0)`
    Left,
    /// `(1, 0)`
    Right,
}

impl Direction {
    /// All headings in network output order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Maps a network output index to a heading.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Unit vector `(dx, dy)`.
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The heading pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Heading after a clockwise quarter turn (on screen).
    pub const fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Heading after a counter-clockwise quarter turn (on screen).
    pub const fn turn_left(self) -> Self {
        self.turn_right().opposite()
    }
}
