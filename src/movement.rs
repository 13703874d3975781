//! Movement rules module.
//!
//! This module contains the [`Direction`] vocabulary and the single validation routine every input
//! source goes through to move the player inside a [`Maze`]. A move is legal when no wall stands on
//! the requested side of the current cell and the destination lies inside the grid; an illegal move
//! leaves the player where it was.

use std::str::FromStr;

use thiserror::Error;

use crate::maze::{Maze, Position};

/// Error raised when an input cannot be turned into a move.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    /// Unknown direction symbol.
    ///
    /// This variant holds the symbol that did not name one of the four cardinal directions.
    #[error("unknown direction {0:?}: expected one of up, down, left or right")]
    InvalidDirection(String),
}

/// Cardinal direction of a move or of a cell wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the previous row.
    Up,
    /// Towards the next column.
    Right,
    /// Towards the next row.
    Down,
    /// Towards the previous column.
    Left,
}

impl Direction {
    /// All four directions, in the order the maze generator considers neighbours.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the column and row offsets of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Returns the lowercase symbol naming this direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }

    /// Returns the bit standing for the wall on this side of a cell.
    pub(crate) const fn bit(self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Right => 0b0010,
            Self::Down => 0b0100,
            Self::Left => 0b1000,
        }
    }
}

impl FromStr for Direction {
    type Err = MoveError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(symbol.trim()))
            .ok_or_else(|| MoveError::InvalidDirection(symbol.to_owned()))
    }
}

/// Result of a move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Position of the player after the attempt.
    ///
    /// This is the input position unchanged when the move was blocked.
    pub position: Position,
    /// Whether [`position`](MoveOutcome::position) is the goal cell of the maze.
    pub reached_goal: bool,
}

impl MoveOutcome {
    /// Builds the outcome of ending up at `position` in `maze`.
    fn at(maze: &Maze, position: Position) -> Self {
        Self {
            position,
            reached_goal: position == maze.goal(),
        }
    }
}

/// Moves the player one cell in `direction` if the maze allows it.
///
/// The move succeeds only if the current cell has no wall on that side and the destination lies
/// inside the grid. A blocked move is not an error: the outcome simply carries the unchanged
/// position, like a player bumping into a wall. Goal arrival is evaluated on the resulting position.
#[must_use]
pub fn attempt_move(maze: &Maze, position: Position, direction: Direction) -> MoveOutcome {
    let position = maze.passage(position, direction).unwrap_or(position);

    MoveOutcome::at(maze, position)
}

/// Moves the player in the direction named by `symbol`.
///
/// A symbol that does not parse as a [`Direction`] is ignored and the outcome carries the unchanged
/// position.
#[must_use]
pub fn attempt_move_symbol(maze: &Maze, position: Position, symbol: &str) -> MoveOutcome {
    symbol.parse::<Direction>().map_or_else(
        |_| MoveOutcome::at(maze, position),
        |direction| attempt_move(maze, position, direction),
    )
}
