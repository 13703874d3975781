//! Maze data and generation module.
//!
//! This module contains the [`Maze`] grid and its [`Cell`]s, together with the randomized
//! depth-first carving that turns a fully walled grid into a perfect maze: a spanning tree over the
//! grid graph, where exactly one path joins any two cells.

use rand::{seq::SliceRandom as _, Rng};
use thiserror::Error;

use crate::movement::Direction;

/// Error raised when a maze cannot be generated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Invalid side length.
    ///
    /// This variant is returned when the requested side length is zero, or so large that the
    /// number of cells cannot be represented.
    #[error("invalid maze size {0}: the side length must be a positive number of cells")]
    InvalidArgument(usize),
}

/// Grid coordinate of a maze cell.
///
/// The coordinate is counted from the top-left corner of the grid, where `x` is the column and `y`
/// is the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    /// Builds a position from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the adjacent position in the given direction.
    ///
    /// The result is `None` when the step would leave a square grid of side `size`.
    #[must_use]
    pub const fn neighbor(self, direction: Direction, size: usize) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        if x < size && y < size {
            Some(Self { x, y })
        } else {
            None
        }
    }
}

/// Single grid unit of a maze.
///
/// A cell stores which of its four walls are still standing. Walls are only ever knocked down
/// while the maze is being carved; a finished [`Maze`] hands out cells by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Standing walls, one bit per [`Direction`].
    walls: u8,
}

impl Cell {
    /// Cell with all four walls standing.
    const WALLED: Self = Self {
        walls: Direction::Up.bit()
            | Direction::Right.bit()
            | Direction::Down.bit()
            | Direction::Left.bit(),
    };

    /// Returns whether the wall on the given side of the cell is standing.
    #[must_use]
    pub const fn has_wall(self, direction: Direction) -> bool {
        self.walls & direction.bit() != 0
    }

    /// Returns the number of standing walls around the cell.
    #[must_use]
    pub const fn wall_count(self) -> u32 {
        self.walls.count_ones()
    }

    /// Knocks down the wall on the given side of the cell.
    fn open(&mut self, direction: Direction) {
        self.walls &= !direction.bit();
    }
}

/// Square labyrinth of [`Cell`]s.
///
/// This structure holds a perfect maze of side [`size`](Maze::size). The start cell is the top-left
/// corner and the goal cell is the bottom-right corner. The grid cannot be modified once
/// [`generate`](Maze::generate) returns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Side length of the grid, in cells.
    size: usize,
    /// Cells stored row after row.
    cells: Vec<Cell>,
}

impl Maze {
    /// Generates a perfect maze with randomized iterative depth-first carving.
    ///
    /// Carving starts at the top-left cell with every wall standing. At each step the cell on top of
    /// an explicit stack looks for unvisited neighbours, in the order up, right, down, left, and
    /// picks one of them uniformly at random through `rng`. The wall pair between the two cells is
    /// removed and the neighbour is pushed; a cell with no unvisited neighbour is popped instead.
    /// Every cell is visited exactly once, so the open passages form a spanning tree.
    ///
    /// Passing a seeded generator makes the result reproducible.
    ///
    /// # Errors
    ///
    /// This function returns [`GenerateError::InvalidArgument`] if `size` is zero or if `size`
    /// squared overflows.
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, GenerateError> {
        if size == 0 {
            return Err(GenerateError::InvalidArgument(size));
        }
        let cell_count = size
            .checked_mul(size)
            .ok_or(GenerateError::InvalidArgument(size))?;

        let mut maze = Self {
            size,
            cells: vec![Cell::WALLED; cell_count],
        };
        let mut visited = vec![false; cell_count];
        let mut candidates = Vec::with_capacity(Direction::ALL.len());

        let start = maze.start();
        maze.mark(&mut visited, start);
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            candidates.clear();
            candidates.extend(Direction::ALL.into_iter().filter_map(|direction| {
                current
                    .neighbor(direction, size)
                    .filter(|next| maze.is_unvisited(&visited, *next))
                    .map(|next| (direction, next))
            }));

            if let Some(&(direction, next)) = candidates.choose(rng) {
                maze.carve(current, direction, next);
                maze.mark(&mut visited, next);
                stack.push(next);
            } else {
                let _ = stack.pop();
            }
        }

        Ok(maze)
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell in which the player starts.
    #[must_use]
    pub const fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// Returns the cell the player has to reach, at the bottom-right corner of the grid.
    #[must_use]
    pub const fn goal(&self) -> Position {
        let last = self.size.saturating_sub(1);
        Position::new(last, last)
    }

    /// Returns the cell at the given position, or `None` if it lies outside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index))
            .copied()
    }

    /// Returns the rows of the grid from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Returns every position of the grid, row after row.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Returns the cell reached by walking from `position` in `direction`.
    ///
    /// The result is `None` when a wall stands on that side of the cell, when the step would leave
    /// the grid, or when `position` itself lies outside the grid.
    #[must_use]
    pub fn passage(&self, position: Position, direction: Direction) -> Option<Position> {
        let cell = self.cell(position)?;
        if cell.has_wall(direction) {
            return None;
        }

        position.neighbor(direction, self.size)
    }

    /// Returns the number of open passages between adjacent cells.
    ///
    /// Each passage is counted once, from the cell on its left or top side. A generated maze always
    /// has one passage less than it has cells.
    #[must_use]
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|position| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|direction| self.passage(position, *direction).is_some())
                    .count()
            })
            .sum()
    }

    /// Maps a position to its index in the row-major cell storage.
    fn index(&self, position: Position) -> Option<usize> {
        (position.x < self.size && position.y < self.size)
            .then(|| position.y * self.size + position.x)
    }

    /// Removes the wall pair between two adjacent cells.
    fn carve(&mut self, from: Position, direction: Direction, to: Position) {
        for (position, side) in [(from, direction), (to, direction.opposite())] {
            if let Some(cell) = self
                .index(position)
                .and_then(|index| self.cells.get_mut(index))
            {
                cell.open(side);
            }
        }
    }

    /// Flags a cell as visited in the carving scratch state.
    fn mark(&self, visited: &mut [bool], position: Position) {
        if let Some(flag) = self
            .index(position)
            .and_then(|index| visited.get_mut(index))
        {
            *flag = true;
        }
    }

    /// Returns whether a cell has not been reached by the carving yet.
    fn is_unvisited(&self, visited: &[bool], position: Position) -> bool {
        self.index(position)
            .and_then(|index| visited.get(index))
            .is_some_and(|flag| !flag)
    }
}
