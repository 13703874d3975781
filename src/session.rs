//! Level progression and countdown module.
//!
//! This module contains the [`Session`] holding a game in progress: the difficulty, the current
//! level, the maze generated for it, the player position and the level [`Countdown`].

use std::time::{Duration, Instant};

use rand::Rng;

use crate::{
    config::Difficulty,
    maze::{GenerateError, Maze, Position},
    movement::{self, Direction, MoveOutcome},
};

/// Number of levels in a game.
pub(crate) const LEVEL_COUNT: u8 = 3;

/// Time remaining in a level.
///
/// The countdown is measured against the instant the level started, so it needs no ticking of its
/// own; the caller asks for the remaining time whenever it needs it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Countdown {
    /// Time granted for the level.
    limit: Duration,
    /// Instant the level started.
    started: Instant,
}

impl Countdown {
    /// Starts a countdown now.
    pub(crate) fn new(limit: Duration) -> Self {
        Self::starting_at(limit, Instant::now())
    }

    /// Starts a countdown at the given instant.
    pub(crate) const fn starting_at(limit: Duration, started: Instant) -> Self {
        Self { limit, started }
    }

    /// Returns the time left at `now`, saturating at zero.
    pub(crate) fn remaining_at(&self, now: Instant) -> Duration {
        self.limit
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    /// Returns whether the time ran out at `now`.
    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        self.remaining_at(now).is_zero()
    }
}

/// Game in progress.
#[derive(Debug)]
pub(crate) struct Session {
    /// Difficulty chosen when the game started.
    difficulty: Difficulty,
    /// Current level, starting at one.
    level: u8,
    /// Time granted for each level.
    time_limit: Duration,
    /// Maze of the current level.
    maze: Maze,
    /// Cell the player stands on.
    player: Position,
    /// Countdown of the current level.
    countdown: Countdown,
}

impl Session {
    /// Starts a game on its first level.
    ///
    /// # Errors
    ///
    /// This function may return errors from maze generation.
    pub(crate) fn new<R: Rng + ?Sized>(
        difficulty: Difficulty,
        time_limit: Duration,
        rng: &mut R,
    ) -> Result<Self, GenerateError> {
        let maze = Maze::generate(difficulty.maze_size(), rng)?;

        Ok(Self {
            difficulty,
            level: 1,
            time_limit,
            player: maze.start(),
            maze,
            countdown: Countdown::new(time_limit),
        })
    }

    /// Moves the player one cell and records where it ended up.
    pub(crate) fn step(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = movement::attempt_move(&self.maze, self.player, direction);
        self.player = outcome.position;

        outcome
    }

    /// Replays the current level on a freshly generated maze with a full countdown.
    ///
    /// # Errors
    ///
    /// This function may return errors from maze generation.
    pub(crate) fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GenerateError> {
        self.begin_level(self.level, rng)
    }

    /// Moves on to the next level, staying on the last one once it is reached.
    ///
    /// # Errors
    ///
    /// This function may return errors from maze generation.
    pub(crate) fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GenerateError> {
        self.begin_level(self.level.saturating_add(1).min(LEVEL_COUNT), rng)
    }

    /// Returns whether the current level is the last one of the game.
    pub(crate) const fn is_final_level(&self) -> bool {
        self.level >= LEVEL_COUNT
    }

    /// Returns the difficulty of the game.
    pub(crate) const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the current level number.
    pub(crate) const fn level(&self) -> u8 {
        self.level
    }

    /// Returns the maze of the current level.
    pub(crate) const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Returns the cell the player stands on.
    pub(crate) const fn player(&self) -> Position {
        self.player
    }

    /// Returns the countdown of the current level.
    pub(crate) const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Generates the maze of `level` and resets the player and the countdown.
    ///
    /// The session is left untouched if generation fails.
    fn begin_level<R: Rng + ?Sized>(&mut self, level: u8, rng: &mut R) -> Result<(), GenerateError> {
        let maze = Maze::generate(self.difficulty.maze_size(), rng)?;

        self.level = level;
        self.player = maze.start();
        self.maze = maze;
        self.countdown = Countdown::new(self.time_limit);

        Ok(())
    }
}
