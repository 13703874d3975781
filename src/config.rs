//! Command-line configuration module.
//!
//! This module contains the [`Config`] parsed from the command line and the [`Difficulty`] table
//! mapping each difficulty to the side length of its mazes.

use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Seconds granted to finish a level when no time limit is given.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 900;

/// Difficulty of a game.
///
/// The difficulty decides the side length of the maze generated for every level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    /// Ten by ten cells.
    #[default]
    Easy,
    /// Fifteen by fifteen cells.
    Medium,
    /// Twenty by twenty cells.
    Hard,
}

impl Difficulty {
    /// Returns the side length of the mazes generated at this difficulty.
    #[must_use]
    pub const fn maze_size(self) -> usize {
        match self {
            Self::Easy => 10,
            Self::Medium => 15,
            Self::Hard => 20,
        }
    }

    /// Returns the name displayed in menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Returns the next harder difficulty, staying on the hardest one.
    #[must_use]
    pub const fn harder(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium | Self::Hard => Self::Hard,
        }
    }

    /// Returns the next easier difficulty, staying on the easiest one.
    #[must_use]
    pub const fn easier(self) -> Self {
        match self {
            Self::Hard => Self::Medium,
            Self::Medium | Self::Easy => Self::Easy,
        }
    }
}

/// Holiday maze game in the terminal.
///
/// Guide the player through three generated mazes before the clock runs out.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Difficulty preselected in the main menu.
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,
    /// Seconds available to finish each level.
    #[arg(
        long,
        default_value_t = DEFAULT_TIME_LIMIT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub time_limit: u64,
    /// Seed for the maze generator; a fresh one is drawn from the operating system when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            time_limit: DEFAULT_TIME_LIMIT_SECS,
            seed: None,
        }
    }
}

impl Config {
    /// Returns the time limit of a level as a [`Duration`].
    #[must_use]
    pub const fn level_duration(&self) -> Duration {
        Duration::from_secs(self.time_limit)
    }
}
