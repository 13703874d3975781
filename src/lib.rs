//! Holiday-themed maze game for the terminal.
//!
//! The player crosses three generated mazes, from the top-left corner to the bottom-right one, each
//! before its countdown runs out. The crate is split between the game core and the terminal
//! front-end built on top of it:
//!
//! - [`maze`] generates perfect mazes through randomized depth-first carving.
//! - [`movement`] decides whether a move is legal and whether it lands on the goal.
//! - [`config`] holds the command-line options and the difficulty table.
//! - [`App`] drives the menus, the levels and the rendering with Ratatui.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod config;
pub mod maze;
pub mod movement;

mod app;
mod events;
mod session;
#[cfg(test)]
mod testing;
mod types;
mod ui;

pub use app::App;
pub use config::{Config, Difficulty};
pub use maze::{Cell, GenerateError, Maze, Position};
pub use movement::{attempt_move, attempt_move_symbol, Direction, MoveError, MoveOutcome};
