//! Core application state and logic for the maze game.

use std::time::Instant;

use color_eyre::eyre::{OptionExt as _, Result};
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    movement::Direction,
    session::Session,
    types::{MainMenuItem, OutcomeItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Configuration parsed from the command line.
    ///
    /// The difficulty stored here is the one the next game starts with; the difficulty menu
    /// overwrites it.
    pub(crate) config: Config,
    /// Random source shared by every maze generated during the run.
    pub(crate) rng: StdRng,
    /// Game in progress, if any.
    pub(crate) session: Option<Session>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    /// Creates a new instance of the App structure from the given configuration.
    ///
    /// The maze generator is seeded from the configuration when it carries a seed, and from the
    /// operating system otherwise.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            config,
            rng,
            session: None,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Starts a new game on its first level at the configured difficulty.
    ///
    /// # Errors
    ///
    /// This function may return errors from maze generation.
    pub(crate) fn start_game(&mut self) -> Result<()> {
        self.session = Some(Session::new(
            self.config.difficulty,
            self.config.level_duration(),
            &mut self.rng,
        )?);
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Moves the player and switches to the victory screen once the goal is reached.
    ///
    /// Moves are ignored outside the in-game screen, so input arriving after the countdown ran out
    /// or after the goal was reached has no effect.
    ///
    /// # Errors
    ///
    /// This function returns an error if the in-game screen is shown without a game in progress.
    pub(crate) fn move_player(&mut self, direction: Direction) -> Result<()> {
        if self.screen != Screen::InGame {
            return Ok(());
        }

        let session = self
            .session
            .as_mut()
            .ok_or_eyre("no game in progress while in game")?;
        if session.step(direction).reached_goal {
            self.screen = Screen::Victory(OutcomeItem::Proceed);
        }

        Ok(())
    }

    /// Checks the countdown and switches to the game over screen once it expired.
    pub(crate) fn tick(&mut self, now: Instant) {
        if self.screen == Screen::InGame
            && self
                .session
                .as_ref()
                .is_some_and(|session| session.countdown().is_expired_at(now))
        {
            self.screen = Screen::GameOver(OutcomeItem::Proceed);
        }
    }

    /// Replays the current level on a fresh maze.
    ///
    /// # Errors
    ///
    /// This function may return errors from maze generation, or if no game is in progress.
    pub(crate) fn restart_level(&mut self) -> Result<()> {
        self.session
            .as_mut()
            .ok_or_eyre("no game in progress to restart")?
            .restart(&mut self.rng)?;
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Moves on to the next level, or starts a new game after the last one.
    ///
    /// # Errors
    ///
    /// This function may return errors from maze generation, or if no game is in progress.
    pub(crate) fn next_level(&mut self) -> Result<()> {
        let is_final_level = self
            .session
            .as_ref()
            .ok_or_eyre("no game in progress to advance")?
            .is_final_level();
        if is_final_level {
            return self.start_game();
        }

        self.session
            .as_mut()
            .ok_or_eyre("no game in progress to advance")?
            .advance(&mut self.rng)?;
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Drops the game in progress and shows the main menu.
    pub(crate) fn return_to_menu(&mut self) {
        self.session = None;
        self.screen = Screen::MainMenu(MainMenuItem::StartGame);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{config::Difficulty, testing};

    /// Creates a seeded app so that generated mazes are reproducible.
    fn create_test_app() -> App {
        App::new(Config {
            seed: Some(2024),
            ..Config::default()
        })
    }

    /// Walks the player along the solution of the current maze.
    fn solve_level(app: &mut App) {
        let maze = app
            .session
            .as_ref()
            .expect("a game should be in progress")
            .maze()
            .clone();
        let route = testing::route_to_goal(&maze);

        for direction in route {
            app.move_player(direction).expect("moving should succeed");
        }
    }

    #[test]
    fn test_new_app_shows_main_menu() {
        let app = create_test_app();

        assert!(!app.exit, "a new app should keep running");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert!(app.session.is_none(), "no game before start");
    }

    #[test]
    fn test_start_game_uses_configured_difficulty() {
        let mut app = create_test_app();
        app.config.difficulty = Difficulty::Hard;

        app.start_game().expect("starting should succeed");

        assert_eq!(app.screen, Screen::InGame);
        let session = app.session.as_ref().expect("a game should be in progress");
        assert_eq!(session.maze().size(), 20);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_reaching_goal_shows_victory() {
        let mut app = create_test_app();
        app.start_game().expect("starting should succeed");

        solve_level(&mut app);

        assert_eq!(app.screen, Screen::Victory(OutcomeItem::Proceed));
    }

    #[test]
    fn test_moves_ignored_after_victory() {
        let mut app = create_test_app();
        app.start_game().expect("starting should succeed");
        solve_level(&mut app);
        let goal = app.session.as_ref().expect("game in progress").maze().goal();

        app.move_player(Direction::Up).expect("moving should succeed");
        app.move_player(Direction::Left).expect("moving should succeed");

        assert_eq!(
            app.session.as_ref().expect("game in progress").player(),
            goal
        );
    }

    #[test]
    fn test_expired_countdown_shows_game_over() {
        let mut app = create_test_app();
        app.start_game().expect("starting should succeed");

        app.tick(Instant::now());
        assert_eq!(app.screen, Screen::InGame);

        app.tick(Instant::now() + Duration::from_secs(901));
        assert_eq!(app.screen, Screen::GameOver(OutcomeItem::Proceed));

        let before = app.session.as_ref().expect("game in progress").player();
        app.move_player(Direction::Right).expect("moving should succeed");
        assert_eq!(
            app.session.as_ref().expect("game in progress").player(),
            before,
            "moves after time is up are rejected"
        );
    }

    #[test]
    fn test_restart_level_keeps_level_number() {
        let mut app = create_test_app();
        app.start_game().expect("starting should succeed");
        solve_level(&mut app);
        app.next_level().expect("advancing should succeed");
        app.screen = Screen::GameOver(OutcomeItem::Proceed);

        app.restart_level().expect("restarting should succeed");

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.session.as_ref().expect("game in progress").level(), 2);
    }

    #[test]
    fn test_three_levels_then_new_game() {
        let mut app = create_test_app();
        app.start_game().expect("starting should succeed");

        for level in 1..=3 {
            assert_eq!(
                app.session.as_ref().expect("game in progress").level(),
                level
            );
            solve_level(&mut app);
            assert_eq!(app.screen, Screen::Victory(OutcomeItem::Proceed));
            app.next_level().expect("advancing should succeed");
        }

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.session.as_ref().expect("game in progress").level(), 1);
    }

    #[test]
    fn test_return_to_menu_drops_session() {
        let mut app = create_test_app();
        app.start_game().expect("starting should succeed");

        app.return_to_menu();

        assert!(app.session.is_none(), "the game should be dropped");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
    }

    #[test]
    fn test_restart_without_session_fails() {
        let mut app = create_test_app();

        assert!(app.restart_level().is_err(), "nothing to restart");
        assert!(app.next_level().is_err(), "nothing to advance");
    }
}
