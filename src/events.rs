//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    movement::Direction,
    types::{MainMenuItem, OutcomeItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the handler of the current
/// screen. It uses a timeout to avoid blocking the UI, and checks the level countdown once the
/// poll returns so that time running out is noticed without any key being pressed.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.tick(Instant::now());
    }

    Ok(())
}

/// Dispatches a single key press.
///
/// The 'q' key quits from every screen. In game, the arrow keys and the 'h', 'j', 'k' and 'l' keys
/// move the player; everywhere else they navigate the menus.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    if matches!(app.screen, Screen::InGame) {
        handle_game_key(app, code)
    } else {
        handle_menu_key(app, code)
    }
}

/// Handles key presses on the in-game screen.
///
/// Movement keys are turned into a [`Direction`] and forwarded to the movement rules; Esc abandons
/// the game and returns to the main menu.
pub(crate) fn handle_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    let direction = match code {
        KeyCode::Up | KeyCode::Char('k') => Direction::Up,
        KeyCode::Down | KeyCode::Char('j') => Direction::Down,
        KeyCode::Left | KeyCode::Char('h') => Direction::Left,
        KeyCode::Right | KeyCode::Char('l') => Direction::Right,
        KeyCode::Esc => {
            app.return_to_menu();
            return Ok(());
        }
        _ => return Ok(()),
    };

    app.move_player(direction)
}

/// Handles key presses on every menu screen.
pub(crate) fn handle_menu_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Down | KeyCode::Char('j') => handle_down(app),
        KeyCode::Up | KeyCode::Char('k') => handle_up(app),
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') => handle_select(app)?,
        KeyCode::Left | KeyCode::Esc | KeyCode::Char('h') => handle_back(app),
        _ => {}
    }

    Ok(())
}

/// Handles downward navigation.
///
/// This function moves the cursor one item down in the current menu, staying on the last item.
pub(crate) fn handle_down(app: &mut App) {
    app.screen = match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            Screen::MainMenu(MainMenuItem::ChooseDifficulty)
        }
        Screen::MainMenu(MainMenuItem::ChooseDifficulty | MainMenuItem::Quit) => {
            Screen::MainMenu(MainMenuItem::Quit)
        }
        Screen::DifficultyMenu(difficulty) => Screen::DifficultyMenu(difficulty.harder()),
        Screen::GameOver(_) => Screen::GameOver(OutcomeItem::Menu),
        Screen::Victory(_) => Screen::Victory(OutcomeItem::Menu),
        Screen::InGame => Screen::InGame,
    };
}

/// Handles upward navigation.
///
/// This function moves the cursor one item up in the current menu, staying on the first item.
pub(crate) fn handle_up(app: &mut App) {
    app.screen = match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => Screen::MainMenu(MainMenuItem::ChooseDifficulty),
        Screen::MainMenu(MainMenuItem::ChooseDifficulty | MainMenuItem::StartGame) => {
            Screen::MainMenu(MainMenuItem::StartGame)
        }
        Screen::DifficultyMenu(difficulty) => Screen::DifficultyMenu(difficulty.easier()),
        Screen::GameOver(_) => Screen::GameOver(OutcomeItem::Proceed),
        Screen::Victory(_) => Screen::Victory(OutcomeItem::Proceed),
        Screen::InGame => Screen::InGame,
    };
}

/// Handles selection of the item under the cursor.
///
/// This function starts games, opens the difficulty menu, stores the chosen difficulty, restarts or
/// advances levels, and quits, depending on the screen and the selected item.
pub(crate) fn handle_select(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => app.start_game()?,
        Screen::MainMenu(MainMenuItem::ChooseDifficulty) => {
            app.screen = Screen::DifficultyMenu(app.config.difficulty);
        }
        Screen::MainMenu(MainMenuItem::Quit) => app.exit = true,
        Screen::DifficultyMenu(difficulty) => {
            app.config.difficulty = difficulty;
            app.screen = Screen::MainMenu(MainMenuItem::ChooseDifficulty);
        }
        Screen::GameOver(OutcomeItem::Proceed) => app.restart_level()?,
        Screen::Victory(OutcomeItem::Proceed) => app.next_level()?,
        Screen::GameOver(OutcomeItem::Menu) | Screen::Victory(OutcomeItem::Menu) => {
            app.return_to_menu();
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles backward navigation.
///
/// This function leaves the difficulty menu without changing the difficulty, and returns to the
/// main menu from the end-of-level screens.
pub(crate) fn handle_back(app: &mut App) {
    match app.screen {
        Screen::DifficultyMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::ChooseDifficulty);
        }
        Screen::GameOver(_) | Screen::Victory(_) => app.return_to_menu(),
        Screen::MainMenu(_) | Screen::InGame => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Config, Difficulty},
        testing,
    };

    /// Creates a seeded app so that generated mazes are reproducible.
    fn create_test_app() -> App {
        App::new(Config {
            seed: Some(7),
            ..Config::default()
        })
    }

    /// Returns the key moving the player in the given direction.
    const fn arrow(direction: Direction) -> KeyCode {
        match direction {
            Direction::Up => KeyCode::Up,
            Direction::Right => KeyCode::Right,
            Direction::Down => KeyCode::Down,
            Direction::Left => KeyCode::Left,
        }
    }

    #[test]
    fn test_q_quits_from_any_screen() {
        for screen in [
            Screen::MainMenu(MainMenuItem::ChooseDifficulty),
            Screen::DifficultyMenu(Difficulty::Medium),
            Screen::GameOver(OutcomeItem::Menu),
        ] {
            let mut app = create_test_app();
            app.screen = screen;

            handle_key(&mut app, KeyCode::Char('q')).expect("quitting should succeed");

            assert!(app.exit, "q should quit from {screen:?}");
        }
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('j')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::ChooseDifficulty));

        handle_key(&mut app, KeyCode::Down).expect("navigation should succeed");
        handle_key(&mut app, KeyCode::Down).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_key(&mut app, KeyCode::Char('k')).expect("navigation should succeed");
        handle_key(&mut app, KeyCode::Up).expect("navigation should succeed");
        handle_key(&mut app, KeyCode::Up).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
    }

    #[test]
    fn test_select_quit_exits() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);

        handle_key(&mut app, KeyCode::Enter).expect("selection should succeed");

        assert!(app.exit, "selecting quit should exit");
    }

    #[test]
    fn test_choose_difficulty() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::ChooseDifficulty);

        handle_key(&mut app, KeyCode::Char('l')).expect("selection should succeed");
        assert_eq!(app.screen, Screen::DifficultyMenu(Difficulty::Easy));

        handle_key(&mut app, KeyCode::Char('j')).expect("navigation should succeed");
        handle_key(&mut app, KeyCode::Char('j')).expect("navigation should succeed");
        handle_key(&mut app, KeyCode::Char('j')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::DifficultyMenu(Difficulty::Hard));

        handle_key(&mut app, KeyCode::Enter).expect("selection should succeed");
        assert_eq!(app.config.difficulty, Difficulty::Hard);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::ChooseDifficulty));
    }

    #[test]
    fn test_back_from_difficulty_menu_keeps_difficulty() {
        let mut app = create_test_app();
        app.screen = Screen::DifficultyMenu(Difficulty::Medium);

        handle_key(&mut app, KeyCode::Char('h')).expect("navigation should succeed");

        assert_eq!(app.config.difficulty, Difficulty::Easy);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::ChooseDifficulty));
    }

    #[test]
    fn test_start_game_and_move() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Enter).expect("starting should succeed");
        assert_eq!(app.screen, Screen::InGame);

        handle_key(&mut app, KeyCode::Char('k')).expect("moving should succeed");
        let session = app.session.as_ref().expect("a game should be in progress");
        assert_eq!(session.player(), session.maze().start(), "up from start is blocked");

        let route = testing::route_to_goal(session.maze());
        let first = *route.first().expect("the goal is away from the start");
        handle_key(&mut app, arrow(first)).expect("moving should succeed");
        let session = app.session.as_ref().expect("a game should be in progress");
        assert_ne!(session.player(), session.maze().start());
    }

    #[test]
    fn test_solving_with_keys_reaches_victory() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Enter).expect("starting should succeed");
        let route = testing::route_to_goal(
            app.session
                .as_ref()
                .expect("a game should be in progress")
                .maze(),
        );

        for direction in route {
            handle_key(&mut app, arrow(direction)).expect("moving should succeed");
        }
        assert_eq!(app.screen, Screen::Victory(OutcomeItem::Proceed));

        handle_key(&mut app, KeyCode::Enter).expect("advancing should succeed");
        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(
            app.session
                .as_ref()
                .expect("a game should be in progress")
                .level(),
            2
        );
    }

    #[test]
    fn test_escape_leaves_game() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Enter).expect("starting should succeed");

        handle_key(&mut app, KeyCode::Esc).expect("leaving should succeed");

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert!(app.session.is_none(), "the game should be dropped");
    }

    #[test]
    fn test_game_over_menu() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Enter).expect("starting should succeed");
        app.screen = Screen::GameOver(OutcomeItem::Proceed);

        handle_key(&mut app, KeyCode::Char('j')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::GameOver(OutcomeItem::Menu));
        handle_key(&mut app, KeyCode::Char('k')).expect("navigation should succeed");
        assert_eq!(app.screen, Screen::GameOver(OutcomeItem::Proceed));

        handle_key(&mut app, KeyCode::Char('l')).expect("restarting should succeed");
        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(
            app.session
                .as_ref()
                .expect("a game should be in progress")
                .level(),
            1
        );
    }

    #[test]
    fn test_victory_menu_returns_to_main_menu() {
        let mut app = create_test_app();
        handle_key(&mut app, KeyCode::Enter).expect("starting should succeed");
        app.screen = Screen::Victory(OutcomeItem::Menu);

        handle_key(&mut app, KeyCode::Enter).expect("selection should succeed");

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert!(app.session.is_none(), "the game should be dropped");
    }
}
