//! Type definitions and enums for the application state and navigation.

use crate::config::Difficulty;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Difficulty selection screen, holding the difficulty under the cursor.
    DifficultyMenu(Difficulty),
    /// Maze being played.
    InGame,
    /// Level lost because the countdown ran out.
    GameOver(OutcomeItem),
    /// Level won, either with more levels ahead or with the whole game completed.
    Victory(OutcomeItem),
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Difficulty" menu option, leading to the difficulty selection screen.
    ChooseDifficulty,
    /// "Quit" menu option.
    Quit,
}

/// Options offered once a level ends.
///
/// Both the game over and the victory screens offer to carry on playing or to go back to the main
/// menu. Carrying on means restarting the level after a loss, moving to the next level after a win,
/// and starting a new game once the last level is won.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutcomeItem {
    /// Keep playing.
    Proceed,
    /// Return to the main menu.
    Menu,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Each variant carries the number of items listed in the menu.
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// Difficulty menu configuration.
    DifficultyMenu(u8),
    /// Menu shown when the countdown runs out.
    GameOver(u8),
    /// Menu shown when a level other than the last is won.
    LevelComplete(u8),
    /// Menu shown when the last level is won.
    GameComplete(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Snowmaze",
            Self::DifficultyMenu(_) => "Difficulty",
            Self::GameOver(_) => "Time's Up",
            Self::LevelComplete(_) => "Level Complete",
            Self::GameComplete(_) => "Merry Christmas",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value)
            | Self::DifficultyMenu(value)
            | Self::GameOver(value)
            | Self::LevelComplete(value)
            | Self::GameComplete(value) => *value,
        }
    }
}
