//! User interface rendering functions for all application screens.

use std::{
    rc::Rc,
    time::{Duration, Instant},
};

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    config::Difficulty,
    maze::{Maze, Position},
    movement::Direction,
    session::{Session, LEVEL_COUNT},
    types::{MainMenuItem, MenuType, OutcomeItem, Screen},
    App,
};

/// Remaining time under which the countdown is highlighted.
const HURRY_THRESHOLD: Duration = Duration::from_secs(60);

/// Wall segment in canvas coordinates, as its two end points.
type Segment = [(f64, f64); 2];

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type. The
/// end-of-level menus are drawn over the maze they close.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item, app.config.difficulty),
        Screen::DifficultyMenu(difficulty) => difficulty_menu(frame, difficulty),
        Screen::InGame => in_game(app, frame)?,
        Screen::GameOver(item) => {
            in_game(app, frame)?;
            game_over(frame, item);
        }
        Screen::Victory(item) => {
            in_game(app, frame)?;
            let is_final_level = app
                .session
                .as_ref()
                .ok_or_eyre("no game in progress on the victory screen")?
                .is_final_level();
            victory(frame, item, is_final_level);
        }
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure shared by every menu.
///
/// This function creates the common layout and block structure used by all menus. The generic part
/// includes the centered positioning, border styling and clearing whatever lies below the menu, so
/// that menus can be drawn over the maze. The specific menu content is handled by the caller using
/// the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: &MenuType) -> Rc<[Rect]> {
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(frame.area())[1];

    let layout = Layout::vertical([Constraint::Length(u16::from(menu.value()) + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(Clear, layout);
    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders the menu entries, highlighting the one under the cursor.
pub(crate) fn render_items(frame: &mut Frame, areas: &[Rect], labels: &[&str], active: usize) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Red);

    for (idx, (area, label)) in areas.iter().zip(labels).enumerate() {
        let style = if idx == active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(*label, style).centered(), *area);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", the difficulty the next game
/// starts with, and "Quit".
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem, difficulty: Difficulty) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::MainMenu(3));
    let difficulty_label = format!("Difficulty: {}", difficulty.label());
    let active = match item {
        MainMenuItem::StartGame => 0,
        MainMenuItem::ChooseDifficulty => 1,
        MainMenuItem::Quit => 2,
    };

    render_items(
        frame,
        &inner_layout,
        &["Start Game", difficulty_label.as_str(), "Quit"],
        active,
    );
}

/// Renders the difficulty selection screen.
pub(crate) fn difficulty_menu(frame: &mut Frame, difficulty: Difficulty) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::DifficultyMenu(3));
    let active = match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    };

    render_items(
        frame,
        &inner_layout,
        &["Easy (10x10)", "Medium (15x15)", "Hard (20x20)"],
        active,
    );
}

/// Renders the menu shown over the maze when the countdown ran out.
pub(crate) fn game_over(frame: &mut Frame, item: OutcomeItem) {
    let inner_layout = init_menu(frame, &MenuType::GameOver(2));

    render_items(
        frame,
        &inner_layout,
        &["Restart Level", "Main Menu"],
        outcome_index(item),
    );
}

/// Renders the menu shown over the maze when the goal was reached.
///
/// After the last level the menu offers a new game instead of the next level.
pub(crate) fn victory(frame: &mut Frame, item: OutcomeItem, is_final_level: bool) {
    let (menu, proceed) = if is_final_level {
        (MenuType::GameComplete(2), "Play Again")
    } else {
        (MenuType::LevelComplete(2), "Next Level")
    };
    let inner_layout = init_menu(frame, &menu);

    render_items(
        frame,
        &inner_layout,
        &[proceed, "Main Menu"],
        outcome_index(item),
    );
}

/// Returns the row of an end-of-level menu item.
const fn outcome_index(item: OutcomeItem) -> usize {
    match item {
        OutcomeItem::Proceed => 0,
        OutcomeItem::Menu => 1,
    }
}

/// Renders the in-game screen with the maze, the player and the level status.
///
/// This function displays a status line with the level and the countdown, the maze walls drawn as
/// line segments on a [`Canvas`], the goal and the player, and a tooltip with the controls.
///
/// # Errors
///
/// This function may return errors if no game is in progress or from coordinate conversion
/// operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let session = app
        .session
        .as_ref()
        .ok_or_eyre("no game in progress on the in-game screen")?;

    let [status_area, maze_content_area, tooltip_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(status_line(session), status_area);

    let maze = session.maze();
    let side = coordinate(maze.size())?;
    let segments = wall_segments(maze)?;
    let (goal_x, goal_y) = cell_center(maze.goal(), maze.size())?;
    let (player_x, player_y) = cell_center(session.player(), maze.size())?;

    let canvas = Canvas::default()
        .x_bounds([0., side])
        .y_bounds([0., side])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for [(x1, y1), (x2, y2)] in &segments {
                ctx.draw(&CanvasLine::new(*x1, *y1, *x2, *y2, Color::White));
            }
            ctx.layer();
            ctx.print(
                goal_x,
                goal_y,
                Line::styled("*", Style::default().fg(Color::Green)),
            );
            ctx.print(
                player_x,
                player_y,
                Line::styled("@", Style::default().fg(Color::Red)),
            );
        });

    frame.render_widget(canvas, maze_area(maze_content_area)?);

    let tooltip_block = Block::default()
        .title("(arrows / hjkl) move / (esc) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Builds the status line shown above the maze.
///
/// The countdown turns red once less than a minute remains.
pub(crate) fn status_line(session: &Session) -> Line<'static> {
    let remaining = session.countdown().remaining_at(Instant::now());
    let time_style = if remaining < HURRY_THRESHOLD {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled("SNOWMAZE", Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::raw(format!(
            "Level {}/{LEVEL_COUNT} ({})",
            session.level(),
            session.difficulty().label()
        )),
        Span::raw("   "),
        Span::styled(format!("Time {}", format_time(remaining)), time_style),
    ])
    .centered()
}

/// Formats a remaining time as minutes and zero-padded seconds, rounding partial seconds up.
pub(crate) fn format_time(remaining: Duration) -> String {
    let seconds = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);

    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Computes the largest area of roughly square appearance centered in `area`.
///
/// Terminal cells are about twice as tall as they are wide, so the canvas takes two columns for
/// every row it spans.
///
/// # Errors
///
/// This function may return errors from integer conversion operations.
pub(crate) fn maze_area(area: Rect) -> Result<Rect> {
    let half_width = u16::try_from(rounded_div::i32(area.width.into(), 2))?;
    let side = area.height.min(half_width);

    let [row] = Layout::vertical([Constraint::Length(side)])
        .flex(Flex::Center)
        .areas(area);
    let [space] = Layout::horizontal([Constraint::Length(side.saturating_mul(2))])
        .flex(Flex::Center)
        .areas(row);

    Ok(space)
}

/// Collects the standing walls of a maze as canvas line segments.
///
/// The canvas has its origin at the bottom-left corner with the y axis pointing up, so row `y` of a
/// maze of side `n` spans the band between `n - y - 1` and `n - y`. Every cell contributes its top
/// and left walls; the cells on the last column and on the last row also contribute their right and
/// bottom walls. Each wall is thus drawn once.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn wall_segments(maze: &Maze) -> Result<Vec<Segment>> {
    let size = maze.size();
    let side = coordinate(size)?;
    let mut segments = Vec::new();

    for position in maze.positions() {
        let cell = maze
            .cell(position)
            .ok_or_eyre("failed to retrieve cell of maze position")?;
        let left = coordinate(position.x)?;
        let right = left + 1.;
        let top = side - coordinate(position.y)?;
        let bottom = top - 1.;

        if cell.has_wall(Direction::Up) {
            segments.push([(left, top), (right, top)]);
        }
        if cell.has_wall(Direction::Left) {
            segments.push([(left, bottom), (left, top)]);
        }
        if position.x + 1 == size && cell.has_wall(Direction::Right) {
            segments.push([(right, bottom), (right, top)]);
        }
        if position.y + 1 == size && cell.has_wall(Direction::Down) {
            segments.push([(left, bottom), (right, bottom)]);
        }
    }

    Ok(segments)
}

/// Transforms a maze position to the canvas coordinates of its cell center.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn cell_center(position: Position, size: usize) -> Result<(f64, f64)> {
    let x = coordinate(position.x)? + 0.5;
    let y = coordinate(size)? - coordinate(position.y)? - 0.5;

    Ok((x, y))
}

/// Converts a grid index to a canvas coordinate.
///
/// # Errors
///
/// This function returns an error if the index does not fit in a [`u16`].
fn coordinate(index: usize) -> Result<f64> {
    Ok(f64::from(u16::try_from(index)?))
}
