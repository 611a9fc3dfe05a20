//! Shared layout and status bar helpers for the game screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Minimum width of the world view before the side column gets squeezed.
const WORLD_MIN_WIDTH: u16 = 20;
/// Rows reserved for the readings and controls under the world view.
const STATUS_BAR_HEIGHT: u16 = 2;

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Scaled world view - top left, inside outer border
    pub world: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Score and counters - top of the right column
    pub info_panel: Rect,
    /// Mouth outline - bottom of the right column
    pub mouth_preview: Rect,
}

/// Split the screen into the world view, status bar and the side column.
///
/// Layout structure:
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │  [score]    │
/// │   [world]                       │  [counters] │
/// │                                 ├─ Mouth ─────┤
/// │ [readings / controls]           │  [outline]  │
/// └─────────────────────────────────┴─────────────┘
/// ```
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `area` - The full terminal area
/// * `title` - Title for the outer border (e.g., " Mouth Flap ")
/// * `border_color` - Outer border color; the scene turns it red while the bird is down
/// * `side_width` - Width of the right column
/// * `preview_height` - Rows given to the mouth outline at the bottom of the column
///
/// # Returns
/// A `GameLayout` with one area per panel. Areas may be empty on tiny terminals.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    side_width: u16,
    preview_height: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    // Outer border around the whole screen
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // World and status (left) | info and preview (right)
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(WORLD_MIN_WIDTH),
            Constraint::Length(side_width),
        ])
        .split(inner);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
        .split(columns[0]);

    // The preview keeps its height; the info panel absorbs the rest
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(preview_height)])
        .split(columns[1]);

    GameLayout {
        world: left[0],
        status_bar: left[1],
        info_panel: right[0],
        mouth_preview: right[1],
    }
}

/// Key hints as one line: white key, gray action, two spaces between pairs.
fn controls_line<'a>(controls: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(controls.len() * 3);
    for (i, &(key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Render the 2-line status bar: the classifier readings, then key hints.
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `area` - The status bar area from `create_game_layout`
/// * `readings` - Status lines for the current frame, joined on one row
/// * `color` - Color for the readings row
/// * `controls` - (key, action) pairs, e.g. `[("[Space]", "Open mouth"), ("[q]", "Quit")]`
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    readings: &[String],
    color: Color,
    controls: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }

    // Line 1: readings
    let status = Paragraph::new(readings.join("  |  "))
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    // Line 2: key hints, dropped when the bar is squeezed to one row
    if area.height < 2 || controls.is_empty() {
        return;
    }
    let hints = Paragraph::new(controls_line(controls)).alignment(Alignment::Center);
    frame.render_widget(
        hints,
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Bordered panel; returns the inner area.
pub fn render_panel_frame(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
