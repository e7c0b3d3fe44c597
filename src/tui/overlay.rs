//! Loading overlay widget
//!
//! Centered popup drawn on top of whatever view is underneath while the
//! bus reports visible. The caller owns the decision to render; this
//! module only draws.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Spinner animation frames, advanced one step per UI tick
const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Render the loading overlay
///
/// `tick` selects the spinner frame; pass a counter incremented on every
/// UI tick.
pub fn render_overlay(frame: &mut Frame, area: Rect, tick: usize) {
    let popup_area = centered_rect(30, 20, area);

    // Clear the area so the underlying view doesn't bleed through
    frame.render_widget(Clear, popup_area);

    let spinner = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];

    let overlay = Paragraph::new(Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" Loading..."),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::DarkGray)),
    );

    frame.render_widget(overlay, popup_area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
