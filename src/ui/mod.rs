mod detail;
mod help;
mod list;
pub mod search;
pub mod settings;

use crate::app::{App, Overlay};
use crate::theme::ThemeColors;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Block,
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let colors = app.theme.colors();

    // Paint the theme background first
    frame.render_widget(Block::default().style(base_style(colors)), frame.area());

    list::render(app, frame, colors);

    if let Some(book) = app.detail_book() {
        detail::render(app, book, frame, colors);
    }

    match &app.overlay {
        Overlay::None => {}
        Overlay::Search(form) => form.render(frame, colors),
        Overlay::Settings(form) => form.render(frame, colors),
        Overlay::Help => help::render(frame, colors),
    }
}

/// Text in the dark variable over the light variable.
pub(crate) fn base_style(colors: ThemeColors) -> Style {
    Style::default()
        .fg(Color::from(colors.dark))
        .bg(Color::from(colors.light))
}

/// Secondary text: the foreground dimmed toward the background.
pub(crate) fn dim_style(colors: ThemeColors) -> Style {
    base_style(colors).fg(Color::DarkGray)
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, parent);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }
}
