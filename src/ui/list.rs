use super::{base_style, dim_style};
use crate::app::App;
use crate::theme::ThemeColors;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub fn render(app: &App, frame: &mut Frame, colors: ThemeColors) {
    let area = frame.area();

    // Layout: header(3) + list(min) + show more(1) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = format!(
        " Book Connect   [{} of {} books]",
        app.view.matches().len(),
        app.catalog.len()
    );
    let header = Paragraph::new(header_text)
        .style(base_style(colors).fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(dim_style(colors)),
        );
    frame.render_widget(header, chunks[0]);

    // ── List ──
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(dim_style(colors))
        .title(" Books ")
        .title_bottom(Line::from(page_info(app)).alignment(Alignment::Right));

    if app.show_empty_message() {
        let message = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No results found. Your filters might be too narrow.",
                base_style(colors).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(message, chunks[1]);
    } else {
        let title_width = (chunks[1].width as usize).saturating_sub(4);
        let items: Vec<ListItem> = app
            .view
            .visible()
            .iter()
            .map(|book| {
                let author = app.catalog.author_name(&book.author_id).unwrap_or_default();
                let title = truncate_str(&book.title, title_width.saturating_sub(author.width() + 3));
                ListItem::new(Line::from(vec![
                    Span::styled(title, base_style(colors).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(author.to_string(), dim_style(colors)),
                ]))
            })
            .collect();

        let list_widget = List::new(items)
            .style(base_style(colors))
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default();
        list_state.select(Some(app.list_selected));
        frame.render_stateful_widget(list_widget, chunks[1], &mut list_state);
    }

    // ── Show more ──
    let more = app.more_control();
    let more_style = if more.enabled {
        base_style(colors).fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        dim_style(colors).add_modifier(Modifier::DIM)
    };
    let more_button = Paragraph::new(Line::from(vec![
        Span::styled(format!("[ {} ]", more.label()), more_style),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(more_button, chunks[2]);

    // ── Status bar ──
    let key = base_style(colors).fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key),
        Span::raw(" Navigate  "),
        Span::styled("Enter", key),
        Span::raw(" Detail  "),
        Span::styled("m", key),
        Span::raw(" More  "),
        Span::styled("/", key),
        Span::raw(" Search  "),
        Span::styled("t", key),
        Span::raw(" Theme  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, dim_style(colors)),
    ]);
    frame.render_widget(Paragraph::new(status_line).style(base_style(colors)), chunks[3]);
}

fn page_info(app: &App) -> String {
    let visible = app.view.visible().len();
    format!(
        " {}-{} of {} · page {} · {} per page ",
        if visible == 0 { 0 } else { 1 },
        visible,
        app.view.matches().len(),
        app.view.page(),
        app.view.page_size()
    )
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        result.push(c);
        width += w;
    }
    result.push('…');
    result
}
