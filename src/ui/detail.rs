use super::{base_style, centered_rect, dim_style};
use crate::app::App;
use crate::catalog::BookRecord;
use crate::theme::ThemeColors;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(app: &App, book: &BookRecord, frame: &mut Frame, colors: ThemeColors) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    // Layout: header(5) + description(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Title / subtitle ──
    let meta_lines = vec![
        Line::from(Span::styled(
            format!(" {}", book.title),
            base_style(colors).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", app.catalog.subtitle(book)),
            base_style(colors).fg(Color::Cyan),
        )),
        Line::from(vec![
            Span::styled(" Genres: ", dim_style(colors)),
            Span::styled(app.catalog.genre_names(book), base_style(colors)),
            Span::raw("   "),
            Span::styled("Cover: ", dim_style(colors)),
            Span::styled(
                &book.image_url,
                base_style(colors).fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ];

    let meta_block = Paragraph::new(meta_lines).style(base_style(colors)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(dim_style(colors))
            .title(" Book Detail "),
    );
    frame.render_widget(meta_block, chunks[0]);

    // ── Description ──
    let description = Paragraph::new(book.description.as_str())
        .style(base_style(colors))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(dim_style(colors))
                .title(" Description ")
                .title_bottom(
                    Line::from(format!(" scroll: {} ", app.detail_scroll))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(description, chunks[1]);

    let key = base_style(colors).fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key),
        Span::raw(" Scroll  "),
        Span::styled("Esc", key),
        Span::raw(" Close"),
    ]);
    frame.render_widget(Paragraph::new(status_line).style(base_style(colors)), chunks[2]);
}
