use super::{base_style, centered_rect, dim_style};
use crate::theme::ThemeColors;
use ratatui::{
    Frame,
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Show this help"),
            ("Ctrl+C", "Quit application"),
            ("Esc", "Back / cancel"),
        ],
    ),
    (
        "Book List",
        &[
            ("↑/k ↓/j", "Navigate up/down"),
            ("g/G", "Jump to first/last revealed book"),
            ("Enter", "Open book detail"),
            ("m", "Show more books"),
            ("/", "Search by title, author and genre"),
            ("t", "Theme settings"),
            ("Esc", "Clear search"),
            ("q", "Quit application"),
        ],
    ),
    (
        "Search",
        &[
            ("Tab", "Next field"),
            ("←/→", "Change author or genre"),
            ("Enter", "Apply search"),
        ],
    ),
    (
        "Detail",
        &[("↑/k ↓/j", "Scroll description"), ("Esc/q", "Close")],
    ),
];

pub fn render(frame: &mut Frame, colors: ThemeColors) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let mut help_text = vec![Line::from("")];
    for (section, bindings) in SECTIONS {
        help_text.push(Line::from(Span::styled(
            format!("  {}", section),
            base_style(colors).fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (keys, action) in *bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<10}", keys), base_style(colors).fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(base_style(colors).fg(Color::Cyan))
                .title(" Help - Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(dim_style(colors))),
        )
        .style(base_style(colors));

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(section: &str) -> &'static [(&'static str, &'static str)] {
        SECTIONS
            .iter()
            .find(|(name, _)| *name == section)
            .map(|(_, b)| *b)
            .unwrap()
    }

    #[test]
    fn test_q_is_not_a_global_quit() {
        assert!(bindings("Global").iter().all(|(keys, _)| *keys != "q"));
        assert!(bindings("Book List").contains(&("q", "Quit application")));
        assert!(bindings("Detail").contains(&("Esc/q", "Close")));
    }
}
