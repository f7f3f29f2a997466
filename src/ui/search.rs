use super::{base_style, centered_rect, dim_style};
use crate::catalog::Catalog;
use crate::filter::{ANY, FilterCriteria, Selector};
use crate::theme::ThemeColors;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Result of the search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInputResult {
    Submit(FilterCriteria),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Genre,
}

impl SearchField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Genre,
            Self::Genre => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Genre,
            Self::Author => Self::Title,
            Self::Genre => Self::Author,
        }
    }
}

/// A select control: `(value, label)` options and the chosen index.
#[derive(Debug, Clone)]
struct Select {
    options: Vec<(String, String)>,
    index: usize,
}

impl Select {
    /// Options start with the "any" sentinel under `any_label`.
    fn new(any_label: &str, entries: Vec<(&str, &str)>, current: &Selector) -> Self {
        let mut options = vec![(ANY.to_string(), any_label.to_string())];
        options.extend(
            entries
                .into_iter()
                .map(|(id, name)| (id.to_string(), name.to_string())),
        );
        let index = match current {
            Selector::Any => 0,
            Selector::Id(id) => options.iter().position(|(v, _)| v == id).unwrap_or(0),
        };
        Self { options, index }
    }

    fn value(&self) -> &str {
        &self.options[self.index].0
    }

    fn label(&self) -> &str {
        &self.options[self.index].1
    }

    fn next(&mut self) {
        self.index = (self.index + 1) % self.options.len();
    }

    fn prev(&mut self) {
        self.index = (self.index + self.options.len() - 1) % self.options.len();
    }
}

/// Search overlay with a title box and author/genre selects.
#[derive(Debug, Clone)]
pub struct SearchForm {
    title: String,
    author: Select,
    genre: Select,
    focus: SearchField,
}

impl SearchForm {
    /// Build the form, prefilled with the last submitted criteria.
    pub fn new(catalog: &Catalog, current: &FilterCriteria) -> Self {
        Self {
            title: current.title_query.clone(),
            author: Select::new("All Authors", catalog.author_options(), &current.author),
            genre: Select::new("All Genres", catalog.genre_options(), &current.genre),
            focus: SearchField::Title,
        }
    }

    #[cfg(test)]
    fn focus(&self) -> SearchField {
        self.focus
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_form(
            Some(self.title.as_str()),
            Some(self.author.value()),
            Some(self.genre.value()),
        )
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchInputResult> {
        match key.code {
            KeyCode::Enter => Some(SearchInputResult::Submit(self.criteria())),
            KeyCode::Esc => Some(SearchInputResult::Cancel),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Right => {
                self.cycle(Select::next);
                None
            }
            KeyCode::Left => {
                self.cycle(Select::prev);
                None
            }
            KeyCode::Char(c) if self.focus == SearchField::Title => {
                self.title.push(c);
                None
            }
            KeyCode::Backspace if self.focus == SearchField::Title => {
                self.title.pop();
                None
            }
            _ => None,
        }
    }

    fn cycle(&mut self, step: fn(&mut Select)) {
        match self.focus {
            SearchField::Title => {}
            SearchField::Author => step(&mut self.author),
            SearchField::Genre => step(&mut self.genre),
        }
    }

    /// Render the search overlay
    pub fn render(&self, frame: &mut Frame, colors: ThemeColors) {
        let area = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(base_style(colors).fg(Color::Yellow))
            .style(base_style(colors));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        let focused = |field: SearchField| {
            if self.focus == field {
                base_style(colors).fg(Color::Yellow)
            } else {
                dim_style(colors)
            }
        };

        let title_box = Paragraph::new(self.title.as_str())
            .style(base_style(colors))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focused(SearchField::Title))
                    .title(" Title "),
            );
        frame.render_widget(title_box, chunks[0]);

        frame.render_widget(
            select_line("Author", self.author.label(), focused(SearchField::Author), colors),
            chunks[1],
        );
        frame.render_widget(
            select_line("Genre ", self.genre.label(), focused(SearchField::Genre), colors),
            chunks[2],
        );

        let help = Paragraph::new("Tab: Next field | ←/→: Change | Enter: Search | Esc: Cancel")
            .style(dim_style(colors))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);

        if self.focus == SearchField::Title {
            let cursor_x = chunks[0].x + 1 + self.title.width() as u16;
            frame.set_cursor_position((cursor_x, chunks[0].y + 1));
        }
    }
}

fn select_line<'a>(name: &'a str, value: &'a str, style: Style, colors: ThemeColors) -> Paragraph<'a> {
    Paragraph::new(Line::from(vec![
        Span::styled(format!(" {}: ", name), style),
        Span::styled("◂ ", dim_style(colors)),
        Span::styled(value, base_style(colors).add_modifier(Modifier::BOLD)),
        Span::styled(" ▸", dim_style(colors)),
    ]))
}
