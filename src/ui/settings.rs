use super::{base_style, centered_rect, dim_style};
use crate::theme::{ThemeChoice, ThemeColors};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Result of the settings form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsInputResult {
    Submit(ThemeChoice),
    Cancel,
}

/// Theme picker overlay.
#[derive(Debug, Clone)]
pub struct SettingsForm {
    choice: ThemeChoice,
}

impl SettingsForm {
    pub fn new(current: ThemeChoice) -> Self {
        Self { choice: current }
    }

    #[cfg(test)]
    fn choice(&self) -> ThemeChoice {
        self.choice
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SettingsInputResult> {
        match key.code {
            KeyCode::Enter => Some(SettingsInputResult::Submit(self.choice)),
            KeyCode::Esc => Some(SettingsInputResult::Cancel),
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('j')
            | KeyCode::Char('k') => {
                self.choice = self.choice.toggle();
                None
            }
            KeyCode::Char('d') => {
                self.choice = ThemeChoice::Day;
                None
            }
            KeyCode::Char('n') => {
                self.choice = ThemeChoice::Night;
                None
            }
            _ => None,
        }
    }

    /// Render the settings overlay. The preview uses the highlighted theme.
    pub fn render(&self, frame: &mut Frame, current: ThemeColors) {
        let area = centered_rect(40, 30, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_style(base_style(current).fg(Color::Yellow))
            .style(base_style(current));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(ThemeChoice::ALL.len() as u16),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(" Theme").style(dim_style(current)), chunks[0]);

        let options: Vec<Line> = ThemeChoice::ALL
            .iter()
            .map(|t| {
                if *t == self.choice {
                    Line::from(Span::styled(
                        format!("  ● {}", t.label()),
                        base_style(current).add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(format!("  ○ {}", t.label()), dim_style(current)))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(options), chunks[1]);

        let preview = self.choice.colors();
        let sample = Paragraph::new(format!(
            " rgb({}) on rgb({}) ",
            preview.dark, preview.light
        ))
        .style(base_style(preview))
        .alignment(Alignment::Center);
        frame.render_widget(sample, chunks[3]);

        let help = Paragraph::new("↑/↓: Change | Enter: Save | Esc: Cancel")
            .style(dim_style(current))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[4]);
    }
}
