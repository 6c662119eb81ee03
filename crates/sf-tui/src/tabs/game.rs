//! Game tab: the branching story.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use crate::app::Sessions;
use crate::shared::panel;
use crate::tabs::{InputMode, KeyOutcome, Tab};

/// Game tab state.
pub struct GameTab {
    /// Highlighted choice in the current scene.
    cursor: usize,
    /// Error from the last action.
    error: Option<String>,
}

impl GameTab {
    /// Create the tab.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            error: None,
        }
    }
}

impl Default for GameTab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab for GameTab {
    fn input_mode(&self) -> InputMode {
        InputMode::VimNav
    }

    fn handle_key(&mut self, key: KeyEvent, sessions: &mut Sessions) -> KeyOutcome {
        let choices = sessions.story.state().current_scene().choices.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < choices {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.error = sessions.story.choose(self.cursor).err().map(|e| e.to_string());
                self.cursor = 0;
            }
            KeyCode::Char('r') => {
                self.error = sessions.story.reset_progress().err().map(|e| e.to_string());
                self.cursor = 0;
            }
            _ => {}
        }
        KeyOutcome::Handled
    }

    fn draw(&self, frame: &mut Frame, area: Rect, sessions: &Sessions) {
        let story = &sessions.story;
        let scene = story.state().current_scene();
        let recent = story
            .state()
            .progress()
            .visible_history(story.config().history_window);

        let history_height = if recent.is_empty() {
            0
        } else {
            (recent.len() as u16) * 2 + 2
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(history_height),
                Constraint::Min(4),
                Constraint::Length(scene.choices.len() as u16 + 2),
                Constraint::Length(1),
            ])
            .split(area);

        if !recent.is_empty() {
            let lines: Vec<Line> = recent
                .iter()
                .map(|t| {
                    Line::from(Span::styled(
                        format!("... {t}"),
                        Style::default().fg(Color::DarkGray).italic(),
                    ))
                })
                .collect();
            let history = Paragraph::new(lines)
                .block(panel(" Previously ", Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(history, chunks[0]);
        }

        let title = format!(" {} ", scene.title);
        let text = Paragraph::new(scene.text.as_str())
            .block(panel(&title, Color::Cyan))
            .wrap(Wrap { trim: true });
        frame.render_widget(text, chunks[1]);

        let items: Vec<ListItem> = scene
            .choices
            .iter()
            .enumerate()
            .map(|(i, c)| ListItem::new(format!("{}. {}", i + 1, c.label)))
            .collect();
        let list = List::new(items)
            .block(panel(" Choices ", Color::Yellow))
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, chunks[2], &mut list_state);

        if let Some(err) = &self.error {
            let err = Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red));
            frame.render_widget(err, chunks[3]);
        } else if story.state().at_ending() {
            let done = Paragraph::new("You reached an ending.")
                .style(Style::default().fg(Color::Green).bold());
            frame.render_widget(done, chunks[3]);
        }
    }

    fn status_hint(&self) -> &str {
        "j/k:choose  Enter:go  r:restart  ?:help  q:quit"
    }
}
