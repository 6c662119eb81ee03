//! Worlds tab: world list and the creation form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use sf_core::WorldDraft;

use crate::app::Sessions;
use crate::form::{Form, FormEvent};
use crate::shared::panel;
use crate::tabs::{InputMode, KeyOutcome, Tab};

/// Worlds tab state.
pub struct WorldsTab {
    cursor: usize,
    form: Option<Form>,
    error: Option<String>,
}

impl WorldsTab {
    /// Create the tab with the form closed.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            form: None,
            error: None,
        }
    }

    fn submit(&mut self, sessions: &mut Sessions) {
        let Some(form) = &mut self.form else {
            return;
        };
        let mut draft = WorldDraft::new(form.value(0), form.value(1), form.value(2));
        if sessions.chat.state_mut().create_world(&mut draft).is_some() {
            self.form = None;
            self.error = None;
            self.cursor = sessions.chat.state().worlds().len().saturating_sub(1);
        } else {
            self.error = Some("Name and description are required.".to_string());
        }
    }
}

impl Default for WorldsTab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab for WorldsTab {
    fn input_mode(&self) -> InputMode {
        if self.form.is_some() {
            InputMode::TextInput
        } else {
            InputMode::VimNav
        }
    }

    fn handle_key(&mut self, key: KeyEvent, sessions: &mut Sessions) -> KeyOutcome {
        if let Some(form) = &mut self.form {
            match form.handle_key(key) {
                FormEvent::Editing => {}
                FormEvent::Submit => self.submit(sessions),
                FormEvent::Cancel => {
                    self.form = None;
                    self.error = None;
                }
            }
            return KeyOutcome::Handled;
        }

        let count = sessions.chat.state().worlds().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < count {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char('n') => {
                self.form = Some(Form::new(
                    " New World ",
                    &[("Name", true), ("Description", true), ("Genre", false)],
                ));
            }
            _ => {}
        }
        KeyOutcome::Handled
    }

    fn draw(&self, frame: &mut Frame, area: Rect, sessions: &Sessions) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let worlds = sessions.chat.state().worlds();
        if worlds.is_empty() {
            let empty = Paragraph::new("No worlds yet. Press n to create one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(panel(" Worlds ", Color::Magenta));
            frame.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = worlds
                .iter()
                .map(|w| {
                    if w.genre.is_empty() {
                        ListItem::new(w.name.clone())
                    } else {
                        ListItem::new(format!("{} [{}]", w.name, w.genre))
                    }
                })
                .collect();
            let title = format!(" Worlds ({}) ", worlds.len());
            let list = List::new(items)
                .block(panel(&title, Color::Magenta))
                .highlight_style(Style::default().fg(Color::Yellow).bold());
            let mut list_state = ListState::default().with_selected(Some(self.cursor));
            frame.render_stateful_widget(list, chunks[0], &mut list_state);
        }

        if let Some(form) = &self.form {
            form.draw(frame, chunks[1], self.error.as_deref());
            return;
        }

        let detail: Vec<Line> = match worlds.get(self.cursor) {
            Some(w) => vec![
                Line::from(Span::styled(w.name.clone(), Style::default().bold())),
                Line::from(Span::styled(
                    w.genre.clone(),
                    Style::default().fg(Color::Magenta),
                )),
                Line::from(""),
                Line::from(w.description.clone()),
            ],
            None => Vec::new(),
        };
        let detail = Paragraph::new(detail)
            .block(panel(" Details ", Color::Magenta))
            .wrap(Wrap { trim: false });
        frame.render_widget(detail, chunks[1]);
    }

    fn status_hint(&self) -> &str {
        if self.form.is_some() {
            "Enter:next/submit  Tab:field  Esc:cancel"
        } else {
            "j/k:move  n:new  ?:help  q:quit"
        }
    }
}
