//! Characters tab: character list, selection, and the creation form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use sf_core::CharacterDraft;

use crate::app::Sessions;
use crate::form::{Form, FormEvent};
use crate::shared::panel;
use crate::tabs::{InputMode, KeyOutcome, Tab, TabId};

/// Characters tab state.
pub struct CharactersTab {
    /// Cursor in the character list.
    cursor: usize,
    /// Creation form, when open.
    form: Option<Form>,
    /// Message from the last failed submission.
    error: Option<String>,
}

impl CharactersTab {
    /// Create the tab with the form closed.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            form: None,
            error: None,
        }
    }

    fn new_form() -> Form {
        Form::new(
            " New Character ",
            &[("Name", true), ("Description", true), ("Personality", false)],
        )
    }

    fn submit(&mut self, sessions: &mut Sessions) {
        let Some(form) = &mut self.form else {
            return;
        };
        let mut draft = CharacterDraft::new(form.value(0), form.value(1), form.value(2));
        if sessions.chat.state_mut().create_character(&mut draft).is_some() {
            self.form = None;
            self.error = None;
            self.cursor = sessions.chat.state().characters().len().saturating_sub(1);
        } else {
            self.error = Some("Name and description are required.".to_string());
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, sessions: &mut Sessions) {
        let Some(form) = &mut self.form else {
            return;
        };
        match form.handle_key(key) {
            FormEvent::Editing => {}
            FormEvent::Submit => self.submit(sessions),
            FormEvent::Cancel => {
                self.form = None;
                self.error = None;
            }
        }
    }
}

impl Default for CharactersTab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab for CharactersTab {
    fn input_mode(&self) -> InputMode {
        if self.form.is_some() {
            InputMode::TextInput
        } else {
            InputMode::VimNav
        }
    }

    fn handle_key(&mut self, key: KeyEvent, sessions: &mut Sessions) -> KeyOutcome {
        if self.form.is_some() {
            self.handle_form_key(key, sessions);
            return KeyOutcome::Handled;
        }

        let count = sessions.chat.state().characters().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < count {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char('g') => self.cursor = 0,
            KeyCode::Char('G') => self.cursor = count.saturating_sub(1),
            KeyCode::Char('n') => self.form = Some(Self::new_form()),
            KeyCode::Enter => {
                let id = sessions.chat.state().characters().get(self.cursor).map(|c| c.id);
                if let Some(id) = id {
                    sessions.chat.state_mut().select_character(id);
                    return KeyOutcome::SwitchTo(TabId::Chat);
                }
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

        let state = sessions.chat.state();
        let selected_id = state.selected().map(|c| c.id);
        let characters = state.characters();

        if characters.is_empty() {
            let empty = Paragraph::new("No characters yet. Press n to create one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(panel(" Characters ", Color::Blue));
            frame.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = characters
                .iter()
                .map(|c| {
                    let marker = if Some(c.id) == selected_id { "* " } else { "  " };
                    ListItem::new(format!("{marker}({}) {}", c.initial(), c.name))
                })
                .collect();
            let title = format!(" Characters ({}) ", characters.len());
            let list = List::new(items)
                .block(panel(&title, Color::Blue))
                .highlight_style(Style::default().fg(Color::Yellow).bold());
            let mut list_state = ListState::default().with_selected(Some(self.cursor));
            frame.render_stateful_widget(list, chunks[0], &mut list_state);
        }

        if let Some(form) = &self.form {
            form.draw(frame, chunks[1], self.error.as_deref());
            return;
        }

        let detail = match characters.get(self.cursor) {
            Some(c) => {
                let mut lines = vec![
                    Line::from(Span::styled(c.name.clone(), Style::default().bold())),
                    Line::from(""),
                    Line::from(c.description.clone()),
                ];
                if !c.personality.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(vec![
                        Span::styled("Personality: ", Style::default().fg(Color::Cyan)),
                        Span::raw(c.personality.clone()),
                    ]));
                }
                if let Some(avatar) = &c.avatar {
                    lines.push(Line::from(vec![
                        Span::styled("Avatar: ", Style::default().fg(Color::Cyan)),
                        Span::styled(avatar.clone(), Style::default().fg(Color::DarkGray)),
                    ]));
                }
                lines
            }
            None => Vec::new(),
        };
        let detail = Paragraph::new(detail)
            .block(panel(" Details ", Color::Blue))
            .wrap(Wrap { trim: false });
        frame.render_widget(detail, chunks[1]);
    }

    fn status_hint(&self) -> &str {
        if self.form.is_some() {
            "Enter:next/submit  Tab:field  Esc:cancel"
        } else {
            "j/k:move  Enter:chat with  n:new  ?:help  q:quit"
        }
    }
}
