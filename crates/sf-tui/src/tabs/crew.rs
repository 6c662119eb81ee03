//! Crew tab: the story's persisted crew roster.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use sf_core::CharacterDraft;

use crate::app::Sessions;
use crate::form::{Form, FormEvent};
use crate::shared::panel;
use crate::tabs::{InputMode, KeyOutcome, Tab};

/// Crew tab state.
pub struct CrewTab {
    cursor: usize,
    form: Option<Form>,
    /// Result of the last action, shown under the list.
    notice: Option<(String, Color)>,
}

impl CrewTab {
    /// Create the tab with the form closed.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            form: None,
            notice: None,
        }
    }

    fn submit(&mut self, sessions: &mut Sessions) {
        let Some(form) = &mut self.form else {
            return;
        };
        let name = form.value(0).trim().to_string();
        let mut draft = CharacterDraft::new(form.value(0), form.value(1), form.value(2));
        match sessions.story.add_crew(&mut draft) {
            Ok(true) => {
                self.form = None;
                self.cursor = sessions.story.state().crew().len().saturating_sub(1);
                self.notice = Some((format!("{name} joined the crew."), Color::Green));
            }
            Ok(false) => {
                self.notice = Some(("Name and description are required.".to_string(), Color::Red));
            }
            Err(e) => self.notice = Some((format!("Could not save: {e}"), Color::Red)),
        }
    }

    fn remove_selected(&mut self, sessions: &mut Sessions) {
        let Some(member) = sessions.story.state().crew().get(self.cursor) else {
            return;
        };
        let (id, name) = (member.id, member.name.clone());
        self.notice = Some(match sessions.story.remove_crew(id) {
            Ok(_) => (format!("{name} left the crew."), Color::Yellow),
            Err(e) => (format!("Could not save: {e}"), Color::Red),
        });
        let count = sessions.story.state().crew().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    fn clear(&mut self, sessions: &mut Sessions) {
        self.notice = Some(match sessions.story.clear_crew() {
            Ok(()) => ("Crew cleared. Story progress is unchanged.".to_string(), Color::Yellow),
            Err(e) => (format!("Could not save: {e}"), Color::Red),
        });
        self.cursor = 0;
    }
}

impl Default for CrewTab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab for CrewTab {
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
                FormEvent::Cancel => self.form = None,
            }
            return KeyOutcome::Handled;
        }

        let count = sessions.story.state().crew().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < count {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char('n') => {
                self.notice = None;
                self.form = Some(Form::new(
                    " New Crew Member ",
                    &[("Name", true), ("Role", true), ("Emoji", false)],
                ));
            }
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(sessions),
            KeyCode::Char('C') => self.clear(sessions),
            _ => {}
        }
        KeyOutcome::Handled
    }

    fn draw(&self, frame: &mut Frame, area: Rect, sessions: &Sessions) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(chunks[0]);

        let crew = sessions.story.state().crew();
        if crew.is_empty() {
            let empty = Paragraph::new("No crew yet. Press n to add someone.")
                .style(Style::default().fg(Color::DarkGray))
                .block(panel(" Crew ", Color::Green));
            frame.render_widget(empty, left[0]);
        } else {
            let items: Vec<ListItem> = crew
                .iter()
                .map(|c| {
                    let emoji = if c.personality.is_empty() {
                        c.initial().to_string()
                    } else {
                        c.personality.clone()
                    };
                    ListItem::new(format!("{emoji} {} - {}", c.name, c.description))
                })
                .collect();
            let title = format!(" Crew ({}) ", crew.len());
            let list = List::new(items)
                .block(panel(&title, Color::Green))
                .highlight_style(Style::default().fg(Color::Yellow).bold());
            let mut list_state = ListState::default().with_selected(Some(self.cursor));
            frame.render_stateful_widget(list, left[0], &mut list_state);
        }

        if let Some((text, color)) = &self.notice {
            let notice = Paragraph::new(text.as_str()).style(Style::default().fg(*color));
            frame.render_widget(notice, left[1]);
        }

        if let Some(form) = &self.form {
            let error = match &self.notice {
                Some((text, Color::Red)) => Some(text.as_str()),
                _ => None,
            };
            form.draw(frame, chunks[1], error);
        } else {
            let help = Paragraph::new(vec![
                Line::from("n  add a crew member"),
                Line::from("d  remove the selected member"),
                Line::from("C  clear the whole crew"),
                Line::from(""),
                Line::from(Span::styled(
                    "The crew is saved automatically.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(panel(" Actions ", Color::Green));
            frame.render_widget(help, chunks[1]);
        }
    }

    fn status_hint(&self) -> &str {
        if self.form.is_some() {
            "Enter:next/submit  Tab:field  Esc:cancel"
        } else {
            "j/k:move  n:new  d:remove  C:clear  ?:help  q:quit"
        }
    }
}
