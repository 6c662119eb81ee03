//! Chat tab: conversation with the selected character.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use sf_core::Sender;

use crate::app::Sessions;
use crate::shared::{InputLine, bottom_scroll, input_cursor, panel};
use crate::tabs::{InputMode, KeyOutcome, Tab, TabId};

/// Chat tab state.
pub struct ChatTab {
    /// Message being typed.
    input: InputLine,
    /// Scroll offset from the bottom.
    output_scroll: u16,
}

impl ChatTab {
    /// Create an empty chat tab.
    pub fn new() -> Self {
        Self {
            input: InputLine::new(),
            output_scroll: 0,
        }
    }

    fn submit(&mut self, sessions: &mut Sessions) -> KeyOutcome {
        if sessions.chat.state().selected().is_none() {
            return KeyOutcome::SwitchTo(TabId::Characters);
        }
        let text = self.input.take();
        if sessions
            .chat
            .state_mut()
            .send_message(&text, Instant::now())
            .is_some()
        {
            self.output_scroll = 0;
        }
        KeyOutcome::Handled
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, sessions: &Sessions) {
        let lines = match sessions.chat.state().selected() {
            Some(c) => {
                let mut first = vec![
                    Span::styled(format!("({}) ", c.initial()), Style::default().fg(Color::Cyan)),
                    Span::styled(c.name.clone(), Style::default().bold()),
                ];
                if !c.personality.is_empty() {
                    first.push(Span::styled(
                        format!("  {}", c.personality),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                vec![
                    Line::from(first),
                    Line::from(Span::styled(
                        c.avatar.clone().unwrap_or_default(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            }
            None => vec![Line::from(Span::styled(
                "No character selected. Press Enter to pick one in the Characters tab.",
                Style::default().fg(Color::DarkGray).italic(),
            ))],
        };
        frame.render_widget(Paragraph::new(lines).block(panel(" Chat ", Color::Blue)), area);
    }

    fn message_lines(sessions: &Sessions) -> Vec<Line<'static>> {
        let state = sessions.chat.state();
        if state.messages().is_empty() {
            return vec![Line::from(Span::styled(
                "Start a conversation with a character!",
                Style::default().fg(Color::DarkGray).italic(),
            ))];
        }

        let mut lines: Vec<Line> = state
            .messages()
            .iter()
            .map(|m| {
                let (color, align) = match m.sender {
                    Sender::User => (Color::Yellow, Alignment::Right),
                    Sender::Character => (Color::Cyan, Alignment::Left),
                };
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", m.speaker()),
                        Style::default().fg(color).bold(),
                    ),
                    Span::raw(m.text.clone()),
                    Span::styled(
                        format!("  {}", m.sent_at.format("%H:%M")),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
                .alignment(align)
            })
            .collect();

        for reply in state.pending().iter() {
            lines.push(Line::from(Span::styled(
                format!("{} is typing...", reply.character.name),
                Style::default().fg(Color::DarkGray).italic(),
            )));
        }
        lines
    }
}

impl Default for ChatTab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab for ChatTab {
    fn input_mode(&self) -> InputMode {
        InputMode::TextInput
    }

    fn handle_key(&mut self, key: KeyEvent, sessions: &mut Sessions) -> KeyOutcome {
        match key.code {
            KeyCode::Enter => return self.submit(sessions),
            KeyCode::Esc => self.input.clear(),
            KeyCode::Up => self.output_scroll = self.output_scroll.saturating_add(1),
            KeyCode::Down => self.output_scroll = self.output_scroll.saturating_sub(1),
            _ => {
                self.input.handle_key(key);
            }
        }
        KeyOutcome::Handled
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.output_scroll = self.output_scroll.saturating_add(1);
            }
            MouseEventKind::ScrollDown => {
                self.output_scroll = self.output_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, sessions: &Sessions) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(3),    // Messages
                Constraint::Length(3), // Input
            ])
            .split(area);

        self.draw_header(frame, chunks[0], sessions);

        let lines = Self::message_lines(sessions);
        let scroll = bottom_scroll(&lines, chunks[1], self.output_scroll);
        let messages = Paragraph::new(lines)
            .block(panel(" Messages ", Color::Blue))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(messages, chunks[1]);

        let input = Paragraph::new(format!("> {}", self.input.text()))
            .block(panel("", Color::Green));
        frame.render_widget(input, chunks[2]);

        // "> " prompt
        let column = self.input.cursor_column().saturating_add(2);
        if let Some(cursor) = input_cursor(chunks[2], column) {
            frame.set_cursor_position(cursor);
        }
    }

    fn status_hint(&self) -> &str {
        "Enter:send  Esc:clear  \u{2191}\u{2193}:scroll  Ctrl+2:characters  Ctrl+C:quit"
    }
}
