//! Profile tab: progress summary for the story.

use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::Sessions;
use crate::shared::panel;
use crate::tabs::{InputMode, KeyOutcome, Tab};

/// Profile tab. Stateless.
#[derive(Default)]
pub struct ProfileTab;

impl ProfileTab {
    /// Create the tab.
    pub fn new() -> Self {
        Self
    }
}

impl Tab for ProfileTab {
    fn input_mode(&self) -> InputMode {
        InputMode::VimNav
    }

    fn handle_key(&mut self, _key: KeyEvent, _sessions: &mut Sessions) -> KeyOutcome {
        KeyOutcome::Handled
    }

    fn draw(&self, frame: &mut Frame, area: Rect, sessions: &Sessions) {
        let story = &sessions.story;
        let mut lines = vec![Line::from(Span::styled(
            "Story",
            Style::default().fg(Color::Cyan).bold(),
        ))];
        lines.extend(
            story
                .profile_text()
                .lines()
                .skip(1)
                .map(|l| Line::from(l.trim_start().to_string())),
        );

        let chat = sessions.chat.state();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Chat",
            Style::default().fg(Color::Cyan).bold(),
        )));
        lines.push(Line::from(format!("Characters:     {}", chat.characters().len())));
        lines.push(Line::from(format!("Worlds:         {}", chat.worlds().len())));
        lines.push(Line::from(format!("Messages:       {}", chat.messages().len())));

        let paragraph = Paragraph::new(lines)
            .block(panel(" Profile ", Color::Cyan))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn status_hint(&self) -> &str {
        "1-7:tabs  ?:help  q:quit"
    }
}
