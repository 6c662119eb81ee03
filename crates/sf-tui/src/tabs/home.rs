//! Home tab: story welcome screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::Sessions;
use crate::shared::panel;
use crate::tabs::{InputMode, KeyOutcome, Tab, TabId};

/// Home tab. Stateless; everything shown comes from the story session.
#[derive(Default)]
pub struct HomeTab;

impl HomeTab {
    /// Create the tab.
    pub fn new() -> Self {
        Self
    }
}

impl Tab for HomeTab {
    fn input_mode(&self) -> InputMode {
        InputMode::VimNav
    }

    fn handle_key(&mut self, key: KeyEvent, _sessions: &mut Sessions) -> KeyOutcome {
        match key.code {
            KeyCode::Enter | KeyCode::Char('s') => KeyOutcome::SwitchTo(TabId::Game),
            KeyCode::Char('c') => KeyOutcome::SwitchTo(TabId::Crew),
            _ => KeyOutcome::Handled,
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, sessions: &Sessions) {
        let story = &sessions.story;
        let mut lines: Vec<Line> = story
            .intro()
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(first) = lines.first_mut() {
            *first = first.clone().style(Style::default().fg(Color::Cyan).bold());
        }
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Crew aboard: {}",
            story.state().crew().len()
        )));
        lines.push(Line::from(format!(
            "Current scene: {}",
            story.state().current_scene().title
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter: play the story   c: manage the crew",
            Style::default().fg(Color::Yellow),
        )));

        let paragraph = Paragraph::new(lines)
            .block(panel(" Home ", Color::Cyan))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn status_hint(&self) -> &str {
        "Enter:play  c:crew  1-7:tabs  ?:help  q:quit"
    }
}
