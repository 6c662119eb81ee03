//! Shared utilities for TUI views: the text input line, layout helpers, and popups.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// A single-line text input with a cursor.
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    /// Create an empty input line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> u16 {
        self.text[..self.cursor].chars().count() as u16
    }

    /// Clear the text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the text out, leaving the line empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Apply an editing key. Returns `false` if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.text.remove(prev);
                    self.cursor = prev;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.prev_boundary(),
            KeyCode::Right => {
                if self.cursor < self.text.len() {
                    self.cursor = self.text[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.text.len());
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            KeyCode::Char(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            _ => return false,
        }
        true
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Scroll position that keeps the bottom of `lines` in view, moved up by
/// `from_bottom` rows.
pub fn bottom_scroll(lines: &[Line], area: Rect, from_bottom: u16) -> u16 {
    let inner_width = area.width.saturating_sub(2) as usize;
    let total_wrapped: usize = lines
        .iter()
        .map(|l| {
            if inner_width == 0 {
                1
            } else {
                l.width().max(1).div_ceil(inner_width)
            }
        })
        .sum();
    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll =
        u16::try_from(total_wrapped.saturating_sub(visible_height)).unwrap_or(u16::MAX);
    max_scroll.saturating_sub(from_bottom)
}

/// Cursor position inside a bordered input box, `column` cells past the
/// left border. `None` when it would land on or past the right border.
pub fn input_cursor(area: Rect, column: u16) -> Option<Position> {
    let x = area.x.saturating_add(1).saturating_add(column);
    let right_border = area.x.saturating_add(area.width).saturating_sub(1);
    (x < right_border).then(|| Position::new(x, area.y.saturating_add(1)))
}

/// Bordered block with a colored border.
pub fn panel(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw a global help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Tabs:"),
        Line::from("  1-7 / Tab   Switch tab (outside text input)"),
        Line::from("  Ctrl+1..7   Switch tab (anywhere)"),
        Line::from(""),
        Line::from("Characters / Worlds / Crew:"),
        Line::from("  j / k       Move down / up"),
        Line::from("  n           New entry (opens the form)"),
        Line::from("  Enter       Select character / submit form"),
        Line::from("  d           Remove crew member"),
        Line::from("  C           Clear the crew"),
        Line::from(""),
        Line::from("Game:"),
        Line::from("  j / k       Move between choices"),
        Line::from("  Enter       Take the choice"),
        Line::from("  r           Restart the story (crew stays)"),
        Line::from(""),
        Line::from("Chat:"),
        Line::from("  Enter       Send message"),
        Line::from("  Esc         Clear input"),
        Line::from(""),
        Line::from("  ?           Show this help (any key closes it)"),
        Line::from("  q / Ctrl+C  Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(panel(" Help ", Color::Cyan))
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
