//! Multi-field entry form used by the Characters, Worlds and Crew tabs.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::shared::{InputLine, panel};

/// What a key press did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// Still editing.
    Editing,
    /// Enter on the last field: the owner should try to submit.
    Submit,
    /// Esc: the owner should close the form.
    Cancel,
}

/// A labeled field.
#[derive(Debug, Clone)]
struct Field {
    label: &'static str,
    required: bool,
    input: InputLine,
}

/// Form state. Values survive a failed submission.
#[derive(Debug, Clone)]
pub struct Form {
    title: &'static str,
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    /// Create a form with `(label, required)` fields.
    pub fn new(title: &'static str, fields: &[(&'static str, bool)]) -> Self {
        Self {
            title,
            fields: fields
                .iter()
                .map(|&(label, required)| Field {
                    label,
                    required,
                    input: InputLine::new(),
                })
                .collect(),
            focus: 0,
        }
    }

    /// Value of field `index`, empty when out of range.
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.input.text()).unwrap_or("")
    }

    /// Index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Enter => {
                if self.focus + 1 == self.fields.len() {
                    return FormEvent::Submit;
                }
                self.focus += 1;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len().max(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self
                    .focus
                    .checked_sub(1)
                    .unwrap_or(self.fields.len().saturating_sub(1));
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.input.handle_key(key);
                }
            }
        }
        FormEvent::Editing
    }

    /// Draw the form, placing the cursor in the focused field.
    pub fn draw(&self, frame: &mut Frame, area: Rect, error: Option<&str>) {
        let block = panel(self.title, Color::Green);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label_width = self
            .fields
            .iter()
            .map(|f| f.label.len() + usize::from(f.required))
            .max()
            .unwrap_or(0) as u16
            + 2;

        let mut lines: Vec<Line> = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            let marker = if field.required { "*" } else { "" };
            let label = format!("{}{marker}:", field.label);
            let style = if i == self.focus {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{label:<width$}", width = label_width as usize),
                    style,
                ),
                Span::raw(field.input.text().to_string()),
            ]));
        }
        lines.push(Line::from(""));
        if let Some(err) = error {
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Enter:next/submit  Tab:next field  Esc:cancel  * required",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(field) = self.fields.get(self.focus) {
            let x = inner.x + label_width + field.input.cursor_column();
            let y = inner.y + self.focus as u16;
            if x < inner.x + inner.width && y < inner.y + inner.height {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut Form, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn character_form() -> Form {
        Form::new(
            " New Character ",
            &[("Name", true), ("Description", true), ("Personality", false)],
        )
    }

    #[test]
    fn enter_walks_fields_then_submits() {
        let mut form = character_form();
        type_str(&mut form, "Lyra");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Editing);
        type_str(&mut form, "A bard");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Editing);
        assert_eq!(form.focus(), 2);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Submit);
        assert_eq!(form.value(0), "Lyra");
        assert_eq!(form.value(1), "A bard");
        assert_eq!(form.value(2), "");
    }

    #[test]
    fn tab_wraps_and_esc_cancels() {
        let mut form = character_form();
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), 2);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), 0);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancel);
    }

    #[test]
    fn values_follow_focus() {
        let mut form = character_form();
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "x");
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(1), "x");
        assert_eq!(form.value(9), "");
    }
}
