//! Shared form state and rendering.
//!
//! A form is an ordered list of labelled text fields with one focused
//! field and the validation messages from the last submit attempt.

use crossterm::event::{KeyCode, KeyEvent};
use gymtrack_core::forms::{Field, ValidationErrors};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{TextField, truncate_with_ellipsis};

/// Rows used by one field: label, value, error.
pub const FIELD_HEIGHT: u16 = 3;

#[derive(Debug, Clone)]
pub struct FormField {
    pub field: Field,
    pub label: &'static str,
    pub input: TextField,
}

#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
    errors: ValidationErrors,
}

impl Form {
    pub fn new(fields: Vec<(Field, TextField)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(field, input)| FormField {
                    field,
                    label: field.label(),
                    input,
                })
                .collect(),
            focus: 0,
            errors: ValidationErrors::default(),
        }
    }

    /// Overrides the label shown for `field`.
    #[must_use]
    pub fn with_label(mut self, field: Field, label: &'static str) -> Self {
        if let Some(f) = self.fields.iter_mut().find(|f| f.field == field) {
            f.label = label;
        }
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn value(&self, field: Field) -> &str {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map_or("", |f| f.input.value())
    }

    pub fn clear(&mut self, field: Field) {
        if let Some(f) = self.fields.iter_mut().find(|f| f.field == field) {
            f.input.clear();
        }
    }

    pub fn focused(&self) -> Field {
        self.fields[self.focus].field
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    /// Stores `errors` and moves focus to the first failing field.
    pub fn set_errors(&mut self, errors: ValidationErrors) {
        if let Some(first) = errors.iter().next()
            && let Some(idx) = self.fields.iter().position(|f| f.field == first.field)
        {
            self.focus = idx;
        }
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ValidationErrors::default();
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Focus movement and text editing. Returns false for keys the form
    /// does not handle (Enter, Esc, shortcuts).
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            _ => self.fields[self.focus].input.handle_key(key),
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.fields[self.focus].input.insert_str(text);
    }
}

/// Renders the form's fields top to bottom and places the cursor.
pub fn render_form(frame: &mut Frame, form: &Form, area: Rect, busy: bool) {
    let mut y = area.y;
    let width = area.width as usize;
    for (idx, field) in form.fields().iter().enumerate() {
        if y + FIELD_HEIGHT > area.y + area.height {
            break;
        }
        let focused = idx == form.focus && !busy;
        let label_style = if focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(field.label, label_style))),
            Rect::new(area.x, y, area.width, 1),
        );

        let prefix = if focused { "> " } else { "  " };
        let value = truncate_with_ellipsis(&field.input.display(), width.saturating_sub(3));
        let value_style = if busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::Green)),
                Span::styled(value, value_style),
            ])),
            Rect::new(area.x, y + 1, area.width, 1),
        );
        if focused {
            let col = (field.input.cursor_col() + 2).min(width.saturating_sub(1)) as u16;
            frame.set_cursor_position(Position::new(area.x + col, y + 1));
        }

        if let Some(error) = form.error(field.field) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(Color::Red),
                ))),
                Rect::new(area.x, y + 2, area.width, 1),
            );
        }
        y += FIELD_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn form() -> Form {
        Form::new(vec![
            (Field::Email, TextField::default()),
            (Field::Password, TextField::masked()),
        ])
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = form();
        assert_eq!(form.focused(), Field::Email);
        form.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(form.focused(), Field::Password);
        form.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(form.focused(), Field::Email);
        form.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(form.focused(), Field::Password);
    }

    #[test]
    fn test_set_errors_focuses_first_failure() {
        let mut form = form();
        form.focus_next();
        let errors = gymtrack_core::forms::SignInDraft::default()
            .validate()
            .unwrap_err();
        form.set_errors(errors);
        assert_eq!(form.focused(), Field::Email);
        assert!(form.error(Field::Password).is_some());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = form();
        form.paste("ana@gym.com");
        form.focus_next();
        assert!(form.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert_eq!(form.value(Field::Email), "ana@gym.com");
        assert_eq!(form.value(Field::Password), "x");
    }
}
