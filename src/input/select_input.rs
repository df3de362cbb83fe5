use crate::core::FieldId;
use crate::core::value::FieldValue;
use crate::input::{Input, InputBase, KeyResult};
use crate::input::validators::Validator;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

/// Single-choice select. Starts with nothing chosen; an untouched field
/// reports an empty value.
pub struct SelectInput {
    base: InputBase,
    options: Vec<String>,
    selected: Option<usize>,
}

impl SelectInput {
    pub fn new(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            base: InputBase::new(label),
            options,
            selected: None,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.base = self.base.with_validator(validator);
        self
    }

    fn current_option(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    fn move_selection(&mut self, direction: isize) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        let next = match self.selected {
            None => {
                if direction >= 0 {
                    0
                } else {
                    len - 1
                }
            }
            Some(current) => (current as isize + direction + len) % len,
        };
        self.selected = Some(next as usize);
        self.base.error = None;
    }
}

impl Input for SelectInput {
    fn id(&self) -> &FieldId {
        &self.base.id
    }

    fn label(&self) -> &str {
        &self.base.label
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.current_option().unwrap_or("").to_string())
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            self.selected = self.options.iter().position(|opt| *opt == text);
        }
    }

    fn is_focused(&self) -> bool {
        self.base.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.base.focused = focused;
    }

    fn error(&self) -> Option<&str> {
        self.base.error.as_deref()
    }

    fn set_error(&mut self, error: Option<String>) {
        self.base.error = error;
    }

    fn validators(&self) -> &[Validator] {
        &self.base.validators
    }

    fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> KeyResult {
        match code {
            KeyCode::Left => {
                self.move_selection(-1);
                KeyResult::Handled
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                self.move_selection(1);
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render_content(&self) -> Vec<SpanLine> {
        let text = match self.current_option() {
            Some(option) if self.base.focused => format!("‹ {} ›", option),
            Some(option) => option.to_string(),
            None if self.base.focused => "‹ — ›".to_string(),
            None => "—".to_string(),
        };
        let style = if self.current_option().is_none() {
            Style::new().color(Color::DarkGrey)
        } else {
            Style::new()
        };
        vec![vec![Span::styled(text, style)]]
    }

    fn hint(&self) -> Option<&'static str> {
        Some("Left/Right or Space to change")
    }
}
