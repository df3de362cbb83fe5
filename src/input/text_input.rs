use crate::core::FieldId;
use crate::core::field::InputType;
use crate::core::value::FieldValue;
use crate::input::{Input, InputBase, KeyResult};
use crate::input::validators::{self, Validator};
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

pub struct TextInput {
    base: InputBase,
    value: String,
    cursor_pos: usize,
    input_type: InputType,
    placeholder: Option<String>,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(label),
            value: String::new(),
            cursor_pos: 0,
            input_type: InputType::Text,
            placeholder: None,
        }
    }

    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self.base = match input_type {
            InputType::Email => self.base.with_validator(validators::email()),
            InputType::Phone => self.base.with_validator(validators::phone()),
            InputType::Text => self.base,
        };
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.base = self.base.with_validator(validator);
        self
    }

    fn accepts_char(&self, ch: char) -> bool {
        match self.input_type {
            InputType::Phone => ch.is_ascii_digit() || matches!(ch, ' ' | '+' | '-' | '(' | ')'),
            _ => !ch.is_control(),
        }
    }

    fn handle_char(&mut self, ch: char) {
        if !self.accepts_char(ch) {
            return;
        }
        let byte_pos = self
            .value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_pos)
            .unwrap_or(self.value.len());
        self.value.insert(byte_pos, ch);
        self.cursor_pos += 1;
        self.base.error = None;
    }

    fn handle_backspace(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let char_indices: Vec<usize> = self.value.char_indices().map(|(i, _)| i).collect();
        self.value.remove(char_indices[self.cursor_pos - 1]);
        self.cursor_pos -= 1;
        self.base.error = None;
    }

    fn handle_delete(&mut self) {
        let char_indices: Vec<usize> = self.value.char_indices().map(|(i, _)| i).collect();
        if let Some(&byte_pos) = char_indices.get(self.cursor_pos) {
            self.value.remove(byte_pos);
            self.base.error = None;
        }
    }
}

impl Input for TextInput {
    fn id(&self) -> &FieldId {
        &self.base.id
    }

    fn label(&self) -> &str {
        &self.base.label
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.value.clone())
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            self.cursor_pos = text.chars().count();
            self.value = text;
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
            KeyCode::Char(ch) => {
                self.handle_char(ch);
                KeyResult::Handled
            }
            KeyCode::Backspace => {
                self.handle_backspace();
                KeyResult::Handled
            }
            KeyCode::Delete => {
                self.handle_delete();
                KeyResult::Handled
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                KeyResult::Handled
            }
            KeyCode::Right => {
                if self.cursor_pos < self.value.chars().count() {
                    self.cursor_pos += 1;
                }
                KeyResult::Handled
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                KeyResult::Handled
            }
            KeyCode::End => {
                self.cursor_pos = self.value.chars().count();
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render_content(&self) -> Vec<SpanLine> {
        if self.value.is_empty() && !self.base.focused {
            if let Some(placeholder) = &self.placeholder {
                return vec![vec![Span::styled(
                    placeholder.clone(),
                    Style::new().color(Color::DarkGrey),
                )]];
            }
        }

        let mut line: SpanLine = Vec::new();
        if self.base.focused {
            let before: String = self.value.chars().take(self.cursor_pos).collect();
            let after: String = self.value.chars().skip(self.cursor_pos).collect();
            if !before.is_empty() {
                line.push(Span::new(before));
            }
            line.push(Span::styled("▏", Style::new().color(Color::Cyan)));
            if !after.is_empty() {
                line.push(Span::new(after));
            }
        } else {
            line.push(Span::new(self.value.clone()));
        }
        vec![line]
    }
}
