use crate::core::FieldId;
use crate::core::value::FieldValue;
use crate::input::{Input, InputBase, KeyResult};
use crate::input::validators::Validator;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

pub struct TextareaInput {
    base: InputBase,
    lines: Vec<String>,
    row: usize,
    col: usize,
    rows: u16,
    placeholder: Option<String>,
}

impl TextareaInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(label),
            lines: vec![String::new()],
            row: 0,
            col: 0,
            rows: 4,
            placeholder: None,
        }
    }

    pub fn with_rows(mut self, rows: u16) -> Self {
        self.rows = rows.max(1);
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

    fn is_blank(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn clamp_col(&mut self) {
        let len = self.lines[self.row].chars().count();
        self.col = self.col.min(len);
    }

    fn byte_pos(line: &str, col: usize) -> usize {
        line.char_indices()
            .map(|(i, _)| i)
            .nth(col)
            .unwrap_or(line.len())
    }

    fn handle_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let pos = Self::byte_pos(&self.lines[self.row], self.col);
        self.lines[self.row].insert(pos, ch);
        self.col += 1;
        self.base.error = None;
    }

    fn handle_enter(&mut self) {
        let pos = Self::byte_pos(&self.lines[self.row], self.col);
        let rest = self.lines[self.row].split_off(pos);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
        self.base.error = None;
    }

    fn handle_backspace(&mut self) {
        if self.col > 0 {
            let pos = Self::byte_pos(&self.lines[self.row], self.col - 1);
            self.lines[self.row].remove(pos);
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].chars().count();
            self.lines[self.row].push_str(&current);
        }
        self.base.error = None;
    }
}

impl Input for TextareaInput {
    fn id(&self) -> &FieldId {
        &self.base.id
    }

    fn label(&self) -> &str {
        &self.base.label
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.lines.join("\n"))
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            self.lines = text.split('\n').map(ToOwned::to_owned).collect();
            if self.lines.is_empty() {
                self.lines.push(String::new());
            }
            self.row = self.lines.len() - 1;
            self.col = self.lines[self.row].chars().count();
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

    fn captures_key(&self, code: KeyCode) -> bool {
        // keep vertical arrows while the cursor can still move inside the
        // text; at the edges they fall through to focus traversal
        match code {
            KeyCode::Up => self.row > 0,
            KeyCode::Down => self.row + 1 < self.lines.len(),
            _ => false,
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyResult {
        match code {
            KeyCode::Char(ch) => {
                self.handle_char(ch);
                KeyResult::Handled
            }
            KeyCode::Enter if modifiers.contains(KeyModifiers::CONTROL) => KeyResult::Submit,
            KeyCode::Enter => {
                self.handle_enter();
                KeyResult::Handled
            }
            KeyCode::Backspace => {
                self.handle_backspace();
                KeyResult::Handled
            }
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.lines[self.row].chars().count();
                }
                KeyResult::Handled
            }
            KeyCode::Right => {
                if self.col < self.lines[self.row].chars().count() {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                KeyResult::Handled
            }
            KeyCode::Up if self.row > 0 => {
                self.row -= 1;
                self.clamp_col();
                KeyResult::Handled
            }
            KeyCode::Down if self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.clamp_col();
                KeyResult::Handled
            }
            KeyCode::Home => {
                self.col = 0;
                KeyResult::Handled
            }
            KeyCode::End => {
                self.col = self.lines[self.row].chars().count();
                KeyResult::Handled
            }
            _ => KeyResult::NotHandled,
        }
    }

    fn render_content(&self) -> Vec<SpanLine> {
        if self.is_blank() && !self.base.focused {
            if let Some(placeholder) = &self.placeholder {
                let mut out = vec![vec![Span::styled(
                    placeholder.clone(),
                    Style::new().color(Color::DarkGrey),
                )]];
                out.resize(self.rows as usize, vec![Span::new("")]);
                return out;
            }
        }

        let mut out: Vec<SpanLine> = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if self.base.focused && i == self.row {
                let before: String = line.chars().take(self.col).collect();
                let after: String = line.chars().skip(self.col).collect();
                let mut spans: SpanLine = Vec::new();
                if !before.is_empty() {
                    spans.push(Span::new(before));
                }
                spans.push(Span::styled("▏", Style::new().color(Color::Cyan)));
                if !after.is_empty() {
                    spans.push(Span::new(after));
                }
                out.push(spans);
            } else {
                out.push(vec![Span::new(line.clone())]);
            }
        }
        while out.len() < self.rows as usize {
            out.push(vec![Span::new("")]);
        }
        out
    }

    fn hint(&self) -> Option<&'static str> {
        Some("Enter inserts a line break")
    }

    fn submit_key(&self) -> &'static str {
        "Ctrl+Enter"
    }
}
