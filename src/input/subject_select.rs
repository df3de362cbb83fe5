use crate::core::FieldId;
use crate::core::value::FieldValue;
use crate::input::{Input, InputBase, KeyResult};
use crate::input::validators::Validator;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

/// Multi-select over a fixed list of subject names. The value is the list
/// of chosen subjects in the order they were toggled on.
pub struct SubjectSelect {
    base: InputBase,
    options: Vec<String>,
    highlighted: usize,
    chosen: Vec<usize>,
}

impl SubjectSelect {
    pub fn new(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            base: InputBase::new(label),
            options,
            highlighted: 0,
            chosen: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.base = self.base.with_validator(validator);
        self
    }

    pub fn subjects(&self) -> Vec<String> {
        self.chosen
            .iter()
            .filter_map(|&i| self.options.get(i).cloned())
            .collect()
    }

    /// Replace the selection with an explicit subject list, preserving the
    /// caller's order. Unknown names are dropped.
    pub fn set_subjects(&mut self, subjects: &[String]) {
        self.chosen = subjects
            .iter()
            .filter_map(|name| self.options.iter().position(|opt| opt == name))
            .collect();
        self.base.error = None;
    }

    fn toggle_highlighted(&mut self) {
        if let Some(pos) = self.chosen.iter().position(|&i| i == self.highlighted) {
            self.chosen.remove(pos);
        } else {
            self.chosen.push(self.highlighted);
        }
        self.base.error = None;
    }

    fn move_highlight(&mut self, direction: isize) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        self.highlighted = ((self.highlighted as isize + direction + len) % len) as usize;
    }
}

impl Input for SubjectSelect {
    fn id(&self) -> &FieldId {
        &self.base.id
    }

    fn label(&self) -> &str {
        &self.base.label
    }

    fn value(&self) -> FieldValue {
        FieldValue::List(self.subjects())
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::List(subjects) = value {
            self.set_subjects(&subjects);
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
                self.move_highlight(-1);
                KeyResult::Handled
            }
            KeyCode::Right => {
                self.move_highlight(1);
                KeyResult::Handled
            }
            KeyCode::Char(' ') => {
                self.toggle_highlighted();
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render_content(&self) -> Vec<SpanLine> {
        let mut line: SpanLine = Vec::new();
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                line.push(Span::new("  "));
            }
            let marker = if self.chosen.contains(&i) { "[x]" } else { "[ ]" };
            let text = format!("{} {}", marker, option);
            let style = if self.base.focused && i == self.highlighted {
                Style::new().color(Color::Black).background(Color::Cyan)
            } else if self.chosen.contains(&i) {
                Style::new().color(Color::Green)
            } else {
                Style::new()
            };
            line.push(Span::styled(text, style));
        }
        vec![line]
    }

    fn hint(&self) -> Option<&'static str> {
        Some("Left/Right to move, Space to toggle")
    }
}

#[cfg(test)]
mod tests {
    use super::SubjectSelect;
    use crate::core::value::FieldValue;
    use crate::input::Input;
    use crate::terminal::{KeyCode, KeyModifiers};

    fn subjects() -> Vec<String> {
        vec!["Math".to_string(), "Physics".to_string(), "Art".to_string()]
    }

    #[test]
    fn toggling_preserves_selection_order() {
        let mut input = SubjectSelect::new("Subjects", subjects());
        input.handle_key(KeyCode::Right, KeyModifiers::NONE);
        input.handle_key(KeyCode::Char(' '), KeyModifiers::NONE); // Physics
        input.handle_key(KeyCode::Left, KeyModifiers::NONE);
        input.handle_key(KeyCode::Char(' '), KeyModifiers::NONE); // Math

        assert_eq!(
            input.value(),
            FieldValue::List(vec!["Physics".to_string(), "Math".to_string()])
        );
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut input = SubjectSelect::new("Subjects", subjects());
        input.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);
        input.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(input.value(), FieldValue::List(vec![]));
    }

    #[test]
    fn direct_subject_list_is_stored_as_given() {
        let mut input = SubjectSelect::new("Subjects", subjects());
        input.set_subjects(&["Art".to_string(), "Math".to_string(), "Chemistry".to_string()]);
        assert_eq!(
            input.subjects(),
            vec!["Art".to_string(), "Math".to_string()]
        );
    }
}
