use crate::core::FieldId;
use crate::core::value::FieldValue;
use crate::input::validators::Validator;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::SpanLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Handled,
    NotHandled,
    Submit,
}

/// One interactive form element. Each implementation owns its editing state
/// and reports its current value in typed form; there is no generic "read
/// the element's text" extraction.
pub trait Input: Send {
    fn id(&self) -> &FieldId;
    fn label(&self) -> &str;

    fn value(&self) -> FieldValue;
    fn set_value(&mut self, value: FieldValue);

    fn is_focused(&self) -> bool;
    fn set_focused(&mut self, focused: bool);

    fn error(&self) -> Option<&str>;
    fn set_error(&mut self, error: Option<String>);

    fn validators(&self) -> &[Validator];

    fn validate(&self) -> Result<(), String> {
        let text = self.value().validation_text();
        for validator in self.validators() {
            validator(&text)?;
        }
        Ok(())
    }

    /// Keys the input consumes even though the form would otherwise use
    /// them for focus traversal.
    fn captures_key(&self, _code: KeyCode) -> bool {
        false
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyResult;

    fn render_content(&self) -> Vec<SpanLine>;

    fn hint(&self) -> Option<&'static str> {
        None
    }

    /// Key label shown for triggering a submit while this input is
    /// focused.
    fn submit_key(&self) -> &'static str {
        "Enter"
    }
}

pub struct InputBase {
    pub id: FieldId,
    pub label: String,
    pub focused: bool,
    pub error: Option<String>,
    pub validators: Vec<Validator>,
}

impl InputBase {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: FieldId::new(label.clone()),
            label,
            focused: false,
            error: None,
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }
}
