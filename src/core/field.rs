use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Email,
    Phone,
}

/// Per-kind rendering options. Each variant carries only the options that
/// kind accepts; anything else is rejected when the descriptor list is
/// deserialized or checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        input_type: InputType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Textarea {
        #[serde(default = "default_textarea_rows")]
        rows: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Select {
        options: Vec<String>,
    },
    SubjectSelect {
        options: Vec<String>,
    },
    ScheduleInput {
        #[serde(default = "default_max_slots")]
        max_slots: usize,
    },
}

fn default_textarea_rows() -> u16 {
    4
}

fn default_max_slots() -> usize {
    5
}

impl FieldKind {
    pub fn text() -> Self {
        Self::Text {
            input_type: InputType::Text,
            placeholder: None,
        }
    }

    pub fn email() -> Self {
        Self::Text {
            input_type: InputType::Email,
            placeholder: None,
        }
    }

    pub fn phone() -> Self {
        Self::Text {
            input_type: InputType::Phone,
            placeholder: None,
        }
    }

    pub fn textarea() -> Self {
        Self::Textarea {
            rows: default_textarea_rows(),
            placeholder: None,
        }
    }

    pub fn select(options: Vec<String>) -> Self {
        Self::Select { options }
    }

    pub fn subject_select(options: Vec<String>) -> Self {
        Self::SubjectSelect { options }
    }

    pub fn schedule_input() -> Self {
        Self::ScheduleInput {
            max_slots: default_max_slots(),
        }
    }
}

/// Static descriptor for one form field. The label doubles as the key in
/// the submitted value map and must be unique within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::Text { placeholder, .. } | FieldKind::Textarea { placeholder, .. } => {
                *placeholder = Some(text.into());
            }
            _ => {}
        }
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("form has no fields")]
    NoFields,
    #[error("duplicate field label: {0:?}")]
    DuplicateLabel(String),
    #[error("field {label:?} has no options")]
    EmptyOptions { label: String },
    #[error("field {label:?} has zero rows")]
    ZeroRows { label: String },
    #[error("field {label:?} allows zero schedule slots")]
    ZeroSlots { label: String },
    #[error("invalid form definition: {0}")]
    Parse(String),
}

/// Everything the caller supplies to mount a form: descriptors, submit
/// button label and optional title/description copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub submit_label: String,
    pub fields: Vec<FieldSpec>,
}

impl FormConfig {
    pub fn new(submit_label: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            title: None,
            description: None,
            submit_label: submit_label.into(),
            fields,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(field.label.clone()));
            }

            match &field.kind {
                FieldKind::Select { options } | FieldKind::SubjectSelect { options } => {
                    if options.is_empty() {
                        return Err(ConfigError::EmptyOptions {
                            label: field.label.clone(),
                        });
                    }
                }
                FieldKind::Textarea { rows, .. } => {
                    if *rows == 0 {
                        return Err(ConfigError::ZeroRows {
                            label: field.label.clone(),
                        });
                    }
                }
                FieldKind::ScheduleInput { max_slots } => {
                    if *max_slots == 0 {
                        return Err(ConfigError::ZeroSlots {
                            label: field.label.clone(),
                        });
                    }
                }
                FieldKind::Text { .. } => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, FieldKind, FieldSpec, FormConfig};

    fn two_text_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("Name", FieldKind::text()),
            FieldSpec::new("Email", FieldKind::email()),
        ]
    }

    #[test]
    fn accepts_distinct_labels() {
        let config = FormConfig::new("Submit", two_text_fields());
        assert_eq!(config.check(), Ok(()));
    }

    #[test]
    fn rejects_duplicate_labels() {
        let config = FormConfig::new(
            "Submit",
            vec![
                FieldSpec::new("Name", FieldKind::text()),
                FieldSpec::new("Name", FieldKind::textarea()),
            ],
        );
        assert_eq!(
            config.check(),
            Err(ConfigError::DuplicateLabel("Name".to_string()))
        );
    }

    #[test]
    fn rejects_select_without_options() {
        let config = FormConfig::new(
            "Submit",
            vec![FieldSpec::new("Grade", FieldKind::select(vec![]))],
        );
        assert!(matches!(
            config.check(),
            Err(ConfigError::EmptyOptions { .. })
        ));
    }

    #[test]
    fn rejects_empty_field_list() {
        let config = FormConfig::new("Submit", vec![]);
        assert_eq!(config.check(), Err(ConfigError::NoFields));
    }

    #[test]
    fn loads_definition_from_yaml() {
        let yaml = r#"
title: Request a tutor
submit_label: Request
fields:
  - label: Name
    kind: text
    required: true
  - label: Grade
    kind: select
    options: ["9", "10", "11", "12"]
  - label: Subjects
    kind: subject_select
    options: [Math, Physics]
  - label: Availability
    kind: schedule_input
"#;
        let config = FormConfig::from_yaml_str(yaml).expect("yaml config");
        assert_eq!(config.fields.len(), 4);
        assert!(config.fields[0].required);
        assert_eq!(
            config.fields[1].kind,
            FieldKind::select(vec!["9".into(), "10".into(), "11".into(), "12".into()])
        );
    }
}
