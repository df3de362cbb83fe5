use crate::core::schedule::Schedule;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current value of one form field. The closed set of shapes mirrors the
/// field kinds: simple-valued, list-valued (subject select) and
/// structured-valued (schedule picker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Schedule(Schedule),
}

impl FieldValue {
    pub fn empty_text() -> Self {
        Self::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Schedule(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_schedule(&self) -> Option<&Schedule> {
        match self {
            Self::Schedule(v) => Some(v),
            _ => None,
        }
    }

    /// Flat text projection used by string validators.
    pub fn validation_text(&self) -> String {
        match self {
            Self::Text(v) => v.clone(),
            Self::List(v) => v.join(", "),
            Self::Schedule(v) => v.summary(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Schedule> for FieldValue {
    fn from(value: Schedule) -> Self {
        Self::Schedule(value)
    }
}

/// Accumulated form values, keyed by field label in descriptor order.
pub type FormValues = IndexMap<String, FieldValue>;
