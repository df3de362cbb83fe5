use crate::core::FieldId;
use crate::core::value::FieldValue;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    ValueChanged {
        id: FieldId,
        value: FieldValue,
    },
    FocusChanged {
        from: Option<FieldId>,
        to: Option<FieldId>,
    },
    SubmitRequested,
    ValidationFailed {
        errors: Vec<(FieldId, String)>,
    },
    SubmitStarted,
    SubmitFinished,
    SubmitFailed {
        message: String,
    },
    FailureAcknowledged,
}
