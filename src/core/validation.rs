use crate::core::FieldId;
use crate::input::Input;

pub fn validate_input(input: &dyn Input) -> Result<(), String> {
    input.validate()
}

/// Runs every field's validators. All failures are reported at once so the
/// form can mark each offending field inline.
pub fn validate_all(inputs: &[Box<dyn Input>]) -> Vec<(FieldId, String)> {
    inputs
        .iter()
        .filter_map(|input| {
            validate_input(input.as_ref())
                .err()
                .map(|err| (input.id().clone(), err))
        })
        .collect()
}
