use crate::core::field::{ConfigError, FieldKind, FieldSpec, FormConfig};
use crate::core::form_event::FormEvent;
use crate::core::overlay::SubmitOverlay;
use crate::core::submit::{SubmitController, SubmitHandler, SubmitState};
use crate::core::validation;
use crate::core::value::{FieldValue, FormValues};
use crate::input::{
    Input, KeyResult, ScheduleInput, SelectInput, SubjectSelect, TextInput, TextareaInput,
    validators,
};
use crate::terminal::{KeyCode, KeyEvent};
use tracing::debug;

/// Pure mapping from one field descriptor to its interactive element.
pub fn build_input(spec: &FieldSpec) -> Box<dyn Input> {
    match &spec.kind {
        FieldKind::Text {
            input_type,
            placeholder,
        } => {
            let mut input = TextInput::new(&spec.label).with_input_type(*input_type);
            if let Some(placeholder) = placeholder {
                input = input.with_placeholder(placeholder);
            }
            if spec.required {
                input = input.with_validator(validators::required());
            }
            Box::new(input)
        }
        FieldKind::Textarea { rows, placeholder } => {
            let mut input = TextareaInput::new(&spec.label).with_rows(*rows);
            if let Some(placeholder) = placeholder {
                input = input.with_placeholder(placeholder);
            }
            if spec.required {
                input = input.with_validator(validators::required());
            }
            Box::new(input)
        }
        FieldKind::Select { options } => {
            let mut input = SelectInput::new(&spec.label, options.clone());
            if spec.required {
                input = input.with_validator(validators::required());
            }
            Box::new(input)
        }
        FieldKind::SubjectSelect { options } => {
            let mut input = SubjectSelect::new(&spec.label, options.clone());
            if spec.required {
                input = input.with_validator(validators::required());
            }
            Box::new(input)
        }
        FieldKind::ScheduleInput { max_slots } => {
            let mut input = ScheduleInput::new(&spec.label).with_max_slots(*max_slots);
            if spec.required {
                input = input.with_validator(validators::required());
            }
            Box::new(input)
        }
    }
}

/// The dynamic form component: an ordered set of inputs built from field
/// descriptors, a value map keyed by field label, and a submission state
/// machine driving the overlay.
pub struct Form {
    config: FormConfig,
    inputs: Vec<Box<dyn Input>>,
    values: FormValues,
    focus_index: Option<usize>,
    submit: SubmitController,
    overlay: SubmitOverlay,
}

impl Form {
    pub fn new(config: FormConfig, handler: SubmitHandler) -> Result<Self, ConfigError> {
        config.check()?;
        let inputs: Vec<Box<dyn Input>> = config.fields.iter().map(build_input).collect();

        let mut form = Self {
            config,
            inputs,
            values: FormValues::new(),
            focus_index: None,
            submit: SubmitController::new(handler),
            overlay: SubmitOverlay::new(),
        };
        form.set_focus_silent(if form.inputs.is_empty() { None } else { Some(0) });
        Ok(form)
    }

    /// Replaces the descriptor list and rebuilds the rendered inputs from
    /// it. Values of fields whose label survives are carried over.
    pub fn set_fields(&mut self, fields: Vec<FieldSpec>) -> Result<(), ConfigError> {
        let mut candidate = self.config.clone();
        candidate.fields = fields;
        candidate.check()?;

        let mut inputs: Vec<Box<dyn Input>> = candidate.fields.iter().map(build_input).collect();
        for input in &mut inputs {
            if let Some(previous) = self.values.get(input.label()) {
                input.set_value(previous.clone());
            }
        }

        self.values
            .retain(|label, _| candidate.fields.iter().any(|f| f.label == *label));
        self.config = candidate;
        self.inputs = inputs;
        self.focus_index = None;
        self.set_focus_silent(if self.inputs.is_empty() { None } else { Some(0) });
        Ok(())
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn inputs(&self) -> &[Box<dyn Input>] {
        &self.inputs
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.focus_index
    }

    pub fn focused_input(&self) -> Option<&dyn Input> {
        self.focus_index.map(|i| self.inputs[i].as_ref())
    }

    /// Snapshot of the accumulated value map. Only fields the user has
    /// touched (or that were set programmatically) have entries.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn submit_state(&self) -> &SubmitState {
        self.submit.state()
    }

    pub fn overlay(&self) -> &SubmitOverlay {
        &self.overlay
    }

    /// True while submitting or submitted: all inputs and the submit
    /// action are disabled.
    pub fn is_locked(&self) -> bool {
        self.submit.state().is_active()
    }

    /// Programmatic value capture, e.g. a subject list delivered directly
    /// by an embedding widget rather than through key events. Rejected
    /// while a submission is in flight or finished, like key input.
    pub fn set_field_value(&mut self, label: &str, value: FieldValue) -> Vec<FormEvent> {
        if self.is_locked() {
            return vec![];
        }
        let Some(input) = self.inputs.iter_mut().find(|i| i.label() == label) else {
            return vec![];
        };
        input.set_value(value);
        let stored = input.value();
        let id = input.id().clone();
        self.values.insert(label.to_string(), stored.clone());
        vec![FormEvent::ValueChanged { id, value: stored }]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<FormEvent> {
        match self.submit.state() {
            SubmitState::Submitting | SubmitState::Submitted => return vec![],
            SubmitState::Failed(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.submit.acknowledge_failure();
                    return vec![FormEvent::FailureAcknowledged];
                }
                return vec![];
            }
            SubmitState::Idle => {}
        }

        let captured = self
            .focused_input()
            .is_some_and(|input| input.captures_key(key.code));

        match key.code {
            KeyCode::Tab => return self.move_focus(1),
            KeyCode::BackTab => return self.move_focus(-1),
            KeyCode::Down if !captured => return self.move_focus(1),
            KeyCode::Up if !captured => return self.move_focus(-1),
            _ => {}
        }

        self.update_focused_input(key)
    }

    /// Orchestrates a submit: validates every field, snapshots the value
    /// map and hands it to the submit handler. Re-entry while a submission
    /// is in flight or finished is a no-op.
    pub fn request_submit(&mut self) -> Vec<FormEvent> {
        if self.submit.state() != &SubmitState::Idle {
            return vec![];
        }

        let mut events = vec![FormEvent::SubmitRequested];

        let errors = validation::validate_all(&self.inputs);
        if !errors.is_empty() {
            for input in &mut self.inputs {
                match errors.iter().find(|(id, _)| id == input.id()) {
                    Some((_, message)) => input.set_error(Some(message.clone())),
                    None => input.set_error(None),
                }
            }
            debug!(count = errors.len(), "submission blocked by validation");
            events.push(FormEvent::ValidationFailed { errors });
            return events;
        }

        if self.submit.begin(self.values.clone()) {
            events.push(FormEvent::SubmitStarted);
        }
        events
    }

    /// Advances the overlay animation and applies any submission
    /// completion that arrived since the last tick.
    pub fn tick(&mut self) -> Vec<FormEvent> {
        if self.submit.state() == &SubmitState::Submitting {
            self.overlay.tick();
        }
        match self.submit.poll() {
            Some(Ok(())) => vec![FormEvent::SubmitFinished],
            Some(Err(message)) => vec![FormEvent::SubmitFailed { message }],
            None => vec![],
        }
    }

    fn move_focus(&mut self, direction: isize) -> Vec<FormEvent> {
        if self.inputs.is_empty() {
            return vec![];
        }
        let current = self.focus_index.unwrap_or(0);
        let len = self.inputs.len() as isize;
        let next = ((current as isize + direction + len) % len) as usize;
        self.set_focus(Some(next))
    }

    fn set_focus(&mut self, new_index: Option<usize>) -> Vec<FormEvent> {
        if new_index == self.focus_index {
            return vec![];
        }
        let from = self.focused_input().map(|i| i.id().clone());
        self.set_focus_silent(new_index);
        let to = self.focused_input().map(|i| i.id().clone());
        vec![FormEvent::FocusChanged { from, to }]
    }

    fn set_focus_silent(&mut self, new_index: Option<usize>) {
        if let Some(index) = self.focus_index {
            self.inputs[index].set_focused(false);
        }
        if let Some(index) = new_index {
            self.inputs[index].set_focused(true);
        }
        self.focus_index = new_index;
    }

    fn update_focused_input(&mut self, key: KeyEvent) -> Vec<FormEvent> {
        let Some(index) = self.focus_index else {
            return vec![];
        };

        let input = &mut self.inputs[index];
        let before = input.value();
        let result = input.handle_key(key.code, key.modifiers);
        let after = input.value();

        let mut events = Vec::new();
        if before != after {
            let id = input.id().clone();
            let label = input.label().to_string();
            input.set_error(None);
            self.values.insert(label, after.clone());
            events.push(FormEvent::ValueChanged { id, value: after });
        }

        if result == KeyResult::Submit {
            events.extend(self.request_submit());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::Form;
    use crate::core::field::{FieldKind, FieldSpec, FormConfig};
    use crate::core::form_event::FormEvent;
    use crate::core::submit::SubmitState;
    use crate::core::value::{FieldValue, FormValues};
    use crate::terminal::{KeyCode, KeyEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    fn press(form: &mut Form, code: KeyCode) -> Vec<FormEvent> {
        form.handle_key(KeyEvent::plain(code))
    }

    fn type_str(form: &mut Form, text: &str) {
        for ch in text.chars() {
            press(form, KeyCode::Char(ch));
        }
    }

    fn settle(form: &mut Form) -> Vec<FormEvent> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let events = form.tick();
            if !events.is_empty() {
                return events;
            }
            assert!(Instant::now() < deadline, "submission never completed");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn noop_form(fields: Vec<FieldSpec>) -> Form {
        let config = FormConfig::new("Submit", fields);
        Form::new(config, Arc::new(|_| Ok(()))).expect("valid config")
    }

    fn full_field_set() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("Name", FieldKind::text()),
            FieldSpec::new("Message", FieldKind::textarea()),
            FieldSpec::new("Grade", FieldKind::select(vec!["9".into(), "10".into()])),
            FieldSpec::new(
                "Subjects",
                FieldKind::subject_select(vec!["Math".into(), "Physics".into()]),
            ),
            FieldSpec::new("Availability", FieldKind::schedule_input()),
        ]
    }

    #[test]
    fn builds_one_input_per_descriptor_in_order() {
        let form = noop_form(full_field_set());
        let labels: Vec<&str> = form.inputs().iter().map(|i| i.label()).collect();
        assert_eq!(
            labels,
            vec!["Name", "Message", "Grade", "Subjects", "Availability"]
        );
    }

    #[test]
    fn typing_stores_the_value_under_the_field_label() {
        let mut form = noop_form(vec![FieldSpec::new("Name", FieldKind::text())]);
        type_str(&mut form, "Ada");
        assert_eq!(
            form.values().get("Name"),
            Some(&FieldValue::Text("Ada".to_string()))
        );
    }

    #[test]
    fn select_change_stores_the_chosen_option() {
        let mut form = noop_form(vec![FieldSpec::new(
            "Grade",
            FieldKind::select(vec!["9".into(), "10".into()]),
        )]);
        press(&mut form, KeyCode::Right);
        press(&mut form, KeyCode::Right);
        assert_eq!(
            form.values().get("Grade"),
            Some(&FieldValue::Text("10".to_string()))
        );
    }

    #[test]
    fn direct_subject_list_is_stored_with_order_preserved() {
        let mut form = noop_form(full_field_set());
        let subjects = vec!["Physics".to_string(), "Math".to_string()];
        form.set_field_value("Subjects", FieldValue::List(subjects.clone()));
        assert_eq!(
            form.values().get("Subjects"),
            Some(&FieldValue::List(subjects))
        );
    }

    #[test]
    fn direct_value_changes_are_rejected_while_locked() {
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let gate_rx = Mutex::new(gate_rx);
        let config = FormConfig::new("Submit", full_field_set());
        let mut form = Form::new(
            config,
            Arc::new(move |_| {
                let _ = gate_rx.lock().expect("gate lock").recv();
                Ok(())
            }),
        )
        .expect("valid config");

        form.request_submit();
        assert!(form.is_locked());

        let events = form.set_field_value("Subjects", FieldValue::List(vec!["Math".into()]));
        assert!(events.is_empty());
        assert_eq!(form.values().get("Subjects"), None);

        gate_tx.send(()).expect("handler is waiting on the gate");
        settle(&mut form);
        assert_eq!(form.submit_state(), &SubmitState::Submitted);

        // still rejected once submitted
        assert!(
            form.set_field_value("Subjects", FieldValue::List(vec!["Math".into()]))
                .is_empty()
        );
        assert!(form.values().is_empty());
    }

    #[test]
    fn untouched_fields_have_no_value_entry() {
        let mut form = noop_form(full_field_set());
        type_str(&mut form, "Ada");
        assert_eq!(form.values().len(), 1);
    }

    #[test]
    fn submit_invokes_the_handler_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let gate_rx = Mutex::new(gate_rx);

        let seen = Arc::clone(&calls);
        let config = FormConfig::new("Submit", vec![FieldSpec::new("Name", FieldKind::text())]);
        let mut form = Form::new(
            config,
            Arc::new(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                let _ = gate_rx.lock().expect("gate lock").recv();
                Ok(())
            }),
        )
        .expect("valid config");

        form.request_submit();
        assert_eq!(form.submit_state(), &SubmitState::Submitting);
        assert!(form.is_locked());

        // fields are disabled while submitting
        assert!(press(&mut form, KeyCode::Char('x')).is_empty());
        assert!(form.values().is_empty());

        // a second submit while in flight is a no-op
        assert!(form.request_submit().is_empty());
        assert!(press(&mut form, KeyCode::Enter).is_empty());

        gate_tx.send(()).expect("handler is waiting on the gate");
        assert_eq!(settle(&mut form), vec![FormEvent::SubmitFinished]);
        assert_eq!(form.submit_state(), &SubmitState::Submitted);

        // and once submitted it stays a no-op
        assert!(form.request_submit().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn overlay_reads_submitting_then_submitted() {
        let config = FormConfig::new("Submit", vec![FieldSpec::new("Name", FieldKind::text())]);
        let mut form = Form::new(
            config,
            Arc::new(|_| {
                std::thread::sleep(Duration::from_millis(30));
                Ok(())
            }),
        )
        .expect("valid config");

        form.request_submit();
        assert_eq!(
            form.overlay().label(form.submit_state()).as_deref(),
            Some("Submitting form...")
        );

        settle(&mut form);
        assert_eq!(
            form.overlay().label(form.submit_state()).as_deref(),
            Some("Submitted!")
        );
    }

    #[test]
    fn end_to_end_name_and_email() {
        let recorded: Arc<Mutex<Vec<FormValues>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&recorded);
        let config = FormConfig::new(
            "Signup",
            vec![
                FieldSpec::new("Name", FieldKind::text()),
                FieldSpec::new("Email", FieldKind::email()),
            ],
        );
        let mut form = Form::new(
            config,
            Arc::new(move |values| {
                sink.lock().expect("sink lock").push(values);
                Ok(())
            }),
        )
        .expect("valid config");

        type_str(&mut form, "Ada");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "a@b.com");
        press(&mut form, KeyCode::Enter);

        settle(&mut form);
        assert_eq!(
            form.overlay().label(form.submit_state()).as_deref(),
            Some("Submitted!")
        );

        let calls = recorded.lock().expect("sink lock");
        assert_eq!(calls.len(), 1);
        let mut expected = FormValues::new();
        expected.insert("Name".to_string(), FieldValue::Text("Ada".to_string()));
        expected.insert("Email".to_string(), FieldValue::Text("a@b.com".to_string()));
        assert_eq!(calls[0], expected);
    }

    #[test]
    fn validation_failure_blocks_the_handler_and_marks_the_field() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let config = FormConfig::new(
            "Submit",
            vec![FieldSpec::new("Name", FieldKind::text()).required()],
        );
        let mut form = Form::new(
            config,
            Arc::new(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        )
        .expect("valid config");

        let events = form.request_submit();
        assert!(events
            .iter()
            .any(|e| matches!(e, FormEvent::ValidationFailed { .. })));
        assert_eq!(form.submit_state(), &SubmitState::Idle);
        assert!(form.inputs()[0].error().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // typing clears the inline error and a filled field submits
        type_str(&mut form, "Ada");
        assert!(form.inputs()[0].error().is_none());
        form.request_submit();
        settle(&mut form);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_submission_allows_edit_and_retry() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&attempts);
        let config = FormConfig::new("Submit", vec![FieldSpec::new("Name", FieldKind::text())]);
        let mut form = Form::new(
            config,
            Arc::new(move |_| {
                if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err("offline".to_string())
                } else {
                    Ok(())
                }
            }),
        )
        .expect("valid config");

        form.request_submit();
        let events = settle(&mut form);
        assert_eq!(
            events,
            vec![FormEvent::SubmitFailed {
                message: "offline".to_string()
            }]
        );
        assert!(
            form.overlay()
                .label(form.submit_state())
                .expect("failure label")
                .contains("offline")
        );

        // acknowledge, then retry succeeds
        assert_eq!(
            press(&mut form, KeyCode::Enter),
            vec![FormEvent::FailureAcknowledged]
        );
        assert_eq!(form.submit_state(), &SubmitState::Idle);

        form.request_submit();
        settle(&mut form);
        assert_eq!(form.submit_state(), &SubmitState::Submitted);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn set_fields_rebuilds_inputs_and_keeps_surviving_values() {
        let mut form = noop_form(vec![
            FieldSpec::new("Name", FieldKind::text()),
            FieldSpec::new("Email", FieldKind::email()),
        ]);
        type_str(&mut form, "Ada");

        form.set_fields(vec![
            FieldSpec::new("Name", FieldKind::text()),
            FieldSpec::new("Phone", FieldKind::phone()),
        ])
        .expect("valid fields");

        let labels: Vec<&str> = form.inputs().iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["Name", "Phone"]);
        assert_eq!(
            form.values().get("Name"),
            Some(&FieldValue::Text("Ada".to_string()))
        );
        assert_eq!(form.values().get("Email"), None);
    }

    #[test]
    fn focus_moves_in_descriptor_order_and_wraps() {
        let mut form = noop_form(vec![
            FieldSpec::new("Name", FieldKind::text()),
            FieldSpec::new("Email", FieldKind::email()),
        ]);
        assert_eq!(form.focus_index(), Some(0));

        press(&mut form, KeyCode::Tab);
        assert_eq!(form.focus_index(), Some(1));
        press(&mut form, KeyCode::Tab);
        assert_eq!(form.focus_index(), Some(0));
        press(&mut form, KeyCode::BackTab);
        assert_eq!(form.focus_index(), Some(1));
    }
}
