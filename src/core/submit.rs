use crate::core::value::FormValues;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// Caller-supplied persistence callback. Runs on a worker thread with a
/// snapshot of the value map; the returned result decides whether the form
/// ends up submitted or failed.
pub type SubmitHandler = Arc<dyn Fn(FormValues) -> Result<(), String> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(String),
}

impl SubmitState {
    /// While active the form is read-only: fields ignore keys and the
    /// submit action is disabled.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Submitting | Self::Submitted)
    }
}

/// Runs the submit handler off the UI thread and feeds the completion back
/// through a channel drained by `poll`.
pub struct SubmitController {
    state: SubmitState,
    handler: SubmitHandler,
    completion_tx: Sender<Result<(), String>>,
    completion_rx: Receiver<Result<(), String>>,
}

impl SubmitController {
    pub fn new(handler: SubmitHandler) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            state: SubmitState::Idle,
            handler,
            completion_tx,
            completion_rx,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Starts a submission. Returns false without invoking the handler
    /// when a submission is already in flight or finished.
    pub fn begin(&mut self, values: FormValues) -> bool {
        if self.state != SubmitState::Idle {
            return false;
        }

        debug!(fields = values.len(), "submission started");
        self.state = SubmitState::Submitting;

        let handler = Arc::clone(&self.handler);
        let completion_tx = self.completion_tx.clone();
        thread::spawn(move || {
            let _ = completion_tx.send(handler(values));
        });
        true
    }

    /// Drains the completion channel and applies the resulting transition.
    /// Returns the completion when one arrived this tick.
    pub fn poll(&mut self) -> Option<Result<(), String>> {
        if self.state != SubmitState::Submitting {
            return None;
        }

        let completion = match self.completion_rx.try_recv() {
            Ok(completion) => completion,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
        };

        match &completion {
            Ok(()) => {
                debug!("submission finished");
                self.state = SubmitState::Submitted;
            }
            Err(message) => {
                warn!(%message, "submission failed");
                self.state = SubmitState::Failed(message.clone());
            }
        }
        Some(completion)
    }

    /// Failed submissions return to idle so the user can edit and retry.
    pub fn acknowledge_failure(&mut self) -> bool {
        if matches!(self.state, SubmitState::Failed(_)) {
            self.state = SubmitState::Idle;
            true
        } else {
            false
        }
    }
}
