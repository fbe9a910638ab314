use super::state::UiState;
use crate::{
    Error, Result,
    api::{FormalizerBackend, PredictionResponse},
    error::GENERIC_ERROR_MESSAGE,
    readiness::Readiness,
};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

/// What a single submit action produced, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected locally; no request was sent.
    Rejected(String),
    Formalized(String),
    Failed(String),
}

/// Holds the state while a request is in flight. If the submit future is
/// dropped before the response arrives, the state goes back to idle.
struct PendingSubmission<'a> {
    state: Option<&'a mut UiState>,
}

impl<'a> PendingSubmission<'a> {
    fn new(state: &'a mut UiState) -> Self {
        Self { state: Some(state) }
    }

    fn complete(mut self, outcome: Result<PredictionResponse>) {
        if let Some(state) = self.state.take() {
            state.complete_submission(outcome);
        }
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            state.abandon_submission();
        }
    }
}

/// One front-end instance: the UI state plus the backend it talks to.
pub struct Session {
    backend: Arc<dyn FormalizerBackend>,
    state: UiState,
}

impl Session {
    pub fn new(backend: Arc<dyn FormalizerBackend>) -> Self {
        Self {
            backend,
            state: UiState::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    pub fn clear(&mut self) {
        debug!("Clearing session input and output");
        self.state.clear();
    }

    pub fn mark_ready(&mut self) {
        self.state.mark_ready();
    }

    /// Folds a poller snapshot into the UI state.
    pub fn observe(&mut self, readiness: &Readiness) {
        if readiness.is_ready() {
            self.state.mark_ready();
        }
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    /// Sends the current input for formalization, once. Every failure is
    /// turned into a display message; nothing is retried.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let request_id = Uuid::new_v4();
        let span = info_span!("submit", %request_id);

        async {
            let request = match self.state.begin_submission() {
                Ok(request) => request,
                Err(Error::Validation(msg)) => {
                    debug!("Rejected submission: {}", msg);
                    return SubmitOutcome::Rejected(msg);
                }
                Err(e) => {
                    error!("Could not start submission: {}", e);
                    return SubmitOutcome::Failed(e.user_message());
                }
            };

            info!("Submitting {} chars for formalization", request.text.chars().count());

            let pending = PendingSubmission::new(&mut self.state);
            let outcome = self.backend.predict(request).await;
            if let Err(e) = &outcome {
                error!("Formalization failed: {}", e);
            }
            pending.complete(outcome);

            match (self.state.result(), self.state.error()) {
                (Some(output), _) => {
                    info!("Formalization succeeded");
                    SubmitOutcome::Formalized(output.to_string())
                }
                (None, Some(msg)) => SubmitOutcome::Failed(msg.to_string()),
                (None, None) => SubmitOutcome::Failed(GENERIC_ERROR_MESSAGE.to_string()),
            }
        }
        .instrument(span)
        .await
    }
}
