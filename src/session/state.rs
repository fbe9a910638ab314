use super::fsm::{ReadinessState, SubmissionEvent, SubmissionMachine, SubmissionState};
use crate::{
    Error, Result,
    api::{PredictionRequest, PredictionResponse},
    error::EMPTY_INPUT_MESSAGE,
};
use tracing::warn;

/// Everything the front-end shows. Owned by a single session and only
/// changed through the methods below.
#[derive(Default)]
pub struct UiState {
    input: String,
    result: Option<String>,
    error: Option<String>,
    submission: SubmissionMachine,
    readiness: ReadinessState,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.submission.is_pending()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission.current_state()
    }

    pub fn is_backend_ready(&self) -> bool {
        self.readiness == ReadinessState::Ready
    }

    pub fn is_checking_backend(&self) -> bool {
        self.readiness == ReadinessState::Checking
    }

    /// Whether the submit action should be offered. Advisory only:
    /// `begin_submission` does not consult it.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty() && self.is_backend_ready()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.result = None;
        self.error = None;
    }

    pub fn mark_ready(&mut self) {
        self.readiness.mark_ready();
    }

    /// Validates the input and moves to `Pending`. The request carries the
    /// input exactly as typed; trimming is only used for the emptiness check.
    pub fn begin_submission(&mut self) -> Result<PredictionRequest> {
        if self.input.trim().is_empty() {
            self.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return Err(Error::validation(EMPTY_INPUT_MESSAGE));
        }

        self.submission.transition(SubmissionEvent::Submit)?;
        self.error = None;
        self.result = None;

        Ok(PredictionRequest {
            text: self.input.clone(),
        })
    }

    /// Records the outcome of a submission and always leaves the state idle.
    pub fn complete_submission(&mut self, outcome: Result<PredictionResponse>) {
        let event = match outcome {
            Ok(response) => {
                self.result = Some(response.output);
                SubmissionEvent::ResponseReceived
            }
            Err(e) => {
                self.error = Some(e.user_message());
                SubmissionEvent::RequestFailed
            }
        };

        if let Err(e) = self.submission.transition(event) {
            warn!("Submission completed outside of a pending request: {}", e);
        }
        self.submission.force_idle();
    }

    /// Drops an in-flight submission without an outcome, leaving the
    /// previous result and error cleared.
    pub fn abandon_submission(&mut self) {
        if self.submission.is_pending() {
            warn!("Submission abandoned before a response arrived");
        }
        self.submission.force_idle();
    }
}
