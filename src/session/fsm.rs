use crate::{Error, Result};
use tracing::{debug, info, warn};

// Submission states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

// Submission events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    ResponseReceived,
    RequestFailed,
    Settle,
}

// Backend readiness, one-way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessState {
    #[default]
    Checking,
    Ready,
}

pub struct SubmissionMachine {
    state: SubmissionState,
}

impl SubmissionMachine {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn current_state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SubmissionState::Pending
    }

    pub fn transition(&mut self, event: SubmissionEvent) -> Result<()> {
        let old_state = self.state;

        let new_state = match (old_state, event) {
            (SubmissionState::Idle, SubmissionEvent::Submit) => SubmissionState::Pending,
            (SubmissionState::Pending, SubmissionEvent::ResponseReceived) => {
                SubmissionState::Succeeded
            }
            (SubmissionState::Pending, SubmissionEvent::RequestFailed) => SubmissionState::Failed,
            (SubmissionState::Succeeded | SubmissionState::Failed, SubmissionEvent::Settle) => {
                SubmissionState::Idle
            }
            _ => {
                warn!(
                    "Invalid submission transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: format!("{:?}", event),
                });
            }
        };

        debug!(
            "Submission state: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    /// Returns to `Idle` regardless of the current state.
    pub fn force_idle(&mut self) {
        if self.state != SubmissionState::Idle {
            debug!("Submission state: {:?} -> Idle (forced)", self.state);
        }
        self.state = SubmissionState::Idle;
    }
}

impl Default for SubmissionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessState {
    /// `Checking -> Ready`; already-ready stays ready.
    pub fn mark_ready(&mut self) {
        if *self == ReadinessState::Checking {
            info!("Backend readiness: Checking -> Ready");
            *self = ReadinessState::Ready;
        }
    }
}
