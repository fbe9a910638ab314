use crate::{Error, Result, api::FormalizerBackend};
use chrono::{DateTime, Utc};
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

/// Snapshot of the backend's readiness as seen by the poller.
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    Checking { attempts: u32 },
    Ready(ReadyReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyReport {
    pub attempts: u32,
    pub ready_at: DateTime<Utc>,
    pub tokenizer_loaded: bool,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }

    pub fn report(&self) -> Option<&ReadyReport> {
        match self {
            Readiness::Ready(report) => Some(report),
            Readiness::Checking { .. } => None,
        }
    }
}

/// Polls the health endpoint at a fixed interval until the backend reports
/// ready. Failed checks are logged and retried; there is no attempt limit.
pub struct ReadinessPoller {
    backend: Arc<dyn FormalizerBackend>,
    interval: Duration,
}

impl ReadinessPoller {
    pub fn new(backend: Arc<dyn FormalizerBackend>, interval: Duration) -> Self {
        Self { backend, interval }
    }

    /// Starts polling on a background task. The task stops on the first ready
    /// response, or when the returned handle is stopped or dropped.
    pub fn spawn(self) -> PollerHandle {
        let (tx, rx) = watch::channel(Readiness::Checking { attempts: 0 });
        let task = tokio::spawn(self.run(tx));
        PollerHandle { rx, task }
    }

    async fn run(self, tx: watch::Sender<Readiness>) {
        let mut attempts = 0u32;

        loop {
            attempts = attempts.saturating_add(1);

            match self.backend.health().await {
                Ok(health) if health.is_ready() => {
                    info!("Backend ready after {} health check(s)", attempts);
                    tx.send_replace(Readiness::Ready(ReadyReport {
                        attempts,
                        ready_at: Utc::now(),
                        tokenizer_loaded: health.tokenizer_loaded,
                    }));
                    return;
                }
                Ok(health) => {
                    info!(
                        "Backend not ready (status={}, model_loaded={}), retrying in {:?}",
                        health.status, health.model_loaded, self.interval
                    );
                }
                Err(e) => {
                    warn!("Health check failed: {}, retrying in {:?}", e, self.interval);
                }
            }

            tx.send_replace(Readiness::Checking { attempts });

            if tx.is_closed() {
                debug!("All readiness subscribers gone, stopping poller");
                return;
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Owns the polling task. Dropping the handle aborts the task.
pub struct PollerHandle {
    rx: watch::Receiver<Readiness>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn status(&self) -> Readiness {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.rx.clone()
    }

    /// Resolves with the first ready report. Fails only if the poller was
    /// stopped before the backend became ready.
    pub async fn wait_ready(&mut self) -> Result<ReadyReport> {
        let state = self
            .rx
            .wait_for(Readiness::is_ready)
            .await
            .map_err(|_| Error::internal("readiness poller stopped before backend was ready"))?;

        state
            .report()
            .cloned()
            .ok_or_else(|| Error::internal("readiness poller published an empty report"))
    }

    pub fn stop(&self) {
        if !self.task.is_finished() {
            debug!("Stopping readiness poller");
        }
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
