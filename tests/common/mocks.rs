use async_trait::async_trait;
use formalizer::{
    Error, Result,
    api::{FormalizerBackend, HealthResponse, PredictionRequest, PredictionResponse},
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// Mock backend for testing sessions without a server
#[derive(Debug)]
pub struct MockBackend {
    pub health: Arc<Mutex<Vec<HealthResponse>>>,
    pub responses: Arc<Mutex<Vec<std::result::Result<PredictionResponse, (u16, Option<String>)>>>>,
    pub requests: Arc<Mutex<Vec<PredictionRequest>>>,
    pub health_checks: Arc<Mutex<usize>>,
    pub transport_error: Option<String>,
    pub first_predict_delay: Arc<Mutex<Option<Duration>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            health: Arc::new(Mutex::new(vec![healthy()])),
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            health_checks: Arc::new(Mutex::new(0)),
            transport_error: None,
            first_predict_delay: Arc::new(Mutex::new(None)),
        }
    }

    /// Health responses are replayed in order; the last one repeats.
    pub fn with_health(self, health: Vec<HealthResponse>) -> Self {
        *self.health.lock().unwrap() = health;
        self
    }

    pub fn with_output(self, output: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(PredictionResponse {
            input: String::new(),
            output: output.to_string(),
        }));
        self
    }

    pub fn with_server_error(self, status: u16, detail: Option<&str>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err((status, detail.map(str::to_string))));
        self
    }

    pub fn with_transport_error(mut self, error: &str) -> Self {
        self.transport_error = Some(error.to_string());
        self
    }

    /// Only the first prediction waits; later ones answer immediately.
    pub fn with_first_predict_delay(self, delay: Duration) -> Self {
        *self.first_predict_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn get_requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn health_check_count(&self) -> usize {
        *self.health_checks.lock().unwrap()
    }
}

#[async_trait]
impl FormalizerBackend for MockBackend {
    async fn health(&self) -> Result<HealthResponse> {
        *self.health_checks.lock().unwrap() += 1;

        let mut health = self.health.lock().unwrap();
        match health.len() {
            0 => Err(Error::internal("no health response configured")),
            1 => Ok(health[0].clone()),
            _ => Ok(health.remove(0)),
        }
    }

    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let delay = self.first_predict_delay.lock().unwrap().take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = &self.transport_error {
            return Err(Error::internal(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(PredictionResponse {
                input: request.text.clone(),
                output: request.text,
            });
        }

        responses
            .remove(0)
            .map_err(|(status, detail)| Error::Server { status, detail })
    }
}

pub fn healthy() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        model_loaded: true,
        tokenizer_loaded: true,
    }
}

pub fn degraded() -> HealthResponse {
    HealthResponse {
        status: "degraded".to_string(),
        model_loaded: true,
        tokenizer_loaded: true,
    }
}
