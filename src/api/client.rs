use super::types::*;
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait FormalizerBackend: Send + Sync {
    async fn health(&self) -> Result<HealthResponse>;

    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    health_url: String,
    predict_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            health_url: config.health_url(),
            predict_url: config.predict_url(),
        })
    }
}

#[async_trait]
impl FormalizerBackend for HttpBackend {
    async fn health(&self) -> Result<HealthResponse> {
        debug!("Checking backend health at {}", self.health_url);

        let response = self.client.get(&self.health_url).send().await?;
        let health: HealthResponse = response.json().await?;

        debug!(
            "Health: status={} model_loaded={} tokenizer_loaded={}",
            health.status, health.model_loaded, health.tokenizer_loaded
        );
        Ok(health)
    }

    async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse> {
        debug!(
            "Posting {} bytes of text to {}",
            request.text.len(),
            self.predict_url
        );

        let response = self
            .client
            .post(&self.predict_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(Error::Server {
                status: status.as_u16(),
                detail: ErrorBody::detail_from(&body),
            });
        }

        let bytes = response.bytes().await?;
        let prediction: PredictionResponse = serde_json::from_slice(&bytes)?;

        debug!("Received {} bytes of output", prediction.output.len());
        Ok(prediction)
    }
}
