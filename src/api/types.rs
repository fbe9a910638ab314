use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Echo of the submitted text; older servers omit it.
    #[serde(default)]
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub tokenizer_loaded: bool,
}

impl HealthResponse {
    /// The backend can serve predictions once it is healthy with the model
    /// loaded. `tokenizer_loaded` is reported by the server but not required.
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}

/// Body of a rejected prediction request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Extracts `detail` from a raw response body, if the body is JSON and
    /// carries a string `detail`.
    pub fn detail_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
    }
}
