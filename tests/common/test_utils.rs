use formalizer::{
    Result,
    config::{BackendConfig, Config, LogsConfig},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::fs;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Create a test configuration pointing at `base_url` with a short poll interval
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        backend: BackendConfig {
            base_url: base_url.to_string(),
            poll_interval_ms: 20,
            ..BackendConfig::default()
        },
        logs: LogsConfig {
            level: "debug".to_string(),
        },
    }
}

/// Base URL of a local port with nothing listening on it
pub fn unreachable_base_url() -> String {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind a local port");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}", addr)
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

pub fn health_body(status: &str, model_loaded: bool, tokenizer_loaded: bool) -> Value {
    json!({
        "status": status,
        "model_loaded": model_loaded,
        "tokenizer_loaded": tokenizer_loaded
    })
}

/// Mount a health endpoint that always answers with the given body
pub async fn mount_health(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
backend:
  base_url: "http://127.0.0.1:9000"
  health_path: "/api/health"
  predict_path: "/api/predict"
  poll_interval_ms: 250
  request_timeout_secs: 15
logs:
  level: "debug"
"#;
