use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Shown when the input is blank after trimming.
pub const EMPTY_INPUT_MESSAGE: &str = "Masukkan teks terlebih dahulu";

/// Shown when the server rejects a request without a usable `detail`.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Shown for every transport-level failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Terjadi kesalahan 😕";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server returned {status}: {}", .detail.as_deref().unwrap_or(SERVER_ERROR_MESSAGE))]
    Server { status: u16, detail: Option<String> },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Collapses the error into the single line shown to the user.
    ///
    /// Server-provided `detail` text is passed through verbatim; every
    /// transport or decoding failure maps to the same generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Server { detail, .. } => detail
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(SERVER_ERROR_MESSAGE)
                .to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
