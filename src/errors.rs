use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;

/// Top-level error type for the library.
///
/// Functions return `anyhow::Result` and convert these variants with `.into()`,
/// so callers can downcast when they need to branch on a specific failure
/// (batch fetchers downcast to isolate `KeysExhausted` per symbol).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    /// Every credential in the provider's pool failed for one request.
    #[error("all {attempts} credentials exhausted for {provider}")]
    KeysExhausted {
        provider: &'static str,
        attempts: usize,
    },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn api(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            provider,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn parse(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            message: message.into(),
        }
    }
}
