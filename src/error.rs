//! Error types for Symptom Advisor, one enum per concern.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Generative inference provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} returned HTTP {status}: {body}")]
    HttpStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Provider {provider} blocked the prompt: {reason}")]
    Blocked { provider: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Places-search errors. Never shown to the user; the lookup degrades to an
/// empty provider list.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Places request failed: {0}")]
    RequestFailed(String),

    #[error("Places search returned status {status}")]
    Status { status: String },

    #[error("Places lookup not configured")]
    NotConfigured,
}

/// Errors decoding the intake envelope carried to the results view.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Missing intake envelope")]
    Missing,

    #[error("Malformed intake envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Intake envelope field {field} is empty")]
    Incomplete { field: String },
}

/// Advice pipeline errors. Always surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("Inference call failed: {0}")]
    Inference(#[from] LlmError),

    #[error("Response is not valid JSON: {0}")]
    Parse(String),

    #[error("Response violates the advice schema: {0}")]
    Schema(String),
}
