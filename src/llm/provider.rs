//! Inference provider trait and request/response types.

use async_trait::async_trait;

use crate::error::LlmError;

/// A single schema-constrained generation request.
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    pub prompt: String,
    /// JSON schema the response must conform to.
    pub response_schema: serde_json::Value,
}

impl InferenceRequest {
    pub fn new(prompt: impl Into<String>, response_schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema,
        }
    }
}

/// Raw model output.
#[derive(Debug, Clone)]
pub struct InferenceResponse {
    /// Response text; expected to be JSON but not yet parsed.
    pub text: String,
    pub model: String,
}

/// A generative inference endpoint. The model is an opaque collaborator:
/// identical requests may yield different responses.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    fn model_name(&self) -> &str;

    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, LlmError>;
}
