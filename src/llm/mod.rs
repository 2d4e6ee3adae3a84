//! LLM integration for Symptom Advisor.
//!
//! Supports:
//! - **Gemini**: `generateContent` with a JSON response schema, over reqwest
//!
//! Callers depend on the `InferenceProvider` trait; tests swap in stubs.

pub mod gemini;
pub mod provider;

pub use gemini::GeminiClient;
pub use provider::*;

use std::sync::Arc;

use crate::config::GeminiConfig;

/// Create the inference provider from configuration.
pub fn create_provider(config: &GeminiConfig) -> Arc<dyn InferenceProvider> {
    Arc::new(GeminiClient::new(config))
}
