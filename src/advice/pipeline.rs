//! Advice request pipeline: form → prompt → one inference call → validated
//! `AdviceResult`.

use std::sync::Arc;

use tracing::{info, warn};

use super::prompt::advice_prompt;
use super::schema::{AdviceResult, parse_advice, response_schema};
use crate::error::AdviceError;
use crate::intake::IntakeForm;
use crate::llm::{InferenceProvider, InferenceRequest};

/// Issues advice requests against an inference provider.
///
/// Exactly one provider call per `request_advice`. Failures are returned
/// as-is; nothing is cached or retried.
pub struct AdvicePipeline {
    llm: Arc<dyn InferenceProvider>,
}

impl AdvicePipeline {
    pub fn new(llm: Arc<dyn InferenceProvider>) -> Self {
        Self { llm }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Request advice for a completed form. The form is not re-validated.
    pub async fn request_advice(&self, form: &IntakeForm) -> Result<AdviceResult, AdviceError> {
        let request = InferenceRequest::new(advice_prompt(form), response_schema());

        info!(model = self.llm.model_name(), "Requesting medical advice");
        let response = self.llm.generate(request).await.inspect_err(|e| {
            warn!(error = %e, "Advice inference call failed");
        })?;

        match parse_advice(&response.text) {
            Ok(result) => {
                info!(
                    model = %response.model,
                    medicines = result.medicines.len(),
                    "Advice received"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "Advice response rejected");
                Err(e)
            }
        }
    }
}
