//! Advice response contract: the JSON schema sent to the model and the typed
//! result it is parsed into.

use serde::{Deserialize, Serialize};

use crate::error::AdviceError;

/// A recommended medicine. All three fields are required and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Structured output of the inference call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    pub medicines: Vec<Medicine>,
    pub advice: String,
}

impl AdviceResult {
    /// Check the invariants serde cannot express: required strings are
    /// non-blank. An empty `table_name` is normalized away.
    pub fn validated(mut self) -> Result<Self, AdviceError> {
        if self.condition.trim().is_empty() {
            return Err(AdviceError::Schema("condition is empty".into()));
        }
        for (i, medicine) in self.medicines.iter().enumerate() {
            for (field, value) in [
                ("name", &medicine.name),
                ("dosage", &medicine.dosage),
                ("type", &medicine.kind),
            ] {
                if value.trim().is_empty() {
                    return Err(AdviceError::Schema(format!("medicines[{i}].{field} is empty")));
                }
            }
        }
        if self
            .table_name
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            self.table_name = None;
        }
        Ok(self)
    }
}

/// Response schema in the generateContent `responseSchema` dialect.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "description": "Medical advice based on user symptoms",
        "type": "OBJECT",
        "properties": {
            "condition": { "type": "STRING" },
            "table_name": { "type": "STRING" },
            "medicines": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "dosage": { "type": "STRING" },
                        "type": { "type": "STRING" }
                    },
                    "required": ["name", "dosage", "type"]
                }
            },
            "advice": { "type": "STRING" }
        },
        "required": ["condition", "medicines", "advice"]
    })
}

/// Parse raw model output into a validated `AdviceResult`.
///
/// The model is asked for bare JSON but sometimes wraps it in a markdown
/// fence, which is stripped before parsing.
pub fn parse_advice(text: &str) -> Result<AdviceResult, AdviceError> {
    let json = extract_json_object(text);
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| AdviceError::Parse(e.to_string()))?;
    let result: AdviceResult =
        serde_json::from_value(value).map_err(|e| AdviceError::Schema(e.to_string()))?;
    result.validated()
}

/// Strip a markdown fence wrapping the whole reply. Anything else is
/// returned trimmed and left for the JSON parser to judge.
fn extract_json_object(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    body.strip_prefix("json").unwrap_or(body).trim()
}
