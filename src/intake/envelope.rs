//! Transport envelope: the completed form travels from the intake screen to
//! the results screen as a percent-encoded JSON query parameter.

use url::form_urlencoded;

use super::model::IntakeForm;
use crate::error::EnvelopeError;

/// Query parameter holding the serialized form.
pub const ENVELOPE_PARAM: &str = "q";

/// Serialize a form into a query string (`q=<percent-encoded JSON>`).
pub fn encode(form: &IntakeForm) -> Result<String, EnvelopeError> {
    let json = serde_json::to_string(form)?;
    Ok(form_urlencoded::Serializer::new(String::new())
        .append_pair(ENVELOPE_PARAM, &json)
        .finish())
}

/// Decode a raw (still percent-encoded) query string back into a form.
///
/// Every field must be present and non-empty.
pub fn decode(raw_query: &str) -> Result<IntakeForm, EnvelopeError> {
    let json = param(raw_query, ENVELOPE_PARAM).ok_or(EnvelopeError::Missing)?;
    let form: IntakeForm = serde_json::from_str(&json)?;
    if let Some(field) = form.first_unanswered() {
        return Err(EnvelopeError::Incomplete {
            field: field.to_string(),
        });
    }
    Ok(form)
}

/// Percent-decoded value of the first `key` parameter in a raw query string.
pub fn param(raw_query: &str, key: &str) -> Option<String> {
    let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);
    form_urlencoded::parse(raw_query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
