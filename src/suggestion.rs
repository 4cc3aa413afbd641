//! Parsing raw placement suggestions from a vision model
//!
//! Models are asked for a bare JSON object but frequently wrap it in a
//! markdown code fence. Both forms are accepted:
//!
//! ````text
//! ```json
//! {"x": 0.3, "y": 0.2, "rotation": 0, "scale": 1.1, "reasoning": "by the wall"}
//! ```
//! ````

use thiserror::Error;
use tracing::warn;

use crate::placement::CandidatePlacement;

/// Reasoning attached when a suggestion could not be used
pub const FALLBACK_REASONING: &str =
    "Suggestion could not be parsed; starting from the room centre.";

/// Errors that can occur when reading a raw suggestion
#[derive(Error, Debug)]
pub enum SuggestionError {
    #[error("suggestion is empty")]
    Empty,
    #[error("suggestion is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("suggestion is not a JSON object")]
    NotAnObject,
}

/// Remove surrounding whitespace and a markdown code fence, if present
pub fn strip_code_fence(raw: &str) -> &str {
    let content = raw.trim();
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the opening fence line, including any language tag
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => "",
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a raw suggestion into a candidate placement
///
/// The candidate is not validated here; out-of-range or missing fields are
/// left for the resolver to coerce.
pub fn parse_suggestion(raw: &str) -> Result<CandidatePlacement, SuggestionError> {
    let content = strip_code_fence(raw);
    if content.is_empty() {
        return Err(SuggestionError::Empty);
    }
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(SuggestionError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse a raw suggestion, substituting a centred candidate on failure
pub fn parse_suggestion_or_default(raw: &str) -> CandidatePlacement {
    match parse_suggestion(raw) {
        Ok(candidate) => candidate,
        Err(e) => {
            warn!(error = %e, "falling back to centred placement");
            CandidatePlacement::centered().with_reasoning(FALLBACK_REASONING)
        }
    }
}
