//! Furniture Placer - automatic furniture placement for room scenes
//!
//! This library corrects a proposed furniture placement (often suggested by a
//! vision model) into one that keeps clear of walls and existing furniture,
//! uses a cardinal rotation and a sane scale, and faces the room.
//!
//! # Example
//!
//! ```rust
//! use furniture_placer::{resolve, CandidatePlacement, RoomContext};
//!
//! let room = RoomContext::new(4.0, 4.0).with_label("couch");
//! let placed = resolve(&CandidatePlacement::centered(), &room);
//! assert_eq!(placed.x, 0.25);
//! assert_eq!(placed.y, 0.09);
//! assert_eq!(placed.rotation, 0.0);
//! ```

pub mod error;
pub mod placement;
pub mod suggestion;

pub use error::RequestError;
pub use placement::{
    base_fit_scale, resolve, Adjustment, CandidatePlacement, ConfigError, ExistingItem,
    FurnitureKind, ModelDimensions, PlacementConfig, PlacementResolver, Resolution, RoomContext,
    CARDINAL_ROTATIONS,
};
pub use suggestion::{parse_suggestion, parse_suggestion_or_default, SuggestionError};

use serde::{Deserialize, Serialize};

/// A complete placement request as exchanged over JSON
///
/// Either `candidate` or `raw_suggestion` should be present. A raw
/// suggestion that cannot be parsed is replaced by a centred candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<CandidatePlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_suggestion: Option<String>,
    pub context: RoomContext,
}

impl PlacementRequest {
    pub fn new(candidate: CandidatePlacement, context: RoomContext) -> Self {
        Self {
            candidate: Some(candidate),
            raw_suggestion: None,
            context,
        }
    }

    /// Request built from unparsed model output
    pub fn from_suggestion(raw: impl Into<String>, context: RoomContext) -> Self {
        Self {
            candidate: None,
            raw_suggestion: Some(raw.into()),
            context,
        }
    }

    /// The candidate to resolve, parsing the raw suggestion if needed
    pub fn candidate(&self) -> Result<CandidatePlacement, RequestError> {
        match (&self.candidate, &self.raw_suggestion) {
            (Some(candidate), _) => Ok(candidate.clone()),
            (None, Some(raw)) => Ok(parse_suggestion_or_default(raw)),
            (None, None) => Err(RequestError::MissingCandidate),
        }
    }
}

/// Resolve a request with the given resolver
pub fn resolve_request(
    request: &PlacementRequest,
    resolver: &PlacementResolver,
) -> Result<Resolution, RequestError> {
    let candidate = request.candidate()?;
    Ok(resolver.resolve_with_report(&candidate, &request.context))
}

/// Resolve a JSON-encoded request
///
/// # Example
///
/// ```rust
/// use furniture_placer::{resolve_request_json, PlacementResolver};
///
/// let json = r#"{
///     "rawSuggestion": "```json\n{\"x\": 0.8, \"y\": 0.5, \"rotation\": 1.4, \"scale\": 1}\n```",
///     "context": {"roomWidth": 5, "roomDepth": 4, "existingItems": [], "label": "plant"}
/// }"#;
/// let resolution = resolve_request_json(json, &PlacementResolver::default()).unwrap();
/// assert_eq!(resolution.placement.x, 0.8);
/// assert_eq!(resolution.placement.rotation, std::f64::consts::FRAC_PI_2);
/// ```
pub fn resolve_request_json(
    json: &str,
    resolver: &PlacementResolver,
) -> Result<Resolution, RequestError> {
    let request: PlacementRequest = serde_json::from_str(json)?;
    resolve_request(&request, resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_candidate() {
        let request = PlacementRequest::new(
            CandidatePlacement::new(0.3, 0.3, 0.0, 1.0),
            RoomContext::new(4.0, 4.0),
        );
        let resolution = resolve_request(&request, &PlacementResolver::default()).unwrap();
        assert_eq!(resolution.placement.x, 0.3);
        assert_eq!(resolution.placement.y, 0.3);
    }

    #[test]
    fn test_request_with_unparseable_suggestion() {
        let request = PlacementRequest::from_suggestion(
            "I think it should go by the window",
            RoomContext::new(4.0, 4.0).with_label("plant"),
        );
        let resolution = resolve_request(&request, &PlacementResolver::default()).unwrap();
        // Centred fallback, then nudged off centre
        assert_eq!(resolution.placement.x, 0.4);
        assert_eq!(resolution.placement.y, 0.4);
        assert_eq!(
            resolution.placement.reasoning.as_deref(),
            Some(suggestion::FALLBACK_REASONING)
        );
    }

    #[test]
    fn test_request_without_candidate() {
        let request = PlacementRequest {
            candidate: None,
            raw_suggestion: None,
            context: RoomContext::new(4.0, 4.0),
        };
        let err = resolve_request(&request, &PlacementResolver::default()).unwrap_err();
        assert!(matches!(err, RequestError::MissingCandidate));
    }

    #[test]
    fn test_malformed_json_request() {
        let err = resolve_request_json("{\"context\": 3}", &PlacementResolver::default())
            .unwrap_err();
        assert!(matches!(err, RequestError::InvalidRequest(_)));
    }
}
