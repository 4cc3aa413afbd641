//! Configuration for the placement resolver
//!
//! Every heuristic the resolver relies on (margins, radii, bands, nudges)
//! lives here so it can be tuned without touching the algorithm. A config
//! can be built in code with the `with_*` methods or loaded from a TOML file:
//!
//! ```toml
//! [metadata]
//! name = "tight studio"
//!
//! [placement]
//! clearance_ratio = 0.04
//! max_iterations = 20
//! ```
//!
//! Keys that are left out keep their default values.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a placement configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read placement config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse placement config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid placement config: {0}")]
    Invalid(String),
}

/// Tunable constants for placement resolution
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Lower bound for the scale multiplier
    pub min_scale: f64,

    /// Upper bound for the scale multiplier
    pub max_scale: f64,

    /// Minimum normalized distance between an item's centre and any wall
    pub wall_margin: f64,

    /// Cap on the footprint-derived margin, keeps the safe zone non-empty
    pub max_wall_margin: f64,

    /// Radius assumed for items of unknown size, as a fraction of room size
    pub default_radius_ratio: f64,

    /// Clearance kept between neighbouring items, as a fraction of room size
    pub clearance_ratio: f64,

    /// Overshoot added to every push-away move, as a fraction of room size
    pub push_buffer_ratio: f64,

    /// Overshoot added when retreating toward the room centre instead
    pub retreat_buffer_ratio: f64,

    /// Upper bound on collision resolution passes
    pub max_iterations: usize,

    /// How far inside the safe boundary a couch sits against its wall
    pub couch_wall_band: f64,

    /// Offset from 0.5 below which a coordinate counts as centred
    pub center_threshold: f64,

    /// Step used to move centred items toward a quadrant
    pub center_nudge: f64,

    /// Along-wall position for couches that would otherwise be centred
    /// (mirrored to `1 - couch_quarter` on the far side)
    pub couch_quarter: f64,

    /// Normalized positions tried, in order, when collision resolution fails
    pub fallback_positions: Vec<(f64, f64)>,

    /// Reasoning attached to placements that arrive without one
    pub default_reasoning: String,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 4.0,
            wall_margin: 0.05,
            max_wall_margin: 0.45,
            default_radius_ratio: 0.04,
            clearance_ratio: 0.06,
            push_buffer_ratio: 0.01,
            retreat_buffer_ratio: 0.02,
            max_iterations: 10,
            couch_wall_band: 0.04,
            center_threshold: 0.1,
            center_nudge: 0.1,
            couch_quarter: 0.25,
            fallback_positions: vec![
                (0.5, 0.5),
                (0.3, 0.3),
                (0.7, 0.3),
                (0.3, 0.7),
                (0.7, 0.7),
                (0.5, 0.2),
                (0.5, 0.8),
                (0.2, 0.5),
                (0.8, 0.5),
            ],
            default_reasoning: "Placed by geometric constraints: kept clear of walls and \
                                existing furniture, rotation aligned to the room axes."
                .to_string(),
        }
    }
}

/// TOML structure for deserializing config files
#[derive(Deserialize)]
struct TomlConfig {
    #[allow(dead_code)]
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    placement: PlacementConfig,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl PlacementConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        parsed.placement.validate()?;
        Ok(parsed.placement)
    }

    /// Reject combinations the resolver cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.min_scale,
            self.max_scale,
            self.wall_margin,
            self.max_wall_margin,
            self.default_radius_ratio,
            self.clearance_ratio,
            self.push_buffer_ratio,
            self.retreat_buffer_ratio,
            self.couch_wall_band,
            self.center_threshold,
            self.center_nudge,
            self.couch_quarter,
        ];
        if finite.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid(
                "numeric settings must be finite and non-negative".to_string(),
            ));
        }
        if self.min_scale <= 0.0 || self.min_scale > self.max_scale {
            return Err(ConfigError::Invalid(format!(
                "scale range [{}, {}] is empty or non-positive",
                self.min_scale, self.max_scale
            )));
        }
        if self.wall_margin > self.max_wall_margin || self.max_wall_margin >= 0.5 {
            return Err(ConfigError::Invalid(format!(
                "wall margins must satisfy wall_margin <= max_wall_margin < 0.5 (got {} and {})",
                self.wall_margin, self.max_wall_margin
            )));
        }
        if self.max_wall_margin + self.couch_wall_band >= 0.5 {
            return Err(ConfigError::Invalid(format!(
                "couch_wall_band {} pushes couches past the room centre line",
                self.couch_wall_band
            )));
        }
        if self
            .fallback_positions
            .iter()
            .any(|(x, y)| !(0.0..=1.0).contains(x) || !(0.0..=1.0).contains(y))
        {
            return Err(ConfigError::Invalid(
                "fallback positions must lie inside [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the scale clamp range
    pub fn with_scale_range(mut self, min: f64, max: f64) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Set the minimum wall margin
    pub fn with_wall_margin(mut self, margin: f64) -> Self {
        self.wall_margin = margin;
        self
    }

    /// Set the clearance kept between items
    pub fn with_clearance_ratio(mut self, ratio: f64) -> Self {
        self.clearance_ratio = ratio;
        self
    }

    /// Set the default radius used for items of unknown size
    pub fn with_default_radius_ratio(mut self, ratio: f64) -> Self {
        self.default_radius_ratio = ratio;
        self
    }

    /// Set the number of collision resolution passes
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Replace the fallback search order
    pub fn with_fallback_positions(mut self, positions: Vec<(f64, f64)>) -> Self {
        self.fallback_positions = positions;
        self
    }

    /// Set the reasoning used when a candidate has none
    pub fn with_default_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.default_reasoning = reasoning.into();
        self
    }
}
