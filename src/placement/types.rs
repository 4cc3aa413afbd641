//! Core types for placement resolution

use serde::{Deserialize, Deserializer, Serialize};

/// A proposed or resolved placement in normalized room space
///
/// `x`/`y` run from 0 to 1 across the room footprint: `x = 0` is the left
/// wall, `y = 0` the back wall. Inputs may hold NaN (missing or garbage
/// values); the resolver coerces those before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlacement {
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub x: f64,
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub y: f64,
    /// Yaw in radians
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub rotation: f64,
    /// Multiplier on top of the externally computed base-fit scale
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub scale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl CandidatePlacement {
    pub fn new(x: f64, y: f64, rotation: f64, scale: f64) -> Self {
        Self {
            x,
            y,
            rotation,
            scale,
            reasoning: None,
        }
    }

    /// Dead-centre, unrotated, unscaled placement
    pub fn centered() -> Self {
        Self::new(0.5, 0.5, 0.0, 1.0)
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }
}

impl Default for CandidatePlacement {
    fn default() -> Self {
        Self::centered()
    }
}

fn missing_number() -> f64 {
    f64::NAN
}

/// Accept numbers, numeric strings and null; anything else becomes NaN.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// Footprint of the item being placed, before the scale multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelDimensions {
    pub width: f64,
    pub depth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl ModelDimensions {
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            width,
            depth,
            height: None,
        }
    }

    /// Width and depth are both finite and positive
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.depth.is_finite() && self.width > 0.0 && self.depth > 0.0
    }
}

/// An item already placed in the room, known only by its world position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingItem {
    /// World-space position; index 0 is X, depth is index 2 (or 1 for
    /// two-component positions)
    pub position: Vec<f64>,
}

impl ExistingItem {
    pub fn new(x: f64, height: f64, z: f64) -> Self {
        Self {
            position: vec![x, height, z],
        }
    }

    /// Footprint position on the floor plane, if the components are usable
    pub fn floor_position(&self) -> Option<WorldPoint> {
        let x = *self.position.first()?;
        let z = if self.position.len() >= 3 {
            self.position[2]
        } else {
            *self.position.get(1)?
        };
        (x.is_finite() && z.is_finite()).then_some(WorldPoint::new(x, z))
    }
}

/// Immutable scene context for a single resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomContext {
    pub room_width: f64,
    pub room_depth: f64,
    #[serde(default)]
    pub existing_items: Vec<ExistingItem>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub model_dimensions: Option<ModelDimensions>,
}

impl RoomContext {
    pub fn new(room_width: f64, room_depth: f64) -> Self {
        Self {
            room_width,
            room_depth,
            existing_items: Vec::new(),
            label: String::new(),
            model_dimensions: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_item(mut self, item: ExistingItem) -> Self {
        self.existing_items.push(item);
        self
    }

    pub fn with_model_dimensions(mut self, dimensions: ModelDimensions) -> Self {
        self.model_dimensions = Some(dimensions);
        self
    }

    /// Room width, or 0 when it is not a usable positive number
    pub fn width(&self) -> f64 {
        positive_or_zero(self.room_width)
    }

    /// Room depth, or 0 when it is not a usable positive number
    pub fn depth(&self) -> f64 {
        positive_or_zero(self.room_depth)
    }

    /// Larger of the two room dimensions, the base for size heuristics
    pub fn size(&self) -> f64 {
        self.width().max(self.depth())
    }

    /// Model footprint if one was supplied and is usable
    pub fn usable_dimensions(&self) -> Option<ModelDimensions> {
        self.model_dimensions.filter(ModelDimensions::is_usable)
    }

    /// Floor positions of all existing items with usable coordinates
    pub fn obstacles(&self) -> Vec<WorldPoint> {
        self.existing_items
            .iter()
            .filter_map(ExistingItem::floor_position)
            .collect()
    }
}

fn positive_or_zero(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// A point on the floor plane in world units, origin at the room centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub z: f64,
}

impl WorldPoint {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.z)
    }
}

/// A position in normalized room space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sub-rectangle of the unit square that keeps a footprint inside the walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZone {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SafeZone {
    /// Zone with the given margins on the X and Y axes
    ///
    /// Margins are limited to [0, 0.5]; at 0.5 the zone collapses onto the
    /// room's centre line. A NaN margin counts as 0.
    pub fn with_margins(margin_x: f64, margin_y: f64) -> Self {
        let cap = |m: f64| if m.is_nan() { 0.0 } else { m.clamp(0.0, 0.5) };
        let (margin_x, margin_y) = (cap(margin_x), cap(margin_y));
        Self {
            min_x: margin_x,
            max_x: 1.0 - margin_x,
            min_y: margin_y,
            max_y: 1.0 - margin_y,
        }
    }

    pub fn contains(&self, p: NormalizedPoint) -> bool {
        const EPS: f64 = 1e-9;
        p.x >= self.min_x - EPS
            && p.x <= self.max_x + EPS
            && p.y >= self.min_y - EPS
            && p.y <= self.max_y + EPS
    }

    pub fn clamp(&self, p: NormalizedPoint) -> NormalizedPoint {
        NormalizedPoint::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
        )
    }
}

/// One of the four walls of the room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    /// `y = 0`
    Back,
    /// `y = 1`
    Front,
    /// `x = 0`
    Left,
    /// `x = 1`
    Right,
}

impl Wall {
    /// Tie-break order when several walls are equally close
    pub const ALL: [Wall; 4] = [Wall::Back, Wall::Front, Wall::Left, Wall::Right];
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Wall::Back => write!(f, "back"),
            Wall::Front => write!(f, "front"),
            Wall::Left => write!(f, "left"),
            Wall::Right => write!(f, "right"),
        }
    }
}
