//! Records of what the resolver changed about a candidate

use std::fmt;

use tracing::debug;

use super::types::Wall;

/// One correction applied while resolving a placement
#[derive(Debug, Clone, PartialEq)]
pub enum Adjustment {
    ScaleClamped { from: f64, to: f64 },
    ClampedToSafeZone { x: f64, y: f64 },
    PushedAway { item: usize, x: f64, y: f64 },
    RetreatedTowardCenter { item: usize, x: f64, y: f64 },
    FallbackPosition { index: usize, x: f64, y: f64 },
    /// No valid position was found; the item may overlap a neighbour
    LastResortClamp { x: f64, y: f64 },
    /// The preferred spot against the wall collides with an existing item
    WallSpotBlocked { wall: Wall, x: f64, y: f64 },
    SnappedToWall { wall: Wall, x: f64, y: f64 },
    NudgedOffCenter { x: f64, y: f64 },
    RotationSnapped { from: f64, to: f64 },
    RotationFlipped { wall: Wall, from: f64, to: f64 },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::ScaleClamped { from, to } => {
                write!(f, "scale {} clamped to {}", from, to)
            }
            Adjustment::ClampedToSafeZone { x, y } => {
                write!(f, "clamped into safe zone at ({:.3}, {:.3})", x, y)
            }
            Adjustment::PushedAway { item, x, y } => {
                write!(f, "pushed away from item #{} to ({:.3}, {:.3})", item, x, y)
            }
            Adjustment::RetreatedTowardCenter { item, x, y } => write!(
                f,
                "blocked by wall while avoiding item #{}, moved toward centre at ({:.3}, {:.3})",
                item, x, y
            ),
            Adjustment::FallbackPosition { index, x, y } => {
                write!(f, "used fallback position #{} ({:.3}, {:.3})", index, x, y)
            }
            Adjustment::LastResortClamp { x, y } => write!(
                f,
                "no collision-free position found, kept clamped position ({:.3}, {:.3})",
                x, y
            ),
            Adjustment::WallSpotBlocked { wall, x, y } => write!(
                f,
                "spot against {} wall at ({:.3}, {:.3}) is taken by an existing item",
                wall, x, y
            ),
            Adjustment::SnappedToWall { wall, x, y } => {
                write!(f, "snapped against {} wall at ({:.3}, {:.3})", wall, x, y)
            }
            Adjustment::NudgedOffCenter { x, y } => {
                write!(f, "nudged off room centre to ({:.3}, {:.3})", x, y)
            }
            Adjustment::RotationSnapped { from, to } => {
                write!(f, "rotation {:.3} snapped to {:.3}", from, to)
            }
            Adjustment::RotationFlipped { wall, from, to } => write!(
                f,
                "rotation {:.3} faced into {} wall, flipped to {:.3}",
                from, wall, to
            ),
        }
    }
}

/// Log an adjustment and append it to the running report
pub(crate) fn record(adjustments: &mut Vec<Adjustment>, adjustment: Adjustment) {
    debug!(%adjustment, "placement adjusted");
    adjustments.push(adjustment);
}
