//! Coordinate conversion and angle utilities
//!
//! Normalized room space runs from 0 to 1 on both axes with the room centre
//! at (0.5, 0.5). World space uses the room's own units with the origin at
//! the room centre:
//!
//! ```text
//! world_x = (x - 0.5) * room_width
//! world_z = (y - 0.5) * room_depth
//! ```

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::config::PlacementConfig;
use super::types::{ModelDimensions, NormalizedPoint, RoomContext, SafeZone, Wall, WorldPoint};

/// The only rotations a resolved placement may carry, in snap priority order
pub const CARDINAL_ROTATIONS: [f64; 4] = [0.0, FRAC_PI_2, PI, -FRAC_PI_2];

/// Convert a normalized position to world coordinates
pub fn to_world(p: NormalizedPoint, ctx: &RoomContext) -> WorldPoint {
    WorldPoint::new((p.x - 0.5) * ctx.width(), (p.y - 0.5) * ctx.depth())
}

/// Convert a world position back to normalized coordinates
///
/// A zero-sized room axis maps everything to the centre of that axis.
pub fn to_normalized(w: WorldPoint, ctx: &RoomContext) -> NormalizedPoint {
    NormalizedPoint::new(
        w.x * ratio(1.0, ctx.width()) + 0.5,
        w.z * ratio(1.0, ctx.depth()) + 0.5,
    )
}

/// `numerator / denominator`, or 0 when the denominator is not positive
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Replace a non-finite value with a fallback
pub fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

/// Coerce a scale multiplier to a finite value inside the configured range
pub fn clamp_scale(scale: f64, config: &PlacementConfig) -> f64 {
    finite_or(scale, 1.0)
        .max(config.min_scale)
        .min(config.max_scale)
}

/// Footprint-aware safe zone for an item at the given (clamped) scale
///
/// Each margin is the item's half-extent along that axis, expressed as a
/// fraction of the room, but never less than `wall_margin` and never more
/// than `max_wall_margin`.
pub fn safe_zone(ctx: &RoomContext, scale: f64, config: &PlacementConfig) -> SafeZone {
    let (footprint_x, footprint_y) = match ctx.usable_dimensions() {
        Some(dims) => (
            ratio(dims.width * scale / 2.0, ctx.width()),
            ratio(dims.depth * scale / 2.0, ctx.depth()),
        ),
        None => (0.0, 0.0),
    };
    let margin = |footprint: f64| {
        config
            .wall_margin
            .max(footprint)
            .min(config.max_wall_margin)
    };
    SafeZone::with_margins(margin(footprint_x), margin(footprint_y))
}

/// Angular distance between two angles, measured around the circle
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Snap a rotation to the nearest cardinal angle
///
/// Non-finite input snaps to 0. Ties go to the earlier entry of
/// [`CARDINAL_ROTATIONS`].
pub fn snap_rotation(rotation: f64) -> f64 {
    let rotation = finite_or(rotation, 0.0);
    let mut best = CARDINAL_ROTATIONS[0];
    let mut best_distance = circular_distance(rotation, best);
    for &candidate in &CARDINAL_ROTATIONS[1..] {
        let d = circular_distance(rotation, candidate);
        if d < best_distance {
            best = candidate;
            best_distance = d;
        }
    }
    best
}

/// True if `rotation` is exactly one of the cardinal angles
pub fn is_cardinal(rotation: f64) -> bool {
    CARDINAL_ROTATIONS.contains(&rotation)
}

/// The cardinal angle pointing the opposite way
pub fn opposite_rotation(rotation: f64) -> f64 {
    match snap_rotation(rotation) {
        r if r == 0.0 => PI,
        r if r == PI => 0.0,
        r if r == FRAC_PI_2 => -FRAC_PI_2,
        _ => FRAC_PI_2,
    }
}

/// Distance from a normalized point to each wall
pub fn wall_distance(p: NormalizedPoint, wall: Wall) -> f64 {
    match wall {
        Wall::Back => p.y,
        Wall::Front => 1.0 - p.y,
        Wall::Left => p.x,
        Wall::Right => 1.0 - p.x,
    }
}

/// Closest wall; ties resolve in back, front, left, right order
pub fn nearest_wall(p: NormalizedPoint) -> Wall {
    let mut best = Wall::ALL[0];
    for &wall in &Wall::ALL[1..] {
        if wall_distance(p, wall) < wall_distance(p, best) {
            best = wall;
        }
    }
    best
}

/// Rotation that faces away from a wall, into the room
pub fn facing_away_from(wall: Wall) -> f64 {
    match wall {
        Wall::Back => 0.0,
        Wall::Front => PI,
        Wall::Left => FRAC_PI_2,
        Wall::Right => -FRAC_PI_2,
    }
}

/// Rotation that faces straight into a wall
pub fn facing_into(wall: Wall) -> f64 {
    opposite_rotation(facing_away_from(wall))
}

/// Round to three decimal places
pub fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Round to three decimals without leaving `[lo, hi]`
///
/// When plain rounding would step outside the range, the nearest
/// three-decimal value inside it is used instead.
pub fn round3_within(v: f64, lo: f64, hi: f64) -> f64 {
    const SLACK: f64 = 1e-9;
    let r = round3(v);
    if r < lo {
        ((lo * 1000.0 - SLACK).ceil() / 1000.0).min(hi)
    } else if r > hi {
        ((hi * 1000.0 + SLACK).floor() / 1000.0).max(lo)
    } else {
        r
    }
}

/// Uniform factor that makes a model's largest dimension equal `target_size`
///
/// Returns 1.0 when the dimensions are unknown or degenerate.
pub fn base_fit_scale(dimensions: Option<&ModelDimensions>, target_size: f64) -> f64 {
    let Some(dims) = dimensions.filter(|d| d.is_usable()) else {
        return 1.0;
    };
    let largest = dims
        .width
        .max(dims.depth)
        .max(dims.height.filter(|h| h.is_finite()).unwrap_or(0.0));
    if largest > 0.0 && target_size.is_finite() && target_size > 0.0 {
        target_size / largest
    } else {
        1.0
    }
}
