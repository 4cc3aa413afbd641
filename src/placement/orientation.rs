//! Furniture-specific orientation rules
//!
//! These run after the position has been made collision-free:
//! couches seek the nearest wall, other items get nudged off dead-centre,
//! and any furniture is turned around if it would face straight into the
//! nearest wall.

use tracing::warn;

use super::collision::CollisionModel;
use super::config::PlacementConfig;
use super::geometry::{
    facing_away_from, facing_into, nearest_wall, opposite_rotation, wall_distance,
};
use super::report::{record, Adjustment};
use super::types::{NormalizedPoint, SafeZone, Wall};

/// Slack on the centre test so a nudged position is never nudged again
const CENTER_EPS: f64 = 1e-9;

/// Minimum lead of a couch's side-wall distances over its own-wall distance
///
/// Larger than the three-decimal output rounding, so a resolved couch is
/// still nearest the same wall when resolved again.
const SIDE_GAP: f64 = 0.005;

/// Put a couch against its nearest wall, facing into the room
///
/// Returns the new position and rotation. A couch that would end up in the
/// middle of its wall is slid to a quarter point instead, and one in a
/// corner is slid clear of the side wall. If that spot collides with an
/// existing item the mirrored spot is tried, then the couch's own position
/// along the wall; when all of them collide the first spot is kept.
pub fn seek_wall(
    p: NormalizedPoint,
    model: &CollisionModel<'_>,
    config: &PlacementConfig,
    adjustments: &mut Vec<Adjustment>,
) -> (NormalizedPoint, f64) {
    let zone = model.zone();
    let wall = nearest_wall(p);
    let band = config.couch_wall_band;
    let on_wall = |along: f64| match wall {
        Wall::Back => NormalizedPoint::new(along, zone.min_y + band),
        Wall::Front => NormalizedPoint::new(along, zone.max_y - band),
        Wall::Left => NormalizedPoint::new(zone.min_x + band, along),
        Wall::Right => NormalizedPoint::new(zone.max_x - band, along),
    };
    let along = match wall {
        Wall::Back | Wall::Front => p.x,
        Wall::Left | Wall::Right => p.y,
    };

    let (lo, hi) = along_wall_range(wall, zone, wall_distance(on_wall(0.5), wall), band);
    let fit = |v: f64| if lo <= hi { v.clamp(lo, hi) } else { v };

    let preferred = if (along - 0.5).abs() < config.center_threshold {
        if along <= 0.5 {
            config.couch_quarter
        } else {
            1.0 - config.couch_quarter
        }
    } else {
        along
    };
    let first = on_wall(fit(preferred));
    let mut chosen = first;
    if !model.is_valid(first) {
        record(
            adjustments,
            Adjustment::WallSpotBlocked {
                wall,
                x: first.x,
                y: first.y,
            },
        );
        let alternatives = [on_wall(fit(1.0 - preferred)), on_wall(fit(along))];
        match alternatives.into_iter().find(|q| model.is_valid(*q)) {
            Some(q) => chosen = q,
            None => warn!(
                %wall,
                x = first.x,
                y = first.y,
                "every spot against the wall collides, accepting possible overlap"
            ),
        }
    }

    record(
        adjustments,
        Adjustment::SnappedToWall {
            wall,
            x: chosen.x,
            y: chosen.y,
        },
    );
    (chosen, facing_away_from(wall))
}

/// Allowed range for a couch's coordinate along `wall`
///
/// Keeps both side walls strictly farther away than `wall` itself and,
/// when the zone is wide enough, out of the side walls' bands too.
fn along_wall_range(wall: Wall, zone: SafeZone, own_distance: f64, band: f64) -> (f64, f64) {
    let (zone_lo, zone_hi) = match wall {
        Wall::Back | Wall::Front => (zone.min_x, zone.max_x),
        Wall::Left | Wall::Right => (zone.min_y, zone.max_y),
    };
    let lo = zone_lo.max(own_distance + SIDE_GAP);
    let hi = zone_hi.min(1.0 - own_distance - SIDE_GAP);
    let (banded_lo, banded_hi) = (lo.max(zone_lo + 2.0 * band), hi.min(zone_hi - 2.0 * band));
    if banded_lo <= banded_hi {
        (banded_lo, banded_hi)
    } else {
        (lo, hi)
    }
}

/// Move an item sitting at the room centre toward the nearer quadrant
///
/// The move is only kept if the new position is still valid; a zero offset
/// counts as negative, so an exactly centred item heads for the back-left.
pub fn nudge_off_center(
    p: NormalizedPoint,
    model: &CollisionModel<'_>,
    config: &PlacementConfig,
    adjustments: &mut Vec<Adjustment>,
) -> NormalizedPoint {
    let dx = p.x - 0.5;
    let dy = p.y - 0.5;
    let threshold = config.center_threshold - CENTER_EPS;
    if dx.abs() >= threshold || dy.abs() >= threshold {
        return p;
    }
    let direction = |offset: f64| if offset > 0.0 { 1.0 } else { -1.0 };
    let nudged = NormalizedPoint::new(
        p.x + direction(dx) * config.center_nudge,
        p.y + direction(dy) * config.center_nudge,
    );
    if !model.is_valid(nudged) {
        return p;
    }
    record(
        adjustments,
        Adjustment::NudgedOffCenter {
            x: nudged.x,
            y: nudged.y,
        },
    );
    nudged
}

/// Turn an item around if it faces straight into its nearest wall
pub fn avoid_facing_wall(
    p: NormalizedPoint,
    rotation: f64,
    adjustments: &mut Vec<Adjustment>,
) -> f64 {
    let wall = nearest_wall(p);
    if rotation != facing_into(wall) {
        return rotation;
    }
    let flipped = opposite_rotation(rotation);
    record(
        adjustments,
        Adjustment::RotationFlipped {
            wall,
            from: rotation,
            to: flipped,
        },
    );
    flipped
}
