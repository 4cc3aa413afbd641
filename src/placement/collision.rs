//! Radius-based separation from existing furniture
//!
//! Only the item being placed has a known footprint; every other item is
//! treated as a disc of `default_radius_ratio * room size`. Two items are
//! far enough apart when their centres are at least
//!
//! ```text
//! own radius + default radius + clearance
//! ```
//!
//! apart in world units. Resolution is best effort: a bounded number of
//! push-away passes, then an ordered search over fallback positions, then
//! a plain wall clamp that may still overlap.

use tracing::{debug, warn};

use super::config::PlacementConfig;
use super::geometry::{to_normalized, to_world};
use super::report::{record, Adjustment};
use super::types::{NormalizedPoint, RoomContext, SafeZone, WorldPoint};

/// Below this distance two centres are treated as coincident
const COINCIDENT: f64 = 1e-9;

/// Per-call collision state for one item being placed
#[derive(Debug, Clone)]
pub struct CollisionModel<'a> {
    ctx: &'a RoomContext,
    zone: SafeZone,
    obstacles: Vec<WorldPoint>,
    required: f64,
    push_buffer: f64,
    retreat_buffer: f64,
    max_iterations: usize,
}

impl<'a> CollisionModel<'a> {
    /// Build the model for an item at the given (already clamped) scale
    pub fn new(ctx: &'a RoomContext, zone: SafeZone, scale: f64, config: &PlacementConfig) -> Self {
        let room_size = ctx.size();
        let default_radius = config.default_radius_ratio * room_size;
        let own_radius = match ctx.usable_dimensions() {
            Some(dims) => dims.width.max(dims.depth) * scale / 2.0,
            None => default_radius,
        };
        Self {
            ctx,
            zone,
            obstacles: ctx.obstacles(),
            required: own_radius + default_radius + config.clearance_ratio * room_size,
            push_buffer: config.push_buffer_ratio * room_size,
            retreat_buffer: config.retreat_buffer_ratio * room_size,
            max_iterations: config.max_iterations,
        }
    }

    /// Minimum centre-to-centre distance, in world units
    pub fn required_separation(&self) -> f64 {
        self.required
    }

    pub fn zone(&self) -> SafeZone {
        self.zone
    }

    /// Index of the first existing item closer than the required separation
    pub fn first_collision(&self, p: NormalizedPoint) -> Option<usize> {
        let w = to_world(p, self.ctx);
        self.obstacles
            .iter()
            .position(|item| w.distance_to(*item) < self.required)
    }

    pub fn collides(&self, p: NormalizedPoint) -> bool {
        self.first_collision(p).is_some()
    }

    /// Inside the safe zone and clear of every existing item
    pub fn is_valid(&self, p: NormalizedPoint) -> bool {
        self.zone.contains(p) && !self.collides(p)
    }

    /// Iteratively push a position away from the items it overlaps
    ///
    /// Stops after a pass that needed no adjustment, or after
    /// `max_iterations` passes regardless of convergence.
    pub fn separate(
        &self,
        start: NormalizedPoint,
        adjustments: &mut Vec<Adjustment>,
    ) -> NormalizedPoint {
        let mut current = start;
        for iteration in 0..self.max_iterations {
            let mut adjusted = false;
            for (index, item) in self.obstacles.iter().enumerate() {
                let w = to_world(current, self.ctx);
                let distance = w.distance_to(*item);
                if distance >= self.required {
                    continue;
                }
                adjusted = true;
                current = self.push_away(current, index, *item, distance, adjustments);
            }
            if !adjusted {
                debug!(iteration, "collision resolution converged");
                break;
            }
        }
        current
    }

    fn push_away(
        &self,
        current: NormalizedPoint,
        index: usize,
        item: WorldPoint,
        distance: f64,
        adjustments: &mut Vec<Adjustment>,
    ) -> NormalizedPoint {
        let w = to_world(current, self.ctx);
        let (dx, dz) = if distance > COINCIDENT {
            ((w.x - item.x) / distance, (w.z - item.z) / distance)
        } else {
            (1.0, 0.0)
        };
        let step = self.required - distance + self.push_buffer;
        let pushed = to_normalized(WorldPoint::new(w.x + dx * step, w.z + dz * step), self.ctx);
        if self.zone.contains(pushed) {
            record(
                adjustments,
                Adjustment::PushedAway {
                    item: index,
                    x: pushed.x,
                    y: pushed.y,
                },
            );
            return pushed;
        }

        // The wall is in the way: go to the far side of the item, toward the centre
        let to_center = WorldPoint::new(-item.x, -item.z);
        let length = to_center.length();
        let (cx, cz) = if length > COINCIDENT {
            (to_center.x / length, to_center.z / length)
        } else {
            (-dx, -dz)
        };
        let reach = self.required + self.retreat_buffer;
        let retreat = self.zone.clamp(to_normalized(
            WorldPoint::new(item.x + cx * reach, item.z + cz * reach),
            self.ctx,
        ));
        record(
            adjustments,
            Adjustment::RetreatedTowardCenter {
                item: index,
                x: retreat.x,
                y: retreat.y,
            },
        );
        retreat
    }

    /// Return `p` if it is valid, else the first valid fallback position,
    /// else `p` clamped into the safe zone
    pub fn find_valid(
        &self,
        p: NormalizedPoint,
        fallbacks: &[(f64, f64)],
        adjustments: &mut Vec<Adjustment>,
    ) -> NormalizedPoint {
        if self.is_valid(p) {
            return p;
        }
        for (index, &(x, y)) in fallbacks.iter().enumerate() {
            let candidate = NormalizedPoint::new(x, y);
            if self.is_valid(candidate) {
                record(adjustments, Adjustment::FallbackPosition { index, x, y });
                return candidate;
            }
        }
        let clamped = self.zone.clamp(p);
        warn!(
            x = clamped.x,
            y = clamped.y,
            items = self.obstacles.len(),
            "no collision-free placement found, accepting possible overlap"
        );
        adjustments.push(Adjustment::LastResortClamp {
            x: clamped.x,
            y: clamped.y,
        });
        clamped
    }
}
