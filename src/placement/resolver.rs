//! The placement resolution pipeline
//!
//! A raw candidate goes through a fixed sequence of steps, each taking the
//! current position and returning a corrected one:
//!
//! 1. clamp the scale
//! 2. compute the footprint-aware safe zone
//! 3. clamp the position into the safe zone
//! 4. push away from existing items (bounded passes)
//! 5. validate, falling back to canonical positions if needed
//! 6. apply furniture orientation rules (couch wall-seeking or centre nudge)
//! 7. clamp and round the position
//! 8. snap the rotation to a cardinal angle, then stop furniture from
//!    facing into its nearest wall
//!
//! Later steps assume the earlier ones already ran. Rotation is snapped
//! once, after every positional adjustment.

use tracing::debug;

use super::classify::FurnitureKind;
use super::collision::CollisionModel;
use super::config::PlacementConfig;
use super::geometry::{clamp_scale, finite_or, round3_within, safe_zone, snap_rotation};
use super::orientation::{avoid_facing_wall, nudge_off_center, seek_wall};
use super::report::{record, Adjustment};
use super::types::{CandidatePlacement, NormalizedPoint, RoomContext};

/// A resolved placement together with the corrections that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub placement: CandidatePlacement,
    pub adjustments: Vec<Adjustment>,
}

/// Corrects raw placements into safe, wall-aware ones
///
/// Stateless apart from its configuration; one resolver can serve any
/// number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct PlacementResolver {
    config: PlacementConfig,
}

impl PlacementResolver {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Resolve a candidate placement. Never fails.
    pub fn resolve(&self, candidate: &CandidatePlacement, ctx: &RoomContext) -> CandidatePlacement {
        self.resolve_with_report(candidate, ctx).placement
    }

    /// Resolve a candidate placement and report every correction applied
    pub fn resolve_with_report(
        &self,
        candidate: &CandidatePlacement,
        ctx: &RoomContext,
    ) -> Resolution {
        let config = &self.config;
        let mut adjustments = Vec::new();
        let kind = FurnitureKind::classify(&ctx.label);
        debug!(label = %ctx.label, %kind, items = ctx.existing_items.len(), "resolving placement");

        let scale = clamp_scale(candidate.scale, config);
        if scale != candidate.scale {
            record(
                &mut adjustments,
                Adjustment::ScaleClamped {
                    from: candidate.scale,
                    to: scale,
                },
            );
        }

        let zone = safe_zone(ctx, scale, config);
        let mut rotation = finite_or(candidate.rotation, 0.0);

        let mut position = NormalizedPoint::new(finite_or(candidate.x, 0.5), finite_or(candidate.y, 0.5));
        if !zone.contains(position) {
            position = zone.clamp(position);
            record(
                &mut adjustments,
                Adjustment::ClampedToSafeZone {
                    x: position.x,
                    y: position.y,
                },
            );
        }

        let model = CollisionModel::new(ctx, zone, scale, config);
        position = model.separate(position, &mut adjustments);
        position = model.find_valid(position, &config.fallback_positions, &mut adjustments);

        if kind.is_couch() {
            let (snapped, facing) = seek_wall(position, &model, config, &mut adjustments);
            position = snapped;
            rotation = facing;
        } else {
            position = nudge_off_center(position, &model, config, &mut adjustments);
        }

        position = zone.clamp(position);
        let position = NormalizedPoint::new(
            round3_within(position.x, zone.min_x, zone.max_x),
            round3_within(position.y, zone.min_y, zone.max_y),
        );

        let snapped = snap_rotation(rotation);
        if snapped != rotation {
            record(
                &mut adjustments,
                Adjustment::RotationSnapped {
                    from: rotation,
                    to: snapped,
                },
            );
        }
        rotation = snapped;
        // Judged on the final rounded position so the output never faces a wall
        if kind.is_furniture() {
            rotation = avoid_facing_wall(position, rotation, &mut adjustments);
        }

        let placement = CandidatePlacement {
            x: position.x,
            y: position.y,
            rotation,
            scale: round3_within(scale, config.min_scale, config.max_scale),
            reasoning: Some(
                candidate
                    .reasoning
                    .clone()
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| config.default_reasoning.clone()),
            ),
        };
        debug!(
            x = placement.x,
            y = placement.y,
            rotation = placement.rotation,
            scale = placement.scale,
            adjustments = adjustments.len(),
            "placement resolved"
        );
        Resolution {
            placement,
            adjustments,
        }
    }
}

/// Resolve with the default configuration
pub fn resolve(candidate: &CandidatePlacement, ctx: &RoomContext) -> CandidatePlacement {
    PlacementResolver::default().resolve(candidate, ctx)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::placement::geometry::{is_cardinal, to_world};
    use crate::placement::types::{ExistingItem, ModelDimensions, WorldPoint};

    fn room() -> RoomContext {
        RoomContext::new(4.0, 4.0)
    }

    #[test]
    fn test_chair_scenario() {
        let ctx = room().with_label("chair");
        let out = resolve(&CandidatePlacement::new(0.5, 0.5, 0.3, 50.0), &ctx);
        assert_eq!(out.scale, 4.0);
        assert_eq!(out.rotation, 0.0);
        assert_eq!(out.x, 0.4);
        assert_eq!(out.y, 0.4);
    }

    #[test]
    fn test_couch_scenario() {
        let ctx = room().with_label("couch");
        let out = resolve(&CandidatePlacement::centered(), &ctx);
        assert_eq!(out.x, 0.25);
        assert_eq!(out.y, 0.09);
        assert_eq!(out.rotation, 0.0);
        assert_eq!(out.scale, 1.0);
    }

    #[test]
    fn test_non_finite_inputs_coerced() {
        let ctx = room().with_label("plant");
        let out = resolve(
            &CandidatePlacement::new(f64::NAN, f64::INFINITY, f64::NAN, f64::NEG_INFINITY),
            &ctx,
        );
        // Centre, then nudged toward the back-left
        assert_eq!(out.x, 0.4);
        assert_eq!(out.y, 0.4);
        assert_eq!(out.rotation, 0.0);
        assert_eq!(out.scale, 1.0);
    }

    #[test]
    fn test_out_of_range_position_clamped() {
        let ctx = room().with_label("lamp");
        let resolution = PlacementResolver::default()
            .resolve_with_report(&CandidatePlacement::new(-2.0, 1.7, 0.0, 1.0), &ctx);
        assert_eq!(resolution.placement.x, 0.05);
        assert_eq!(resolution.placement.y, 0.95);
        assert!(matches!(
            resolution.adjustments[0],
            Adjustment::ClampedToSafeZone { .. }
        ));
    }

    #[test]
    fn test_reasoning_passthrough_and_default() {
        let ctx = room();
        let out = resolve(
            &CandidatePlacement::new(0.3, 0.3, 0.0, 1.0).with_reasoning("near the window"),
            &ctx,
        );
        assert_eq!(out.reasoning.as_deref(), Some("near the window"));

        let out = resolve(&CandidatePlacement::new(0.3, 0.3, 0.0, 1.0), &ctx);
        assert_eq!(
            out.reasoning.as_deref(),
            Some(PlacementConfig::default().default_reasoning.as_str())
        );
    }

    #[test]
    fn test_already_valid_candidate_is_unchanged() {
        let ctx = room()
            .with_label("floor lamp")
            .with_item(ExistingItem::new(1.0, 0.0, 1.0));
        let candidate = CandidatePlacement::new(0.3, 0.7, FRAC_PI_2, 1.0).with_reasoning("corner");
        let resolution = PlacementResolver::default().resolve_with_report(&candidate, &ctx);
        assert_eq!(resolution.placement, candidate);
        assert!(resolution.adjustments.is_empty());
    }

    #[test]
    fn test_resolution_is_stable() {
        let ctx = room()
            .with_label("armchair")
            .with_model_dimensions(ModelDimensions::new(0.9, 0.8))
            .with_item(ExistingItem::new(0.2, 0.0, 0.1));
        let once = resolve(&CandidatePlacement::new(0.55, 0.48, 2.0, 1.3), &ctx);
        let twice = resolve(&once, &ctx);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_couch_avoids_item_on_quarter_point() {
        // Existing item exactly where the back-wall quarter point lands
        let ctx = room()
            .with_label("couch")
            .with_item(ExistingItem::new(-1.0, 0.0, -1.64));
        let resolution =
            PlacementResolver::default().resolve_with_report(&CandidatePlacement::centered(), &ctx);
        let out = &resolution.placement;
        assert_eq!((out.x, out.y), (0.75, 0.09));
        assert_eq!(out.rotation, 0.0);
        let world = to_world(NormalizedPoint::new(out.x, out.y), &ctx);
        assert!(world.distance_to(WorldPoint::new(-1.0, -1.64)) >= 0.56);
        assert!(resolution
            .adjustments
            .iter()
            .any(|a| matches!(a, Adjustment::WallSpotBlocked { .. })));
    }

    #[test]
    fn test_deep_couch_resolution_is_stable() {
        let ctx = room()
            .with_label("couch")
            .with_model_dimensions(ModelDimensions::new(0.4, 2.4));
        let once = resolve(&CandidatePlacement::new(0.45, 0.35, 0.0, 1.0), &ctx);
        assert_eq!((once.x, once.y), (0.345, 0.34));
        assert_eq!(once.rotation, 0.0);
        let twice = resolve(&once, &ctx);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unvalidated_margins_do_not_panic() {
        let mut config = PlacementConfig::default();
        config.wall_margin = 0.6;
        config.max_wall_margin = 0.7;
        let ctx = room()
            .with_label("lamp")
            .with_item(ExistingItem::new(0.5, 0.0, 0.5));
        let out = PlacementResolver::new(config)
            .resolve(&CandidatePlacement::new(0.1, 0.9, 0.0, 1.0), &ctx);
        assert_eq!((out.x, out.y), (0.5, 0.5));
    }

    #[test]
    fn test_collision_resolved_with_footprint() {
        let dims = ModelDimensions::new(0.8, 0.6);
        let ctx = room()
            .with_label("side table")
            .with_model_dimensions(dims)
            .with_item(ExistingItem::new(0.0, 0.0, 0.0));
        let out = resolve(&CandidatePlacement::new(0.52, 0.5, 0.0, 1.0), &ctx);
        let world = to_world(NormalizedPoint::new(out.x, out.y), &ctx);
        // 0.4 own radius + 0.16 default radius + 0.24 clearance
        assert!(world.distance_to(WorldPoint::new(0.0, 0.0)) >= 0.8 - 1e-3);
    }

    #[test]
    fn test_furniture_turned_away_from_wall() {
        let ctx = room().with_label("Desk");
        let out = resolve(&CandidatePlacement::new(0.5, 0.9, 0.1, 1.0), &ctx);
        assert_eq!(out.rotation, PI);
    }

    #[test]
    fn test_non_furniture_may_face_wall() {
        let ctx = room().with_label("plant");
        let out = resolve(&CandidatePlacement::new(0.5, 0.9, 0.1, 1.0), &ctx);
        assert_eq!(out.rotation, 0.0);
    }

    #[test]
    fn test_rotation_closure() {
        let ctx = room().with_label("bed");
        let mut r = -10.0;
        while r < 10.0 {
            let out = resolve(&CandidatePlacement::new(0.2, 0.8, r, 1.0), &ctx);
            assert!(is_cardinal(out.rotation), "rotation {} -> {}", r, out.rotation);
            r += 0.37;
        }
    }

    #[test]
    fn test_huge_item_stays_inside_capped_zone() {
        let ctx = room()
            .with_label("bookshelf")
            .with_model_dimensions(ModelDimensions::new(10.0, 10.0));
        let out = resolve(&CandidatePlacement::new(0.1, 0.9, 0.0, 4.0), &ctx);
        assert!(out.x >= 0.45 && out.x <= 0.55);
        assert!(out.y >= 0.45 && out.y <= 0.55);
    }

    #[test]
    fn test_zero_sized_room_does_not_panic() {
        let ctx = RoomContext::new(0.0, 0.0)
            .with_label("sofa")
            .with_model_dimensions(ModelDimensions::new(1.0, 1.0))
            .with_item(ExistingItem::new(0.0, 0.0, 0.0));
        let out = resolve(&CandidatePlacement::new(0.7, 0.2, 1.0, 1.0), &ctx);
        assert!(out.x >= 0.05 && out.x <= 0.95);
        assert!(out.y >= 0.05 && out.y <= 0.95);
        assert!(is_cardinal(out.rotation));
    }
}
