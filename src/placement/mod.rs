//! Placement engine for positioning furniture inside a rectangular room
//!
//! This module takes a tentative placement (typically suggested by a vision
//! model) and corrects it into one that stays clear of the walls and of the
//! furniture already in the room, with a cardinal rotation and a sane scale.

pub mod classify;
pub mod collision;
pub mod config;
pub mod geometry;
pub mod orientation;
pub mod report;
pub mod resolver;
pub mod types;

pub use classify::FurnitureKind;
pub use config::{ConfigError, PlacementConfig};
pub use geometry::{base_fit_scale, snap_rotation, to_normalized, to_world, CARDINAL_ROTATIONS};
pub use report::Adjustment;
pub use resolver::{resolve, PlacementResolver, Resolution};
pub use types::*;
