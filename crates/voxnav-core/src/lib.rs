//! Geometry types shared across the voxnav crates.
//!
//! This crate provides the value types the pathfinder and world storage
//! agree on: integer block positions, world-space points, collision boxes
//! and the movement directions between neighbouring cells.

pub mod aabb;
pub mod direction;
pub mod geom;

pub use aabb::Aabb;
pub use direction::Direction;
pub use geom::{BlockPos, Vec3};
