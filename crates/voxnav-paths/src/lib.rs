//! A* pathfinding for agents moving through block worlds.
//!
//! The search works on block cells but decides legality the way a physical
//! agent would: it tests the agent's collision box against the world, steps
//! up onto low obstacles, drops down ledges up to a fall limit, floats on
//! liquids and refuses hazardous terrain.
//!
//! - [`PathFinder`] owns the reusable search state and runs searches.
//! - [`PathRequest`] describes one search (endpoints, agent shape, budget).
//! - [`BlockAccess`] and [`BlockInfo`] are what a world must provide.
//! - [`OpenSet`] is the bucketed priority structure behind the search.
//!
//! Searches are synchronous and single-threaded. Use one `PathFinder` per
//! concurrent caller.

mod astar;
mod distance;
mod error;
mod node;
mod openset;
mod request;
mod traits;
mod traverse;
mod waypoint;

#[cfg(test)]
mod testworld;

pub use astar::{PathFinder, SearchOutcome};
pub use distance::{DIAGONAL_COST, chebyshev, octile};
pub use error::PathError;
pub use node::{Action, NodeId, PathNode};
pub use openset::OpenSet;
pub use request::{COST_EPSILON, DEFAULT_SEARCH_DEPTH, HAZARD_COST, MAX_AGENT_SIZE, PathRequest};
pub use traits::{AgentKind, BlockAccess, BlockInfo, Layer, Material};
pub use waypoint::{Jitter, to_waypoints};
