use voxnav_core::{Aabb, BlockPos, Vec3};

use crate::traits::AgentKind;

/// Expansion budget used when the caller does not set one.
pub const DEFAULT_SEARCH_DEPTH: usize = 9999;

/// Traversal costs above this value make a block impassable.
pub const HAZARD_COST: f32 = 10_000.0;

/// Largest agent box extent, in blocks, the search accepts.
pub const MAX_AGENT_SIZE: f64 = 100.0;

/// Slack when comparing accumulated costs, so float noise does not flip
/// equal routes back and forth.
pub const COST_EPSILON: f32 = 1e-4;

/// Inputs of one path search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    pub start: BlockPos,
    pub end: BlockPos,
    /// Blocks the agent may drop in one move.
    pub max_fall_height: i32,
    /// Height the agent can step up without jumping.
    pub step_height: f32,
    /// Agent collision box, relative to its feet.
    pub agent_box: Aabb,
    /// Node expansions allowed before giving up.
    pub search_depth: usize,
    /// When non-zero, any node within this many blocks of `end` on every
    /// axis counts as arrived.
    pub tolerance: i32,
    pub agent: AgentKind,
    /// Exact world-space target appended as the last waypoint. Defaults to
    /// the bottom centre of `end`.
    pub target_point: Option<Vec3>,
}

impl PathRequest {
    pub fn new(
        start: BlockPos,
        end: BlockPos,
        max_fall_height: i32,
        step_height: f32,
        agent_box: Aabb,
    ) -> Self {
        Self {
            start,
            end,
            max_fall_height,
            step_height,
            agent_box,
            search_depth: DEFAULT_SEARCH_DEPTH,
            tolerance: 0,
            agent: AgentKind::Default,
            target_point: None,
        }
    }

    pub fn with_search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_tolerance(mut self, blocks: i32) -> Self {
        self.tolerance = blocks;
        self
    }

    pub fn with_agent(mut self, agent: AgentKind) -> Self {
        self.agent = agent;
        self
    }

    pub fn with_target_point(mut self, target: Vec3) -> Self {
        self.target_point = Some(target);
        self
    }

    /// The final waypoint of a materialised path.
    pub fn final_point(&self) -> Vec3 {
        self.target_point.unwrap_or_else(|| self.end.bottom_center())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn request_round_trip() {
        let r = PathRequest::new(
            BlockPos::new(1, 70, -3),
            BlockPos::new(9, 68, 4),
            4,
            1.01,
            Aabb::centered(0.9, 1.3),
        )
        .with_agent(AgentKind::LandCreature)
        .with_tolerance(1);
        let json = serde_json::to_string(&r).unwrap();
        let back: PathRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
