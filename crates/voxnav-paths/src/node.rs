use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use voxnav_core::{BlockPos, Direction};

use crate::distance::octile;

/// Index of a node in the search's node arena.
pub type NodeId = usize;

/// How the agent reaches a node from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    #[default]
    Walk,
    /// Stepped up onto a block.
    Climb,
    /// Dropped at least one block.
    Fall,
    /// Floating on a liquid surface.
    Swim,
}

/// A grid cell visited or queued during a search.
///
/// Equality and hashing look at `pos` only: the open set must find "the node
/// at this position" whatever cost it currently carries.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: BlockPos,
    /// Accumulated cost from the start.
    pub g: f32,
    /// Heuristic estimate to the target.
    pub h: f32,
    /// Number of moves from the start node.
    pub path_length: u32,
    pub action: Action,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) parent: Option<NodeId>,
}

impl PathNode {
    /// A fresh node with zero cost and no parent.
    pub fn new(pos: BlockPos) -> Self {
        Self {
            pos,
            g: 0.0,
            h: 0.0,
            path_length: 0,
            action: Action::Walk,
            parent: None,
        }
    }

    /// The neighbour of `parent` one move in `dir`.
    ///
    /// Costs are left at zero; the search assigns them once the move is
    /// known to be legal.
    pub fn from_parent(parent: &PathNode, dir: Direction) -> Self {
        let action = match dir {
            Direction::Up => Action::Climb,
            Direction::Down => Action::Fall,
            _ => Action::Walk,
        };
        Self {
            pos: parent.pos + dir.normal(),
            g: 0.0,
            h: 0.0,
            path_length: parent.path_length + 1,
            action,
            parent: None,
        }
    }

    /// Total estimated cost through this node.
    #[inline]
    pub fn f(&self) -> f32 {
        self.g + self.h
    }

    /// Horizontal octile distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &PathNode) -> f32 {
        octile(self.pos, other.pos)
    }

    /// Arena id of the node this one was reached from.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Search priority: lower `f` first, then lower `h`.
    #[inline]
    pub fn cost_cmp(&self, other: &PathNode) -> Ordering {
        self.f()
            .total_cmp(&other.f())
            .then_with(|| self.h.total_cmp(&other.h))
    }

    /// Attach this node below `parent`, reached at `step_cost`.
    pub(crate) fn link(&mut self, parent_id: NodeId, parent: &PathNode, step_cost: f32) {
        self.g = parent.g + step_cost;
        self.parent = Some(parent_id);
        self.path_length = parent.path_length + 1;
    }
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for PathNode {}

impl Hash for PathNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}
