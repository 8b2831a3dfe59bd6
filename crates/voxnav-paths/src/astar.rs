use std::collections::HashSet;

use rand::Rng;
use voxnav_core::{BlockPos, Direction, Vec3};

use crate::distance::octile;
use crate::error::{PathError, validate_agent_box};
use crate::node::{NodeId, PathNode};
use crate::openset::OpenSet;
use crate::request::{COST_EPSILON, PathRequest};
use crate::traits::BlockAccess;
use crate::traverse::Traversal;
use crate::waypoint::{Jitter, to_waypoints};

/// How the last search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// No search has run yet.
    #[default]
    Idle,
    /// The target (or a node within tolerance) was reached.
    Found,
    /// Every reachable node was expanded without reaching the target.
    Exhausted,
    /// More than `search_depth` nodes would have been expanded.
    BudgetExceeded,
    /// The request was refused before searching.
    Rejected,
}

/// Reusable A* search over a block world.
///
/// A `PathFinder` owns its node arena, open and closed sets, and the random
/// source for per-search jitter. Every call resets that state first, so one
/// instance can serve any number of sequential searches. It is not meant
/// to be shared: give each concurrent caller its own instance.
pub struct PathFinder<R: Rng> {
    rng: R,
    nodes: Vec<PathNode>,
    open: OpenSet,
    closed: HashSet<BlockPos>,
    jitter: Jitter,
    nodes_checked: usize,
    outcome: SearchOutcome,
}

impl<R: Rng> PathFinder<R> {
    /// Create a new path finder drawing jitter from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            nodes: Vec::new(),
            open: OpenSet::new(),
            closed: HashSet::new(),
            jitter: Jitter::CENTER,
            nodes_checked: 0,
            outcome: SearchOutcome::Idle,
        }
    }

    /// Nodes expanded by the last search. Never more than
    /// `search_depth + 1`.
    #[inline]
    pub fn nodes_checked(&self) -> usize {
        self.nodes_checked
    }

    #[inline]
    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    /// Cell offset used by the last search for collision tests and
    /// waypoints.
    #[inline]
    pub fn jitter(&self) -> Jitter {
        self.jitter
    }

    /// Find a path, returning the nodes after the start up to and including
    /// the arrival node.
    ///
    /// Returns `None` when no route exists, when the expansion budget runs
    /// out, or when the request is malformed (logged as a warning).
    pub fn find_path<W: BlockAccess>(
        &mut self,
        world: &mut W,
        req: &PathRequest,
    ) -> Option<Vec<PathNode>> {
        match self.try_find_path(world, req) {
            Ok(path) => path,
            Err(err) => {
                log::warn!("find_path from {} to {}: {err}; ignoring", req.start, req.end);
                None
            }
        }
    }

    /// Like [`find_path`](Self::find_path), but converts the result into
    /// world-space waypoints ending at the request's final point.
    pub fn find_path_as_waypoints<W: BlockAccess>(
        &mut self,
        world: &mut W,
        req: &PathRequest,
    ) -> Option<Vec<Vec3>> {
        let path = self.find_path(world, req)?;
        Some(to_waypoints(&path, self.jitter, req.final_point()))
    }

    /// Like [`find_path`](Self::find_path), but reports malformed requests
    /// as errors instead of logging them.
    pub fn try_find_path<W: BlockAccess>(
        &mut self,
        world: &mut W,
        req: &PathRequest,
    ) -> Result<Option<Vec<PathNode>>, PathError> {
        self.reset();
        if let Err(err) = validate_agent_box(&req.agent_box) {
            self.outcome = SearchOutcome::Rejected;
            return Err(err);
        }

        world.begin_snapshot();
        self.jitter = Jitter::random(&mut self.rng);

        let traversal = Traversal {
            world: &*world,
            agent_box: &req.agent_box,
            agent: req.agent,
            step_height: req.step_height,
            max_fall_height: req.max_fall_height,
            jitter: self.jitter,
        };

        let mut start = PathNode::new(req.start);
        start.h = octile(req.start, req.end);
        self.nodes.push(start);
        self.open.add(&self.nodes, 0);

        let outcome = 'search: loop {
            if self.nodes_checked > req.search_depth {
                break 'search Err(SearchOutcome::BudgetExceeded);
            }
            let Some(ci) = self.open.remove_nearest(&self.nodes) else {
                break 'search Err(SearchOutcome::Exhausted);
            };
            self.nodes_checked += 1;

            let current = self.nodes[ci];
            self.closed.insert(current.pos);

            if arrived(current.pos, req.end, req.tolerance) {
                break 'search Ok(ci);
            }

            for dir in Direction::HORIZONTAL {
                self.expand(&traversal, ci, dir, req.end);
            }
        };

        match outcome {
            Ok(goal) => {
                self.outcome = SearchOutcome::Found;
                log::debug!(
                    "path {} -> {}: found {} steps, {} nodes checked",
                    req.start,
                    req.end,
                    self.nodes[goal].path_length,
                    self.nodes_checked
                );
                Ok(Some(self.retrace(goal)))
            }
            Err(end_state) => {
                self.outcome = end_state;
                log::debug!(
                    "path {} -> {}: none ({:?}), {} nodes checked",
                    req.start,
                    req.end,
                    end_state,
                    self.nodes_checked
                );
                Ok(None)
            }
        }
    }

    /// Clear all per-search state, keeping allocations.
    fn reset(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.closed.clear();
        self.nodes_checked = 0;
        self.outcome = SearchOutcome::Idle;
    }

    /// Consider the neighbour of node `ci` in direction `dir`.
    fn expand<W: BlockAccess>(
        &mut self,
        traversal: &Traversal<'_, W>,
        ci: NodeId,
        dir: Direction,
        target: BlockPos,
    ) {
        let current = self.nodes[ci];
        let mut neighbor = PathNode::from_parent(&current, dir);
        let nominal = neighbor.pos;
        let step = current.distance_to(&neighbor);
        let base = current.g + step;

        if let Some(ei) = self.open.find(nominal) {
            // Only pay for a traversal check when it could improve things.
            if self.nodes[ei].g <= base + COST_EPSILON {
                return;
            }
            let Some(extra) = traversal.check(&mut neighbor, dir) else {
                return;
            };
            if neighbor.pos == nominal && self.nodes[ei].g > base + extra + COST_EPSILON {
                self.relink(ei, ci, step + extra, neighbor);
            }
            return;
        }
        if self.closed.contains(&nominal) {
            return;
        }

        let Some(extra) = traversal.check(&mut neighbor, dir) else {
            return;
        };

        // The move may have landed above or below the nominal cell.
        if neighbor.pos != nominal {
            if self.closed.contains(&neighbor.pos) {
                return;
            }
            if let Some(ei) = self.open.find(neighbor.pos) {
                if self.nodes[ei].g > base + extra + COST_EPSILON {
                    self.relink(ei, ci, step + extra, neighbor);
                }
                return;
            }
        }

        neighbor.link(ci, &current, step + extra);
        neighbor.h = octile(neighbor.pos, target);
        let id = self.nodes.len();
        self.nodes.push(neighbor);
        self.open.add(&self.nodes, id);
    }

    /// Route queued node `ei` through node `ci` at a lower cost.
    fn relink(&mut self, ei: NodeId, ci: NodeId, step_cost: f32, resolved: PathNode) {
        let parent = self.nodes[ci];
        let node = &mut self.nodes[ei];
        node.link(ci, &parent, step_cost);
        node.action = resolved.action;
        self.open.decrease_key(&self.nodes, ei);
    }

    /// Walk parent links back from `goal`, excluding the start node.
    fn retrace(&self, goal: NodeId) -> Vec<PathNode> {
        let len = self.nodes[goal].path_length as usize;
        let mut path = vec![self.nodes[goal]; len];
        let mut ci = goal;
        for slot in path.iter_mut().rev() {
            *slot = self.nodes[ci];
            match self.nodes[ci].parent {
                Some(p) => ci = p,
                None => break,
            }
        }
        path
    }
}

/// Goal test: exact match, or within `tolerance` on every axis.
fn arrived(pos: BlockPos, end: BlockPos, tolerance: i32) -> bool {
    if pos == end {
        return true;
    }
    // Nodes up to 4 blocks above the target are not accepted.
    tolerance != 0
        && (pos.x - end.x).abs() <= tolerance
        && (pos.z - end.z).abs() <= tolerance
        && (pos.y - end.y).abs() <= tolerance
}
