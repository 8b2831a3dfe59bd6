//! Move legality and extra cost for an agent walking through blocks.
//!
//! A candidate node starts at its nominal grid offset from the parent. If
//! the agent fits there it may drop down onto the first standable surface
//! (or float on a liquid); if it does not fit it may step up onto whatever
//! blocks it. Either way the node's `pos` is rewritten to the landing cell.

use voxnav_core::{Aabb, BlockPos, Direction, Vec3};

use crate::node::{Action, PathNode};
use crate::request::HAZARD_COST;
use crate::traits::{AgentKind, BlockAccess, BlockInfo, Layer, Material};
use crate::waypoint::Jitter;

/// Lift applied above a stepped-on surface before re-testing clearance.
const STEP_CLEARANCE: f64 = 0.01;

/// Tolerance on the step height check.
const STEP_SLACK: f64 = 1e-4;

/// Agent parameters and world view for the moves of one search.
pub(crate) struct Traversal<'a, W: BlockAccess> {
    pub(crate) world: &'a W,
    pub(crate) agent_box: &'a Aabb,
    pub(crate) agent: AgentKind,
    pub(crate) step_height: f32,
    pub(crate) max_fall_height: i32,
    pub(crate) jitter: Jitter,
}

/// `Some(cost)` unless the cost marks the block impassable.
#[inline]
fn passable(cost: f32) -> Option<f32> {
    (cost <= HAZARD_COST).then_some(cost)
}

impl<W: BlockAccess> Traversal<'_, W> {
    /// Decide whether `node`, reached by moving in `dir`, is enterable.
    ///
    /// Returns the extra cost on top of the move's distance, or `None` when
    /// the move is illegal. On success `node.pos` and `node.action` describe
    /// where and how the agent actually lands.
    pub(crate) fn check(&self, node: &mut PathNode, dir: Direction) -> Option<f32> {
        if self.collides_at(node.pos, 0.0) {
            return self.step_up(node, dir);
        }

        // Corners are tested at the height the agent leaves from, before
        // any fall.
        if dir.is_diagonal() && !self.squeezes(node.pos, 0.0, dir) {
            return None;
        }

        let mut extra = self.descend(node)?;

        let here = node.pos;
        extra += passable(self.cost(here, Layer::MostSolid))?;

        // Humanoids do not cut a corner past lava even when the centre line
        // is clear.
        if dir.is_diagonal() && self.agent == AgentKind::Humanoid {
            let n = dir.normal();
            for side in [here.offset(-n.x, 0, 0), here.offset(0, 0, -n.z)] {
                extra += passable(self.cost(side, Layer::Fluid))?;
            }
        }

        Some(extra)
    }

    /// Fall from `node.pos` until something standable is below.
    fn descend(&self, node: &mut PathNode) -> Option<f32> {
        let mut descended = 0;
        loop {
            let below = node.pos.below();
            let solid = self.world.block(below, Layer::Solid);
            if !solid.can_step() {
                return None;
            }

            let fluid = self.world.block(below, Layer::Fluid);
            if fluid.is_liquid() {
                let cost = passable(fluid.traversal_cost(below, self.agent))?;
                node.action = Action::Swim;
                return Some(cost);
            }

            // Ice lives in the fluid layer but is walked on like a solid.
            let ground = if fluid.material() == Material::Ice {
                fluid
            } else {
                solid
            };
            if !ground.collision_boxes().is_empty() {
                return passable(ground.traversal_cost(below, self.agent));
            }

            if self.collides_at(below, 0.0) {
                return Some(0.0);
            }
            if descended >= self.max_fall_height {
                return None;
            }
            node.pos = below;
            node.action = Action::Fall;
            descended += 1;
        }
    }

    /// Climb onto the obstacle occupying `node.pos`.
    fn step_up(&self, node: &mut PathNode, dir: Direction) -> Option<f32> {
        let pos = node.pos;
        let ground = self.world.block(pos, Layer::MostSolid);
        if !ground.can_step() {
            return None;
        }
        // A fence top poking into the cell is not something to stand on.
        if !self.world.block(pos.below(), Layer::Solid).can_step() {
            return None;
        }
        let extra = passable(ground.traversal_cost(pos, self.agent))?;
        passable(self.cost(pos, Layer::Fluid))?;

        // Only climb as high as the obstacle's top: half a block for a slab.
        let step = self.step_height as f64;
        let rise = match self.world.colliding_box(self.agent_box, self.jitter.apply(pos)) {
            Some(hit) => (hit.max.y - pos.y as f64).max(0.0),
            None => step,
        };
        if rise > step + STEP_SLACK {
            return None;
        }

        let lift = rise + STEP_CLEARANCE;
        if self.collides_at(pos, lift) {
            return None;
        }
        if dir.is_diagonal() && !self.squeezes(pos, lift, dir) {
            return None;
        }

        node.pos.y = (pos.y as f64 + lift).floor() as i32;
        node.action = Action::Climb;
        Some(extra)
    }

    /// Whether the agent fits half a block back towards where it came from,
    /// so diagonal moves cannot clip through wall corners.
    fn squeezes(&self, pos: BlockPos, lift: f64, dir: Direction) -> bool {
        let n = dir.normal();
        let at = self
            .jitter
            .apply(pos)
            .offset(-n.x as f64 * 0.5, lift, -n.z as f64 * 0.5);
        !self.world.is_colliding(self.agent_box, at)
    }

    #[inline]
    fn collides_at(&self, pos: BlockPos, lift: f64) -> bool {
        let at: Vec3 = self.jitter.apply(pos).offset(0.0, lift, 0.0);
        self.world.is_colliding(self.agent_box, at)
    }

    #[inline]
    fn cost(&self, pos: BlockPos, layer: Layer) -> f32 {
        self.world.block(pos, layer).traversal_cost(pos, self.agent)
    }
}
