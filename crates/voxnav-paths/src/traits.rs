use voxnav_core::{Aabb, BlockPos, Vec3};

/// Which storage layer a block lookup reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Terrain and placed blocks.
    Solid,
    /// Liquids and other fluid-layer blocks (water, lava, ice).
    Fluid,
    /// The solid block if it has collision geometry, otherwise the fluid
    /// block if it is a liquid, otherwise the solid block.
    MostSolid,
}

/// Coarse material class of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    #[default]
    Air,
    Soil,
    Stone,
    Wood,
    Plant,
    Liquid,
    Lava,
    Ice,
    Other,
}

/// Category of the agent a path is computed for.
///
/// Worlds use it to price terrain per agent; the search itself only treats
/// `Humanoid` specially (it refuses diagonal moves that brush past
/// hazardous fluid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    #[default]
    Default,
    LandCreature,
    Humanoid,
    HeatProof,
}

/// Read-only view of one block type as the search needs it.
pub trait BlockInfo {
    /// Whether an agent may stand on (or step onto) this block.
    fn can_step(&self) -> bool;

    fn is_liquid(&self) -> bool;

    fn material(&self) -> Material;

    /// Collision boxes relative to the block's minimum corner. Empty for
    /// blocks an agent walks through.
    fn collision_boxes(&self) -> &[Aabb];

    /// Extra cost for an agent of kind `agent` to occupy this block at
    /// `pos`. Anything above [`HAZARD_COST`](crate::HAZARD_COST) is
    /// impassable.
    fn traversal_cost(&self, pos: BlockPos, agent: AgentKind) -> f32;
}

/// World capability required by the pathfinder.
pub trait BlockAccess {
    type Block: BlockInfo;

    /// Establish a consistent read view. Called once at the start of every
    /// search, before any other query.
    fn begin_snapshot(&mut self) {}

    /// The block stored at `pos` in `layer`. Positions with nothing stored
    /// return an air-like block.
    fn block(&self, pos: BlockPos, layer: Layer) -> &Self::Block;

    /// The world-space block collision box that `agent`, placed with its
    /// feet at `at`, overlaps. When several overlap, the one reaching
    /// highest is returned.
    fn colliding_box(&self, agent: &Aabb, at: Vec3) -> Option<Aabb>;

    /// Whether `agent`, placed with its feet at `at`, overlaps any block.
    fn is_colliding(&self, agent: &Aabb, at: Vec3) -> bool {
        self.colliding_box(agent, at).is_some()
    }
}
