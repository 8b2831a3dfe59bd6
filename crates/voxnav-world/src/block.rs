//! Block types and the registry that numbers them.

use std::collections::HashMap;

use voxnav_core::{Aabb, BlockPos};
use voxnav_paths::{AgentKind, BlockInfo, Material};

/// Index of a block type in a [`BlockRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: Self = Self(0);
    pub const STONE: Self = Self(1);
    pub const DIRT: Self = Self(2);
    pub const SLAB: Self = Self(3);
    pub const FENCE: Self = Self(4);
    pub const WATER: Self = Self(5);
    pub const LAVA: Self = Self(6);
    pub const ICE: Self = Self(7);
    pub const TALL_GRASS: Self = Self(8);
}

/// Static properties of one kind of block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockType {
    pub name: String,
    pub can_step: bool,
    pub liquid: bool,
    pub material: Material,
    /// Collision boxes relative to the block's minimum corner.
    pub collision_boxes: Vec<Aabb>,
    pub cost: f32,
    /// Cost overrides for specific agent kinds.
    pub agent_costs: Vec<(AgentKind, f32)>,
}

impl BlockType {
    /// A steppable, collision-free, zero-cost block.
    pub fn new(name: impl Into<String>, material: Material) -> Self {
        Self {
            name: name.into(),
            can_step: true,
            liquid: false,
            material,
            collision_boxes: Vec::new(),
            cost: 0.0,
            agent_costs: Vec::new(),
        }
    }

    /// A full solid cube.
    pub fn solid(name: impl Into<String>, material: Material) -> Self {
        Self::new(name, material).with_box(Aabb::FULL_BLOCK)
    }

    pub fn with_box(mut self, b: Aabb) -> Self {
        self.collision_boxes.push(b);
        self
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_agent_cost(mut self, agent: AgentKind, cost: f32) -> Self {
        self.agent_costs.push((agent, cost));
        self
    }

    pub fn liquid(mut self) -> Self {
        self.liquid = true;
        self
    }

    /// Agents may not stand on this block (fences, walls).
    pub fn not_steppable(mut self) -> Self {
        self.can_step = false;
        self
    }
}

impl BlockInfo for BlockType {
    fn can_step(&self) -> bool {
        self.can_step
    }

    fn is_liquid(&self) -> bool {
        self.liquid
    }

    fn material(&self) -> Material {
        self.material
    }

    fn collision_boxes(&self) -> &[Aabb] {
        &self.collision_boxes
    }

    fn traversal_cost(&self, _pos: BlockPos, agent: AgentKind) -> f32 {
        self.agent_costs
            .iter()
            .find(|(kind, _)| *kind == agent)
            .map_or(self.cost, |&(_, cost)| cost)
    }
}

/// Numbered set of block types. Id 0 is always air.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    types: Vec<BlockType>,
    by_name: HashMap<String, BlockId>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BlockRegistry {
    /// A registry holding only air.
    pub fn new() -> Self {
        let mut reg = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
        };
        reg.register(BlockType::new("air", Material::Air));
        reg
    }

    /// A registry with the built-in blocks at their [`BlockId`] constants.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.register(BlockType::solid("stone", Material::Stone));
        reg.register(BlockType::solid("dirt", Material::Soil));
        reg.register(
            BlockType::new("slab", Material::Stone)
                .with_box(Aabb::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0)),
        );
        reg.register(
            BlockType::new("fence", Material::Wood)
                .with_box(Aabb::new(0.375, 0.0, 0.375, 0.625, 1.5, 0.625))
                .not_steppable(),
        );
        reg.register(
            BlockType::new("water", Material::Liquid)
                .liquid()
                .with_cost(2.0)
                .with_agent_cost(AgentKind::LandCreature, 8.0),
        );
        reg.register(
            BlockType::new("lava", Material::Lava)
                .liquid()
                .with_cost(100_000.0)
                .with_agent_cost(AgentKind::HeatProof, 3.0),
        );
        reg.register(BlockType::solid("ice", Material::Ice).with_cost(0.5));
        reg.register(BlockType::new("tallgrass", Material::Plant).with_cost(0.2));
        reg
    }

    /// Add a block type, returning its id. Re-registering a name replaces
    /// the previous type under the same id.
    pub fn register(&mut self, block: BlockType) -> BlockId {
        if let Some(&id) = self.by_name.get(&block.name) {
            self.types[id.0 as usize] = block;
            return id;
        }
        let id = BlockId(self.types.len() as u16);
        self.by_name.insert(block.name.clone(), id);
        self.types.push(block);
        id
    }

    /// The block type for `id`; unknown ids resolve to air.
    #[inline]
    pub fn get(&self, id: BlockId) -> &BlockType {
        self.types.get(id.0 as usize).unwrap_or(&self.types[0])
    }

    pub fn id(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnav_paths::HAZARD_COST;

    #[test]
    fn builtin_ids_match_names() {
        let reg = BlockRegistry::with_defaults();
        assert_eq!(reg.id("air"), Some(BlockId::AIR));
        assert_eq!(reg.id("stone"), Some(BlockId::STONE));
        assert_eq!(reg.id("slab"), Some(BlockId::SLAB));
        assert_eq!(reg.id("fence"), Some(BlockId::FENCE));
        assert_eq!(reg.id("water"), Some(BlockId::WATER));
        assert_eq!(reg.id("lava"), Some(BlockId::LAVA));
        assert_eq!(reg.id("ice"), Some(BlockId::ICE));
        assert_eq!(reg.id("tallgrass"), Some(BlockId::TALL_GRASS));
        assert_eq!(reg.len(), 9);
    }

    #[test]
    fn unknown_id_is_air() {
        let reg = BlockRegistry::with_defaults();
        assert_eq!(reg.get(BlockId(999)).name, "air");
    }

    #[test]
    fn agent_cost_overrides() {
        let reg = BlockRegistry::with_defaults();
        let lava = reg.get(BlockId::LAVA);
        let p = BlockPos::ZERO;
        assert!(lava.traversal_cost(p, AgentKind::Default) > HAZARD_COST);
        assert!(lava.traversal_cost(p, AgentKind::Humanoid) > HAZARD_COST);
        assert!(lava.traversal_cost(p, AgentKind::HeatProof) < HAZARD_COST);
        let water = reg.get(BlockId::WATER);
        assert_eq!(water.traversal_cost(p, AgentKind::Default), 2.0);
        assert_eq!(water.traversal_cost(p, AgentKind::LandCreature), 8.0);
    }

    #[test]
    fn register_replaces_by_name() {
        let mut reg = BlockRegistry::new();
        let a = reg.register(BlockType::solid("brick", Material::Stone));
        let b = reg.register(BlockType::solid("brick", Material::Stone).with_cost(1.5));
        assert_eq!(a, b);
        assert_eq!(reg.get(a).cost, 1.5);
        assert_eq!(reg.len(), 2);
    }
}
