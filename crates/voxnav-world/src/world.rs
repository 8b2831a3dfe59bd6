//! Sparse layered voxel storage.

use std::collections::HashMap;

use voxnav_core::{Aabb, BlockPos, Vec3};
use voxnav_paths::{BlockAccess, BlockInfo, Layer};

use crate::block::{BlockId, BlockRegistry, BlockType};

/// How many cells above its own a block's collision box can reach into.
const TALL_BOX_REACH: i32 = 1;

/// A block world with a solid and a fluid layer.
///
/// Unset cells are air, except below an optional infinite floor. Cells are
/// stored sparsely, so worlds can be as large as `i32` coordinates allow.
#[derive(Debug, Clone)]
pub struct VoxelWorld {
    registry: BlockRegistry,
    solid: HashMap<BlockPos, BlockId>,
    fluid: HashMap<BlockPos, BlockId>,
    floor: Option<(i32, BlockId)>,
    snapshots: u64,
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::new(BlockRegistry::with_defaults())
    }
}

impl VoxelWorld {
    /// An empty world using the given block types.
    pub fn new(registry: BlockRegistry) -> Self {
        Self {
            registry,
            solid: HashMap::new(),
            fluid: HashMap::new(),
            floor: None,
            snapshots: 0,
        }
    }

    /// Fill every solid cell with `y <= top` that was not explicitly set
    /// with `block`.
    pub fn with_floor(mut self, top: i32, block: BlockId) -> Self {
        self.floor = Some((top, block));
        self
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BlockRegistry {
        &mut self.registry
    }

    /// Number of searches that have taken a snapshot of this world.
    pub fn snapshots(&self) -> u64 {
        self.snapshots
    }

    /// Solid block id at `pos`.
    pub fn solid(&self, pos: BlockPos) -> BlockId {
        match self.solid.get(&pos) {
            Some(&id) => id,
            None => match self.floor {
                Some((top, id)) if pos.y <= top => id,
                _ => BlockId::AIR,
            },
        }
    }

    /// Fluid block id at `pos`.
    pub fn fluid(&self, pos: BlockPos) -> BlockId {
        self.fluid.get(&pos).copied().unwrap_or(BlockId::AIR)
    }

    /// Set the solid block at `pos`. Setting air below the floor carves a
    /// hole in it.
    pub fn set_solid(&mut self, pos: BlockPos, id: BlockId) -> &mut Self {
        let under_floor = self.floor.is_some_and(|(top, _)| pos.y <= top);
        if id == BlockId::AIR && !under_floor {
            self.solid.remove(&pos);
        } else {
            self.solid.insert(pos, id);
        }
        self
    }

    pub fn set_fluid(&mut self, pos: BlockPos, id: BlockId) -> &mut Self {
        if id == BlockId::AIR {
            self.fluid.remove(&pos);
        } else {
            self.fluid.insert(pos, id);
        }
        self
    }

    /// Set the solid block in every cell of the inclusive box `a..=b`.
    pub fn fill_solid(&mut self, a: BlockPos, b: BlockPos, id: BlockId) -> &mut Self {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    self.set_solid(BlockPos::new(x, y, z), id);
                }
            }
        }
        self
    }

    /// Reset both layers at `pos` to air.
    pub fn clear(&mut self, pos: BlockPos) -> &mut Self {
        self.set_fluid(pos, BlockId::AIR);
        self.set_solid(pos, BlockId::AIR)
    }

    fn solid_type(&self, pos: BlockPos) -> &BlockType {
        self.registry.get(self.solid(pos))
    }

    fn fluid_type(&self, pos: BlockPos) -> &BlockType {
        self.registry.get(self.fluid(pos))
    }
}

impl BlockAccess for VoxelWorld {
    type Block = BlockType;

    fn begin_snapshot(&mut self) {
        self.snapshots += 1;
        log::trace!("world snapshot {}", self.snapshots);
    }

    fn block(&self, pos: BlockPos, layer: Layer) -> &BlockType {
        match layer {
            Layer::Solid => self.solid_type(pos),
            Layer::Fluid => self.fluid_type(pos),
            Layer::MostSolid => {
                let solid = self.solid_type(pos);
                let fluid = self.fluid_type(pos);
                let fluid_wins = fluid.is_liquid() || !fluid.collision_boxes().is_empty();
                if solid.collision_boxes().is_empty() && fluid_wins {
                    fluid
                } else {
                    solid
                }
            }
        }
    }

    fn colliding_box(&self, agent: &Aabb, at: Vec3) -> Option<Aabb> {
        let placed = agent.translate(at);
        let lo = BlockPos::containing(placed.min);
        let hi = BlockPos::containing(placed.max);
        let mut best: Option<Aabb> = None;
        for x in lo.x..=hi.x {
            // Boxes may rise up to a block above their own cell (fences).
            for y in lo.y - TALL_BOX_REACH..=hi.y {
                for z in lo.z..=hi.z {
                    let pos = BlockPos::new(x, y, z);
                    let layers = [self.solid_type(pos), self.fluid_type(pos)];
                    for b in layers.iter().flat_map(|b| b.collision_boxes()) {
                        let world = b.translate(pos.to_vec3());
                        if world.intersects(&placed)
                            && best.is_none_or(|cur| world.max.y > cur.max.y)
                        {
                            best = Some(world);
                        }
                    }
                }
            }
        }
        best
    }
}
