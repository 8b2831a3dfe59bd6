//! Small block world used by this crate's unit tests.

use std::collections::HashMap;

use voxnav_core::{Aabb, BlockPos, Vec3};

use crate::traits::{AgentKind, BlockAccess, BlockInfo, Layer, Material};

#[derive(Debug, Clone)]
pub(crate) struct TestBlock {
    pub can_step: bool,
    pub liquid: bool,
    pub material: Material,
    pub boxes: Vec<Aabb>,
    pub cost: f32,
}

impl TestBlock {
    pub fn air() -> Self {
        Self {
            can_step: true,
            liquid: false,
            material: Material::Air,
            boxes: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn stone() -> Self {
        Self {
            material: Material::Stone,
            boxes: vec![Aabb::FULL_BLOCK],
            ..Self::air()
        }
    }

    pub fn slab() -> Self {
        Self {
            boxes: vec![Aabb::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0)],
            ..Self::stone()
        }
    }

    pub fn fence() -> Self {
        Self {
            can_step: false,
            material: Material::Wood,
            boxes: vec![Aabb::new(0.0, 0.0, 0.0, 1.0, 1.5, 1.0)],
            ..Self::air()
        }
    }

    pub fn water() -> Self {
        Self {
            liquid: true,
            material: Material::Liquid,
            cost: 2.0,
            ..Self::air()
        }
    }

    pub fn lava() -> Self {
        Self {
            liquid: true,
            material: Material::Lava,
            cost: 99_999.0,
            ..Self::air()
        }
    }

    pub fn ice() -> Self {
        Self {
            material: Material::Ice,
            boxes: vec![Aabb::FULL_BLOCK],
            cost: 0.5,
            ..Self::air()
        }
    }
}

impl BlockInfo for TestBlock {
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
        &self.boxes
    }

    fn traversal_cost(&self, _pos: BlockPos, _agent: AgentKind) -> f32 {
        self.cost
    }
}

/// Stone up to `ground` (inclusive) everywhere, plus per-cell overrides.
pub(crate) struct TestWorld {
    ground: Option<i32>,
    solid: HashMap<BlockPos, TestBlock>,
    fluid: HashMap<BlockPos, TestBlock>,
    air: TestBlock,
    stone: TestBlock,
    pub snapshots: usize,
}

impl TestWorld {
    /// An infinite stone floor whose top layer is `y = ground`.
    pub fn flat(ground: i32) -> Self {
        Self {
            ground: Some(ground),
            ..Self::empty()
        }
    }

    /// Nothing but air.
    pub fn empty() -> Self {
        Self {
            ground: None,
            solid: HashMap::new(),
            fluid: HashMap::new(),
            air: TestBlock::air(),
            stone: TestBlock::stone(),
            snapshots: 0,
        }
    }

    pub fn set(&mut self, pos: BlockPos, block: TestBlock) -> &mut Self {
        self.solid.insert(pos, block);
        self
    }

    pub fn set_fluid(&mut self, pos: BlockPos, block: TestBlock) -> &mut Self {
        self.fluid.insert(pos, block);
        self
    }

    fn solid_at(&self, pos: BlockPos) -> &TestBlock {
        match self.solid.get(&pos) {
            Some(b) => b,
            None if self.ground.is_some_and(|g| pos.y <= g) => &self.stone,
            None => &self.air,
        }
    }

    fn fluid_at(&self, pos: BlockPos) -> &TestBlock {
        self.fluid.get(&pos).unwrap_or(&self.air)
    }
}

impl BlockAccess for TestWorld {
    type Block = TestBlock;

    fn begin_snapshot(&mut self) {
        self.snapshots += 1;
    }

    fn block(&self, pos: BlockPos, layer: Layer) -> &TestBlock {
        match layer {
            Layer::Solid => self.solid_at(pos),
            Layer::Fluid => self.fluid_at(pos),
            Layer::MostSolid => {
                let solid = self.solid_at(pos);
                let fluid = self.fluid_at(pos);
                if solid.boxes.is_empty() && fluid.liquid {
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
            // Fences reach half a block into the cell above.
            for y in lo.y - 1..=hi.y {
                for z in lo.z..=hi.z {
                    let pos = BlockPos::new(x, y, z);
                    let blocks = [self.solid_at(pos), self.fluid_at(pos)];
                    for b in blocks.iter().flat_map(|b| b.boxes.iter()) {
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
