//! In-memory voxel worlds for voxnav: block types, layered storage with
//! collision, and an ASCII layout format for building test terrain.

pub mod block;
pub mod layout;
pub mod world;

#[cfg(test)]
mod scenarios;

pub use block::{BlockId, BlockRegistry, BlockType};
pub use layout::{Glyph, Layout, LayoutError, Legend};
pub use world::VoxelWorld;
