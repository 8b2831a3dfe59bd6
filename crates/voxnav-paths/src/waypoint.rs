use rand::{Rng, RngExt};
use voxnav_core::{BlockPos, Vec3};

use crate::node::PathNode;

/// Horizontal offset inside a cell where the agent is placed for collision
/// tests and waypoints.
///
/// Drawn once per search so that agents do not all hug cell centres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    pub x: f64,
    pub z: f64,
}

impl Jitter {
    /// The cell centre.
    pub const CENTER: Self = Self { x: 0.5, z: 0.5 };

    /// A random offset in `[0.3, 0.7)` on each axis.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x: f64 = rng.random();
        let z: f64 = rng.random();
        Self {
            x: 0.3 + x * 0.4,
            z: 0.3 + z * 0.4,
        }
    }

    /// World point of an agent's feet standing in cell `pos`.
    #[inline]
    pub fn apply(self, pos: BlockPos) -> Vec3 {
        Vec3::new(pos.x as f64 + self.x, pos.y as f64, pos.z as f64 + self.z)
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Convert a retraced node list into steering waypoints, ending at `target`.
pub fn to_waypoints(path: &[PathNode], jitter: Jitter, target: Vec3) -> Vec<Vec3> {
    let mut waypoints = Vec::with_capacity(path.len() + 1);
    waypoints.extend(path.iter().map(|n| jitter.apply(n.pos)));
    waypoints.push(target);
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_jitter_in_range() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let j = Jitter::random(&mut rng);
            assert!((0.3..0.7).contains(&j.x));
            assert!((0.3..0.7).contains(&j.z));
        }
    }

    #[test]
    fn waypoints_follow_nodes_then_target() {
        let path = [
            PathNode::new(BlockPos::new(1, 64, 0)),
            PathNode::new(BlockPos::new(2, 65, 0)),
        ];
        let j = Jitter { x: 0.375, z: 0.625 };
        let target = Vec3::new(2.9, 65.0, 0.1);
        let wps = to_waypoints(&path, j, target);
        assert_eq!(wps.len(), 3);
        assert_eq!(wps[0], Vec3::new(1.375, 64.0, 0.625));
        assert_eq!(wps[1], Vec3::new(2.375, 65.0, 0.625));
        assert_eq!(wps[2], target);
    }

    #[test]
    fn empty_path_is_just_target() {
        let wps = to_waypoints(&[], Jitter::CENTER, Vec3::new(0.5, 64.0, 0.5));
        assert_eq!(wps, vec![Vec3::new(0.5, 64.0, 0.5)]);
    }
}
