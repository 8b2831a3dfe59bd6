use voxnav_core::BlockPos;

/// Cost of one horizontal diagonal step.
pub const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;

/// Octile distance between two positions on the horizontal plane.
///
/// Straight steps cost 1 and diagonal steps √2; the y axis is ignored.
#[inline]
pub fn octile(a: BlockPos, b: BlockPos) -> f32 {
    let dx = (a.x - b.x).abs();
    let dz = (a.z - b.z).abs();
    let (long, short) = if dx > dz { (dx, dz) } else { (dz, dx) };
    (long - short) as f32 + DIAGONAL_COST * short as f32
}

/// Chebyshev (L∞) distance on the horizontal plane.
#[inline]
pub fn chebyshev(a: BlockPos, b: BlockPos) -> i32 {
    (a.x - b.x).abs().max((a.z - b.z).abs())
}
