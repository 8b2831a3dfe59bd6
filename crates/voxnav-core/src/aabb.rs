//! Axis-aligned bounding boxes used for agent and block collision shapes.

use std::fmt;

use crate::geom::Vec3;

/// An axis-aligned box \[min, max\].
///
/// Agent boxes are expressed relative to the agent's feet; block boxes
/// relative to the block's minimum corner. [`Aabb::translate`] moves either
/// into world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The unit cube occupied by a full block.
    pub const FULL_BLOCK: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::new(1.0, 1.0, 1.0),
    };

    /// Create a new box from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    pub fn new(x0: f64, y0: f64, z0: f64, x1: f64, y1: f64, z1: f64) -> Self {
        Self {
            min: Vec3::new(x0.min(x1), y0.min(y1), z0.min(z1)),
            max: Vec3::new(x0.max(x1), y0.max(y1), z0.max(z1)),
        }
    }

    /// A box of the given footprint width and height, centred on the
    /// origin horizontally and resting on y = 0.
    pub fn centered(width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        Self::new(-hw, 0.0, -hw, hw, height, hw)
    }

    #[inline]
    pub fn x_size(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn y_size(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn z_size(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Size as a vector (x, y, z extents).
    #[inline]
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.x_size(), self.y_size(), self.z_size())
    }

    /// Largest extent along any axis.
    #[inline]
    pub fn max_extent(&self) -> f64 {
        self.x_size().max(self.y_size()).max(self.z_size())
    }

    /// Whether the box has an inverted or NaN extent along some axis.
    ///
    /// Boxes built through [`Aabb::new`] are never inverted; this catches
    /// hand-assembled literals.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z)
    }

    /// Return the box moved by `offset`.
    #[inline]
    pub fn translate(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Whether the interiors of two boxes overlap. Touching faces do not
    /// count as an overlap.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Whether a point lies inside or on the box.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_canonicalize() {
        let b = Aabb::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
        assert_eq!(b.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
        assert!(!b.is_inverted());
    }

    #[test]
    fn centered_box() {
        let b = Aabb::centered(0.6, 1.8);
        assert!((b.x_size() - 0.6).abs() < 1e-9);
        assert!((b.y_size() - 1.8).abs() < 1e-9);
        assert!((b.min.z + 0.3).abs() < 1e-9);
        assert!((b.max_extent() - 1.8).abs() < 1e-9);
    }

    #[test]
    fn touching_faces_do_not_intersect() {
        let a = Aabb::FULL_BLOCK;
        let b = Aabb::FULL_BLOCK.translate(Vec3::new(1.0, 0.0, 0.0));
        assert!(!a.intersects(&b));
        let c = Aabb::FULL_BLOCK.translate(Vec3::new(0.5, 0.5, 0.0));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn inverted_literal() {
        let b = Aabb {
            min: Vec3::new(1.0, 0.0, 0.0),
            max: Vec3::new(0.0, 1.0, 1.0),
        };
        assert!(b.is_inverted());
    }

    #[test]
    fn contains_point() {
        let b = Aabb::FULL_BLOCK.translate(Vec3::new(2.0, 0.0, 0.0));
        assert!(b.contains(Vec3::new(2.5, 0.5, 0.5)));
        assert!(b.contains(Vec3::new(3.0, 1.0, 1.0)));
        assert!(!b.contains(Vec3::new(1.5, 0.5, 0.5)));
    }
}
