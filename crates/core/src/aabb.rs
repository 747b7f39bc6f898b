//! Axis-aligned bounding boxes.

use glam::Vec3;

/// Axis-aligned box defined by componentwise min/max corners.
///
/// The constructor orders the corners, so `min <= max` on every axis holds
/// for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centered on `center` extending `half_extent` along each axis.
    pub fn from_center(center: Vec3, half_extent: Vec3) -> Self {
        let half = half_extent.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Overlap test. Touching faces count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Scale about the origin by a non-negative factor, then translate.
    ///
    /// Used to place model-space boxes into the world.
    pub fn placed(&self, scale: f32, translation: Vec3) -> Self {
        Self::new(self.min * scale + translation, self.max * scale + translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.min(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn separated_on_one_axis_does_not_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(0.5, 0.5, 1.5), Vec3::new(2.0, 2.0, 2.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn touching_faces_intersect() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn trunk_collider_hits_player_box() {
        let trunk = Aabb::new(Vec3::new(-0.25, 0.0, -0.25), Vec3::new(0.25, 10.0, 0.25));
        let player = Aabb::from_center(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.5, 1.6, 0.5));
        assert!(trunk.intersects(&player));
        assert!(player.intersects(&trunk));
    }

    #[test]
    fn placed_scales_then_translates() {
        let part = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 4.0, 1.0));
        let world = part.placed(0.5, Vec3::new(10.0, -1.0, 0.0));
        assert_eq!(world.min(), Vec3::new(9.5, -1.0, -0.5));
        assert_eq!(world.max(), Vec3::new(10.5, 1.0, 0.5));
        assert!(world.contains_point(Vec3::new(10.0, 0.0, 0.0)));
    }
}
