//! Random tree placement over a square area.
//!
//! The random source is passed in, so a seeded `StdRng` reproduces a world.

use glam::Vec3;
use rand::Rng;

use crate::aabb::Aabb;
use crate::collision::CollisionIndex;
use crate::types::{
    GROUND_Y, TREE_COLLIDER_HEIGHT, TREE_SCALE_MAX, TREE_SCALE_MIN, TRUNK_RADIUS,
};

/// Redraws allowed for one tree that lands inside the spawn clearance.
const MAX_PLACEMENT_ATTEMPTS: usize = 16;

/// A static tree. Never moved after placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Base of the trunk.
    pub position: Vec3,
    pub scale: f32,
    bounds: Aabb,
}

impl Obstacle {
    /// Tree rooted at `position`. The collider is a trunk-width column of
    /// fixed height; only its radius follows `scale`.
    pub fn new(position: Vec3, scale: f32) -> Self {
        let r = TRUNK_RADIUS * scale;
        let bounds = Aabb::new(
            Vec3::new(position.x - r, position.y, position.z - r),
            Vec3::new(
                position.x + r,
                position.y + TREE_COLLIDER_HEIGHT,
                position.z + r,
            ),
        );
        Self {
            position,
            scale,
            bounds,
        }
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

#[derive(Debug, Clone)]
pub struct ObstacleScatterer {
    count: usize,
    area_size: f32,
    clearance: Option<Aabb>,
}

impl ObstacleScatterer {
    pub fn new(count: usize, area_size: f32) -> Self {
        Self {
            count,
            area_size: area_size.abs(),
            clearance: None,
        }
    }

    /// Keep trees out of `clearance` (usually the player's spawn box).
    ///
    /// A tree that keeps landing inside after several redraws is dropped, so
    /// `populate` may return fewer than `count` obstacles.
    pub fn with_spawn_clearance(mut self, clearance: Aabb) -> Self {
        self.clearance = Some(clearance);
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn area_size(&self) -> f32 {
        self.area_size
    }

    /// Scatter trees and register each collider with `index`.
    pub fn populate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        index: &mut CollisionIndex,
    ) -> Vec<Obstacle> {
        let mut out = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            if let Some(obstacle) = self.place_one(rng) {
                index.insert(*obstacle.bounds());
                out.push(obstacle);
            }
        }
        out
    }

    fn place_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Obstacle> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let scale = rng.gen_range(TREE_SCALE_MIN..TREE_SCALE_MAX);
            let x = self.draw_coordinate(rng);
            let z = self.draw_coordinate(rng);
            let obstacle = Obstacle::new(Vec3::new(x, GROUND_Y, z), scale);

            match &self.clearance {
                Some(c) if c.intersects(obstacle.bounds()) => continue,
                _ => return Some(obstacle),
            }
        }
        None
    }

    /// Sign and magnitude drawn independently, magnitude in `[0, area/2)`.
    fn draw_coordinate<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        sign * rng.gen::<f32>() * self.area_size / 2.0
    }
}
