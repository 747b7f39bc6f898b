//! Flat collision index over static obstacle boxes.
//!
//! Queries are a linear scan. Obstacle counts are in the hundreds, so there is
//! no spatial partitioning; larger worlds would want a grid or BVH here.

use crate::aabb::Aabb;

#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    boxes: Vec<Aabb>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
        }
    }

    /// Register a static obstacle box.
    pub fn insert(&mut self, bounds: Aabb) {
        self.boxes.push(bounds);
    }

    /// True if `query` overlaps any registered box. Stops at the first hit.
    pub fn intersects(&self, query: &Aabb) -> bool {
        self.boxes.iter().any(|b| b.intersects(query))
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aabb> {
        self.boxes.iter()
    }
}
