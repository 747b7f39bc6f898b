//! World contents as seen by the raycaster.

use glam::Vec3;

use crate::core::{Aabb, Obstacle};
use crate::loader::ModelHandle;
use crate::types::GROUND_Y;

/// Albedo of the ground plane.
const GROUND_ALBEDO: f32 = 0.8;

/// One box of a placed tree, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePart {
    pub bounds: Aabb,
    pub albedo: f32,
}

/// A tree model instanced at an obstacle's position and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeInstance {
    parts: Vec<TreePart>,
    /// Union of all parts, for early rejection.
    bounds: Aabb,
}

impl TreeInstance {
    pub fn place(model: &ModelHandle, obstacle: &Obstacle) -> Option<Self> {
        let parts: Vec<TreePart> = model
            .parts()
            .iter()
            .map(|p| TreePart {
                bounds: Aabb::new(Vec3::from_array(p.min), Vec3::from_array(p.max))
                    .placed(obstacle.scale, obstacle.position),
                albedo: p.albedo,
            })
            .collect();

        let first = parts.first()?.bounds;
        let bounds = parts.iter().skip(1).fold(first, |acc, p| {
            Aabb::new(acc.min().min(p.bounds.min()), acc.max().max(p.bounds.max()))
        });
        Some(Self { parts, bounds })
    }

    pub fn parts(&self) -> &[TreePart] {
        &self.parts
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

/// Ground plane, trees and lighting.
#[derive(Debug, Clone)]
pub struct Scene {
    ground_y: f32,
    ground_half_size: f32,
    ground_albedo: f32,
    trees: Vec<TreeInstance>,
    /// Unit vector pointing toward the light.
    light_dir: Vec3,
    ambient: f32,
    directional: f32,
}

impl Scene {
    /// Empty scene with a square ground plane of side `area_size`.
    pub fn new(area_size: f32) -> Self {
        Self {
            ground_y: GROUND_Y,
            ground_half_size: area_size.abs() / 2.0,
            ground_albedo: GROUND_ALBEDO,
            trees: Vec::new(),
            light_dir: Vec3::new(5.0, 10.0, 5.0).normalize(),
            ambient: 0.3,
            directional: 1.0,
        }
    }

    /// Replace the trees with `model` instanced at every obstacle.
    pub fn set_trees(&mut self, model: &ModelHandle, obstacles: &[Obstacle]) {
        self.trees = obstacles
            .iter()
            .filter_map(|o| TreeInstance::place(model, o))
            .collect();
    }

    pub fn clear_trees(&mut self) {
        self.trees.clear();
    }

    pub fn trees(&self) -> &[TreeInstance] {
        &self.trees
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn ground_half_size(&self) -> f32 {
        self.ground_half_size
    }

    pub fn ground_albedo(&self) -> f32 {
        self.ground_albedo
    }

    pub fn light_dir(&self) -> Vec3 {
        self.light_dir
    }

    /// Lambert term plus ambient for a surface normal.
    pub fn shade(&self, normal: Vec3, albedo: f32) -> f32 {
        albedo * (self.ambient + self.directional * normal.dot(self.light_dir).max(0.0))
    }
}
