//! Perspective camera over a character grid.

use glam::Vec3;

use crate::types::Resizable;

/// Terminal glyphs are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Yaw-only perspective camera. Looks down -Z at yaw 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            fov_y: 75f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            ..Self::default()
        }
    }

    pub fn with_fov_degrees(mut self, fov: f32) -> Self {
        self.fov_y = fov.clamp(1.0, 179.0).to_radians();
        self
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Ray through the center of cell `(col, row)` of a `cols` x `rows` grid.
    pub fn ray(&self, col: u16, row: u16, cols: u16, rows: u16) -> Ray {
        let half_h = (self.fov_y * 0.5).tan();
        let half_w = half_h * self.aspect;
        let ndc_x = (col as f32 + 0.5) / cols.max(1) as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (row as f32 + 0.5) / rows.max(1) as f32 * 2.0;

        let dir = self.forward() + self.right() * (ndc_x * half_w) + self.up() * (ndc_y * half_h);
        Ray {
            origin: self.position,
            dir: dir.normalize(),
        }
    }
}

impl Resizable for Camera {
    fn resize(&mut self, cols: u16, rows: u16) {
        if cols == 0 || rows == 0 {
            return;
        }
        self.aspect = cols as f32 * CELL_ASPECT / rows as f32;
    }
}
