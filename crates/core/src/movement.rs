//! First-person movement with acceleration, decay and collision rollback.
//!
//! Axis convention: +X is right, +Y is up, the camera looks down -Z at yaw 0.
//! Positive yaw turns left.

use glam::Vec3;

use crate::aabb::Aabb;
use crate::collision::CollisionIndex;
use crate::types::{
    InputState, ACCELERATION, MAX_FRAME_DELTA, MAX_SPEED, PAN_SPEED, PLAYER_HALF_EXTENT, SLOWDOWN,
};

/// Camera position and velocity. Owned by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerKinematics {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl PlayerKinematics {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Camera heading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Radians about +Y.
    pub yaw: f32,
}

impl Orientation {
    pub fn new(yaw: f32) -> Self {
        Self { yaw }
    }

    /// Horizontal unit view direction.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos()).normalize_or_zero()
    }

    /// Horizontal unit vector to the right of [`Self::forward`].
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }
}

/// Tuning knobs for [`MovementController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementTuning {
    pub acceleration: f32,
    pub max_speed: f32,
    pub slowdown: f32,
    pub pan_speed: f32,
    pub max_frame_delta: f32,
    pub half_extent: Vec3,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            max_speed: MAX_SPEED,
            slowdown: SLOWDOWN,
            pan_speed: PAN_SPEED,
            max_frame_delta: MAX_FRAME_DELTA,
            half_extent: PLAYER_HALF_EXTENT,
        }
    }
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Committed position (the pre-step position when `collided`).
    pub position: Vec3,
    pub collided: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MovementController {
    tuning: MovementTuning,
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: MovementTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Player collision box centered on `position`.
    pub fn player_box(&self, position: Vec3) -> Aabb {
        Aabb::from_center(position, self.tuning.half_extent)
    }

    /// Clamp a raw frame delta into the range a step will integrate.
    pub fn clamp_delta(&self, delta_seconds: f32) -> f32 {
        if delta_seconds.is_finite() {
            delta_seconds.clamp(0.0, self.tuning.max_frame_delta)
        } else {
            0.0
        }
    }

    /// Advance one frame.
    ///
    /// Applies yaw, accelerates toward the held direction (or decays when no
    /// direction is held), then commits the candidate position unless the
    /// player box there overlaps an obstacle. A blocked move restores the
    /// pre-step position and zeroes velocity.
    pub fn step(
        &self,
        input: &InputState,
        delta_seconds: f32,
        kinematics: &mut PlayerKinematics,
        orientation: &mut Orientation,
        obstacles: &CollisionIndex,
    ) -> StepOutcome {
        let dt = self.clamp_delta(delta_seconds);
        let t = &self.tuning;

        if input.pan_left {
            orientation.yaw += t.pan_speed * dt;
        }
        if input.pan_right {
            orientation.yaw -= t.pan_speed * dt;
        }

        let forward = orientation.forward();
        let right = orientation.right();

        let mut desired = Vec3::ZERO;
        if input.forward {
            desired += forward;
        }
        if input.back {
            desired -= forward;
        }
        if input.right {
            desired += right;
        }
        if input.left {
            desired -= right;
        }
        // Opposing keys cancel to zero; normalize_or_zero treats that as no input.
        let desired = desired.normalize_or_zero();

        if desired != Vec3::ZERO {
            kinematics.velocity += desired * t.acceleration * dt;
            kinematics.velocity = kinematics.velocity.clamp_length_max(t.max_speed);
        } else {
            kinematics.velocity *= (1.0 - t.slowdown * dt).max(0.0);
        }

        let previous = kinematics.position;
        let candidate = previous + kinematics.velocity * dt;

        if obstacles.intersects(&self.player_box(candidate)) {
            kinematics.position = previous;
            kinematics.velocity = Vec3::ZERO;
            StepOutcome {
                position: previous,
                collided: true,
            }
        } else {
            kinematics.position = candidate;
            StepOutcome {
                position: candidate,
                collided: false,
            }
        }
    }
}
