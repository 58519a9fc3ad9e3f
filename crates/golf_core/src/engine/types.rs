//! Core kinematic value types shared by all simulation stages.
//!
//! Coordinate frame: y is up, the ground plane is xz. Positions are metres,
//! velocities m/s. Spin vectors are expressed about the ball's *local* axes
//! (x = backspin, y = sidespin, z reserved), not world axes.

use serde::{Deserialize, Serialize};

/// World-space vector (m, m/s).
pub type Vector3 = nalgebra::Vector3<f32>;

/// Instantaneous ball kinematics. `spin` is rad/s about local axes.
///
/// Stages hand this off by value; nothing aliases across a stage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub position: Vector3,
    pub velocity: Vector3,
    pub spin: Vector3,
}

impl MotionState {
    pub fn new(position: Vector3, velocity: Vector3, spin: Vector3) -> Self {
        Self { position, velocity, spin }
    }

    /// State with no velocity and no spin.
    pub fn at_rest(position: Vector3) -> Self {
        Self { position, velocity: Vector3::zeros(), spin: Vector3::zeros() }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }
}

/// One point of the visual trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub position: Vector3,
    /// Seconds since the shot started.
    pub timestamp: f32,
}

impl TrajectorySample {
    pub fn new(position: Vector3, timestamp: f32) -> Self {
        Self { position, timestamp }
    }
}

/// Vector with the vertical component removed.
#[inline]
pub fn horizontal(v: &Vector3) -> Vector3 {
    Vector3::new(v.x, 0.0, v.z)
}

#[inline]
pub fn horizontal_speed(v: &Vector3) -> f32 {
    v.x.hypot(v.z)
}

/// Distance between two points projected onto the ground plane.
#[inline]
pub fn horizontal_distance(a: &Vector3, b: &Vector3) -> f32 {
    (a.x - b.x).hypot(a.z - b.z)
}

/// Unit horizontal direction of `v`, or `None` when its ground speed is below `min_speed`.
#[inline]
pub fn horizontal_direction(v: &Vector3, min_speed: f32) -> Option<Vector3> {
    let speed = horizontal_speed(v);
    if speed <= min_speed {
        return None;
    }
    Some(Vector3::new(v.x / speed, 0.0, v.z / speed))
}

/// Unit vector 90° clockwise from a horizontal direction (viewed from above),
/// i.e. the golfer's right when facing along `dir`.
#[inline]
pub fn right_of(dir: &Vector3) -> Vector3 {
    Vector3::new(-dir.z, 0.0, dir.x)
}

/// Append a sample to a trail, replacing the last one when it shares a timestamp
/// so timestamps stay strictly increasing across stage boundaries.
pub fn append_sample(trail: &mut Vec<TrajectorySample>, sample: TrajectorySample) {
    match trail.last_mut() {
        Some(last) if last.timestamp >= sample.timestamp => *last = sample,
        _ => trail.push(sample),
    }
}

/// Linear spin decay toward zero. Magnitudes under `min_rpm` snap to exactly zero.
#[inline]
pub fn decay_spin_rpm(spin_rpm: f32, rate_rpm_per_s: f32, dt: f32, min_rpm: f32) -> f32 {
    let drop = rate_rpm_per_s * dt;
    let decayed = if spin_rpm > 0.0 {
        (spin_rpm - drop).max(0.0)
    } else {
        (spin_rpm + drop).min(0.0)
    };
    if decayed.abs() < min_rpm {
        0.0
    } else {
        decayed
    }
}
