//! Ground-roll tuning

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{hole, roll};

/// Roll stage parameters (defaults = `physics_constants::roll` / `hole`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollTuning {
    /// Integration step (s)
    pub dt: f32,
    pub max_time_s: f32,
    pub min_speed_mps: f32,
    pub resample_distance_m: f32,

    pub backspin_decay_rpm_per_s: f32,
    pub sidespin_decay_rpm_per_s: f32,
    pub min_spin_rpm: f32,
    pub backspin_decel_per_rpm: f32,
    pub sidespin_accel_per_rpm: f32,

    pub hole_capture_radius_m: f32,
    pub hole_max_entry_speed_mps: f32,
    pub hole_sunk_depth_m: f32,
}

impl Default for RollTuning {
    fn default() -> Self {
        Self {
            dt: roll::DT,
            max_time_s: roll::MAX_TIME_S,
            min_speed_mps: roll::MIN_SPEED_MPS,
            resample_distance_m: roll::RESAMPLE_DISTANCE_M,
            backspin_decay_rpm_per_s: roll::BACKSPIN_DECAY_RPM_PER_S,
            sidespin_decay_rpm_per_s: roll::SIDESPIN_DECAY_RPM_PER_S,
            min_spin_rpm: roll::MIN_SPIN_RPM,
            backspin_decel_per_rpm: roll::BACKSPIN_DECEL_PER_RPM,
            sidespin_accel_per_rpm: roll::SIDESPIN_ACCEL_PER_RPM,
            hole_capture_radius_m: hole::CAPTURE_RADIUS_M,
            hole_max_entry_speed_mps: hole::MAX_ENTRY_SPEED_MPS,
            hole_sunk_depth_m: hole::SUNK_DEPTH_M,
        }
    }
}
