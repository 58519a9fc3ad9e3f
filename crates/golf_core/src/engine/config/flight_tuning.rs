//! Flight integrator tuning

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::flight;

/// Flight stage parameters (defaults = `physics_constants::flight`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    /// Integration step (s)
    pub dt: f32,
    /// Safety cutoff (s)
    pub max_time_s: f32,
    pub ground_epsilon_m: f32,
    pub min_speed_mps: f32,
    pub min_relative_speed_mps: f32,

    pub backspin_decay_rpm_per_s: f32,
    pub sidespin_decay_rpm_per_s: f32,
    pub min_spin_rpm: f32,

    pub cd_base: f32,
    pub cd_spin_reduction: f32,
    pub cd_min: f32,
    pub cd_spin_onset_rpm: f32,
    pub cd_spin_saturation_rpm: f32,
    pub cd_spin_curve_power: f32,

    pub sidespin_lift_coefficient: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            dt: flight::DT,
            max_time_s: flight::MAX_TIME_S,
            ground_epsilon_m: flight::GROUND_EPSILON_M,
            min_speed_mps: flight::MIN_SPEED_MPS,
            min_relative_speed_mps: flight::MIN_RELATIVE_SPEED_MPS,
            backspin_decay_rpm_per_s: flight::BACKSPIN_DECAY_RPM_PER_S,
            sidespin_decay_rpm_per_s: flight::SIDESPIN_DECAY_RPM_PER_S,
            min_spin_rpm: flight::MIN_SPIN_RPM,
            cd_base: flight::CD_BASE,
            cd_spin_reduction: flight::CD_SPIN_REDUCTION,
            cd_min: flight::CD_MIN,
            cd_spin_onset_rpm: flight::CD_SPIN_ONSET_RPM,
            cd_spin_saturation_rpm: flight::CD_SPIN_SATURATION_RPM,
            cd_spin_curve_power: flight::CD_SPIN_CURVE_POWER,
            sidespin_lift_coefficient: flight::SIDESPIN_LIFT_COEFFICIENT,
        }
    }
}
