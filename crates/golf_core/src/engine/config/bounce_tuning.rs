//! Bounce-phase tuning

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::bounce;

/// Bounce stage parameters (defaults = `physics_constants::bounce`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceTuning {
    /// Ballistic sub-step between impacts (s)
    pub air_dt: f32,
    pub max_impacts: u8,
    pub max_hop_airtime_s: f32,

    pub spin_reference_rpm: f32,
    pub spin_grip_cor_reduction: f32,
    pub firmness_reference_cor: f32,
    pub max_firmness: f32,

    pub scrub_base: f32,
    pub scrub_spin: f32,
    pub scrub_landing_angle: f32,
    pub max_scrub: f32,
    pub spin_grab_mps_per_rpm: f32,

    pub spin_decay_per_friction: f32,
    pub min_spin_retention: f32,

    pub min_bounce_height_m: f32,
    pub min_bounce_vy_mps: f32,
}

impl Default for BounceTuning {
    fn default() -> Self {
        Self {
            air_dt: bounce::AIR_DT,
            max_impacts: bounce::MAX_IMPACTS,
            max_hop_airtime_s: bounce::MAX_HOP_AIRTIME_S,
            spin_reference_rpm: bounce::SPIN_REFERENCE_RPM,
            spin_grip_cor_reduction: bounce::SPIN_GRIP_COR_REDUCTION,
            firmness_reference_cor: bounce::FIRMNESS_REFERENCE_COR,
            max_firmness: bounce::MAX_FIRMNESS,
            scrub_base: bounce::SCRUB_BASE,
            scrub_spin: bounce::SCRUB_SPIN,
            scrub_landing_angle: bounce::SCRUB_LANDING_ANGLE,
            max_scrub: bounce::MAX_SCRUB,
            spin_grab_mps_per_rpm: bounce::SPIN_GRAB_MPS_PER_RPM,
            spin_decay_per_friction: bounce::SPIN_DECAY_PER_FRICTION,
            min_spin_retention: bounce::MIN_SPIN_RETENTION,
            min_bounce_height_m: bounce::MIN_BOUNCE_HEIGHT_M,
            min_bounce_vy_mps: bounce::MIN_BOUNCE_VY_MPS,
        }
    }
}
