//! # Physics Tuning Configuration
//!
//! Central snapshot of the tunable constants in `physics_constants`.
//!
//! ## Purpose
//! - Named constants stay the compiled-in source of truth
//! - Presets (Realistic / Arcade / Simulation) for quick balance checks
//! - Tests can vary one value without editing the integrators
//!
//! ## Usage
//! ```rust
//! use golf_core::engine::config::PhysicsTuning;
//!
//! let tuning = PhysicsTuning::default();
//! let arcade = PhysicsTuning::arcade();
//! assert!(arcade.roll.backspin_decel_per_rpm < tuning.roll.backspin_decel_per_rpm);
//! ```
//!
//! ## Environment Variables
//!
//! - `GOLF_TUNING_PROFILE`: Select preset (arcade, simulation, default)

mod bounce_tuning;
mod flight_tuning;
mod roll_tuning;

pub use bounce_tuning::BounceTuning;
pub use flight_tuning::FlightTuning;
pub use roll_tuning::RollTuning;

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Result, SimError};

/// Hard ceiling on integration steps for any single stage loop.
pub const MAX_STAGE_STEPS: u32 = 1_000_000;

/// Steps a loop may take to cover `max_time_s` at `dt`, one past the time
/// cutoff so the clock check normally fires first. Zero when `dt` cannot
/// advance the clock.
pub(crate) fn step_budget(max_time_s: f32, dt: f32) -> u32 {
    if !(dt.is_finite() && dt > 0.0) {
        return 0;
    }
    let steps = (max_time_s / dt).ceil();
    if steps.is_nan() || steps <= 0.0 {
        return 0;
    }
    // Float-to-int casts saturate, so an infinite quotient lands on the ceiling
    (steps as u32).saturating_add(1).min(MAX_STAGE_STEPS)
}

fn require_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTuning(format!("{name} must be finite and > 0, got {value}")))
    }
}

/// Per-stage tuning bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PhysicsTuning {
    #[serde(default)]
    pub flight: FlightTuning,
    #[serde(default)]
    pub bounce: BounceTuning,
    #[serde(default)]
    pub roll: RollTuning,
}

impl PhysicsTuning {
    /// Realistic simulation (default)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Arcade style: more carry, hotter bounces, longer roll-out
    pub fn arcade() -> Self {
        Self {
            flight: FlightTuning { cd_base: 0.32, ..FlightTuning::default() },
            bounce: BounceTuning {
                scrub_base: 0.08,
                spin_grab_mps_per_rpm: 1.0e-4,
                ..BounceTuning::default()
            },
            roll: RollTuning { backspin_decel_per_rpm: 2.5e-4, ..RollTuning::default() },
        }
    }

    /// Simulation style: heavier air, stronger spin bite
    pub fn simulation() -> Self {
        Self {
            flight: FlightTuning {
                backspin_decay_rpm_per_s: 150.0,
                ..FlightTuning::default()
            },
            bounce: BounceTuning {
                spin_grip_cor_reduction: 0.6,
                spin_grab_mps_per_rpm: 2.0e-4,
                ..BounceTuning::default()
            },
            roll: RollTuning::default(),
        }
    }

    /// Preset by name; unknown names give the default.
    pub fn from_profile(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "arcade" => Self::arcade(),
            "simulation" => Self::simulation(),
            _ => Self::default(),
        }
    }

    /// Reject step sizes and cutoffs that would stall an integration loop.
    pub fn validate(&self) -> Result<()> {
        require_positive("flight.dt", self.flight.dt)?;
        require_positive("flight.max_time_s", self.flight.max_time_s)?;
        require_positive("bounce.air_dt", self.bounce.air_dt)?;
        require_positive("bounce.max_hop_airtime_s", self.bounce.max_hop_airtime_s)?;
        require_positive("roll.dt", self.roll.dt)?;
        require_positive("roll.max_time_s", self.roll.max_time_s)?;
        if !(self.roll.resample_distance_m.is_finite() && self.roll.resample_distance_m >= 0.0) {
            return Err(SimError::InvalidTuning(format!(
                "roll.resample_distance_m must be finite and >= 0, got {}",
                self.roll.resample_distance_m
            )));
        }
        Ok(())
    }

    /// Load from environment variable `GOLF_TUNING_PROFILE` or use default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var("GOLF_TUNING_PROFILE").unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics_constants::{bounce, flight, roll};

    #[test]
    fn test_default_matches_named_constants() {
        let t = PhysicsTuning::default();
        assert_eq!(t.flight.dt, flight::DT);
        assert_eq!(t.flight.max_time_s, flight::MAX_TIME_S);
        assert_eq!(t.bounce.air_dt, bounce::AIR_DT);
        assert_eq!(t.bounce.max_impacts, bounce::MAX_IMPACTS);
        assert_eq!(t.roll.dt, roll::DT);
        assert_eq!(t.roll.max_time_s, roll::MAX_TIME_S);
    }

    #[test]
    fn test_profile_selection() {
        assert_eq!(PhysicsTuning::from_profile("ARCADE"), PhysicsTuning::arcade());
        assert_eq!(PhysicsTuning::from_profile("simulation"), PhysicsTuning::simulation());
        assert_eq!(PhysicsTuning::from_profile("nonsense"), PhysicsTuning::default());
        assert_eq!(PhysicsTuning::realistic(), PhysicsTuning::default());
    }

    #[test]
    fn test_presets_validate() {
        for tuning in [PhysicsTuning::default(), PhysicsTuning::arcade(), PhysicsTuning::simulation()] {
            assert!(tuning.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_stalling_steps() {
        let mut t = PhysicsTuning::default();
        t.roll.dt = 0.0;
        assert!(matches!(t.validate(), Err(SimError::InvalidTuning(_))));

        let mut t = PhysicsTuning::default();
        t.flight.dt = f32::NAN;
        assert!(t.validate().is_err());

        let mut t = PhysicsTuning::default();
        t.bounce.air_dt = -0.01;
        assert!(t.validate().is_err());

        let mut t = PhysicsTuning::default();
        t.roll.max_time_s = f32::INFINITY;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_step_budget() {
        assert_eq!(step_budget(20.0, 0.01), 2001);
        assert_eq!(step_budget(20.0, 0.0), 0);
        assert_eq!(step_budget(20.0, f32::NAN), 0);
        assert_eq!(step_budget(f32::NAN, 0.01), 0);
        assert_eq!(step_budget(-1.0, 0.01), 0);
        assert_eq!(step_budget(f32::INFINITY, 0.01), MAX_STAGE_STEPS);
        assert_eq!(step_budget(20.0, 1e-12), MAX_STAGE_STEPS);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let t: PhysicsTuning = serde_json::from_str(r#"{ "roll": { "min_speed_mps": 0.1 } }"#).unwrap();
        assert_eq!(t.roll.min_speed_mps, 0.1);
        assert_eq!(t.roll.dt, roll::DT);
        assert_eq!(t.flight, FlightTuning::default());
    }
}
