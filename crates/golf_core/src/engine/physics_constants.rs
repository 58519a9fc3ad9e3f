//! Physics constants for shot simulation
//!
//! Every tunable number used by the flight, bounce and roll stages lives here
//! as a named constant. `engine::config::PhysicsTuning` snapshots them so
//! presets and tests can vary a value without touching the integrators.
//!
//! Units are SI throughout (m, s, kg, m/s, m/s²) except where a name says
//! otherwise (`_RPM`, `_DEG`).

/// Golf ball properties (USGA regulation ball)
pub mod ball {
    /// Ball mass (kg) - regulation maximum 45.93 g
    pub const MASS_KG: f32 = 0.045_93;
    /// Ball radius (m) - regulation minimum diameter 42.67 mm
    pub const RADIUS_M: f32 = 0.021_34;
    /// Cross-sectional area (m²)
    pub const CROSS_SECTION_M2: f32 = std::f32::consts::PI * RADIUS_M * RADIUS_M;
    /// Gravity constant (m/s²)
    pub const GRAVITY: f32 = 9.81;
}

/// Atmosphere model (dry air, sea level)
pub mod air {
    /// Specific gas constant for dry air (J/(kg·K))
    pub const GAS_CONSTANT_DRY_AIR: f32 = 287.05;
    /// Sea-level standard pressure (Pa)
    pub const SEA_LEVEL_PRESSURE_PA: f32 = 101_325.0;
    /// 0°C in Kelvin
    pub const KELVIN_OFFSET: f32 = 273.15;
    /// Standard temperature (°C)
    pub const STANDARD_TEMPERATURE_C: f32 = 15.0;
    /// Temperatures outside this range are clamped before computing density
    pub const MIN_TEMPERATURE_C: f32 = -40.0;
    pub const MAX_TEMPERATURE_C: f32 = 55.0;
}

/// Flight integrator (aerial phase)
pub mod flight {
    /// Integration step (s)
    pub const DT: f32 = 0.01;
    /// Hard safety cutoff (simulated seconds)
    pub const MAX_TIME_S: f32 = 20.0;
    /// Flight ends once ball height drops to this (m)
    pub const GROUND_EPSILON_M: f32 = 0.005;
    /// Below this absolute speed a step applies gravity only (m/s)
    pub const MIN_SPEED_MPS: f32 = 0.01;
    /// Below this airspeed aerodynamic terms are skipped (m/s)
    pub const MIN_RELATIVE_SPEED_MPS: f32 = 0.01;
    /// Below this horizontal speed the landing angle is reported as 90° (m/s)
    pub const MIN_HORIZONTAL_SPEED_MPS: f32 = 0.001;

    // ========================================
    // Spin decay (linear toward zero)
    // ========================================

    /// Backspin decay (RPM per second)
    pub const BACKSPIN_DECAY_RPM_PER_S: f32 = 120.0;
    /// Sidespin decay (RPM per second)
    pub const SIDESPIN_DECAY_RPM_PER_S: f32 = 90.0;
    /// Spin below this magnitude is forced to exactly zero (RPM)
    pub const MIN_SPIN_RPM: f32 = 50.0;

    // ========================================
    // Drag curve
    // Cd = CD_BASE - CD_SPIN_REDUCTION × ramp^POWER, ramp ∈ [0,1] between onset and saturation
    // ========================================

    pub const CD_BASE: f32 = 0.36;
    pub const CD_SPIN_REDUCTION: f32 = 0.06;
    pub const CD_MIN: f32 = 0.22;
    /// Backspin where the drag reduction starts (RPM)
    pub const CD_SPIN_ONSET_RPM: f32 = 1500.0;
    /// Backspin where the drag reduction saturates (RPM)
    pub const CD_SPIN_SATURATION_RPM: f32 = 6000.0;
    pub const CD_SPIN_CURVE_POWER: f32 = 0.7;

    // ========================================
    // Magnus lift
    // a = C × (ω × v_rel), ω in rad/s
    // ========================================

    /// Backspin lift coefficient used when a club profile has none
    pub const DEFAULT_BACKSPIN_LIFT_COEFFICIENT: f32 = 4.0e-4;
    /// Sidespin (lateral) lift coefficient
    pub const SIDESPIN_LIFT_COEFFICIENT: f32 = 2.5e-4;
}

/// Bounce-phase simulator
pub mod bounce {
    /// Ballistic sub-step between impacts (s) - finer than `flight::DT`
    pub const AIR_DT: f32 = 0.005;
    /// Maximum ground impacts before forcing the roll phase
    pub const MAX_IMPACTS: u8 = 8;
    /// Per-hop airtime safety cap (s)
    pub const MAX_HOP_AIRTIME_S: f32 = 3.0;

    // ========================================
    // Restitution (spin grip)
    // cor = base - SPIN_GRIP_COR_REDUCTION × spin_norm × firmness
    // ========================================

    /// Backspin that counts as "full" grip (RPM)
    pub const SPIN_REFERENCE_RPM: f32 = 8000.0;
    pub const SPIN_GRIP_COR_REDUCTION: f32 = 0.5;
    /// Base restitution that maps to firmness 1.0
    pub const FIRMNESS_REFERENCE_COR: f32 = 0.4;
    pub const MAX_FIRMNESS: f32 = 1.5;

    // ========================================
    // Horizontal scrub
    // retained = 1 - (SCRUB_BASE + SCRUB_SPIN × spin_norm + SCRUB_LANDING_ANGLE × angle_norm)
    // ========================================

    pub const SCRUB_BASE: f32 = 0.12;
    pub const SCRUB_SPIN: f32 = 0.25;
    /// First impact only; scaled by landing angle / 90°
    pub const SCRUB_LANDING_ANGLE: f32 = 0.20;
    pub const MAX_SCRUB: f32 = 0.9;

    /// Horizontal velocity shift per RPM of backspin (m/s per RPM), against travel
    pub const SPIN_GRAB_MPS_PER_RPM: f32 = 1.5e-4;

    /// Spin retained per impact = 1 - friction × SPIN_DECAY_PER_FRICTION (floored)
    pub const SPIN_DECAY_PER_FRICTION: f32 = 1.5;
    pub const MIN_SPIN_RETENTION: f32 = 0.1;

    // ========================================
    // Bounce termination
    // ========================================

    /// Predicted hop apex below this ends bouncing (m)
    pub const MIN_BOUNCE_HEIGHT_M: f32 = 0.01;
    /// Rebound vertical speed below this ends bouncing (m/s)
    pub const MIN_BOUNCE_VY_MPS: f32 = 0.5;
}

/// Ground-roll integrator
pub mod roll {
    /// Integration step (s)
    pub const DT: f32 = 0.02;
    /// Hard safety cutoff (simulated seconds)
    pub const MAX_TIME_S: f32 = 30.0;
    /// Ball at rest below this speed (m/s)
    pub const MIN_SPEED_MPS: f32 = 0.05;
    /// Surface re-sampled every this much travelled distance (m)
    pub const RESAMPLE_DISTANCE_M: f32 = 0.25;

    /// Backspin decay while rolling (RPM per second)
    pub const BACKSPIN_DECAY_RPM_PER_S: f32 = 500.0;
    /// Sidespin decay while rolling (RPM per second)
    pub const SIDESPIN_DECAY_RPM_PER_S: f32 = 300.0;
    /// Spin below this magnitude is forced to exactly zero (RPM)
    pub const MIN_SPIN_RPM: f32 = 30.0;

    /// Deceleration along the initial roll direction per RPM of backspin (m/s² per RPM)
    pub const BACKSPIN_DECEL_PER_RPM: f32 = 4.0e-4;
    /// Lateral acceleration per RPM of sidespin (m/s² per RPM)
    pub const SIDESPIN_ACCEL_PER_RPM: f32 = 2.0e-4;
}

/// Hole (cup) geometry and capture
pub mod hole {
    /// Regulation cup diameter (m) - 4.25 in
    pub const DIAMETER_M: f32 = 0.108;
    pub const RADIUS_M: f32 = DIAMETER_M / 2.0;
    /// Ball centre within this horizontal distance of the cup centre can drop (m)
    pub const CAPTURE_RADIUS_M: f32 = RADIUS_M;
    /// Faster than this the ball lips over the cup (m/s)
    pub const MAX_ENTRY_SPEED_MPS: f32 = 1.3;
    /// Depth of a holed ball's centre below the cup position (m)
    pub const SUNK_DEPTH_M: f32 = 0.08;
}

/// Surface fallbacks
pub mod surface {
    /// FAIRWAY-like values used when a surface is missing from the table
    pub const FALLBACK_FRICTION: f32 = 0.1;
    pub const FALLBACK_BOUNCE: f32 = 0.4;
    pub const FALLBACK_SPIN_RESPONSE: f32 = 0.8;
    /// Depth of a ball's centre below a penalty surface such as water (m)
    pub const SUBMERGED_DEPTH_M: f32 = 0.15;
}

/// Putting
pub mod putt {
    /// Fixed backspin given to every putt (RPM)
    pub const BACKSPIN_RPM: f32 = 100.0;
}

/// Shot-resolution workflow
pub mod shot {
    /// Landings shallower than this may skip the bounce stage (degrees)
    pub const SKIP_BOUNCE_MAX_ANGLE_DEG: f32 = 20.0;
    /// Landings slower than this may skip the bounce stage (m/s)
    pub const SKIP_BOUNCE_MAX_SPEED_MPS: f32 = 4.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hole_is_regulation_size() {
        assert!((hole::DIAMETER_M - 0.108).abs() < 1e-6);
        assert!((hole::RADIUS_M - 0.054).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_substep_finer_than_flight_step() {
        assert!(bounce::AIR_DT < flight::DT);
    }

    #[test]
    fn test_drag_curve_is_ordered() {
        assert!(flight::CD_SPIN_ONSET_RPM < flight::CD_SPIN_SATURATION_RPM);
        assert!(flight::CD_MIN <= flight::CD_BASE);
    }

    #[test]
    fn test_cross_section_matches_radius() {
        let expected = std::f32::consts::PI * 0.021_34 * 0.021_34;
        assert!((ball::CROSS_SECTION_M2 - expected).abs() < 1e-9);
    }
}
