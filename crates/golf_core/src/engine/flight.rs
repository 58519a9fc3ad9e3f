//! Flight stage: point-mass ball through the air.
//!
//! Fixed-step symplectic Euler under gravity, quadratic drag and Magnus lift,
//! all computed against wind-relative airspeed. Spin decays linearly each step.
//!
//! ## Frame
//! - Backspin lifts: its axis is the golfer's right (`right_of`) of the
//!   horizontal airflow direction, so `ω × v` points up for a forward ball.
//! - Sidespin spins about world −Y; positive sidespin curves to the right.

use tracing::{debug, warn};

use super::club::ClubAeroProfile;
use super::config::{step_budget, FlightTuning};
use super::context::ShotContext;
use super::diagnostics::SimDiagnostics;
use super::obstacle::{resolve_obstacle_hit, Obstacle, ObstacleTracker};
use super::physics_constants::{ball, flight};
use super::types::{
    decay_spin_rpm, horizontal_direction, horizontal_distance, horizontal_speed, right_of,
    MotionState, TrajectorySample, Vector3,
};
use super::units::{rad_s_to_rpm, rpm_to_rad_s};

/// Result of the flight stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightResult {
    /// Position and velocity of the last step (not interpolated to y = 0);
    /// spin is the decayed landing spin in rad/s.
    pub landing: MotionState,
    pub landing_angle_deg: f32,
    pub peak_height: f32,
    pub time_of_flight: f32,
    pub carry_distance: f32,
    pub trajectory: Vec<TrajectorySample>,
    pub diagnostics: SimDiagnostics,
}

impl FlightResult {
    pub fn landing_backspin_rpm(&self) -> f32 {
        rad_s_to_rpm(self.landing.spin.x)
    }

    pub fn landing_sidespin_rpm(&self) -> f32 {
        rad_s_to_rpm(self.landing.spin.y)
    }
}

/// Effective drag coefficient for the current backspin.
///
/// Drag falls from `cd_base` along a power curve between the onset and
/// saturation spin rates, never below `cd_min`.
pub fn effective_drag_coefficient(backspin_rpm: f32, tuning: &FlightTuning) -> f32 {
    let span = (tuning.cd_spin_saturation_rpm - tuning.cd_spin_onset_rpm).max(1.0);
    let ramp = ((backspin_rpm - tuning.cd_spin_onset_rpm) / span).clamp(0.0, 1.0);
    (tuning.cd_base - tuning.cd_spin_reduction * ramp.powf(tuning.cd_spin_curve_power))
        .max(tuning.cd_min)
}

/// Magnus acceleration for the given wind-relative velocity.
pub fn magnus_acceleration(
    relative_velocity: &Vector3,
    backspin_rpm: f32,
    sidespin_rpm: f32,
    backspin_coefficient: f32,
    sidespin_coefficient: f32,
) -> Vector3 {
    let mut accel = Vector3::zeros();

    if backspin_rpm != 0.0 {
        if let Some(dir) =
            horizontal_direction(relative_velocity, flight::MIN_HORIZONTAL_SPEED_MPS)
        {
            let omega = right_of(&dir) * rpm_to_rad_s(backspin_rpm);
            accel += omega.cross(relative_velocity) * backspin_coefficient;
        }
    }

    if sidespin_rpm != 0.0 {
        let omega = Vector3::new(0.0, -rpm_to_rad_s(sidespin_rpm), 0.0);
        accel += omega.cross(relative_velocity) * sidespin_coefficient;
    }

    accel
}

/// Landing angle below horizontal, in degrees. Vertical when ground speed is negligible.
pub fn landing_angle_deg(velocity: &Vector3) -> f32 {
    let ground_speed = horizontal_speed(velocity);
    if ground_speed < flight::MIN_HORIZONTAL_SPEED_MPS {
        return 90.0;
    }
    velocity.y.abs().atan2(ground_speed).to_degrees()
}

/// Integrate a ball from launch to ground contact.
///
/// `initial_spin_rpm` is about local axes: x = backspin, y = sidespin, z unused.
/// The loop always runs at least one step and stops once the ball is at or
/// below `ground_epsilon_m`, or at the `max_time_s` safety cutoff.
pub fn simulate_flight(
    initial_position: Vector3,
    initial_velocity: Vector3,
    initial_spin_rpm: Vector3,
    club: &ClubAeroProfile,
    obstacles: &[Obstacle],
    ctx: &ShotContext,
) -> FlightResult {
    let tuning = &ctx.tuning.flight;
    let dt = tuning.dt;
    let wind = ctx.environment.wind_velocity();
    let drag_factor = 0.5 * ctx.environment.air_density() * ball::CROSS_SECTION_M2 / ball::MASS_KG;
    let backspin_coefficient = club.effective_backspin_lift();
    let gravity = Vector3::new(0.0, -ball::GRAVITY, 0.0);

    let launch_backspin = initial_spin_rpm.x;
    let mut backspin = initial_spin_rpm.x;
    let mut sidespin = initial_spin_rpm.y;

    let mut position = initial_position;
    let mut velocity = initial_velocity;
    let mut time = 0.0_f32;
    let mut peak_height = position.y;
    let mut diagnostics = SimDiagnostics::default();
    let mut tracker = ObstacleTracker::new(obstacles.len(), ctx.obstacle_seed);

    let mut trajectory = Vec::with_capacity(((tuning.max_time_s / dt) as usize).min(2048) + 1);
    trajectory.push(TrajectorySample::new(position, time));

    let step_limit = step_budget(tuning.max_time_s, dt);
    let mut steps = 0_u32;
    loop {
        if steps >= step_limit {
            diagnostics.safety_cutoffs += 1;
            warn!(stage = "flight", time, steps, dt, "flight step budget exhausted");
            break;
        }
        steps += 1;

        let relative = velocity - wind;
        backspin =
            decay_spin_rpm(backspin, tuning.backspin_decay_rpm_per_s, dt, tuning.min_spin_rpm);
        sidespin =
            decay_spin_rpm(sidespin, tuning.sidespin_decay_rpm_per_s, dt, tuning.min_spin_rpm);

        let mut accel = gravity;
        let airspeed = relative.norm();
        if velocity.norm() < tuning.min_speed_mps || airspeed < tuning.min_relative_speed_mps {
            // No usable airflow direction: gravity only this step
            diagnostics.degenerate_skips += 1;
            debug!(time, airspeed, "flight step skipped aero forces at near-zero speed");
        } else {
            let cd = effective_drag_coefficient(backspin, tuning);
            accel -= relative * (drag_factor * cd * airspeed);
            accel += magnus_acceleration(
                &relative,
                backspin,
                sidespin,
                backspin_coefficient,
                tuning.sidespin_lift_coefficient,
            );
            if launch_backspin > 0.0 && backspin > 0.0 {
                accel.y += club.lift_bias * (backspin / launch_backspin);
            }
        }

        velocity += accel * dt;
        position += velocity * dt;
        time += dt;

        if !obstacles.is_empty() {
            let (vx, vz) = resolve_obstacle_hit(
                &position,
                ball::RADIUS_M,
                (velocity.x, velocity.z),
                obstacles,
                &mut tracker,
            );
            velocity.x = vx;
            velocity.z = vz;
        }

        peak_height = peak_height.max(position.y);
        trajectory.push(TrajectorySample::new(position, time));

        if position.y <= tuning.ground_epsilon_m {
            break;
        }
        if time >= tuning.max_time_s {
            diagnostics.safety_cutoffs += 1;
            warn!(
                stage = "flight",
                time,
                x = position.x,
                y = position.y,
                z = position.z,
                "flight safety cutoff reached"
            );
            break;
        }
    }

    diagnostics.obstacle_hits += tracker.hits();

    let landing_angle = landing_angle_deg(&velocity);
    let carry_distance = horizontal_distance(&initial_position, &position);
    debug!(
        carry = carry_distance,
        peak = peak_height,
        time,
        landing_angle,
        backspin,
        "flight landed"
    );

    FlightResult {
        landing: MotionState::new(
            position,
            velocity,
            Vector3::new(rpm_to_rad_s(backspin), rpm_to_rad_s(sidespin), 0.0),
        ),
        landing_angle_deg: landing_angle,
        peak_height,
        time_of_flight: time,
        carry_distance,
        trajectory,
        diagnostics,
    }
}
