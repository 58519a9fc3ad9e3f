//! Roll stage: horizontal motion under surface friction and residual spin.
//!
//! Used on its own for putts and after the bounce stage for full shots.
//! The ball keeps the height it entered with while rolling; the final
//! surface's rest height is applied once it stops.

use tracing::{debug, warn};

use super::bounce::GROUND_Y;
use super::config::step_budget;
use super::context::ShotContext;
use super::course::HoleGeometry;
use super::diagnostics::SimDiagnostics;
use super::physics_constants::ball;
use super::surface::SurfaceType;
use super::types::{
    decay_spin_rpm, horizontal, horizontal_direction, horizontal_distance, horizontal_speed,
    right_of, TrajectorySample, Vector3,
};

/// Result of the roll stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RollResult {
    pub final_position: Vector3,
    pub is_holed_out: bool,
    pub trajectory: Vec<TrajectorySample>,
    pub end_time: f32,
    /// Surface under the ball where it stopped.
    pub surface: SurfaceType,
    pub diagnostics: SimDiagnostics,
}

/// Roll a ball until it stops, drops into the hole, or the time cap fires.
///
/// Friction opposes the current velocity. Backspin acts along the *initial*
/// roll direction (topspin pushes forward), and sidespin pushes sideways
/// relative to the current heading.
pub fn simulate_roll(
    position: Vector3,
    velocity: Vector3,
    surface: SurfaceType,
    initial_backspin_rpm: f32,
    initial_sidespin_rpm: f32,
    start_time: f32,
    geometry: Option<&dyn HoleGeometry>,
    ctx: &ShotContext,
) -> RollResult {
    let tuning = &ctx.tuning.roll;
    let dt = tuning.dt;
    let mut diagnostics = SimDiagnostics::default();

    let mut surface = surface;
    let mut props = ctx.surface_properties(surface, &mut diagnostics);
    let mut position = position;
    let mut velocity = horizontal(&velocity);
    let mut backspin = initial_backspin_rpm;
    let mut sidespin = initial_sidespin_rpm;
    let roll_direction = horizontal_direction(&velocity, tuning.min_speed_mps);
    let hole = geometry.map(|g| g.hole_position());

    let mut time = start_time;
    let mut since_resample = 0.0_f32;
    let mut is_holed_out = false;
    let mut trajectory = vec![TrajectorySample::new(position, time)];

    let step_limit = step_budget(tuning.max_time_s, dt);
    let mut steps = 0_u32;
    loop {
        let speed = horizontal_speed(&velocity);
        if speed < tuning.min_speed_mps {
            break;
        }
        if time - start_time >= tuning.max_time_s || steps >= step_limit {
            diagnostics.safety_cutoffs += 1;
            warn!(stage = "roll", time, steps, speed, "roll safety cutoff reached");
            break;
        }
        steps += 1;

        backspin =
            decay_spin_rpm(backspin, tuning.backspin_decay_rpm_per_s, dt, tuning.min_spin_rpm);
        sidespin =
            decay_spin_rpm(sidespin, tuning.sidespin_decay_rpm_per_s, dt, tuning.min_spin_rpm);

        let heading = velocity / speed;
        let friction_decel = props.friction_coefficient * ball::GRAVITY;
        let spin_decel = backspin * tuning.backspin_decel_per_rpm * props.spin_response_factor;

        // Stop outright instead of integrating through zero
        let opposing = friction_decel + spin_decel.max(0.0);
        if speed <= opposing * dt {
            velocity = Vector3::zeros();
            break;
        }

        let mut accel = -heading * friction_decel;
        if let Some(dir) = roll_direction {
            accel -= dir * spin_decel;
        }
        if sidespin != 0.0 {
            accel += right_of(&heading) * (sidespin * tuning.sidespin_accel_per_rpm);
        }

        velocity += accel * dt;
        velocity.y = 0.0;
        let step = velocity * dt;
        position += step;
        time += dt;
        since_resample += step.norm();

        if let Some(geo) = geometry {
            if since_resample >= tuning.resample_distance_m {
                since_resample -= tuning.resample_distance_m;
                let under = geo.surface_at(position.x, position.z);
                if under != surface {
                    debug!(
                        from = %surface,
                        to = %under,
                        x = position.x,
                        z = position.z,
                        "roll crossed onto new surface"
                    );
                    surface = under;
                    props = ctx.surface_properties(surface, &mut diagnostics);
                }
            }
        }

        if let Some(hole) = hole {
            if surface == SurfaceType::Green
                && horizontal_distance(&position, &hole) <= tuning.hole_capture_radius_m
                && horizontal_speed(&velocity) <= tuning.hole_max_entry_speed_mps
            {
                position = Vector3::new(hole.x, hole.y - tuning.hole_sunk_depth_m, hole.z);
                velocity = Vector3::zeros();
                is_holed_out = true;
                trajectory.push(TrajectorySample::new(position, time));
                debug!(time, "ball holed out");
                break;
            }
        }

        trajectory.push(TrajectorySample::new(position, time));
    }

    if !is_holed_out {
        position.y = props.rest_height.resting_center_y(GROUND_Y);
        if let Some(last) = trajectory.last_mut() {
            last.position.y = position.y;
        }
    }

    debug!(
        x = position.x,
        z = position.z,
        surface = %surface,
        holed = is_holed_out,
        final_speed = horizontal_speed(&velocity),
        "roll finished"
    );

    RollResult {
        final_position: position,
        is_holed_out,
        trajectory,
        end_time: time,
        surface,
        diagnostics,
    }
}
