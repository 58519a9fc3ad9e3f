//! Shot pipelines.
//!
//! - Full shot: flight → (skip-bounce shortcut | bounce) → roll
//! - Putt: roll only
//!
//! Each stage's result is consumed by value; trajectories are concatenated
//! so timestamps keep increasing across stage boundaries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bounce::{simulate_bounce, GROUND_Y};
use super::club::ClubAeroProfile;
use super::context::ShotContext;
use super::course::HoleGeometry;
use super::diagnostics::SimDiagnostics;
use super::flight::simulate_flight;
use super::obstacle::Obstacle;
use super::physics_constants::{putt, shot};
use super::roll::simulate_roll;
use super::surface::SurfaceType;
use super::types::{append_sample, horizontal, right_of, TrajectorySample, Vector3};
use super::units::{mph_to_mps, rad_s_to_rpm};

/// Launch monitor style inputs for a full shot.
///
/// Aim is in degrees clockwise from +Z (north) when viewed from above, so a
/// positive aim points to the golfer's right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    pub ball_speed_mps: f32,
    pub launch_angle_deg: f32,
    #[serde(default)]
    pub aim_direction_deg: f32,
    pub backspin_rpm: f32,
    #[serde(default)]
    pub sidespin_rpm: f32,
}

impl LaunchConditions {
    pub fn new(
        ball_speed_mps: f32,
        launch_angle_deg: f32,
        aim_direction_deg: f32,
        backspin_rpm: f32,
        sidespin_rpm: f32,
    ) -> Self {
        Self { ball_speed_mps, launch_angle_deg, aim_direction_deg, backspin_rpm, sidespin_rpm }
    }

    pub fn from_mph(
        ball_speed_mph: f32,
        launch_angle_deg: f32,
        aim_direction_deg: f32,
        backspin_rpm: f32,
        sidespin_rpm: f32,
    ) -> Self {
        Self::new(
            mph_to_mps(ball_speed_mph),
            launch_angle_deg,
            aim_direction_deg,
            backspin_rpm,
            sidespin_rpm,
        )
    }

    /// Horizontal unit vector of the aim line.
    pub fn aim_direction(&self) -> Vector3 {
        aim_vector(self.aim_direction_deg)
    }

    pub fn initial_velocity(&self) -> Vector3 {
        let (sin_la, cos_la) = self.launch_angle_deg.to_radians().sin_cos();
        let ground = self.aim_direction() * (self.ball_speed_mps * cos_la);
        Vector3::new(ground.x, self.ball_speed_mps * sin_la, ground.z)
    }

    /// Spin about local axes in RPM (x = backspin, y = sidespin).
    pub fn spin_rpm(&self) -> Vector3 {
        Vector3::new(self.backspin_rpm, self.sidespin_rpm, 0.0)
    }
}

/// Heading in degrees clockwise from +Z → horizontal unit vector.
pub fn aim_vector(direction_deg: f32) -> Vector3 {
    let (sin, cos) = direction_deg.to_radians().sin_cos();
    Vector3::new(-sin, 0.0, cos)
}

/// Everything downstream needs to animate and score a shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotOutcome {
    pub trajectory: Vec<TrajectorySample>,
    pub final_position: Vector3,
    pub is_holed_out: bool,
    pub carry_distance: f32,
    pub peak_height: f32,
    pub time_of_flight: f32,
    /// Signed offset from the aim line (positive = right).
    pub side_distance: f32,
    pub surface_at_rest: SurfaceType,
    pub total_time: f32,
    pub bounce_count: u8,
    pub landing_angle_deg: f32,
    pub diagnostics: SimDiagnostics,
}

fn classify(
    geometry: Option<&dyn HoleGeometry>,
    position: &Vector3,
    fallback: SurfaceType,
) -> SurfaceType {
    geometry.map(|g| g.surface_at(position.x, position.z)).unwrap_or(fallback)
}

fn side_distance(start: &Vector3, end: &Vector3, aim: &Vector3) -> f32 {
    horizontal(&(end - start)).dot(&right_of(aim))
}

/// Resolve a full or chip shot from launch to rest.
pub fn resolve_full_shot(
    start: Vector3,
    launch: &LaunchConditions,
    club: &ClubAeroProfile,
    obstacles: &[Obstacle],
    geometry: Option<&dyn HoleGeometry>,
    ctx: &ShotContext,
) -> ShotOutcome {
    let flight = simulate_flight(
        start,
        launch.initial_velocity(),
        launch.spin_rpm(),
        club,
        obstacles,
        ctx,
    );
    let mut diagnostics = flight.diagnostics;
    let mut trajectory = flight.trajectory;
    let landing = flight.landing;

    let landing_surface = classify(geometry, &landing.position, ctx.default_surface);
    let landing_props = ctx.surface_properties(landing_surface, &mut diagnostics);
    let skip_bounce = !landing_props.is_no_bounce()
        && flight.landing_angle_deg < shot::SKIP_BOUNCE_MAX_ANGLE_DEG
        && landing.speed() < shot::SKIP_BOUNCE_MAX_SPEED_MPS;

    debug!(
        club = %club.name,
        carry = flight.carry_distance,
        landing_angle = flight.landing_angle_deg,
        surface = %landing_surface,
        skip_bounce,
        "handing off from flight"
    );

    let mut bounce_count = 0;
    let (roll_position, roll_velocity, roll_surface, backspin, sidespin, roll_start) =
        if skip_bounce {
            let mut position = landing.position;
            position.y = landing_props.rest_height.resting_center_y(GROUND_Y);
            (
                position,
                horizontal(&landing.velocity),
                landing_surface,
                rad_s_to_rpm(landing.spin.x),
                rad_s_to_rpm(landing.spin.y),
                flight.time_of_flight,
            )
        } else {
            let bounce = simulate_bounce(
                landing.position,
                landing.velocity,
                flight.landing_angle_deg,
                landing.spin,
                landing_surface,
                flight.time_of_flight,
                geometry,
                ctx,
            );
            diagnostics.merge(&bounce.diagnostics);
            for sample in bounce.trajectory {
                append_sample(&mut trajectory, sample);
            }
            bounce_count = bounce.bounce_count;

            if bounce.stopped {
                let final_position = bounce.final_state.position;
                return ShotOutcome {
                    trajectory,
                    final_position,
                    is_holed_out: false,
                    carry_distance: flight.carry_distance,
                    peak_height: flight.peak_height,
                    time_of_flight: flight.time_of_flight,
                    side_distance: side_distance(&start, &final_position, &launch.aim_direction()),
                    surface_at_rest: bounce.surface,
                    total_time: bounce.end_time,
                    bounce_count,
                    landing_angle_deg: flight.landing_angle_deg,
                    diagnostics,
                };
            }

            let state = bounce.final_state;
            (
                state.position,
                state.velocity,
                bounce.surface,
                rad_s_to_rpm(state.spin.x),
                rad_s_to_rpm(state.spin.y),
                bounce.end_time,
            )
        };

    let roll = simulate_roll(
        roll_position,
        roll_velocity,
        roll_surface,
        backspin,
        sidespin,
        roll_start,
        geometry,
        ctx,
    );
    diagnostics.merge(&roll.diagnostics);
    for sample in roll.trajectory {
        append_sample(&mut trajectory, sample);
    }

    ShotOutcome {
        trajectory,
        final_position: roll.final_position,
        is_holed_out: roll.is_holed_out,
        carry_distance: flight.carry_distance,
        peak_height: flight.peak_height,
        time_of_flight: flight.time_of_flight,
        side_distance: side_distance(&start, &roll.final_position, &launch.aim_direction()),
        surface_at_rest: roll.surface,
        total_time: roll.end_time,
        bounce_count,
        landing_angle_deg: flight.landing_angle_deg,
        diagnostics,
    }
}

/// Resolve a putt: roll only, no vertical velocity, a little backspin.
pub fn resolve_putt(
    start: Vector3,
    speed_mps: f32,
    direction_deg: f32,
    surface: SurfaceType,
    geometry: Option<&dyn HoleGeometry>,
    ctx: &ShotContext,
) -> ShotOutcome {
    let aim = aim_vector(direction_deg);
    let roll = simulate_roll(
        start,
        aim * speed_mps,
        surface,
        putt::BACKSPIN_RPM,
        0.0,
        0.0,
        geometry,
        ctx,
    );

    ShotOutcome {
        final_position: roll.final_position,
        is_holed_out: roll.is_holed_out,
        carry_distance: 0.0,
        peak_height: start.y,
        time_of_flight: 0.0,
        side_distance: side_distance(&start, &roll.final_position, &aim),
        surface_at_rest: roll.surface,
        total_time: roll.end_time,
        bounce_count: 0,
        landing_angle_deg: 0.0,
        diagnostics: roll.diagnostics,
        trajectory: roll.trajectory,
    }
}
