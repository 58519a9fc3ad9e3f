//! Bounce stage: ground impacts interleaved with short ballistic hops.
//!
//! ```text
//!   landing ──► Impact ──(hop high enough)──► Airborne ──(back at rest height)──┐
//!                 ▲                                                             │
//!                 └─────────────────────────────────────────────────────────────┘
//!               Impact ──(hop too small / impact cap)──► hand off to roll
//! ```
//!
//! Penalty surfaces (negative restitution) short-circuit: the ball stops where it lands.

use tracing::{debug, warn};

use super::config::{step_budget, BounceTuning};
use super::context::ShotContext;
use super::course::HoleGeometry;
use super::diagnostics::SimDiagnostics;
use super::physics_constants::ball;
use super::surface::{SurfaceProperties, SurfaceType};
use super::types::{
    append_sample, horizontal, horizontal_direction, MotionState, TrajectorySample, Vector3,
};
use super::units::{rad_s_to_rpm, rpm_to_rad_s};

/// Nominal ground plane height.
pub(crate) const GROUND_Y: f32 = 0.0;

/// Result of the bounce stage.
#[derive(Debug, Clone, PartialEq)]
pub struct BounceResult {
    /// Ball at rest height with horizontal velocity only; spin in rad/s.
    pub final_state: MotionState,
    pub trajectory: Vec<TrajectorySample>,
    pub bounce_count: u8,
    /// Shot clock when the stage ended.
    pub end_time: f32,
    /// Surface under the ball at the last impact.
    pub surface: SurfaceType,
    /// Ball came to a dead stop on a penalty surface; there is nothing to roll.
    pub stopped: bool,
    pub diagnostics: SimDiagnostics,
}

/// Velocity and spin immediately after one ground contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactOutcome {
    /// Rebound velocity (vertical component is upward).
    pub velocity: Vector3,
    pub backspin_rpm: f32,
    pub sidespin_rpm: f32,
    /// Restitution actually applied after the spin-grip reduction.
    pub restitution: f32,
    /// Fraction of horizontal speed removed by scrub.
    pub scrub: f32,
}

/// Apply one impact to an incoming velocity.
///
/// Landing angle only contributes to scrub on the first contact.
pub fn impact_response(
    incoming: &Vector3,
    backspin_rpm: f32,
    sidespin_rpm: f32,
    props: &SurfaceProperties,
    landing_angle_deg: f32,
    first_impact: bool,
    tuning: &BounceTuning,
) -> ImpactOutcome {
    let spin_norm = (backspin_rpm / tuning.spin_reference_rpm).clamp(0.0, 1.0);
    let firmness =
        (props.bounce_coefficient / tuning.firmness_reference_cor).clamp(0.0, tuning.max_firmness);
    let restitution =
        (props.bounce_coefficient - tuning.spin_grip_cor_reduction * spin_norm * firmness).max(0.0);

    let angle_term = if first_impact {
        tuning.scrub_landing_angle * (landing_angle_deg.clamp(0.0, 90.0) / 90.0)
    } else {
        0.0
    };
    let scrub = (tuning.scrub_base + tuning.scrub_spin * spin_norm + angle_term)
        .clamp(0.0, tuning.max_scrub);

    let mut ground_velocity = horizontal(incoming) * (1.0 - scrub);
    if let Some(dir) = horizontal_direction(incoming, 1e-4) {
        ground_velocity -=
            dir * (backspin_rpm * tuning.spin_grab_mps_per_rpm * props.spin_response_factor);
    }

    let retention = (1.0 - props.friction_coefficient * tuning.spin_decay_per_friction)
        .clamp(tuning.min_spin_retention, 1.0);

    ImpactOutcome {
        velocity: Vector3::new(ground_velocity.x, incoming.y.abs() * restitution, ground_velocity.z),
        backspin_rpm: backspin_rpm * retention,
        sidespin_rpm: sidespin_rpm * retention,
        restitution,
        scrub,
    }
}

/// Run impacts and hops from a flight landing until the ball settles into a roll.
///
/// `landing_spin` is rad/s about local axes (x = backspin, y = sidespin).
/// `start_time` continues the shot clock from the flight stage.
pub fn simulate_bounce(
    landing_position: Vector3,
    landing_velocity: Vector3,
    landing_angle_deg: f32,
    landing_spin: Vector3,
    surface_at_landing: SurfaceType,
    start_time: f32,
    geometry: Option<&dyn HoleGeometry>,
    ctx: &ShotContext,
) -> BounceResult {
    let tuning = &ctx.tuning.bounce;
    let mut diagnostics = SimDiagnostics::default();

    let mut position = landing_position;
    let mut velocity = landing_velocity;
    let mut backspin = rad_s_to_rpm(landing_spin.x);
    let mut sidespin = rad_s_to_rpm(landing_spin.y);
    let mut surface = surface_at_landing;
    let mut time = start_time;
    let mut trajectory = Vec::new();
    let mut bounce_count: u8 = 0;
    let mut stopped = false;

    loop {
        if bounce_count > 0 {
            if let Some(geo) = geometry {
                surface = geo.surface_at(position.x, position.z);
            }
        }
        let props = ctx.surface_properties(surface, &mut diagnostics);
        let rest_y = props.rest_height.resting_center_y(GROUND_Y);
        position.y = rest_y;

        if props.is_no_bounce() {
            debug!(surface = %surface, bounce_count, "ball stopped on penalty surface");
            velocity = Vector3::zeros();
            stopped = true;
            append_sample(&mut trajectory, TrajectorySample::new(position, time));
            break;
        }

        let impact = impact_response(
            &velocity,
            backspin,
            sidespin,
            &props,
            landing_angle_deg,
            bounce_count == 0,
            tuning,
        );
        bounce_count += 1;
        velocity = impact.velocity;
        backspin = impact.backspin_rpm;
        sidespin = impact.sidespin_rpm;
        append_sample(&mut trajectory, TrajectorySample::new(position, time));

        let hop_height = velocity.y * velocity.y / (2.0 * ball::GRAVITY);
        if hop_height < tuning.min_bounce_height_m || velocity.y < tuning.min_bounce_vy_mps {
            velocity.y = 0.0;
            break;
        }
        if bounce_count >= tuning.max_impacts {
            diagnostics.safety_cutoffs += 1;
            warn!(stage = "bounce", time, bounce_count, "bounce impact cap reached");
            velocity.y = 0.0;
            break;
        }

        // Airborne hop, gravity only
        let hop_limit = step_budget(tuning.max_hop_airtime_s, tuning.air_dt);
        let mut hop_steps = 0_u32;
        let mut airtime = 0.0_f32;
        loop {
            let can_step = hop_steps < hop_limit;
            if can_step {
                hop_steps += 1;
                velocity.y -= ball::GRAVITY * tuning.air_dt;
                position += velocity * tuning.air_dt;
                time += tuning.air_dt;
                airtime += tuning.air_dt;
            }

            let landed = can_step && position.y <= rest_y;
            let capped = !landed && (!can_step || airtime >= tuning.max_hop_airtime_s);
            if landed || capped {
                position.y = rest_y;
            }
            append_sample(&mut trajectory, TrajectorySample::new(position, time));

            if capped {
                diagnostics.safety_cutoffs += 1;
                warn!(stage = "bounce", time, airtime, "hop airtime cap reached, forcing landing");
                velocity.y = -velocity.y.abs();
            }
            if landed || capped {
                break;
            }
        }
    }

    debug!(
        bounce_count,
        surface = %surface,
        speed = velocity.norm(),
        backspin,
        "bounce phase finished"
    );

    let final_state = if stopped {
        MotionState::at_rest(position)
    } else {
        MotionState::new(
            position,
            velocity,
            Vector3::new(rpm_to_rad_s(backspin), rpm_to_rad_s(sidespin), 0.0),
        )
    };

    BounceResult {
        final_state,
        trajectory,
        bounce_count,
        end_time: time,
        surface,
        stopped,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::club::ClubCatalog;
    use crate::engine::course::UniformSurface;
    use crate::engine::flight::simulate_flight;
    use crate::engine::surface::SurfaceTable;

    fn spin_rpm(backspin: f32) -> Vector3 {
        Vector3::new(rpm_to_rad_s(backspin), 0.0, 0.0)
    }

    fn green_props() -> SurfaceProperties {
        *SurfaceTable::default().get(SurfaceType::Green).unwrap()
    }

    #[test]
    fn test_water_stops_dead() {
        let ctx = ShotContext::default();
        let result = simulate_bounce(
            Vector3::new(3.0, 0.004, 120.0),
            Vector3::new(0.0, -15.0, 25.0),
            31.0,
            spin_rpm(5000.0),
            SurfaceType::Water,
            4.2,
            None,
            &ctx,
        );
        assert!(result.stopped);
        assert_eq!(result.trajectory.len(), 1);
        assert_eq!(result.trajectory[0].timestamp, 4.2);
        assert_eq!(result.final_state, MotionState::at_rest(result.final_state.position));
        assert_eq!(result.bounce_count, 0);
        assert_eq!(result.end_time, 4.2);
        // Submerged lie sits below the plane
        assert!(result.final_state.position.y < 0.0);
        assert_eq!(result.final_state.position.x, 3.0);
    }

    #[test]
    fn test_scrub_grows_with_backspin() {
        let tuning = BounceTuning::default();
        let props = green_props();
        let incoming = Vector3::new(0.0, -12.0, 20.0);
        let mut last = -1.0;
        for rpm in [0.0, 2000.0, 4000.0, 6000.0, 8000.0] {
            let out = impact_response(&incoming, rpm, 0.0, &props, 30.0, true, &tuning);
            assert!(out.scrub > last);
            last = out.scrub;
        }
        // Saturated above the reference rate
        let beyond = impact_response(&incoming, 12_000.0, 0.0, &props, 30.0, true, &tuning);
        assert_eq!(beyond.scrub, last);
    }

    #[test]
    fn test_backspin_reduces_restitution() {
        let tuning = BounceTuning::default();
        let props = green_props();
        let incoming = Vector3::new(0.0, -12.0, 20.0);
        let none = impact_response(&incoming, 0.0, 0.0, &props, 30.0, true, &tuning);
        let lots = impact_response(&incoming, 4000.0, 0.0, &props, 30.0, true, &tuning);
        assert!((none.restitution - props.bounce_coefficient).abs() < 1e-6);
        assert!(lots.restitution < none.restitution);
        assert!(lots.velocity.y < none.velocity.y);
        assert!(lots.velocity.y > 0.0);
    }

    #[test]
    fn test_landing_angle_only_scrubs_first_impact() {
        let tuning = BounceTuning::default();
        let props = green_props();
        let incoming = Vector3::new(0.0, -8.0, 10.0);
        let first = impact_response(&incoming, 0.0, 0.0, &props, 45.0, true, &tuning);
        let later = impact_response(&incoming, 0.0, 0.0, &props, 45.0, false, &tuning);
        assert!((first.scrub - later.scrub - tuning.scrub_landing_angle * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_spin_decay_depends_on_friction() {
        let tuning = BounceTuning::default();
        let table = SurfaceTable::default();
        let incoming = Vector3::new(0.0, -8.0, 10.0);
        let on_green = impact_response(
            &incoming,
            6000.0,
            0.0,
            table.get(SurfaceType::Green).unwrap(),
            40.0,
            true,
            &tuning,
        );
        let in_bunker = impact_response(
            &incoming,
            6000.0,
            0.0,
            table.get(SurfaceType::Bunker).unwrap(),
            40.0,
            true,
            &tuning,
        );
        assert!(in_bunker.backspin_rpm < on_green.backspin_rpm);
        // Retention is floored
        assert!(in_bunker.backspin_rpm >= 6000.0 * tuning.min_spin_retention - 1e-3);
    }

    #[test]
    fn test_steep_landing_bounces_then_settles() {
        let ctx = ShotContext::default();
        let result = simulate_bounce(
            Vector3::new(0.0, 0.003, 150.0),
            Vector3::new(0.0, -18.0, 14.0),
            52.0,
            spin_rpm(4000.0),
            SurfaceType::Fairway,
            5.0,
            None,
            &ctx,
        );
        assert!(!result.stopped);
        assert!(result.bounce_count >= 2);
        assert!(result.bounce_count < ctx.tuning.bounce.max_impacts);
        assert_eq!(result.final_state.velocity.y, 0.0);
        assert!(result.final_state.velocity.z > 0.0);
        assert!(result.final_state.position.z > 150.0);
        assert!(result.end_time > 5.0);
        assert!(result.diagnostics.is_clean());

        for pair in result.trajectory.windows(2) {
            assert!(pair[1].timestamp > pair[0].timestamp);
        }
        let fairway = ctx.surfaces.get(SurfaceType::Fairway).unwrap();
        let rest_y = fairway.rest_height.resting_center_y(GROUND_Y);
        assert!((result.final_state.position.y - rest_y).abs() < 1e-6);
    }

    #[test]
    fn test_single_impact_without_hop() {
        // The outgoing ground velocity is the impact transform of the incoming one
        let ctx = ShotContext::default();
        let landing_velocity = Vector3::new(0.0, -0.9, 3.5);
        let landing_angle = 14.4;
        let result = simulate_bounce(
            Vector3::new(0.0, 0.002, 60.0),
            landing_velocity,
            landing_angle,
            spin_rpm(1500.0),
            SurfaceType::Fairway,
            2.0,
            None,
            &ctx,
        );
        let props = *ctx.surfaces.get(SurfaceType::Fairway).unwrap();
        let expected = impact_response(
            &landing_velocity,
            1500.0,
            0.0,
            &props,
            landing_angle,
            true,
            &ctx.tuning.bounce,
        );
        assert_eq!(result.bounce_count, 1);
        assert!((result.final_state.velocity.z - expected.velocity.z).abs() < 1e-5);
        assert!(result.final_state.velocity.x.abs() < 1e-6);
        assert_eq!(result.end_time, 2.0);
        assert_eq!(result.trajectory.len(), 1);
    }

    #[test]
    fn test_low_chip_hands_flight_landing_to_bounce() {
        let ctx = ShotContext::default();
        let wedge = ClubCatalog::standard().get_or_default("sand wedge");
        let launch = 12.0_f32.to_radians();
        let flight = simulate_flight(
            Vector3::new(0.0, 0.02, 0.0),
            Vector3::new(0.0, 3.5 * launch.sin(), 3.5 * launch.cos()),
            Vector3::new(1500.0, 0.0, 0.0),
            &wedge,
            &[],
            &ctx,
        );
        assert!(flight.landing_angle_deg < 20.0);
        assert!(flight.landing.speed() < 4.0);

        let result = simulate_bounce(
            flight.landing.position,
            flight.landing.velocity,
            flight.landing_angle_deg,
            flight.landing.spin,
            SurfaceType::Fairway,
            flight.time_of_flight,
            None,
            &ctx,
        );
        let props = *ctx.surfaces.get(SurfaceType::Fairway).unwrap();
        let expected = impact_response(
            &flight.landing.velocity,
            flight.landing_backspin_rpm(),
            flight.landing_sidespin_rpm(),
            &props,
            flight.landing_angle_deg,
            true,
            &ctx.tuning.bounce,
        );

        assert_eq!(result.bounce_count, 1);
        assert!(!result.stopped);
        assert!((result.final_state.velocity.z - expected.velocity.z).abs() < 1e-5);
        assert!(result.final_state.velocity.z > 0.0);
        assert_eq!(result.final_state.velocity.y, 0.0);
        assert!((rad_s_to_rpm(result.final_state.spin.x) - expected.backspin_rpm).abs() < 1e-2);
        // Same spot and clock as the flight landing
        assert_eq!(result.end_time, flight.time_of_flight);
        assert_eq!(result.trajectory[0].timestamp, flight.time_of_flight);
        assert_eq!(result.final_state.position.x, flight.landing.position.x);
        assert_eq!(result.final_state.position.z, flight.landing.position.z);
    }

    #[test]
    fn test_out_of_bounds_keeps_playing() {
        let ctx = ShotContext::default();
        let result = simulate_bounce(
            Vector3::new(0.0, 0.003, 150.0),
            Vector3::new(0.0, -15.0, 25.0),
            31.0,
            spin_rpm(3000.0),
            SurfaceType::OutOfBounds,
            4.0,
            None,
            &ctx,
        );
        assert!(!result.stopped);
        assert!(result.bounce_count >= 1);
        assert_eq!(result.surface, SurfaceType::OutOfBounds);
        assert!(result.final_state.velocity.z > 0.0);
    }

    #[test]
    fn test_stalled_hop_clock_still_terminates() {
        for air_dt in [0.0, f32::NAN] {
            let mut ctx = ShotContext::default();
            ctx.tuning.bounce.air_dt = air_dt;
            let result = simulate_bounce(
                Vector3::new(0.0, 0.003, 150.0),
                Vector3::new(0.0, -18.0, 14.0),
                52.0,
                spin_rpm(0.0),
                SurfaceType::Fairway,
                5.0,
                None,
                &ctx,
            );
            assert!(result.bounce_count <= ctx.tuning.bounce.max_impacts);
            assert!(result.diagnostics.safety_cutoffs >= 1);
            assert_eq!(result.end_time, 5.0);
            assert!(result.final_state.position.z.is_finite());
        }
    }

    #[test]
    fn test_second_impact_reclassifies_surface() {
        let ctx = ShotContext::default();
        let water_everywhere = UniformSurface::new(SurfaceType::Water, Vector3::new(0.0, 0.0, 500.0));
        let result = simulate_bounce(
            Vector3::new(0.0, 0.003, 150.0),
            Vector3::new(0.0, -18.0, 14.0),
            52.0,
            spin_rpm(2000.0),
            SurfaceType::Fairway,
            5.0,
            Some(&water_everywhere),
            &ctx,
        );
        // First contact uses the landing surface, the hop then lands in water
        assert_eq!(result.bounce_count, 1);
        assert!(result.stopped);
        assert_eq!(result.surface, SurfaceType::Water);
        assert_eq!(result.final_state.velocity, Vector3::zeros());
    }

    #[test]
    fn test_impact_cap_is_reported() {
        let mut ctx = ShotContext::default();
        ctx.tuning.bounce.max_impacts = 1;
        let result = simulate_bounce(
            Vector3::new(0.0, 0.003, 150.0),
            Vector3::new(0.0, -18.0, 14.0),
            52.0,
            spin_rpm(0.0),
            SurfaceType::Fairway,
            5.0,
            None,
            &ctx,
        );
        assert_eq!(result.bounce_count, 1);
        assert_eq!(result.diagnostics.safety_cutoffs, 1);
        assert_eq!(result.final_state.velocity.y, 0.0);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: water always stops the ball with one sample and no velocity
            #[test]
            fn prop_water_is_a_dead_stop(
                vx in -40.0f32..40.0,
                vy in -60.0f32..0.0,
                vz in -40.0f32..40.0,
                backspin in 0.0f32..12_000.0,
                start in 0.0f32..15.0,
            ) {
                let result = simulate_bounce(
                    Vector3::new(0.0, 0.0, 100.0),
                    Vector3::new(vx, vy, vz),
                    45.0,
                    Vector3::new(rpm_to_rad_s(backspin), 0.0, 0.0),
                    SurfaceType::Water,
                    start,
                    None,
                    &ShotContext::default(),
                );
                prop_assert!(result.stopped);
                prop_assert_eq!(result.trajectory.len(), 1);
                prop_assert_eq!(result.final_state.velocity, Vector3::zeros());
            }

            /// Property: impacts are capped and the hand-off is on the ground
            #[test]
            fn prop_bounce_terminates_on_ground(
                vy in -60.0f32..-0.1,
                vz in 0.0f32..50.0,
                backspin in -3000.0f32..12_000.0,
            ) {
                let ctx = ShotContext::default();
                let result = simulate_bounce(
                    Vector3::new(0.0, 0.0, 100.0),
                    Vector3::new(0.0, vy, vz),
                    30.0,
                    Vector3::new(rpm_to_rad_s(backspin), 0.0, 0.0),
                    SurfaceType::Green,
                    0.0,
                    None,
                    &ctx,
                );
                prop_assert!(result.bounce_count <= ctx.tuning.bounce.max_impacts);
                prop_assert_eq!(result.final_state.velocity.y, 0.0);
            }
        }
    }
}
