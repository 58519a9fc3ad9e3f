//! JSON entry point for the host game.
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "seed": 7,
//!   "shot": { "kind": "full", "club": "7-iron",
//!             "launch": { "ball_speed_mps": 53.0, "launch_angle_deg": 17.0, "backspin_rpm": 7000.0 } },
//!   "environment": { "wind_speed_mps": 4.0, "wind_direction_deg": 270.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::{
    resolve_full_shot, resolve_putt, ClubCatalog, EnvironmentConditions, HoleGeometry, HoleLayout,
    LaunchConditions, Obstacle, PhysicsTuning, ShotContext, ShotOutcome, SurfaceClassifier,
    SurfaceType, Vector3,
};
use crate::error::{Result, SimError};
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotRequest {
    pub schema_version: u8,
    /// Seed for obstacle deflection
    #[serde(default)]
    pub seed: u64,
    pub shot: ShotSpec,
    #[serde(default)]
    pub environment: EnvironmentConditions,
    #[serde(default)]
    pub hole: Option<HoleLayout>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    /// "default" | "arcade" | "simulation". Absent: `GOLF_TUNING_PROFILE`, else default.
    #[serde(default)]
    pub tuning_profile: Option<String>,
    /// Lie used when no hole layout is supplied (default FAIRWAY)
    #[serde(default)]
    pub default_surface: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShotSpec {
    Full {
        #[serde(default)]
        start: Vector3,
        club: String,
        launch: LaunchConditions,
    },
    Putt {
        #[serde(default)]
        start: Vector3,
        speed_mps: f32,
        /// Degrees clockwise from +Z
        #[serde(default)]
        direction_deg: f32,
        /// Lie under the ball; classified from the hole layout when absent
        #[serde(default)]
        surface: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub outcome: ShotOutcome,
}

fn require_finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidRequest(format!("{name} must be finite, got {value}")))
    }
}

fn require_finite_vec(name: &str, v: &Vector3) -> Result<()> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SimError::InvalidRequest(format!("{name} must be finite")))
    }
}

fn validate_request(request: &ShotRequest) -> Result<()> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::InvalidRequest(format!(
            "unsupported schema version: {}",
            request.schema_version
        )));
    }

    match &request.shot {
        ShotSpec::Full { start, launch, .. } => {
            require_finite_vec("start", start)?;
            require_finite("ball_speed_mps", launch.ball_speed_mps)?;
            require_finite("launch_angle_deg", launch.launch_angle_deg)?;
            require_finite("aim_direction_deg", launch.aim_direction_deg)?;
            require_finite("backspin_rpm", launch.backspin_rpm)?;
            require_finite("sidespin_rpm", launch.sidespin_rpm)?;
            if launch.ball_speed_mps < 0.0 {
                return Err(SimError::InvalidRequest("ball speed must be >= 0".to_string()));
            }
        }
        ShotSpec::Putt { start, speed_mps, direction_deg, .. } => {
            require_finite_vec("start", start)?;
            require_finite("speed_mps", *speed_mps)?;
            require_finite("direction_deg", *direction_deg)?;
            if *speed_mps < 0.0 {
                return Err(SimError::InvalidRequest("putt speed must be >= 0".to_string()));
            }
        }
    }

    let env = &request.environment;
    require_finite("wind_speed_mps", env.wind_speed_mps)?;
    require_finite("wind_direction_deg", env.wind_direction_deg)?;
    require_finite("temperature_c", env.temperature_c)?;

    for obstacle in &request.obstacles {
        if !obstacle.radius.is_finite() || obstacle.radius < 0.0 {
            return Err(SimError::InvalidRequest(format!(
                "obstacle radius must be >= 0, got {}",
                obstacle.radius
            )));
        }
    }

    if let Some(hole) = &request.hole {
        hole.validate()?;
    }
    Ok(())
}

fn build_context(request: &ShotRequest) -> Result<ShotContext> {
    let tuning = match &request.tuning_profile {
        Some(profile) => PhysicsTuning::from_profile(profile),
        None => PhysicsTuning::from_env_or_default(),
    };
    let mut ctx = ShotContext::default()
        .with_environment(request.environment)
        .with_tuning(tuning)
        .with_obstacle_seed(request.seed);
    if let Some(key) = &request.default_surface {
        ctx = ctx.with_default_surface(key.parse()?);
    }
    ctx.validate()?;
    Ok(ctx)
}

/// Resolve one typed request.
pub fn resolve_shot(request: &ShotRequest) -> Result<ShotResponse> {
    validate_request(request)?;
    let ctx = build_context(request)?;
    let geometry = request.hole.as_ref().map(|h| h as &dyn HoleGeometry);

    let outcome = match &request.shot {
        ShotSpec::Full { start, club, launch } => {
            let profile = ClubCatalog::standard().get(club)?;
            resolve_full_shot(*start, launch, profile, &request.obstacles, geometry, &ctx)
        }
        ShotSpec::Putt { start, speed_mps, direction_deg, surface } => {
            let lie = match surface {
                Some(key) => key.parse::<SurfaceType>()?,
                None => request
                    .hole
                    .as_ref()
                    .map(|h| h.surface_at(start.x, start.z))
                    .unwrap_or(SurfaceType::Green),
            };
            resolve_putt(*start, *speed_mps, *direction_deg, lie, geometry, &ctx)
        }
    };

    tracing::debug!(
        holed = outcome.is_holed_out,
        surface = %outcome.surface_at_rest,
        samples = outcome.trajectory.len(),
        "shot resolved"
    );
    Ok(ShotResponse { schema_version: SCHEMA_VERSION, outcome })
}

/// Resolve a shot from a JSON request, returning the JSON response.
pub fn resolve_shot_json(request_json: &str) -> Result<String> {
    let request: ShotRequest = serde_json::from_str(request_json)?;
    let response = resolve_shot(&request)?;
    Ok(serde_json::to_string(&response)?)
}
