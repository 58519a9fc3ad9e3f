//! Point/circular obstacles (trees) hit during flight.
//!
//! Only horizontal velocity is affected. Deflection is the one randomized
//! behaviour in the simulator; it draws from a `ChaCha8Rng` seeded per shot so
//! identical inputs still give identical trajectories.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::types::Vector3;

/// Size class presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleSize {
    Small,
    Medium,
    Large,
}

impl ObstacleSize {
    /// Canopy radius (m)
    pub fn radius(&self) -> f32 {
        match self {
            ObstacleSize::Small => 1.5,
            ObstacleSize::Medium => 3.0,
            ObstacleSize::Large => 5.0,
        }
    }

    /// Height above ground (m)
    pub fn height(&self) -> f32 {
        match self {
            ObstacleSize::Small => 4.0,
            ObstacleSize::Medium => 9.0,
            ObstacleSize::Large => 16.0,
        }
    }

    /// Horizontal speed retained on contact
    pub fn slowdown_factor(&self) -> f32 {
        match self {
            ObstacleSize::Small => 0.7,
            ObstacleSize::Medium => 0.5,
            ObstacleSize::Large => 0.3,
        }
    }

    pub fn deflection_probability(&self) -> f32 {
        match self {
            ObstacleSize::Small => 0.4,
            ObstacleSize::Medium => 0.6,
            ObstacleSize::Large => 0.8,
        }
    }

    pub fn max_deflection_deg(&self) -> f32 {
        match self {
            ObstacleSize::Small => 25.0,
            ObstacleSize::Medium => 45.0,
            ObstacleSize::Large => 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Centre on the ground plane (x, z)
    pub position: (f32, f32),
    pub radius: f32,
    /// Vertical extent above ground (m)
    pub height: f32,
    /// Fraction of horizontal speed kept on contact (0..1)
    pub slowdown_factor: f32,
    /// Chance of a random heading change on contact (0..1)
    pub deflection_probability: f32,
    pub max_deflection_deg: f32,
}

impl Obstacle {
    pub fn tree(x: f32, z: f32, size: ObstacleSize) -> Self {
        Self {
            position: (x, z),
            radius: size.radius(),
            height: size.height(),
            slowdown_factor: size.slowdown_factor(),
            deflection_probability: size.deflection_probability(),
            max_deflection_deg: size.max_deflection_deg(),
        }
    }

    /// Whether a ball of `ball_radius` centred at `position` overlaps this obstacle.
    pub fn overlaps(&self, position: &Vector3, ball_radius: f32) -> bool {
        if position.y < 0.0 || position.y > self.height + ball_radius {
            return false;
        }
        let dx = position.x - self.position.0;
        let dz = position.z - self.position.1;
        let reach = self.radius + ball_radius;
        dx * dx + dz * dz <= reach * reach
    }
}

/// Per-flight contact state.
///
/// An obstacle acts once per entry: staying inside the canopy for several
/// steps does not compound the slowdown.
#[derive(Debug, Clone)]
pub struct ObstacleTracker {
    inside: Vec<bool>,
    rng: ChaCha8Rng,
    hits: u32,
}

impl ObstacleTracker {
    pub fn new(obstacle_count: usize, seed: u64) -> Self {
        Self { inside: vec![false; obstacle_count], rng: ChaCha8Rng::seed_from_u64(seed), hits: 0 }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }
}

/// Apply slowdown/deflection for every obstacle the ball newly enters.
/// Returns the (possibly modified) horizontal velocity `(vx, vz)`.
pub fn resolve_obstacle_hit(
    position: &Vector3,
    ball_radius: f32,
    velocity_xz: (f32, f32),
    obstacles: &[Obstacle],
    tracker: &mut ObstacleTracker,
) -> (f32, f32) {
    let (mut vx, mut vz) = velocity_xz;
    for (idx, obstacle) in obstacles.iter().enumerate() {
        let overlapping = obstacle.overlaps(position, ball_radius);
        let was_inside = tracker.inside.get(idx).copied().unwrap_or(false);
        if let Some(flag) = tracker.inside.get_mut(idx) {
            *flag = overlapping;
        }
        if !overlapping || was_inside {
            continue;
        }

        tracker.hits += 1;
        let keep = obstacle.slowdown_factor.clamp(0.0, 1.0);
        vx *= keep;
        vz *= keep;

        if tracker.rng.gen::<f32>() < obstacle.deflection_probability {
            let max = obstacle.max_deflection_deg.abs().to_radians();
            let angle = if max > 0.0 { tracker.rng.gen_range(-max..=max) } else { 0.0 };
            let (sin, cos) = angle.sin_cos();
            let (rx, rz) = (vx * cos - vz * sin, vx * sin + vz * cos);
            vx = rx;
            vz = rz;
        }

        tracing::debug!(
            obstacle = idx,
            x = position.x,
            y = position.y,
            z = position.z,
            "ball clipped obstacle"
        );
    }
    (vx, vz)
}
