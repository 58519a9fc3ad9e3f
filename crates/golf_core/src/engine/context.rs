//! Per-shot read-only configuration.
//!
//! Everything a stage needs besides its kinematic inputs travels in a
//! `ShotContext` passed by reference. Nothing in the engine keeps state
//! between calls, so independent shots can run on any thread.

use serde::{Deserialize, Deserializer, Serialize};

use super::config::PhysicsTuning;
use super::diagnostics::SimDiagnostics;
use super::environment::EnvironmentConditions;
use super::surface::{SurfaceProperties, SurfaceTable, SurfaceType};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotContext {
    #[serde(default)]
    pub environment: EnvironmentConditions,
    #[serde(default)]
    pub surfaces: SurfaceTable,
    #[serde(default, deserialize_with = "deserialize_tuning")]
    pub tuning: PhysicsTuning,
    /// Surface assumed under the ball when no hole geometry is supplied.
    #[serde(default = "default_surface")]
    pub default_surface: SurfaceType,
    /// Seed for obstacle deflection.
    #[serde(default)]
    pub obstacle_seed: u64,
}

fn default_surface() -> SurfaceType {
    SurfaceType::Fairway
}

fn deserialize_tuning<'de, D>(deserializer: D) -> std::result::Result<PhysicsTuning, D::Error>
where
    D: Deserializer<'de>,
{
    let tuning = PhysicsTuning::deserialize(deserializer)?;
    tuning.validate().map_err(serde::de::Error::custom)?;
    Ok(tuning)
}

impl Default for ShotContext {
    fn default() -> Self {
        Self {
            environment: EnvironmentConditions::default(),
            surfaces: SurfaceTable::default(),
            tuning: PhysicsTuning::default(),
            default_surface: default_surface(),
            obstacle_seed: 0,
        }
    }
}

impl ShotContext {
    pub fn with_environment(mut self, environment: EnvironmentConditions) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_tuning(mut self, tuning: PhysicsTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_surfaces(mut self, surfaces: SurfaceTable) -> Self {
        self.surfaces = surfaces;
        self
    }

    pub fn with_default_surface(mut self, surface: SurfaceType) -> Self {
        self.default_surface = surface;
        self
    }

    pub fn with_obstacle_seed(mut self, seed: u64) -> Self {
        self.obstacle_seed = seed;
        self
    }

    /// Checks the tuning snapshot. Stages still terminate on a context that
    /// fails this, but their results are meaningless.
    pub fn validate(&self) -> Result<()> {
        self.tuning.validate()
    }

    /// Surface lookup that counts fallbacks into `diag`.
    pub(crate) fn surface_properties(
        &self,
        surface: SurfaceType,
        diag: &mut SimDiagnostics,
    ) -> SurfaceProperties {
        let (props, fell_back) = self.surfaces.get_or_default(surface);
        if fell_back {
            diag.surface_fallbacks += 1;
        }
        props
    }
}
