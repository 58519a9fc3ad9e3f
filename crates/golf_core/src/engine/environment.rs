//! Weather snapshot for a single shot.
//!
//! World heading convention: +Z is north, and because y is up the golfer's
//! right when facing north (east) is -X.

use serde::{Deserialize, Serialize};

use super::physics_constants::air;
use super::types::Vector3;

/// Wind and temperature, read once at the start of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConditions {
    /// Wind speed (m/s)
    #[serde(default)]
    pub wind_speed_mps: f32,
    /// Direction the wind blows FROM, degrees clockwise from north
    #[serde(default)]
    pub wind_direction_deg: f32,
    /// Air temperature (°C)
    #[serde(default = "default_temperature")]
    pub temperature_c: f32,
}

fn default_temperature() -> f32 {
    air::STANDARD_TEMPERATURE_C
}

impl Default for EnvironmentConditions {
    fn default() -> Self {
        Self::calm()
    }
}

impl EnvironmentConditions {
    /// No wind at standard temperature.
    pub fn calm() -> Self {
        Self { wind_speed_mps: 0.0, wind_direction_deg: 0.0, temperature_c: air::STANDARD_TEMPERATURE_C }
    }

    pub fn new(wind_speed_mps: f32, wind_direction_deg: f32, temperature_c: f32) -> Self {
        Self { wind_speed_mps, wind_direction_deg, temperature_c }
    }

    /// Air density (kg/m³) from the ideal gas law at sea-level pressure.
    pub fn air_density(&self) -> f32 {
        let celsius = if self.temperature_c.is_finite() {
            self.temperature_c.clamp(air::MIN_TEMPERATURE_C, air::MAX_TEMPERATURE_C)
        } else {
            air::STANDARD_TEMPERATURE_C
        };
        air::SEA_LEVEL_PRESSURE_PA / (air::GAS_CONSTANT_DRY_AIR * (celsius + air::KELVIN_OFFSET))
    }

    /// Velocity of the air mass (m/s): opposite to the direction it blows from.
    pub fn wind_velocity(&self) -> Vector3 {
        if !self.wind_speed_mps.is_finite() || self.wind_speed_mps <= 0.0 {
            return Vector3::zeros();
        }
        let theta = self.wind_direction_deg.to_radians();
        // Unit vector toward the source: north = +Z, east = -X
        let toward_source = Vector3::new(-theta.sin(), 0.0, theta.cos());
        -toward_source * self.wind_speed_mps
    }
}
