//! Club aerodynamic profiles and the standard club catalog.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::physics_constants::flight;
use crate::error::{Result, SimError};

/// Per-club aerodynamic constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubAeroProfile {
    pub name: String,
    /// Magnus coefficient for the backspin-driven (vertical) lift, `a = C × (ω × v)`.
    /// `None` falls back to `flight::DEFAULT_BACKSPIN_LIFT_COEFFICIENT`.
    #[serde(default)]
    pub backspin_lift_coefficient: Option<f32>,
    /// Extra upward acceleration (m/s²) while backspin remains, scaled by the
    /// fraction of launch backspin still present.
    #[serde(default)]
    pub lift_bias: f32,
}

impl ClubAeroProfile {
    pub fn new(name: &str, backspin_lift_coefficient: Option<f32>, lift_bias: f32) -> Self {
        Self { name: name.to_string(), backspin_lift_coefficient, lift_bias }
    }

    /// Generic profile with no club-specific tuning.
    pub fn generic() -> Self {
        Self::new("generic", None, 0.0)
    }

    #[inline]
    pub fn effective_backspin_lift(&self) -> f32 {
        self.backspin_lift_coefficient.unwrap_or(flight::DEFAULT_BACKSPIN_LIFT_COEFFICIENT)
    }
}

/// Lookup table of club profiles keyed by canonical name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubCatalog {
    clubs: Vec<ClubAeroProfile>,
}

static STANDARD_CATALOG: Lazy<ClubCatalog> = Lazy::new(|| {
    ClubCatalog::new(vec![
        ClubAeroProfile::new("driver", Some(9.0e-4), 0.3),
        ClubAeroProfile::new("3-wood", Some(6.5e-4), 0.3),
        ClubAeroProfile::new("5-wood", Some(5.5e-4), 0.25),
        ClubAeroProfile::new("hybrid", Some(4.6e-4), 0.25),
        ClubAeroProfile::new("4-iron", Some(4.0e-4), 0.2),
        ClubAeroProfile::new("5-iron", Some(3.6e-4), 0.2),
        ClubAeroProfile::new("6-iron", Some(3.2e-4), 0.2),
        ClubAeroProfile::new("7-iron", Some(2.9e-4), 0.2),
        ClubAeroProfile::new("8-iron", Some(2.6e-4), 0.15),
        ClubAeroProfile::new("9-iron", Some(2.4e-4), 0.15),
        ClubAeroProfile::new("pitching-wedge", Some(2.2e-4), 0.15),
        ClubAeroProfile::new("gap-wedge", Some(2.0e-4), 0.1),
        ClubAeroProfile::new("sand-wedge", Some(1.9e-4), 0.1),
        ClubAeroProfile::new("lob-wedge", Some(1.8e-4), 0.1),
        ClubAeroProfile::new("putter", None, 0.0),
    ])
});

/// Lowercase, hyphen-separated club key ("7 Iron" → "7-iron").
fn canonical_club_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

impl ClubCatalog {
    pub fn new(clubs: Vec<ClubAeroProfile>) -> Self {
        let clubs = clubs
            .into_iter()
            .map(|mut c| {
                c.name = canonical_club_key(&c.name);
                c
            })
            .collect();
        Self { clubs }
    }

    /// The built-in 14-club bag plus putter.
    pub fn standard() -> &'static ClubCatalog {
        &STANDARD_CATALOG
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clubs.iter().map(|c| c.name.as_str())
    }

    /// Strict lookup.
    pub fn get(&self, name: &str) -> Result<&ClubAeroProfile> {
        let key = canonical_club_key(name);
        self.clubs
            .iter()
            .find(|c| c.name == key)
            .ok_or_else(|| SimError::UnknownClub(name.to_string()))
    }

    /// Lookup that falls back to a generic profile for unknown names.
    pub fn get_or_default(&self, name: &str) -> ClubAeroProfile {
        match self.get(name) {
            Ok(profile) => profile.clone(),
            Err(_) => {
                tracing::debug!(club = name, "unknown club, using generic aero profile");
                ClubAeroProfile { name: canonical_club_key(name), ..ClubAeroProfile::generic() }
            }
        }
    }
}
