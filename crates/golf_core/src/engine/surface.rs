//! Surface types and their physical properties.
//!
//! ## Surface keys
//! Keys are matched case-insensitively after canonicalisation: uppercase,
//! any run of spaces/hyphens/underscores collapsed to a single `_`
//! ("light rough" → `LIGHT_ROUGH`).
//!
//! ## Sentinels
//! - `bounce_coefficient < 0` marks a penalty surface (water): no bounce, the ball stops.
//! - `RestHeight::BelowSurface` marks a lie under the nominal plane (submerged).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::physics_constants::{ball, surface};
use crate::error::{Result, SimError};

/// Enumerated course surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceType {
    Green,
    Fairway,
    LightRough,
    ThickRough,
    Bunker,
    Water,
    Tee,
    OutOfBounds,
}

impl SurfaceType {
    pub const ALL: [SurfaceType; 8] = [
        SurfaceType::Green,
        SurfaceType::Fairway,
        SurfaceType::LightRough,
        SurfaceType::ThickRough,
        SurfaceType::Bunker,
        SurfaceType::Water,
        SurfaceType::Tee,
        SurfaceType::OutOfBounds,
    ];

    /// Canonical key, e.g. `LIGHT_ROUGH`.
    pub fn key(&self) -> &'static str {
        match self {
            SurfaceType::Green => "GREEN",
            SurfaceType::Fairway => "FAIRWAY",
            SurfaceType::LightRough => "LIGHT_ROUGH",
            SurfaceType::ThickRough => "THICK_ROUGH",
            SurfaceType::Bunker => "BUNKER",
            SurfaceType::Water => "WATER",
            SurfaceType::Tee => "TEE",
            SurfaceType::OutOfBounds => "OUT_OF_BOUNDS",
        }
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Uppercase, single-underscore form of a surface key.
pub fn canonical_surface_key(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl FromStr for SurfaceType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let key = canonical_surface_key(s);
        SurfaceType::ALL
            .iter()
            .copied()
            .find(|t| t.key() == key)
            .ok_or_else(|| SimError::UnknownSurface(s.to_string()))
    }
}

/// Vertical offset of a resting ball relative to the nominal surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RestHeight {
    /// Ball centre sits `BALL_RADIUS + offset` above the plane (negative = nestled down).
    Offset(f32),
    /// Ball sinks below the plane (water).
    BelowSurface,
}

impl RestHeight {
    /// Y of a resting ball's centre over ground at `ground_y`.
    pub fn resting_center_y(&self, ground_y: f32) -> f32 {
        match self {
            RestHeight::Offset(offset) => ground_y + ball::RADIUS_M + offset,
            RestHeight::BelowSurface => ground_y - surface::SUBMERGED_DEPTH_M,
        }
    }
}

/// Per-surface physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceProperties {
    /// Rolling friction coefficient (deceleration = μ·g)
    pub friction_coefficient: f32,
    /// Coefficient of restitution; negative means "no bounce, stop here"
    pub bounce_coefficient: f32,
    /// How strongly ball spin bites on this surface (0..1+)
    pub spin_response_factor: f32,
    pub rest_height: RestHeight,
}

impl SurfaceProperties {
    pub const fn new(
        friction_coefficient: f32,
        bounce_coefficient: f32,
        spin_response_factor: f32,
        rest_height: RestHeight,
    ) -> Self {
        Self { friction_coefficient, bounce_coefficient, spin_response_factor, rest_height }
    }

    /// FAIRWAY-like values used when data is missing.
    pub const fn fallback() -> Self {
        Self::new(
            surface::FALLBACK_FRICTION,
            surface::FALLBACK_BOUNCE,
            surface::FALLBACK_SPIN_RESPONSE,
            RestHeight::Offset(0.0),
        )
    }

    /// Negative restitution sentinel: treat impact as a full stop.
    #[inline]
    pub fn is_no_bounce(&self) -> bool {
        self.bounce_coefficient < 0.0
    }

    pub fn validate(&self, surface: &str) -> Result<()> {
        let invalid = |reason: String| SimError::InvalidSurfaceProperties {
            surface: surface.to_string(),
            reason,
        };
        if !self.friction_coefficient.is_finite() || self.friction_coefficient < 0.0 {
            return Err(invalid(format!("friction must be >= 0, got {}", self.friction_coefficient)));
        }
        if !(-1.0..=1.0).contains(&self.bounce_coefficient) {
            return Err(invalid(format!("bounce must be in [-1, 1], got {}", self.bounce_coefficient)));
        }
        if !self.spin_response_factor.is_finite() || self.spin_response_factor < 0.0 {
            return Err(invalid(format!(
                "spin response must be >= 0, got {}",
                self.spin_response_factor
            )));
        }
        if let RestHeight::Offset(offset) = self.rest_height {
            if !offset.is_finite() {
                return Err(invalid("rest height offset must be finite".to_string()));
            }
        }
        Ok(())
    }
}

/// Surface lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTable {
    entries: BTreeMap<SurfaceType, SurfaceProperties>,
}

static DEFAULT_TABLE: Lazy<SurfaceTable> = Lazy::new(|| {
    use RestHeight::{BelowSurface, Offset};
    let mut entries = BTreeMap::new();
    entries.insert(SurfaceType::Green, SurfaceProperties::new(0.06, 0.35, 1.0, Offset(0.0)));
    entries.insert(SurfaceType::Fairway, SurfaceProperties::new(0.12, 0.40, 0.8, Offset(-0.002)));
    entries.insert(SurfaceType::LightRough, SurfaceProperties::new(0.25, 0.25, 0.5, Offset(-0.010)));
    entries.insert(SurfaceType::ThickRough, SurfaceProperties::new(0.45, 0.12, 0.3, Offset(-0.020)));
    entries.insert(SurfaceType::Bunker, SurfaceProperties::new(0.70, 0.05, 0.2, Offset(-0.015)));
    entries.insert(SurfaceType::Water, SurfaceProperties::new(1.00, -1.0, 0.0, BelowSurface));
    entries.insert(SurfaceType::Tee, SurfaceProperties::new(0.10, 0.40, 0.8, Offset(0.0)));
    entries.insert(SurfaceType::OutOfBounds, SurfaceProperties::new(0.30, 0.30, 0.5, Offset(-0.010)));
    SurfaceTable { entries }
});

impl Default for SurfaceTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl SurfaceTable {
    /// Table with no entries; every lookup falls back.
    pub fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    pub fn insert(&mut self, surface: SurfaceType, props: SurfaceProperties) -> Result<()> {
        props.validate(surface.key())?;
        self.entries.insert(surface, props);
        Ok(())
    }

    pub fn get(&self, surface: SurfaceType) -> Option<&SurfaceProperties> {
        self.entries.get(&surface)
    }

    /// Lookup that never fails. Returns `(properties, fell_back)`.
    pub fn get_or_default(&self, surface: SurfaceType) -> (SurfaceProperties, bool) {
        match self.entries.get(&surface) {
            Some(props) => (*props, false),
            None => {
                tracing::debug!(surface = %surface, "surface missing from table, using fallback");
                (SurfaceProperties::fallback(), true)
            }
        }
    }

    /// Lookup by free-form key ("light rough", "Green"...). Unknown keys fall back.
    pub fn properties_for_key(&self, key: &str) -> (SurfaceProperties, bool) {
        match key.parse::<SurfaceType>() {
            Ok(surface) => self.get_or_default(surface),
            Err(_) => {
                tracing::debug!(key, "unknown surface key, using fallback");
                (SurfaceProperties::fallback(), true)
            }
        }
    }

    /// Load a table from JSON: an object mapping surface keys to properties.
    /// Keys are canonicalised; every entry is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, SurfaceProperties> = serde_json::from_str(json)?;
        let mut table = Self::empty();
        for (key, props) in raw {
            let surface: SurfaceType = key.parse()?;
            table.insert(surface, props)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_canonicalisation() {
        assert_eq!(canonical_surface_key("light rough"), "LIGHT_ROUGH");
        assert_eq!(canonical_surface_key("  Thick__Rough "), "THICK_ROUGH");
        assert_eq!(canonical_surface_key("out-of-bounds"), "OUT_OF_BOUNDS");
    }

    #[test]
    fn test_parse_surface_type() {
        assert_eq!("green".parse::<SurfaceType>().unwrap(), SurfaceType::Green);
        assert_eq!("Light Rough".parse::<SurfaceType>().unwrap(), SurfaceType::LightRough);
        assert!(matches!("lava".parse::<SurfaceType>(), Err(SimError::UnknownSurface(_))));
    }

    #[test]
    fn test_default_table_is_complete_and_valid() {
        let table = SurfaceTable::default();
        for surface in SurfaceType::ALL {
            let props = table.get(surface).expect("default table covers every surface");
            props.validate(surface.key()).unwrap();
        }
    }

    #[test]
    fn test_only_water_is_no_bounce() {
        let table = SurfaceTable::default();
        for surface in SurfaceType::ALL {
            let (props, _) = table.get_or_default(surface);
            assert_eq!(props.is_no_bounce(), surface == SurfaceType::Water, "{surface}");
        }
    }

    #[test]
    fn test_water_is_no_bounce_sentinel() {
        let (water, fell_back) = SurfaceTable::default().get_or_default(SurfaceType::Water);
        assert!(!fell_back);
        assert!(water.is_no_bounce());
        assert_eq!(water.rest_height, RestHeight::BelowSurface);
        assert!(water.rest_height.resting_center_y(0.0) < 0.0);
    }

    #[test]
    fn test_missing_surface_falls_back_to_fairway_like() {
        let (props, fell_back) = SurfaceTable::empty().get_or_default(SurfaceType::Green);
        assert!(fell_back);
        assert!((props.friction_coefficient - 0.1).abs() < 1e-6);
        assert!((props.bounce_coefficient - 0.4).abs() < 1e-6);

        let (_, fell_back) = SurfaceTable::default().properties_for_key("moon dust");
        assert!(fell_back);
    }

    #[test]
    fn test_from_json_validates_bounce_range() {
        let ok = r#"{ "green": { "friction_coefficient": 0.05, "bounce_coefficient": 0.3,
            "spin_response_factor": 1.0, "rest_height": { "kind": "offset", "value": 0.0 } } }"#;
        let table = SurfaceTable::from_json(ok).unwrap();
        assert!(table.get(SurfaceType::Green).is_some());
        assert!(table.get(SurfaceType::Fairway).is_none());

        let bad = r#"{ "GREEN": { "friction_coefficient": 0.05, "bounce_coefficient": 1.5,
            "spin_response_factor": 1.0, "rest_height": { "kind": "offset", "value": 0.0 } } }"#;
        assert!(matches!(
            SurfaceTable::from_json(bad),
            Err(SimError::InvalidSurfaceProperties { .. })
        ));
    }

    #[test]
    fn test_resting_height_offsets() {
        let y = RestHeight::Offset(-0.01).resting_center_y(0.0);
        assert!((y - (ball::RADIUS_M - 0.01)).abs() < 1e-6);
    }
}
