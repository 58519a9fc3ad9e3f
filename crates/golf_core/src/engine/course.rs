//! Hole geometry: surface classification and hole position.
//!
//! The physics stages only see the `SurfaceClassifier` / `HoleGeometry`
//! traits; `HoleLayout` is the polygon-based implementation used by the game.
//!
//! ## Layer priority
//! ```text
//! green > tee > fairway > bunkers > water > rough > background > OUT_OF_BOUNDS
//! ```
//! `background` polygons are the playable hole boundary and classify as THICK_ROUGH.

use serde::{Deserialize, Serialize};

use super::surface::SurfaceType;
use super::types::Vector3;
use crate::error::{Result, SimError};

/// Point-in-shape surface classification on the ground plane.
pub trait SurfaceClassifier {
    fn surface_at(&self, x: f32, z: f32) -> SurfaceType;
}

/// Classifier that also knows where the cup is.
pub trait HoleGeometry: SurfaceClassifier {
    /// Cup centre at surface level.
    fn hole_position(&self) -> Vector3;
}

/// Classifier that reports the same surface everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSurface {
    pub surface: SurfaceType,
    pub hole: Vector3,
}

impl UniformSurface {
    pub fn new(surface: SurfaceType, hole: Vector3) -> Self {
        Self { surface, hole }
    }
}

impl SurfaceClassifier for UniformSurface {
    fn surface_at(&self, _x: f32, _z: f32) -> SurfaceType {
        self.surface
    }
}

impl HoleGeometry for UniformSurface {
    fn hole_position(&self) -> Vector3 {
        self.hole
    }
}

/// Simple polygon on the xz plane (implicitly closed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// (x, z) vertices in order
    pub points: Vec<(f32, f32)>,
}

impl Polygon {
    pub fn new(points: Vec<(f32, f32)>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle from two corners.
    pub fn rect(min: (f32, f32), max: (f32, f32)) -> Self {
        Self::new(vec![(min.0, min.1), (max.0, min.1), (max.0, max.1), (min.0, max.1)])
    }

    /// Regular polygon approximating a circle.
    pub fn circle(center: (f32, f32), radius: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..segments)
            .map(|i| {
                let a = i as f32 / segments as f32 * std::f32::consts::TAU;
                (center.0 + radius * a.cos(), center.1 + radius * a.sin())
            })
            .collect();
        Self::new(points)
    }

    /// Even-odd ray casting test.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, zi) = self.points[i];
            let (xj, zj) = self.points[j];
            if (zi > z) != (zj > z) {
                let x_cross = xj + (z - zj) / (zi - zj) * (xi - xj);
                if x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    fn validate(&self, layer: &str) -> Result<()> {
        if self.points.len() < 3 {
            return Err(SimError::InvalidRequest(format!(
                "{layer} polygon needs at least 3 vertices, got {}",
                self.points.len()
            )));
        }
        if self.points.iter().any(|(x, z)| !x.is_finite() || !z.is_finite()) {
            return Err(SimError::InvalidRequest(format!("{layer} polygon has non-finite vertex")));
        }
        Ok(())
    }
}

/// Polygonal hole layout supplied by the course authoring layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleLayout {
    pub hole_position: Vector3,
    #[serde(default)]
    pub green: Vec<Polygon>,
    #[serde(default)]
    pub tee: Vec<Polygon>,
    #[serde(default)]
    pub fairway: Vec<Polygon>,
    #[serde(default)]
    pub bunkers: Vec<Polygon>,
    #[serde(default)]
    pub water: Vec<Polygon>,
    #[serde(default)]
    pub rough: Vec<Polygon>,
    #[serde(default)]
    pub background: Vec<Polygon>,
}

impl HoleLayout {
    pub fn new(hole_position: Vector3) -> Self {
        Self {
            hole_position,
            green: Vec::new(),
            tee: Vec::new(),
            fairway: Vec::new(),
            bunkers: Vec::new(),
            water: Vec::new(),
            rough: Vec::new(),
            background: Vec::new(),
        }
    }

    /// Layers in classification order.
    fn layers(&self) -> [(&[Polygon], SurfaceType); 7] {
        [
            (self.green.as_slice(), SurfaceType::Green),
            (self.tee.as_slice(), SurfaceType::Tee),
            (self.fairway.as_slice(), SurfaceType::Fairway),
            (self.bunkers.as_slice(), SurfaceType::Bunker),
            (self.water.as_slice(), SurfaceType::Water),
            (self.rough.as_slice(), SurfaceType::LightRough),
            (self.background.as_slice(), SurfaceType::ThickRough),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if !self.hole_position.iter().all(|c| c.is_finite()) {
            return Err(SimError::InvalidRequest("hole position must be finite".to_string()));
        }
        for (polygons, surface) in self.layers() {
            for polygon in polygons {
                polygon.validate(surface.key())?;
            }
        }
        Ok(())
    }
}

impl SurfaceClassifier for HoleLayout {
    fn surface_at(&self, x: f32, z: f32) -> SurfaceType {
        self.layers()
            .into_iter()
            .find(|(polygons, _)| polygons.iter().any(|p| p.contains(x, z)))
            .map(|(_, surface)| surface)
            .unwrap_or(SurfaceType::OutOfBounds)
    }
}

impl HoleGeometry for HoleLayout {
    fn hole_position(&self) -> Vector3 {
        self.hole_position
    }
}
