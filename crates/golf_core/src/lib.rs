//! # golf_core - Deterministic Golf Ball Simulation Engine
//!
//! This library turns abstract shot parameters (launch speed, angles, spin,
//! club, wind, terrain) into a concrete ball trajectory and resting lie.
//!
//! ## Features
//! - Three-stage pipeline: flight → bounce → roll (putts roll only)
//! - 100% deterministic (obstacle deflection is driven by a seeded RNG)
//! - Pure, reentrant calls: no state survives between shots
//! - JSON API for easy integration with game engines
//!
//! ## Usage
//! ```rust
//! use golf_core::engine::{resolve_full_shot, ClubCatalog, LaunchConditions, ShotContext, Vector3};
//!
//! let ctx = ShotContext::default();
//! let club = ClubCatalog::standard().get_or_default("7-iron");
//! let launch = LaunchConditions::new(50.0, 17.0, 0.0, 7000.0, 0.0);
//! let outcome = resolve_full_shot(Vector3::zeros(), &launch, &club, &[], None, &ctx);
//! assert!(outcome.carry_distance > 0.0);
//! ```

// Physics APIs pass many scalar parameters by design of the stage contracts
#![allow(clippy::too_many_arguments)]
// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod engine;
pub mod error;

pub use api::{resolve_batch_json, resolve_shot_json, ShotRequest, ShotResponse};
pub use engine::{
    resolve_full_shot, resolve_putt, simulate_bounce, simulate_flight, simulate_roll,
    BounceResult, ClubAeroProfile, ClubCatalog, EnvironmentConditions, FlightResult, HoleGeometry,
    HoleLayout, LaunchConditions, MotionState, Obstacle, PhysicsTuning, RollResult, ShotContext,
    ShotOutcome, SimDiagnostics, SurfaceClassifier, SurfaceProperties, SurfaceTable, SurfaceType,
    TrajectorySample, Vector3,
};
pub use error::{Result, SimError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
