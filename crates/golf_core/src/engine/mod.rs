pub mod bounce;
pub mod club;
pub mod config; // Tuning presets over physics_constants
pub mod context;
pub mod course; // Surface classifier / hole geometry seam
pub mod diagnostics;
pub mod environment;
pub mod flight;
pub mod obstacle;
pub mod physics_constants;
pub mod roll;
pub mod shot;
pub mod surface;
pub mod types;
pub mod units; // mph/yards/RPM → SI, nowhere else

pub use bounce::{impact_response, simulate_bounce, BounceResult, ImpactOutcome};
pub use club::{ClubAeroProfile, ClubCatalog};
pub use config::{BounceTuning, FlightTuning, PhysicsTuning, RollTuning};
pub use context::ShotContext;
pub use course::{HoleGeometry, HoleLayout, Polygon, SurfaceClassifier, UniformSurface};
pub use diagnostics::SimDiagnostics;
pub use environment::EnvironmentConditions;
pub use flight::{simulate_flight, FlightResult};
pub use obstacle::{resolve_obstacle_hit, Obstacle, ObstacleSize, ObstacleTracker};
pub use roll::{simulate_roll, RollResult};
pub use shot::{aim_vector, resolve_full_shot, resolve_putt, LaunchConditions, ShotOutcome};
pub use surface::{RestHeight, SurfaceProperties, SurfaceTable, SurfaceType};
pub use types::{MotionState, TrajectorySample, Vector3};
