pub mod batch;
pub mod shot_json;

pub use batch::{resolve_batch, resolve_batch_json, BatchEntry};
pub use shot_json::{resolve_shot, resolve_shot_json, ShotRequest, ShotResponse, ShotSpec};
