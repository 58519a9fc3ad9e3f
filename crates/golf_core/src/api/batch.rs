//! Batch resolution.
//!
//! Shots share nothing, so a batch is just a map over independent requests.
//! Large batches go through rayon; small ones stay on the calling thread.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::shot_json::{resolve_shot, ShotRequest, ShotResponse};
use crate::error::Result;

/// Below this many requests the thread-pool overhead outweighs the work.
const PARALLEL_BATCH_THRESHOLD: usize = 8;

/// Per-request result in a JSON batch response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchEntry {
    Ok(ShotResponse),
    Error(String),
}

/// Resolve many requests. Output order matches input order, and every entry
/// equals what `resolve_shot` returns for that request alone.
pub fn resolve_batch(requests: &[ShotRequest]) -> Vec<Result<ShotResponse>> {
    if requests.len() > PARALLEL_BATCH_THRESHOLD {
        requests.par_iter().map(resolve_shot).collect()
    } else {
        requests.iter().map(resolve_shot).collect()
    }
}

/// JSON form of `resolve_batch`: takes an array of requests and returns an
/// array of `{"ok": ...}` / `{"error": "..."}` entries. One bad request does
/// not fail the batch; a malformed array does.
pub fn resolve_batch_json(requests_json: &str) -> Result<String> {
    let requests: Vec<ShotRequest> = serde_json::from_str(requests_json)?;
    let entries: Vec<BatchEntry> = resolve_batch(&requests)
        .into_iter()
        .map(|result| match result {
            Ok(response) => BatchEntry::Ok(response),
            Err(err) => BatchEntry::Error(err.to_string()),
        })
        .collect();
    tracing::debug!(count = entries.len(), "batch resolved");
    Ok(serde_json::to_string(&entries)?)
}
