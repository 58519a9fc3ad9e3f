//! Fallback counters.
//!
//! Every policy fallback taken by a stage (safety cutoff, skipped force term,
//! missing surface data, obstacle contact) is counted here and also logged,
//! so degenerate tuning shows up in results instead of silently.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimDiagnostics {
    /// A stage hit its hard time/iteration cap.
    pub safety_cutoffs: u32,
    /// Steps where a near-zero velocity forced a term (or the loop) to be skipped.
    pub degenerate_skips: u32,
    /// Surface lookups that fell back to default properties.
    pub surface_fallbacks: u32,
    /// Obstacle contacts during flight.
    pub obstacle_hits: u32,
}

impl SimDiagnostics {
    /// Accumulate another stage's counters.
    pub fn merge(&mut self, other: &SimDiagnostics) {
        self.safety_cutoffs += other.safety_cutoffs;
        self.degenerate_skips += other.degenerate_skips;
        self.surface_fallbacks += other.surface_fallbacks;
        self.obstacle_hits += other.obstacle_hits;
    }

    /// True when no fallback of any kind was taken.
    pub fn is_clean(&self) -> bool {
        self.safety_cutoffs == 0 && self.degenerate_skips == 0 && self.surface_fallbacks == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_accumulates() {
        let mut a = SimDiagnostics { safety_cutoffs: 1, ..Default::default() };
        let b = SimDiagnostics { degenerate_skips: 2, obstacle_hits: 3, ..Default::default() };
        a.merge(&b);
        assert_eq!(a.safety_cutoffs, 1);
        assert_eq!(a.degenerate_skips, 2);
        assert_eq!(a.obstacle_hits, 3);
        assert!(!a.is_clean());
    }

    #[test]
    fn test_obstacle_hits_do_not_make_result_unclean() {
        let d = SimDiagnostics { obstacle_hits: 1, ..Default::default() };
        assert!(d.is_clean());
    }
}
