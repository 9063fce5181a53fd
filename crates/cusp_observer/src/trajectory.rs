//! Driving an observer through a profile and summarising the result

use crate::observer::FeedbackObserver;
use crate::snapshot::StepSnapshot;
use crate::stimulus::StimulusProfile;
use serde::{Deserialize, Serialize};

/// One `step` per tick, in time order. Snapshots are kept in memory only.
pub fn run_profile(observer: &mut FeedbackObserver, profile: &StimulusProfile) -> Vec<StepSnapshot> {
    profile
        .values
        .iter()
        .map(|&stimulus| observer.step(stimulus, profile.dt))
        .collect()
}

/// Headline numbers of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub steps: usize,
    /// Largest |x| reached
    pub peak_abs_state: f64,
    pub final_state: f64,
    /// Largest splitting factor reached
    pub peak_splitting: f64,
    /// Ticks spent with (a, b) inside the fold
    pub trapped_steps: usize,
    pub first_trapped: Option<usize>,
    /// Whether every snapshot stayed finite
    pub finite: bool,
}

impl TrajectorySummary {
    pub fn from_snapshots(snapshots: &[StepSnapshot]) -> Self {
        Self {
            steps: snapshots.len(),
            peak_abs_state: snapshots
                .iter()
                .map(|s| s.state_x.abs())
                .fold(0.0, f64::max),
            final_state: snapshots.last().map_or(0.0, |s| s.state_x),
            peak_splitting: snapshots.iter().map(|s| s.splitting_b).fold(0.0, f64::max),
            trapped_steps: snapshots.iter().filter(|s| s.is_trapped).count(),
            first_trapped: snapshots.iter().position(|s| s.is_trapped),
            finite: snapshots.iter().all(StepSnapshot::is_finite),
        }
    }
}
