//! Step snapshots: the per-tick record handed to consumers
//!
//! A snapshot has no identity beyond the step call that produced it.
//! Consumers collect them into whatever time series they need.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// External input intensity
    pub stimulus: f64,
    /// Reactive stage output, sin(gain · stimulus)
    pub reaction: f64,
    /// Damping stage output, sin(factor · reaction)
    pub regulation: f64,
    /// Normal factor a = reaction − regulation
    pub net_stress_a: f64,
    /// Splitting factor b (accumulated duration stress)
    pub splitting_b: f64,
    /// Cusp state after the update
    pub state_x: f64,
    /// Whether (a, b) lies in the fold
    pub is_trapped: bool,
}

impl StepSnapshot {
    /// False when any numeric field is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        [
            self.stimulus,
            self.reaction,
            self.regulation,
            self.net_stress_a,
            self.splitting_b,
            self.state_x,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StepSnapshot {
        StepSnapshot {
            stimulus: 2.0,
            reaction: 0.9,
            regulation: 0.66,
            net_stress_a: 0.24,
            splitting_b: 1.5,
            state_x: 1.1,
            is_trapped: true,
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = sample().to_json().unwrap();
        for key in [
            "\"stimulus\"",
            "\"reaction\"",
            "\"regulation\"",
            "\"net_stress_a\"",
            "\"splitting_b\"",
            "\"state_x\"",
            "\"is_trapped\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
        assert_eq!(StepSnapshot::from_json(&json).unwrap(), sample());
    }

    #[test]
    fn test_is_finite() {
        assert!(sample().is_finite());
        let diverged = StepSnapshot {
            state_x: f64::NAN,
            ..sample()
        };
        assert!(!diverged.is_finite());
    }
}
