use crate::error::SimulationError;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuspConfig {
    pub observer: ObserverConfig,
    pub simulation: SimulationConfig,
}

impl CuspConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: CuspConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        override_f64("CUSP_REACTIVE_GAIN", &mut self.observer.reactive_gain);
        override_f64("CUSP_DAMPING_FACTOR", &mut self.observer.damping_factor);
        override_f64("CUSP_DT", &mut self.simulation.dt);
        override_f64("CUSP_T_MAX", &mut self.simulation.t_max);
        override_f64("CUSP_PULSE_AMPLITUDE", &mut self.simulation.pulse_amplitude);
    }

    pub fn validate(&self) -> Result<()> {
        self.observer.validate()?;
        self.simulation.validate()
    }
}

fn override_f64(var: &str, target: &mut f64) {
    if let Ok(v) = std::env::var(var) {
        match v.parse() {
            Ok(n) => *target = n,
            Err(_) => tracing::warn!("Ignoring unparsable {}={}", var, v),
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Coefficients of the two transfer stages and the starting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Scales the raw stimulus response
    pub reactive_gain: f64,
    /// Scales self-regulation strength
    pub damping_factor: f64,
    pub initial_state: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            reactive_gain: 1.0,
            damping_factor: 0.8,
            initial_state: 0.0,
        }
    }
}

impl ObserverConfig {
    pub fn validate(&self) -> Result<()> {
        SimulationError::check_input("reactive_gain", self.reactive_gain)?;
        SimulationError::check_input("damping_factor", self.damping_factor)?;
        SimulationError::check_input("initial_state", self.initial_state)?;
        Ok(())
    }
}

/// Time grid and stimulus pulse for a driven run.
///
/// Defaults reproduce the canonical stress pulse: 2.0 from t=20 to t=60
/// over a 100-unit run at dt=0.1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub t_max: f64,
    pub dt: f64,
    pub pulse_start: f64,
    pub pulse_end: f64,
    pub pulse_amplitude: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            t_max: 100.0,
            dt: 0.1,
            pulse_start: 20.0,
            pulse_end: 60.0,
            pulse_amplitude: 2.0,
        }
    }
}

impl SimulationConfig {
    /// Number of ticks in the run.
    pub fn steps(&self) -> usize {
        (self.t_max / self.dt).floor() as usize
    }

    pub fn validate(&self) -> Result<()> {
        SimulationError::check_dt(self.dt)?;
        if !(self.t_max.is_finite() && self.t_max > 0.0) {
            bail!("t_max must be finite and positive, got {}", self.t_max);
        }
        SimulationError::check_input("pulse_amplitude", self.pulse_amplitude)?;
        if !(self.pulse_start.is_finite() && self.pulse_end.is_finite()) {
            bail!("pulse bounds must be finite");
        }
        if self.pulse_end < self.pulse_start {
            bail!(
                "pulse_end ({}) precedes pulse_start ({})",
                self.pulse_end,
                self.pulse_start
            );
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = CuspConfig::default();
        assert_eq!(cfg.observer.reactive_gain, 1.0);
        assert_eq!(cfg.observer.damping_factor, 0.8);
        assert_eq!(cfg.simulation.dt, 0.1);
        assert_eq!(cfg.simulation.steps(), 1000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[observer]
damping_factor = 1.2
"#;
        let cfg: CuspConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.observer.damping_factor, 1.2);
        // Defaults for unspecified fields
        assert_eq!(cfg.observer.reactive_gain, 1.0);
        assert_eq!(cfg.simulation.t_max, 100.0);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[observer]
reactive_gain = 1.5
damping_factor = 0.5
initial_state = -1.0

[simulation]
t_max = 50.0
dt = 0.05
pulse_start = 5.0
pulse_end = 25.0
pulse_amplitude = 1.0
"#;
        let cfg: CuspConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.observer.reactive_gain, 1.5);
        assert_eq!(cfg.observer.initial_state, -1.0);
        assert_eq!(cfg.simulation.dt, 0.05);
        assert_eq!(cfg.simulation.steps(), 1000);
        assert_eq!(cfg.simulation.pulse_end, 25.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_grid() {
        let mut cfg = SimulationConfig::default();
        cfg.dt = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimulationConfig::default();
        cfg.t_max = -1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimulationConfig::default();
        cfg.pulse_end = 10.0;
        assert!(cfg.validate().is_err());

        let observer = ObserverConfig {
            reactive_gain: f64::NAN,
            ..Default::default()
        };
        assert!(observer.validate().is_err());
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("CUSP_DAMPING_FACTOR", "0.3");
        std::env::set_var("CUSP_DT", "not-a-number");

        let mut cfg = CuspConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.observer.damping_factor, 0.3);
        assert_eq!(cfg.simulation.dt, 0.1);

        // Clean up env vars before testing defaults
        std::env::remove_var("CUSP_DAMPING_FACTOR");
        std::env::remove_var("CUSP_DT");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = CuspConfig::load_or_default("/nonexistent/path.toml");
        assert_eq!(cfg.observer.damping_factor, 0.8);
    }
}
