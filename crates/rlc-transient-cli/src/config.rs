//! Simulation settings from a JSON file and command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use rlc_transient::SimulationConfig;

/// Flags that override individual simulation settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Sampling interval (s) [default: 0.02]
    #[arg(long, global = true)]
    pub time_step: Option<f64>,

    /// Simulation horizon (s) [default: 10.0]
    #[arg(long, global = true)]
    pub duration: Option<f64>,

    /// Initial capacitor charge q(0) (C) [default: 1.0]
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub initial_charge: Option<f64>,

    /// Initial loop current i(0) (A) [default: 0.0]
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub initial_current: Option<f64>,
}

impl ConfigOverrides {
    fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(v) = self.time_step {
            config.time_step = v;
        }
        if let Some(v) = self.duration {
            config.total_duration = v;
        }
        if let Some(v) = self.initial_charge {
            config.initial_charge = v;
        }
        if let Some(v) = self.initial_current {
            config.initial_current = v;
        }
        config
    }
}

/// Build the simulation config: defaults, then the JSON file, then flags.
pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<SimulationConfig> {
    let base = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    let config = overrides.apply(base);
    config.validate().context("invalid simulation settings")?;
    log::debug!("Simulation config: {:?}", config);
    Ok(config)
}
