//! Circuit parameters and simulation configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default sampling interval (s).
pub const DEFAULT_TIME_STEP: f64 = 0.02;
/// Default simulation horizon (s).
pub const DEFAULT_TOTAL_DURATION: f64 = 10.0;
/// Default initial capacitor charge q(0) (C).
pub const DEFAULT_INITIAL_CHARGE: f64 = 1.0;
/// Default initial loop current i(0) (A).
pub const DEFAULT_INITIAL_CURRENT: f64 = 0.0;
/// Largest sample grid a single run may produce.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Component values of a series RLC loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParameters {
    /// Resistance (Ω). Zero is allowed and gives an undamped loop.
    pub resistance: f64,
    /// Inductance (H). Must be strictly positive.
    pub inductance: f64,
    /// Capacitance (F). Must be strictly positive.
    pub capacitance: f64,
}

impl CircuitParameters {
    /// Create a parameter set. Values are checked by [`validate`](Self::validate).
    pub fn new(resistance: f64, inductance: f64, capacitance: f64) -> Self {
        Self {
            resistance,
            inductance,
            capacitance,
        }
    }

    /// Copy of these parameters with a different resistance.
    pub fn with_resistance(self, resistance: f64) -> Self {
        Self { resistance, ..self }
    }

    /// Check that ω₀ is defined and the loop is passive.
    pub fn validate(&self) -> Result<()> {
        check_finite("resistance", self.resistance)?;
        check_finite("inductance", self.inductance)?;
        check_finite("capacitance", self.capacitance)?;

        if self.inductance <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "inductance must be positive, got {}",
                self.inductance
            )));
        }
        if self.capacitance <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "capacitance must be positive, got {}",
                self.capacitance
            )));
        }
        if self.resistance < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "resistance must be non-negative, got {}",
                self.resistance
            )));
        }
        Ok(())
    }
}

/// Sampling grid and initial conditions for a transient run.
///
/// Deserializing fills missing fields from [`Default`], so a JSON config file
/// only needs to name what it overrides:
///
/// ```json
/// { "total_duration": 5.0, "initial_current": -0.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sampling interval (s).
    pub time_step: f64,
    /// Simulation horizon (s); samples cover `[0, total_duration]`.
    pub total_duration: f64,
    /// q(0) (C).
    pub initial_charge: f64,
    /// q'(0) = i(0) (A).
    pub initial_current: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            total_duration: DEFAULT_TOTAL_DURATION,
            initial_charge: DEFAULT_INITIAL_CHARGE,
            initial_current: DEFAULT_INITIAL_CURRENT,
        }
    }
}

impl SimulationConfig {
    pub fn with_time_step(self, time_step: f64) -> Self {
        Self { time_step, ..self }
    }

    pub fn with_total_duration(self, total_duration: f64) -> Self {
        Self {
            total_duration,
            ..self
        }
    }

    pub fn with_initial_charge(self, initial_charge: f64) -> Self {
        Self {
            initial_charge,
            ..self
        }
    }

    pub fn with_initial_current(self, initial_current: f64) -> Self {
        Self {
            initial_current,
            ..self
        }
    }

    /// Check the sampling grid and initial conditions.
    pub fn validate(&self) -> Result<()> {
        validate_sampling(self.time_step, self.total_duration)?;
        check_finite("initial charge", self.initial_charge)?;
        check_finite("initial current", self.initial_current)
    }

    /// Number of samples the grid produces: ⌊total_duration / time_step⌋ + 1.
    ///
    /// Assumes the config has been validated.
    pub fn sample_count(&self) -> usize {
        sample_count(self.time_step, self.total_duration)
    }
}

/// Reject grids that are empty, undefined, or larger than [`MAX_SAMPLES`].
pub(crate) fn validate_sampling(time_step: f64, total_duration: f64) -> Result<()> {
    let ok = time_step.is_finite()
        && total_duration.is_finite()
        && time_step > 0.0
        && total_duration >= 0.0
        && (total_duration / time_step).floor() < MAX_SAMPLES as f64;
    if ok {
        Ok(())
    } else {
        Err(Error::DegenerateSampling {
            time_step,
            total_duration,
        })
    }
}

pub(crate) fn sample_count(time_step: f64, total_duration: f64) -> usize {
    (total_duration / time_step).floor() as usize + 1
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameters(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}
