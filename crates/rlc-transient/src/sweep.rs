//! Resistance sweeps across damping regimes.
//!
//! Each point is an independent [`derive_series`] call, so points can be
//! evaluated in any order; with the `parallel` feature they run on the rayon
//! thread pool. Output order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::damping::{DampingRegime, DerivedQuantities};
use crate::measure::settling_time;
use crate::params::{CircuitParameters, SimulationConfig};
use crate::transient::derive_series;

/// Outcome of one sweep point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Resistance (Ω) at this point.
    pub resistance: f64,
    /// Derived α, ω₀, ζ (None if the point failed).
    pub quantities: Option<DerivedQuantities>,
    /// Damping regime (None if the point failed).
    pub regime: Option<DampingRegime>,
    /// Settling time (s) within the sweep's band, if reached.
    pub settling_time: Option<f64>,
    /// Error message if the point failed.
    pub error: Option<String>,
}

impl SweepPoint {
    fn failed(resistance: f64, error: String) -> Self {
        Self {
            resistance,
            quantities: None,
            regime: None,
            settling_time: None,
            error: Some(error),
        }
    }

    /// Whether the point evaluated successfully.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-regime point counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegimeCounts {
    pub underdamped: usize,
    pub critically_damped: usize,
    pub overdamped: usize,
    pub failed: usize,
}

impl RegimeCounts {
    fn tally(points: &[SweepPoint]) -> Self {
        points.iter().fold(Self::default(), |mut c, p| {
            match p.regime {
                Some(DampingRegime::Underdamped) => c.underdamped += 1,
                Some(DampingRegime::CriticallyDamped) => c.critically_damped += 1,
                Some(DampingRegime::Overdamped) => c.overdamped += 1,
                None => c.failed += 1,
            }
            c
        })
    }

    /// Total number of points.
    pub fn total(&self) -> usize {
        self.underdamped + self.critically_damped + self.overdamped + self.failed
    }
}

/// Result of a resistance sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    /// One entry per input resistance, in input order.
    pub points: Vec<SweepPoint>,
    /// Regime counts over all points.
    pub counts: RegimeCounts,
}

impl SweepResult {
    /// Resistances at which the regime changes from the previous successful point.
    pub fn regime_transitions(&self) -> Vec<(f64, DampingRegime)> {
        let mut out = Vec::new();
        let mut prev: Option<DampingRegime> = None;
        for p in &self.points {
            if let Some(r) = p.regime {
                if prev.is_some_and(|q| q != r) {
                    out.push((p.resistance, r));
                }
                prev = Some(r);
            }
        }
        out
    }
}

/// Generates `n` linearly spaced resistance values in [start, stop].
pub fn resistance_values(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Evaluate `base` at each resistance in `values`.
///
/// Failed points are recorded with their error rather than aborting the sweep.
/// `band` is the settling band passed to [`settling_time`].
pub fn sweep_resistance(
    base: &CircuitParameters,
    values: &[f64],
    config: &SimulationConfig,
    band: f64,
) -> SweepResult {
    let eval = |&r: &f64| evaluate_point(base.with_resistance(r), config, band);

    #[cfg(feature = "parallel")]
    let points: Vec<SweepPoint> = values.par_iter().map(eval).collect();
    #[cfg(not(feature = "parallel"))]
    let points: Vec<SweepPoint> = values.iter().map(eval).collect();

    let counts = RegimeCounts::tally(&points);
    log::info!(
        "Resistance sweep: {} points ({} under, {} critical, {} over, {} failed)",
        counts.total(),
        counts.underdamped,
        counts.critically_damped,
        counts.overdamped,
        counts.failed
    );

    SweepResult { points, counts }
}

fn evaluate_point(params: CircuitParameters, config: &SimulationConfig, band: f64) -> SweepPoint {
    let response = match derive_series(&params, config) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Sweep point R={} failed: {}", params.resistance, e);
            return SweepPoint::failed(params.resistance, e.to_string());
        }
    };

    match settling_time(&response.series, band) {
        Ok(settling) => SweepPoint {
            resistance: params.resistance,
            quantities: Some(response.quantities),
            regime: Some(response.regime),
            settling_time: settling,
            error: None,
        },
        Err(e) => SweepPoint::failed(params.resistance, e.to_string()),
    }
}
