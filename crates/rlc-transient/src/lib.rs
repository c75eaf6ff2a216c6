//! Closed-form transient response of unforced series RLC circuits.
//!
//! This crate provides:
//! - Damping analysis: α, ω₀, ζ and regime classification
//! - Exact per-regime solutions for charge and current
//! - Uniformly sampled charge series for plotting
//! - Measurements (crossings, settling time, statistics) and resistance sweeps
//!
//! ```
//! use rlc_transient::{CircuitParameters, DampingRegime, SimulationConfig, derive_series};
//!
//! let params = CircuitParameters::new(2.0, 0.5, 0.1);
//! let response = derive_series(&params, &SimulationConfig::default()).unwrap();
//! assert_eq!(response.regime, DampingRegime::Underdamped);
//! assert_eq!(response.series.points[0].charge, 1.0);
//! ```

pub mod damping;
pub mod error;
pub mod measure;
pub mod params;
pub mod sweep;
pub mod transient;

pub use damping::{
    CRITICAL_DAMPING_TOLERANCE, DampingRegime, DerivedQuantities, analyze, critical_resistance,
};
pub use error::{Error, Result};
pub use measure::{MeasureError, MeasureSummary};
pub use params::{CircuitParameters, SimulationConfig};
pub use sweep::{SweepPoint, SweepResult, resistance_values, sweep_resistance};
pub use transient::{
    ClosedForm, SamplePoint, TransientResponse, TransientSeries, derive_series, evaluate,
    solve_closed_form,
};
