//! Transient response evaluation.
//!
//! The response of an unforced series RLC loop has an exact solution in each
//! damping regime, so no time integration is involved: every sample is a
//! direct evaluation of the closed form at t_k = k·Δt.
//!
//! # Module Structure
//!
//! - [`closed_form`] - Per-regime solutions for q(t) and i(t)
//! - [`evaluator`] - Sample-grid generation and input checks
//! - [`result`] - Series and response types

pub mod closed_form;
pub mod evaluator;
pub mod result;

pub use closed_form::ClosedForm;
pub use evaluator::evaluate;
pub use result::{SamplePoint, TransientResponse, TransientSeries};

use crate::damping::analyze;
use crate::error::Result;
use crate::params::{CircuitParameters, SimulationConfig};

/// Analyze a circuit and evaluate its charge waveform.
///
/// This is the single entry point a caller re-invokes whenever R, L or C
/// changes. It holds no state: identical inputs give bit-identical output.
pub fn derive_series(
    params: &CircuitParameters,
    config: &SimulationConfig,
) -> Result<TransientResponse> {
    config.validate()?;
    let (quantities, regime) = analyze(params)?;

    let series = evaluate(
        regime,
        quantities.alpha,
        quantities.omega0,
        quantities.zeta,
        config.initial_charge,
        config.initial_current,
        config.time_step,
        config.total_duration,
    )?;

    log::debug!(
        "{} response: {} samples over {} s",
        regime,
        series.len(),
        config.total_duration
    );

    Ok(TransientResponse {
        parameters: *params,
        quantities,
        regime,
        series,
    })
}

/// Solved closed form for a circuit, for evaluating q(t) or i(t) at arbitrary times.
pub fn solve_closed_form(
    params: &CircuitParameters,
    config: &SimulationConfig,
) -> Result<ClosedForm> {
    config.validate()?;
    let (q, regime) = analyze(params)?;
    Ok(ClosedForm::new(
        regime,
        q.alpha,
        q.omega0,
        q.zeta,
        config.initial_charge,
        config.initial_current,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damping::{DampingRegime, critical_resistance};
    use crate::error::Error;

    #[test]
    fn test_derive_series_underdamped() {
        let params = CircuitParameters::new(2.0, 0.5, 0.1);
        let response = derive_series(&params, &SimulationConfig::default()).unwrap();

        assert_eq!(response.regime, DampingRegime::Underdamped);
        assert_eq!(response.series.len(), 501);
        assert_eq!(response.series.points[0].charge, 1.0);
        assert_eq!(response.parameters, params);

        // Oscillates: the charge goes negative at some point
        assert!(response.series.iter().any(|p| p.charge < 0.0));
    }

    #[test]
    fn test_derive_series_critical() {
        let r = critical_resistance(0.5, 0.1);
        let response =
            derive_series(&CircuitParameters::new(r, 0.5, 0.1), &SimulationConfig::default())
                .unwrap();
        assert_eq!(response.regime, DampingRegime::CriticallyDamped);

        // q(t) = (1 + alpha t) e^(-alpha t) with i0 = 0
        let alpha = response.quantities.alpha;
        for p in response.series.iter().step_by(25) {
            let expected = (1.0 + alpha * p.time) * (-alpha * p.time).exp();
            assert!(
                (p.charge - expected).abs() < 1e-12,
                "q({}) = {} (expected {})",
                p.time,
                p.charge,
                expected
            );
        }
    }

    #[test]
    fn test_derive_series_rejects_zero_inductance() {
        let err = derive_series(
            &CircuitParameters::new(2.0, 0.0, 0.1),
            &SimulationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_derive_series_rejects_bad_config() {
        let err = derive_series(
            &CircuitParameters::new(2.0, 0.5, 0.1),
            &SimulationConfig::default().with_time_step(0.0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DegenerateSampling { .. }));
    }

    #[test]
    fn test_derive_series_is_idempotent() {
        let params = CircuitParameters::new(3.3, 0.2, 0.05);
        let config = SimulationConfig::default().with_initial_current(-0.7);
        let a = derive_series(&params, &config).unwrap();
        let b = derive_series(&params, &config).unwrap();
        assert_eq!(a, b);
        for (pa, pb) in a.series.iter().zip(b.series.iter()) {
            assert_eq!(pa.charge.to_bits(), pb.charge.to_bits());
        }
    }

    #[test]
    fn test_closed_form_matches_series() {
        let params = CircuitParameters::new(10.0, 0.5, 0.1);
        let config = SimulationConfig::default();
        let form = solve_closed_form(&params, &config).unwrap();
        let response = derive_series(&params, &config).unwrap();

        assert_eq!(form.regime(), response.regime);
        for p in response.series.iter() {
            assert_eq!(form.charge_at(p.time), p.charge);
        }
    }
}
