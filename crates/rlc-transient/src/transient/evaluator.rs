//! Sample-grid generation and closed-form evaluation.

use crate::damping::DampingRegime;
use crate::error::{Error, Result};
use crate::params::{check_finite, sample_count, validate_sampling};

use super::closed_form::ClosedForm;
use super::result::{SamplePoint, TransientSeries};

/// Largest relative disagreement allowed between `zeta` and `alpha / omega0`.
pub const ZETA_CONSISTENCY_TOLERANCE: f64 = 1e-9;

/// Evaluate the closed-form charge of `regime` on a uniform grid.
///
/// Produces ⌊total_duration / time_step⌋ + 1 samples at t_k = k·time_step.
/// Sample times come from the integer index, never from repeated addition, so
/// there is no drift over long runs. A step longer than the duration yields a
/// single sample at t = 0.
///
/// # Errors
/// * [`Error::DegenerateSampling`] if `time_step` ≤ 0, `total_duration` < 0, or
///   either is non-finite.
/// * [`Error::InvalidParameters`] if ω₀ ≤ 0, α or ζ are negative, ζ is not
///   α/ω₀ (within [`ZETA_CONSISTENCY_TOLERANCE`]), any input is non-finite, or
///   the solved closed form would produce a non-finite sample.
/// * [`Error::RegimeMismatch`] if `regime` is not the classification of `zeta`.
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    regime: DampingRegime,
    alpha: f64,
    omega0: f64,
    zeta: f64,
    initial_charge: f64,
    initial_current: f64,
    time_step: f64,
    total_duration: f64,
) -> Result<TransientSeries> {
    check_finite("alpha", alpha)?;
    check_finite("omega0", omega0)?;
    check_finite("zeta", zeta)?;
    check_finite("initial charge", initial_charge)?;
    check_finite("initial current", initial_current)?;
    if omega0 <= 0.0 {
        return Err(Error::InvalidParameters(format!(
            "omega0 must be positive, got {}",
            omega0
        )));
    }
    if alpha < 0.0 || zeta < 0.0 {
        return Err(Error::InvalidParameters(format!(
            "alpha and zeta must be non-negative, got alpha = {}, zeta = {}",
            alpha, zeta
        )));
    }
    let ratio = alpha / omega0;
    if (zeta - ratio).abs() > ZETA_CONSISTENCY_TOLERANCE * ratio.max(1.0) {
        return Err(Error::InvalidParameters(format!(
            "zeta = {} does not match alpha / omega0 = {}",
            zeta, ratio
        )));
    }
    validate_sampling(time_step, total_duration)?;

    if DampingRegime::classify(zeta) != regime {
        return Err(Error::RegimeMismatch { regime, zeta });
    }

    let form = ClosedForm::new(
        regime,
        alpha,
        omega0,
        zeta,
        initial_charge,
        initial_current,
    );
    let series = sample(&form, time_step, total_duration);

    if let Some(p) = series.iter().find(|p| !p.charge.is_finite()) {
        return Err(Error::InvalidParameters(format!(
            "{} solution is not finite at t = {} (alpha = {}, omega0 = {})",
            regime, p.time, alpha, omega0
        )));
    }
    Ok(series)
}

/// Sample a solved closed form on the grid. Inputs are assumed validated.
fn sample(form: &ClosedForm, time_step: f64, total_duration: f64) -> TransientSeries {
    let n = sample_count(time_step, total_duration);
    let points = (0..n)
        .map(|k| {
            let time = k as f64 * time_step;
            SamplePoint {
                time,
                charge: form.charge_at(time),
            }
        })
        .collect();

    TransientSeries { points, time_step }
}
