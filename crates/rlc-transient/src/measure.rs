//! Measurements on a transient series.
//!
//! Threshold crossings, statistics and settling time, evaluated on the sampled
//! waveform with linear interpolation between samples.

use serde::Serialize;
use thiserror::Error;

use crate::transient::{SamplePoint, TransientSeries};

/// Error type for measurement evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// No data points available (empty series or empty time window).
    #[error("no data points")]
    NoData,
    /// The requested crossing does not occur in the series.
    #[error("crossing not found")]
    NotFound,
    /// Settling band must be a positive, finite fraction.
    #[error("invalid settling band: {0}")]
    InvalidBand(f64),
}

/// Which threshold crossing to look for; the count is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerType {
    /// n-th upward crossing.
    Rise(usize),
    /// n-th downward crossing.
    Fall(usize),
    /// n-th crossing in either direction.
    Cross(usize),
}

/// Statistic over a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFunc {
    Avg,
    Rms,
    Min,
    Max,
    /// Peak-to-peak.
    Pp,
    /// Trapezoidal integral over time.
    Integ,
}

/// Default settling band: within 2% of the initial charge.
pub const DEFAULT_SETTLING_BAND: f64 = 0.02;

/// Find the time at which the charge crosses `threshold` as selected by `trigger`.
pub fn find_crossing(
    series: &TransientSeries,
    threshold: f64,
    trigger: TriggerType,
) -> Result<f64, MeasureError> {
    if series.is_empty() {
        return Err(MeasureError::NoData);
    }
    let n = match trigger {
        TriggerType::Rise(n) | TriggerType::Fall(n) | TriggerType::Cross(n) => n,
    };

    let mut count = 0;
    for w in series.points.windows(2) {
        let (p0, p1) = (&w[0], &w[1]);
        let (v0, v1) = (p0.charge, p1.charge);

        let is_crossing = match trigger {
            TriggerType::Rise(_) => v0 < threshold && v1 >= threshold,
            TriggerType::Fall(_) => v0 > threshold && v1 <= threshold,
            TriggerType::Cross(_) => {
                (v0 < threshold && v1 >= threshold) || (v0 > threshold && v1 <= threshold)
            }
        };

        if is_crossing {
            count += 1;
            if count == n {
                return Ok(interpolate_crossing(p0, p1, threshold));
            }
        }
    }

    Err(MeasureError::NotFound)
}

/// Interpolated times of every crossing of `threshold`, in order.
pub fn crossings(series: &TransientSeries, threshold: f64) -> Vec<f64> {
    series
        .points
        .windows(2)
        .filter(|w| {
            let (v0, v1) = (w[0].charge, w[1].charge);
            (v0 < threshold && v1 >= threshold) || (v0 > threshold && v1 <= threshold)
        })
        .map(|w| interpolate_crossing(&w[0], &w[1], threshold))
        .collect()
}

/// Interpolated times at which the charge changes sign.
pub fn zero_crossings(series: &TransientSeries) -> Vec<f64> {
    crossings(series, 0.0)
}

fn interpolate_crossing(p0: &SamplePoint, p1: &SamplePoint, threshold: f64) -> f64 {
    let (v0, v1) = (p0.charge, p1.charge);
    if (v1 - v0).abs() < 1e-30 {
        return p0.time;
    }
    let frac = (threshold - v0) / (v1 - v0);
    p0.time + frac * (p1.time - p0.time)
}

/// Evaluate a statistic over samples with `from <= t <= to`.
///
/// `from` defaults to 0 and `to` to the last sample time.
pub fn statistic(
    series: &TransientSeries,
    func: StatFunc,
    from: Option<f64>,
    to: Option<f64>,
) -> Result<f64, MeasureError> {
    let t_start = from.unwrap_or(0.0);
    let t_end = to.unwrap_or_else(|| series.last().map(|p| p.time).unwrap_or(0.0));

    let window: Vec<&SamplePoint> = series
        .iter()
        .filter(|p| p.time >= t_start && p.time <= t_end)
        .collect();

    if window.is_empty() {
        return Err(MeasureError::NoData);
    }
    let values = window.iter().map(|p| p.charge);

    let value = match func {
        StatFunc::Avg => values.sum::<f64>() / window.len() as f64,
        StatFunc::Rms => (values.map(|v| v * v).sum::<f64>() / window.len() as f64).sqrt(),
        StatFunc::Min => values.fold(f64::INFINITY, f64::min),
        StatFunc::Max => values.fold(f64::NEG_INFINITY, f64::max),
        StatFunc::Pp => {
            let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            max - min
        }
        StatFunc::Integ => window
            .windows(2)
            .map(|w| (w[1].time - w[0].time) * (w[0].charge + w[1].charge) / 2.0)
            .sum(),
    };
    Ok(value)
}

/// Sample with the largest |q|.
pub fn peak(series: &TransientSeries) -> Result<SamplePoint, MeasureError> {
    series
        .iter()
        .copied()
        .reduce(|best, p| if p.charge.abs() > best.charge.abs() { p } else { best })
        .ok_or(MeasureError::NoData)
}

/// Largest excursion opposite in sign to q(0), as a fraction of |q(0)|.
///
/// Zero for a response that never swings past zero (overdamped or critically
/// damped from rest) and for q(0) = 0.
pub fn overshoot(series: &TransientSeries) -> Result<f64, MeasureError> {
    let q0 = series.points.first().ok_or(MeasureError::NoData)?.charge;
    if q0 == 0.0 {
        return Ok(0.0);
    }
    let worst = series
        .iter()
        .map(|p| -p.charge * q0.signum())
        .fold(0.0_f64, f64::max);
    Ok(worst / q0.abs())
}

/// Time for q to fall from 90% to 10% of q(0), as in a SPICE `.MEAS TRIG/TARG` pair.
///
/// Uses falling triggers for q(0) > 0 and rising ones for q(0) < 0. Returns
/// `Ok(None)` when q(0) = 0 or either level is never crossed.
pub fn fall_time(series: &TransientSeries) -> Result<Option<f64>, MeasureError> {
    let q0 = series.points.first().ok_or(MeasureError::NoData)?.charge;
    if q0 == 0.0 {
        return Ok(None);
    }
    let trigger = if q0 > 0.0 {
        TriggerType::Fall(1)
    } else {
        TriggerType::Rise(1)
    };

    let start = match find_crossing(series, 0.9 * q0, trigger) {
        Ok(t) => t,
        Err(MeasureError::NotFound) => return Ok(None),
        Err(e) => return Err(e),
    };
    let end = match find_crossing(series, 0.1 * q0, trigger) {
        Ok(t) => t,
        Err(MeasureError::NotFound) => return Ok(None),
        Err(e) => return Err(e),
    };
    Ok(Some(end - start))
}

/// Earliest time after which |q| stays within `band` times the reference level.
///
/// The reference is |q(0)|, or the largest |q| in the series when q(0) = 0.
/// Returns `Ok(None)` if the final sample is still outside the band.
pub fn settling_time(series: &TransientSeries, band: f64) -> Result<Option<f64>, MeasureError> {
    if !band.is_finite() || band <= 0.0 {
        return Err(MeasureError::InvalidBand(band));
    }
    let first = series.points.first().ok_or(MeasureError::NoData)?;

    let reference = if first.charge != 0.0 {
        first.charge.abs()
    } else {
        peak(series)?.charge.abs()
    };
    let limit = band * reference;

    match series.points.iter().rposition(|p| p.charge.abs() > limit) {
        None => Ok(Some(first.time)),
        Some(i) => Ok(series.points.get(i + 1).map(|p| p.time)),
    }
}

/// Summary of the standard measurements on one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureSummary {
    /// Sample with the largest |q|.
    pub peak: SamplePoint,
    /// Overshoot as a fraction of |q(0)|.
    pub overshoot: f64,
    /// Interpolated sign changes of q(t).
    pub zero_crossings: Vec<f64>,
    /// 90% to 10% fall time (s), if both levels are crossed.
    pub fall_time: Option<f64>,
    /// Settling band used for `settling_time`.
    pub settling_band: f64,
    /// Settling time (s), if the series settles within its horizon.
    pub settling_time: Option<f64>,
    /// RMS charge over the whole series.
    pub rms: f64,
}

impl MeasureSummary {
    /// Evaluate all standard measurements.
    pub fn evaluate(series: &TransientSeries, band: f64) -> Result<Self, MeasureError> {
        Ok(Self {
            peak: peak(series)?,
            overshoot: overshoot(series)?,
            zero_crossings: zero_crossings(series),
            fall_time: fall_time(series)?,
            settling_band: band,
            settling_time: settling_time(series, band)?,
            rms: statistic(series, StatFunc::Rms, None, None)?,
        })
    }
}
