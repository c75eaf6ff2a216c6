//! Result types for transient evaluation.

use serde::{Deserialize, Serialize};

use crate::damping::{DampingRegime, DerivedQuantities};
use crate::params::CircuitParameters;

/// A single sample of the charge waveform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Time (s).
    pub time: f64,
    /// Capacitor charge q(t) (C).
    pub charge: f64,
}

/// Charge waveform on a uniform time grid starting at t = 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientSeries {
    /// Samples in order of increasing time.
    pub points: Vec<SamplePoint>,
    /// Spacing between consecutive samples (s).
    pub time_step: f64,
}

impl TransientSeries {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over samples.
    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    /// Get all time values.
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Get all charge values.
    pub fn charges(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.charge).collect()
    }

    /// (time, charge) pairs, ready for a line chart.
    pub fn waveform(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.time, p.charge)).collect()
    }

    /// Last sample.
    pub fn last(&self) -> Option<&SamplePoint> {
        self.points.last()
    }

    /// Interpolate the charge at a specific time.
    ///
    /// Uses linear interpolation between the two neighbouring samples. Times
    /// outside the series are clamped to the first or last sample. Returns
    /// None for an empty series.
    pub fn interpolate_at(&self, time: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;

        if time <= first.time {
            return Some(first.charge);
        }
        if time >= last.time {
            return Some(last.charge);
        }

        // Uniform grid: the bracketing interval is known directly, up to the
        // rounding of k·Δt against time/Δt.
        let mut i = ((time / self.time_step).floor() as usize).min(self.points.len() - 2);
        if i > 0 && time < self.points[i].time {
            i -= 1;
        } else if i + 2 < self.points.len() && time > self.points[i + 1].time {
            i += 1;
        }
        let p0 = &self.points[i];
        let p1 = &self.points[i + 1];
        let frac = ((time - p0.time) / (p1.time - p0.time)).clamp(0.0, 1.0);
        Some(p0.charge * (1.0 - frac) + p1.charge * frac)
    }
}

impl<'a> IntoIterator for &'a TransientSeries {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Regime and series derived from one parameter set.
///
/// Built in a single call and returned by value, so a holder that swaps the
/// whole struct never pairs a regime with a series from different inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientResponse {
    /// Inputs the response was computed from.
    pub parameters: CircuitParameters,
    /// α, ω₀, ζ.
    pub quantities: DerivedQuantities,
    /// Damping regime.
    pub regime: DampingRegime,
    /// Charge waveform.
    pub series: TransientSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> TransientSeries {
        // q = t on [0, 0.9]
        let points = (0..10)
            .map(|i| {
                let t = i as f64 * 0.1;
                SamplePoint { time: t, charge: t }
            })
            .collect();
        TransientSeries {
            points,
            time_step: 0.1,
        }
    }

    #[test]
    fn test_interpolate_at() {
        let series = ramp();

        assert!((series.interpolate_at(0.45).unwrap() - 0.45).abs() < 1e-12);
        assert!((series.interpolate_at(0.3).unwrap() - 0.3).abs() < 1e-12);
        assert!((series.interpolate_at(0.05).unwrap() - 0.05).abs() < 1e-12);

        // Clamped at both ends
        assert_eq!(series.interpolate_at(-1.0), Some(0.0));
        assert!((series.interpolate_at(5.0).unwrap() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_where_grid_time_rounds_past_query() {
        // 17 * 0.1 = 1.7000000000000002 > 1.7, yet floor(1.7 / 0.1) = 17
        let points = (0..=20)
            .map(|i| SamplePoint {
                time: i as f64 * 0.1,
                charge: if i <= 17 { 5.0 } else { 1e16 },
            })
            .collect();
        let series = TransientSeries {
            points,
            time_step: 0.1,
        };
        assert!(series.points[17].time > 1.7);

        let q = series.interpolate_at(1.7).unwrap();
        assert!((q - 5.0).abs() < 1e-12, "q(1.7) = {}", q);
    }

    #[test]
    fn test_interpolate_empty() {
        let series = TransientSeries {
            points: Vec::new(),
            time_step: 0.1,
        };
        assert_eq!(series.interpolate_at(0.0), None);
        assert!(series.is_empty());
    }

    #[test]
    fn test_accessors() {
        let series = ramp();
        assert_eq!(series.len(), 10);
        assert_eq!(series.times(), series.charges());
        assert_eq!(series.waveform()[3], (series.points[3].time, series.points[3].charge));
        assert_eq!(series.last().map(|p| p.time), Some(9.0 * 0.1));
        assert_eq!((&series).into_iter().count(), 10);
    }
}
