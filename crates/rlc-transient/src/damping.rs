//! Damping analysis: decay rate, natural frequency and regime selection.
//!
//! The unforced series loop obeys
//!
//! ```text
//! L q'' + R q' + q / C = 0   <=>   q'' + 2α q' + ω₀² q = 0
//! ```
//!
//! with α = R / (2L) and ω₀ = 1 / √(LC). The damping ratio ζ = α / ω₀ picks
//! which closed form solves it.

use std::fmt;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::{CircuitParameters, check_finite};

/// Half-width of the ζ band around 1.0 that counts as critical damping.
///
/// ζ is dimensionless and compared against 1, so this is both the absolute
/// and the relative tolerance.
pub const CRITICAL_DAMPING_TOLERANCE: f64 = 1e-6;

/// The three solution families of the second-order loop equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DampingRegime {
    /// ζ < 1: decaying oscillation at ω_d.
    Underdamped,
    /// ζ = 1 (within [`CRITICAL_DAMPING_TOLERANCE`]): fastest non-oscillating decay.
    CriticallyDamped,
    /// ζ > 1: sum of two real exponentials.
    Overdamped,
}

impl DampingRegime {
    /// All regimes, in order of increasing ζ.
    pub const ALL: [DampingRegime; 3] = [
        DampingRegime::Underdamped,
        DampingRegime::CriticallyDamped,
        DampingRegime::Overdamped,
    ];

    /// Classify a damping ratio.
    ///
    /// The tolerance band is checked first so the three regimes partition
    /// ζ ≥ 0 without gaps: ζ < 1 - tol is underdamped, ζ > 1 + tol overdamped.
    pub fn classify(zeta: f64) -> Self {
        if (zeta - 1.0).abs() <= CRITICAL_DAMPING_TOLERANCE {
            DampingRegime::CriticallyDamped
        } else if zeta < 1.0 {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }

    /// Stable lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            DampingRegime::Underdamped => "underdamped",
            DampingRegime::CriticallyDamped => "critically damped",
            DampingRegime::Overdamped => "overdamped",
        }
    }

    /// Whether the response oscillates about zero.
    pub fn is_oscillatory(&self) -> bool {
        matches!(self, DampingRegime::Underdamped)
    }
}

impl fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Quantities derived from [`CircuitParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuantities {
    /// Decay rate α = R / (2L) (1/s).
    pub alpha: f64,
    /// Undamped natural frequency ω₀ = 1 / √(LC) (rad/s).
    pub omega0: f64,
    /// Damping ratio ζ = α / ω₀.
    pub zeta: f64,
}

impl DerivedQuantities {
    /// Compute α, ω₀ and ζ from validated parameters.
    pub fn from_parameters(params: &CircuitParameters) -> Result<Self> {
        params.validate()?;

        let alpha = params.resistance / (2.0 * params.inductance);
        let omega0 = 1.0 / (params.inductance * params.capacitance).sqrt();
        let zeta = alpha / omega0;

        // Finite inputs can still overflow, e.g. R = 1e308 with L = 1e-10
        check_finite("alpha", alpha)?;
        check_finite("omega0", omega0)?;
        check_finite("zeta", zeta)?;
        if omega0 <= 0.0 {
            return Err(Error::InvalidParameters(format!(
                "omega0 underflows to zero for L = {}, C = {}",
                params.inductance, params.capacitance
            )));
        }

        Ok(Self {
            alpha,
            omega0,
            zeta,
        })
    }

    /// Regime for this damping ratio.
    pub fn regime(&self) -> DampingRegime {
        DampingRegime::classify(self.zeta)
    }

    /// Damped oscillation frequency ω_d = ω₀·√(1 − ζ²); zero unless underdamped.
    pub fn damped_frequency(&self) -> f64 {
        self.omega0 * (1.0 - self.zeta * self.zeta).max(0.0).sqrt()
    }

    /// Quality factor Q = 1 / (2ζ). Infinite for a lossless loop.
    pub fn quality_factor(&self) -> f64 {
        if self.zeta == 0.0 {
            f64::INFINITY
        } else {
            1.0 / (2.0 * self.zeta)
        }
    }

    /// Roots of s² + 2αs + ω₀² = 0, ordered with the slower (larger real part) first.
    pub fn characteristic_roots(&self) -> [Complex<f64>; 2] {
        let disc = self.alpha * self.alpha - self.omega0 * self.omega0;
        match self.regime() {
            DampingRegime::Underdamped => {
                let wd = self.damped_frequency();
                [
                    Complex::new(-self.alpha, wd),
                    Complex::new(-self.alpha, -wd),
                ]
            }
            DampingRegime::CriticallyDamped => {
                let s = Complex::new(-self.alpha, 0.0);
                [s, s]
            }
            DampingRegime::Overdamped => {
                let (s1, s2) = overdamped_roots(self.alpha, self.omega0, disc);
                [Complex::new(s1, 0.0), Complex::new(s2, 0.0)]
            }
        }
    }
}

/// Real roots (s₁, s₂) with s₁ > s₂ for α > ω₀.
///
/// s₂ = −α − √(α² − ω₀²) is computed directly and s₁ from s₁·s₂ = ω₀², which
/// avoids the cancellation in −α + √(α² − ω₀²) when α ≫ ω₀. The discriminant is
/// clamped to zero so round-off near ζ = 1 cannot produce NaN.
pub(crate) fn overdamped_roots(alpha: f64, omega0: f64, disc: f64) -> (f64, f64) {
    let root = disc.max(0.0).sqrt();
    let s2 = -alpha - root;
    let s1 = if s2 != 0.0 {
        omega0 * omega0 / s2
    } else {
        -alpha + root
    };
    (s1, s2)
}

/// Derive α, ω₀, ζ and the regime for a circuit.
///
/// Fails with [`Error::InvalidParameters`](crate::Error::InvalidParameters)
/// when L ≤ 0 or C ≤ 0 (ω₀ undefined), R < 0, or any value is non-finite.
pub fn analyze(params: &CircuitParameters) -> Result<(DerivedQuantities, DampingRegime)> {
    let quantities = DerivedQuantities::from_parameters(params)?;
    let regime = quantities.regime();

    log::debug!(
        "R={} L={} C={}: alpha={:.6e} omega0={:.6e} zeta={:.6} -> {}",
        params.resistance,
        params.inductance,
        params.capacitance,
        quantities.alpha,
        quantities.omega0,
        quantities.zeta,
        regime
    );

    Ok((quantities, regime))
}

/// Resistance that puts the loop exactly at ζ = 1: R = 2·√(L/C).
pub fn critical_resistance(inductance: f64, capacitance: f64) -> f64 {
    2.0 * (inductance / capacitance).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underdamped_scenario() {
        // R=2, L=0.5, C=0.1: alpha = 2, omega0 = sqrt(20), zeta = 2/sqrt(20)
        let params = CircuitParameters::new(2.0, 0.5, 0.1);
        let (q, regime) = analyze(&params).unwrap();

        assert!((q.alpha - 2.0).abs() < 1e-12);
        assert!((q.omega0 - 20.0_f64.sqrt()).abs() < 1e-12);
        assert!((q.zeta - 0.447_213_595).abs() < 1e-8, "zeta = {}", q.zeta);
        assert_eq!(regime, DampingRegime::Underdamped);
    }

    #[test]
    fn test_critical_scenario() {
        let r = critical_resistance(0.5, 0.1);
        assert!((r - 2.0 * 5.0_f64.sqrt()).abs() < 1e-12);

        let (q, regime) = analyze(&CircuitParameters::new(r, 0.5, 0.1)).unwrap();
        assert_eq!(regime, DampingRegime::CriticallyDamped);
        assert!((q.zeta - 1.0).abs() <= CRITICAL_DAMPING_TOLERANCE);
    }

    #[test]
    fn test_overdamped_scenario() {
        let (q, regime) = analyze(&CircuitParameters::new(10.0, 0.5, 0.1)).unwrap();
        assert!(q.zeta > 1.0);
        assert_eq!(regime, DampingRegime::Overdamped);
    }

    #[test]
    fn test_zero_resistance_is_underdamped() {
        let (q, regime) = analyze(&CircuitParameters::new(0.0, 0.5, 0.1)).unwrap();
        assert_eq!(q.zeta, 0.0);
        assert_eq!(regime, DampingRegime::Underdamped);
        assert!(q.quality_factor().is_infinite());
        assert!((q.damped_frequency() - q.omega0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_inductance_is_invalid() {
        let err = analyze(&CircuitParameters::new(2.0, 0.0, 0.1)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }

    #[test]
    fn test_overflowing_quantities_are_invalid() {
        for params in [
            CircuitParameters::new(1e308, 1e-10, 0.1),
            CircuitParameters::new(1.0, 1e-200, 1e-200),
            CircuitParameters::new(0.0, 1e200, 1e200),
        ] {
            assert!(
                matches!(analyze(&params), Err(Error::InvalidParameters(_))),
                "{:?} should be rejected",
                params
            );
        }
    }

    #[test]
    fn test_tolerance_band_edges() {
        let tol = CRITICAL_DAMPING_TOLERANCE;
        assert_eq!(DampingRegime::classify(1.0), DampingRegime::CriticallyDamped);
        assert_eq!(
            DampingRegime::classify(1.0 + 0.5 * tol),
            DampingRegime::CriticallyDamped
        );
        assert_eq!(
            DampingRegime::classify(1.0 - 0.5 * tol),
            DampingRegime::CriticallyDamped
        );
        assert_eq!(
            DampingRegime::classify(1.0 + 2.0 * tol),
            DampingRegime::Overdamped
        );
        assert_eq!(
            DampingRegime::classify(1.0 - 2.0 * tol),
            DampingRegime::Underdamped
        );
    }

    #[test]
    fn test_classification_partitions_zeta() {
        // Walk zeta across [0, 3]; regimes must appear in order with no overlap.
        let mut last = DampingRegime::Underdamped;
        for i in 0..=30_000 {
            let zeta = i as f64 * 1e-4;
            let regime = DampingRegime::classify(zeta);
            let expected = if (zeta - 1.0).abs() <= CRITICAL_DAMPING_TOLERANCE {
                DampingRegime::CriticallyDamped
            } else if zeta < 1.0 {
                DampingRegime::Underdamped
            } else {
                DampingRegime::Overdamped
            };
            assert_eq!(regime, expected, "zeta = {}", zeta);
            let rank = |r: DampingRegime| DampingRegime::ALL.iter().position(|x| *x == r);
            assert!(rank(regime) >= rank(last), "regime order broke at zeta = {}", zeta);
            last = regime;
        }
    }

    #[test]
    fn test_characteristic_roots() {
        let (q, _) = analyze(&CircuitParameters::new(2.0, 0.5, 0.1)).unwrap();
        let [s1, s2] = q.characteristic_roots();
        assert_eq!(s1, s2.conj());
        assert!((s1.re + 2.0).abs() < 1e-12);
        assert!((s1.im - 4.0).abs() < 1e-12, "omega_d = {}", s1.im);

        let (q, _) = analyze(&CircuitParameters::new(10.0, 0.5, 0.1)).unwrap();
        let [s1, s2] = q.characteristic_roots();
        // alpha = 10, omega0^2 = 20: s = -10 +/- sqrt(80)
        assert!((s1.re - (-10.0 + 80.0_f64.sqrt())).abs() < 1e-12);
        assert!((s2.re - (-10.0 - 80.0_f64.sqrt())).abs() < 1e-12);
        assert_eq!(s1.im, 0.0);
        // Product and sum of roots match the characteristic polynomial
        assert!(((s1 * s2).re - 20.0).abs() < 1e-10);
        assert!(((s1 + s2).re + 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_overdamped_roots_without_cancellation() {
        // alpha >> omega0: slow root ~ -omega0^2 / (2 alpha)
        let (s1, s2) = overdamped_roots(1e8, 1.0, 1e16 - 1.0);
        assert!((s1 - (-0.5e-8)).abs() < 1e-20, "s1 = {}", s1);
        assert!((s2 + 2e8).abs() < 1.0);
    }

    #[test]
    fn test_overdamped_roots_clamp_negative_discriminant() {
        let (s1, s2) = overdamped_roots(2.0, 2.0, -1e-15);
        assert!(s1.is_finite() && s2.is_finite());
        assert!((s1 + 2.0).abs() < 1e-12);
        assert!((s2 + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DampingRegime::Underdamped.to_string(), "underdamped");
        assert_eq!(DampingRegime::CriticallyDamped.label(), "critically damped");
        assert_eq!(DampingRegime::Overdamped.label(), "overdamped");
        assert!(DampingRegime::Underdamped.is_oscillatory());
        assert!(!DampingRegime::Overdamped.is_oscillatory());
    }
}
