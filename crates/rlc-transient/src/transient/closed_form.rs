//! Closed-form charge and current for each damping regime.

use crate::damping::{DampingRegime, overdamped_roots};

/// Solution of q'' + 2α q' + ω₀² q = 0 with q(0) = q₀, q'(0) = i₀.
///
/// Integration constants are solved once on construction; evaluation at a
/// time point is then a handful of `exp`/`sin`/`cos` calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClosedForm {
    /// q(t) = e^(−αt)·(A₁ cos ω_d t + A₂ sin ω_d t)
    Underdamped {
        alpha: f64,
        omega_d: f64,
        a1: f64,
        a2: f64,
    },
    /// q(t) = (A₁ + A₂ t)·e^(−αt)
    CriticallyDamped { alpha: f64, a1: f64, a2: f64 },
    /// q(t) = A₁ e^(s₁t) + A₂ e^(s₂t), with A₂ = q₀ − A₁.
    Overdamped {
        s1: f64,
        s2: f64,
        q0: f64,
        a1: f64,
    },
}

impl ClosedForm {
    /// Solve the integration constants for `regime`.
    ///
    /// The caller guarantees `regime` matches `zeta` and that `zeta` = α/ω₀;
    /// that keeps ω_d (underdamped) and s₁ − s₂ (overdamped) away from zero.
    pub fn new(
        regime: DampingRegime,
        alpha: f64,
        omega0: f64,
        zeta: f64,
        initial_charge: f64,
        initial_current: f64,
    ) -> Self {
        let q0 = initial_charge;
        let i0 = initial_current;

        match regime {
            DampingRegime::Underdamped => {
                let omega_d = omega0 * (1.0 - zeta * zeta).max(0.0).sqrt();
                ClosedForm::Underdamped {
                    alpha,
                    omega_d,
                    a1: q0,
                    a2: (i0 + alpha * q0) / omega_d,
                }
            }
            DampingRegime::CriticallyDamped => ClosedForm::CriticallyDamped {
                alpha,
                a1: q0,
                a2: i0 + alpha * q0,
            },
            DampingRegime::Overdamped => {
                let disc = alpha * alpha - omega0 * omega0;
                let (s1, s2) = overdamped_roots(alpha, omega0, disc);
                ClosedForm::Overdamped {
                    s1,
                    s2,
                    q0,
                    a1: (i0 - s2 * q0) / (s1 - s2),
                }
            }
        }
    }

    /// Regime this solution belongs to.
    pub fn regime(&self) -> DampingRegime {
        match self {
            ClosedForm::Underdamped { .. } => DampingRegime::Underdamped,
            ClosedForm::CriticallyDamped { .. } => DampingRegime::CriticallyDamped,
            ClosedForm::Overdamped { .. } => DampingRegime::Overdamped,
        }
    }

    /// Integration constants (A₁, A₂).
    pub fn coefficients(&self) -> (f64, f64) {
        match *self {
            ClosedForm::Underdamped { a1, a2, .. } => (a1, a2),
            ClosedForm::CriticallyDamped { a1, a2, .. } => (a1, a2),
            ClosedForm::Overdamped { q0, a1, .. } => (a1, q0 - a1),
        }
    }

    /// Capacitor charge q(t).
    ///
    /// Returns q₀ exactly at t = 0 in every regime.
    pub fn charge_at(&self, t: f64) -> f64 {
        match *self {
            ClosedForm::Underdamped {
                alpha,
                omega_d,
                a1,
                a2,
            } => {
                let (sin, cos) = (omega_d * t).sin_cos();
                (-alpha * t).exp() * (a1 * cos + a2 * sin)
            }
            ClosedForm::CriticallyDamped { alpha, a1, a2 } => (a1 + a2 * t) * (-alpha * t).exp(),
            ClosedForm::Overdamped { s1, s2, q0, a1 } => {
                // A₁e^(s₁t) + (q₀ − A₁)e^(s₂t), grouped so t = 0 gives q₀ exactly
                let e1 = (s1 * t).exp();
                let e2 = (s2 * t).exp();
                q0 * e2 + a1 * (e1 - e2)
            }
        }
    }

    /// Loop current i(t) = q'(t).
    pub fn current_at(&self, t: f64) -> f64 {
        match *self {
            ClosedForm::Underdamped {
                alpha,
                omega_d,
                a1,
                a2,
            } => {
                let (sin, cos) = (omega_d * t).sin_cos();
                let cos_coeff = omega_d * a2 - alpha * a1;
                let sin_coeff = -(alpha * a2 + omega_d * a1);
                (-alpha * t).exp() * (cos_coeff * cos + sin_coeff * sin)
            }
            ClosedForm::CriticallyDamped { alpha, a1, a2 } => {
                (a2 - alpha * (a1 + a2 * t)) * (-alpha * t).exp()
            }
            ClosedForm::Overdamped { s1, s2, q0, a1 } => {
                let a2 = q0 - a1;
                a1 * s1 * (s1 * t).exp() + a2 * s2 * (s2 * t).exp()
            }
        }
    }
}
