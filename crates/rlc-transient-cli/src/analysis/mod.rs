//! Command runners for single-circuit analysis and resistance sweeps.

pub mod sweep;
pub mod transient;

pub use sweep::run_sweep;
pub use transient::{run_analyze, run_measure, run_transient};
