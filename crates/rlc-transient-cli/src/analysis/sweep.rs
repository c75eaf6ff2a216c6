//! Resistance sweep command.

use std::io::Write;

use anyhow::{Result, bail};
use rlc_transient::{CircuitParameters, SimulationConfig, resistance_values, sweep_resistance};

use crate::output::{OutputFormat, write_sweep};

/// Sweep R over `points` values in [r_start, r_stop] and print one row per point.
#[allow(clippy::too_many_arguments)]
pub fn run_sweep<W: Write>(
    base: &CircuitParameters,
    r_start: f64,
    r_stop: f64,
    points: usize,
    config: &SimulationConfig,
    band: f64,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    if points == 0 {
        bail!("sweep needs at least one point");
    }
    // Fail fast on L and C; per-point failures can then only come from R.
    base.with_resistance(0.0).validate()?;

    let values = resistance_values(r_start, r_stop, points);
    let result = sweep_resistance(base, &values, config, band);
    write_sweep(&result, format, writer)
}
