//! Single-circuit commands: run, analyze, measure.

use std::io::Write;

use anyhow::{Context, Result};
use rlc_transient::{CircuitParameters, MeasureSummary, SimulationConfig, analyze, derive_series};

use crate::output::{OutputFormat, write_analysis, write_measurements, write_response};

/// Evaluate the circuit and print its regime and charge waveform.
pub fn run_transient<W: Write>(
    params: &CircuitParameters,
    config: &SimulationConfig,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    let response = derive_series(params, config).context("transient evaluation failed")?;
    write_response(&response, format, writer)
}

/// Print α, ω₀, ζ and the regime without sampling a waveform.
pub fn run_analyze<W: Write>(
    params: &CircuitParameters,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    let (quantities, regime) = analyze(params).context("damping analysis failed")?;
    write_analysis(params, &quantities, regime, format, writer)
}

/// Evaluate the circuit and print measurements on its waveform.
pub fn run_measure<W: Write>(
    params: &CircuitParameters,
    config: &SimulationConfig,
    band: f64,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    let response = derive_series(params, config).context("transient evaluation failed")?;
    let summary =
        MeasureSummary::evaluate(&response.series, band).context("measurement failed")?;
    write_measurements(response.regime, &summary, format, writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_transient_reports_invalid_parameters() {
        let mut out = Vec::new();
        let err = run_transient(
            &CircuitParameters::new(1.0, 0.0, 0.1),
            &SimulationConfig::default(),
            OutputFormat::Csv,
            &mut out,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("inductance must be positive"));
        assert!(out.is_empty(), "no series should be written on error");
    }

    #[test]
    fn test_run_measure_overdamped_has_no_crossings() {
        let mut out = Vec::new();
        run_measure(
            &CircuitParameters::new(10.0, 0.5, 0.1),
            &SimulationConfig::default(),
            0.02,
            OutputFormat::Json,
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["regime"], "overdamped");
        assert_eq!(value["measurements"]["zero_crossings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_run_measure_rejects_bad_band() {
        let mut out = Vec::new();
        let err = run_measure(
            &CircuitParameters::new(2.0, 0.5, 0.1),
            &SimulationConfig::default(),
            -0.1,
            OutputFormat::Table,
            &mut out,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("invalid settling band"));
    }

    #[test]
    fn test_run_analyze_table() {
        let mut out = Vec::new();
        run_analyze(&CircuitParameters::new(2.0, 0.5, 0.1), OutputFormat::Table, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("zeta    = 0.447214"));
        assert!(text.contains("regime  = underdamped"));
    }
}
