//! Output formatting for responses, measurements and sweeps.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use rlc_transient::{
    CircuitParameters, DampingRegime, DerivedQuantities, MeasureSummary, SweepResult,
    TransientResponse,
};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for reading in a terminal.
    Table,
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON.
    Json,
}

/// Write the derived quantities block shared by `run` and `analyze`.
fn write_quantities<W: Write>(
    params: &CircuitParameters,
    q: &DerivedQuantities,
    regime: DampingRegime,
    writer: &mut W,
) -> Result<()> {
    writeln!(
        writer,
        "Series RLC: R = {} ohm, L = {} H, C = {} F",
        params.resistance, params.inductance, params.capacitance
    )?;
    writeln!(writer, "==========================================")?;
    writeln!(writer, "  alpha   = {:.6e} 1/s", q.alpha)?;
    writeln!(writer, "  omega0  = {:.6e} rad/s", q.omega0)?;
    writeln!(writer, "  zeta    = {:.6}", q.zeta)?;
    writeln!(writer, "  omega_d = {:.6e} rad/s", q.damped_frequency())?;
    writeln!(writer, "  Q       = {:.6}", q.quality_factor())?;
    let [s1, s2] = q.characteristic_roots();
    writeln!(
        writer,
        "  roots   = {:.6e} {:+.6e}j, {:.6e} {:+.6e}j",
        s1.re, s1.im, s2.re, s2.im
    )?;
    writeln!(writer, "  regime  = {}", regime)?;
    Ok(())
}

/// Write derived quantities and regime without a waveform.
pub fn write_analysis<W: Write>(
    params: &CircuitParameters,
    q: &DerivedQuantities,
    regime: DampingRegime,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            write_quantities(params, q, regime, writer)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            writeln!(writer, "R,L,C,alpha,omega0,zeta,omega_d,Q,regime")?;
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{}",
                params.resistance,
                params.inductance,
                params.capacitance,
                q.alpha,
                q.omega0,
                q.zeta,
                q.damped_frequency(),
                q.quality_factor(),
                regime
            )?;
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "parameters": params,
                "quantities": q,
                "damped_frequency": q.damped_frequency(),
                "quality_factor": json_f64(q.quality_factor()),
                "characteristic_roots": q.characteristic_roots(),
                "regime": regime,
                "label": regime.label(),
            });
            serde_json::to_writer_pretty(&mut *writer, &value)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Write a full response: header plus the (time, charge) series.
///
/// CSV format:
/// ```csv
/// time,charge
/// 0,1
/// 0.02,0.99...
/// ```
pub fn write_response<W: Write>(
    response: &TransientResponse,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            write_quantities(
                &response.parameters,
                &response.quantities,
                response.regime,
                writer,
            )?;
            writeln!(writer)?;
            writeln!(writer, "{:>14}{:>14}", "Time", "q(t)")?;
            writeln!(writer, "{}", "-".repeat(28))?;
            for p in &response.series {
                writeln!(writer, "{:>14.6e}{:>14.6}", p.time, p.charge)?;
            }
            writeln!(writer)?;
            writeln!(
                writer,
                "Transient response complete ({} points).",
                response.series.len()
            )?;
        }
        OutputFormat::Csv => {
            writeln!(writer, "time,charge")?;
            for p in &response.series {
                writeln!(writer, "{},{}", p.time, p.charge)?;
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "regime": response.regime,
                "label": response.regime.label(),
                "parameters": response.parameters,
                "quantities": response.quantities,
                "time_step": response.series.time_step,
                "samples": response.series.points,
            });
            serde_json::to_writer_pretty(&mut *writer, &value)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Write measurement results.
pub fn write_measurements<W: Write>(
    regime: DampingRegime,
    summary: &MeasureSummary,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(writer, "Measurements ({})", regime)?;
            writeln!(writer, "==========================================")?;
            writeln!(
                writer,
                "  peak           = {:.6} at t = {:.6e} s",
                summary.peak.charge, summary.peak.time
            )?;
            writeln!(writer, "  overshoot      = {:.4}%", summary.overshoot * 100.0)?;
            writeln!(writer, "  rms            = {:.6}", summary.rms)?;
            match summary.fall_time {
                Some(t) => writeln!(writer, "  fall (90-10%)  = {:.6e} s", t)?,
                None => writeln!(writer, "  fall (90-10%)  = not reached")?,
            }
            match summary.settling_time {
                Some(t) => writeln!(
                    writer,
                    "  settling ({:.1}%) = {:.6e} s",
                    summary.settling_band * 100.0,
                    t
                )?,
                None => writeln!(
                    writer,
                    "  settling ({:.1}%) = not reached",
                    summary.settling_band * 100.0
                )?,
            }
            writeln!(writer, "  zero crossings = {}", summary.zero_crossings.len())?;
            for t in &summary.zero_crossings {
                writeln!(writer, "    t = {:.6e} s", t)?;
            }
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            writeln!(writer, "measurement,value")?;
            writeln!(writer, "regime,{}", regime)?;
            writeln!(writer, "peak_time,{}", summary.peak.time)?;
            writeln!(writer, "peak_charge,{}", summary.peak.charge)?;
            writeln!(writer, "overshoot,{}", summary.overshoot)?;
            writeln!(writer, "rms,{}", summary.rms)?;
            writeln!(
                writer,
                "fall_time,{}",
                summary.fall_time.map(|t| t.to_string()).unwrap_or_default()
            )?;
            writeln!(
                writer,
                "settling_time,{}",
                summary
                    .settling_time
                    .map(|t| t.to_string())
                    .unwrap_or_default()
            )?;
            for (i, t) in summary.zero_crossings.iter().enumerate() {
                writeln!(writer, "zero_crossing_{},{}", i + 1, t)?;
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "regime": regime,
                "measurements": summary,
            });
            serde_json::to_writer_pretty(&mut *writer, &value)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Write one row per sweep point.
pub fn write_sweep<W: Write>(
    result: &SweepResult,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(
                writer,
                "{:>14}{:>14}{:>20}{:>14}",
                "R", "zeta", "regime", "settling"
            )?;
            writeln!(writer, "{}", "-".repeat(62))?;
            for p in &result.points {
                match (&p.quantities, p.regime, &p.error) {
                    (Some(q), Some(regime), _) => {
                        let settling = p
                            .settling_time
                            .map(|t| format!("{:.6e}", t))
                            .unwrap_or_else(|| "-".to_string());
                        writeln!(
                            writer,
                            "{:>14.6}{:>14.6}{:>20}{:>14}",
                            p.resistance, q.zeta, regime, settling
                        )?;
                    }
                    (_, _, error) => {
                        writeln!(
                            writer,
                            "{:>14.6}  error: {}",
                            p.resistance,
                            error.as_deref().unwrap_or("unknown")
                        )?;
                    }
                }
            }
            writeln!(writer)?;
            let c = &result.counts;
            writeln!(
                writer,
                "Sweep complete: {} underdamped, {} critically damped, {} overdamped, {} failed.",
                c.underdamped, c.critically_damped, c.overdamped, c.failed
            )?;
        }
        OutputFormat::Csv => {
            writeln!(writer, "resistance,alpha,omega0,zeta,regime,settling_time,error")?;
            for p in &result.points {
                let (alpha, omega0, zeta) = p
                    .quantities
                    .map(|q| (q.alpha.to_string(), q.omega0.to_string(), q.zeta.to_string()))
                    .unwrap_or_default();
                writeln!(
                    writer,
                    "{},{},{},{},{},{},{}",
                    p.resistance,
                    alpha,
                    omega0,
                    zeta,
                    p.regime.map(|r| r.label()).unwrap_or_default(),
                    p.settling_time.map(|t| t.to_string()).unwrap_or_default(),
                    p.error.as_deref().map(csv_quote).unwrap_or_default()
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, result)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn csv_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// JSON has no infinity; an unbounded quality factor is written as null.
fn json_f64(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
