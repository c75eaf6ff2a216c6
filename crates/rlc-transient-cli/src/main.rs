//! rlc-transient CLI.
//!
//! Prints the damping regime and closed-form charge waveform of an unforced
//! series RLC loop, plus measurements and resistance sweeps.

mod analysis;
mod config;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rlc_transient::CircuitParameters;
use rlc_transient::measure::DEFAULT_SETTLING_BAND;

use crate::config::ConfigOverrides;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "rlc-transient")]
#[command(about = "Closed-form transient response of a series RLC circuit")]
#[command(version)]
struct Cli {
    /// JSON file with simulation settings; missing fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

/// Component values shared by the single-circuit commands.
#[derive(Args, Debug, Clone, Copy)]
struct CircuitArgs {
    /// Resistance (ohm)
    #[arg(short = 'r', long)]
    resistance: f64,

    /// Inductance (H)
    #[arg(short = 'l', long)]
    inductance: f64,

    /// Capacitance (F)
    #[arg(short = 'c', long)]
    capacitance: f64,
}

impl From<CircuitArgs> for CircuitParameters {
    fn from(a: CircuitArgs) -> Self {
        CircuitParameters::new(a.resistance, a.inductance, a.capacitance)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the circuit and print its charge waveform
    Run {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print derived quantities and the damping regime only
    Analyze {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print peak, zero crossings and settling time of the waveform
    Measure {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Settling band as a fraction of |q(0)|
        #[arg(long, default_value_t = DEFAULT_SETTLING_BAND)]
        band: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Sweep resistance across a range and report the regime at each point
    Sweep {
        /// Inductance (H)
        #[arg(short = 'l', long)]
        inductance: f64,

        /// Capacitance (F)
        #[arg(short = 'c', long)]
        capacitance: f64,

        /// First resistance (ohm)
        #[arg(long, default_value_t = 0.0)]
        r_start: f64,

        /// Last resistance (ohm)
        #[arg(long)]
        r_stop: f64,

        /// Number of points
        #[arg(long, default_value_t = 21)]
        points: usize,

        /// Settling band as a fraction of |q(0)|
        #[arg(long, default_value_t = DEFAULT_SETTLING_BAND)]
        band: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let sim = match config::load(cli.config.as_deref(), &cli.overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Run { circuit, format } => {
            analysis::run_transient(&circuit.into(), &sim, format, &mut stdout)
        }
        Commands::Analyze { circuit, format } => {
            analysis::run_analyze(&circuit.into(), format, &mut stdout)
        }
        Commands::Measure {
            circuit,
            band,
            format,
        } => analysis::run_measure(&circuit.into(), &sim, band, format, &mut stdout),
        Commands::Sweep {
            inductance,
            capacitance,
            r_start,
            r_stop,
            points,
            band,
            format,
        } => analysis::run_sweep(
            &CircuitParameters::new(r_start, inductance, capacitance),
            r_start,
            r_stop,
            points,
            &sim,
            band,
            format,
            &mut stdout,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
