use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use creeptrace::ingest::IngestOptions;
use creeptrace::units::{DiameterUnit, StrainRateUnit, TimeUnit};

mod config;
mod demo;
mod info;
mod process;
mod validate;

/// creeptrace - Creep-Test Diameter Log Processor
#[derive(Parser)]
#[command(name = "creeptrace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Time axis unit.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum TimeUnitArg {
    /// Seconds
    #[default]
    S,
    /// Minutes
    Min,
    /// Hours
    Hour,
}

impl From<TimeUnitArg> for TimeUnit {
    fn from(arg: TimeUnitArg) -> Self {
        match arg {
            TimeUnitArg::S => TimeUnit::Seconds,
            TimeUnitArg::Min => TimeUnit::Minutes,
            TimeUnitArg::Hour => TimeUnit::Hours,
        }
    }
}

/// Diameter axis unit.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DiameterUnitArg {
    /// Millimetres
    #[default]
    Mm,
    /// Micrometres
    #[value(alias = "μm")]
    Um,
}

impl From<DiameterUnitArg> for DiameterUnit {
    fn from(arg: DiameterUnitArg) -> Self {
        match arg {
            DiameterUnitArg::Mm => DiameterUnit::Millimeters,
            DiameterUnitArg::Um => DiameterUnit::Micrometers,
        }
    }
}

/// Strain-rate axis unit.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum StrainRateUnitArg {
    /// Pure strain rate per second
    #[default]
    #[value(name = "1/s")]
    PerSecond,
    /// Pure strain rate per minute
    #[value(name = "1/min")]
    PerMinute,
    /// Pure strain rate per hour
    #[value(name = "1/hour")]
    PerHour,
    /// Diameter-scaled rate in micrometres per second
    #[value(name = "um/s", alias = "μm/s")]
    MicronsPerSecond,
    /// Diameter-scaled rate in micrometres per minute
    #[value(name = "um/min", alias = "μm/min")]
    MicronsPerMinute,
    /// Diameter-scaled rate in micrometres per hour
    #[value(name = "um/hour", alias = "μm/hour")]
    MicronsPerHour,
}

impl From<StrainRateUnitArg> for StrainRateUnit {
    fn from(arg: StrainRateUnitArg) -> Self {
        match arg {
            StrainRateUnitArg::PerSecond => StrainRateUnit::PerSecond,
            StrainRateUnitArg::PerMinute => StrainRateUnit::PerMinute,
            StrainRateUnitArg::PerHour => StrainRateUnit::PerHour,
            StrainRateUnitArg::MicronsPerSecond => StrainRateUnit::MicronsPerSecond,
            StrainRateUnitArg::MicronsPerMinute => StrainRateUnit::MicronsPerMinute,
            StrainRateUnitArg::MicronsPerHour => StrainRateUnit::MicronsPerHour,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Process a raw diameter log into a derived strain table
    Process {
        /// Input CSV log path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output table path (defaults to the input with a .txt extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Reference (initial) tube diameter in millimetres
        #[arg(short = 'd', long, value_name = "MM")]
        reference_diameter: Option<f64>,

        /// Time axis unit
        #[arg(long, value_enum)]
        time_unit: Option<TimeUnitArg>,

        /// Diameter axis unit
        #[arg(long, value_enum)]
        diameter_unit: Option<DiameterUnitArg>,

        /// Strain-rate axis unit
        #[arg(long, value_enum)]
        strain_rate_unit: Option<StrainRateUnitArg>,

        /// Load processing defaults from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Input field delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Treat the first row as data instead of a header
        #[arg(long)]
        no_header: bool,
    },

    /// Display information about a raw diameter log
    Info {
        /// Input log path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Input field delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Treat the first row as data instead of a header
        #[arg(long)]
        no_header: bool,
    },

    /// Check a raw diameter log for problems before processing
    Validate {
        /// Input log path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Input field delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Treat the first row as data instead of a header
        #[arg(long)]
        no_header: bool,
    },

    /// Generate a synthetic creep-test log for trying the tool
    Demo {
        /// Output log path
        #[arg(value_name = "OUTPUT", default_value = "demo_creep_run.csv")]
        output: PathBuf,

        /// Number of samples to generate
        #[arg(short = 'n', long, default_value = "600")]
        rows: usize,

        /// Sampling interval in seconds
        #[arg(long, default_value = "10.0")]
        interval: f64,

        /// Starting tube diameter in millimetres
        #[arg(short = 'd', long, default_value = "9.5")]
        diameter: f64,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            input,
            output,
            reference_diameter,
            time_unit,
            diameter_unit,
            strain_rate_unit,
            config,
            delimiter,
            no_header,
        } => process::run(
            input,
            output,
            reference_diameter,
            time_unit,
            diameter_unit,
            strain_rate_unit,
            config,
            delimiter,
            no_header,
        ),
        Commands::Info {
            file,
            json,
            delimiter,
            no_header,
        } => info::run(file, json, delimiter, no_header),
        Commands::Validate {
            file,
            delimiter,
            no_header,
        } => validate::run(file, delimiter, no_header),
        Commands::Demo {
            output,
            rows,
            interval,
            diameter,
        } => demo::run(output, rows, interval, diameter),
    }
}

/// Build ingest options from the shared CLI flags.
pub(crate) fn ingest_options(delimiter: char, no_header: bool) -> Result<IngestOptions> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {delimiter:?}");
    }
    Ok(IngestOptions {
        delimiter: delimiter as u8,
        has_headers: !no_header,
        ..IngestOptions::default()
    })
}
