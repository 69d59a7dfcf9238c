//! Command-line interface for the waypoint file tool.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::ToolConfig;
use crate::core::formats::MissionFormat;
use crate::processors::convert::{self, ConversionRequest};

#[derive(Parser)]
#[command(name = "waypoint-tool")]
#[command(about = "Mission Planner waypoint/polygon file converter", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a mission file to the other format
    Convert {
        /// Input .waypoints or .poly file
        input: PathBuf,
        /// Output format
        #[arg(short, long, value_enum)]
        to: MissionFormat,
        /// Number of perimeter reversal passes (waypoint output only)
        #[arg(short, long, default_value_t = 0)]
        reverse_passes: usize,
        /// Altitude in meters for points without one (overrides config)
        #[arg(short, long)]
        altitude: Option<f64>,
    },

    /// Classify a mission file and report its point count
    Inspect {
        /// Input .waypoints or .poly file
        input: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match ToolConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                ToolConfig::default()
            }
        },
        None => ToolConfig::default(),
    };

    // Dispatch to subcommands
    match cli.command {
        Commands::Convert {
            input,
            to,
            reverse_passes,
            altitude,
        } => {
            cmd_convert(&input, to, reverse_passes, altitude, &config);
        }
        Commands::Inspect { input } => {
            cmd_inspect(&input, &config);
        }
    }
}

fn cmd_convert(
    input: &PathBuf,
    to: MissionFormat,
    reverse_passes: usize,
    altitude: Option<f64>,
    config: &ToolConfig,
) {
    let start = Instant::now();

    let request = ConversionRequest {
        input: input.clone(),
        target: to,
        reverse_passes,
        default_alt: altitude.unwrap_or(config.default_altitude),
    };

    println!("Converting mission file...");
    println!("Input: {}", input.display());
    println!("Target format: {:?}", to);
    if reverse_passes > 0 {
        println!("Reverse passes: {}", reverse_passes);
    }

    let spinner = create_spinner("Converting...");

    match convert::convert(&request, config, &config.home) {
        Ok(output) => {
            spinner.finish_and_clear();

            print_summary(
                "Conversion Complete",
                &[
                    ("Input file", input.display().to_string()),
                    ("Output file", output.display().to_string()),
                    ("Target format", format!("{:?}", to)),
                    ("Reverse passes", reverse_passes.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Conversion failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_inspect(input: &PathBuf, config: &ToolConfig) {
    let start = Instant::now();

    match convert::inspect(input, config.default_altitude) {
        Ok((format, count)) => {
            print_summary(
                "Inspection Complete",
                &[
                    ("File", input.display().to_string()),
                    ("Format", format!("{:?}", format)),
                    ("Points", count.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            error!("Inspection failed: {}", e);
            std::process::exit(1);
        }
    }
}
