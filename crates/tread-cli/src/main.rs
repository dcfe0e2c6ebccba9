//! Tread CLI - headless driver for the kinematic controller

mod commands;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, simulate, validate, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tread")]
#[command(about = "First-person kinematic controller, run headless", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default room level to a file
    Init {
        /// Output level file
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load a level and check its boxes, spawn and controller settings
    Validate {
        /// Path to level file
        level: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: OutputFormat,
    },

    /// Run the controller over a level with scripted input
    Simulate {
        /// Path to level file
        level: String,

        /// Number of frames to run
        #[arg(long, default_value = "120")]
        frames: u64,

        /// Seconds between frames
        #[arg(long, default_value = "0.016666668")]
        dt: f32,

        /// Input timeline (TOML); without one the pointer is locked on frame 0
        #[arg(long)]
        script: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: OutputFormat,
    },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Validate { level, format } => {
            validate::run(validate::ValidateArgs { level, format })
        }
        Commands::Simulate {
            level,
            frames,
            dt,
            script,
            format,
        } => simulate::run(simulate::SimulateArgs {
            level,
            frames,
            dt,
            script,
            format,
        }),
    }
}
