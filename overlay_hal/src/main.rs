//! # Overlay HAL Tool
//!
//! Loads an overlay description, builds an overlay over the process-wide
//! driver registry and reports which driver serves each member.
//!
//! # Usage
//!
//! ```bash
//! # List members without resolving any of them
//! overlay_hal --config overlay.toml
//!
//! # Resolve selected members lazily
//! overlay_hal --config overlay.toml --member gpio_btns --member my_custom_ip
//!
//! # Resolve everything up front, JSON report
//! overlay_hal --config overlay.toml --eager --format json
//! ```

use clap::{Parser, ValueEnum};
use overlay_common::config::LogLevel;
use overlay_common::ip::config::OverlayConfig;
use overlay_common::ip::consts::DEFAULT_OVERLAY_FILE;
use overlay_hal::{EagerOverlay, IpContainer, Overlay, OverlayReport, global_registry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Overlay HAL - resolve overlay members to IP drivers
#[derive(Parser, Debug)]
#[command(name = "overlay_hal")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Resolve overlay members to IP drivers")]
#[command(long_about = None)]
struct Args {
    /// Path to the overlay description (TOML).
    #[arg(short, long, default_value = DEFAULT_OVERLAY_FILE)]
    config: PathBuf,

    /// Resolve a member (can be specified multiple times)
    #[arg(short, long = "member", action = clap::ArgAction::Append)]
    members: Vec<String>,

    /// Resolve every member at construction instead of on access
    #[arg(long)]
    eager: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose logging (overrides the configured log level)
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("overlay_hal failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = OverlayConfig::load_validated(&args.config);
    let level = match (&config, args.verbose) {
        (_, true) => LogLevel::Debug,
        (Ok(config), false) => config.shared.log_level,
        (Err(_), false) => LogLevel::Info,
    };
    setup_tracing(level, args.json);
    let config = config?;

    let registry = global_registry();
    info!(
        "Overlay '{}' with {} members, {} device types registered",
        config.name(),
        config.ip.len(),
        registry.len()
    );

    let container: Box<dyn IpContainer> = if args.eager {
        Box::new(EagerOverlay::from_config(&config, &registry)?)
    } else {
        Box::new(Overlay::from_config(&config, Arc::new(registry))?)
    };

    for member in &args.members {
        let driver = container.get(member)?;
        info!(
            "Member '{}' ({}) -> driver '{}'",
            member,
            driver.device_type(),
            driver.name()
        );
    }

    let report = OverlayReport::from_container(container.as_ref());
    match args.format {
        Format::Text => print!("{report}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Setup tracing subscriber. `RUST_LOG` directives take precedence.
fn setup_tracing(level: LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
