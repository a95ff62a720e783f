//! skanowl - MAC address monitor
//!
//! Watches the local segment for unknown hosts and ARP/MAC spoofing.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skanowl::{
    shell, AddressRegistry, Config, ConsoleReporter, PnetCapture, PnetCaptureFactory,
    TaskController,
};

#[derive(Parser)]
#[command(name = "skanowl")]
#[command(about = "Known/unknown MAC monitor with ARP and MAC spoofing detection")]
struct Cli {
    /// Network interface to capture on (e.g., eth0)
    #[arg(short, long, global = true)]
    interface: Option<String>,

    /// File of known MAC addresses, one per line
    #[arg(short, long, global = true)]
    known: Option<PathBuf>,

    /// File unknown MAC addresses are appended to
    #[arg(short, long, global = true)]
    unknown: Option<PathBuf>,

    /// Length of one capture call in milliseconds
    #[arg(long, global = true)]
    window_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record every source MAC seen into the known file until Ctrl+C
    Acquire,
    /// Monitor for unknown hosts and spoofing until Ctrl+C
    Monitor,
    /// Read commands from stdin (known, unknown, acquire, stop-all, monitor, stop-monitor, status, quit)
    Shell,
    /// List available network interfaces
    Interfaces,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    apply_cli(&mut config, &cli)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Commands::Interfaces = cli.command {
        for iface in PnetCapture::list_interfaces() {
            println!("{}", iface);
        }
        return Ok(());
    }

    let controller = TaskController::new(
        Arc::new(AddressRegistry::new()),
        Arc::new(PnetCaptureFactory::new(config.interface.clone())),
        Arc::new(ConsoleReporter::new()),
    )
    .with_window(config.capture_window);

    if let Some(path) = &config.known_file {
        controller
            .select_known_file(path)
            .with_context(|| format!("Failed to select known file {:?}", path))?;
    }
    if let Some(path) = &config.unknown_file {
        controller
            .select_unknown_file(path)
            .with_context(|| format!("Failed to select unknown file {:?}", path))?;
    }

    match cli.command {
        Commands::Acquire => {
            controller.start_acquisition()?;
            wait_for_ctrlc()?;
            controller.stop_all();
        }
        Commands::Monitor => {
            controller.start_monitoring()?;
            wait_for_ctrlc()?;
            controller.stop_monitoring();
        }
        Commands::Shell => {
            shell::run(&controller, io::stdin().lock()).context("Failed to read commands")?;
            controller.stop_all();
        }
        Commands::Interfaces => {}
    }

    tracing::info!("skanowl exiting");
    Ok(())
}

fn apply_cli(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(interface) = &cli.interface {
        config.interface = Some(interface.clone());
    }
    if let Some(known) = &cli.known {
        config.known_file = Some(known.clone());
    }
    if let Some(unknown) = &cli.unknown {
        config.unknown_file = Some(unknown.clone());
    }
    if let Some(ms) = cli.window_ms {
        anyhow::ensure!(ms > 0, "--window-ms must be greater than 0");
        config.capture_window = Duration::from_millis(ms);
    }
    Ok(())
}

fn wait_for_ctrlc() -> Result<()> {
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .context("Failed to set Ctrl+C handler")?;

    eprintln!("Press Ctrl+C to stop.");
    let _ = rx.recv();
    Ok(())
}
