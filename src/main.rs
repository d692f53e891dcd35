mod config;
mod dns;
mod logger;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{LevelFilter, error, info, warn};

use crate::config::AppConfig;
use crate::dns::{Browser, DnsOrchestrator, EventSink, NativeSystem, StatusEvent};

#[derive(Parser)]
#[command(
    name = "dnswitch",
    version,
    about = "Applies or reverts a remotely sourced DNS server across all active network interfaces"
)]
struct Cli {
    /// Overrides the configured URL of the raw-text DNS resource.
    #[arg(long)]
    url: Option<String>,

    /// Shows debug output, including swallowed cleanup errors.
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Binds the fetched DNS as primary on every active network interface.
    Apply {
        /// Opens this browser in private mode after a successful apply.
        #[arg(long, value_enum)]
        browser: Option<Browser>,
    },
    /// Reverts every active network interface to DHCP-sourced DNS.
    Reset,
}

/// Renders orchestrator status events through the log facade.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: StatusEvent) {
        match event {
            StatusEvent::Info(text) => info!("{}", text),
            StatusEvent::Success(text) => info!("{}", text),
            StatusEvent::Failure { message, detail } => error!("{}: {}", message, detail),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let mut config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    };
    if let Some(url) = cli.url {
        config.dns_url = url;
    }

    let sys = NativeSystem::new(config.artifacts.clone());
    let mut orchestrator = DnsOrchestrator::new(config, Box::new(sys), Box::new(ConsoleSink));

    // A start failure is terminal; the emitted events already said why.
    if orchestrator.start().await.is_err() {
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Apply { browser } => orchestrator.apply(browser).await,
        Command::Reset => orchestrator.reset().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
