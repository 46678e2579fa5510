//! kitatime library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (ledger, locks, statistics, notifications, export).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod notify;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let actor = cli.as_user.as_deref().unwrap_or(&cfg.default_user);

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg, actor),
        Commands::Entry { .. } => cli::commands::entry::handle(&cli.command, cfg, actor),
        Commands::Lock { .. } => cli::commands::lock::handle(&cli.command, cfg, actor),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg, actor),
        Commands::Child { .. } => cli::commands::child::handle(&cli.command, cfg, actor),
        Commands::Event { .. } => cli::commands::event::handle(&cli.command, cfg, actor),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, actor),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg, actor),
    }
}

/// Diagnostics go to stderr so command output stays clean; `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    // config is loaded once and passed down
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
