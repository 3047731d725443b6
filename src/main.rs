//! ticketry - guild support-ticket workflow service
//!
//! Main entry point: parses command-line arguments, sets up logging, and
//! dispatches to the command handlers.

use anyhow::Context;
use clap::Parser;
use std::process;

use ticketry::cli::{handlers, Cli, Commands, LicenseCommands, OutputFormatter};
use ticketry::settings::Settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);
    if let Err(err) = run(cli, formatter).await {
        formatter.error(&format!("{err:#}"));
        process::exit(1);
    }
}

async fn run(cli: Cli, formatter: OutputFormatter) -> anyhow::Result<()> {
    let mut settings = Settings::load(cli.settings.as_deref()).context("loading settings")?;
    if let Some(data_dir) = cli.data_dir {
        settings.data_dir = data_dir;
    }

    let ctx = handlers::HandlerContext::new(settings, formatter)
        .context("initializing document stores")?;

    match cli.command {
        Commands::Serve { bind } => handlers::handle_serve(&ctx, bind).await?,
        Commands::License { command } => match command {
            LicenseCommands::Grant { guild, actor } => {
                handlers::handle_license_grant(&ctx, guild, actor)?;
            },
            LicenseCommands::Status { guild } => handlers::handle_license_status(&ctx, guild)?,
        },
        Commands::Config { guild } => handlers::handle_config_show(&ctx, guild)?,
        Commands::Credits { user } => handlers::handle_credits_show(&ctx, user)?,
    }
    Ok(())
}
