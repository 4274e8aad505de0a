use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arrmate_core::{
    load_config, load_env_file, run, validate_config, AppSelection, Config, RunOptions,
};

/// Configure Sonarr, Radarr and Prowlarr through their REST APIs.
///
/// Re-running is safe: resources that already exist are left alone.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Show what would be done without issuing any create requests
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Which app to configure
    #[arg(long, value_enum, default_value_t = App::All)]
    app: App,

    /// Path to the config file (built-in defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum App {
    Sonarr,
    Radarr,
    Prowlarr,
    All,
}

impl From<App> for AppSelection {
    fn from(app: App) -> Self {
        match app {
            App::Sonarr => AppSelection::Sonarr,
            App::Radarr => AppSelection::Radarr,
            App::Prowlarr => AppSelection::Prowlarr,
            App::All => AppSelection::All,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run_cli(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run_cli(args: Args) -> Result<bool> {
    info!("=== Media Server API Configuration ===");

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };
    validate_config(&config).context("Configuration validation failed")?;

    let env = load_env_file(&config.env_file).with_context(|| {
        format!(
            "Environment file {:?} is required; copy .env.sample and configure it",
            config.env_file
        )
    })?;

    if args.dry_run {
        warn!("DRY RUN MODE - no changes will be made");
    }

    let options = RunOptions {
        selection: args.app.into(),
        dry_run: args.dry_run,
    };
    let summary = run(&config, &env, &options).await;

    if summary.success() {
        info!("Configuration complete");
        info!("Next steps:");
        info!("  1. Complete manual configuration in the Prowlarr UI");
        info!("  2. Add indexers and sync them to Sonarr/Radarr");
        Ok(true)
    } else {
        error!("Configuration completed with errors");
        info!(
            "Ensure API keys are set in {:?} and the services are running",
            config.env_file
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["arrmate"]);
        assert!(!args.dry_run);
        assert!(!args.verbose);
        assert!(matches!(args.app, App::All));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_app_selection_flag() {
        let args = Args::parse_from(["arrmate", "--app", "radarr", "--dry-run"]);
        assert!(args.dry_run);
        assert!(matches!(args.app, App::Radarr));
        assert_eq!(AppSelection::from(args.app), AppSelection::Radarr);
    }
}
