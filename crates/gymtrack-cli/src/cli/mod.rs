//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use gymtrack_core::core::interrupt;
use gymtrack_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "gymtrack")]
#[command(version)]
#[command(about = "Track your workouts from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Create an account (password read from stdin)
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Account email
        #[arg(long)]
        email: String,
    },
    /// Sign in and print the workout history (password read from stdin)
    History {
        /// Account email
        #[arg(long)]
        email: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Save the API base URL to the config file
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Config commands must work even when the config file is broken.
    let command = match cli.command {
        Some(Commands::Config { command }) => {
            return match command {
                ConfigCommands::Path => {
                    commands::config::path();
                    Ok(())
                }
                ConfigCommands::Init => commands::config::init(),
                ConfigCommands::Generate => commands::config::generate(),
                ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
            };
        }
        other => other,
    };

    let config = config::Config::load().context("load config")?;
    let log_guard = logging::init(&config.log).context("init logging")?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting gymtrack");

    match command {
        None => commands::app::run(&config, log_guard.path()).await,
        Some(Commands::Signup { name, email }) => {
            let password = commands::read_password()?;
            commands::account::signup(&config, &name, &email, &password).await
        }
        Some(Commands::History { email }) => {
            let password = commands::read_password()?;
            commands::account::history(&config, &email, &password).await
        }
        // Handled before loading the config.
        Some(Commands::Config { .. }) => Ok(()),
    }
}
