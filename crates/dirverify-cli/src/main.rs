//! Dirverify - directory-backed user verification
//!
//! Operator tool for looking up and authenticating users against an LDAP
//! directory with the same pipeline host applications use.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::CommandContext;
use dirverify_auth::VerificationService;
use dirverify_core::config::{DirverifyConfig, LoggingConfig};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dirverify")]
#[command(author = "Dirverify Team")]
#[command(version = dirverify_core::VERSION)]
#[command(about = "Verify users against an LDAP directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DIRVERIFY_CONFIG")]
    config: Option<String>,

    /// Directory hostname
    #[arg(long, global = true)]
    host: Option<String>,

    /// Directory port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a user without checking a password
    Lookup {
        /// Username to search for
        username: String,
    },

    /// Check a user's password
    Authenticate {
        /// Username to search for
        username: String,

        /// Password to check
        #[arg(long, env = "DIRVERIFY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check that the directory accepts the service identity
    Probe,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load config, environment wins over the file
    let mut config = if let Some(config_path) = &cli.config {
        DirverifyConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config file: {}", config_path))?
            .apply_env()
    } else {
        DirverifyConfig::from_env()
    };

    // Override with CLI args
    if let Some(host) = cli.host {
        config.directory.connection_hostname = host;
    }
    if let Some(port) = cli.port {
        config.directory.connection_port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging);
    tracing::debug!(
        host = %config.directory.connection_hostname,
        port = config.directory.connection_port,
        "Loaded directory configuration"
    );

    let ctx = CommandContext { json: cli.json };
    let service = VerificationService::ldap(config.directory);

    let verified = match cli.command {
        Commands::Version => {
            println!("dirverify {}", dirverify_core::VERSION);
            true
        }
        Commands::Lookup { username } => commands::lookup::execute(&ctx, &service, &username).await?,
        Commands::Authenticate { username, password } => {
            commands::authenticate::execute(&ctx, &service, &username, &password).await?
        }
        Commands::Probe => commands::probe::execute(&ctx, &service).await?,
    };

    Ok(if verified {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr so JSON results on stdout stay parseable
    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}
