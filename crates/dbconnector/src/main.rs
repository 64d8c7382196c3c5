//! `dbconnector` command-line tool.
//!
//! Inspects and edits the per-user connection settings stored in the
//! attribute document.
//!
//! # Usage
//!
//! ```text
//! dbconnector [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show               Print every effective setting and the connection string
//!   get <NAME>         Print one effective setting
//!   set <NAME> <VALUE> Change one setting for the active user
//!   reset              Reset the active user's settings to the defaults
//!   connection-string  Print the ODBC connection string
//!
//! Options:
//!   --config <PATH>    TOML config file [env: DBCONNECTOR_CONFIG]
//!   --file <PATH>      Attribute document [env: DBCONNECTOR_FILE]
//!   --user <ID>        User identity to activate [env: DBCONNECTOR_USER]
//!   --policy <POLICY>  defaults | stored | auto
//! ```
//!
//! Command-line options take precedence over the config file.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use dbconnector::infrastructure::storage::config::{load_config, load_config_from, AppConfig};
use dbconnector::{ConnectionAttributes, DbConnection};
use dbconnector_core::{InitPolicy, SettingName};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Per-user connection settings for DBConnectorPro.
#[derive(Debug, Parser)]
#[command(name = "dbconnector", version, about)]
struct Cli {
    /// TOML config file (defaults to the platform config directory).
    #[arg(long, env = "DBCONNECTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Attribute document path.
    #[arg(long, env = "DBCONNECTOR_FILE")]
    file: Option<PathBuf>,

    /// User identity to activate.
    #[arg(long, env = "DBCONNECTOR_USER")]
    user: Option<String>,

    /// How the effective settings are seeded.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every effective setting and the connection string.
    Show,
    /// Print one effective setting.
    Get { name: String },
    /// Change one setting for the active user.
    Set { name: String, value: String },
    /// Reset the active user's settings to the defaults.
    Reset,
    /// Print the ODBC connection string.
    ConnectionString,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Defaults,
    Stored,
    Auto,
}

impl From<PolicyArg> for InitPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Defaults => InitPolicy::ForceDefaults,
            PolicyArg::Stored => InitPolicy::ForceStored,
            PolicyArg::Auto => InitPolicy::AutoMerge,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => load_config().context("loading config")?,
    };

    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    run(cli, config)
}

fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let path = cli.file.unwrap_or(config.store.path);
    let policy = cli.policy.map(InitPolicy::from).unwrap_or(config.session.policy);
    debug!(path = %path.display(), ?policy, "opening attribute store");

    let mut connection = DbConnection::open(&path, policy, config.session.initial_values)
        .with_context(|| format!("opening attribute document {}", path.display()))?;

    if let Some(user) = cli.user.or(config.session.user) {
        connection
            .set_user(user.as_str())
            .with_context(|| format!("activating user {user:?}"))?;
        info!(%user, "user activated");
    }

    match cli.command {
        Command::Show => {
            if let Some(user) = connection.resolver().active_identity() {
                println!("user: {user}");
            }
            for name in SettingName::ALL {
                println!("{name} = {}", connection.resolver().value(name));
            }
            println!("connection string: {}", connection.connection_string());
        }
        Command::Get { name } => match connection.resolver().get(&name) {
            Some(value) => println!("{value}"),
            None => bail!("unknown setting {name:?}"),
        },
        Command::Set { name, value } => {
            let name: SettingName = name.parse()?;
            connection
                .set_setting(name, value)
                .with_context(|| format!("setting {name}"))?;
            println!("{name} = {}", connection.resolver().value(name));
        }
        Command::Reset => {
            connection
                .reset_to_defaults()
                .context("resetting settings to defaults")?;
            println!("settings reset to defaults");
        }
        Command::ConnectionString => println!("{}", connection.connection_string()),
    }
    Ok(())
}
