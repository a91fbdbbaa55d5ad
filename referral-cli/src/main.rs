use anyhow::{Context, Result};
use clap::Parser;
use referral_store::{ContactCodec, EncryptionKey, PersistPolicy, SqliteBlobStorage, Tracker};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

mod commands;
mod config;
mod keychain;

use commands::{Command, KeyAction};
use config::{EncryptionConfig, KeySource, TrackerConfig, DEFAULT_KEY_ENV_VAR};
use keychain::KeychainService;

#[derive(Parser, Debug)]
#[command(name = "referral-tracker", author, version, about = "Track referral outreach contacts", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file_path.as_deref());

    let (config, config_path) =
        TrackerConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!("Using config at {:?}", config_path);

    let command = match cli.command {
        Command::Key { action } => return run_key_action(action),
        other => other,
    };

    let db_path = config.database_path()?;
    let storage = SqliteBlobStorage::open(&db_path)
        .with_context(|| format!("Failed to open contact storage at {:?}", db_path))?;
    let codec = build_codec(&config.encryption)?;
    let policy = PersistPolicy {
        persist_empty: config.storage.persist_empty,
    };

    let mut tracker = Tracker::open(storage, codec, policy).context("Failed to load contacts")?;
    let output = commands::run(&mut tracker, command)?;
    println!("{output}");
    Ok(())
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("referral-tracker.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn resolve_passphrase(encryption: &EncryptionConfig) -> Result<String> {
    match encryption.key_source {
        KeySource::Inline => encryption
            .passphrase
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| anyhow::anyhow!("encryption.passphrase is not set in the config")),
        KeySource::Env => {
            let var = encryption
                .env_var
                .as_deref()
                .unwrap_or(DEFAULT_KEY_ENV_VAR);
            std::env::var(var).with_context(|| format!("Environment variable {var} is not set"))
        }
        KeySource::Keyring => KeychainService::get_passphrase()
            .context("Could not read passphrase from keychain (run `referral-tracker key set`)"),
    }
}

fn build_codec(encryption: &EncryptionConfig) -> Result<ContactCodec> {
    if !encryption.enabled {
        return Ok(ContactCodec::plain());
    }
    let passphrase = resolve_passphrase(encryption)?;
    Ok(ContactCodec::encrypted(EncryptionKey::from_passphrase(
        &passphrase,
    )))
}

fn run_key_action(action: KeyAction) -> Result<()> {
    match action {
        KeyAction::Set { passphrase } => {
            KeychainService::set_passphrase(&passphrase)?;
            println!("Passphrase stored in keychain");
        }
        KeyAction::Clear => {
            KeychainService::delete_passphrase()?;
            println!("Passphrase removed from keychain");
        }
    }
    Ok(())
}
