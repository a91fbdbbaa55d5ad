use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[storage]
# Location of the SQLite file holding the contact list
# path = "/path/to/contacts.sqlite"
# Write an empty list back to storage after the last contact is removed
persist_empty = false

[encryption]
enabled = false
# Where the passphrase comes from: "keyring", "env" or "inline"
key_source = "keyring"
# passphrase = "only read when key_source = \"inline\""
# env_var = "REFERRAL_TRACKER_KEY"
"#;

pub const DEFAULT_KEY_ENV_VAR: &str = "REFERRAL_TRACKER_KEY";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TrackerConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub encryption: EncryptionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub persist_empty: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct EncryptionConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub key_source: KeySource,
    pub passphrase: Option<String>,
    pub env_var: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    #[default]
    Keyring,
    Env,
    Inline,
}

impl TrackerConfig {
    /// Loads the config file (writing a commented default on first run), then
    /// applies `REFERRAL_TRACKER__SECTION__KEY` environment overrides.
    pub fn load(path_override: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path_override
            .map(Path::to_path_buf)
            .unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(
                Environment::with_prefix("REFERRAL_TRACKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: TrackerConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn database_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(PathBuf::from(path));
        }

        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;
        Ok(data_dir.join("referral-tracker").join("contacts.sqlite"))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("referral-tracker").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
