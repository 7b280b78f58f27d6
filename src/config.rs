//! Run configuration: data directories and warehouse connection settings.
//!
//! Settings come from, in order of precedence:
//!
//! 1. environment overrides (`HERITAGE_RAW_DIR`, `HERITAGE_PROCESSED_DIR`)
//! 2. an explicit `--config` file, or the platform config file
//!    (`~/.config/heritage-etl/config.json` on Linux) when it exists
//! 3. built-in defaults
//!
//! The config file is JSON; every field is optional:
//!
//! ```json
//! {
//!   "raw_dir": "data/raw",
//!   "processed_dir": "data/processed",
//!   "warehouse": { "host": "localhost", "port": 5432, "user": "etl",
//!                  "password": "secret", "database": "heritage", "schema": "public" }
//! }
//! ```

use crate::error::{EtlError, Result, ResultExt as _};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RAW_DIR_ENV: &str = "HERITAGE_RAW_DIR";
pub const PROCESSED_DIR_ENV: &str = "HERITAGE_PROCESSED_DIR";

const APP_DIR: &str = "heritage-etl";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    /// Where raw exports are discovered.
    pub raw_dir: PathBuf,
    /// Where processed files are written.
    pub processed_dir: PathBuf,
    pub warehouse: WarehouseSettings,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            processed_dir: PathBuf::from("data/processed"),
            warehouse: WarehouseSettings::default(),
        }
    }
}

impl EtlConfig {
    /// Load configuration from `explicit`, else the platform config file,
    /// else defaults, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// [`EtlError::Config`] if `explicit` does not exist, or if the chosen
    /// file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(EtlError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply directory overrides; `lookup` returns the value of a variable.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(RAW_DIR_ENV).filter(|v| !v.is_empty()) {
            self.raw_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(PROCESSED_DIR_ENV).filter(|v| !v.is_empty()) {
            self.processed_dir = PathBuf::from(dir);
        }
    }
}

/// `<config_dir>/heritage-etl/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(
        serialize_with = "serialize_password",
        deserialize_with = "deserialize_password"
    )]
    pub password: SecretString,
    pub database: String,
    /// Schema the dataset tables live in.
    pub schema: String,
}

impl Default for WarehouseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            user: "postgres".to_owned(),
            password: SecretString::new(String::new().into()),
            database: "postgres".to_owned(),
            schema: "public".to_owned(),
        }
    }
}

impl WarehouseSettings {
    pub fn connection_string(&self) -> String {
        let password = self.password.expose_secret();
        let credentials = if password.is_empty() {
            self.user.clone()
        } else {
            format!("{}:{password}", self.user)
        };
        format!(
            "postgres://{credentials}@{}:{}/{}",
            self.host, self.port, self.database
        )
    }
}

/// Passwords are never written back out.
fn serialize_password<S>(
    _password: &SecretString,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("")
}

fn deserialize_password<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s.into()))
}
