//! Configuration types, defaults, loading, and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::normalize_phone;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Studio identity shown in the wizard and used for the hand-off
    #[serde(default)]
    pub studio: StudioConfig,

    /// WhatsApp deep link configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Admin gate configuration
    #[serde(default)]
    pub admin: AdminConfig,
}

/// Studio identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Studio display name (wizard header)
    #[serde(default = "default_studio_name")]
    pub name: String,

    /// Destination phone for quote hand-offs, digits only with country code
    #[serde(default = "default_phone_number")]
    pub phone_number: String,

    /// Instagram handle shown on the public side
    #[serde(default = "default_instagram")]
    pub instagram_handle: String,

    /// Studio location copy
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_studio_name() -> String {
    "Max Tattoo".to_string()
}

fn default_phone_number() -> String {
    "558193735982".to_string()
}

fn default_instagram() -> String {
    "@max_tatt00".to_string()
}

fn default_location() -> String {
    "Recife, PE".to_string()
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            name: default_studio_name(),
            phone_number: default_phone_number(),
            instagram_handle: default_instagram(),
            location: default_location(),
        }
    }
}

/// WhatsApp deep link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Click-to-chat base URL (default: "https://wa.me")
    #[serde(default = "default_wa_base_url")]
    pub base_url: String,

    /// Open the link with the platform opener. When false the link is
    /// printed instead (headless terminals, tests).
    #[serde(default = "default_true")]
    pub open_links: bool,
}

fn default_wa_base_url() -> String {
    "https://wa.me".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_wa_base_url(),
            open_links: true,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path (default: "~/.inkbook/inkbook.db")
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "~/.inkbook/inkbook.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Admin gate configuration.
/// The PIN itself is never stored — only its SHA-256 digest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Hex-encoded SHA-256 digest of the admin PIN. None = admin locked out
    /// until `inkbook init --pin` is run.
    #[serde(default)]
    pub pin_sha256: Option<String>,
}

/// Home directory for config, catalog, database, and logs.
pub fn inkbook_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".inkbook")
}

/// Expand a leading `~` to the home directory (TOML doesn't expand it).
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest).to_string_lossy().to_string();
    }
    path.to_string()
}

impl Config {
    /// Default config file path.
    pub fn config_path() -> PathBuf {
        inkbook_home().join("config.toml")
    }

    /// Load configuration: defaults, then the config file if present, then
    /// environment variable overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an explicit config file path (the `--config` flag).
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        let config_path = path.map(PathBuf::from).unwrap_or_else(Self::config_path);
        if config_path.exists() {
            tracing::debug!("Loading config from: {:?}", config_path);
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            config = toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?;
        }

        config = Self::apply_env_overrides(config);

        // Expand tilde in database path (TOML doesn't expand ~)
        config.database.path = expand_tilde(&config.database.path);

        // Destination must be digits-only for the wa.me link
        config.studio.phone_number = normalize_phone(&config.studio.phone_number);

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(mut config: Self) -> Self {
        if let Ok(phone) = std::env::var("INKBOOK_PHONE")
            && !phone.is_empty()
        {
            config.studio.phone_number = phone;
        }
        if let Ok(db_path) = std::env::var("INKBOOK_DB_PATH")
            && !db_path.is_empty()
        {
            config.database.path = db_path;
        }
        if let Ok(base) = std::env::var("INKBOOK_WA_BASE_URL")
            && !base.is_empty()
        {
            config.whatsapp.base_url = base;
        }
        config
    }

    /// Write the configuration as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
