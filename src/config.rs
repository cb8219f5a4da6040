use crate::error::ConfigError;
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment as EnvSource, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::path::PathBuf;

const CONFIG_DIR: &str = ".troupe";
const ENV_PREFIX: &str = "TROUPE";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub sanity: SanityConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub mailchimp: MailchimpConfig,
    #[serde(default)]
    pub resend: ResendConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Write token; the keyring takes precedence when present
    pub token: Option<String>,
    /// Document types carrying a `duration` field
    #[serde(default = "default_video_types")]
    pub video_types: Vec<String>,
    /// Optional API URL override for testing (e.g. mocking)
    pub api_url: Option<String>,
}

fn default_video_types() -> Vec<String> {
    vec!["video".to_string()]
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            token: None,
            video_types: default_video_types(),
            api_url: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct YouTubeConfig {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MailchimpConfig {
    pub api_key: Option<String>,
    /// Data center prefix, e.g. "us21"
    #[serde(default)]
    pub server_prefix: String,
    #[serde(default)]
    pub list_id: String,
    pub api_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ResendConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub api_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SyncConfig {
    /// Pause between document patches
    pub delay_ms: u64,
    pub max_retries: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            delay_ms: 200,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StateConfig {
    /// Optional override for state directory (for testing)
    pub state_dir_override: Option<PathBuf>,
}

impl SanityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_id.is_empty() {
            return Ok(()); // Not configured yet
        }

        let dataset_ok = !self.dataset.is_empty()
            && self.dataset.len() <= 64
            && self
                .dataset
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !dataset_ok {
            return Err(ConfigError::Invalid(format!(
                "sanity.dataset '{}' must be lowercase letters, digits, '_' or '-'",
                self.dataset
            )));
        }

        if self.video_types.is_empty() {
            return Err(ConfigError::Invalid(
                "sanity.video_types must name at least one document type".to_string(),
            ));
        }

        if !is_api_version(&self.api_version) {
            return Err(ConfigError::Invalid(format!(
                "sanity.api_version '{}' must be '1' or a YYYY-MM-DD date",
                self.api_version
            )));
        }

        Ok(())
    }
}

fn is_api_version(v: &str) -> bool {
    v == "1" || chrono::NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok()
}

impl ResendConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [("resend.from", &self.from), ("resend.to", &self.to)] {
            if !value.is_empty() && !crate::notify::is_valid_email(bare_address(value)) {
                return Err(ConfigError::Invalid(format!(
                    "{} '{}' is not an email address",
                    key, value
                )));
            }
        }
        Ok(())
    }
}

// "Studio <hello@example.com>" -> "hello@example.com"
fn bare_address(value: &str) -> &str {
    match (value.find('<'), value.rfind('>')) {
        (Some(start), Some(end)) if start < end => &value[start + 1..end],
        _ => value.trim(),
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries > 10 {
            return Err(ConfigError::Invalid(format!(
                "sync.max_retries {} is too high (max 10)",
                self.max_retries
            )));
        }
        if self.delay_ms == 0 {
            tracing::warn!("sync.delay_ms is 0; patches will not be rate limited");
        }
        Ok(())
    }
}

impl Config {
    /// Sanity write token from keyring or config
    pub fn sanity_token(&self) -> Result<String> {
        secret("sanity.token", self.sanity.token.as_deref())
    }

    pub fn youtube_api_key(&self) -> Result<String> {
        secret("youtube.api_key", self.youtube.api_key.as_deref())
    }

    pub fn mailchimp_api_key(&self) -> Result<String> {
        secret("mailchimp.api_key", self.mailchimp.api_key.as_deref())
    }

    pub fn resend_api_key(&self) -> Result<String> {
        secret("resend.api_key", self.resend.api_key.as_deref())
    }

    /// Validate all configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sanity.validate()?;
        self.resend.validate()?;
        self.sync.validate()?;
        Ok(())
    }

    /// Move plain-text secrets into the keyring
    pub fn migrate_credentials(&mut self) -> Result<Vec<&'static str>> {
        let mut migrated = Vec::new();

        let slots: [(&'static str, &mut Option<String>); 4] = [
            ("sanity.token", &mut self.sanity.token),
            ("youtube.api_key", &mut self.youtube.api_key),
            ("mailchimp.api_key", &mut self.mailchimp.api_key),
            ("resend.api_key", &mut self.resend.api_key),
        ];

        for (name, slot) in slots {
            if let Some(value) = slot.take() {
                crate::keyring::store_secret(name, &value)
                    .with_context(|| format!("Failed to store {} in keyring", name))?;
                migrated.push(name);
            }
        }

        Ok(migrated)
    }
}

fn secret(name: &str, fallback: Option<&str>) -> Result<String> {
    // Try keyring first
    if let Ok(value) = crate::keyring::get_secret(name) {
        return Ok(value);
    }

    if let Some(value) = fallback.filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }

    anyhow::bail!(
        "{} not found. Set it in ~/{}/config.toml or {}__{}",
        name,
        CONFIG_DIR,
        ENV_PREFIX,
        name.replace('.', "__").to_uppercase()
    )
}

pub fn config_path() -> Result<PathBuf> {
    Ok(home::home_dir()
        .context("Could not find home directory")?
        .join(CONFIG_DIR)
        .join("config.toml"))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(EnvSource::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .context("Failed to build config loader")?;

    loader
        .try_deserialize()
        .context("Failed to parse config file")
}

pub fn load() -> Result<Config> {
    let config_path = config_path()?;
    let config = load_from_path(&config_path)?;
    config.validate()?;
    Ok(config)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
