use crate::config::{Config, config_path, save_to_path};
use anyhow::{Context, Result};
use serde_json::Value;

const SECRET_KEYS: [&str; 4] = ["token", "api_key", "secret", "password"];

/// Replace secret values so `config list` is safe to paste into an issue
fn redact(value: &mut Value) {
    if let Value::Object(map) = value {
        for (key, v) in map.iter_mut() {
            if SECRET_KEYS.contains(&key.as_str()) && !v.is_null() {
                *v = Value::String("********".to_string());
            } else {
                redact(v);
            }
        }
    }
}

fn redacted(config: &Config) -> Result<Value> {
    let mut value = serde_json::to_value(config).context("Failed to serialize config")?;
    redact(&mut value);
    Ok(value)
}

// TOML has no null
fn strip_nulls(value: &mut Value) {
    if let Value::Object(map) = value {
        map.retain(|_, v| !v.is_null());
        map.values_mut().for_each(strip_nulls);
    }
}

pub fn list(config: &Config) -> Result<()> {
    let mut value = redacted(config)?;
    strip_nulls(&mut value);
    let toml_str = toml::to_string_pretty(&value).context("Failed to render config")?;
    println!("{}", toml_str);
    Ok(())
}

/// Look up a dotted key such as "sanity.dataset"
pub fn lookup(config: &Config, key: &str) -> Result<Value> {
    let value = redacted(config)?;

    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }
    Ok(current.clone())
}

pub fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(config, key)? {
        Value::String(s) => println!("{}", s),
        v => println!("{}", v),
    }
    Ok(())
}

/// Move plain-text secrets from config.toml into the keyring
pub fn migrate_secrets(config: &Config) -> Result<()> {
    let mut config = config.clone();
    let migrated = config.migrate_credentials()?;

    if migrated.is_empty() {
        println!("No plain-text secrets found in config.");
        return Ok(());
    }

    save_to_path(&config, config_path()?)?;
    for name in migrated {
        println!("✓ Moved {} to the system keyring", name);
    }
    Ok(())
}

pub fn forget_secret(name: &str) -> Result<()> {
    crate::keyring::delete_secret(name)?;
    println!("✓ Removed {} from the system keyring", name);
    Ok(())
}
