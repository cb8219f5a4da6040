//! Secrets (CMS tokens, provider API keys) kept in the OS keyring.
//!
//! Entries live under one service name and are keyed by their config path,
//! e.g. `"sanity.token"`, so `Config` can fall back to the same key in the
//! TOML file.

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE: &str = "troupe-content";

fn entry(service: &str, name: &str) -> Result<Entry> {
    Entry::new(service, name).with_context(|| format!("Failed to open keyring entry {}", name))
}

pub fn store_secret(name: &str, value: &str) -> Result<()> {
    store_in(SERVICE, name, value)
}

pub fn get_secret(name: &str) -> Result<String> {
    get_from(SERVICE, name)
}

pub fn delete_secret(name: &str) -> Result<()> {
    entry(SERVICE, name)?
        .delete_credential()
        .with_context(|| format!("Failed to delete {} from keyring", name))
}

fn store_in(service: &str, name: &str, value: &str) -> Result<()> {
    entry(service, name)?
        .set_password(value)
        .with_context(|| format!("Failed to store {} in keyring", name))
}

fn get_from(service: &str, name: &str) -> Result<String> {
    entry(service, name)?
        .get_password()
        .with_context(|| format!("No {} in keyring", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires actual keyring backend
    fn test_store_and_retrieve() {
        let service = "troupe-content-test";

        store_in(service, "sanity.token", "sk_test_123").unwrap();
        assert_eq!(get_from(service, "sanity.token").unwrap(), "sk_test_123");

        entry(service, "sanity.token")
            .unwrap()
            .delete_credential()
            .unwrap();
    }
}
