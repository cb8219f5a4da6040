use crate::sync::SyncReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Ledger of the last run of each batch job.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct State {
    pub version: String,
    #[serde(default)]
    pub sync_videos: Option<RunRecord>,
    #[serde(default)]
    pub normalize: Option<RunRecord>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            sync_videos: None,
            normalize: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunRecord {
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub report: SyncReport,
}

impl RunRecord {
    pub fn now(report: SyncReport, dry_run: bool) -> Self {
        Self {
            finished_at: Utc::now(),
            dry_run,
            report,
        }
    }
}

impl State {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read state file")?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).context("Failed to parse state JSON")
    }

    /// Write via a temp file and rename so a crash never leaves half a ledger.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize state")?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

/// Run `f` holding an exclusive lock, saving the state only if `f` succeeds.
///
/// Two batch jobs against the same dataset must not interleave patches, so
/// the lock is held for the whole job rather than just the state write.
pub fn with_state_lock<F, R>(lock_path: &Path, state_path: &Path, f: F) -> Result<R>
where
    F: FnOnce(&mut State) -> Result<R>,
{
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(lock_path)
        .context("Failed to open lock file")?;

    file.try_lock_exclusive()
        .context("Another sync is already running (lock held)")?;

    let mut state = State::load(state_path)?;
    let result = f(&mut state);

    if result.is_ok() {
        state.save(state_path)?;
    }

    file.unlock().context("Failed to unlock")?;

    result
}
