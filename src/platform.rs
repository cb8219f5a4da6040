//! State directory resolution.
//!
//! Sync runs record their outcome in a small JSON ledger. The directory is
//! picked from a fallback chain so the CLI still works in CI containers
//! without a writable home.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "troupe";

/// Resolve the state directory.
///
/// 1. Explicit override from config
/// 2. `~/.troupe/state`
/// 3. Platform data dir (`~/.local/share/troupe` on Linux)
/// 4. `./.troupe` as a last resort
pub fn get_state_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        ensure_writable(dir)?;
        return Ok(dir.to_path_buf());
    }

    let candidates = [
        home::home_dir().map(|h| h.join(format!(".{}", APP_DIR)).join("state")),
        dirs::data_local_dir().map(|d| d.join(APP_DIR)),
    ];

    for dir in candidates.into_iter().flatten() {
        match ensure_writable(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) => tracing::warn!("{:#}; trying next state location", e),
        }
    }

    let dir = PathBuf::from(format!(".{}", APP_DIR));
    ensure_writable(&dir).context(
        "Cannot create state directory in any location. \
         Check file permissions or set state.state_dir_override in config.",
    )?;
    Ok(dir)
}

/// Create `dir` if needed and prove it accepts writes.
pub fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let probe = dir.join(".write_test");
    fs::write(&probe, b"ok")
        .with_context(|| format!("Directory {} is not writable", dir.display()))?;
    let _ = fs::remove_file(&probe);

    Ok(())
}

/// Lock file and ledger paths inside the state directory.
pub fn state_paths(state_dir_override: Option<&Path>) -> Result<(PathBuf, PathBuf)> {
    let dir = get_state_dir(state_dir_override)?;
    Ok((dir.join("sync.lock"), dir.join("sync-state.json")))
}
