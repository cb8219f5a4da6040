//! Batch document updates against the content store.
//!
//! Both routines patch one document at a time, sleep `delay_ms` between
//! patches, and keep going when a single document fails.

pub mod retry;

use crate::cms::ContentStore;
use crate::cms::models::{VideoDocument, decode_duration};
use crate::config::SyncConfig;
use crate::duration::{DurationConverter, format_secs};
use crate::sync::retry::with_retry;
use crate::youtube::VideoMetadataSource;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::thread::sleep;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Report what would change without patching
    pub dry_run: bool,
    /// Refetch durations even for documents that already have one
    pub force: bool,
    pub delay_ms: u64,
    pub max_retries: u32,
}

impl SyncOptions {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            dry_run: false,
            force: false,
            delay_ms: config.delay_ms,
            max_retries: config.max_retries,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncReport {
    pub examined: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome for one document, folded into a `SyncReport`.
enum Step {
    Updated,
    Skipped,
    Failed,
}

impl SyncReport {
    fn record(&mut self, step: Step) {
        self.examined += 1;
        match step {
            Step::Updated => self.updated += 1,
            Step::Skipped => self.skipped += 1,
            Step::Failed => self.failed += 1,
        }
    }
}

/// Fill each video document's `duration` from the video platform.
///
/// Without `force`, documents whose stored duration decodes to a value are
/// left alone. The written value is always clock form, e.g. `PT12M36S`
/// becomes `12:36`.
pub fn sync_video_durations(
    source: &dyn VideoMetadataSource,
    store: &dyn ContentStore,
    converter: &DurationConverter,
    opts: &SyncOptions,
) -> Result<SyncReport> {
    let docs = with_retry("Query video documents", || store.query_videos(), opts.max_retries)?;
    tracing::info!("Checking {} video documents", docs.len());

    let mut report = SyncReport::default();
    for doc in &docs {
        let step = sync_one(source, store, converter, opts, doc);
        if matches!(step, Step::Updated) && !opts.dry_run {
            pause(opts.delay_ms);
        }
        report.record(step);
    }

    tracing::info!(
        "Video sync done: {} updated, {} skipped, {} failed",
        report.updated,
        report.skipped,
        report.failed
    );
    Ok(report)
}

fn sync_one(
    source: &dyn VideoMetadataSource,
    store: &dyn ContentStore,
    converter: &DurationConverter,
    opts: &SyncOptions,
    doc: &VideoDocument,
) -> Step {
    let current = decode_duration(&doc.duration);
    if current.is_some() && !opts.force {
        tracing::debug!("{} already has a duration", doc.label());
        return Step::Skipped;
    }

    let Some(video_id) = doc.youtube_id() else {
        tracing::warn!("{}: no usable YouTube id or URL", doc.label());
        return Step::Skipped;
    };

    let iso = match with_retry(
        "Video lookup",
        || source.fetch_duration(&video_id),
        opts.max_retries,
    ) {
        Ok(Some(iso)) => iso,
        Ok(None) => {
            tracing::warn!("{}: video {} not found", doc.label(), video_id);
            return Step::Skipped;
        }
        Err(e) => {
            tracing::error!("{}: {:#}", doc.label(), e);
            return Step::Failed;
        }
    };

    // Day-long and live-stream durations (`P1DT2H3M4S`, `P0D`) have no
    // clock form, and the stored value stays as it is.
    let Some(secs) = converter.try_parse(&iso) else {
        tracing::warn!("{}: cannot parse duration {:?} for video {}", doc.label(), iso, video_id);
        return Step::Skipped;
    };

    let clock = format_secs(secs);
    if current.as_deref() == Some(clock.as_str()) {
        return Step::Skipped;
    }

    apply(store, opts, doc, &clock)
}

/// Rewrite every stored duration into canonical clock form.
///
/// Values no format recognizes are skipped and logged rather than zeroed.
pub fn normalize_durations(
    store: &dyn ContentStore,
    converter: &DurationConverter,
    opts: &SyncOptions,
) -> Result<SyncReport> {
    let docs = with_retry("Query video documents", || store.query_videos(), opts.max_retries)?;
    tracing::info!("Normalizing durations on {} documents", docs.len());

    let mut report = SyncReport::default();
    for doc in &docs {
        let step = normalize_one(store, converter, opts, doc);
        if matches!(step, Step::Updated) && !opts.dry_run {
            pause(opts.delay_ms);
        }
        report.record(step);
    }

    tracing::info!(
        "Normalize done: {} updated, {} skipped, {} failed",
        report.updated,
        report.skipped,
        report.failed
    );
    Ok(report)
}

fn normalize_one(
    store: &dyn ContentStore,
    converter: &DurationConverter,
    opts: &SyncOptions,
    doc: &VideoDocument,
) -> Step {
    let Some(raw) = decode_duration(&doc.duration) else {
        return Step::Skipped;
    };

    let Some(secs) = converter.try_parse(&raw) else {
        tracing::warn!("{}: cannot parse duration {:?}", doc.label(), raw);
        return Step::Skipped;
    };

    let canonical = format_secs(secs);
    // Numbers are rewritten even when their text matches, so the field
    // ends up a string.
    if doc.duration.is_string() && canonical == raw {
        return Step::Skipped;
    }

    apply(store, opts, doc, &canonical)
}

fn apply(store: &dyn ContentStore, opts: &SyncOptions, doc: &VideoDocument, duration: &str) -> Step {
    if opts.dry_run {
        println!(
            "[DRY-RUN] Would set {} ({}) duration: {} -> {}",
            doc.label(),
            doc.id,
            doc.duration,
            duration
        );
        return Step::Updated;
    }

    match with_retry(
        "Patch duration",
        || store.patch_duration(&doc.id, duration),
        opts.max_retries,
    ) {
        Ok(()) => {
            tracing::info!("{}: duration set to {}", doc.label(), duration);
            Step::Updated
        }
        Err(e) => {
            tracing::error!("{}: {:#}", doc.label(), e);
            Step::Failed
        }
    }
}

fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        sleep(Duration::from_millis(delay_ms));
    }
}
