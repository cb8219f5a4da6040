use crate::OutputFormat;
use crate::config::Config;
use crate::duration::DurationConverter;
use crate::platform::state_paths;
use crate::state::{RunRecord, State, with_state_lock};
use crate::sync::{SyncOptions, SyncReport, normalize_durations, sync_video_durations};
use anyhow::Result;

fn print_report(job: &str, report: &SyncReport, dry_run: bool, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let verb = if dry_run { "would update" } else { "updated" };
            println!(
                "✓ {}: {} examined, {} {}, {} skipped, {} failed",
                job, report.examined, verb, report.updated, report.skipped, report.failed
            );
        }
    }
    Ok(())
}

fn options(config: &Config, dry_run: bool, force: bool) -> SyncOptions {
    SyncOptions {
        dry_run,
        force,
        ..SyncOptions::from_config(&config.sync)
    }
}

/// Fill missing video durations from YouTube
pub fn videos(config: &Config, dry_run: bool, force: bool, output: OutputFormat) -> Result<()> {
    let store = super::sanity_client(config)?;
    let source = super::youtube_client(config)?;
    let converter = DurationConverter::for_environment(config.environment);
    let opts = options(config, dry_run, force);

    let (lock_path, state_path) = state_paths(config.state.state_dir_override.as_deref())?;
    let report = with_state_lock(&lock_path, &state_path, |state| {
        let report = sync_video_durations(&source, &store, &converter, &opts)?;
        state.sync_videos = Some(RunRecord::now(report, dry_run));
        Ok(report)
    })?;

    print_report("Video durations", &report, dry_run, output)
}

/// Rewrite stored durations into canonical clock form
pub fn normalize(config: &Config, dry_run: bool, output: OutputFormat) -> Result<()> {
    let store = super::sanity_client(config)?;
    let converter = DurationConverter::for_environment(config.environment);
    let opts = options(config, dry_run, false);

    let (lock_path, state_path) = state_paths(config.state.state_dir_override.as_deref())?;
    let report = with_state_lock(&lock_path, &state_path, |state| {
        let report = normalize_durations(&store, &converter, &opts)?;
        state.normalize = Some(RunRecord::now(report, dry_run));
        Ok(report)
    })?;

    print_report("Normalize", &report, dry_run, output)
}

/// Show the last recorded run of each job
pub fn status(config: &Config, output: OutputFormat) -> Result<()> {
    let (_, state_path) = state_paths(config.state.state_dir_override.as_deref())?;
    let state = State::load(&state_path)?;

    if let OutputFormat::Json = output {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    for (job, record) in [("sync videos", &state.sync_videos), ("normalize", &state.normalize)] {
        match record {
            Some(r) => println!(
                "{:<12} {} {}updated {}, failed {}",
                job,
                r.finished_at.format("%Y-%m-%d %H:%M"),
                if r.dry_run { "[dry-run] " } else { "" },
                r.report.updated,
                r.report.failed
            ),
            None => println!("{:<12} never run", job),
        }
    }
    Ok(())
}
