use crate::OutputFormat;
use crate::config::Config;
use crate::duration::{DurationConverter, format_secs};
use crate::youtube::{VideoMetadataSource, extract_video_id};
use anyhow::{Context, Result};

/// Look up a video's duration and print it in clock form
pub fn duration(config: &Config, id_or_url: &str, output: OutputFormat) -> Result<()> {
    let video_id = extract_video_id(id_or_url)
        .with_context(|| format!("'{}' is not a YouTube id or URL", id_or_url))?;
    let client = super::youtube_client(config)?;
    let converter = DurationConverter::for_environment(config.environment);

    let iso = client
        .fetch_duration(&video_id)?
        .with_context(|| format!("Video {} not found", video_id))?;
    let seconds = converter.parse(Some(&iso));
    let formatted = format_secs(seconds);

    match output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "video_id": video_id,
                "iso": iso,
                "seconds": seconds,
                "duration": formatted,
            }))?
        ),
        OutputFormat::Text => println!("{} {} ({})", video_id, formatted, iso),
    }

    Ok(())
}
