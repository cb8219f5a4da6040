use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use troupe_content::OutputFormat;
use troupe_content::commands;
use troupe_content::config;
use troupe_content::duration::DurationConverter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "troupe")]
#[command(about = "Content maintenance for the company site: durations, video sync, forms")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, value_enum, default_value = "text", help = "Output format")]
    output: OutputFormat,

    #[arg(long, global = true, default_value = "info", help = "Log level when RUST_LOG is unset")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert between duration encodings
    Duration(DurationArgs),

    /// YouTube lookups
    Video(VideoArgs),

    /// Batch updates of CMS video documents
    Sync(SyncArgs),

    /// Subscribe an email address to the newsletter
    Subscribe {
        #[arg(help = "Email address")]
        email: String,
    },

    /// Send a contact form message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },

    /// Inspect configuration and manage secrets
    Config(ConfigArgs),
}

#[derive(Args)]
struct DurationArgs {
    #[command(subcommand)]
    action: DurationAction,
}

#[derive(Subcommand)]
enum DurationAction {
    /// Parse "3:45", "PT3M45S", "3.75" or "5 min" into seconds
    Parse { input: String },
    /// Format seconds as M:SS or H:MM:SS
    Format {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },
    /// Convert an ISO-8601 duration to clock form
    Iso { iso: String },
}

#[derive(Args)]
struct VideoArgs {
    #[command(subcommand)]
    action: VideoAction,
}

#[derive(Subcommand)]
enum VideoAction {
    /// Fetch a video's duration
    Duration {
        #[arg(help = "YouTube id or URL")]
        video: String,
    },
}

#[derive(Args)]
struct SyncArgs {
    #[command(subcommand)]
    action: SyncAction,
}

#[derive(Subcommand)]
enum SyncAction {
    /// Fill video durations from YouTube
    Videos {
        #[arg(long, help = "Preview without patching documents")]
        dry_run: bool,
        #[arg(long, help = "Refetch even when a duration is already set")]
        force: bool,
    },
    /// Rewrite stored durations into canonical clock form
    Normalize {
        #[arg(long, help = "Preview without patching documents")]
        dry_run: bool,
    },
    /// Show the last run of each job
    Status,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
    /// Move plain-text secrets into the system keyring
    MigrateSecrets,
    /// Delete a secret (e.g. sanity.token) from the system keyring
    ForgetSecret { name: String },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = config::load().unwrap_or_else(|e| {
        tracing::warn!("Using default config: {:#}", e);
        config::Config::default()
    });
    let output = cli.output;

    match &cli.command {
        Commands::Duration(args) => {
            let converter = DurationConverter::for_environment(config.environment);
            match &args.action {
                DurationAction::Parse { input } => {
                    commands::duration::parse(&converter, input, output)?
                }
                DurationAction::Format { seconds } => {
                    commands::duration::format(&converter, *seconds, output)?
                }
                DurationAction::Iso { iso } => commands::duration::iso(&converter, iso, output)?,
            }
        }
        Commands::Video(args) => match &args.action {
            VideoAction::Duration { video } => commands::video::duration(&config, video, output)?,
        },
        Commands::Sync(args) => match &args.action {
            SyncAction::Videos { dry_run, force } => {
                commands::sync::videos(&config, *dry_run, *force, output)?;
            }
            SyncAction::Normalize { dry_run } => {
                commands::sync::normalize(&config, *dry_run, output)?;
            }
            SyncAction::Status => commands::sync::status(&config, output)?,
        },
        Commands::Subscribe { email } => commands::notify::subscribe(&config, email, output)?,
        Commands::Contact {
            name,
            email,
            message,
        } => commands::notify::contact(&config, name, email, message, output)?,
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
            ConfigAction::MigrateSecrets => commands::config::migrate_secrets(&config)?,
            ConfigAction::ForgetSecret { name } => commands::config::forget_secret(name)?,
        },
    }

    Ok(())
}
