//! PostJoin - concurrent fetch-and-join for posts, users and comments
//!
//! A CLI that fetches related collections from a JSONPlaceholder-style API,
//! joins them in memory and prints the joined records.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (transport, missing author, config, etc.)
//!   3 - Requested post does not exist
//!   130 - Interrupted

mod aggregator;
mod avatar;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod source;

use aggregator::PostAggregator;
use anyhow::{bail, Context, Result};
use avatar::{AvatarConfig, GravatarUrlGenerator};
use chrono::Utc;
use cli::{Args, Command, OutputFormat};
use config::{Config, DEFAULT_CONFIG_FILE};
use error::AggregateError;
use indicatif::{ProgressBar, ProgressStyle};
use report::{Report, ReportData, ReportMetadata};
use source::{DataSource, HttpDataSource, SourceConfig};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const EXIT_NOT_FOUND: i32 = 3;
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("PostJoin v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Aggregation failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

/// Handle --init-config: generate a default .postjoin.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize the API URL, timeout, avatars and output format.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) -> Result<()> {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Map a failure to the process exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AggregateError>() {
        Some(agg) if agg.is_not_found() => EXIT_NOT_FOUND,
        _ if err.downcast_ref::<Interrupted>().is_some() => EXIT_INTERRUPTED,
        _ => 1,
    }
}

/// Raised when Ctrl-C cancels an aggregation in flight.
#[derive(Debug, thiserror::Error)]
#[error("Interrupted before the aggregation finished")]
struct Interrupted;

/// Run one aggregation and emit its report.
async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let Some(command) = args.command.clone() else {
        bail!("No command given");
    };

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let source = HttpDataSource::new(SourceConfig::from(&config.source))?;
    let avatars = GravatarUrlGenerator::new(AvatarConfig::from(&config.avatar));
    let aggregator = PostAggregator::new(source, avatars);

    info!("Using source: {}", aggregator.source().base_url());

    let spinner = (!args.quiet).then(|| start_spinner(&command));

    // Dropping the aggregation future on Ctrl-C cancels both outstanding fetches.
    let outcome = tokio::select! {
        result = aggregate(&aggregator, &command) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, cancelling outstanding fetches");
            Err(anyhow::Error::new(Interrupted))
        }
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let data = outcome?;

    let report = Report::new(
        ReportMetadata {
            source_url: aggregator.source().base_url().to_string(),
            fetched_at: Utc::now(),
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        data,
    );
    info!("Report contains {} post(s)", report.record_count());

    let output = match config.output.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to: {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Dispatch the requested aggregation.
async fn aggregate<S>(
    aggregator: &PostAggregator<S, GravatarUrlGenerator>,
    command: &Command,
) -> Result<ReportData>
where
    S: DataSource,
{
    let data = match *command {
        Command::Overviews => ReportData::Overviews(aggregator.get_overviews().await?),
        Command::Detail { id } => ReportData::Detail(aggregator.get_detail(id).await?),
    };

    Ok(data)
}

/// Show a spinner on stderr while fetches are in flight.
fn start_spinner(command: &Command) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();

    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }

    spinner.set_message(match command {
        Command::Overviews => "Fetching posts and users...".to_string(),
        Command::Detail { id } => format!("Fetching post {} and comments...", id),
    });
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
