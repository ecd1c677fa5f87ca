// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tubetrans::app_config::{self, Config, ExecutionMode};
use tubetrans::app_controller::Controller;
use tubetrans::server;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a transcript and print it with its detected language and suggested terms
    Fetch {
        /// YouTube URL or video id
        #[arg(value_name = "VIDEO")]
        video: String,
    },

    /// Fetch a transcript and translate it
    Translate(TranslateArgs),

    /// Run the HTTP API
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate shell completions for tubetrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// YouTube URL or video id
    #[arg(value_name = "VIDEO")]
    video: String,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Source language code, or 'auto'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Term to keep untranslated (repeatable)
    #[arg(short = 'p', long = "preserve")]
    preserve_terms: Vec<String>,

    /// Translate one chunk at a time
    #[arg(long)]
    sequential: bool,

    /// Maximum characters per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Write the translation to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// tubetrans - YouTube transcript translation
///
/// Fetches YouTube captions and translates them through a
/// LibreTranslate-compatible endpoint, keeping chosen terms untranslated.
#[derive(Parser, Debug)]
#[command(name = "tubetrans")]
#[command(version)]
#[command(about = "Translate YouTube transcripts with LibreTranslate")]
#[command(long_about = "tubetrans fetches YouTube transcripts and translates them in chunks through a LibreTranslate-compatible endpoint.

EXAMPLES:
    tubetrans fetch https://youtu.be/dQw4w9WgXcQ
    tubetrans translate dQw4w9WgXcQ -t fr -p \"Acme Corp\"
    tubetrans translate dQw4w9WgXcQ -t de --sequential -o out.txt
    tubetrans serve --port 5001
    tubetrans completions bash > tubetrans.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "tubetrans", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Fetch { video } => run_fetch(config, &video).await,
        Commands::Translate(args) => run_translate(config, args).await,
        Commands::Serve { host, port } => run_serve(config, host, port).await,
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_fetch(config: Config, video: &str) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let fetched = controller.fetch_transcript(video).await?;

    println!("Video: {}", fetched.video_id);
    println!("Source language: {}", fetched.source_lang);
    println!("Suggested terms: {}", fetched.suggested_terms.join(", "));
    println!();
    println!("{}", fetched.transcript);

    Ok(())
}

async fn run_translate(mut config: Config, args: TranslateArgs) -> Result<()> {
    if let Some(source) = args.source_language {
        config.translation.source_language = source;
    }
    if let Some(target) = args.target_language {
        config.translation.target_language = target;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.translation.chunk_size = chunk_size;
    }
    if args.sequential {
        config.translation.execution_mode = ExecutionMode::Sequential;
    }

    let target_language = config.translation.target_language.clone();
    let source_language = config.translation.source_language.clone();
    let controller = Controller::with_config(config)?;
    controller.check_translation_endpoint().await;

    let transcript = controller.load_transcript(&args.video).await?;
    info!(
        "Translating {} ({} chars) to '{}'",
        transcript.video_id,
        transcript.text.chars().count(),
        target_language
    );

    let progress_bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg} {eta}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("=>-"));
    progress_bar.set_message("Translating");

    let pb = progress_bar.clone();
    let outcome = controller
        .translate_transcript_with_progress(
            &transcript.text,
            &source_language,
            &target_language,
            &args.preserve_terms,
            move |completed, total| {
                pb.set_length(total as u64);
                pb.set_position(completed as u64);
            },
        )
        .await?;
    progress_bar.finish_and_clear();

    info!(
        "Translated {} chunks in {:.2}s ({} kept original text)",
        outcome.chunks, outcome.processing_time, outcome.fallback_chunks
    );

    match args.output {
        Some(path) => {
            std::fs::write(&path, &outcome.translated)
                .context(format!("Failed to write translation to {}", path.display()))?;
            info!("Success: {}", path.display());
        }
        None => println!("{}", outcome.translated),
    }

    Ok(())
}

async fn run_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let controller = Arc::new(Controller::with_config(config)?);
    server::serve(controller).await
}
