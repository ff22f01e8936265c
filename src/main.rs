// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use std::sync::Arc;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use tokio::io::{AsyncBufReadExt, BufReader};

use dualsub::app_config::{self, Config};
use dualsub::app_controller::{render_view, Controller, SubtitleView};
use dualsub::captions;
use dualsub::errors::AppError;
use dualsub::player::{self, PlayerConfig, ReadySignal, TerminalPlayer};
use dualsub::providers::CaptionSource;
use dualsub::providers::caption_service::CaptionService;
use dualsub::alignment;

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
    /// Load and print the merged subtitles of a video
    Show {
        /// Video ID, watch URL or short link
        #[arg(value_name = "INPUT")]
        input: String,

        /// Print the merged lines as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge two local caption files without contacting the caption service
    Align {
        /// JSON file with the primary-language segments
        #[arg(long, value_name = "FILE")]
        primary: PathBuf,

        /// JSON file with the secondary-language segments
        #[arg(long, value_name = "FILE")]
        secondary: Option<PathBuf>,

        /// Print the merged lines as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read video references from stdin, one per line; newer lines supersede older ones
    Watch,

    /// Generate shell completions for dualsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// dualsub - dual-language subtitles for online videos
///
/// Fetches the primary- and secondary-language caption tracks of a video
/// and prints them merged into one timeline.
#[derive(Parser, Debug)]
#[command(name = "dualsub")]
#[command(version)]
#[command(about = "Dual-language subtitle viewer")]
#[command(long_about = "dualsub fetches two caption tracks of a video and shows them as one timeline.

EXAMPLES:
    dualsub show dQw4w9WgXcQ                              # Bare video ID
    dualsub show https://youtu.be/dQw4w9WgXcQ             # Short link
    dualsub show --json 'https://www.youtube.com/watch?v=dQw4w9WgXcQ'
    dualsub -p ko -s en show dQw4w9WgXcQ                  # Korean with English
    dualsub align --primary ja.json --secondary en.json   # Offline merge
    dualsub watch < ids.txt                               # Last request wins
    dualsub completions bash > dualsub.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Primary language code (e.g., 'ja', 'ko', 'es')
    #[arg(short, long, global = true)]
    primary_language: Option<String>,

    /// Secondary language code (e.g., 'en')
    #[arg(short, long, global = true)]
    secondary_language: Option<String>,

    /// Caption service base URL
    #[arg(short, long, global = true, env = "DUALSUB_CAPTION_SERVICE_URL")]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
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
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "dualsub", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli)?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    match cli.command {
        Commands::Show { input, json } => run_show(config, &input, json).await,
        Commands::Align { primary, secondary, json } => run_align(&config, primary, secondary, json),
        Commands::Watch => run_watch(config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    // Override config with CLI options if provided
    if let Some(primary) = &cli.primary_language {
        config.primary_language = primary.clone();
    }

    if let Some(secondary) = &cli.secondary_language {
        config.secondary_language = secondary.clone();
    }

    if let Some(endpoint) = &cli.endpoint {
        config.caption_service.endpoint = endpoint.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn build_controller(config: Config) -> Result<Controller> {
    let (primary_key, secondary_key) = config.caption_language_keys()?;
    let source = CaptionService::new(
        &config.caption_service.endpoint,
        primary_key,
        secondary_key,
        config.caption_service.timeout_secs,
    )?;

    let source: Arc<dyn CaptionSource> = Arc::new(source);
    Ok(Controller::with_config(config, source))
}

fn print_view(config: &Config, view: &SubtitleView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        println!("{}", render_view(config, view));
    }
    Ok(())
}

fn report(error: &AppError) {
    error!("{}", error.user_message());
    debug!("{:?}", error);
}

async fn run_show(config: Config, input: &str, json: bool) -> Result<()> {
    let show_player = config.display.show_player && !json;
    let controller = build_controller(config)?;

    let view = match controller.load(input).await {
        Ok(view) => view,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    if show_player {
        let backend = TerminalPlayer::default();
        let handle = player::acquire(
            &backend,
            "player",
            PlayerConfig::for_video(view.video_id.clone()),
            ReadySignal::ready(),
        ).await?;
        print_view(controller.config(), &view, json)?;
        player::release(&backend, handle)?;
    } else {
        print_view(controller.config(), &view, json)?;
    }

    Ok(())
}

fn run_align(config: &Config, primary: PathBuf, secondary: Option<PathBuf>, json: bool) -> Result<()> {
    let primary = captions::load_segments(&primary)?;
    let secondary = secondary
        .map(|path| captions::load_segments(&path))
        .transpose()?;

    let lines = alignment::align(Some(primary.as_slice()), secondary.as_deref());
    if lines.is_empty() {
        warn!("No {} subtitles in the primary file", config.primary_language_name());
        return Ok(());
    }

    let view = SubtitleView {
        video_id: String::new(),
        summary: alignment::AlignmentSummary::from_lines(&lines),
        lines,
    };

    print_view(config, &view, json)
}

async fn run_watch(config: Config) -> Result<()> {
    let controller = Arc::new(build_controller(config)?);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = Vec::new();

    info!("Reading video references from stdin");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        // Issued in stdin order, whatever order the tasks get polled in
        let token = controller.sequencer().begin();
        let controller = Arc::clone(&controller);
        tasks.push(tokio::spawn(async move {
            match controller.load_latest(token, &line).await {
                Ok(Some(view)) => {
                    if let Err(e) = print_view(controller.config(), &view, false) {
                        error!("Failed to print subtitles: {}", e);
                    }
                }
                Ok(None) => {}
                Err(e) => report(&e),
            }
        }));
    }

    for task in tasks {
        task.await.context("Request task panicked")?;
    }

    Ok(())
}
