// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;

use reibun::annotation::{RubyDisplay, TextChunk, parse_annotated, render_line, to_speech_markup, wrap_speak};
use reibun::app_config::{Config, GenerationProvider, LogLevel, ProviderConfig};
use reibun::app_controller::Controller;

/// CLI Wrapper for GenerationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenerationProvider {
    Gemini,
    Ollama,
}

impl From<CliGenerationProvider> for GenerationProvider {
    fn from(cli_provider: CliGenerationProvider) -> Self {
        match cli_provider {
            CliGenerationProvider::Gemini => GenerationProvider::Gemini,
            CliGenerationProvider::Ollama => GenerationProvider::Ollama,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for RubyDisplay to implement ValueEnum
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum CliRubyDisplay {
    /// Reading in parentheses after the kanji
    #[default]
    Inline,
    /// HTML ruby tags
    Html,
    /// No readings
    Hidden,
}

impl From<CliRubyDisplay> for RubyDisplay {
    fn from(cli_display: CliRubyDisplay) -> Self {
        match cli_display {
            CliRubyDisplay::Inline => RubyDisplay::Inline,
            CliRubyDisplay::Html => RubyDisplay::Html,
            CliRubyDisplay::Hidden => RubyDisplay::Hidden,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a narrated dialogue for a kanji reading (default command)
    Generate(GenerateArgs),

    /// Parse annotated lines without calling any service
    Parse(ParseArgs),

    /// Generate shell completions for reibun
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Kanji to exercise instead of a random one
    #[arg(short, long)]
    kanji: Option<String>,

    /// Reading of the kanji to exercise
    #[arg(short, long, requires = "kanji")]
    reading: Option<String>,

    /// How readings are shown in the printed dialogue
    #[arg(long, value_enum, default_value_t)]
    ruby: CliRubyDisplay,

    /// Directory receiving the generated audio
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Text generation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliGenerationProvider>,

    /// Model name to use for generation
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Annotated lines; read from stdin when omitted
    #[arg(value_name = "LINE")]
    lines: Vec<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// How readings are shown
    #[arg(long, value_enum, default_value_t)]
    ruby: CliRubyDisplay,
}

/// reibun - example dialogues for kanji readings
/// 
/// Picks a kanji reading, asks an AI model for a short dialogue using it,
/// and narrates every line with furigana-aware speech synthesis.
#[derive(Parser, Debug)]
#[command(name = "reibun")]
#[command(version = "0.1.0")]
#[command(about = "Narrated example dialogues for kanji readings")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "reibun picks a kanji reading, asks an AI model for a four-line Japanese dialogue that uses it, and narrates every line with Amazon Polly.

EXAMPLES:
    reibun                                      # Random kanji reading, default config
    reibun -k 箱 -r はこ                         # Exercise a specific reading
    reibun --ruby hidden                        # Print the dialogue without readings
    reibun -p ollama -m llama3.1                # Use a local model
    reibun parse '<ruby>箱<rt>はこ</rt></ruby>' # Parse annotated text offline
    reibun completions bash > reibun.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. API keys may also be supplied with the
    GEMINI_API_KEY, AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY variables.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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

    // @returns: ANSI color for log level
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
            let _ = writeln!(
                std::io::stderr(),
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
    // Max level is lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();
    if let Some(level) = &cli.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "reibun", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Parse(args)) => run_parse(args),
        Some(Commands::Generate(args)) => run_generate(args, cli.config_path, cli.log_level).await,
        None => run_generate(cli.generate, cli.config_path, cli.log_level).await,
    }
}

async fn run_generate(args: GenerateArgs, config_path: PathBuf, log_level: Option<CliLogLevel>) -> Result<()> {
    let mut config = Config::load_or_create(&config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = args.provider {
        config.generation.provider = provider.into();
    }

    if let Some(model) = args.model {
        let provider = config.generation.provider.clone();
        let provider_str = provider.to_lowercase_string();
        match config.generation.available_providers.iter_mut().find(|p| p.provider_type == provider_str) {
            Some(provider_config) => provider_config.model = model,
            None => {
                let mut provider_config = ProviderConfig::new(provider);
                provider_config.model = model;
                config.generation.available_providers.push(provider_config);
            }
        }
    }

    if let Some(output_dir) = args.output_dir {
        config.output_dir = Some(output_dir);
    }

    match log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config.validate()
        .context("Configuration validation failed")?;
    debug!("Configuration loaded from {:?}", config_path);

    let controller = Controller::with_config(config)?;
    let target = controller.select_target(args.kanji.as_deref(), args.reading.as_deref())?;
    let output_root = controller.config().resolved_output_dir();

    let saved = controller.run(&target, args.ruby.into(), &output_root).await?;
    println!("\nPlaylist: {}", saved.playlist.display());
    Ok(())
}

#[derive(Serialize)]
struct ParsedLine {
    line: String,
    chunks: Vec<TextChunk>,
    speech_markup: String,
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let lines = if args.lines.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read annotated lines from stdin")?;
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    } else {
        args.lines
    };

    let parsed: Vec<ParsedLine> = lines
        .into_iter()
        .map(|line| ParsedLine {
            chunks: parse_annotated(&line),
            speech_markup: wrap_speak(&to_speech_markup(&line)),
            line,
        })
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&parsed)
            .context("Failed to serialize parsed lines")?;
        println!("{}", json);
        return Ok(());
    }

    let display = RubyDisplay::from(args.ruby);
    for entry in &parsed {
        println!("{}", render_line(&entry.chunks, display));
        for chunk in &entry.chunks {
            match &chunk.pronunciation {
                Some(reading) => println!("  [{}/{}]", chunk.text, reading),
                None => println!("  [{}]", chunk.text),
            }
        }
        println!("  {}", entry.speech_markup);
    }
    Ok(())
}
