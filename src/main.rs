use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Error};
use clap::{Parser, ValueEnum};
use meeting_summarizer::config::{parse_date, DATE_FORMAT};
use meeting_summarizer::{read_transcript, PageSettings, Summarizer, SummarizerConfig, Transcript};
use tracing_subscriber::{fmt, EnvFilter};

// $ cargo run -- --input ./sync.pdf --theme Budget --theme "Key Decisions"

#[derive(Parser)]
#[command(name = "meeting_summarizer")]
#[command(version)]
#[command(about = "Summarize a meeting transcript by theme", long_about = None)]
struct Cli {
    /// Transcript to summarize (.txt or .pdf). Defaults to the built-in demo sync
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML config with themes and heading
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme to extract; repeat for several. Replaces the configured themes
    #[arg(short, long = "theme")]
    themes: Vec<String>,

    /// Heading title
    #[arg(long)]
    title: Option<String>,

    /// Meeting date for the heading (YYYY-MM-DD)
    #[arg(long, value_parser = parse_heading_date, conflicts_with = "today")]
    date: Option<String>,

    /// Use today's local date in the heading
    #[arg(long)]
    today: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Write the summary here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// PDF only: ignore text left of this x coordinate (line numbers)
    #[arg(long, default_value = "0")]
    margin_left: f32,

    /// PDF only: ignore text at or below this y coordinate (page numbers)
    #[arg(long, default_value = "0")]
    bottom_cutoff: f32,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

fn parse_heading_date(raw: &str) -> Result<String, String> {
    parse_date(raw)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|e| e.to_string())
}

fn init_logging(verbose: u8, quiet: bool, to_stderr: bool) {
    let filter = match (quiet, verbose) {
        (true, _) => EnvFilter::new("warn"),
        (false, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    // stdout is reserved for the document when it is JSON
    if to_stderr {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.with_writer(std::io::stdout).init();
    }
}

fn build_config(cli: &Cli) -> Result<SummarizerConfig, Error> {
    let mut config = match &cli.config {
        Some(path) => SummarizerConfig::load(path)
            .with_context(|| format!("Unable to load config {}", path.display()))?,
        None => SummarizerConfig::default(),
    };

    if !cli.themes.is_empty() {
        config.themes = cli.themes.clone();
    }
    if let Some(title) = &cli.title {
        config.heading.title = title.clone();
    }
    if let Some(date) = &cli.date {
        config.heading.date = date.clone();
    } else if cli.today {
        config.heading.date = chrono::Local::now().date_naive().format(DATE_FORMAT).to_string();
    }

    Ok(config)
}

impl Cli {
    /// JSON printed to stdout must be the only thing on stdout.
    fn json_on_stdout(&self) -> bool {
        self.format == Format::Json && self.output.is_none()
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Error> {
    let config = build_config(cli)?;
    let summarizer = Summarizer::new(config).context("Invalid summarizer configuration")?;

    let transcript = match &cli.input {
        Some(path) => {
            let settings = PageSettings::new(cli.margin_left, cli.bottom_cutoff);
            read_transcript(path, &settings)
                .with_context(|| format!("Unable to read transcript {}", path.display()))?
        }
        None => Transcript::demo(),
    };

    if cli.json_on_stdout() {
        let summary = summarizer.summarize(&transcript);
        writeln!(out, "{}", summary.to_json()?)?;
        return Ok(());
    }

    writeln!(out, "--- Starting Meeting Summarizer ---\n")?;
    let summary = summarizer.summarize(&transcript);
    writeln!(out, "--- Summary Complete ---\n")?;

    let rendered = match cli.format {
        Format::Markdown => summary.into_markdown(),
        Format::Json => summary.to_json()?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Unable to write summary to {}", path.display()))?;
            writeln!(out, "Summary written to {}", path.display())?;
        }
        None => {
            writeln!(out, "Final Generated Summary:")?;
            writeln!(out, "-------------------------")?;
            writeln!(out, "{rendered}")?;
        }
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.json_on_stdout());
    run(&cli, &mut std::io::stdout().lock())
}
