//! Score a saved quiz session from the command line
//!
//! Usage:
//!   score_answers <session.json> [--format markdown|json] [--country CODE] [--data-dir DIR]
//!
//! The session file uses the same shape as the HTTP API request body:
//! `{ "tier": "college", "country": "US", "selections": { "diet": 1 } }`

use anyhow::{bail, Context, Result};
use footprint_scorer::{EngineConfig, FootprintScorer, JsonFormatter, MarkdownFormatter, SessionRequest};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Markdown,
    Json,
}

struct Args {
    session_path: PathBuf,
    format: OutputFormat,
    country: Option<String>,
    data_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut session_path = None;
    let mut format = OutputFormat::Markdown;
    let mut country = None;
    let mut data_dir = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format" => {
                format = match args.next().as_deref() {
                    Some("markdown") | Some("md") => OutputFormat::Markdown,
                    Some("json") => OutputFormat::Json,
                    other => bail!("Unknown format: {:?} (expected markdown or json)", other),
                };
            }
            "--country" => {
                country = Some(args.next().context("--country needs a value")?);
            }
            "--data-dir" => {
                data_dir = Some(PathBuf::from(args.next().context("--data-dir needs a value")?));
            }
            "-h" | "--help" => {
                println!("Usage: score_answers <session.json> [--format markdown|json] [--country CODE] [--data-dir DIR]");
                std::process::exit(0);
            }
            path if session_path.is_none() => session_path = Some(PathBuf::from(path)),
            other => bail!("Unexpected argument: {}", other),
        }
    }

    Ok(Args {
        session_path: session_path.context("Missing session file argument")?,
        format,
        country,
        data_dir,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footprint_scorer=warn,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = parse_args()?;

    let config = match &args.data_dir {
        Some(dir) => EngineConfig::from_data_dir(dir),
        None => EngineConfig::builtin(),
    };
    let scorer = FootprintScorer::from_config(&config)?;

    let contents = fs::read_to_string(&args.session_path)
        .with_context(|| format!("Failed to read session file: {:?}", args.session_path))?;
    let mut request: SessionRequest = serde_json::from_str(&contents)
        .with_context(|| "Failed to parse session JSON")?;
    if args.country.is_some() {
        request.country = args.country;
    }

    let fallback = scorer.factors().fallback().code.clone();
    let result = scorer
        .score_request(request, &fallback)
        .with_context(|| format!("Invalid answers in {:?}", args.session_path))?;

    let output = match args.format {
        OutputFormat::Markdown => MarkdownFormatter::format(&result),
        OutputFormat::Json => JsonFormatter::format(&result)?,
    };
    println!("{}", output);

    Ok(())
}
