//! TICKETCHECK — lottery prize verification
//!
//! Entry point. Loads configuration, initialises structured logging,
//! decodes a recognizer payload file and prints the batch report as JSON.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::info;

use ticketcheck::config::AppConfig;
use ticketcheck::draws::StaticResults;
use ticketcheck::engine::BatchEvaluator;
use ticketcheck::normalize::decode_payload;

const USAGE: &str = "usage: ticketcheck <payload.json> [--config <path>]";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    payload_path: String,
    config_path: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Run(Args),
}

fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Command> {
    let mut payload_path = None;
    let mut config_path = DEFAULT_CONFIG_PATH.to_string();

    let mut args = argv.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = args.next().context("--config needs a path")?;
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ if payload_path.is_none() => payload_path = Some(arg.clone()),
            other => bail!("unexpected argument {other:?}\n{USAGE}"),
        }
    }

    Ok(Command::Run(Args {
        payload_path: payload_path.context(USAGE)?,
        config_path,
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let args = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Run(args) => args,
    };

    init_logging();

    let cfg = AppConfig::load_or_default(&args.config_path)?;

    info!(
        config = %args.config_path,
        max_red_tokens = cfg.engine.max_red_tokens,
        strict = cfg.engine.strict_validation,
        draws = cfg.draws.len(),
        "ticketcheck starting"
    );

    // -- Results lookup ----------------------------------------------------

    let lookup = if cfg.draws.is_empty() {
        StaticResults::with_defaults()
    } else {
        StaticResults::from_config(&cfg.draws).context("Invalid [[draws]] configuration")?
    };

    // -- Decode and evaluate ----------------------------------------------

    let text = tokio::fs::read_to_string(&args.payload_path)
        .await
        .with_context(|| format!("Failed to read payload file: {}", args.payload_path))?;
    let tickets = decode_payload(&text)
        .with_context(|| format!("Failed to decode payload file: {}", args.payload_path))?;

    let batch = BatchEvaluator::new(Arc::new(lookup), cfg.engine.clone());
    let report = batch.evaluate(tickets).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr; stdout is
/// reserved for the report.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ticketcheck=info"));

    let json_logging = std::env::var("TICKETCHECK_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
