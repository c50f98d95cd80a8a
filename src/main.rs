use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ideavote::{
    read_input_text, render_response, write_response, Analyzer, AnalyzerConfig, TextSource,
};

#[derive(Parser)]
#[command(name = "ideavote")]
#[command(author, version, about = "Reverse-engineer a prompt for a text and compare the ideas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a text and print the consensus ideas as JSON
    Analyze {
        /// File containing the text to analyze
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Text to analyze (reads stdin when neither --input nor --text is given)
        #[arg(short, long)]
        text: Option<String>,

        /// Number of concurrent analysis cycles
        #[arg(short, long)]
        cycles: Option<usize>,

        /// Stop waiting for cycles after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Gemini model name
        #[arg(long)]
        model: Option<String>,

        /// Retries per stage on upstream failure
        #[arg(long)]
        max_retries: Option<u32>,

        /// Per-request HTTP timeout in seconds
        #[arg(long)]
        request_timeout_secs: Option<u64>,

        /// Write the JSON response to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON response
        #[arg(long)]
        pretty: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check the credential configuration without calling the model
    Credentials {
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            text,
            cycles,
            timeout_secs,
            model,
            max_retries,
            request_timeout_secs,
            output,
            pretty,
            verbose,
        } => {
            setup_logging(verbose);

            let mut config = AnalyzerConfig::from_env()?;
            if let Some(cycles) = cycles {
                config.cycles = cycles;
            }
            if let Some(secs) = timeout_secs {
                config.batch_timeout_secs = Some(secs);
            }
            if let Some(model) = model {
                config.gemini.model = model;
            }
            if let Some(retries) = max_retries {
                config.pipeline.max_retries = retries;
            }
            if let Some(secs) = request_timeout_secs {
                config.gemini.request_timeout_secs = secs;
            }

            let source = match (&input, &text) {
                (Some(path), _) => TextSource::File(path),
                (None, Some(text)) => TextSource::Inline(text),
                (None, None) => TextSource::Stdin,
            };

            let succeeded = analyze_text(&config, source, output, pretty).await?;
            if !succeeded {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Credentials { verbose } => {
            setup_logging(verbose);
            check_credentials()
        }
    }
}

/// Logs go to stderr so stdout carries only the JSON response
fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            let subscriber = builder.with_env_filter(filter).finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        Err(_) => {
            let subscriber = builder.finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }
}

async fn analyze_text(
    config: &AnalyzerConfig,
    source: TextSource<'_>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<bool> {
    let analyzer = Analyzer::from_config(config).context("Invalid analyzer configuration")?;
    let text = read_input_text(source)?;

    let started = Utc::now();
    let response = analyzer.analyze(&text).await;
    let elapsed = Utc::now() - started;
    info!(
        "Analysis finished in {:.1}s",
        elapsed.num_milliseconds() as f64 / 1000.0
    );

    match output {
        Some(path) => {
            write_response(&response, &path, pretty)?;
            info!("Response written to {:?}", path);
        }
        None => println!("{}", render_response(&response, pretty)?),
    }

    Ok(!response.is_error())
}

fn check_credentials() -> Result<()> {
    let config = AnalyzerConfig::from_env()?;
    let rotator = config.rotator().context("No usable credentials configured")?;

    println!("Credential Pool");
    println!("===============");
    println!("Keys: {}", rotator.len());
    for (position, fingerprint) in rotator.fingerprints().iter().enumerate() {
        println!("  [{}] {}", position, fingerprint);
    }
    println!();
    println!("Model: {}", config.gemini.model);
    println!("Endpoint: {}", config.gemini.base_url);
    println!("Cycles per analysis: {}", config.cycles);

    Ok(())
}
