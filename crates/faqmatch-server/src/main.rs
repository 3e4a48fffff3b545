//! faqmatch Server - semantic FAQ chat endpoint
//!
//! Loads the FAQ corpus, embeds every question with a local sentence
//! embedding model, and serves a chat page plus a JSON endpoint that answers
//! each question with the closest known answer.
//!
//! Startup fails (exit code 1) only when the embedding model cannot be
//! loaded. A missing or partly malformed corpus still starts the server.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, Level};

use faqmatch_core::MatcherConfig;
use faqmatch_server::http::{HttpServer, HttpServerConfig};
use faqmatch_server::logging::init_logging;

/// faqmatch - semantic FAQ chat server
#[derive(Parser)]
#[command(name = "faqmatch-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve answers from a FAQ corpus by semantic similarity")]
#[command(after_help = "ENVIRONMENT:\n    \
    FAQMATCH_CORPUS_DIR, FAQMATCH_CORPUS_EXTENSION, FAQMATCH_THRESHOLD,\n    \
    FAQMATCH_QUERY_CACHE_SIZE, FAQMATCH_EMBEDDING_MODEL, FAQMATCH_HOST,\n    \
    FAQMATCH_PORT, FASTEMBED_CACHE_PATH, RUST_LOG")]
struct Args {
    /// Directory of corpus files (default: $FAQMATCH_CORPUS_DIR or extracted_faqs)
    #[arg(long)]
    corpus_dir: Option<PathBuf>,

    /// Similarity a match must exceed, between -1 and 1
    #[arg(long)]
    threshold: Option<f32>,

    /// Address to bind (default: $FAQMATCH_HOST or 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default: $FAQMATCH_PORT or 5000)
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn http_config(args: &Args) -> anyhow::Result<HttpServerConfig> {
    let defaults = HttpServerConfig::default();

    let host = args
        .host
        .clone()
        .or_else(|| std::env::var("FAQMATCH_HOST").ok().filter(|h| !h.is_empty()))
        .unwrap_or(defaults.host);

    let port = match args.port {
        Some(port) => port,
        None => match std::env::var("FAQMATCH_PORT") {
            Ok(port) if !port.is_empty() => port
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid value for FAQMATCH_PORT: '{}'", port))?,
            _ => defaults.port,
        },
    };

    Ok(HttpServerConfig { host, port })
}

fn matcher_config(args: &Args) -> anyhow::Result<MatcherConfig> {
    let mut config = MatcherConfig::from_env()?;
    if let Some(dir) = &args.corpus_dir {
        config = config.with_corpus_dir(dir);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first (before logging init, so --help/--version work cleanly)
    let args = Args::parse();

    init_logging(Level::INFO, args.log_json);

    info!("faqmatch server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = matcher_config(&args)?;
    let http = http_config(&args)?;

    info!(
        corpus_dir = %config.corpus_dir.display(),
        threshold = config.threshold,
        "Loading corpus and embedding model"
    );

    // Model loading may download files and embeds the whole corpus
    let matcher = match tokio::task::spawn_blocking(move || faqmatch_core::initialize(&config)).await? {
        Ok(matcher) => matcher,
        Err(e) => {
            error!("Failed to initialize matcher: {}", e);
            error!("Hint: Check FASTEMBED_CACHE_PATH or network access for the model download");
            std::process::exit(1);
        }
    };

    if matcher.is_empty() {
        info!("Corpus is empty: every question will get the fallback answer");
    }

    HttpServer::new(http).run(matcher).await?;

    info!("faqmatch server stopped");
    Ok(())
}
