//! faqmatch CLI
//!
//! Ask the matcher questions from the terminal and inspect the corpus.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{error, Level};

use faqmatch_core::{
    BestMatch, CorpusLoader, MatchError, MatchResult, MatcherConfig, SemanticMatcher,
    FALLBACK_RESPONSE,
};
use faqmatch_server::logging::init_logging;

/// faqmatch - semantic FAQ matching CLI
#[derive(Parser)]
#[command(name = "faqmatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ask questions against a FAQ corpus and inspect what was loaded")]
struct Cli {
    /// Directory of corpus files (default: $FAQMATCH_CORPUS_DIR or extracted_faqs)
    #[arg(long, global = true)]
    corpus_dir: Option<PathBuf>,

    /// Similarity a match must exceed, between -1 and 1
    #[arg(long, global = true)]
    threshold: Option<f32>,

    /// Show info-level logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question
    Ask {
        /// The question text
        question: String,
        /// Also print the best-matching entry and its similarity
        #[arg(long)]
        explain: bool,
    },

    /// Load the corpus (without the model) and report what was read
    Corpus {
        /// List every loaded question/answer pair
        #[arg(long)]
        list: bool,
        /// Print the loaded corpus as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(if cli.verbose { Level::INFO } else { Level::WARN }, false);

    let mut config = MatcherConfig::from_env()?;
    if let Some(dir) = &cli.corpus_dir {
        config = config.with_corpus_dir(dir);
    }
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold)?;
    }

    match cli.command {
        Commands::Ask { question, explain } => run_ask(&config, &question, explain),
        Commands::Corpus { list, json } => run_corpus(&config, list, json),
    }
}

/// Result of asking one question
enum AskOutcome {
    /// The query was embedded and scored
    Scored {
        best: Option<BestMatch>,
        result: MatchResult,
    },
    /// Embedding or scoring failed; the user only sees the fallback
    Failed(MatchError),
}

impl AskOutcome {
    fn response(&self) -> String {
        match self {
            AskOutcome::Scored { result, .. } => result.clone().into_response(),
            AskOutcome::Failed(_) => FALLBACK_RESPONSE.to_string(),
        }
    }
}

fn ask(matcher: &SemanticMatcher, question: &str) -> AskOutcome {
    match matcher.best_match(question) {
        Ok(best) => AskOutcome::Scored {
            best,
            result: matcher.decide(best),
        },
        Err(e) => {
            error!("Query failed: {}", e);
            AskOutcome::Failed(e)
        }
    }
}

fn run_ask(config: &MatcherConfig, question: &str, explain: bool) -> anyhow::Result<()> {
    let matcher = faqmatch_core::initialize(config)?;
    let outcome = ask(&matcher, question);

    if explain {
        print_explanation(&matcher, &outcome);
    }

    println!("{}", outcome.response());
    Ok(())
}

fn print_explanation(matcher: &SemanticMatcher, outcome: &AskOutcome) {
    println!("{}", "=== Match ===".cyan().bold());

    let (best, result) = match outcome {
        AskOutcome::Scored { best, result } => (best, result),
        AskOutcome::Failed(e) => {
            println!("{}: {}", "Query failed".red().bold(), e);
            println!();
            return;
        }
    };

    match (*best).and_then(|b| matcher.corpus().get(b.index).map(|entry| (b, entry))) {
        Some((b, entry)) => {
            println!("{}: #{}", "Entry".white().bold(), b.index);
            println!("{}: {}", "Question".white().bold(), entry.question);
            println!(
                "{}: {:.4} (threshold {})",
                "Similarity".white().bold(),
                b.score,
                matcher.threshold()
            );
        }
        None => println!("{}", "Corpus is empty".yellow()),
    }
    let verdict = match result {
        MatchResult::Answer(_) => "matched".green(),
        MatchResult::NoMatch => "no match".red(),
    };
    println!("{}: {}", "Verdict".white().bold(), verdict);
    println!();
}

fn run_corpus(config: &MatcherConfig, list: bool, json: bool) -> anyhow::Result<()> {
    let report = CorpusLoader::with_extension(config.corpus_extension.as_str())
        .load_with_report(&config.corpus_dir);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.corpus)?);
        return Ok(());
    }

    println!("{}", "=== Corpus ===".cyan().bold());
    println!("{}: {}", "Directory".white().bold(), config.corpus_dir.display());
    println!("{}: *.{}", "Files".white().bold(), config.corpus_extension);
    println!("{}: {}", "Files Read".white().bold(), report.files_read);
    println!("{}: {}", "Entries".white().bold(), report.corpus.len());
    println!("{}: {}", "Records Dropped".white().bold(), report.records_dropped);

    if !report.skipped.is_empty() {
        println!();
        println!("{}", "Skipped files:".yellow().bold());
        for skipped in &report.skipped {
            println!("  {} {}", skipped.path.display(), format!("({})", skipped.reason).dimmed());
        }
    }

    if list {
        println!();
        for (i, entry) in report.corpus.iter().enumerate() {
            println!("{} {}", format!("#{}", i).dimmed(), entry.question.white().bold());
            println!("   {}", entry.answer);
        }
    }

    Ok(())
}
