//! Gazette Match - confirm spreadsheet names against a gazette notice
//!
//! Reads a spreadsheet of deceased persons and a gazette document, extracts
//! the names mentioned in the gazette, and reports the best fuzzy match for
//! every spreadsheet name.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gazette_reconcile::config::{MatchMode, ReconcileConfig, Threshold, DEFAULT_NAME_COLUMN};
use gazette_reconcile::document::read_document_text;
use gazette_reconcile::extract::{extract_candidates_with, ExtractStrategies};
use gazette_reconcile::normalize::normalize;
use gazette_reconcile::pipeline::{run_match, MatchJob};
use gazette_reconcile::report::{write_json, write_report};
use gazette_reconcile::score::ScoreMethod;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gazette-match")]
#[command(about = "Reconcile deceased-estate spreadsheets against gazette notices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match spreadsheet names against the names in a gazette
    Match {
        /// Spreadsheet with the deceased persons (.csv, .xlsx, .xls, .ods)
        #[arg(short, long)]
        sheet: PathBuf,

        /// Gazette document (.pdf or plain text)
        #[arg(short, long)]
        document: PathBuf,

        /// Output file (.json, .csv or .xlsx). JSON to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum similarity score (0-100) for a confirmed match
        #[arg(short, long, env = "GAZETTE_THRESHOLD", default_value = "100")]
        threshold: Threshold,

        /// Output policy: "filter" keeps matches only, "annotate" keeps every row
        #[arg(short, long, env = "GAZETTE_MODE", default_value = "filter")]
        mode: MatchMode,

        /// Spreadsheet column holding the name
        #[arg(long, default_value = DEFAULT_NAME_COLUMN)]
        name_column: String,

        /// Approval date stamped on exact matches (DD/MM/YYYY). Defaults to today
        #[arg(long)]
        approval_date: Option<String>,

        /// Similarity algorithm: ratio or jaro-winkler
        #[arg(long, default_value = "ratio")]
        scorer: ScoreMethod,

        /// Number of parallel threads (default: number of CPU cores)
        #[arg(long)]
        threads: Option<usize>,

        /// Abort matching after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// List the candidate names extracted from a gazette
    Extract {
        /// Gazette document (.pdf or plain text)
        #[arg(short, long)]
        document: PathBuf,

        /// Which extraction passes to run
        #[arg(long, value_enum, default_value = "both")]
        strategy: Strategy,
    },

    /// Show the similarity score between two names
    Score {
        a: String,
        b: String,

        /// Similarity algorithm: ratio or jaro-winkler
        #[arg(long, default_value = "ratio")]
        scorer: ScoreMethod,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Both,
    Estate,
    Capitalized,
}

impl From<Strategy> for ExtractStrategies {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Both => ExtractStrategies::default(),
            Strategy::Estate => ExtractStrategies::estate_only(),
            Strategy::Capitalized => ExtractStrategies::capitalized_only(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            sheet,
            document,
            output,
            threshold,
            mode,
            name_column,
            approval_date,
            scorer,
            threads,
            timeout_secs,
        } => {
            let mut config = ReconcileConfig::default()
                .with_threshold(threshold)
                .with_mode(mode)
                .with_method(scorer)
                .with_name_column(name_column);
            if let Some(date) = approval_date {
                config = config.with_approval_date_str(&date)?;
            }
            let job = MatchJob {
                sheet,
                document,
                config,
            };
            run_match_command(&job, output, threads, timeout_secs)?;
        }
        Commands::Extract { document, strategy } => {
            let text = read_document_text(&document)?;
            let candidates = extract_candidates_with(&text, strategy.into());
            for name in &candidates {
                println!("{}", name);
            }
            eprintln!("{} candidates", candidates.len());
        }
        Commands::Score { a, b, scorer } => {
            let (na, nb) = (normalize(&a), normalize(&b));
            println!("{:?} vs {:?}: {}", na, nb, scorer.score(&na, &nb));
        }
    }

    Ok(())
}

fn run_match_command(
    job: &MatchJob,
    output: Option<PathBuf>,
    threads: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    // Configure thread pool
    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let cancel = Arc::new(AtomicBool::new(false));
    if let Some(secs) = timeout_secs {
        let flag = Arc::clone(&cancel);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(secs));
            log::warn!("Timeout of {}s reached, cancelling", secs);
            flag.store(true, Ordering::Relaxed);
        });
    }

    let report = run_match(job, &cancel).context("Matching failed")?;

    match output {
        Some(path) => write_report(&report, &path)?,
        None => write_json(&report, std::io::stdout().lock())?,
    }

    eprintln!(
        "{} of {} rows emitted ({} approved), {} gazette candidates",
        report.matched.len(),
        report.records_read,
        report.approved_count(),
        report.candidate_count
    );
    Ok(())
}
