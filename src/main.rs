use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use colloquy::{ingest_bundle, parse_bundle_file, ReportPayload, Store};

#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about = "Discussion structuring and sentiment aggregation engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest an analysis bundle into the structured store
    Ingest {
        /// Input analysis bundle (JSON: recording, segments, annotations)
        #[arg(short, long)]
        input: PathBuf,

        /// SQLite database path
        #[arg(short, long)]
        db: PathBuf,

        /// Replace the recording if it was already ingested
        #[arg(long)]
        replace: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Emit the report renderer payload for an ingested recording
    Report {
        /// SQLite database path
        #[arg(short, long)]
        db: PathBuf,

        /// Recording identity to report on
        #[arg(short, long)]
        recording: String,

        /// Output file for the payload JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            input,
            db,
            replace,
            verbose,
        } => {
            setup_logging(verbose);
            run_ingest(input, db, replace)
        }
        Commands::Report {
            db,
            recording,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            run_report(db, &recording, output)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn run_ingest(input: PathBuf, db: PathBuf, replace: bool) -> Result<()> {
    info!("Loading analysis bundle from {:?}", input);
    let bundle = parse_bundle_file(&input).context("Failed to parse analysis bundle")?;

    let mut store = Store::open(&db).with_context(|| format!("Failed to open store {:?}", db))?;
    let summary = ingest_bundle(&mut store, &bundle, replace)
        .with_context(|| format!("Failed to ingest recording {}", bundle.recording.recording_id))?;

    info!(
        "Ingested {}: {} segments, {} topics, {} threads, {} arguments ({} supporting points), {} scored segments",
        summary.recording_id,
        summary.segments,
        summary.topics,
        summary.threads,
        summary.arguments,
        summary.supporting_points,
        summary.scored_segments
    );
    Ok(())
}

fn run_report(db: PathBuf, recording_id: &str, output: Option<PathBuf>) -> Result<()> {
    let store = Store::open(&db).with_context(|| format!("Failed to open store {:?}", db))?;

    // Confirms the recording exists before assembling payloads.
    store
        .recording(recording_id)
        .with_context(|| format!("Unknown recording {recording_id}"))?;

    let payload = ReportPayload {
        timeline: store.topic_timeline(recording_id)?,
        sentiment: store.sentiment_payload(recording_id)?,
        speakers: store.speaker_durations(recording_id)?,
    };

    match output {
        Some(path) => {
            payload.write_json(&path)?;
            info!("Report payload written to {:?}", path);
        }
        None => payload.write_to(std::io::stdout().lock())?,
    }
    Ok(())
}
