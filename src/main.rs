use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use joke_splitter::corpus::Corpus;
use joke_splitter::settings::Settings;
use joke_splitter::{parser, source, Page, PageEntries};

#[derive(Parser)]
#[command(name = "joke_splitter", about = "Split extracted joke pages into numbered entries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment paragraph dumps and merge them into one JSON file
    Segment {
        /// Paragraph dump files or directories of them
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output file (default: $JOKES_OUTPUT or jokes.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the merged JSON instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Show per-page segmentation statistics
    Stats {
        /// Paragraph dump files or directories of them
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load();
    info!(?settings, "Starting joke splitter");

    let result = match cli.command {
        Commands::Segment { paths, output, stdout } => {
            let pages = source::load_pages(&paths).context("Failed to load pages")?;
            let results = process_pages(&pages, settings.chunk_size)?;

            let mut corpus = Corpus::new();
            for page in &results {
                corpus.merge(page);
            }

            if stdout {
                println!("{}", corpus.to_json()?);
            } else {
                let output = output.unwrap_or(settings.output);
                corpus.write_json(&output)?;
                println!(
                    "Saved {} entries from {} pages to {} ({} overwritten).",
                    corpus.len(),
                    corpus.pages(),
                    output.display(),
                    corpus.collisions()
                );
            }
            Ok(())
        }
        Commands::Stats { paths } => {
            let pages = source::load_pages(&paths).context("Failed to load pages")?;
            let results = process_pages(&pages, settings.chunk_size)?;

            println!(
                "{:<20} | {:>6} | {:>7} | {:>6} | {:>6} | {:>6} | {:>7}",
                "Page", "Paras", "Entries", "First", "Last", "Folded", "Dropped"
            );
            println!("{}", "-".repeat(80));

            for r in &results {
                let s = &r.stats;
                println!(
                    "{:<20} | {:>6} | {:>7} | {:>6} | {:>6} | {:>6} | {:>7}",
                    truncate(&r.page_id, 20),
                    s.paragraphs,
                    s.entries,
                    number_or_dash(s.first_number),
                    number_or_dash(s.last_number),
                    s.folded_numbers,
                    s.dropped
                );
            }

            let total: usize = results.iter().map(|r| r.stats.entries).sum();
            println!("\n{} pages | {} entries", results.len(), total);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Segment pages in parallel chunks, preserving input order in the result.
fn process_pages(pages: &[Page], chunk_size: usize) -> Result<Vec<PageEntries>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut results = Vec::with_capacity(pages.len());
    for chunk in pages.chunks(chunk_size.max(1)) {
        let segmented: Vec<_> = chunk.par_iter().map(parser::process_page).collect();
        results.extend(segmented);
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(results)
}

fn number_or_dash(n: Option<u128>) -> String {
    n.map(|n| n.to_string()).unwrap_or_else(|| "-".into())
}

/// Shorten a table cell to `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let total = d.as_secs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    match (hours, minutes) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{}m {}s", minutes, seconds),
        _ => format!("{}h {}m {}s", hours, minutes, seconds),
    }
}
