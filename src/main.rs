mod db;
mod error;
mod loader;
mod parser;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use parser::records::Record;

#[derive(Parser)]
#[command(name = "faq_loader", about = "Extract FAQ and guideline records from paginated documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from documents and store them
    Extract {
        /// PDF or form-feed separated text files (default: data_dir/source_file_name)
        files: Vec<PathBuf>,
        /// Source identifier stamped on every record
        #[arg(short, long)]
        source: Option<String>,
        /// Also write all extracted records to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,
        /// Parse only, do not touch the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print stored records
    Show {
        /// Only records of this source
        #[arg(short, long)]
        source: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show record counts per source
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = settings::load()?;
    info!(settings = ?settings, "Starting faq_loader");

    let result = match cli.command {
        Commands::Extract {
            files,
            source,
            json,
            dry_run,
        } => {
            let files = if files.is_empty() {
                match settings.default_input() {
                    Some(path) => vec![path],
                    None => bail!("No input files given and FAQ_SOURCE_FILE_NAME is not set"),
                }
            } else {
                files
            };
            if source.is_some() && files.len() > 1 {
                bail!("--source can only be used with a single input file");
            }

            let jobs: Vec<(PathBuf, String)> = files
                .into_iter()
                .map(|path| {
                    let src = settings.source_for(&path, source.as_deref());
                    (path, src)
                })
                .collect();

            println!("Extracting records from {} file(s)...", jobs.len());
            let outcomes = extract_files(&jobs);

            let conn = if dry_run {
                None
            } else {
                let conn = db::connect(&settings.db_path)?;
                db::init_schema(&conn)?;
                Some(conn)
            };

            let mut all = Vec::new();
            let mut failed = 0;
            for ((path, src), outcome) in jobs.iter().zip(outcomes) {
                match outcome {
                    Ok(records) => {
                        if let Some(conn) = &conn {
                            db::save_records(conn, src, &records)?;
                        }
                        println!("  {}: {} records", src, records.len());
                        all.extend(records);
                    }
                    Err(e) => {
                        warn!("Skipping {:?}: {:#}", path, e);
                        failed += 1;
                    }
                }
            }

            if let Some(out) = json {
                let body = serde_json::to_string_pretty(&all)?;
                std::fs::write(&out, body).with_context(|| format!("Cannot write {:?}", out))?;
                println!("Wrote {} records to {}", all.len(), out.display());
            }

            println!(
                "Done: {} records from {} file(s), {} failed.",
                all.len(),
                jobs.len() - failed,
                failed
            );
            if failed == jobs.len() {
                bail!("No document could be processed");
            }
            Ok(())
        }
        Commands::Show { source, limit } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_records(&conn, source.as_deref(), limit)?;
            if rows.is_empty() {
                println!("No records found. Run 'extract' first.");
                return Ok(());
            }

            println!("{:>3} | {:<20} | {:>4} | {:<40} | {:<40}", "#", "Source", "Page", "Question", "Answer");
            println!("{}", "-".repeat(119));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<20} | {:>4} | {:<40} | {:<40}",
                    i + 1,
                    truncate(&r.source, 20),
                    r.page_number,
                    truncate(&r.question, 40),
                    truncate(&single_line(&r.answer), 40),
                );
            }
            println!("\n{} records", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Records: {}", s.total);
            for (source, count) in &s.per_source {
                println!("  {:<30} {}", source, count);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Each document is independent, so documents run in parallel; the pages of
/// one document are always processed in order on a single thread.
fn extract_files(jobs: &[(PathBuf, String)]) -> Vec<anyhow::Result<Vec<Record>>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let outcomes = jobs
        .par_iter()
        .map(|(path, source)| {
            let result = extract_file(path, source);
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_and_clear();
    outcomes
}

fn extract_file(path: &Path, source: &str) -> anyhow::Result<Vec<Record>> {
    let pages = loader::load_pages(path)?;
    let records = parser::extract_records(&pages, source)
        .with_context(|| format!("Cannot extract records from {:?}", path))?;
    Ok(records)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
