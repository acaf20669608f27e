use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use poster_link::models::{MatchConfig, DEFAULT_MARKER_PREFIX};
use poster_link::progress::{format_duration, set_log_only};
use poster_link::safety::validate_media_subdir;
use poster_link::scoring::DEFAULT_CUTOFF;
use poster_link::store::{SqliteStore, DEFAULT_TABLE};
use poster_link::update::{run_with_store, RunOutcome, UpdateOptions, DEFAULT_MEDIA_SUBDIR};

#[derive(Parser)]
#[command(name = "poster-link")]
#[command(about = "Assign images from a folder to database records by tolerant title matching")]
struct Args {
    /// SQLite database holding the records
    #[arg(long, default_value = "db.sqlite3")]
    db: PathBuf,

    /// Folder to scan for .png/.jpg/.jpeg/.webp files
    #[arg(long, default_value = "media/movie/images")]
    images_dir: PathBuf,

    /// Table with id, title and image columns
    #[arg(long, default_value = DEFAULT_TABLE)]
    table: String,

    /// Relative path stored in front of the matched filename
    #[arg(long, default_value = DEFAULT_MEDIA_SUBDIR)]
    subdir: String,

    /// Marker prefix some image files carry
    #[arg(long, default_value = DEFAULT_MARKER_PREFIX)]
    marker: String,

    /// Minimum similarity (0.0-1.0) for the fuzzy fallback
    #[arg(long, default_value_t = DEFAULT_CUTOFF)]
    cutoff: f64,

    /// Match and report without writing to the database
    #[arg(long)]
    dry_run: bool,

    /// Do not re-save records whose image already points at the match
    #[arg(long)]
    skip_unchanged: bool,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Hide progress bars and emit periodic log lines instead
    #[arg(long)]
    log_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_log_only(args.log_only);

    validate_media_subdir(&args.subdir)?;
    if !(0.0..=1.0).contains(&args.cutoff) {
        bail!("--cutoff must be between 0.0 and 1.0, got {}", args.cutoff);
    }

    let start = Instant::now();

    let options = UpdateOptions {
        media_subdir: args.subdir,
        dry_run: args.dry_run,
        skip_unchanged: args.skip_unchanged,
        match_config: MatchConfig {
            marker_prefix: args.marker,
            fuzzy_cutoff: args.cutoff,
            ..MatchConfig::default()
        },
    };

    let (db, table) = (&args.db, &args.table);
    let outcome = run_with_store(&args.images_dir, &options, || {
        println!("Opening database: {:?}", db);
        SqliteStore::open(db, table).context("Failed to open record store")
    })?;

    let stats = match outcome {
        RunOutcome::FolderMissing(_) => return Ok(()),
        RunOutcome::Completed(stats) => stats,
    };

    println!("\n{:=<60}", "");
    println!("  Records: {}", stats.records_total);
    println!(
        "  Matched: {} ({} exact, {} fuzzy, {:.1}%)",
        stats.exact_matches + stats.fuzzy_matches,
        stats.exact_matches,
        stats.fuzzy_matches,
        stats.match_rate()
    );
    println!("  Not found: {}", stats.not_found);
    if stats.save_failures > 0 {
        println!("  Save failures: {}", stats.save_failures);
    }
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    if args.log_only {
        stats.log_summary();
    }
    if let Some(path) = args.stats {
        stats
            .write_to_file(&path)
            .with_context(|| format!("Failed to write stats to {}", path.display()))?;
        println!("Stats written to {:?}", path);
    }

    Ok(())
}
