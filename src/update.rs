//! Batch run: link every record to its best-guess image file.
//!
//! Phases:
//! 1. Scan the image folder (abort with a report if it is missing)
//! 2. Load all records
//! 3. Match each record and persist `<subdir>/<file>` on success

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::library::ImageIndex;
use crate::matcher::Matcher;
use crate::models::{MatchConfig, Record, RunStats};
use crate::progress::{create_progress_bar, log_progress, report_error_line, report_line};
use crate::safety::relative_image_path;
use crate::store::RecordStore;
use crate::variants::filename_variants;

/// Subdirectory (relative to the media root) stored in front of matched filenames
pub const DEFAULT_MEDIA_SUBDIR: &str = "movie/images";

/// How many variants a failure line lists
const REPORTED_VARIANTS: usize = 3;

/// Log-only progress interval (records)
const LOG_INTERVAL: u64 = 500;

/// Options for one batch run.
#[derive(Clone, Debug)]
pub struct UpdateOptions {
    pub media_subdir: String,
    pub dry_run: bool,
    pub skip_unchanged: bool,
    pub match_config: MatchConfig,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            media_subdir: DEFAULT_MEDIA_SUBDIR.to_string(),
            dry_run: false,
            skip_unchanged: false,
            match_config: MatchConfig::default(),
        }
    }
}

/// How a batch run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The image folder does not exist; no records were touched
    FolderMissing(PathBuf),
    Completed(RunStats),
}

/// Scan `images_dir`, then link every record in `store`.
pub fn run<S: RecordStore>(
    store: &mut S,
    images_dir: &Path,
    options: &UpdateOptions,
) -> Result<RunOutcome> {
    if !images_dir.is_dir() {
        eprintln!("Images folder '{}' not found.", images_dir.display());
        return Ok(RunOutcome::FolderMissing(images_dir.to_path_buf()));
    }

    let index = ImageIndex::scan(images_dir)?;
    println!("Found {} image files in folder", index.len());

    let records = store.fetch_all()?;
    println!("Found {} records in database", records.len());

    let stats = link_records(store, &index, records, options);

    if options.dry_run {
        println!("Dry run: {} records would be updated.", stats.updated);
    } else {
        println!("Finished updating {} records.", stats.updated);
    }

    Ok(RunOutcome::Completed(stats))
}

/// Like [`run`], but only opens the store once the image folder is known to exist.
pub fn run_with_store<S, F>(images_dir: &Path, options: &UpdateOptions, open_store: F) -> Result<RunOutcome>
where
    S: RecordStore,
    F: FnOnce() -> Result<S>,
{
    if !images_dir.is_dir() {
        eprintln!("Images folder '{}' not found.", images_dir.display());
        return Ok(RunOutcome::FolderMissing(images_dir.to_path_buf()));
    }
    let mut store = open_store()?;
    run(&mut store, images_dir, options)
}

/// Marker-prefixed `.png` names of the first few variants, for failure lines.
/// e.g., "m_The_Matrix.png, m_Matrix.png, m_The-Matrix.png"
pub fn tried_names(marker: &str, variants: &[String]) -> String {
    variants
        .iter()
        .take(REPORTED_VARIANTS)
        .map(|v| format!("{}{}.png", marker, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Match each record against `index` and persist the hits.
///
/// A missing match or a failed save only affects that record; the loop always
/// runs to the end.
pub fn link_records<S: RecordStore>(
    store: &mut S,
    index: &ImageIndex,
    records: Vec<Record>,
    options: &UpdateOptions,
) -> RunStats {
    let start = Instant::now();
    let matcher = Matcher::with_config(index, options.match_config.clone());
    let marker = &options.match_config.marker_prefix;

    let mut stats = RunStats {
        images_found: index.len(),
        records_total: records.len(),
        dry_run: options.dry_run,
        ..Default::default()
    };

    let total = records.len() as u64;
    let pb = create_progress_bar(total, "Matching records");

    for (i, record) in records.into_iter().enumerate() {
        let variants = filename_variants(&record.title);

        match matcher.find_with_variants(&variants) {
            Some(found) => {
                if found.is_exact() {
                    stats.exact_matches += 1;
                } else {
                    stats.fuzzy_matches += 1;
                }

                let image = relative_image_path(&options.media_subdir, &found.file_name);
                if options.skip_unchanged && record.image.as_deref() == Some(image.as_str()) {
                    stats.unchanged += 1;
                    report_line(&pb, &format!("Unchanged: {} → {}", record.title, found.file_name));
                } else if options.dry_run {
                    stats.updated += 1;
                    report_line(&pb, &format!("Would update: {} → {}", record.title, found.file_name));
                } else {
                    let updated = Record {
                        image: Some(image),
                        ..record
                    };
                    match store.save_image(&updated) {
                        Ok(()) => {
                            stats.updated += 1;
                            report_line(&pb, &format!("Updated: {} → {}", updated.title, found.file_name));
                        }
                        Err(e) => {
                            stats.save_failures += 1;
                            report_error_line(
                                &pb,
                                &format!("Failed to save image for: {} ({:#})", updated.title, e),
                            );
                        }
                    }
                }
            }
            None => {
                stats.not_found += 1;
                report_error_line(
                    &pb,
                    &format!(
                        "Image not found for: {} (tried: {}...)",
                        record.title,
                        tried_names(marker, &variants)
                    ),
                );
                stats.unmatched_titles.push(record.title);
            }
        }

        pb.inc(1);
        log_progress("MATCH", i as u64 + 1, total, LOG_INTERVAL);
    }

    pb.finish_with_message(format!(
        "Matched {}/{} records",
        stats.exact_matches + stats.fuzzy_matches,
        stats.records_total
    ));
    stats.elapsed_seconds = start.elapsed().as_secs_f64();
    stats
}
