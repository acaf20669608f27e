//! Core data models for image linking.
//!
//! Records, match results, matcher configuration and run statistics.

use serde::Serialize;

use crate::scoring::DEFAULT_CUTOFF;

// ============================================================================
// Constants
// ============================================================================

/// Recognized image extensions, in exact-tier priority order.
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".webp"];

/// Prefix some image files carry in front of the title core
pub const DEFAULT_MARKER_PREFIX: &str = "m_";

// ============================================================================
// Records
// ============================================================================

/// A stored record with a title and an optional linked image path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
}

// ============================================================================
// Match Results
// ============================================================================

/// Which matching strategy produced a result.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchTier {
    /// Verbatim (case-insensitive) filename hit for one of the variants
    Exact { variant: String, prefixed: bool },
    /// Closest basename to the canonical core (or its prefixed form)
    Fuzzy { reference: String, score: f64 },
}

/// A filename resolved for a title, as it appears on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageMatch {
    pub file_name: String,
    pub tier: MatchTier,
}

impl ImageMatch {
    pub fn is_exact(&self) -> bool {
        matches!(self.tier, MatchTier::Exact { .. })
    }
}

// ============================================================================
// Matcher Configuration
// ============================================================================

/// Knobs for the matcher. Defaults reproduce the historical file naming.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    pub marker_prefix: String,
    pub extensions: Vec<String>,
    pub fuzzy_cutoff: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            extensions: IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            fuzzy_cutoff: DEFAULT_CUTOFF,
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Counters for one batch run.
#[derive(Default, Debug, Clone, Serialize)]
pub struct RunStats {
    pub images_found: usize,
    pub records_total: usize,

    // Matching
    pub exact_matches: usize,
    pub fuzzy_matches: usize,
    pub not_found: usize,

    // Persistence
    pub updated: usize,
    pub unchanged: usize,
    pub save_failures: usize,

    pub dry_run: bool,
    pub unmatched_titles: Vec<String>,

    pub elapsed_seconds: f64,
}

impl RunStats {
    /// Matched records as a percentage of all records
    pub fn match_rate(&self) -> f64 {
        if self.records_total == 0 {
            0.0
        } else {
            100.0 * (self.exact_matches + self.fuzzy_matches) as f64 / self.records_total as f64
        }
    }

    /// Log stats to stderr in JSON format
    pub fn log_summary(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[STATS]\n{}", json);
        }
    }

    /// Write stats to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
