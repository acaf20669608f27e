//! Filename variant generation.
//!
//! A title and the file named after it drift apart in predictable ways: a
//! leading article gets dropped, underscores become hyphens, filler words go
//! missing. Each rule below adds at most one alternate spelling of the core.

use rustc_hash::FxHashSet;

use crate::normalize::to_filename_core;

/// English article prefix, stripped case-insensitively.
pub const ENGLISH_ARTICLES: &[&str] = &["the_"];

/// Spanish definite articles.
pub const SPANISH_ARTICLES: &[&str] = &["el_", "la_", "los_", "las_"];

/// French definite articles.
pub const FRENCH_ARTICLES: &[&str] = &["le_", "la_", "les_"];

/// Short filler words dropped by the stop-word variant.
pub const STOP_WORDS: &[&str] = &["a", "of", "the", "and"];

/// Return `core` without `prefix` if it starts with it (ASCII case-insensitive).
/// The remainder keeps its original casing.
fn strip_prefix_ignore_case<'a>(core: &'a str, prefix: &str) -> Option<&'a str> {
    let head = core.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then_some(&core[prefix.len()..])
}

/// Drop stop words from an underscore-joined core with more than two tokens.
/// Returns None when the core is too short or nothing would remain.
fn without_stop_words(core: &str) -> Option<String> {
    let tokens: Vec<&str> = core.split('_').collect();
    if tokens.len() <= 2 {
        return None;
    }
    let kept: Vec<&str> = tokens
        .into_iter()
        .filter(|t| !STOP_WORDS.iter().any(|w| t.eq_ignore_ascii_case(w)))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("_"))
    }
}

/// Build the ordered variant list for a filename core.
///
/// The core itself comes first; the rest follow in rule order. Entries are
/// unique (first occurrence wins) and never empty, so an empty core yields an
/// empty list.
pub fn variants_for_core(core: &str) -> Vec<String> {
    let mut candidates: Vec<String> = vec![core.to_string()];

    for article in ENGLISH_ARTICLES
        .iter()
        .chain(SPANISH_ARTICLES)
        .chain(FRENCH_ARTICLES)
    {
        if let Some(rest) = strip_prefix_ignore_case(core, article) {
            candidates.push(rest.to_string());
        }
    }

    candidates.push(core.replace('_', "-"));

    if let Some(filtered) = without_stop_words(core) {
        candidates.push(filtered);
    }

    if let Some((first, _)) = core.split_once('_') {
        candidates.push(first.to_string());
    }

    let mut seen: FxHashSet<String> = FxHashSet::default();
    candidates
        .into_iter()
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

/// Normalize a title and build its variant list in one step.
pub fn filename_variants(title: &str) -> Vec<String> {
    variants_for_core(&to_filename_core(title))
}
