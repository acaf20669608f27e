//! Title normalization for filename matching.
//! Turns a human-readable title into the ASCII, underscore-joined "core" that
//! image files are named after (without marker prefix or extension).
//!
//! CRITICAL: every image already on disk was named against these rules. Changing
//! a step changes which files match. Run tests after changes.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Anything that is not a word character, whitespace, period or hyphen.
pub static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.\-]").unwrap());

/// Runs of whitespace (collapsed to a single space)
pub static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Runs of underscores (collapsed to a single underscore)
pub static MULTI_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Strip accents by applying NFKD decomposition and dropping everything that
/// is not ASCII. Control characters go too, except whitespace, which the
/// punctuation pass collapses later.
/// e.g., "Amélie" → "Amelie", "Léon" → "Leon", "東京" → ""
pub fn strip_accents(s: &str) -> String {
    s.nfkd()
        .filter(|c| c.is_ascii() && (!c.is_ascii_control() || c.is_ascii_whitespace()))
        .collect()
}

/// Normalize punctuation: curly quotes become straight quotes, `&` becomes "and",
/// and every character outside letters/digits/underscore, whitespace, `.` and `-`
/// is deleted. Whitespace is collapsed and trimmed.
pub fn clean_punctuation(s: &str) -> String {
    let result = s
        .replace(['\u{2018}', '\u{2019}'], "'") // Left/right single curly quotes
        .replace(['\u{201C}', '\u{201D}'], "\"") // Left/right double curly quotes
        .replace('&', " and ");
    let result = DISALLOWED_CHARS.replace_all(&result, "");
    MULTI_SPACE.replace_all(&result, " ").trim().to_string()
}

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Transform a title into its filename core.
/// e.g., "Alice in Wonderland!" → "Alice_in_Wonderland"
///
/// The result only contains `[A-Za-z0-9_.-]` and never two underscores in a row.
/// An all-punctuation or all-non-Latin title yields an empty core.
pub fn to_filename_core(title: &str) -> String {
    let s = strip_accents(title);
    let s = clean_punctuation(&s);
    let s = s.replace(' ', "_");
    MULTI_UNDERSCORE.replace_all(&s, "_").into_owned()
}

// ============================================================================
// TESTS
// ============================================================================
