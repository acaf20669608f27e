//! Similarity scoring for the fuzzy tier.
//!
//! Pure functions only, so they can be checked against known string pairs
//! without touching the filesystem.

/// Minimum similarity for a fuzzy candidate to be accepted
pub const DEFAULT_CUTOFF: f64 = 0.75;

/// Normalized edit similarity between two strings (0.0 to 1.0).
/// `1 - levenshtein(a, b) / max(len(a), len(b))`, with two empty strings scoring 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Pick the single closest candidate to `word` whose similarity is at least `cutoff`.
///
/// Ties on score go to the lexicographically greatest candidate so the result
/// does not depend on iteration order. Returns the candidate and its score.
pub fn closest_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let score = similarity(word, candidate);
        if score < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_candidate, best_score)) => {
                score > best_score || (score == best_score && candidate > best_candidate)
            }
        };
        if better {
            best = Some((candidate, score));
        }
    }

    best
}
