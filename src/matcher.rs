//! Title → image file resolution.
//!
//! Two tiers, tried in order, stopping at the first hit:
//! - Exact: each variant × each extension, marker-prefixed name before bare name
//! - Fuzzy: closest basename to the canonical core, bare before prefixed

use crate::library::ImageIndex;
use crate::models::{ImageMatch, MatchConfig, MatchTier};
use crate::scoring::closest_match;
use crate::variants::filename_variants;

/// Resolves titles against a fixed image index.
pub struct Matcher<'a> {
    index: &'a ImageIndex,
    config: MatchConfig,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a ImageIndex) -> Self {
        Self::with_config(index, MatchConfig::default())
    }

    pub fn with_config(index: &'a ImageIndex, config: MatchConfig) -> Self {
        Self { index, config }
    }

    /// Resolve a title to a filename, or None when neither tier finds one.
    pub fn find(&self, title: &str) -> Option<ImageMatch> {
        self.find_with_variants(&filename_variants(title))
    }

    /// Resolve from a precomputed variant list (canonical core first).
    pub fn find_with_variants(&self, variants: &[String]) -> Option<ImageMatch> {
        self.exact_match(variants)
            .or_else(|| self.fuzzy_match(variants.first()?))
    }

    /// Exact tier: first `{marker}{variant}{ext}` or `{variant}{ext}` present in the index,
    /// in variant order, then extension order, prefixed before bare.
    pub fn exact_match(&self, variants: &[String]) -> Option<ImageMatch> {
        for variant in variants {
            for ext in &self.config.extensions {
                let bare = format!("{}{}", variant, ext);
                let prefixed = format!("{}{}", self.config.marker_prefix, bare);

                for (candidate, is_prefixed) in [(prefixed, true), (bare, false)] {
                    if let Some(file_name) = self.index.get_by_name(&candidate) {
                        return Some(ImageMatch {
                            file_name: file_name.to_string(),
                            tier: MatchTier::Exact {
                                variant: variant.clone(),
                                prefixed: is_prefixed,
                            },
                        });
                    }
                }
            }
        }
        None
    }

    /// Fuzzy tier: closest lowercased basename to `core`, then to the
    /// marker-prefixed `core`, at or above the configured cutoff.
    pub fn fuzzy_match(&self, core: &str) -> Option<ImageMatch> {
        let bare = core.to_lowercase();
        let prefixed = format!("{}{}", self.config.marker_prefix, bare).to_lowercase();

        for reference in [bare, prefixed] {
            if let Some((stem, score)) =
                closest_match(&reference, self.index.stems(), self.config.fuzzy_cutoff)
            {
                let file_name = self.index.get_by_stem(stem)?;
                return Some(ImageMatch {
                    file_name: file_name.to_string(),
                    tier: MatchTier::Fuzzy { reference, score },
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(names: &[&str]) -> ImageIndex {
        ImageIndex::from_names(names.iter().copied())
    }

    #[test]
    fn test_prefixed_exact_match() {
        let idx = index(&["m_amelie.jpg", "alien.png"]);
        let found = Matcher::new(&idx).find("Amélie").unwrap();
        assert_eq!(found.file_name, "m_amelie.jpg");
        assert_eq!(
            found.tier,
            MatchTier::Exact {
                variant: "Amelie".to_string(),
                prefixed: true
            }
        );
    }

    #[test]
    fn test_bare_exact_match() {
        let idx = index(&["alice_in_wonderland.png"]);
        let found = Matcher::new(&idx).find("Alice in Wonderland!").unwrap();
        assert_eq!(found.file_name, "alice_in_wonderland.png");
        assert_eq!(
            found.tier,
            MatchTier::Exact {
                variant: "Alice_in_Wonderland".to_string(),
                prefixed: false
            }
        );
    }

    #[test]
    fn test_prefixed_wins_over_bare() {
        let idx = index(&["amelie.png", "m_amelie.png"]);
        let found = Matcher::new(&idx).find("Amelie").unwrap();
        assert_eq!(found.file_name, "m_amelie.png");
    }

    #[test]
    fn test_extension_priority() {
        let idx = index(&["m_up.webp", "m_up.jpg"]);
        let found = Matcher::new(&idx).find("Up").unwrap();
        assert_eq!(found.file_name, "m_up.jpg");
    }

    #[test]
    fn test_extension_order_beats_prefix() {
        // png is checked (prefixed and bare) before any jpg
        let idx = index(&["up.png", "m_up.jpg"]);
        let found = Matcher::new(&idx).find("Up").unwrap();
        assert_eq!(found.file_name, "up.png");
    }

    #[test]
    fn test_variant_order_beats_extension_order() {
        let idx = index(&["lord_of_the_rings.webp", "the-lord-of-the-rings.png"]);
        let found = Matcher::new(&idx).find("The Lord of the Rings").unwrap();
        assert_eq!(found.file_name, "lord_of_the_rings.webp");
    }

    #[test]
    fn test_exact_preserves_disk_casing() {
        let idx = index(&["M_The_Matrix.PNG"]);
        let found = Matcher::new(&idx).find("the matrix").unwrap();
        assert_eq!(found.file_name, "M_The_Matrix.PNG");
    }

    #[test]
    fn test_fuzzy_typo() {
        let idx = index(&["inceptoin.png", "interstellar.png"]);
        let found = Matcher::new(&idx).find("Inception").unwrap();
        assert_eq!(found.file_name, "inceptoin.png");
        match found.tier {
            MatchTier::Fuzzy { reference, score } => {
                assert_eq!(reference, "inception");
                assert!(score >= 0.75);
            }
            other => panic!("expected fuzzy tier, got {:?}", other),
        }
    }

    #[test]
    fn test_fuzzy_prefixed_reference() {
        // "jaws" vs "m_jawz": too far bare, close once the marker is added
        let idx = index(&["m_jawz.png"]);
        let found = Matcher::new(&idx).find("Jaws").unwrap();
        assert_eq!(found.file_name, "m_jawz.png");
        assert!(matches!(found.tier, MatchTier::Fuzzy { ref reference, .. } if reference == "m_jaws"));
    }

    #[test]
    fn test_fuzzy_bare_reference_before_prefixed() {
        // bare "inception" reaches "incepti" (0.778); prefixed "m_inception"
        // would score higher on "m_inceptio" (0.909) but is never tried
        let idx = index(&["incepti.png", "m_inceptio.png"]);
        let found = Matcher::new(&idx).find("Inception").unwrap();
        assert_eq!(found.file_name, "incepti.png");
        assert!(matches!(found.tier, MatchTier::Fuzzy { ref reference, .. } if reference == "inception"));
    }

    #[test]
    fn test_exact_tier_runs_before_fuzzy() {
        // "inceptio.png" is a closer fuzzy hit, but the exact file exists
        let idx = index(&["inceptio.png", "inception.jpeg"]);
        let found = Matcher::new(&idx).find("Inception").unwrap();
        assert_eq!(found.file_name, "inception.jpeg");
        assert!(found.is_exact());
    }

    #[test]
    fn test_not_found() {
        let idx = index(&["inceptoin.png", "m_amelie.jpg", "alice_in_wonderland.png"]);
        assert!(Matcher::new(&idx).find("Unrelated Xyz Film").is_none());
    }

    #[test]
    fn test_empty_title_not_found() {
        let idx = index(&["m_.png", ".png"]);
        assert!(Matcher::new(&idx).find("???").is_none());
    }

    #[test]
    fn test_empty_index() {
        let idx = ImageIndex::default();
        assert!(Matcher::new(&idx).find("Amélie").is_none());
    }

    #[test]
    fn test_custom_config() {
        let idx = index(&["poster_heat.png", "heet.png"]);
        let config = MatchConfig {
            marker_prefix: "poster_".to_string(),
            fuzzy_cutoff: 0.99,
            ..MatchConfig::default()
        };
        let matcher = Matcher::with_config(&idx, config);
        assert_eq!(matcher.find("Heat").unwrap().file_name, "poster_heat.png");
        assert!(matcher.find("Hear").is_none());
    }

    #[test]
    fn test_deterministic() {
        let idx = index(&["inceptoin.png", "inceptiom.png", "m_amelie.jpg"]);
        let matcher = Matcher::new(&idx);
        let first = matcher.find("Inception");
        for _ in 0..5 {
            assert_eq!(matcher.find("Inception"), first);
        }
    }
}
