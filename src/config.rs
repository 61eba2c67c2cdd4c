//! Scoring configuration.
//!
//! All penalty weights, thresholds and the stopword list live in one
//! immutable struct that is passed into the score calculator and issue
//! detector, so scoring rules can be swapped or tightened in isolation.

use serde::Deserialize;

/// English words excluded from keyword frequency ranking.
///
/// Only words longer than three characters appear here; shorter tokens are
/// already dropped by the length filter.
pub const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "around", "because", "been", "before",
    "being", "between", "both", "cannot", "could", "does", "down", "each",
    "even", "every", "from", "have", "having", "here", "into", "itself",
    "just", "like", "made", "make", "many", "more", "most", "much", "must",
    "once", "only", "onto", "other", "over", "same", "should", "some",
    "such", "than", "that", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "under", "until", "upon", "very",
    "were", "what", "when", "where", "which", "while", "will", "with",
    "within", "without", "would", "your", "yours",
];

/// Immutable scoring rules for the audit engine.
///
/// The defaults carry the documented weights; tests construct modified
/// copies to exercise individual rules.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub title_min_len: usize,
    pub title_max_len: usize,
    pub title_missing_penalty: u32,
    pub title_length_penalty: u32,

    pub description_min_len: usize,
    pub description_max_len: usize,
    pub description_missing_penalty: u32,
    pub description_length_penalty: u32,

    pub missing_h1_penalty: u32,
    pub multiple_h1_penalty: u32,

    pub image_alt_penalty: u32,
    pub image_alt_penalty_cap: u32,

    pub structured_data_penalty: u32,

    /// Minimum number of populated Open Graph fields before penalties apply.
    pub open_graph_required: usize,
    pub open_graph_penalty: u32,

    pub https_penalty: u32,

    pub thin_content_words: usize,
    pub thin_content_penalty: u32,
    pub short_content_words: usize,
    pub short_content_penalty: u32,

    pub readability_poor: u8,
    pub readability_poor_penalty: u32,
    pub readability_fair: u8,
    pub readability_fair_penalty: u32,

    pub technical_weight: f64,
    pub content_weight: f64,

    /// Keep this many top keywords.
    pub keyword_cap: usize,
    /// Tokens must be strictly longer than this to count as words.
    pub min_token_len: usize,

    /// Hard cap on competitor targets per comparison.
    pub max_competitors: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_min_len: 30,
            title_max_len: 60,
            title_missing_penalty: 15,
            title_length_penalty: 5,

            description_min_len: 120,
            description_max_len: 160,
            description_missing_penalty: 15,
            description_length_penalty: 5,

            missing_h1_penalty: 10,
            multiple_h1_penalty: 5,

            image_alt_penalty: 2,
            image_alt_penalty_cap: 10,

            structured_data_penalty: 5,

            open_graph_required: 4,
            open_graph_penalty: 2,

            https_penalty: 10,

            thin_content_words: 300,
            thin_content_penalty: 20,
            short_content_words: 600,
            short_content_penalty: 10,

            readability_poor: 50,
            readability_poor_penalty: 15,
            readability_fair: 70,
            readability_fair_penalty: 5,

            technical_weight: 0.6,
            content_weight: 0.4,

            keyword_cap: 10,
            min_token_len: 3,

            max_competitors: 9,
        }
    }
}

impl ScoringConfig {
    pub fn is_stopword(&self, word: &str) -> bool {
        STOPWORDS.contains(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let cfg = ScoringConfig::default();
        assert!((cfg.technical_weight + cfg.content_weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stopwords_are_all_longer_than_min_token_len() {
        let cfg = ScoringConfig::default();
        for word in STOPWORDS {
            assert!(
                word.len() > cfg.min_token_len,
                "stopword {} would never survive the length filter",
                word
            );
        }
    }
}
