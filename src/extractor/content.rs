//! Content analysis: visible text, keyword frequencies, readability.

use scraper::{ElementRef, Html};
use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::domain::models::{ContentFindings, KeywordEntry, ReadabilityLevel};

/// Elements whose text is never visible to a reader.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

pub struct ContentAnalyzer;

impl ContentAnalyzer {
    /// Analyze the page's visible text.
    ///
    /// Total like the signal extractor: any input yields a findings record,
    /// an empty page simply scores zero words.
    pub fn analyze(html: &str, config: &ScoringConfig) -> ContentFindings {
        let document = Html::parse_document(html);
        let text = Self::visible_text(&document);

        let tokens: Vec<String> = text
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|t| t.chars().count() > config.min_token_len)
            .collect();

        let word_count = tokens.len();
        let keywords = Self::rank_keywords(&tokens, word_count, config);
        let readability = Self::readability(&text, word_count);

        ContentFindings {
            word_count,
            keywords,
            readability,
            readability_level: ReadabilityLevel::from_score(readability),
        }
    }

    /// Collect text nodes, skipping script/style subtrees entirely.
    fn visible_text(document: &Html) -> String {
        let mut out = String::new();
        Self::collect_text(document.root_element(), &mut out);
        out
    }

    fn collect_text(element: ElementRef, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(trimmed);
                }
            } else if let Some(child_el) = ElementRef::wrap(child) {
                if !SKIPPED_ELEMENTS.contains(&child_el.value().name()) {
                    Self::collect_text(child_el, out);
                }
            }
        }
    }

    /// Top keywords by raw count, stopwords excluded. Density is a
    /// percentage of the total word count, rounded to two decimals.
    fn rank_keywords(
        tokens: &[String],
        word_count: usize,
        config: &ScoringConfig,
    ) -> Vec<KeywordEntry> {
        if word_count == 0 {
            return Vec::new();
        }

        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            if !config.is_stopword(token) {
                *frequencies.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = frequencies.into_iter().collect();
        // Alphabetical tie-break keeps the ranking deterministic.
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(config.keyword_cap);

        ranked
            .into_iter()
            .map(|(word, count)| KeywordEntry {
                word: word.to_string(),
                count,
                density: ((count as f64 / word_count as f64) * 100.0 * 100.0).round() / 100.0,
            })
            .collect()
    }

    /// Average-sentence-length readability, clamped to [0,100].
    fn readability(text: &str, word_count: usize) -> u8 {
        let sentences = text
            .split(['.', '!', '?'])
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count();

        let avg_sentence_len = word_count as f64 / sentences.max(1) as f64;
        (100.0 - (avg_sentence_len - 15.0) * 2.0).clamp(0.0, 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(html: &str) -> ContentFindings {
        ContentAnalyzer::analyze(html, &ScoringConfig::default())
    }

    #[test]
    fn empty_page_scores_zero_words() {
        let findings = analyze("");
        assert_eq!(findings.word_count, 0);
        assert!(findings.keywords.is_empty());
    }

    #[test]
    fn script_and_style_text_is_invisible() {
        let html = r#"
            <body>
                <p>Genuine visible paragraph content here.</p>
                <script>function invisible() { return "wordswordswords"; }</script>
                <style>.invisible { color: red; }</style>
            </body>
        "#;
        let findings = analyze(html);
        assert!(findings.word_count > 0);
        assert!(!findings.keywords.iter().any(|k| k.word.contains("invisible")));
        assert!(!findings.keywords.iter().any(|k| k.word.contains("color")));
    }

    #[test]
    fn short_tokens_and_stopwords_are_excluded_from_keywords() {
        let html = "<p>the cat sat on mats mats mats because that is that</p>";
        let findings = analyze(html);
        // Only "mats" (x3), "because" and "that" survive the length filter;
        // "because"/"that" are stopwords.
        assert_eq!(findings.keywords.len(), 1);
        assert_eq!(findings.keywords[0].word, "mats");
        assert_eq!(findings.keywords[0].count, 3);
    }

    #[test]
    fn punctuation_does_not_split_keyword_counts() {
        let html = "<p>clinic. clinic, clinic! treatment treatment</p>";
        let findings = analyze(html);
        assert_eq!(findings.keywords[0].word, "clinic");
        assert_eq!(findings.keywords[0].count, 3);
        assert_eq!(findings.keywords[1].word, "treatment");
        assert_eq!(findings.keywords[1].count, 2);
    }

    #[test]
    fn density_is_percentage_of_total_words_two_decimals() {
        // 3 "clinic" among 5 counted words
        let html = "<p>clinic clinic clinic treatment booking</p>";
        let findings = analyze(html);
        assert_eq!(findings.word_count, 5);
        assert_eq!(findings.keywords[0].density, 60.0);
        let treatment = findings
            .keywords
            .iter()
            .find(|k| k.word == "treatment")
            .unwrap();
        assert_eq!(treatment.density, 20.0);
    }

    #[test]
    fn keyword_list_is_capped_at_ten() {
        let words: String = (0..15)
            .map(|i| format!("keyword{:02} ", i).repeat(i + 1))
            .collect();
        let html = format!("<p>{}</p>", words);
        let findings = analyze(&html);
        assert_eq!(findings.keywords.len(), 10);
        // Highest counts first
        assert!(findings.keywords[0].count >= findings.keywords[9].count);
    }

    #[test]
    fn readability_of_short_sentences_is_easy() {
        // 2 sentences, 10 counted words -> avg 5 -> 100 - (5-15)*2 = 120 -> 100
        let html = "<p>Simple words make reading pleasant. Short sentences help readers considerably.</p>";
        let findings = analyze(html);
        assert_eq!(findings.readability, 100);
        assert_eq!(findings.readability_level, ReadabilityLevel::Easy);
    }

    #[test]
    fn readability_of_run_on_text_is_clamped_difficult() {
        // One endless sentence with 70 counted words
        let words = "overwhelmingly ".repeat(70);
        let html = format!("<p>{}</p>", words);
        let findings = analyze(&html);
        // avg 70 -> 100 - 110 = -10 -> clamped 0
        assert_eq!(findings.readability, 0);
        assert_eq!(findings.readability_level, ReadabilityLevel::Difficult);
    }

    #[test]
    fn zero_sentences_does_not_divide_by_zero() {
        let html = "<p>fragment without terminal punctuation</p>";
        let findings = analyze(html);
        // sentence splitter finds the single unterminated run
        assert!(findings.readability <= 100);
    }
}
