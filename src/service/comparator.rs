//! Competitive comparison: the single-target pipeline fanned out over a
//! reference page and its competitors, reduced into per-dimension gaps.
//!
//! Fetches run sequentially to bound outbound concurrency toward arbitrary
//! third-party hosts. A comparison is always structurally complete: targets
//! that fail to fetch become zero-score placeholders instead of aborting
//! the batch.

use crate::domain::models::{AuditResult, CompetitorComparison, ScoreGap};
use crate::error::AuditError;
use crate::service::auditor::{AuditOptions, SiteAuditor};

/// Dimension accessors shared by averaging and gap emission.
const DIMENSIONS: &[(&str, fn(&AuditResult) -> u8)] = &[
    ("Overall", |r| r.scores.overall),
    ("Technical", |r| r.scores.technical),
    ("Content", |r| r.scores.content),
];

pub struct CompetitorComparator<'a> {
    auditor: &'a SiteAuditor,
}

impl<'a> CompetitorComparator<'a> {
    pub fn new(auditor: &'a SiteAuditor) -> Self {
        Self { auditor }
    }

    /// Audit the reference target and every competitor, then compute
    /// competitor averages, positive score gaps, and ranked opportunities.
    pub async fn compare(
        &self,
        your_url: &str,
        competitor_urls: &[String],
    ) -> CompetitorComparison {
        let cap = self.auditor.config().max_competitors;
        if competitor_urls.len() > cap {
            tracing::warn!(
                given = competitor_urls.len(),
                cap,
                "Too many competitor URLs, truncating"
            );
        }
        let competitor_urls = &competitor_urls[..competitor_urls.len().min(cap)];

        let reference_outcome = self.auditor.audit(your_url, AuditOptions::default()).await;

        let mut outcomes: Vec<Result<AuditResult, AuditError>> =
            Vec::with_capacity(competitor_urls.len());
        for url in competitor_urls {
            let outcome = self.auditor.audit(url, AuditOptions::default()).await;
            if let Err(e) = &outcome {
                tracing::warn!(%url, error = %e, "Competitor audit failed, using placeholder");
            }
            outcomes.push(outcome);
        }

        let reference_failed = reference_outcome.is_err();
        let reference = reference_outcome
            .unwrap_or_else(|_| AuditResult::zero_score_placeholder(your_url));

        let scored: Vec<&AuditResult> = outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().ok())
            .collect();

        let gaps = Self::score_gaps(&reference, &scored);
        let opportunities = Self::opportunities(&reference, &scored, reference_failed);

        // Placeholders keep their slot so output order matches input order.
        let competitors: Vec<AuditResult> = outcomes
            .into_iter()
            .zip(competitor_urls)
            .map(|(outcome, url)| {
                outcome.unwrap_or_else(|_| AuditResult::zero_score_placeholder(url.as_str()))
            })
            .collect();

        CompetitorComparison {
            reference,
            competitors,
            gaps,
            opportunities,
        }
    }

    /// Averages are taken over successfully scored competitors only; gaps
    /// are emitted only where the rounded deficit is positive.
    fn score_gaps(reference: &AuditResult, scored: &[&AuditResult]) -> Vec<ScoreGap> {
        if scored.is_empty() {
            return Vec::new();
        }

        DIMENSIONS
            .iter()
            .filter_map(|(area, score_of)| {
                let your_score = score_of(reference);
                let avg = scored.iter().map(|r| score_of(r) as f64).sum::<f64>()
                    / scored.len() as f64;
                let gap = (avg - your_score as f64).round();
                if gap <= 0.0 {
                    return None;
                }
                Some(ScoreGap {
                    area: area.to_string(),
                    your_score,
                    competitor_avg: (avg * 100.0).round() / 100.0,
                    gap: gap as u8,
                    recommendation: Self::gap_recommendation(area),
                })
            })
            .collect()
    }

    fn gap_recommendation(area: &str) -> String {
        match area {
            "Technical" => {
                "Close the technical gap first: fix meta tags, heading structure and HTTPS"
                    .to_string()
            }
            "Content" => {
                "Expand page content and improve readability to match competitor depth"
                    .to_string()
            }
            _ => "Work through the highest-severity issues to lift the overall score".to_string(),
        }
    }

    fn opportunities(
        reference: &AuditResult,
        scored: &[&AuditResult],
        reference_failed: bool,
    ) -> Vec<String> {
        if scored.is_empty() {
            return vec![
                "No competitor pages could be analyzed; fix the competitor URLs or retry later"
                    .to_string(),
            ];
        }

        let mut opportunities = Vec::new();

        if reference_failed {
            opportunities.push(
                "Your page could not be fetched and scored 0; competitor benchmarks below still apply"
                    .to_string(),
            );
        }

        let avg_overall = scored
            .iter()
            .map(|r| r.scores.overall as f64)
            .sum::<f64>()
            / scored.len() as f64;
        let yours = reference.scores.overall;

        if (yours as f64) > avg_overall {
            opportunities.push(format!(
                "Your overall score of {} beats the competitor average of {:.0}; defend the lead by fixing remaining issues",
                yours, avg_overall
            ));
        } else {
            opportunities.push(format!(
                "Raise your overall score by {:.0} points to match the competitor average of {:.0}",
                (avg_overall - yours as f64).round(),
                avg_overall
            ));
        }

        if let Some(best) = scored.iter().max_by_key(|r| r.scores.overall) {
            opportunities.push(format!(
                "Benchmark: {} leads the field with an overall score of {}",
                best.url, best.scores.overall
            ));
        }

        opportunities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ScoreBreakdown;

    fn scored_result(url: &str, overall: u8, technical: u8, content: u8) -> AuditResult {
        let mut result = AuditResult::zero_score_placeholder(url);
        result.scores = ScoreBreakdown {
            overall,
            technical,
            content,
            speed: None,
            local_seo: None,
        };
        result
    }

    #[test]
    fn gaps_are_positive_only_and_averaged_over_scored() {
        let reference = scored_result("https://you.example/", 70, 90, 40);
        let a = scored_result("https://a.example/", 80, 80, 80);
        let b = scored_result("https://b.example/", 90, 70, 90);
        let scored = vec![&a, &b];

        let gaps = CompetitorComparator::score_gaps(&reference, &scored);

        // Overall: avg 85 vs 70 -> gap 15. Technical: avg 75 vs 90 -> none.
        // Content: avg 85 vs 40 -> gap 45.
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].area, "Overall");
        assert_eq!(gaps[0].gap, 15);
        assert_eq!(gaps[0].competitor_avg, 85.0);
        assert_eq!(gaps[1].area, "Content");
        assert_eq!(gaps[1].gap, 45);
    }

    #[test]
    fn no_scored_competitors_means_no_gaps_one_explanation() {
        let reference = scored_result("https://you.example/", 70, 70, 70);
        let gaps = CompetitorComparator::score_gaps(&reference, &[]);
        assert!(gaps.is_empty());

        let opportunities = CompetitorComparator::opportunities(&reference, &[], false);
        assert_eq!(opportunities.len(), 1);
        assert!(opportunities[0].contains("No competitor pages"));
    }

    #[test]
    fn winning_reference_gets_affirmation_and_benchmark() {
        let reference = scored_result("https://you.example/", 95, 95, 95);
        let a = scored_result("https://a.example/", 60, 60, 60);
        let b = scored_result("https://b.example/", 80, 80, 80);
        let scored = vec![&a, &b];

        let opportunities = CompetitorComparator::opportunities(&reference, &scored, false);
        assert!(opportunities[0].contains("beats the competitor average"));
        assert!(opportunities
            .iter()
            .any(|o| o.contains("https://b.example/") && o.contains("80")));
    }

    #[test]
    fn trailing_reference_gets_numeric_gap_message() {
        let reference = scored_result("https://you.example/", 50, 50, 50);
        let a = scored_result("https://a.example/", 90, 90, 90);
        let scored = vec![&a];

        let opportunities = CompetitorComparator::opportunities(&reference, &scored, false);
        assert!(opportunities[0].contains("40 points"));
    }
}
