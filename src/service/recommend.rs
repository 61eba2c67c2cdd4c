//! Recommendation-collaborator boundary.
//!
//! Free-text recommendation generation happens in an external collaborator
//! (typically a language-model service). This module owns the boundary:
//! building the prompt from an `AuditResult`, parsing whatever the
//! collaborator returns, and degrading to a single generic recommendation
//! when the collaborator fails or returns something unusable.

use async_trait::async_trait;

use crate::domain::models::{AuditResult, Recommendation};
use crate::error::Result;

#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Produce raw collaborator output for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Assemble the collaborator prompt from audit figures.
pub fn build_prompt(audit: &AuditResult) -> String {
    let top_issues: Vec<String> = audit
        .issues
        .iter()
        .take(5)
        .map(|i| format!("- [{}] {}: {}", i.severity.as_str(), i.title, i.description))
        .collect();

    format!(
        "You are an SEO consultant. Return a JSON array of recommendation \
         objects with fields priority, category, title, description, \
         howToFix, estimatedImpact.\n\n\
         Website: {url}\n\
         Overall score: {overall}/100\n\
         Technical score: {technical}/100\n\
         Content score: {content}/100\n\
         Word count: {words}\n\
         Top issues:\n{issues}",
        url = audit.url,
        overall = audit.scores.overall,
        technical = audit.scores.technical,
        content = audit.scores.content,
        words = audit.content.word_count,
        issues = top_issues.join("\n"),
    )
}

/// Generate prioritized recommendations for an audit.
///
/// Collaborator errors and unparseable output both degrade to the single
/// generic fallback; this never fails the audit itself.
pub async fn generate_recommendations(
    provider: &dyn RecommendationProvider,
    audit: &AuditResult,
) -> Vec<Recommendation> {
    let prompt = build_prompt(audit);

    match provider.generate(&prompt).await {
        Ok(raw) => parse_recommendations(&raw).unwrap_or_else(|| {
            tracing::warn!("Unparseable recommendation output, using fallback");
            vec![generic_fallback(audit)]
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Recommendation provider failed, using fallback");
            vec![generic_fallback(audit)]
        }
    }
}

/// Parse collaborator output: either a bare JSON array of records or a
/// `{"recommendations": [...]}` envelope. Returns None when neither form
/// yields a non-empty list.
pub fn parse_recommendations(raw: &str) -> Option<Vec<Recommendation>> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;

    let records = match &value {
        serde_json::Value::Array(_) => value.clone(),
        serde_json::Value::Object(map) => map.get("recommendations")?.clone(),
        _ => return None,
    };

    let parsed: Vec<Recommendation> = serde_json::from_value(records).ok()?;
    if parsed.is_empty() {
        None
    } else {
        Some(parsed)
    }
}

fn generic_fallback(audit: &AuditResult) -> Recommendation {
    Recommendation {
        priority: "high".to_string(),
        category: "General".to_string(),
        title: "Work through the detected issues in severity order".to_string(),
        description: format!(
            "The audit of {} found {} issues and an overall score of {}/100. \
             Detailed recommendations are unavailable right now.",
            audit.url,
            audit.issues.len(),
            audit.scores.overall
        ),
        how_to_fix: "Start with the critical issues in the audit report, then re-run the audit"
            .to_string(),
        estimated_impact: "varies".to_string(),
    }
}
