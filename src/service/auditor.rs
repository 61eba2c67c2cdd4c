//! Single-target audit orchestration.
//!
//! One URL in, one `AuditResult` out: fetch the markup, extract technical
//! and content findings, probe the origin for robots.txt/sitemap.xml,
//! score, detect issues, assemble. Only transport-level failure is an
//! error; malformed markup always audits.

use chrono::Utc;
use url::Url;

use crate::analyzer::{IssueDetector, ScoreCalculator};
use crate::config::ScoringConfig;
use crate::domain::models::{AuditResult, LocalFindings, SpeedFindings};
use crate::error::Result;
use crate::extractor::{ContentAnalyzer, PageExtractor};
use crate::service::fetcher::{HttpFetcher, PageFetcher};
use crate::service::probes::ResourceChecker;

/// Pre-computed dimension findings supplied by external collaborators.
/// The auditor attaches them; it never derives them.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    pub speed: Option<SpeedFindings>,
    pub local: Option<LocalFindings>,
}

pub struct SiteAuditor {
    fetcher: Box<dyn PageFetcher>,
    checker: ResourceChecker,
    config: ScoringConfig,
}

impl SiteAuditor {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Box::new(HttpFetcher::new()?),
            checker: ResourceChecker::new()?,
            config,
        })
    }

    pub fn with_fetcher(fetcher: Box<dyn PageFetcher>, config: ScoringConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            checker: ResourceChecker::new()?,
            config,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Audit a single target.
    ///
    /// Fails only for an invalid URL or a failed page fetch; the origin
    /// probes recover locally and malformed markup never errors.
    pub async fn audit(&self, url: &str, options: AuditOptions) -> Result<AuditResult> {
        let target = Url::parse(url)?;
        tracing::info!(%target, "Starting audit");

        let snapshot = self.fetcher.fetch(&target).await?;

        let mut technical = PageExtractor::extract(&snapshot.body, &target);
        technical.robots_txt_exists = self.checker.check_robots_txt(&target).await.exists();
        technical.sitemap_exists = self.checker.check_sitemap_xml(&target).await.exists();

        let content = ContentAnalyzer::analyze(&snapshot.body, &self.config);

        let mut scores = ScoreCalculator::new(&self.config).calculate(&technical, &content);
        scores.speed = options.speed.as_ref().map(|s| s.performance);
        scores.local_seo = options.local.as_ref().map(|l| l.local_score);

        let issues = IssueDetector::new(&self.config).detect(&technical, &content);

        tracing::info!(
            %target,
            overall = scores.overall,
            technical = scores.technical,
            content = scores.content,
            issues = issues.len(),
            "Audit complete"
        );

        Ok(AuditResult {
            url: target.to_string(),
            audited_at: Utc::now(),
            technical,
            content,
            scores,
            issues,
            speed: options.speed,
            local: options.local,
        })
    }
}
