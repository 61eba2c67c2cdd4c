//! Domain entities exchanged across the audit pipeline.
//!
//! Everything here is an immutable value object: findings are produced once
//! per audit, scores and issues are pure derivations over them, and the
//! assembled `AuditResult` is the unit handed to external collaborators
//! (dashboards, persistence, recommendation generators).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Fetch snapshot ======

/// Raw markup of a target plus what the transport observed.
///
/// Created once per audit and discarded after extraction.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub url: String,
    pub status: u16,
    pub body: String,
}

// ====== Technical findings ======

/// Title tag observation. `issues` carries length-based seed strings so the
/// issue detector never re-parses markup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleFinding {
    pub value: Option<String>,
    pub length: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptionFinding {
    pub value: Option<String>,
    pub length: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalFinding {
    pub exists: bool,
    pub value: Option<String>,
}

/// Robots meta directive. `indexable` is false only when the directive
/// contains `noindex`; absence of the tag means crawlable by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotsDirective {
    pub value: Option<String>,
    pub indexable: bool,
}

impl Default for RobotsDirective {
    fn default() -> Self {
        Self {
            value: None,
            indexable: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewportFinding {
    pub exists: bool,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaTagFindings {
    pub title: TitleFinding,
    pub description: DescriptionFinding,
    pub canonical: CanonicalFinding,
    pub robots: RobotsDirective,
    pub viewport: ViewportFinding,
}

/// Presence flags for the six Open Graph fields the engine inspects.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OpenGraphFindings {
    pub title: bool,
    pub description: bool,
    pub image: bool,
    pub url: bool,
    pub kind: bool,
    pub site_name: bool,
}

impl OpenGraphFindings {
    pub fn present_count(&self) -> usize {
        [
            self.title,
            self.description,
            self.image,
            self.url,
            self.kind,
            self.site_name,
        ]
        .iter()
        .filter(|&&b| b)
        .count()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TwitterCardFindings {
    pub card: bool,
    pub title: bool,
    pub description: bool,
    pub image: bool,
}

impl TwitterCardFindings {
    pub fn present_count(&self) -> usize {
        [self.card, self.title, self.description, self.image]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

/// Heading structure. `counts[0]` is the h1 count through `counts[5]` for h6.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadingFindings {
    pub counts: [usize; 6],
    pub h1_texts: Vec<String>,
    pub hierarchy_valid: bool,
}

impl HeadingFindings {
    pub fn h1_count(&self) -> usize {
        self.counts[0]
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImageFindings {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LinkFindings {
    pub internal: usize,
    pub external: usize,
    pub nofollow: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredDataFindings {
    pub present: bool,
    pub types: Vec<String>,
}

/// Every structural/technical signal extracted from one page.
///
/// Each sub-record defaults cleanly, so a page missing any or all expected
/// tags still yields a fully-populated record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalFindings {
    pub meta_tags: MetaTagFindings,
    pub open_graph: OpenGraphFindings,
    pub twitter_card: TwitterCardFindings,
    pub headings: HeadingFindings,
    pub images: ImageFindings,
    pub links: LinkFindings,
    pub structured_data: StructuredDataFindings,
    pub https: bool,
    pub robots_txt_exists: bool,
    pub sitemap_exists: bool,
}

// ====== Content findings ======

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordEntry {
    pub word: String,
    pub count: usize,
    /// Percentage of total word count, rounded to two decimals.
    pub density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    Easy,
    Moderate,
    Difficult,
}

impl ReadabilityLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ReadabilityLevel::Easy
        } else if score >= 60 {
            ReadabilityLevel::Moderate
        } else {
            ReadabilityLevel::Difficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadabilityLevel::Easy => "Easy",
            ReadabilityLevel::Moderate => "Moderate",
            ReadabilityLevel::Difficult => "Difficult",
        }
    }
}

impl Default for ReadabilityLevel {
    fn default() -> Self {
        ReadabilityLevel::Difficult
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentFindings {
    pub word_count: usize,
    pub keywords: Vec<KeywordEntry>,
    pub readability: u8,
    pub readability_level: ReadabilityLevel,
}

// ====== Scores ======

/// Per-dimension scores, all integers in [0,100].
///
/// `overall` is always `round(0.6*technical + 0.4*content)`; the speed and
/// local dimensions are supplied by external collaborators and are never
/// blended into it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: u8,
    pub technical: u8,
    pub content: u8,
    pub speed: Option<u8>,
    pub local_seo: Option<u8>,
}

impl ScoreBreakdown {
    /// Equal-weight mean over every present dimension.
    ///
    /// This is the explicitly named 4-dimension blend; `overall` keeps its
    /// documented two-dimension meaning regardless of what is attached.
    pub fn composite(&self) -> u8 {
        let mut sum = self.technical as u32 + self.content as u32;
        let mut n = 2u32;
        if let Some(speed) = self.speed {
            sum += speed as u32;
            n += 1;
        }
        if let Some(local) = self.local_seo {
            sum += local as u32;
            n += 1;
        }
        ((sum as f64 / n as f64).round() as u32).min(100) as u8
    }
}

// ====== Issues ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Sort rank: critical(0) < warning(1) < info(2).
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A detected deviation from a best-practice rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Stable identifier, e.g. `missing-title`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: String,
    pub fix: Option<String>,
}

// ====== Collaborator-supplied findings ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalRating {
    Good,
    NeedsImprovement,
    Poor,
}

impl VitalRating {
    /// Largest Contentful Paint, milliseconds. Good ≤ 2500, poor > 4000.
    pub fn for_lcp(ms: f64) -> Self {
        if ms <= 2500.0 {
            VitalRating::Good
        } else if ms > 4000.0 {
            VitalRating::Poor
        } else {
            VitalRating::NeedsImprovement
        }
    }

    /// Interaction to Next Paint, milliseconds. Good ≤ 200, poor > 500.
    pub fn for_inp(ms: f64) -> Self {
        if ms <= 200.0 {
            VitalRating::Good
        } else if ms > 500.0 {
            VitalRating::Poor
        } else {
            VitalRating::NeedsImprovement
        }
    }

    /// Cumulative Layout Shift, unitless. Good ≤ 0.1, poor > 0.25.
    pub fn for_cls(value: f64) -> Self {
        if value <= 0.1 {
            VitalRating::Good
        } else if value > 0.25 {
            VitalRating::Poor
        } else {
            VitalRating::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CoreWebVitals {
    pub lcp_ms: Option<f64>,
    pub inp_ms: Option<f64>,
    pub cls: Option<f64>,
}

impl CoreWebVitals {
    pub fn lcp_rating(&self) -> Option<VitalRating> {
        self.lcp_ms.map(VitalRating::for_lcp)
    }

    pub fn inp_rating(&self) -> Option<VitalRating> {
        self.inp_ms.map(VitalRating::for_inp)
    }

    pub fn cls_rating(&self) -> Option<VitalRating> {
        self.cls.map(VitalRating::for_cls)
    }
}

/// Page-performance record supplied by an external speed collaborator.
/// The engine stores and surfaces this; it never computes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeedFindings {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
    pub vitals: CoreWebVitals,
    pub opportunities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub name: String,
    pub listed: bool,
}

/// Name/Address/Phone consistency flags across external directories.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NapConsistency {
    pub name: bool,
    pub address: bool,
    pub phone: bool,
}

/// Local-presence record supplied by an external directory collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalFindings {
    pub directories: Vec<DirectoryListing>,
    pub nap: NapConsistency,
    pub local_score: u8,
}

/// One prioritized remediation record returned by the recommendation
/// collaborator. Field names follow the collaborator's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub how_to_fix: String,
    pub estimated_impact: String,
}

// ====== Audit result ======

/// The complete outcome of one single-target audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    pub url: String,
    pub audited_at: DateTime<Utc>,
    pub technical: TechnicalFindings,
    pub content: ContentFindings,
    pub scores: ScoreBreakdown,
    pub issues: Vec<Issue>,
    pub speed: Option<SpeedFindings>,
    pub local: Option<LocalFindings>,
}

impl AuditResult {
    /// An empty issue list is a distinct "all checks passed" state, not an
    /// accident of filtering.
    pub fn all_checks_passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Substitute record for a target that could not be fetched inside a
    /// comparison batch. All dimension scores are exactly zero, which is
    /// also how callers can tell a placeholder from a scored page.
    pub fn zero_score_placeholder(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            audited_at: Utc::now(),
            technical: TechnicalFindings::default(),
            content: ContentFindings::default(),
            scores: ScoreBreakdown::default(),
            issues: Vec::new(),
            speed: None,
            local: None,
        }
    }

    pub fn is_zero_score_placeholder(&self) -> bool {
        self.scores.overall == 0 && self.scores.technical == 0 && self.scores.content == 0
    }
}

// ====== Competitive comparison ======

/// A per-dimension deficit relative to the competitor average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreGap {
    pub area: String,
    pub your_score: u8,
    pub competitor_avg: f64,
    pub gap: u8,
    pub recommendation: String,
}

/// Outcome of auditing a reference target against its competitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorComparison {
    pub reference: AuditResult,
    pub competitors: Vec<AuditResult>,
    pub gaps: Vec<ScoreGap>,
    pub opportunities: Vec<String>,
}
