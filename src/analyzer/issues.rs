//! Rule-based issue detection.
//!
//! Each rule maps one signal condition to exactly one issue. The detector
//! is a pure re-derivation over the findings records; it never looks at
//! markup. Output ordering is a stable severity sort, so rerunning over the
//! same findings always yields an identical list.

use crate::config::ScoringConfig;
use crate::domain::models::{ContentFindings, Issue, Severity, TechnicalFindings};

pub struct IssueDetector<'a> {
    config: &'a ScoringConfig,
}

impl<'a> IssueDetector<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Derive the ordered issue list. An empty result means every check
    /// passed, not that detection was skipped.
    pub fn detect(&self, technical: &TechnicalFindings, content: &ContentFindings) -> Vec<Issue> {
        let cfg = self.config;
        let mut issues = Vec::new();

        let title = &technical.meta_tags.title;
        match &title.value {
            None => issues.push(Self::issue(
                "missing-title",
                "Missing Title Tag",
                "Page has no title tag",
                Severity::Critical,
                "Meta Tags",
                "Add a unique, descriptive title of 30-60 characters",
            )),
            Some(_) if title.length < cfg.title_min_len => issues.push(Self::issue(
                "title-too-short",
                "Title Too Short",
                &format!(
                    "Title is only {} characters (recommended {}-{})",
                    title.length, cfg.title_min_len, cfg.title_max_len
                ),
                Severity::Warning,
                "Meta Tags",
                "Expand the title with the page's main keyword",
            )),
            Some(_) if title.length > cfg.title_max_len => issues.push(Self::issue(
                "title-too-long",
                "Title Too Long",
                &format!(
                    "Title is {} characters (recommended {}-{})",
                    title.length, cfg.title_min_len, cfg.title_max_len
                ),
                Severity::Info,
                "Meta Tags",
                "Shorten the title so it displays fully in search results",
            )),
            Some(_) => {}
        }

        let description = &technical.meta_tags.description;
        match &description.value {
            None => issues.push(Self::issue(
                "missing-description",
                "Missing Meta Description",
                "Page has no meta description",
                Severity::Critical,
                "Meta Tags",
                "Add a compelling meta description of 120-160 characters",
            )),
            Some(_) if description.length < cfg.description_min_len => issues.push(Self::issue(
                "description-too-short",
                "Meta Description Too Short",
                &format!(
                    "Meta description is only {} characters (recommended {}-{})",
                    description.length, cfg.description_min_len, cfg.description_max_len
                ),
                Severity::Warning,
                "Meta Tags",
                "Expand the description with a call to action",
            )),
            Some(_) if description.length > cfg.description_max_len => issues.push(Self::issue(
                "description-too-long",
                "Meta Description Too Long",
                &format!(
                    "Meta description is {} characters (recommended {}-{})",
                    description.length, cfg.description_min_len, cfg.description_max_len
                ),
                Severity::Info,
                "Meta Tags",
                "Shorten the description to prevent truncation in results",
            )),
            Some(_) => {}
        }

        match technical.headings.h1_count() {
            0 => issues.push(Self::issue(
                "missing-h1",
                "Missing H1 Tag",
                "Page has no H1 heading",
                Severity::Critical,
                "Headings",
                "Add one H1 tag with the main keyword near the top",
            )),
            1 => {}
            n => issues.push(Self::issue(
                "multiple-h1",
                "Multiple H1 Tags",
                &format!("Page has {} H1 tags", n),
                Severity::Warning,
                "Headings",
                "Use a single H1 per page for clear semantic structure",
            )),
        }

        let without_alt = technical.images.without_alt;
        if without_alt > 0 {
            let severity = if without_alt > 2 {
                Severity::Critical
            } else {
                Severity::Warning
            };
            issues.push(Self::issue(
                "images-missing-alt",
                "Images Missing Alt Text",
                &format!(
                    "{} of {} images lack alt text",
                    without_alt, technical.images.total
                ),
                severity,
                "Images",
                "Add descriptive alt text for accessibility and indexing",
            ));
        }

        if !technical.https {
            issues.push(Self::issue(
                "missing-https",
                "Not Served Over HTTPS",
                "Page is served over plain HTTP",
                Severity::Critical,
                "Security",
                "Install a TLS certificate and redirect HTTP traffic",
            ));
        }

        if !technical.structured_data.present {
            issues.push(Self::issue(
                "missing-structured-data",
                "No Structured Data",
                "Page has no JSON-LD structured data",
                Severity::Warning,
                "Structured Data",
                "Add schema.org markup describing the page's entity",
            ));
        }

        if !technical.meta_tags.canonical.exists {
            issues.push(Self::issue(
                "missing-canonical",
                "Missing Canonical Tag",
                "Page has no canonical URL specified",
                Severity::Warning,
                "Indexing",
                "Add a canonical link to prevent duplicate-content dilution",
            ));
        }

        if !technical.sitemap_exists {
            issues.push(Self::issue(
                "missing-sitemap",
                "No Sitemap Found",
                "No sitemap.xml was found at the site's origin",
                Severity::Warning,
                "Indexing",
                "Publish a sitemap.xml and reference it from robots.txt",
            ));
        }

        let og_present = technical.open_graph.present_count();
        if og_present < cfg.open_graph_required {
            issues.push(Self::issue(
                "incomplete-open-graph",
                "Incomplete Open Graph Tags",
                &format!(
                    "Only {} of 6 Open Graph fields are populated",
                    og_present
                ),
                Severity::Info,
                "Social",
                "Add og:title, og:description, og:image and og:url at minimum",
            ));
        }

        if content.word_count < cfg.thin_content_words {
            issues.push(Self::issue(
                "thin-content",
                "Thin Content",
                &format!(
                    "Page has only {} words (recommended at least {})",
                    content.word_count, cfg.thin_content_words
                ),
                Severity::Warning,
                "Content",
                "Add comprehensive content covering the page's topic",
            ));
        }

        // Stable sort: criticals first, detection order preserved within a
        // severity.
        issues.sort_by_key(|issue| issue.severity.rank());
        issues
    }

    fn issue(
        id: &str,
        title: &str,
        description: &str,
        severity: Severity,
        category: &str,
        fix: &str,
    ) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            severity,
            category: category.to_string(),
            fix: Some(fix.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        HeadingFindings, ImageFindings, OpenGraphFindings, ReadabilityLevel,
        StructuredDataFindings,
    };

    fn clean_technical() -> TechnicalFindings {
        let mut findings = TechnicalFindings::default();
        findings.meta_tags.title.value = Some("A perfectly measured title for this test page".into());
        findings.meta_tags.title.length = 45;
        findings.meta_tags.description.value = Some("d".repeat(140));
        findings.meta_tags.description.length = 140;
        findings.meta_tags.canonical.exists = true;
        findings.headings = HeadingFindings {
            counts: [1, 1, 0, 0, 0, 0],
            h1_texts: vec!["Heading".into()],
            hierarchy_valid: true,
        };
        findings.structured_data = StructuredDataFindings {
            present: true,
            types: vec!["MedicalClinic".into()],
        };
        findings.open_graph = OpenGraphFindings {
            title: true,
            description: true,
            image: true,
            url: true,
            kind: true,
            site_name: true,
        };
        findings.https = true;
        findings.sitemap_exists = true;
        findings.robots_txt_exists = true;
        findings
    }

    fn clean_content() -> ContentFindings {
        ContentFindings {
            word_count: 650,
            keywords: Vec::new(),
            readability: 75,
            readability_level: ReadabilityLevel::Moderate,
        }
    }

    fn detect(technical: &TechnicalFindings, content: &ContentFindings) -> Vec<Issue> {
        let config = ScoringConfig::default();
        IssueDetector::new(&config).detect(technical, content)
    }

    #[test]
    fn clean_page_passes_all_checks() {
        let issues = detect(&clean_technical(), &clean_content());
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn short_title_and_missing_description_detected() {
        let mut technical = clean_technical();
        technical.meta_tags.title.value = Some("Great ENT Care".into());
        technical.meta_tags.title.length = 14;
        technical.meta_tags.description = Default::default();

        let issues = detect(&technical, &clean_content());
        let short_title = issues.iter().find(|i| i.id == "title-too-short").unwrap();
        assert_eq!(short_title.severity, Severity::Warning);
        assert!(short_title.description.contains("only 14 characters"));

        let missing_desc = issues.iter().find(|i| i.id == "missing-description").unwrap();
        assert_eq!(missing_desc.severity, Severity::Critical);
    }

    #[test]
    fn image_alt_severity_escalates_past_two() {
        let mut technical = clean_technical();

        technical.images = ImageFindings { total: 5, with_alt: 5, without_alt: 0 };
        assert!(!detect(&technical, &clean_content())
            .iter()
            .any(|i| i.id == "images-missing-alt"));

        technical.images = ImageFindings { total: 5, with_alt: 3, without_alt: 2 };
        let issues = detect(&technical, &clean_content());
        let alt = issues.iter().find(|i| i.id == "images-missing-alt").unwrap();
        assert_eq!(alt.severity, Severity::Warning);

        technical.images = ImageFindings { total: 5, with_alt: 2, without_alt: 3 };
        let issues = detect(&technical, &clean_content());
        let alt = issues.iter().find(|i| i.id == "images-missing-alt").unwrap();
        assert_eq!(alt.severity, Severity::Critical);
        assert!(alt.description.contains("3 of 5"));
    }

    #[test]
    fn broken_page_sorts_criticals_before_warnings_before_infos() {
        // Missing title, description, h1, HTTP only, thin content.
        let technical = TechnicalFindings::default();
        let content = ContentFindings {
            word_count: 100,
            keywords: Vec::new(),
            readability: 90,
            readability_level: ReadabilityLevel::Easy,
        };

        let issues = detect(&technical, &content);
        let criticals = issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .count();
        assert!(criticals >= 4, "expected at least 4 criticals: {:?}", issues);

        let ranks: Vec<u8> = issues.iter().map(|i| i.severity.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted, "issues must be severity-ordered");
    }

    #[test]
    fn detection_is_idempotent() {
        let mut technical = clean_technical();
        technical.meta_tags.canonical.exists = false;
        technical.sitemap_exists = false;
        technical.open_graph = OpenGraphFindings::default();
        let content = ContentFindings {
            word_count: 150,
            ..clean_content()
        };

        let config = ScoringConfig::default();
        let detector = IssueDetector::new(&config);
        let first = detector.detect(&technical, &content);
        let second = detector.detect(&technical, &content);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.severity, b.severity);
            assert_eq!(a.description, b.description);
        }
    }

    #[test]
    fn warning_ties_preserve_detection_order() {
        let mut technical = clean_technical();
        technical.meta_tags.canonical.exists = false;
        technical.sitemap_exists = false;
        technical.structured_data.present = false;

        let issues = detect(&technical, &clean_content());
        let warning_ids: Vec<&str> = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(
            warning_ids,
            vec!["missing-structured-data", "missing-canonical", "missing-sitemap"]
        );
    }

    #[test]
    fn incomplete_open_graph_is_informational() {
        let mut technical = clean_technical();
        technical.open_graph = OpenGraphFindings {
            title: true,
            description: true,
            image: true,
            url: false,
            kind: false,
            site_name: false,
        };
        let issues = detect(&technical, &clean_content());
        let og = issues.iter().find(|i| i.id == "incomplete-open-graph").unwrap();
        assert_eq!(og.severity, Severity::Info);
        assert!(og.description.contains("3 of 6"));
    }
}
