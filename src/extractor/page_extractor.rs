//! Technical signal extraction from raw markup.
//!
//! The extractor is total: any input, however malformed or truncated,
//! produces a fully-populated `TechnicalFindings`. Missing elements yield
//! defaults plus issue-seed strings; nothing in here returns an error.

use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

use crate::domain::models::{
    CanonicalFinding, DescriptionFinding, HeadingFindings, ImageFindings, LinkFindings,
    MetaTagFindings, OpenGraphFindings, RobotsDirective, StructuredDataFindings,
    TechnicalFindings, TitleFinding, TwitterCardFindings, ViewportFinding,
};

pub struct PageExtractor;

impl PageExtractor {
    /// Extract every structural signal from one page.
    ///
    /// The `robots_txt_exists` / `sitemap_exists` flags are left false here;
    /// the auditor fills them in from its origin probes.
    pub fn extract(html: &str, target: &Url) -> TechnicalFindings {
        let document = Html::parse_document(html);
        let meta = Self::collect_meta(&document);

        TechnicalFindings {
            meta_tags: MetaTagFindings {
                title: Self::extract_title(&document),
                description: Self::extract_description(&meta),
                canonical: Self::extract_canonical(&document, &meta),
                robots: Self::extract_robots(&meta),
                viewport: Self::extract_viewport(&meta),
            },
            open_graph: OpenGraphFindings {
                title: meta.contains_key("og:title"),
                description: meta.contains_key("og:description"),
                image: meta.contains_key("og:image"),
                url: meta.contains_key("og:url"),
                kind: meta.contains_key("og:type"),
                site_name: meta.contains_key("og:site_name"),
            },
            twitter_card: TwitterCardFindings {
                card: meta.contains_key("twitter:card"),
                title: meta.contains_key("twitter:title"),
                description: meta.contains_key("twitter:description"),
                image: meta.contains_key("twitter:image"),
            },
            headings: Self::extract_headings(&document),
            images: Self::extract_images(&document),
            links: Self::extract_links(&document, target),
            structured_data: Self::extract_structured_data(&document),
            https: target.scheme() == "https",
            robots_txt_exists: false,
            sitemap_exists: false,
        }
    }

    /// Gather all `<meta>` tags into a lowercased name/property → content
    /// map. This makes every later lookup case-insensitive and independent
    /// of attribute order; the first occurrence of a name wins.
    fn collect_meta(document: &Html) -> HashMap<String, String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta").unwrap());

        let mut map = HashMap::new();
        for element in document.select(selector) {
            let key = element
                .value()
                .attr("name")
                .or_else(|| element.value().attr("property"));
            let (Some(key), Some(content)) = (key, element.value().attr("content")) else {
                continue;
            };
            map.entry(key.trim().to_lowercase())
                .or_insert_with(|| content.trim().to_string());
        }
        map
    }

    fn extract_title(document: &Html) -> TitleFinding {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());

        let value = document
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let mut issues = Vec::new();
        let length = value.as_ref().map(|t| t.chars().count()).unwrap_or(0);
        match &value {
            None => issues.push("Missing title tag".to_string()),
            Some(_) if length < 30 => issues.push(format!(
                "Title is only {} characters (recommended 30-60)",
                length
            )),
            Some(_) if length > 60 => issues.push(format!(
                "Title is {} characters (recommended 30-60)",
                length
            )),
            Some(_) => {}
        }

        TitleFinding {
            value,
            length,
            issues,
        }
    }

    fn extract_description(meta: &HashMap<String, String>) -> DescriptionFinding {
        let value = meta
            .get("description")
            .filter(|s| !s.is_empty())
            .cloned();

        let mut issues = Vec::new();
        let length = value.as_ref().map(|d| d.chars().count()).unwrap_or(0);
        match &value {
            None => issues.push("Missing meta description".to_string()),
            Some(_) if length < 120 => issues.push(format!(
                "Meta description is only {} characters (recommended 120-160)",
                length
            )),
            Some(_) if length > 160 => issues.push(format!(
                "Meta description is {} characters (recommended 120-160)",
                length
            )),
            Some(_) => {}
        }

        DescriptionFinding {
            value,
            length,
            issues,
        }
    }

    /// Canonical URL: meta-style lookup first, then `<link rel="canonical">`.
    fn extract_canonical(document: &Html, meta: &HashMap<String, String>) -> CanonicalFinding {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("link[href]").unwrap());

        let value = meta
            .get("canonical")
            .filter(|s| !s.is_empty())
            .cloned()
            .or_else(|| {
                document
                    .select(selector)
                    .find(|el| {
                        el.value()
                            .attr("rel")
                            .map(|rel| rel.trim().eq_ignore_ascii_case("canonical"))
                            .unwrap_or(false)
                    })
                    .and_then(|el| el.value().attr("href"))
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            });

        CanonicalFinding {
            exists: value.is_some(),
            value,
        }
    }

    fn extract_robots(meta: &HashMap<String, String>) -> RobotsDirective {
        let value = meta.get("robots").cloned();
        let indexable = value
            .as_deref()
            .map(|v| !v.to_lowercase().contains("noindex"))
            .unwrap_or(true);
        RobotsDirective { value, indexable }
    }

    fn extract_viewport(meta: &HashMap<String, String>) -> ViewportFinding {
        let value = meta.get("viewport").cloned();
        ViewportFinding {
            exists: value.is_some(),
            value,
        }
    }

    fn extract_headings(document: &Html) -> HeadingFindings {
        static SELECTORS: OnceLock<Vec<Selector>> = OnceLock::new();
        let selectors = SELECTORS.get_or_init(|| {
            (1..=6)
                .map(|level| Selector::parse(&format!("h{}", level)).unwrap())
                .collect()
        });

        let mut counts = [0usize; 6];
        for (i, selector) in selectors.iter().enumerate() {
            counts[i] = document.select(selector).count();
        }

        // Nested tags inside the h1 are stripped by collecting text nodes.
        let h1_texts: Vec<String> = document
            .select(&selectors[0])
            .map(|el| {
                el.text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|t| !t.is_empty())
            .collect();

        // Valid when an h1 exists and no level is used while the one above
        // it is absent.
        let hierarchy_valid = counts[0] >= 1
            && (1..6).all(|level| counts[level] == 0 || counts[level - 1] > 0);

        HeadingFindings {
            counts,
            h1_texts,
            hierarchy_valid,
        }
    }

    fn extract_images(document: &Html) -> ImageFindings {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("img").unwrap());

        let mut total = 0;
        let mut with_alt = 0;
        for img in document.select(selector) {
            total += 1;
            let has_alt = img
                .value()
                .attr("alt")
                .map(|a| !a.trim().is_empty())
                .unwrap_or(false);
            if has_alt {
                with_alt += 1;
            }
        }

        ImageFindings {
            total,
            with_alt,
            without_alt: total - with_alt,
        }
    }

    fn extract_links(document: &Html, target: &Url) -> LinkFindings {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());

        let target_host = target.host_str();
        let mut findings = LinkFindings::default();

        for anchor in document.select(selector) {
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                continue;
            };

            if anchor
                .value()
                .attr("rel")
                .map(|rel| rel.to_lowercase().contains("nofollow"))
                .unwrap_or(false)
            {
                findings.nofollow += 1;
            }

            if Self::is_internal(href, target, target_host) {
                findings.internal += 1;
            } else {
                findings.external += 1;
            }
        }

        findings
    }

    /// Internal when the href is site-relative or resolves to the target's
    /// hostname. Malformed hrefs default to internal (fail-safe).
    fn is_internal(href: &str, target: &Url, target_host: Option<&str>) -> bool {
        if href.starts_with('/') || href.starts_with('#') {
            return true;
        }
        match Url::parse(href) {
            Ok(parsed) => parsed.host_str() == target_host,
            Err(url::ParseError::RelativeUrlWithoutBase) => match target.join(href) {
                Ok(joined) => joined.host_str() == target_host,
                Err(_) => true,
            },
            Err(_) => true,
        }
    }

    fn extract_structured_data(document: &Html) -> StructuredDataFindings {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("script[type]").unwrap());

        let mut present = false;
        let mut types = Vec::new();

        for script in document.select(selector) {
            let is_json_ld = script
                .value()
                .attr("type")
                .map(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
                .unwrap_or(false);
            if !is_json_ld {
                continue;
            }

            let raw = script.text().collect::<String>();
            // Invalid JSON-LD blocks are skipped; extraction continues.
            let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
                tracing::debug!("Skipping unparseable JSON-LD block");
                continue;
            };

            present = true;
            Self::collect_ld_types(&value, &mut types);
        }

        StructuredDataFindings { present, types }
    }

    fn collect_ld_types(value: &serde_json::Value, types: &mut Vec<String>) {
        match value {
            serde_json::Value::Array(items) => {
                for item in items {
                    Self::collect_ld_types(item, types);
                }
            }
            serde_json::Value::Object(map) => match map.get("@type") {
                Some(serde_json::Value::String(t)) => types.push(t.clone()),
                Some(serde_json::Value::Array(items)) => {
                    for item in items {
                        if let Some(t) = item.as_str() {
                            types.push(t.to_string());
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}
