//! Dimension score calculation.
//!
//! A pure weighted-penalty model: both dimensions start at 100, fixed
//! deductions apply per finding, and everything clamps to [0,100]. The
//! overall score is a weighted blend of the two computed dimensions only;
//! collaborator-supplied speed/local scores ride along untouched.

use crate::config::ScoringConfig;
use crate::domain::models::{ContentFindings, ScoreBreakdown, TechnicalFindings};

pub struct ScoreCalculator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        technical: &TechnicalFindings,
        content: &ContentFindings,
    ) -> ScoreBreakdown {
        let technical_score = self.technical_score(technical);
        let content_score = self.content_score(content);

        ScoreBreakdown {
            overall: self.overall_score(technical_score, content_score),
            technical: technical_score,
            content: content_score,
            speed: None,
            local_seo: None,
        }
    }

    fn technical_score(&self, findings: &TechnicalFindings) -> u8 {
        let cfg = self.config;
        let mut penalty: u32 = 0;

        let title = &findings.meta_tags.title;
        if title.value.is_none() {
            penalty += cfg.title_missing_penalty;
        } else if title.length < cfg.title_min_len || title.length > cfg.title_max_len {
            penalty += cfg.title_length_penalty;
        }

        let description = &findings.meta_tags.description;
        if description.value.is_none() {
            penalty += cfg.description_missing_penalty;
        } else if description.length < cfg.description_min_len
            || description.length > cfg.description_max_len
        {
            penalty += cfg.description_length_penalty;
        }

        match findings.headings.h1_count() {
            0 => penalty += cfg.missing_h1_penalty,
            1 => {}
            _ => penalty += cfg.multiple_h1_penalty,
        }

        penalty += (findings.images.without_alt as u32 * cfg.image_alt_penalty)
            .min(cfg.image_alt_penalty_cap);

        if !findings.structured_data.present {
            penalty += cfg.structured_data_penalty;
        }

        let og_present = findings.open_graph.present_count();
        if og_present < cfg.open_graph_required {
            penalty += (cfg.open_graph_required - og_present) as u32 * cfg.open_graph_penalty;
        }

        if !findings.https {
            penalty += cfg.https_penalty;
        }

        Self::clamp(penalty)
    }

    fn content_score(&self, findings: &ContentFindings) -> u8 {
        let cfg = self.config;
        let mut penalty: u32 = 0;

        if findings.word_count < cfg.thin_content_words {
            penalty += cfg.thin_content_penalty;
        } else if findings.word_count < cfg.short_content_words {
            penalty += cfg.short_content_penalty;
        }

        if findings.readability < cfg.readability_poor {
            penalty += cfg.readability_poor_penalty;
        } else if findings.readability < cfg.readability_fair {
            penalty += cfg.readability_fair_penalty;
        }

        Self::clamp(penalty)
    }

    fn overall_score(&self, technical: u8, content: u8) -> u8 {
        let blended = self.config.technical_weight * technical as f64
            + self.config.content_weight * content as f64;
        (blended.round() as i64).clamp(0, 100) as u8
    }

    fn clamp(penalty: u32) -> u8 {
        (100i64 - penalty as i64).clamp(0, 100) as u8
    }
}
