//! Search-discoverability audit and scoring engine.
//!
//! One URL in, one [`domain::models::AuditResult`] out: technical and
//! content findings, deterministic 0-100 dimension scores, and a
//! severity-ranked issue list. The comparator runs the same pipeline over
//! a reference target and its competitors and reduces the results into
//! score gaps and opportunities.

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod service;
