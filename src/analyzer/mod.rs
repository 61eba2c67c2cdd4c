pub mod issues;
pub mod scoring;

pub use issues::IssueDetector;
pub use scoring::ScoreCalculator;
