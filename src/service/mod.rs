pub mod auditor;
pub mod comparator;
pub mod fetcher;
pub mod http;
pub mod probes;
pub mod recommend;

pub use auditor::{AuditOptions, SiteAuditor};
pub use comparator::CompetitorComparator;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use probes::{ResourceChecker, ResourceStatus};
pub use recommend::{generate_recommendations, RecommendationProvider};
