//! Origin resource probes for robots.txt and sitemap.xml.
//!
//! Probes are best-effort: a transport failure means "does not exist" and
//! is never surfaced to the caller as an error.

use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::Result;
use crate::service::http::{create_client, DEFAULT_TIMEOUT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceStatus {
    Found(String),
    Unauthorized(String),
    NotFound,
}

impl ResourceStatus {
    /// Unauthorized still means the resource exists, it is just protected.
    pub fn exists(&self) -> bool {
        matches!(
            self,
            ResourceStatus::Found(_) | ResourceStatus::Unauthorized(_)
        )
    }
}

pub struct ResourceChecker {
    client: Client,
}

impl ResourceChecker {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client(DEFAULT_TIMEOUT)?,
        })
    }

    pub async fn check_robots_txt(&self, base_url: &Url) -> ResourceStatus {
        tracing::debug!(%base_url, "Checking robots.txt");
        self.check_resource(base_url, "/robots.txt").await
    }

    pub async fn check_sitemap_xml(&self, base_url: &Url) -> ResourceStatus {
        tracing::debug!(%base_url, "Checking sitemap.xml");
        self.check_resource(base_url, "/sitemap.xml").await
    }

    async fn check_resource(&self, base_url: &Url, path: &str) -> ResourceStatus {
        let resource_url = match base_url.join(path) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(%base_url, path, error = %e, "Cannot build probe URL");
                return ResourceStatus::NotFound;
            }
        };

        let response = match self.client.get(resource_url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%resource_url, error = %e, "Probe failed, treating as absent");
                return ResourceStatus::NotFound;
            }
        };

        match response.status() {
            StatusCode::OK => {
                tracing::debug!(%resource_url, "Resource found");
                ResourceStatus::Found(resource_url.to_string())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!(%resource_url, "Resource protected");
                ResourceStatus::Unauthorized(resource_url.to_string())
            }
            status => {
                tracing::debug!(%resource_url, %status, "Resource not found");
                ResourceStatus::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exists_covers_found_and_unauthorized() {
        assert!(ResourceStatus::Found("u".into()).exists());
        assert!(ResourceStatus::Unauthorized("u".into()).exists());
        assert!(!ResourceStatus::NotFound.exists());
    }

    #[tokio::test]
    async fn robots_txt_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/robots.txt")
            .with_status(200)
            .with_body("User-agent: *\nDisallow:")
            .create_async()
            .await;

        let checker = ResourceChecker::new().unwrap();
        let base_url = Url::parse(&server.url()).unwrap();

        let status = checker.check_robots_txt(&base_url).await;
        assert!(matches!(status, ResourceStatus::Found(_)));
    }

    #[tokio::test]
    async fn sitemap_missing_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/sitemap.xml")
            .with_status(404)
            .create_async()
            .await;

        let checker = ResourceChecker::new().unwrap();
        let base_url = Url::parse(&server.url()).unwrap();

        let status = checker.check_sitemap_xml(&base_url).await;
        assert_eq!(status, ResourceStatus::NotFound);
    }

    #[tokio::test]
    async fn protected_resource_still_exists() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/robots.txt")
            .with_status(403)
            .create_async()
            .await;

        let checker = ResourceChecker::new().unwrap();
        let base_url = Url::parse(&server.url()).unwrap();

        let status = checker.check_robots_txt(&base_url).await;
        assert!(status.exists());
        assert!(matches!(status, ResourceStatus::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unreachable_origin_is_treated_as_absent() {
        // Nothing listens on this port; the probe must recover, not error.
        let base_url = Url::parse("http://127.0.0.1:1/").unwrap();
        let checker = ResourceChecker::new().unwrap();
        let status = checker.check_robots_txt(&base_url).await;
        assert_eq!(status, ResourceStatus::NotFound);
    }
}
