//! Page-fetch boundary.
//!
//! The auditor talks to the network through `PageFetcher`, so transport
//! concerns stay swappable. The HTTP implementation treats any non-2xx
//! status the same as a transport error: there is no partial audit of an
//! error page.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::models::PageSnapshot;
use crate::error::{AuditError, Result};
use crate::service::http::{create_client, DEFAULT_TIMEOUT};

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the target's markup. Errors are always `FetchFailed`.
    async fn fetch(&self, url: &Url) -> Result<PageSnapshot>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client(DEFAULT_TIMEOUT)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<PageSnapshot> {
        tracing::debug!(%url, "Fetching page");
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| AuditError::fetch(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::fetch(
                url.as_str(),
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AuditError::fetch(url.as_str(), e.to_string()))?;

        tracing::debug!(%url, bytes = body.len(), "Fetched page body");

        Ok(PageSnapshot {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
