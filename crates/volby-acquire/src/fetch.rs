use std::time::Duration;

use scraper::Html;
use thiserror::Error;

/// Desktop browser identification sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Fixed request settings shared by every fetch in a run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A fetched page: the raw body and its parsed document.
pub struct Page {
    pub body: String,
    pub document: Html,
}

/// Single-attempt HTTP GET client.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch and parse a page.
    ///
    /// Transport errors, timeouts and non-2xx responses are logged and
    /// reported as `None`; nothing is retried.
    pub async fn fetch(&self, url: &str) -> Option<Page> {
        match self.fetch_body(url).await {
            Ok(body) => {
                tracing::debug!(url = %url, bytes = body.len(), "Received HTML");
                let document = Html::parse_document(&body);
                Some(Page { body, document })
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to load URL");
                None
            }
        }
    }

    /// Fetch the response body, surfacing the failure reason.
    pub async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
