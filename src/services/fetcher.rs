use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::{configuration::CrawlerSettings, error::FetchError};

/// A single GET that fails on transport errors and non-2xx statuses.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> Result<String, FetchError>;
}

pub struct ReqwestGet {
    client: reqwest::Client,
}

impl ReqwestGet {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(ReqwestGet { client })
    }
}

#[async_trait]
impl HttpGet for ReqwestGet {
    async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let res = self
            .client
            .get(url)
            .headers(headers.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        res.text().await.map_err(transport)
    }
}

/// Fetches pages with a fixed number of attempts and keeps a copy of the
/// most recent successful body on disk.
pub struct Fetcher<C> {
    client: C,
    retries: u32,
    timeout: Duration,
    last_page_path: PathBuf,
}

impl<C: HttpGet> Fetcher<C> {
    pub fn new(client: C, settings: &CrawlerSettings) -> Self {
        Fetcher {
            client,
            retries: settings.retries,
            timeout: Duration::from_secs(settings.timeout_secs),
            last_page_path: settings.last_page_path.clone(),
        }
    }

    pub async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<String, FetchError> {
        for attempt in 1..=self.retries {
            log::info!("Fetching URL: {}, attempt {}", url, attempt);

            match self.client.get(url, headers, self.timeout).await {
                Ok(body) => {
                    self.save_last_page(&body).await;
                    return Ok(body);
                }
                Err(e) => log::warn!(
                    "Request failed for {}, retry {}/{}: {}",
                    url,
                    attempt,
                    self.retries,
                    e
                ),
            }
        }

        log::error!("Failed to fetch {} after {} retries.", url, self.retries);
        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts: self.retries,
        })
    }

    async fn save_last_page(&self, body: &str) {
        if let Err(e) = tokio::fs::write(&self.last_page_path, body).await {
            log::warn!(
                "Could not write last page to {}: {}",
                self.last_page_path.display(),
                e
            );
        }
    }
}
