use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::{
    domain::section::strip_fragment,
    error::PipelineError,
    services::{extract_sections, Fetcher, HttpGet, Store},
};

/// The fixed set of User-Agent strings a crawl run picks from.
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl UserAgentPool {
    pub fn new(agents: Vec<String>) -> Self {
        UserAgentPool { agents }
    }

    /// A pool that always yields `agent`.
    pub fn fixed(agent: &str) -> Self {
        UserAgentPool {
            agents: vec![agent.to_string()],
        }
    }

    pub fn choose(&self) -> Option<&str> {
        self.agents
            .choose(&mut rand::thread_rng())
            .map(|agent| agent.as_str())
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match self.choose().map(HeaderValue::from_str) {
            Some(Ok(agent)) => {
                headers.insert(USER_AGENT, agent);
            }
            Some(Err(e)) => log::warn!("Ignoring unusable user agent: {}", e),
            None => log::warn!("No user agents configured, sending default headers"),
        }
        headers
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct CrawlReport {
    pub fetched: usize,
    pub skipped: usize,
    pub sections_saved: usize,
}

/// Runs fetch, extract and persist over a list of urls, one url at a time.
pub struct Crawler<C> {
    fetcher: Fetcher<C>,
    store: Store,
    user_agents: UserAgentPool,
}

impl<C: HttpGet> Crawler<C> {
    pub fn new(fetcher: Fetcher<C>, store: Store, user_agents: UserAgentPool) -> Self {
        Crawler {
            fetcher,
            store,
            user_agents,
        }
    }

    /// A url that cannot be fetched is skipped; a storage failure aborts the run.
    pub async fn run(&self, urls: &[String]) -> Result<CrawlReport, PipelineError> {
        self.store.ensure_schema().await?;

        let headers = self.user_agents.headers();
        let mut report = CrawlReport::default();

        for url in urls {
            log::info!("Crawling URL: {}", url);

            match self.fetcher.fetch(url, &headers).await {
                Ok(html) => {
                    report.fetched += 1;
                    let sections = extract_sections(&html, strip_fragment(url));
                    report.sections_saved += self.store.append(sections).await?;
                }
                Err(e) => {
                    report.skipped += 1;
                    log::warn!("Skipping URL: {} ({})", url, e);
                }
            }
        }

        log::info!(
            "Crawl finished: {} fetched, {} skipped, {} sections saved",
            report.fetched,
            report.skipped,
            report.sections_saved
        );
        Ok(report)
    }
}
