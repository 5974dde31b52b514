use thiserror::Error;

/// Failures while retrieving a page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// Every attempt failed; the caller should skip this url.
    #[error("failed to fetch {url} after {attempts} attempts")]
    Exhausted { url: String, attempts: u32 },
}

/// The storage engine rejected a schema or write operation.
#[derive(Error, Debug)]
#[error("storage error: {0}")]
pub struct StorageError(#[from] pub sqlx::Error);

/// Errors that abort a crawl run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
