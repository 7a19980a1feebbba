use std::time::Duration;

use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Page-size hint, the source may return fewer items.
    pub limit: Option<u32>,
    pub continue_token: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Absent or empty when this was the last page.
    pub continue_token: Option<String>,
}

/// Cursor-based remote listing.
#[async_trait::async_trait]
pub trait PagedSource<T: Send + 'static>: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>, SourceError>;
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0}")]
    Api(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("the server returned the same continue token twice")]
    RepeatedContinueToken,
}
