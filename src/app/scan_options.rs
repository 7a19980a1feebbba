use std::time::Duration;

use super::paginated_lister::PageOptions;

/// Upper bound of concurrent target scans when no worker count is given.
pub const MAX_DEFAULT_WORKERS: usize = 32;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Concurrent target scans, `min(32, targets)` when unset.
    pub max_workers: Option<usize>,
    /// Page-size hint for each list request, unlimited when unset.
    pub page_limit: Option<u32>,
    pub request_timeout_seconds: Option<u64>,
}

impl ScanOptions {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            limit: self.page_limit,
            timeout: self.request_timeout(),
        }
    }

    /// `None` when the configured worker count is zero. Never more workers
    /// than targets.
    pub fn worker_count(&self, targets: usize) -> Option<usize> {
        match self.max_workers {
            Some(0) => None,
            Some(workers) => Some(workers.min(targets.max(1))),
            None => Some(targets.clamp(1, MAX_DEFAULT_WORKERS)),
        }
    }
}
