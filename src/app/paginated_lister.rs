use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, warn};

use super::workload_source::{PageRequest, PagedSource, SourceError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub limit: Option<u32>,
    pub timeout: Option<Duration>,
}

/// Follows the continuation tokens of `source` until the last page and
/// returns every item in source order.
///
/// A token the source already handed out stops the listing with
/// [`SourceError::RepeatedContinueToken`] instead of looping forever.
pub async fn list_all<T, S>(source: &S, options: PageOptions) -> Result<Vec<T>, SourceError>
where
    T: Send + 'static,
    S: PagedSource<T> + ?Sized,
{
    let mut items = Vec::new();
    let mut continue_token: Option<String> = None;
    let mut seen_tokens: HashSet<String> = HashSet::new();

    loop {
        let page = source
            .fetch_page(PageRequest {
                limit: options.limit,
                continue_token: continue_token.clone(),
                timeout: options.timeout,
            })
            .await?;
        items.extend(page.items);

        let Some(next_token) = page.continue_token.filter(|token| !token.is_empty()) else {
            break;
        };

        if !seen_tokens.insert(next_token.clone()) {
            warn!(
                "continue token repeated after {} item(s), aborting pagination",
                items.len()
            );
            return Err(SourceError::RepeatedContinueToken);
        }

        debug!(
            "continuing list pagination with token length={}",
            next_token.len()
        );
        continue_token = Some(next_token);
    }

    Ok(items)
}
