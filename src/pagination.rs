//! Offset pagination shared by the JSON API sources.

use crate::error::{Result, SourceError};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Offset of a 1-based page. Page 0 is treated as page 1.
pub fn search_offset(page: u32, limit: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Whether a listing continues after the page at `offset`. Remote values may
/// be arbitrary, so the sum saturates.
pub fn has_next_page(offset: u64, limit: u64, total: u64) -> bool {
    offset.saturating_add(limit) < total
}

/// One page of a provider listing along with the listing's total size.
#[derive(Debug, Clone)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Walks an offset-paginated listing sequentially.
///
/// `fetch` receives the offset of each page and returns `Ok(None)` when the
/// provider refused the page; the walk then stops with what it has so far.
/// Pages are separated by `delay`, and cancellation is observed both between
/// pages and during the delay.
pub async fn collect_pages<T, F, Fut>(
    limit: u32,
    delay: Duration,
    cancel: &CancellationToken,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<FeedPage<T>>>>,
{
    let mut items = Vec::new();
    let mut offset: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(SourceError::cancelled("paginated fetch"));
        }

        let Some(page) = fetch(offset).await? else {
            log::debug!("Stopping pagination at offset {} with {} items", offset, items.len());
            break;
        };

        items.extend(page.items);

        if !has_next_page(offset as u64, limit as u64, page.total) {
            break;
        }
        let Some(next) = offset.checked_add(limit) else {
            log::warn!("Offset overflow after {} items, stopping pagination", items.len());
            break;
        };
        offset = next;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SourceError::cancelled("paginated fetch")),
            _ = tokio::time::sleep(delay) => {}
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(offset: u32, limit: u32, total: u32) -> FeedPage<u32> {
        FeedPage {
            items: (offset..(offset + limit).min(total)).collect(),
            total: total as u64,
        }
    }

    #[test]
    fn test_has_next_page_for_45_items() {
        let limit = 20;
        let pages: Vec<bool> = (1..=3)
            .map(|p| has_next_page(search_offset(p, limit) as u64, limit as u64, 45))
            .collect();
        assert_eq!(pages, vec![true, true, false]);
    }

    #[test]
    fn test_has_next_page_with_huge_offset() {
        assert!(!has_next_page(u64::MAX, 20, 45));
        assert!(!has_next_page(u64::MAX, u64::MAX, u64::MAX));
        assert!(!has_next_page(0, u64::MAX, u64::MAX));
    }

    #[test]
    fn test_search_offset() {
        assert_eq!(search_offset(1, 20), 0);
        assert_eq!(search_offset(3, 24), 48);
        assert_eq!(search_offset(0, 20), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_pages_walks_until_total() {
        let cancel = CancellationToken::new();
        let mut offsets = Vec::new();
        let start = tokio::time::Instant::now();

        let items = collect_pages(20, Duration::from_millis(500), &cancel, |offset| {
            offsets.push(offset);
            async move { Ok::<_, SourceError>(Some(page(offset, 20, 45))) }
        })
        .await
        .unwrap();

        assert_eq!(offsets, vec![0, 20, 40]);
        assert_eq!(items.len(), 45);
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_collect_pages_stops_on_refused_page() {
        let cancel = CancellationToken::new();
        let items = collect_pages(10, Duration::ZERO, &cancel, |offset| async move {
            if offset == 0 {
                Ok::<_, SourceError>(Some(page(0, 10, 100)))
            } else {
                Ok(None)
            }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 10);
    }

    #[tokio::test]
    async fn test_collect_pages_propagates_errors() {
        let cancel = CancellationToken::new();
        let result = collect_pages(10, Duration::ZERO, &cancel, |_| async {
            Err::<Option<FeedPage<u32>>, _>(SourceError::HttpStatus {
                url: "https://example.com".to_string(),
                status: 500,
            })
        })
        .await;

        assert!(matches!(result, Err(SourceError::HttpStatus { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_collect_pages_observes_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = collect_pages(10, Duration::ZERO, &cancel, |offset| async move {
            Ok::<_, SourceError>(Some(page(offset, 10, 100)))
        })
        .await;
        assert!(matches!(result, Err(SourceError::Cancelled { .. })));

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let result = collect_pages(10, Duration::from_secs(3600), &cancel, |offset| {
            trigger.cancel();
            async move { Ok::<_, SourceError>(Some(page(offset, 10, 100))) }
        })
        .await;
        assert!(matches!(result, Err(SourceError::Cancelled { .. })));
    }
}
