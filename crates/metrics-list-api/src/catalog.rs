use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::{
    self,
    BoxStream,
    StreamExt,
};

use crate::error::CatalogResult;
use crate::types::{
    DescriptorPage,
    ListDescriptorsRequest,
    MetricDescriptor,
};

/// Read-only access to a metric catalog - all backends must implement this
#[async_trait]
pub trait MetricCatalog: Send + Sync {
    /// Catalog identifier used in logs (e.g., "cloud-monitoring")
    fn catalog_type(&self) -> &str;

    /// Fetch one page of descriptors matching the request.
    ///
    /// `page_token` is `None` for the first page and the previous page's
    /// `next_page_token` afterwards.
    async fn list_descriptors_page(
        &self, request: &ListDescriptorsRequest, page_token: Option<&str>,
    ) -> CatalogResult<DescriptorPage>;
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

struct ListingState {
    buffered: VecDeque<MetricDescriptor>,
    cursor: Cursor,
}

/// Lazily walks every page of a listing, yielding descriptors in catalog
/// order.
///
/// Each call starts a fresh listing from the first page. The stream ends once
/// a page arrives without a next-page token, and ends early on the first
/// error.
pub fn list_descriptors<'a, C>(
    catalog: &'a C, request: &'a ListDescriptorsRequest,
) -> BoxStream<'a, CatalogResult<MetricDescriptor>>
where
    C: MetricCatalog + ?Sized,
{
    let state = ListingState {
        buffered: VecDeque::new(),
        cursor: Cursor::Start,
    };

    stream::try_unfold(state, move |state| next_descriptor(catalog, request, state)).boxed()
}

async fn next_descriptor<C>(
    catalog: &C, request: &ListDescriptorsRequest, mut state: ListingState,
) -> CatalogResult<Option<(MetricDescriptor, ListingState)>>
where
    C: MetricCatalog + ?Sized,
{
    loop {
        if let Some(descriptor) = state.buffered.pop_front() {
            return Ok(Some((descriptor, state)));
        }

        let page_token = match &state.cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token.clone()),
        };

        let page = catalog
            .list_descriptors_page(request, page_token.as_deref())
            .await?;

        state.cursor = match page.next_page_token {
            Some(token) if !token.is_empty() => Cursor::Next(token),
            _ => Cursor::Done,
        };
        state.buffered.extend(page.descriptors);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures::TryStreamExt;

    use super::*;
    use crate::error::CatalogError;

    struct PagedCatalog {
        pages: Vec<Vec<&'static str>>,
        fail_on_page: Option<usize>,
        seen_tokens: Mutex<Vec<Option<String>>>,
    }

    impl PagedCatalog {
        fn new(pages: Vec<Vec<&'static str>>) -> Self {
            Self {
                pages,
                fail_on_page: None,
                seen_tokens: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetricCatalog for PagedCatalog {
        fn catalog_type(&self) -> &str {
            "paged"
        }

        async fn list_descriptors_page(
            &self, _request: &ListDescriptorsRequest, page_token: Option<&str>,
        ) -> CatalogResult<DescriptorPage> {
            self.seen_tokens
                .lock()
                .unwrap()
                .push(page_token.map(str::to_string));

            let index = page_token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
            if self.fail_on_page == Some(index) {
                return Err(CatalogError::NetworkError("connection reset".to_string()));
            }

            let descriptors = self.pages[index]
                .iter()
                .map(|metric_type| MetricDescriptor {
                    metric_type: metric_type.to_string(),
                    ..Default::default()
                })
                .collect();
            let next_page_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());

            Ok(DescriptorPage {
                descriptors,
                next_page_token,
            })
        }
    }

    fn request() -> ListDescriptorsRequest {
        ListDescriptorsRequest::for_prefix("p", "custom.googleapis.com/")
    }

    #[tokio::test]
    async fn test_walks_all_pages_in_order() {
        let catalog = PagedCatalog::new(vec![vec!["a", "b"], vec![], vec!["c"]]);
        let request = request();

        let types: Vec<String> = list_descriptors(&catalog, &request)
            .map_ok(|d| d.metric_type)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(types, vec!["a", "b", "c"]);
        assert_eq!(
            *catalog.seen_tokens.lock().unwrap(),
            vec![None, Some("1".to_string()), Some("2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let catalog = PagedCatalog::new(vec![vec![]]);
        let request = request();

        let descriptors: Vec<MetricDescriptor> = list_descriptors(&catalog, &request)
            .try_collect()
            .await
            .unwrap();

        assert!(descriptors.is_empty());
    }

    #[tokio::test]
    async fn test_error_ends_listing() {
        let mut catalog = PagedCatalog::new(vec![vec!["a"], vec!["b"], vec!["c"]]);
        catalog.fail_on_page = Some(1);
        let request = request();

        let mut listing = list_descriptors(&catalog, &request);
        assert_eq!(listing.try_next().await.unwrap().unwrap().metric_type, "a");
        assert!(matches!(
            listing.try_next().await,
            Err(CatalogError::NetworkError(_))
        ));
        assert!(listing.next().await.is_none());
    }

    #[tokio::test]
    async fn test_each_call_restarts_listing() {
        let catalog = PagedCatalog::new(vec![vec!["a"], vec!["b"]]);
        let request = request();

        let first: Vec<MetricDescriptor> = list_descriptors(&catalog, &request)
            .try_collect()
            .await
            .unwrap();
        let second: Vec<MetricDescriptor> = list_descriptors(&catalog, &request)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.seen_tokens.lock().unwrap().len(), 4);
    }
}
