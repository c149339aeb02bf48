//! Listing providers: remote HTTP endpoint and local JSON file.
//!
//! Both implementations satisfy the same contract: given filter criteria,
//! return the ordered listing sequence for the feed. The HTTP provider
//! memoizes recent query results so re-applying a recent filter does not
//! refetch.

use super::{FilterCriteria, Listing, ListingProvider, ProviderError};
use futures::future::BoxFuture;
use futures::FutureExt;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

/// Number of filter-criteria query results kept in the memo cache.
const QUERY_CACHE_CAPACITY: usize = 16;

/// Maximum accepted response body (1 MB of JSON is thousands of listings).
const MAX_RESPONSE_SIZE: u64 = 1024 * 1024;

// ============================================================================
// HTTP Provider
// ============================================================================

/// Fetches listings from a remote JSON endpoint.
///
/// Criteria are pushed down as query parameters; the server does the
/// filtering. Responses are cached per criteria in a small LRU so that
/// toggling between two recent filters is instant.
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: Url,
    cache: Mutex<LruCache<FilterCriteria, Arc<Vec<Listing>>>>,
}

impl HttpProvider {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(QUERY_CACHE_CAPACITY).expect("nonzero capacity"),
            )),
        }
    }

    /// Build a client with the timeouts this provider expects.
    pub fn default_client() -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
    }

    fn listings_url(&self, filter: &FilterCriteria) -> Url {
        let mut url = self.base_url.clone();
        if filter.is_empty() {
            return url;
        }
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(city) = &filter.city {
                pairs.append_pair("city", city);
            }
            if let Some(min) = filter.price.min {
                pairs.append_pair("min_price", &min.to_string());
            }
            if let Some(max) = filter.price.max {
                pairs.append_pair("max_price", &max.to_string());
            }
            if let Some(kind) = filter.kind {
                pairs.append_pair("type", &kind.label().to_ascii_lowercase());
            }
        }
        url
    }

    async fn fetch_remote(&self, filter: FilterCriteria) -> Result<Vec<Listing>, ProviderError> {
        if let Some(hit) = self.cache.lock().expect("cache lock").get(&filter) {
            tracing::debug!(?filter, "Listing query served from cache");
            return Ok(hit.as_ref().clone());
        }

        let url = self.listings_url(&filter);
        tracing::debug!(url = %url, "Fetching listings");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::BadStatus {
                status: status.as_u16(),
            });
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(ProviderError::BadStatus { status: 413 });
            }
        }

        let body = response.text().await?;
        let listings: Vec<Listing> = serde_json::from_str(&body)?;
        tracing::info!(count = listings.len(), "Listings loaded");

        self.cache
            .lock()
            .expect("cache lock")
            .put(filter, Arc::new(listings.clone()));
        Ok(listings)
    }
}

impl ListingProvider for HttpProvider {
    fn fetch(&self, filter: FilterCriteria) -> BoxFuture<'_, Result<Vec<Listing>, ProviderError>> {
        self.fetch_remote(filter).boxed()
    }
}

// ============================================================================
// File Provider
// ============================================================================

/// Reads the full listing set from a local JSON file and filters in
/// process. Used for offline browsing and demos (`--listings FILE`).
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn fetch_local(&self, filter: FilterCriteria) -> Result<Vec<Listing>, ProviderError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        let all: Vec<Listing> = serde_json::from_str(&body)?;
        let matched: Vec<Listing> = all.into_iter().filter(|l| filter.matches(l)).collect();
        tracing::debug!(
            path = %self.path.display(),
            count = matched.len(),
            "Listings filtered from file"
        );
        Ok(matched)
    }
}

impl ListingProvider for FileProvider {
    fn fetch(&self, filter: FilterCriteria) -> BoxFuture<'_, Result<Vec<Listing>, ProviderError>> {
        self.fetch_local(filter).boxed()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::{sample_listing, ListingKind, PriceRange};

    #[test]
    fn test_listings_url_carries_all_criteria() {
        let provider = HttpProvider::new(
            reqwest::Client::new(),
            Url::parse("https://api.example.com/listings").unwrap(),
        );
        let url = provider.listings_url(&FilterCriteria {
            city: Some("Dubai".to_string()),
            price: PriceRange {
                min: Some(2000),
                max: Some(8000),
            },
            kind: Some(ListingKind::Apartment),
        });
        let query = url.query().unwrap();
        assert!(query.contains("city=Dubai"));
        assert!(query.contains("min_price=2000"));
        assert!(query.contains("max_price=8000"));
        assert!(query.contains("type=apartment"));
    }

    #[test]
    fn test_listings_url_empty_criteria_has_no_query() {
        let provider = HttpProvider::new(
            reqwest::Client::new(),
            Url::parse("https://api.example.com/listings").unwrap(),
        );
        let url = provider.listings_url(&FilterCriteria::default());
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_file_provider_filters_locally() {
        let dir = std::env::temp_dir().join("reel_file_provider_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("listings.json");

        let listings = vec![
            sample_listing("a", "Dubai", 4000, ListingKind::Apartment),
            sample_listing("b", "Abu Dhabi", 9000, ListingKind::Villa),
        ];
        std::fs::write(&path, serde_json::to_string(&listings).unwrap()).unwrap();

        let provider = FileProvider::new(path);
        let got = provider
            .fetch(FilterCriteria {
                city: Some("Dubai".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, "a");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_file_provider_missing_file_is_io_error() {
        let provider = FileProvider::new(PathBuf::from("/nonexistent/listings.json"));
        let err = provider.fetch(FilterCriteria::default()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }
}
