//! Multi-page text search for `PlacesClient`.

use placescout_core::{Business, SearchParams};

use crate::error::PlacesError;
use crate::normalize::normalize_places;

use super::PlacesClient;
use super::MAX_PAGES;

impl PlacesClient {
    /// Searches for businesses matching `params`, following continuation
    /// tokens for up to [`MAX_PAGES`] pages.
    ///
    /// Pages are fetched strictly one after another, with the configured page
    /// delay before every follow-up request. The loop stops when a page has no
    /// places, when the provider returns no continuation token, or after
    /// [`MAX_PAGES`] pages. Results keep provider order within a page and page
    /// order across pages; nothing is deduplicated.
    ///
    /// Malformed places are logged and skipped. A failed page discards
    /// everything fetched so far.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::search_text_page`]; nothing is retried.
    pub async fn search_businesses(
        &self,
        params: &SearchParams,
        credential: &str,
    ) -> Result<Vec<Business>, PlacesError> {
        tracing::info!(query = %params.query, location = %params.location, "searching businesses");

        let mut all_businesses: Vec<Business> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            tracing::debug!(page = page_count + 1, "fetching search page");

            let response = self
                .search_text_page(params, credential, page_token.as_deref())
                .await?;

            if response.places.is_empty() {
                tracing::debug!(page = page_count + 1, "no more places");
                break;
            }

            tracing::debug!(
                page = page_count + 1,
                places = response.places.len(),
                "search page received"
            );
            all_businesses.extend(normalize_places(response.places));

            page_token = response.next_page_token.filter(|t| !t.is_empty());
            page_count += 1;

            if page_token.is_none() || page_count >= MAX_PAGES {
                break;
            }

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        tracing::info!(
            businesses = all_businesses.len(),
            pages = page_count,
            "search complete"
        );
        Ok(all_businesses)
    }
}
