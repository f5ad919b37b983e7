//! HTTP client for the Places API (New).

mod details;
mod search_all;

use std::time::Duration;

use placescout_core::SearchParams;
use reqwest::Client;

use crate::error::{PlacesError, Service};
use crate::http::{build_client, normalize_base_url, read_json};
use crate::types::{
    LocationRestriction, SearchTextRequest, SearchTextResponse, CALIFORNIA_BOUNDS,
    SEARCH_FIELD_MASK,
};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1/places";

pub(crate) const API_KEY_HEADER: &str = "X-Goog-Api-Key";
pub(crate) const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Maximum number of result pages fetched for one search.
pub const MAX_PAGES: usize = 5;

/// Results requested per page; the provider's maximum.
pub const PAGE_SIZE: u32 = 20;

/// Pause before each follow-up page request.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// Client for the Places API (New) text-search and place-details endpoints.
///
/// The API key is passed per call rather than stored, because the key lives
/// in the user's credential store and may change between searches.
pub struct PlacesClient {
    client: Client,
    base_url: String,
    page_delay: Duration,
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: normalize_base_url(base_url)?,
            page_delay: DEFAULT_PAGE_DELAY,
        })
    }

    /// Overrides the pause inserted before each follow-up page request.
    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Fetches one page of text-search results.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] on a non-2xx status, with the response body.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the body is not a search response.
    pub async fn search_text_page(
        &self,
        params: &SearchParams,
        credential: &str,
        page_token: Option<&str>,
    ) -> Result<SearchTextResponse, PlacesError> {
        let url = self.search_url();
        let body = Self::search_request(params, page_token);

        tracing::debug!(url = %url, has_page_token = page_token.is_some(), "places text search request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, credential)
            .header(FIELD_MASK_HEADER, SEARCH_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        read_json(response, Service::Places, "places:searchText").await
    }

    fn search_url(&self) -> String {
        format!("{}:searchText", self.base_url)
    }

    fn search_request<'a>(
        params: &SearchParams,
        page_token: Option<&'a str>,
    ) -> SearchTextRequest<'a> {
        SearchTextRequest {
            text_query: params.text_query(),
            max_result_count: PAGE_SIZE,
            location_restriction: LocationRestriction {
                rectangle: CALIFORNIA_BOUNDS,
            },
            page_token,
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
