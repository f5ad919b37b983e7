//! Country → state → city lookups used to fill the location choices.
//!
//! Backed by the countriesnow.space REST API. Both endpoints answer with an
//! envelope `{ "error": bool, "msg": string, "data": ... }`; the shape of
//! `data` differs per endpoint and is sometimes an empty array on misses, so
//! it is read loosely from a [`serde_json::Value`]. A missing or mismatched
//! `data` yields an empty list.

use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{PlacesError, Service};
use crate::http::{build_client, normalize_base_url, read_json};

const DEFAULT_BASE_URL: &str = "https://countriesnow.space/api/v0.1/countries";

pub struct LocationClient {
    client: Client,
    base_url: String,
}

impl LocationClient {
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Lists state/province names for `country`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Api`] on a non-2xx status, [`PlacesError::Http`]
    /// on network failure, or [`PlacesError::Deserialize`] if the body is not JSON.
    pub async fn fetch_states(&self, country: &str) -> Result<Vec<String>, PlacesError> {
        let body = self.post("states", &json!({ "country": country })).await?;
        let states = state_names(&body);
        tracing::debug!(country, states = states.len(), "states fetched");
        Ok(states)
    }

    /// Lists city names for `state` within `country`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_states`].
    pub async fn fetch_cities(&self, country: &str, state: &str) -> Result<Vec<String>, PlacesError> {
        let body = self
            .post(
                "state/cities",
                &json!({ "country": country, "state": state }),
            )
            .await?;
        let cities = city_names(&body);
        tracing::debug!(country, state, cities = cities.len(), "cities fetched");
        Ok(cities)
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, PlacesError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        read_json(response, Service::Location, &url).await
    }
}

/// Extracts `data.states[].name`.
fn state_names(body: &Value) -> Vec<String> {
    body.get("data")
        .and_then(|d| d.get("states"))
        .and_then(Value::as_array)
        .map(|states| {
            states
                .iter()
                .filter_map(|s| s.get("name").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Extracts `data[]` as strings.
fn city_names(body: &Value) -> Vec<String> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|cities| {
            cities
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
