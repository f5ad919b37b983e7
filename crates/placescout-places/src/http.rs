//! Shared HTTP plumbing for the directory and location clients.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{PlacesError, Service};

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PlacesError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Validates `base_url` and strips trailing slashes so endpoint suffixes can
/// be appended with `format!`.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, PlacesError> {
    let trimmed = base_url.trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| PlacesError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_owned())
}

/// Asserts a 2xx status and decodes the body as JSON.
///
/// Non-2xx responses become [`PlacesError::Api`] carrying the status code and
/// the raw response text.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    service: Service,
    context: &str,
) -> Result<T, PlacesError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(%service, status = status.as_u16(), body = %body, "API response error");
        return Err(PlacesError::Api {
            service,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
