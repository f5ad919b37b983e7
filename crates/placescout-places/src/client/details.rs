//! Place-details lookup for `PlacesClient`.

use crate::error::{PlacesError, Service};
use crate::http::read_json;
use crate::types::{Place, DETAILS_FIELD_MASK};

use super::{PlacesClient, API_KEY_HEADER, FIELD_MASK_HEADER};

impl PlacesClient {
    /// Fetches full details for one place by id.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::InvalidPlaceId`] if `place_id` is blank or contains
    ///   URL delimiters.
    /// - [`PlacesError::Api`] on a non-2xx status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the body is not a place.
    pub async fn get_place_details(
        &self,
        place_id: &str,
        credential: &str,
    ) -> Result<Place, PlacesError> {
        let url = self.details_url(place_id)?;
        tracing::debug!(url = %url, "place details request");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, credential)
            .header(FIELD_MASK_HEADER, DETAILS_FIELD_MASK)
            .send()
            .await?;

        read_json(response, Service::Places, &format!("place details({place_id})")).await
    }

    pub(super) fn details_url(&self, place_id: &str) -> Result<String, PlacesError> {
        let place_id = place_id.trim();
        if place_id.is_empty() || place_id.contains(['/', '?', '#']) {
            return Err(PlacesError::InvalidPlaceId(place_id.to_owned()));
        }
        Ok(format!("{}/{place_id}", self.base_url))
    }
}
