//! Conversion from raw [`Place`] payloads to [`placescout_core::Business`].

use placescout_core::Business;
use reqwest::Url;

use crate::error::PlacesError;
use crate::types::Place;

/// Mailbox prefix used for guessed addresses.
const EMAIL_PREFIX: &str = "info";

/// Normalizes a raw [`Place`] into a [`Business`].
///
/// # Errors
///
/// Returns [`PlacesError::Normalization`] if the place has no id.
pub fn normalize_place(place: Place) -> Result<Business, PlacesError> {
    let id = place.id.trim().to_owned();
    if id.is_empty() {
        return Err(PlacesError::Normalization {
            place_id: place.id,
            reason: "place has no id".into(),
        });
    }

    let website = non_empty(place.website_uri);
    let email = website.as_deref().and_then(synthesize_email);
    let phone = non_empty(place.national_phone_number)
        .or_else(|| non_empty(place.international_phone_number));
    let name = place
        .display_name
        .map(|d| d.text)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_owned());

    Ok(Business {
        place_id: id.clone(),
        id,
        name,
        phone,
        website,
        email,
        address: place.formatted_address.unwrap_or_default(),
        rating: place.rating,
        price_level: place.price_level.as_ref().and_then(|p| p.as_level()),
        types: place.types,
    })
}

/// Normalizes one page of raw place JSON, skipping entries that fail to
/// deserialize or normalize.
pub(crate) fn normalize_places(places: Vec<serde_json::Value>) -> Vec<Business> {
    places
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            serde_json::from_value::<Place>(raw)
                .map_err(|e| PlacesError::Deserialize {
                    context: format!("place #{index}"),
                    source: e,
                })
                .and_then(normalize_place)
                .map_err(|e| {
                    tracing::warn!(index, error = %e, "skipping malformed place");
                })
                .ok()
        })
        .collect()
}

/// Guesses a contact address from a website: `info@<host>` with the first
/// `"www."` removed.
///
/// Returns `None` when `website` does not parse as a URL with a host.
#[must_use]
pub fn synthesize_email(website: &str) -> Option<String> {
    let url = match Url::parse(website) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(website, error = %e, "could not extract domain from website");
            return None;
        }
    };
    let host = url.host_str()?;
    let domain = host.replacen("www.", "", 1);
    if domain.is_empty() {
        return None;
    }
    Some(format!("{EMAIL_PREFIX}@{domain}"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
