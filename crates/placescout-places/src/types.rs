//! Wire types for the Places API (New) `places:searchText` and place-details
//! endpoints.
//!
//! Every response field is optional on the wire: the provider only returns
//! what the field mask asks for, and omits fields it has no data for. A place
//! without `displayName` or `formattedAddress` is still a valid result.
//!
//! ### `priceLevel`
//! The New API reports an enum label such as `"PRICE_LEVEL_MODERATE"`. Older
//! payloads used a bare integer `0..=4`. Both shapes are accepted.

use serde::{Deserialize, Serialize};

/// Fields requested from `places:searchText`.
pub const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.nationalPhoneNumber,places.internationalPhoneNumber,places.websiteUri,places.rating,places.priceLevel,places.types,places.businessStatus,nextPageToken";

/// Fields requested from the place-details endpoint.
pub const DETAILS_FIELD_MASK: &str = "id,displayName,formattedAddress,nationalPhoneNumber,internationalPhoneNumber,websiteUri,rating,priceLevel,types,businessStatus";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rectangle {
    pub low: LatLng,
    pub high: LatLng,
}

/// Search area applied to every text search: the extent of California.
pub const CALIFORNIA_BOUNDS: Rectangle = Rectangle {
    low: LatLng {
        latitude: 32.5342,
        longitude: -124.4096,
    },
    high: LatLng {
        latitude: 42.0095,
        longitude: -114.1308,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationRestriction {
    pub rectangle: Rectangle,
}

/// Body of `POST places:searchText`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextRequest<'a> {
    pub text_query: String,
    pub max_result_count: u32,
    pub location_restriction: LocationRestriction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

/// One page of `places:searchText` results.
///
/// Places are kept as raw JSON so one malformed entry can be skipped without
/// failing the whole page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<serde_json::Value>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PriceLevel {
    Level(u8),
    Label(String),
}

impl PriceLevel {
    /// Maps the provider's representation onto `0..=4`.
    ///
    /// Returns `None` for `PRICE_LEVEL_UNSPECIFIED`, unknown labels, and
    /// out-of-range numbers.
    #[must_use]
    pub fn as_level(&self) -> Option<u8> {
        match self {
            PriceLevel::Level(n) if *n <= 4 => Some(*n),
            PriceLevel::Level(_) => None,
            PriceLevel::Label(label) => match label.as_str() {
                "PRICE_LEVEL_FREE" => Some(0),
                "PRICE_LEVEL_INEXPENSIVE" => Some(1),
                "PRICE_LEVEL_MODERATE" => Some(2),
                "PRICE_LEVEL_EXPENSIVE" => Some(3),
                "PRICE_LEVEL_VERY_EXPENSIVE" => Some(4),
                _ => None,
            },
        }
    }
}

/// A place as returned by search or details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub national_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price_level: Option<PriceLevel>,
    #[serde(default)]
    pub types: Vec<String>,
    /// e.g. `"OPERATIONAL"`, `"CLOSED_TEMPORARILY"`.
    #[serde(default)]
    pub business_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_page_token_when_absent() {
        let request = SearchTextRequest {
            text_query: "Cafe in Fresno".to_owned(),
            max_result_count: 20,
            location_restriction: LocationRestriction {
                rectangle: CALIFORNIA_BOUNDS,
            },
            page_token: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("pageToken").is_none());
        assert_eq!(json["textQuery"], "Cafe in Fresno");
        assert_eq!(json["maxResultCount"], 20);
        assert_eq!(
            json["locationRestriction"]["rectangle"]["low"]["latitude"],
            32.5342
        );
        assert_eq!(
            json["locationRestriction"]["rectangle"]["high"]["longitude"],
            -114.1308
        );
    }

    #[test]
    fn request_includes_page_token_when_present() {
        let request = SearchTextRequest {
            text_query: "Cafe in Fresno".to_owned(),
            max_result_count: 20,
            location_restriction: LocationRestriction {
                rectangle: CALIFORNIA_BOUNDS,
            },
            page_token: Some("tok-2"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["pageToken"], "tok-2");
    }

    #[test]
    fn price_level_accepts_label_and_number() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "id": "a",
            "priceLevel": "PRICE_LEVEL_EXPENSIVE"
        }))
        .unwrap();
        assert_eq!(place.price_level.and_then(|p| p.as_level()), Some(3));

        let place: Place =
            serde_json::from_value(serde_json::json!({ "id": "b", "priceLevel": 1 })).unwrap();
        assert_eq!(place.price_level.and_then(|p| p.as_level()), Some(1));
    }

    #[test]
    fn unknown_price_labels_map_to_none() {
        assert_eq!(
            PriceLevel::Label("PRICE_LEVEL_UNSPECIFIED".to_owned()).as_level(),
            None
        );
        assert_eq!(PriceLevel::Level(9).as_level(), None);
    }

    #[test]
    fn response_without_places_defaults_to_empty() {
        let response: SearchTextResponse = serde_json::from_str("{}").unwrap();
        assert!(response.places.is_empty());
        assert!(response.next_page_token.is_none());
    }
}
