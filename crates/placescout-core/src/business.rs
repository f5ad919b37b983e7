use serde::{Deserialize, Serialize};

/// Search radius used when the caller does not supply one, in meters.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// A business returned by the directory provider, normalized for display
/// and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Provider-assigned place identifier.
    pub id: String,
    /// Display name; `"Unknown"` when the provider omits it.
    pub name: String,
    /// National-format phone number, falling back to international format.
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Guessed from the website host (`info@<host>`). Never verified.
    pub email: Option<String>,
    pub address: String,
    pub rating: Option<f64>,
    /// Price level on a `0..=4` scale (free to very expensive).
    pub price_level: Option<u8>,
    /// Provider category tags in provider order, e.g. `["cafe", "food"]`.
    pub types: Vec<String>,
    /// Same value as `id`; kept separately for the details endpoint.
    pub place_id: String,
}

/// Parameters of a single directory search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub location: String,
    pub radius: Option<u32>,
}

impl SearchParams {
    #[must_use]
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            radius: Some(DEFAULT_RADIUS_METERS),
        }
    }

    /// Free-text query sent to the provider, e.g. `"Cafe in Fresno, California"`.
    #[must_use]
    pub fn text_query(&self) -> String {
        format!("{} in {}", self.query, self.location)
    }
}
