use thiserror::Error;

/// Remote service an [`PlacesError::Api`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Places,
    Location,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Places => write!(f, "Places"),
            Service::Location => write!(f, "Location"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. The body is kept verbatim because provider status
    /// codes such as `QUOTA_EXCEEDED` only appear there.
    #[error("{service} API error: {status} - {body}")]
    Api {
        service: Service,
        status: u16,
        body: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("normalization error for place {place_id:?}: {reason}")]
    Normalization { place_id: String, reason: String },

    #[error("invalid place id \"{0}\"")]
    InvalidPlaceId(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
