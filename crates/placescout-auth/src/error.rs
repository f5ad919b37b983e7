use thiserror::Error;

/// Errors returned by an identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request. `message` is the provider's own
    /// wording, e.g. `"Invalid login credentials"`.
    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("not signed in")]
    NotSignedIn,

    #[error("invalid identity provider URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
