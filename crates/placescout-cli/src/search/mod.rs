//! Search form handling: turning the user's fields into a query, and
//! turning provider failures into something a person can act on.

mod command;
mod controller;

pub(crate) use command::run_search;

use placescout_core::SearchParams;

const QUERY_SEPARATOR: &str = " in ";
const FAILURE_PREFIX: &str = "Failed to search businesses. ";

/// Raw field values as entered on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SearchForm {
    pub business_type: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip: String,
    /// Free-form `"<what> in <where>"` override.
    pub custom_query: String,
}

impl SearchForm {
    /// City, state, country and zip, skipping blanks, joined with `", "`.
    pub(crate) fn location_string(&self) -> String {
        [&self.city, &self.state, &self.country, &self.zip]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The custom query the current fields would produce.
    pub(crate) fn suggested_query(&self) -> String {
        let business_type = self.business_type.trim();
        let location = self.location_string();
        match (business_type.is_empty(), location.is_empty()) {
            (false, false) => format!("{business_type}{QUERY_SEPARATOR}{location}"),
            (false, true) => business_type.to_owned(),
            (true, false) => format!("in {location}"),
            (true, true) => String::new(),
        }
    }

    /// Works out what to search for.
    ///
    /// A non-blank custom query wins: its first `" in "` segment is the query
    /// and the rest (re-joined) is the location, falling back to the
    /// structured location when there is no separator.
    ///
    /// # Errors
    ///
    /// Returns [`SearchFailure::MissingFields`] when either half is empty.
    pub(crate) fn resolve(&self) -> Result<SearchParams, SearchFailure> {
        let (query, location) = if self.custom_query.trim().is_empty() {
            (self.business_type.trim().to_owned(), self.location_string())
        } else {
            let mut segments = self.custom_query.split(QUERY_SEPARATOR);
            let query = segments.next().unwrap_or_default().trim().to_owned();
            let rest = segments.collect::<Vec<_>>().join(QUERY_SEPARATOR);
            let location = if rest.trim().is_empty() {
                self.location_string()
            } else {
                rest.trim().to_owned()
            };
            (query, location)
        };

        if query.is_empty() || location.is_empty() {
            return Err(SearchFailure::MissingFields);
        }
        Ok(SearchParams::new(query, location))
    }
}

/// Which provider failure the error message points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureCause {
    PermissionDenied,
    InvalidRequest,
    QuotaExceeded,
    RequestDenied,
    Other,
}

/// Classifies a directory error by the markers in its message.
///
/// Checked in order: `403`, `400`, `QUOTA_EXCEEDED`, `REQUEST_DENIED`.
pub(crate) fn classify_error(message: &str) -> FailureCause {
    if message.contains("403") {
        FailureCause::PermissionDenied
    } else if message.contains("400") {
        FailureCause::InvalidRequest
    } else if message.contains("QUOTA_EXCEEDED") {
        FailureCause::QuotaExceeded
    } else if message.contains("REQUEST_DENIED") {
        FailureCause::RequestDenied
    } else {
        FailureCause::Other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchFailure {
    MissingFields,
    MissingCredential,
    /// The credential store itself could not be read.
    CredentialUnavailable(String),
    Directory {
        cause: FailureCause,
        message: String,
    },
}

impl SearchFailure {
    pub(crate) fn from_directory_error(message: &str) -> Self {
        Self::Directory {
            cause: classify_error(message),
            message: message.to_owned(),
        }
    }

    /// Text shown to the user.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::MissingFields => "Please fill in both business type and location".to_owned(),
            Self::MissingCredential => "Please set your Google Places API key with \
                 `placescout key set <KEY>`. Make sure to enable Places API (New) \
                 in your Google Cloud Console."
                .to_owned(),
            Self::CredentialUnavailable(reason) => {
                format!("Could not read the saved API key: {reason}")
            }
            Self::Directory { cause, message } => {
                let detail = match cause {
                    FailureCause::PermissionDenied => "API key permission denied. Please ensure \
                         your API key has Places API (New) enabled and proper permissions.",
                    FailureCause::InvalidRequest => {
                        "Invalid request. Please check your search parameters."
                    }
                    FailureCause::QuotaExceeded => {
                        "API quota exceeded. Please check your Google Cloud billing."
                    }
                    FailureCause::RequestDenied => {
                        "Request denied. Please check your API key permissions for Places API (New)."
                    }
                    FailureCause::Other if message.trim().is_empty() => "Unknown error occurred.",
                    FailureCause::Other => message.as_str(),
                };
                format!("{FAILURE_PREFIX}{detail}")
            }
        }
    }
}

impl std::fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for SearchFailure {}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
