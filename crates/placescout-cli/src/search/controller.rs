use std::future::Future;

use placescout_core::{Business, CredentialStore, SearchParams};
use placescout_places::{PlacesClient, PlacesError};
use tokio::sync::watch;

use super::{SearchFailure, SearchForm};

/// Anything that can run a paginated business search.
pub(crate) trait BusinessDirectory {
    type Error: std::fmt::Display;

    fn search(
        &self,
        params: &SearchParams,
        credential: &str,
    ) -> impl Future<Output = Result<Vec<Business>, Self::Error>>;
}

impl BusinessDirectory for PlacesClient {
    type Error = PlacesError;

    fn search(
        &self,
        params: &SearchParams,
        credential: &str,
    ) -> impl Future<Output = Result<Vec<Business>, PlacesError>> {
        self.search_businesses(params, credential)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchState {
    Idle,
    Searching,
    Succeeded(Vec<Business>),
    Failed(SearchFailure),
}

/// Drives one search form: validation, credential lookup, the directory call
/// and the resulting state.
pub(crate) struct SearchController<D, S> {
    directory: D,
    credentials: S,
    state: SearchState,
    loading: watch::Sender<bool>,
}

impl<D: BusinessDirectory, S: CredentialStore> SearchController<D, S> {
    pub(crate) fn new(directory: D, credentials: S) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            directory,
            credentials,
            state: SearchState::Idle,
            loading,
        }
    }

    /// Observes the loading flag; `true` only while the directory call runs.
    pub(crate) fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Results of the last search; empty unless it succeeded.
    pub(crate) fn results(&self) -> &[Business] {
        match &self.state {
            SearchState::Succeeded(businesses) => businesses,
            _ => &[],
        }
    }

    /// Runs a search for `form`.
    ///
    /// Missing fields or a missing credential fail before the directory is
    /// touched.
    pub(crate) async fn submit(&mut self, form: &SearchForm) -> &SearchState {
        self.state = match self.run(form).await {
            Ok(businesses) => {
                tracing::info!(count = businesses.len(), "search succeeded");
                SearchState::Succeeded(businesses)
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "search failed");
                SearchState::Failed(failure)
            }
        };
        &self.state
    }

    async fn run(&mut self, form: &SearchForm) -> Result<Vec<Business>, SearchFailure> {
        let params = form.resolve()?;
        let credential = self
            .credentials
            .get()
            .map_err(|e| SearchFailure::CredentialUnavailable(e.to_string()))?
            .ok_or(SearchFailure::MissingCredential)?;

        tracing::info!(query = %params.text_query(), "searching multiple pages");
        self.state = SearchState::Searching;
        self.loading.send_replace(true);
        let result = self.directory.search(&params, &credential).await;
        self.loading.send_replace(false);

        result.map_err(|e| {
            tracing::error!(error = %e, "directory search error");
            SearchFailure::from_directory_error(&e.to_string())
        })
    }
}
