//! [`IdentityProvider`] backed by a Supabase GoTrue REST endpoint.
//!
//! Every request carries the project's anon key in the `apikey` header.
//! Requests acting on behalf of a user (logout, profile update) carry the
//! session's access token as a bearer token; the rest send the anon key.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::types::{
    AuthEvent, ProfileUpdate, Session, SessionChange, SessionUser, SignInData, SignUpData,
};

const AUTH_PATH: &str = "auth/v1";
const EVENT_BUFFER: usize = 16;

pub struct GoTrueClient {
    client: Client,
    auth_url: String,
    anon_key: String,
    session: Mutex<Option<Session>>,
    events: broadcast::Sender<SessionChange>,
}

impl GoTrueClient {
    /// Creates a client for the project at `project_url`
    /// (e.g. `https://abc.supabase.co`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidUrl`] if `project_url` does not parse, or
    /// [`AuthError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(project_url: &str, anon_key: &str, timeout_secs: u64) -> Result<Self, AuthError> {
        let trimmed = project_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| AuthError::InvalidUrl {
            url: project_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let (events, _) = broadcast::channel(EVENT_BUFFER);

        Ok(Self {
            client,
            auth_url: format!("{trimmed}/{AUTH_PATH}"),
            anon_key: anon_key.to_owned(),
            session: Mutex::new(None),
            events,
        })
    }

    /// Restores a previously persisted session without emitting a change.
    #[must_use]
    pub fn with_session(self, session: Option<Session>) -> Self {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
        self
    }

    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn access_token(&self) -> Option<String> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    fn set_session(&self, session: Option<Session>, event: AuthEvent) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
        // No subscribers is fine; the change is still recorded locally.
        let receivers = self.events.send(SessionChange { event, session }).unwrap_or(0);
        tracing::debug!(?event, receivers, "session change published");
    }

    fn request(&self, method: reqwest::Method, endpoint: &str, bearer: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{endpoint}", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, AuthError> {
        let body = Self::send_raw(request).await?;
        serde_json::from_str(&body).map_err(|e| AuthError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    async fn send_raw(request: RequestBuilder) -> Result<String, AuthError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message: provider_message(&body).unwrap_or_default(),
            });
        }
        Ok(body)
    }
}

impl IdentityProvider for GoTrueClient {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.current_session())
    }

    async fn sign_up(&self, data: &SignUpData) -> Result<Option<Session>, AuthError> {
        let request = self
            .request(reqwest::Method::POST, "signup", &self.anon_key)
            .json(&json!({
                "email": data.email,
                "password": data.password,
                "data": {
                    "first_name": data.first_name,
                    "last_name": data.last_name,
                },
            }));
        let body: Value = Self::send(request, "signup").await?;

        // With email confirmation enabled the provider answers with the bare
        // user and no tokens.
        if body.get("access_token").is_none() {
            tracing::info!(email = %data.email, "sign up pending email confirmation");
            // The previous user must not stay signed in under the new account.
            if self.current_session().is_some() {
                self.set_session(None, AuthEvent::SignedOut);
            }
            return Ok(None);
        }

        let session: Session =
            serde_json::from_value(body).map_err(|e| AuthError::Deserialize {
                context: "signup session".to_owned(),
                source: e,
            })?;
        self.set_session(Some(session.clone()), AuthEvent::SignedIn);
        Ok(Some(session))
    }

    async fn sign_in(&self, data: &SignInData) -> Result<Session, AuthError> {
        let request = self
            .request(
                reqwest::Method::POST,
                "token?grant_type=password",
                &self.anon_key,
            )
            .json(&json!({ "email": data.email, "password": data.password }));
        let session: Session = Self::send(request, "token(password)").await?;
        self.set_session(Some(session.clone()), AuthEvent::SignedIn);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(token) = self.access_token() else {
            self.set_session(None, AuthEvent::SignedOut);
            return Ok(());
        };

        match Self::send_raw(self.request(reqwest::Method::POST, "logout", &token)).await {
            Ok(_) => {}
            // The token is already invalid server-side; drop it locally anyway.
            Err(AuthError::Provider { status, .. })
                if status == StatusCode::UNAUTHORIZED.as_u16()
                    || status == StatusCode::FORBIDDEN.as_u16()
                    || status == StatusCode::NOT_FOUND.as_u16() =>
            {
                tracing::warn!(status, "logout rejected; clearing local session");
            }
            Err(e) => return Err(e),
        }

        self.set_session(None, AuthEvent::SignedOut);
        Ok(())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<SessionUser, AuthError> {
        let token = self.access_token().ok_or(AuthError::NotSignedIn)?;
        let request = self
            .request(reqwest::Method::PUT, "user", &token)
            .json(&json!({
                "data": {
                    "first_name": update.first_name,
                    "last_name": update.last_name,
                },
            }));
        let user: SessionUser = Self::send(request, "user update").await?;

        let session = self.current_session().map(|mut s| {
            s.user = user.clone();
            s
        });
        self.set_session(session, AuthEvent::UserUpdated);
        Ok(user)
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.events.subscribe()
    }
}

/// Pulls a human-readable message out of a GoTrue error body.
///
/// GoTrue has used several shapes over time: `{"msg": ..}`,
/// `{"error": .., "error_description": ..}`, and `{"message": ..}`.
fn provider_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_owned)
}
