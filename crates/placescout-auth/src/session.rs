//! Local mirror of the identity provider's session.
//!
//! [`IdentitySession`] exposes the current user and a loading flag through a
//! `watch` channel. It subscribes to the provider's change stream exactly once
//! on [`IdentitySession::start`] and stops listening when dropped.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::types::{ProfileUpdate, SessionUser, SignInData, SignUpData};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    /// `true` until the initial session lookup has finished.
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SignUp,
    SignIn,
    SignOut,
    UpdateProfile,
}

impl Operation {
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::SignUp => {
                "Sign up successful! Please check your email to verify your account."
            }
            Operation::SignIn => "Sign in successful!",
            Operation::SignOut => "Signed out successfully!",
            Operation::UpdateProfile => "Profile updated successfully!",
        }
    }

    /// Shown when the provider's error carries no message of its own.
    #[must_use]
    pub fn failure_fallback(self) -> &'static str {
        match self {
            Operation::SignUp => "Sign up failed",
            Operation::SignIn => "Sign in failed",
            Operation::SignOut => "Sign out failed",
            Operation::UpdateProfile => "Profile update failed",
        }
    }
}

/// An identity operation failed. Displays the provider's message verbatim,
/// or the operation's fallback when there is none.
#[derive(Debug, Error)]
#[error("{}", describe_failure(.source, .operation.failure_fallback()))]
pub struct SessionError {
    pub operation: Operation,
    #[source]
    pub source: AuthError,
}

/// User-facing text for `err`: its own message, or `fallback` when blank.
#[must_use]
pub fn describe_failure(err: &AuthError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

pub struct IdentitySession<P> {
    provider: Arc<P>,
    state: Arc<watch::Sender<SessionState>>,
    listener: JoinHandle<()>,
}

impl<P: IdentityProvider + 'static> IdentitySession<P> {
    /// Loads the initial session and starts mirroring provider changes.
    ///
    /// A failed initial lookup is logged and leaves the user signed out.
    pub async fn start(provider: Arc<P>) -> Self {
        let (state, _) = watch::channel(SessionState {
            user: None,
            loading: true,
        });
        let state = Arc::new(state);

        // Subscribe before the initial lookup so no change can slip between.
        let changes = provider.subscribe();

        match provider.get_session().await {
            Ok(session) => state.send_modify(|s| s.user = session.map(|s| s.user)),
            Err(e) => tracing::error!(error = %e, "error getting session"),
        }
        state.send_modify(|s| s.loading = false);

        let listener = tokio::spawn(mirror_changes(changes, Arc::clone(&state)));

        Self {
            provider,
            state,
            listener,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Receiver that observes every subsequent state change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// # Errors
    ///
    /// Returns [`SessionError`] wrapping the provider's failure.
    pub async fn sign_up(&self, data: &SignUpData) -> Result<(), SessionError> {
        let result = self.provider.sign_up(data).await.map(|_| ());
        report(Operation::SignUp, result)
    }

    /// # Errors
    ///
    /// Returns [`SessionError`] wrapping the provider's failure.
    pub async fn sign_in(&self, data: &SignInData) -> Result<(), SessionError> {
        let result = self.provider.sign_in(data).await.map(|_| ());
        report(Operation::SignIn, result)
    }

    /// # Errors
    ///
    /// Returns [`SessionError`] wrapping the provider's failure.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let result = self.provider.sign_out().await;
        report(Operation::SignOut, result)
    }

    /// # Errors
    ///
    /// Returns [`SessionError`] wrapping the provider's failure.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), SessionError> {
        let result = self.provider.update_profile(update).await.map(|_| ());
        report(Operation::UpdateProfile, result)
    }
}

impl<P> Drop for IdentitySession<P> {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn mirror_changes(
    mut changes: broadcast::Receiver<crate::types::SessionChange>,
    state: Arc<watch::Sender<SessionState>>,
) {
    loop {
        match changes.recv().await {
            Ok(change) => {
                tracing::debug!(event = ?change.event, "session changed");
                state.send_modify(|s| {
                    s.user = change.session.map(|session| session.user);
                    s.loading = false;
                });
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "session listener lagged behind provider");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn report(operation: Operation, result: Result<(), AuthError>) -> Result<(), SessionError> {
    match result {
        Ok(()) => {
            tracing::info!(?operation, "{}", operation.success_message());
            Ok(())
        }
        Err(source) => {
            let err = SessionError { operation, source };
            tracing::error!(?operation, error = %err, "identity operation failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::{AuthEvent, Session, SessionChange, UserMetadata};

    struct FakeProvider {
        session: Mutex<Option<Session>>,
        events: broadcast::Sender<SessionChange>,
        fail_with: Mutex<Option<String>>,
    }

    impl FakeProvider {
        fn new(initial: Option<Session>) -> Arc<Self> {
            let (events, _) = broadcast::channel(8);
            Arc::new(Self {
                session: Mutex::new(initial),
                events,
                fail_with: Mutex::new(None),
            })
        }

        fn fail_next(&self, message: &str) {
            *self.fail_with.lock().unwrap() = Some(message.to_owned());
        }

        fn take_failure(&self) -> Result<(), AuthError> {
            match self.fail_with.lock().unwrap().take() {
                Some(message) => Err(AuthError::Provider {
                    status: 400,
                    message,
                }),
                None => Ok(()),
            }
        }

        fn publish(&self, event: AuthEvent, session: Option<Session>) {
            *self.session.lock().unwrap() = session.clone();
            let _ = self.events.send(SessionChange { event, session });
        }
    }

    impl IdentityProvider for FakeProvider {
        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            self.take_failure()?;
            Ok(self.session.lock().unwrap().clone())
        }

        async fn sign_up(&self, _data: &SignUpData) -> Result<Option<Session>, AuthError> {
            self.take_failure()?;
            Ok(None)
        }

        async fn sign_in(&self, data: &SignInData) -> Result<Session, AuthError> {
            self.take_failure()?;
            let session = session_for(&data.email);
            self.publish(AuthEvent::SignedIn, Some(session.clone()));
            Ok(session)
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.take_failure()?;
            self.publish(AuthEvent::SignedOut, None);
            Ok(())
        }

        async fn update_profile(&self, update: &ProfileUpdate) -> Result<SessionUser, AuthError> {
            self.take_failure()?;
            let mut session = self
                .session
                .lock()
                .unwrap()
                .clone()
                .ok_or(AuthError::NotSignedIn)?;
            session.user.user_metadata = UserMetadata {
                first_name: Some(update.first_name.clone()),
                last_name: Some(update.last_name.clone()),
            };
            self.publish(AuthEvent::UserUpdated, Some(session.clone()));
            Ok(session.user)
        }

        fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
            self.events.subscribe()
        }
    }

    fn session_for(email: &str) -> Session {
        Session {
            access_token: "token".to_owned(),
            token_type: Some("bearer".to_owned()),
            expires_in: Some(3600),
            refresh_token: None,
            user: SessionUser {
                id: format!("id-{email}"),
                email: email.to_owned(),
                user_metadata: UserMetadata::default(),
            },
        }
    }

    fn sign_in_data() -> SignInData {
        SignInData {
            email: "ada@example.com".to_owned(),
            password: "pw".to_owned(),
        }
    }

    #[tokio::test]
    async fn start_loads_initial_session_and_clears_loading() {
        let provider = FakeProvider::new(Some(session_for("ada@example.com")));
        let session = IdentitySession::start(provider).await;

        assert!(!session.is_loading());
        assert_eq!(
            session.user().map(|u| u.email).as_deref(),
            Some("ada@example.com")
        );
    }

    #[tokio::test]
    async fn start_with_failing_lookup_is_signed_out() {
        let provider = FakeProvider::new(Some(session_for("ada@example.com")));
        provider.fail_next("network down");
        let session = IdentitySession::start(provider).await;

        assert!(!session.is_loading());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn sign_in_and_out_are_mirrored_through_watch() {
        let provider = FakeProvider::new(None);
        let session = IdentitySession::start(Arc::clone(&provider)).await;
        let mut rx = session.watch();

        session.sign_in(&sign_in_data()).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().user.as_ref().map(|u| u.email.clone()).as_deref(),
            Some("ada@example.com")
        );

        session.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().user.is_none());
    }

    #[tokio::test]
    async fn update_profile_updates_user_metadata() {
        let provider = FakeProvider::new(Some(session_for("ada@example.com")));
        let session = IdentitySession::start(Arc::clone(&provider)).await;
        let mut rx = session.watch();

        session
            .update_profile(&ProfileUpdate {
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
            })
            .await
            .unwrap();
        rx.changed().await.unwrap();

        let user = rx.borrow_and_update().user.clone().unwrap();
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn provider_message_is_surfaced_verbatim() {
        let provider = FakeProvider::new(None);
        let session = IdentitySession::start(Arc::clone(&provider)).await;

        provider.fail_next("Invalid login credentials");
        let err = session.sign_in(&sign_in_data()).await.unwrap_err();
        assert_eq!(err.operation, Operation::SignIn);
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn blank_provider_message_uses_fallback() {
        let provider = FakeProvider::new(None);
        let session = IdentitySession::start(Arc::clone(&provider)).await;

        provider.fail_next("");
        let err = session.sign_in(&sign_in_data()).await.unwrap_err();
        assert_eq!(err.to_string(), "Sign in failed");
    }

    #[tokio::test]
    async fn drop_tears_down_subscription() {
        let provider = FakeProvider::new(None);
        let session = IdentitySession::start(Arc::clone(&provider)).await;
        assert_eq!(provider.events.receiver_count(), 1);

        drop(session);
        for _ in 0..100 {
            if provider.events.receiver_count() == 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(provider.events.receiver_count(), 0);
    }
}
