use std::future::Future;

use tokio::sync::broadcast;

use crate::error::AuthError;
use crate::types::{ProfileUpdate, Session, SessionChange, SessionUser, SignInData, SignUpData};

/// Session lifecycle of a hosted identity provider.
///
/// Implementations own the current session and push every change to
/// subscribers returned by [`IdentityProvider::subscribe`].
pub trait IdentityProvider: Send + Sync {
    /// Returns the current session, if any.
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>, AuthError>> + Send;

    /// Registers a new account. Returns `None` when the provider requires
    /// email confirmation before issuing a session.
    fn sign_up(
        &self,
        data: &SignUpData,
    ) -> impl Future<Output = Result<Option<Session>, AuthError>> + Send;

    fn sign_in(&self, data: &SignInData) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    /// Replaces the profile metadata of the signed-in user.
    fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<SessionUser, AuthError>> + Send;

    /// Stream of session changes. Each call returns an independent receiver.
    fn subscribe(&self) -> broadcast::Receiver<SessionChange>;
}
