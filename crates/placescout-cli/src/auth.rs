//! Account commands. The signed-in session is kept in the local store so it
//! survives between invocations.

use std::sync::Arc;

use anyhow::Context;
use placescout_auth::{
    GoTrueClient, IdentitySession, Operation, ProfileUpdate, Session, SignInData, SignUpData,
};
use placescout_core::{AppConfig, KeyedFileStore};

/// Store key holding the serialized session.
pub(crate) const SESSION_KEY: &str = "auth_session";

pub(crate) struct AuthContext {
    store: KeyedFileStore,
    provider: Arc<GoTrueClient>,
    session: IdentitySession<GoTrueClient>,
}

impl AuthContext {
    /// Builds the identity client from config and restores any saved session.
    ///
    /// # Errors
    ///
    /// Returns an error if the Supabase project is not configured or the
    /// client cannot be built.
    pub(crate) async fn open(config: &AppConfig, store: KeyedFileStore) -> anyhow::Result<Self> {
        let (Some(url), Some(anon_key)) = (
            config.supabase_url.as_deref(),
            config.supabase_anon_key.as_deref(),
        ) else {
            anyhow::bail!("SUPABASE_URL and SUPABASE_ANON_KEY must be set to use account commands");
        };

        let client = GoTrueClient::new(url, anon_key, config.request_timeout_secs)?
            .with_session(restore_session(&store));
        let provider = Arc::new(client);
        let session = IdentitySession::start(Arc::clone(&provider)).await;

        Ok(Self {
            store,
            provider,
            session,
        })
    }

    pub(crate) async fn sign_up(&self, data: &SignUpData) -> anyhow::Result<()> {
        self.session.sign_up(data).await?;
        self.persist()?;
        println!("{}", Operation::SignUp.success_message());
        Ok(())
    }

    pub(crate) async fn sign_in(&self, data: &SignInData) -> anyhow::Result<()> {
        self.session.sign_in(data).await?;
        self.persist()?;
        println!("{}", Operation::SignIn.success_message());
        Ok(())
    }

    pub(crate) async fn sign_out(&self) -> anyhow::Result<()> {
        self.session.sign_out().await?;
        self.persist()?;
        println!("{}", Operation::SignOut.success_message());
        Ok(())
    }

    pub(crate) async fn update_profile(&self, update: &ProfileUpdate) -> anyhow::Result<()> {
        self.session.update_profile(update).await?;
        self.persist()?;
        println!("{}", Operation::UpdateProfile.success_message());
        Ok(())
    }

    pub(crate) fn whoami(&self) {
        match self.session.user() {
            Some(user) => println!("{} <{}>", user.display_name(), user.email),
            None => println!("not signed in"),
        }
    }

    fn persist(&self) -> anyhow::Result<()> {
        persist_session(&self.store, self.provider.current_session().as_ref())
    }
}

/// Reads the saved session; an unreadable entry is logged and ignored.
pub(crate) fn restore_session(store: &KeyedFileStore) -> Option<Session> {
    let raw = match store.get(SESSION_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "could not read saved session");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable saved session");
            None
        }
    }
}

pub(crate) fn persist_session(
    store: &KeyedFileStore,
    session: Option<&Session>,
) -> anyhow::Result<()> {
    match session {
        Some(session) => {
            let raw = serde_json::to_string(session).context("failed to serialize session")?;
            store.set(SESSION_KEY, &raw)?;
        }
        None => store.remove(SESSION_KEY)?,
    }
    Ok(())
}
