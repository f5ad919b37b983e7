//! Session and user shapes mirrored from the identity provider.
//!
//! Only the fields this application reads are modelled; everything else in
//! the provider's user object is ignored on deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl SessionUser {
    /// `"First Last"` from the profile metadata, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [
            self.user_metadata.first_name.as_deref(),
            self.user_metadata.last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: SessionUser,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[redacted]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[redacted]"),
            )
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Clone)]
pub struct SignUpData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl std::fmt::Debug for SignUpData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpData")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

#[derive(Clone)]
pub struct SignInData {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInData")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    UserUpdated,
}

/// Pushed by the provider whenever the current session changes.
#[derive(Debug, Clone)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> SessionUser {
        SessionUser {
            id: "u1".to_owned(),
            email: "ada@example.com".to_owned(),
            user_metadata: UserMetadata {
                first_name: first.map(str::to_owned),
                last_name: last.map(str::to_owned),
            },
        }
    }

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(user(Some("Ada"), Some("Lovelace")).display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(user(None, Some("  ")).display_name(), "ada@example.com");
    }

    #[test]
    fn session_user_ignores_unknown_provider_fields() {
        let user: SessionUser = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "aud": "authenticated",
            "email": "ada@example.com",
            "user_metadata": { "first_name": "Ada", "avatar_url": "x" },
            "app_metadata": { "provider": "email" }
        }))
        .unwrap();
        assert_eq!(user.user_metadata.first_name.as_deref(), Some("Ada"));
        assert!(user.user_metadata.last_name.is_none());
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = Session {
            access_token: "secret-access".to_owned(),
            token_type: Some("bearer".to_owned()),
            expires_in: Some(3600),
            refresh_token: Some("secret-refresh".to_owned()),
            user: user(None, None),
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }

    #[test]
    fn sign_in_debug_redacts_password() {
        let data = SignInData {
            email: "ada@example.com".to_owned(),
            password: "hunter2".to_owned(),
        };
        assert!(!format!("{data:?}").contains("hunter2"));
    }
}
