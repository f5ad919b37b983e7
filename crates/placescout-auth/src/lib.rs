pub mod error;
pub mod gotrue;
pub mod provider;
pub mod session;
pub mod types;

pub use error::AuthError;
pub use gotrue::GoTrueClient;
pub use provider::IdentityProvider;
pub use session::{describe_failure, IdentitySession, Operation, SessionError, SessionState};
pub use types::{
    AuthEvent, ProfileUpdate, Session, SessionChange, SessionUser, SignInData, SignUpData,
    UserMetadata,
};
