use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Log filter used when `PLACESCOUT_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Production => "warn",
            Environment::Development | Environment::Test => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub places_base_url: String,
    pub location_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Pause before each follow-up page request of a directory search.
    pub page_delay_ms: u64,
    pub catalog_path: PathBuf,
    /// JSON file holding the API key and the signed-in session.
    pub store_path: PathBuf,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("places_base_url", &self.places_base_url)
            .field("location_base_url", &self.location_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("catalog_path", &self.catalog_path)
            .field("store_path", &self.store_path)
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_anon_key",
                &self.supabase_anon_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
