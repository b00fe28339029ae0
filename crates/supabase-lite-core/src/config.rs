use crate::error::{SupabaseError, SupabaseResult};

/// Environment variable holding the project URL.
pub const ENV_URL: &str = "SUPABASE_URL";
/// Environment variable holding the privileged (service_role) key.
pub const ENV_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
/// Environment variable holding the optional anon key.
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Deployment coordinates for one Supabase project.
///
/// The service_role key authorizes table and storage calls. The anon key,
/// when present, is the lower-privilege key sent alongside user tokens during
/// introspection.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g. "https://xyzcompany.supabase.co")
    pub supabase_url: String,
    /// Privileged service_role key
    pub service_key: String,
    /// Optional anon key used for token introspection
    pub anon_key: Option<String>,
}

impl SupabaseConfig {
    /// Create a config from a project URL and a service_role key.
    pub fn new(supabase_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            service_key: service_key.into(),
            anon_key: None,
        }
    }

    /// Set the anon key used for token introspection.
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Read the config from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// An empty `SUPABASE_ANON_KEY` counts as unset.
    pub fn from_env() -> SupabaseResult<Self> {
        dotenvy::dotenv().ok();

        let config = Self::new(require_env(ENV_URL)?, require_env(ENV_SERVICE_ROLE_KEY)?);
        Ok(match optional_env(ENV_ANON_KEY) {
            Some(anon) => config.anon_key(anon),
            None => config,
        })
    }
}

// Keys stay out of debug output.
impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("supabase_url", &self.supabase_url)
            .field("service_key", &"<redacted>")
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn require_env(key: &str) -> SupabaseResult<String> {
    optional_env(key).ok_or_else(|| {
        SupabaseError::config(format!("Required environment variable '{key}' is not set"))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
