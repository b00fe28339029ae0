use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::SupabaseConfig;
use crate::error::{SupabaseError, SupabaseResult};

/// Root handle to one Supabase deployment.
///
/// Holds the validated coordinates and a shared HTTP client. Cloning is cheap;
/// hand clones to every consumer instead of keeping a global.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: Url,
    config: SupabaseConfig,
}

impl SupabaseClient {
    /// Validate the configuration and build the client.
    pub fn new(config: SupabaseConfig) -> SupabaseResult<Self> {
        let base = config.supabase_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(SupabaseError::config("Supabase URL is empty"));
        }
        let base_url = Url::parse(base)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SupabaseError::config(format!(
                "Supabase URL must be http or https, got '{}'",
                base_url.scheme()
            )));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(SupabaseError::config(
                "Supabase URL must not carry a query string or fragment",
            ));
        }

        if config.service_key.trim().is_empty() {
            return Err(SupabaseError::config("service_role key is empty"));
        }
        header_value(&config.service_key, "service_role key")?;
        if let Some(anon) = &config.anon_key {
            header_value(anon, "anon key")?;
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(SupabaseError::Http)?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url,
                config,
            }),
        })
    }

    /// The project URL, without a trailing slash.
    pub fn supabase_url(&self) -> &str {
        self.inner.base_url.as_str().trim_end_matches('/')
    }

    /// The privileged key used for table and storage calls.
    pub fn service_key(&self) -> &str {
        &self.inner.config.service_key
    }

    /// The key sent as `apikey` during token introspection: the anon key when
    /// configured, otherwise the service_role key.
    pub fn introspection_key(&self) -> &str {
        self.inner
            .config
            .anon_key
            .as_deref()
            .unwrap_or(&self.inner.config.service_key)
    }

    /// Get the full config.
    pub fn config(&self) -> &SupabaseConfig {
        &self.inner.config
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Join a service path such as `/rest/v1/profiles` onto the project URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.supabase_url(), path.trim_start_matches('/'))
    }

    /// `apikey` and bearer `Authorization` headers for the service_role key.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        // Validated in `new`.
        if let Ok(key) = HeaderValue::from_str(self.service_key()) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.service_key())) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers
    }

    /// [`auth_headers`](Self::auth_headers) plus `Content-Type: application/json`.
    pub fn service_headers(&self) -> HeaderMap {
        let mut headers = self.auth_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

fn header_value(value: &str, what: &str) -> SupabaseResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SupabaseError::config(format!("Invalid {what} header: {e}")))
}
