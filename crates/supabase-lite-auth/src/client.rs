use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use supabase_lite_core::SupabaseClient;

use crate::error::AuthError;
use crate::types::{AuthSession, AuthState, AuthUser};

/// Longest slice of a rejection body that goes into logs.
const LOG_BODY_LIMIT: usize = 200;

/// Token introspection against the GoTrue endpoint `/auth/v1/user`.
///
/// # Example
/// ```ignore
/// let session = client.auth().get_user(token).await;
/// match session.user {
///     Some(user) => println!("hello {}", user.id),
///     None => println!("rejected"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: SupabaseClient,
}

impl AuthClient {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// URL of the identity endpoint.
    pub fn user_url(&self) -> String {
        self.client.endpoint("auth/v1/user")
    }

    /// Ask the identity endpoint who `token` belongs to.
    ///
    /// Never fails: a non-200 reply, a body without `id`, or a transport
    /// error all yield an unresolved session.
    pub async fn get_user(&self, token: &str) -> AuthSession {
        let headers = match self.introspection_headers(token) {
            Some(h) => h,
            None => {
                tracing::warn!("Auth failed: token is not a valid header value");
                return AuthSession::unresolved();
            }
        };

        let url = self.user_url();
        tracing::debug!(url = %url, "Introspecting bearer token");

        let resp = match self.client.http().get(&url).headers(headers).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Auth request failed");
                return AuthSession::unresolved();
            }
        };

        let status = resp.status().as_u16();
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(status, error = %e, "Auth response could not be read");
                return AuthSession::unresolved();
            }
        };

        if status != 200 {
            tracing::warn!(status, body = %truncate(&body, LOG_BODY_LIMIT), "Auth failed");
            return AuthSession::unresolved();
        }

        match serde_json::from_str::<AuthUser>(&body) {
            Ok(user) => AuthSession::resolved(user),
            Err(e) => {
                tracing::warn!(error = %e, "Auth response has no usable user id");
                AuthSession::unresolved()
            }
        }
    }

    /// Advance a request's authentication state. Only `Pending` makes a call;
    /// every other state is returned unchanged.
    pub async fn resolve(&self, state: AuthState) -> AuthState {
        match state {
            AuthState::Pending { token } => self.get_user(&token).await.into(),
            other => other,
        }
    }

    /// Authenticate from a raw `Authorization` header value.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<AuthUser, AuthError> {
        match self.resolve(AuthState::from_header(header)).await {
            AuthState::Resolved(user) => Ok(user),
            AuthState::Unauthenticated => Err(AuthError::NotAuthenticated),
            AuthState::Pending { .. } | AuthState::Rejected => Err(AuthError::InvalidToken),
        }
    }

    fn introspection_headers(&self, token: &str) -> Option<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(self.client.introspection_key()).ok()?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).ok()?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Some(headers)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
