use supabase_lite_core::SupabaseError;

/// Why a request could not be authenticated.
///
/// Introspection itself never fails; these are produced by
/// [`AuthClient::authenticate`](crate::AuthClient::authenticate) for callers
/// that want an error to map onto a 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header, or not a bearer token.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The identity endpoint did not resolve a user for the token.
    #[error("Invalid token")]
    InvalidToken,
}

impl AuthError {
    /// HTTP status a route layer should answer with.
    pub fn status(&self) -> u16 {
        401
    }
}

impl From<AuthError> for SupabaseError {
    fn from(err: AuthError) -> Self {
        SupabaseError::Auth(err.to_string())
    }
}
