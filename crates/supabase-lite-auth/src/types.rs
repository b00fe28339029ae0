use serde::{Deserialize, Serialize};

/// The caller resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user identifier (GoTrue `id`).
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Outcome of one token introspection. Not cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub user: Option<AuthUser>,
}

impl AuthSession {
    pub fn resolved(user: AuthUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn unresolved() -> Self {
        Self { user: None }
    }

    /// True when a user was resolved.
    pub fn is_valid(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn into_user(self) -> Option<AuthUser> {
        self.user
    }
}

/// Authentication step of one incoming request.
///
/// `Unauthenticated` and `Pending` come from the `Authorization` header;
/// introspection moves `Pending` to `Resolved` or `Rejected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No header, or one that is not a usable bearer token.
    Unauthenticated,
    /// A bearer token awaiting introspection.
    Pending { token: String },
    Resolved(AuthUser),
    Rejected,
}

impl AuthState {
    /// Classify an `Authorization` header value.
    ///
    /// The scheme must be `Bearer` (any case) followed by a non-empty token.
    pub fn from_header(header: Option<&str>) -> Self {
        let Some(header) = header.map(str::trim) else {
            return Self::Unauthenticated;
        };
        let Some((scheme, token)) = header.split_once(char::is_whitespace) else {
            return Self::Unauthenticated;
        };
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
            return Self::Unauthenticated;
        }
        Self::Pending {
            token: token.to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Resolved(user) => Some(user),
            _ => None,
        }
    }
}

impl From<AuthSession> for AuthState {
    fn from(session: AuthSession) -> Self {
        match session.user {
            Some(user) => Self::Resolved(user),
            None => Self::Rejected,
        }
    }
}
