//! Bearer token introspection for supabase-lite.
//!
//! Tokens are validated by asking GoTrue (`GET /auth/v1/user`) who they
//! belong to rather than by decoding them locally. A rejected token is an
//! expected outcome, so [`AuthClient::get_user`] reports it as an unresolved
//! [`AuthSession`] instead of an error.
//!
//! # Usage
//!
//! ```ignore
//! use supabase_lite::prelude::*;
//!
//! let user = client.auth().authenticate(headers.get("authorization")).await?;
//! println!("request from {}", user.id);
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::AuthClient;
pub use error::AuthError;
pub use types::{AuthSession, AuthState, AuthUser};

use supabase_lite_core::SupabaseClient;

/// Extension trait to create an [`AuthClient`] from a [`SupabaseClient`].
pub trait SupabaseClientAuthExt {
    fn auth(&self) -> AuthClient;
}

impl SupabaseClientAuthExt for SupabaseClient {
    fn auth(&self) -> AuthClient {
        AuthClient::new(self.clone())
    }
}
