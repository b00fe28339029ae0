//! Minimal Supabase client built on raw HTTP.
//!
//! Covers what the résumé analyzer backend needs and nothing more:
//! PostgREST select/upsert, Storage upload/remove, and bearer token
//! introspection. One [`SupabaseClient`] is built from a
//! [`SupabaseConfig`] at startup and cloned into every consumer.
//!
//! ```ignore
//! use supabase_lite::prelude::*;
//!
//! let client = SupabaseClient::new(SupabaseConfig::from_env()?)?;
//! let rows = client
//!     .table("profile_resumes")
//!     .select("*")
//!     .eq("user_id", "u1")
//!     .execute()
//!     .await?;
//! ```

pub mod profile;

pub use supabase_lite_core::*;
pub use supabase_lite_query::{
    Filterable, QueryBuilder, Request, SupabaseClientQueryExt, MERGE_DUPLICATES,
};
pub use supabase_lite_storage::{
    FileOptions, StorageBucket, StorageClient, StorageError, SupabaseClientStorageExt,
};
pub use supabase_lite_auth::{
    AuthClient, AuthError, AuthSession, AuthState, AuthUser, SupabaseClientAuthExt,
};

pub use profile::{ProfileResume, ProfileResumes};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use supabase_lite::prelude::*;
/// ```
pub mod prelude {
    pub use supabase_lite_core::{
        Decode, Row, SupabaseClient, SupabaseConfig, SupabaseError, SupabaseResponse,
        SupabaseResult,
    };

    pub use supabase_lite_query::{Filterable, SupabaseClientQueryExt};

    pub use supabase_lite_storage::{FileOptions, StorageError, SupabaseClientStorageExt};

    pub use supabase_lite_auth::{
        AuthError, AuthSession, AuthState, AuthUser, SupabaseClientAuthExt,
    };

    pub use crate::profile::{ProfileResume, ProfileResumes};
}
