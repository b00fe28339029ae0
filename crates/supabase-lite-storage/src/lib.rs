//! Supabase Storage access for supabase-lite.
//!
//! Two object operations against `/storage/v1/object/...`: a strict
//! `upload` and a best-effort `remove`.
//!
//! # Usage
//!
//! ```ignore
//! use supabase_lite::prelude::*;
//!
//! let client = SupabaseClient::new(SupabaseConfig::from_env()?)?;
//! let bucket = client.storage().from_("resumes");
//! let _ = bucket.remove(&["u1/resume.pdf"]).await;
//! bucket.upload("u1/resume.pdf", bytes, Some(FileOptions::new().content_type("application/pdf"))).await?;
//! ```

pub mod bucket_api;
pub mod client;
pub mod error;
pub mod types;

pub use bucket_api::StorageBucket;
pub use client::StorageClient;
pub use error::StorageError;
pub use types::FileOptions;

use supabase_lite_core::SupabaseClient;

/// Extension trait to create a [`StorageClient`] from a [`SupabaseClient`].
pub trait SupabaseClientStorageExt {
    /// Storage API bound to the client's service_role key.
    fn storage(&self) -> StorageClient;
}

impl SupabaseClientStorageExt for SupabaseClient {
    fn storage(&self) -> StorageClient {
        StorageClient::new(self.clone())
    }
}
