use supabase_lite_core::SupabaseClient;

use crate::bucket_api::StorageBucket;
use crate::error::StorageError;

/// Factory for bucket handles on the Storage API (`/storage/v1/...`).
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: SupabaseClient,
}

impl StorageClient {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Handle to one bucket. Mirrors `supabase.storage.from_('bucket')`.
    pub fn from_(&self, bucket: &str) -> StorageBucket {
        StorageBucket::new(self.clone(), bucket.to_string())
    }

    /// Alias of [`from_`](Self::from_).
    pub fn from(&self, bucket: &str) -> StorageBucket {
        self.from_(bucket)
    }

    pub(crate) fn supabase(&self) -> &SupabaseClient {
        &self.client
    }

    /// Base URL of the storage API.
    pub fn base_url(&self) -> String {
        self.client.endpoint("storage/v1")
    }

    pub(crate) fn object_url(&self, bucket: &str, path: Option<&str>) -> String {
        match path {
            Some(path) => format!("{}/object/{}/{}", self.base_url(), bucket, path),
            None => format!("{}/object/{}", self.base_url(), bucket),
        }
    }
}

pub(crate) fn validate_bucket(bucket: &str) -> Result<(), StorageError> {
    if bucket.trim().is_empty() || bucket.contains(['/', '?', '#']) || bucket == ".." {
        return Err(StorageError::InvalidRequest(format!(
            "Invalid bucket name: {bucket:?}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_object_path(path: &str) -> Result<(), StorageError> {
    let bad = path.trim().is_empty()
        || path.starts_with('/')
        || path.contains(['?', '#', '\\'])
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if bad {
        return Err(StorageError::InvalidRequest(format!(
            "Invalid object path: {path:?}"
        )));
    }
    Ok(())
}
