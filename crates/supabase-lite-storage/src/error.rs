use supabase_lite_core::SupabaseError;

/// Storage-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// HTTP transport error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage API rejected the request. `body` is the raw response text.
    #[error("Storage Error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Invalid bucket, path or option header.
    #[error("Invalid storage request: {0}")]
    InvalidRequest(String),
}

impl From<StorageError> for SupabaseError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Http(e) => SupabaseError::Http(e),
            other => SupabaseError::Storage(other.to_string()),
        }
    }
}
