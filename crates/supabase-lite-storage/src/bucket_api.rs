use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;

use crate::client::{validate_bucket, validate_object_path, StorageClient};
use crate::error::StorageError;
use crate::types::FileOptions;

/// Object operations scoped to one bucket.
///
/// Created via `StorageClient::from_("bucket")`. Holds no state beyond the
/// bucket id.
///
/// # Example
/// ```ignore
/// let bucket = client.storage().from_("resumes");
/// let _ = bucket.remove(&["u1/resume.pdf"]).await;
/// bucket
///     .upload("u1/resume.pdf", pdf, Some(FileOptions::new().content_type("application/pdf")))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct StorageBucket {
    storage: StorageClient,
    bucket_id: String,
}

impl StorageBucket {
    pub(crate) fn new(storage: StorageClient, bucket_id: String) -> Self {
        Self { storage, bucket_id }
    }

    pub fn bucket_id(&self) -> &str {
        &self.bucket_id
    }

    /// Delete objects by path. Best effort: the reply is returned as-is and
    /// its status is not checked, so removing a missing object is not an
    /// error. Transport failures still propagate.
    pub async fn remove<S: AsRef<str>>(
        &self,
        paths: &[S],
    ) -> Result<reqwest::Response, StorageError> {
        validate_bucket(&self.bucket_id)?;
        let url = self.storage.object_url(&self.bucket_id, None);
        let prefixes: Vec<&str> = paths.iter().map(AsRef::as_ref).collect();
        let body = json!({ "prefixes": prefixes });

        tracing::debug!(url = %url, count = prefixes.len(), "Removing storage objects");
        let resp = self
            .storage
            .supabase()
            .http()
            .delete(url)
            .headers(self.storage.supabase().service_headers())
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            tracing::debug!(status = resp.status().as_u16(), "Storage remove was not applied");
        }
        Ok(resp)
    }

    /// Upload raw bytes to `path`.
    ///
    /// `apikey` and `Authorization` are always sent; every header in
    /// `options` is merged on top. Status >= 400 becomes
    /// [`StorageError::Api`] carrying the raw body; on success the raw
    /// response is returned untouched.
    pub async fn upload(
        &self,
        path: &str,
        data: impl Into<Vec<u8>>,
        options: Option<FileOptions>,
    ) -> Result<reqwest::Response, StorageError> {
        validate_bucket(&self.bucket_id)?;
        validate_object_path(path)?;
        let url = self.storage.object_url(&self.bucket_id, Some(path));

        let mut headers = self.storage.supabase().auth_headers();
        for (name, value) in options.unwrap_or_default().headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                StorageError::InvalidRequest(format!("Invalid header name {name:?}: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                StorageError::InvalidRequest(format!("Invalid value for header {name}: {e}"))
            })?;
            headers.insert(name, value);
        }

        let data = data.into();
        tracing::debug!(url = %url, bytes = data.len(), "Uploading storage object");
        let resp = self
            .storage
            .supabase()
            .http()
            .post(url)
            .headers(headers)
            .body(data)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let body = resp.text().await?;
            return Err(StorageError::Api { status, body });
        }
        Ok(resp)
    }
}
