//! A user's saved profile résumé: the PDF in Storage plus a row holding
//! its extracted text.

use serde::{Deserialize, Serialize};

use supabase_lite_core::{SupabaseClient, SupabaseError, SupabaseResult};
use supabase_lite_query::{Filterable, SupabaseClientQueryExt};
use supabase_lite_storage::{FileOptions, SupabaseClientStorageExt};

pub const DEFAULT_BUCKET: &str = "resumes";
pub const DEFAULT_TABLE: &str = "profile_resumes";

/// Texts shorter than this (after trimming) are treated as failed
/// extractions, e.g. scanned PDFs.
pub const MIN_TEXT_CHARS: usize = 50;

/// One row of the profile table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResume {
    pub user_id: String,
    pub filename: String,
    /// RFC 3339 timestamp of the upload.
    pub uploaded_at: String,
    pub text: String,
    pub storage_path: String,
}

/// Profile résumé repository over one bucket and one table.
#[derive(Debug, Clone)]
pub struct ProfileResumes {
    client: SupabaseClient,
    bucket: String,
    table: String,
}

impl ProfileResumes {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client,
            bucket: DEFAULT_BUCKET.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Object path of a user's résumé.
    pub fn storage_path(user_id: &str) -> String {
        format!("{user_id}/resume.pdf")
    }

    /// Replace the user's stored PDF and upsert its metadata row.
    ///
    /// The old object is removed first on a best-effort basis; the upload
    /// and the upsert must both succeed.
    pub async fn save(
        &self,
        user_id: &str,
        filename: &str,
        pdf: Vec<u8>,
        text: &str,
    ) -> SupabaseResult<ProfileResume> {
        validate_user_id(user_id)?;
        if !is_pdf_filename(filename) {
            return Err(SupabaseError::validation("Only PDF files are allowed."));
        }
        if text.trim().chars().count() < MIN_TEXT_CHARS {
            return Err(SupabaseError::validation(
                "Could not extract sufficient text from this PDF (scanned or empty).",
            ));
        }

        let path = Self::storage_path(user_id);
        let bucket = self.client.storage().from_(&self.bucket);

        match bucket.remove(&[path.as_str()]).await {
            Ok(resp) => tracing::debug!(status = resp.status().as_u16(), path = %path, "Removed previous resume"),
            Err(e) => tracing::debug!(error = %e, path = %path, "Ignoring failed remove"),
        }

        bucket
            .upload(
                &path,
                pdf,
                Some(FileOptions::new().content_type("application/pdf")),
            )
            .await?;

        let record = ProfileResume {
            user_id: user_id.to_string(),
            filename: filename.to_string(),
            uploaded_at: chrono::Utc::now().to_rfc3339(),
            text: text.to_string(),
            storage_path: path,
        };

        self.client
            .table(&self.table)
            .upsert(&record, Some("user_id"))
            .execute()
            .await?;

        tracing::info!(user_id = %user_id, filename = %filename, "Saved profile resume");
        Ok(record)
    }

    /// The user's saved résumé row, if any.
    pub async fn find(&self, user_id: &str) -> SupabaseResult<Option<ProfileResume>> {
        validate_user_id(user_id)?;
        self.client
            .table(&self.table)
            .select("*")
            .eq("user_id", user_id)
            .execute()
            .await?
            .first_as()
    }

    /// Only the extracted text of the user's saved résumé.
    pub async fn find_text(&self, user_id: &str) -> SupabaseResult<Option<String>> {
        validate_user_id(user_id)?;
        let resp = self
            .client
            .table(&self.table)
            .select("text")
            .eq("user_id", user_id)
            .execute()
            .await?;
        Ok(resp.first().and_then(|row| row.get_as::<String>("text")))
    }
}

fn is_pdf_filename(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf")
}

fn validate_user_id(user_id: &str) -> SupabaseResult<()> {
    if user_id.trim().is_empty() || user_id.contains(['/', '?', '#']) || user_id.contains("..") {
        return Err(SupabaseError::validation(format!(
            "Invalid user id: {user_id:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use supabase_lite_core::SupabaseConfig;

    fn repo() -> ProfileResumes {
        let client =
            SupabaseClient::new(SupabaseConfig::new("http://127.0.0.1:9", "service")).unwrap();
        ProfileResumes::new(client)
    }

    #[test]
    fn storage_path_is_per_user() {
        assert_eq!(ProfileResumes::storage_path("u1"), "u1/resume.pdf");
    }

    #[test]
    fn overrides() {
        let r = repo().with_bucket("cvs").with_table("cv_rows");
        assert_eq!(r.bucket, "cvs");
        assert_eq!(r.table, "cv_rows");
    }

    #[tokio::test]
    async fn short_text_is_rejected_before_any_call() {
        let err = repo()
            .save("u1", "cv.pdf", b"%PDF".to_vec(), "   too short   ")
            .await
            .unwrap_err();
        assert!(matches!(err, SupabaseError::Validation(_)));
    }

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(is_pdf_filename("cv.pdf"));
        assert!(is_pdf_filename("CV.PDF"));
        assert!(!is_pdf_filename("cv.docx"));
        assert!(!is_pdf_filename("pdf"));
    }

    #[tokio::test]
    async fn non_pdf_filename_is_rejected_before_any_call() {
        let text = "x".repeat(MIN_TEXT_CHARS);
        let err = repo()
            .save("u1", "resume.docx", b"PK".to_vec(), &text)
            .await
            .unwrap_err();
        match err {
            SupabaseError::Validation(msg) => assert_eq!(msg, "Only PDF files are allowed."),
            other => panic!("Expected Validation, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn path_like_user_id_is_rejected() {
        let err = repo().find("../admin").await.unwrap_err();
        assert!(matches!(err, SupabaseError::Validation(_)));
    }
}
