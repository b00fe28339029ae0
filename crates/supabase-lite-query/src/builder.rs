use std::collections::BTreeMap;

use reqwest::header::HeaderValue;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value as JsonValue;

use supabase_lite_core::{SupabaseClient, SupabaseError, SupabaseResponse, SupabaseResult};

use crate::execute;
use crate::filter::{validate_table_name, Filterable};

/// `Prefer` header sent with every upsert.
pub const MERGE_DUPLICATES: &str = "resolution=merge-duplicates";

/// What a builder will do when executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// GET the table with the accumulated parameters.
    Read,
    /// POST `payload` with merge-on-duplicate-key resolution.
    Write { payload: JsonValue },
}

/// A single PostgREST request against one table.
///
/// Created by `client.table("name")`, configured by value-chaining and
/// consumed by [`execute`](Self::execute), so each builder makes exactly one
/// round trip.
///
/// ```ignore
/// let rows = client
///     .table("profile_resumes")
///     .select("filename,uploaded_at")
///     .eq("user_id", user_id)
///     .execute()
///     .await?;
/// ```
#[derive(Debug)]
pub struct QueryBuilder {
    client: SupabaseClient,
    table: String,
    params: BTreeMap<String, String>,
    request: Request,
    error: Option<SupabaseError>,
}

impl Filterable for QueryBuilder {
    fn params_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.params
    }

    // The first error wins.
    fn defer_error(&mut self, err: SupabaseError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

impl QueryBuilder {
    pub fn new(client: SupabaseClient, table: impl Into<String>) -> Self {
        let table = table.into();
        let error = validate_table_name(&table).err();
        Self {
            client,
            table,
            params: BTreeMap::new(),
            request: Request::Read,
            error,
        }
    }

    /// Request columns, e.g. `"*"` or `"filename,uploaded_at"`.
    pub fn select(mut self, columns: &str) -> Self {
        let columns = if columns.trim().is_empty() { "*" } else { columns };
        self.params.insert("select".to_string(), columns.to_string());
        self
    }

    /// Shorthand for `select("*")`.
    pub fn select_all(self) -> Self {
        self.select("*")
    }

    /// Turn this builder into an upsert of `data`.
    ///
    /// `on_conflict` names the conflict target column(s), comma separated.
    /// Filters set before or after still travel as query parameters.
    pub fn upsert<T: Serialize>(mut self, data: &T, on_conflict: Option<&str>) -> Self {
        match serde_json::to_value(data) {
            Ok(payload) => self.request = Request::Write { payload },
            Err(e) => self.defer_error(SupabaseError::serialization(format!(
                "Failed to serialize upsert payload: {e}"
            ))),
        }
        if let Some(columns) = on_conflict {
            self.params
                .insert("on_conflict".to_string(), columns.to_string());
        }
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// The query parameters that will be sent.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn is_write(&self) -> bool {
        matches!(self.request, Request::Write { .. })
    }

    /// HTTP method `execute` will use.
    pub fn method(&self) -> Method {
        match self.request {
            Request::Read => Method::GET,
            Request::Write { .. } => Method::POST,
        }
    }

    /// Perform the request.
    ///
    /// Status >= 400 becomes [`SupabaseError::DataStore`] with the raw body.
    /// A 204 or empty body yields an empty object; a body that is not JSON
    /// yields an empty object marked [`Decode::Lenient`](supabase_lite_core::Decode::Lenient).
    pub async fn execute(self) -> SupabaseResult<SupabaseResponse> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let url = self.client.endpoint(&format!("rest/v1/{}", self.table));
        let mut headers = self.client.service_headers();
        let method = match self.request {
            Request::Read => Method::GET,
            Request::Write { .. } => Method::POST,
        };
        let body = match self.request {
            Request::Read => None,
            Request::Write { payload } => {
                headers.insert("Prefer", HeaderValue::from_static(MERGE_DUPLICATES));
                Some(payload)
            }
        };

        execute::execute_rest(
            self.client.http(),
            method,
            &url,
            headers,
            &self.params,
            body,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use supabase_lite_core::SupabaseConfig;

    fn builder(table: &str) -> QueryBuilder {
        let client = SupabaseClient::new(SupabaseConfig::new("http://localhost:54321", "service"))
            .unwrap();
        QueryBuilder::new(client, table)
    }

    #[test]
    fn select_records_columns() {
        let qb = builder("profile_resumes").select("text");
        assert_eq!(qb.params().get("select").map(String::as_str), Some("text"));
        assert_eq!(qb.method(), Method::GET);
    }

    #[test]
    fn empty_select_means_all_columns() {
        let qb = builder("profile_resumes").select("");
        assert_eq!(qb.params().get("select").map(String::as_str), Some("*"));
    }

    #[test]
    fn eq_last_write_wins() {
        let qb = builder("profile_resumes")
            .eq("user_id", "first")
            .eq("filename", "cv.pdf")
            .eq("user_id", "second");
        assert_eq!(qb.params().len(), 2);
        assert_eq!(qb.params()["user_id"], "eq.second");
        assert_eq!(qb.params()["filename"], "eq.cv.pdf");
    }

    #[test]
    fn eq_formats_numbers() {
        let qb = builder("jobs").eq("id", 42);
        assert_eq!(qb.params()["id"], "eq.42");
    }

    #[tokio::test]
    async fn eq_on_reserved_column_fails_the_query() {
        let qb = builder("jobs").select("*").eq("order", 2);
        assert!(!qb.params().contains_key("order"));
        let err = qb.execute().await.unwrap_err();
        match err {
            SupabaseError::Validation(msg) => assert!(msg.contains("order")),
            other => panic!("Expected Validation, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn eq_on_malformed_column_fails_the_query() {
        for column in ["", "a&b=c", "name;drop"] {
            let err = builder("jobs")
                .eq(column, "x")
                .eq("user_id", "u1")
                .execute()
                .await
                .unwrap_err();
            assert!(matches!(err, SupabaseError::Validation(_)), "{column:?}: {err:?}");
        }
    }

    #[tokio::test]
    async fn first_deferred_error_is_kept() {
        let err = builder("jobs")
            .eq("select", "x")
            .eq("", "y")
            .execute()
            .await
            .unwrap_err();
        match err {
            SupabaseError::Validation(msg) => assert!(msg.contains("reserved")),
            other => panic!("Expected Validation, got: {other:?}"),
        }
    }

    #[test]
    fn upsert_switches_to_write() {
        let qb = builder("profile_resumes")
            .eq("user_id", "u1")
            .upsert(&json!({"user_id": "u1"}), Some("user_id"));
        assert!(qb.is_write());
        assert_eq!(qb.method(), Method::POST);
        assert_eq!(qb.params()["on_conflict"], "user_id");
        assert_eq!(qb.params()["user_id"], "eq.u1");
        assert_eq!(
            qb.request(),
            &Request::Write {
                payload: json!({"user_id": "u1"})
            }
        );
    }

    #[test]
    fn upsert_without_conflict_target() {
        let qb = builder("profile_resumes").upsert(&json!([{"a": 1}]), None);
        assert!(qb.is_write());
        assert!(!qb.params().contains_key("on_conflict"));
    }

    #[tokio::test]
    async fn invalid_table_fails_without_network() {
        let err = builder("a/b").select_all().execute().await.unwrap_err();
        assert!(matches!(err, SupabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn unserializable_payload_fails_without_network() {
        use std::collections::HashMap;
        // Non-string map keys cannot become JSON object keys.
        let mut bad: HashMap<(i32, i32), i32> = HashMap::new();
        bad.insert((1, 2), 3);
        let qb = builder("profile_resumes").upsert(&bad, None);
        assert!(!qb.is_write());
        let err = qb.execute().await.unwrap_err();
        assert!(matches!(err, SupabaseError::Serialization(_)));
    }
}
