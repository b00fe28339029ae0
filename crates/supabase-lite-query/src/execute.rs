use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use serde_json::Value as JsonValue;

use supabase_lite_core::{SupabaseError, SupabaseResponse, SupabaseResult};

/// Execute one PostgREST request and normalize the reply.
pub(crate) async fn execute_rest(
    http: &reqwest::Client,
    method: reqwest::Method,
    url: &str,
    headers: HeaderMap,
    params: &BTreeMap<String, String>,
    body: Option<JsonValue>,
) -> SupabaseResult<SupabaseResponse> {
    tracing::debug!(
        method = %method,
        url = %url,
        params = params.len(),
        "Executing PostgREST request"
    );

    let mut request = http.request(method, url).headers(headers).query(params);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send().await?;
    let status = response.status().as_u16();
    let body_text = response.text().await?;

    if status >= 400 {
        tracing::debug!(status, "PostgREST request rejected");
        return Err(SupabaseError::data_store(status, body_text));
    }

    Ok(SupabaseResponse::from_body(status, &body_text))
}
