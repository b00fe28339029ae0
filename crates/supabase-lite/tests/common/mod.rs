//! In-process stand-in for a Supabase deployment.
//!
//! Every request is recorded; replies are scripted per `(method, path)`.
//! Unscripted routes answer 404 with a recognizable body.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;

use supabase_lite::{SupabaseClient, SupabaseConfig};

pub const SERVICE_KEY: &str = "service-role-key";
pub const ANON_KEY: &str = "anon-key";
pub const UNSCRIPTED_BODY: &str = "no stub for this route";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
}

#[derive(Default)]
struct Shared {
    requests: Mutex<Vec<Recorded>>,
    replies: Mutex<HashMap<(String, String), Reply>>,
}

pub struct StubBackend {
    addr: SocketAddr,
    shared: Arc<Shared>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(record).with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend crashed");
        });

        Self { addr, shared }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client with both keys configured.
    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig::new(self.url(), SERVICE_KEY).anon_key(ANON_KEY))
            .expect("client for stub backend")
    }

    /// Client with only the service_role key.
    pub fn service_only_client(&self) -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig::new(self.url(), SERVICE_KEY))
            .expect("client for stub backend")
    }

    /// Script the reply for `method path`.
    pub fn reply(&self, method: &str, path: &str, status: u16, body: &str) {
        self.shared.replies.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            Reply {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// `"METHOD /path"` for every recorded request, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

async fn record(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let query = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect::<HashMap<String, String>>()
        })
        .unwrap_or_default();
    let headers = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers,
        body: body.to_vec(),
    };
    let key = (recorded.method.clone(), recorded.path.clone());
    shared.requests.lock().unwrap().push(recorded);

    let reply = shared.replies.lock().unwrap().get(&key).cloned();
    match reply {
        Some(Reply { status, body }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        ),
        None => (StatusCode::NOT_FOUND, UNSCRIPTED_BODY.to_string()),
    }
}
