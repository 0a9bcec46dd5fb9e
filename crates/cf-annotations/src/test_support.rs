use crate::client::CfClient;
use crate::config::Target;
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Requests seen by a mock API handler.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<Value>>>);

impl Recorded {
    pub fn push(&self, v: Value) { self.0.lock().unwrap().push(v); }
    pub fn all(&self) -> Vec<Value> { self.0.lock().unwrap().clone() }
}

pub fn target(base: String) -> Target {
    Target {
        api_endpoint: base,
        access_token: "test-token".into(),
        skip_ssl_validation: false,
        request_timeout: Duration::from_secs(5),
        org_guid: Some("org-1".into()),
        space_guid: Some("space-1".into()),
    }
}

/// Serves the router on an ephemeral port and returns a client targeting it.
pub async fn spawn_api<F>(build: F) -> (CfClient, Recorded)
where F: FnOnce(Recorded) -> Router {
    let rec = Recorded::default();
    let app = build(rec.clone());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    let client = CfClient::new(&target(format!("http://{}:{}", addr.ip(), addr.port()))).unwrap();
    (client, rec)
}
