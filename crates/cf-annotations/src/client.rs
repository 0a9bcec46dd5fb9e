use anyhow::Result;
use reqwest::{header, Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::config::Target;
use crate::errors::{CliError, CliErrorKind};

/// Authenticated client for the `/v3` API.
#[derive(Debug, Clone)]
pub struct CfClient {
    http: reqwest::Client,
    base: String,
    authorization: String,
    target: Target,
}

#[derive(Debug, Deserialize, Default)]
struct ApiErrorDocument { #[serde(default)] errors: Vec<ApiErrorEntry> }

#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    #[serde(default)] code: Option<i64>,
    #[serde(default)] title: String,
    #[serde(default)] detail: String,
}

impl CfClient {
    pub fn new(target: &Target) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(target.request_timeout)
            .danger_accept_invalid_certs(target.skip_ssl_validation)
            .user_agent(concat!("cf-annotations/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CliError::with_source(CliErrorKind::Config("failed to build HTTP client".into()), e))?;
        Ok(Self { http, base: target.api_endpoint.trim_end_matches('/').to_string(), authorization: authorization_value(&target.access_token), target: target.clone() })
    }

    pub fn target(&self) -> &Target { &self.target }

    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value> { self.send::<()>(Method::GET, path, None).await }

    pub async fn patch_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<serde_json::Value> { self.send(Method::PATCH, path, Some(body)).await }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: Option<&B>) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base, path);
        debug!(%method, %url, "api.request");
        let mut req = self.http.request(method.clone(), &url)
            .header(header::AUTHORIZATION, &self.authorization)
            .header(header::ACCEPT, "application/json");
        if let Some(b) = body { req = req.json(b); }
        let resp = req.send().await
            .map_err(|e| CliError::with_source(CliErrorKind::Network(format!("{method} {path} failed")), e))?;
        let status = resp.status();
        let text = resp.text().await
            .map_err(|e| CliError::with_source(CliErrorKind::Network(format!("reading response of {method} {path} failed")), e))?;
        info!(event="api.response", %method, %path, status=status.as_u16(), bytes=text.len());
        if !status.is_success() { return Err(CliError::new(CliErrorKind::Api(describe_failure(status, &text))).into()); }
        if text.trim().is_empty() { return Ok(serde_json::Value::Null); }
        serde_json::from_str(&text)
            .map_err(|e| CliError::with_source(CliErrorKind::Runtime(format!("invalid JSON in response to {method} {path}")), e).into())
    }
}

/// Tokens stored by the platform CLI already carry the scheme.
pub fn authorization_value(token: &str) -> String {
    let t = token.trim();
    if t.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("bearer ")) { t.to_string() } else { format!("bearer {t}") }
}

pub fn describe_failure(status: StatusCode, body: &str) -> String {
    let doc: ApiErrorDocument = serde_json::from_str(body).unwrap_or_default();
    if doc.errors.is_empty() { return format!("request failed with status {status}"); }
    doc.errors.iter().map(|e| {
        let title = if e.title.is_empty() { e.code.map(|c| c.to_string()).unwrap_or_else(|| status.to_string()) } else { e.title.clone() };
        format!("{title}: {}", e.detail)
    }).collect::<Vec<_>>().join("; ")
}
