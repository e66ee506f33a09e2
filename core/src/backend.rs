//! # Admin Backend
//!
//! Transport for [`AdminCommand`]s. [`HttpBackend`] talks to the appliance
//! over HTTP; tests plug in their own [`AdminBackend`].

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use lanward_common::config::Config;

use crate::actions::AdminCommand;
use crate::api::{AdminResponse, Module, StatusMap};

const STATUS_PATH: &str = "/admin/status";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait AdminBackend: Send + Sync {
    /// Sends one command. A response with `success: false` is still `Ok`.
    async fn send(&self, cmd: &AdminCommand) -> anyhow::Result<AdminResponse>;

    /// Current status of every module.
    async fn statuses(&self) -> anyhow::Result<StatusMap>;

    /// Raw JSON config file the server keeps for `module`.
    async fn config(&self, module: Module) -> anyhow::Result<Value>;
}

pub struct HttpBackend {
    http: reqwest::Client,
    cfg: Config,
}

impl HttpBackend {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(session) = &cfg.session {
            let value = HeaderValue::from_str(session).context("session cookie is not a valid header value")?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .user_agent(format!("lanward/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;

        Ok(Self { http, cfg })
    }

    async fn get_json(&self, path: &str) -> anyhow::Result<Value> {
        let url: String = self.cfg.url(path);
        debug!("GET {url}");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;
        let status: StatusCode = resp.status();
        let body: Value = resp
            .json()
            .await
            .with_context(|| format!("decoding response from {url}"))?;

        if !status.is_success() {
            bail!("{url} answered {status}: {}", detail_text(&body));
        }
        Ok(body)
    }
}

#[async_trait]
impl AdminBackend for HttpBackend {
    async fn send(&self, cmd: &AdminCommand) -> anyhow::Result<AdminResponse> {
        let url: String = self.cfg.url(&cmd.module.endpoint());
        debug!("POST {url} action={}", cmd.request.action);

        let resp = self
            .http
            .post(&url)
            .json(&cmd.request)
            .send()
            .await
            .with_context(|| format!("sending '{}' to {url}", cmd.request.action))?;

        let status: StatusCode = resp.status();
        let text: String = resp.text().await.context("reading admin response")?;

        if !status.is_success() {
            let detail: String = serde_json::from_str::<Value>(&text)
                .map(|body| detail_text(&body))
                .unwrap_or(text);
            bail!("{} '{}' failed with {status}: {detail}", cmd.module, cmd.request.action);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("unexpected response from {url}: {text}"))
    }

    async fn statuses(&self) -> anyhow::Result<StatusMap> {
        let body: Value = self.get_json(STATUS_PATH).await?;
        serde_json::from_value(body).context("decoding module status map")
    }

    async fn config(&self, module: Module) -> anyhow::Result<Value> {
        let name: &str = module.name();
        self.get_json(&format!("/config/{name}/{name}.json")).await
    }
}

/// Pulls a readable message out of an error body (`detail` may be a string
/// or a list of validation objects).
fn detail_text(body: &Value) -> String {
    match body.get("detail").or_else(|| body.get("message")) {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item.get("msg") {
                Some(Value::String(msg)) => msg.clone(),
                _ => item.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_text() {
        assert_eq!(detail_text(&json!({ "detail": "Not authenticated" })), "Not authenticated");
        assert_eq!(
            detail_text(&json!({ "detail": [{ "msg": "field required" }, { "msg": "bad" }] })),
            "field required; bad"
        );
        assert_eq!(detail_text(&json!({ "message": "nope" })), "nope");
        assert_eq!(detail_text(&json!({ "x": 1 })), r#"{"x":1}"#);
    }

    #[test]
    fn test_rejects_invalid_session() {
        let cfg = Config {
            session: Some("bad\nvalue".to_string()),
            ..Config::default()
        };
        assert!(HttpBackend::new(cfg).is_err());
    }
}
