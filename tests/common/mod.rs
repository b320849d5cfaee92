//! Shared harness: runs the real router on an ephemeral port.

#![allow(dead_code)]

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;

use world_pool_gateway::api;
use world_pool_gateway::app_state::AppState;

/// Minimum stake used throughout the scenarios.
pub const MIN_STAKE: u128 = 1_050_975_209;

/// Principal that creates pools in the scenarios.
pub const ADMIN: &str = "pool-admin";

/// Principal that opens escrows in the scenarios.
pub const USER: &str = "escrow-user";

/// Principal that owns nothing.
pub const INTRUDER: &str = "unauthorised";

/// HTTP client bound to one running server.
#[derive(Debug)]
pub struct TestServer {
    /// `host:port` the server listens on.
    pub addr: String,
    http: reqwest::Client,
}

impl TestServer {
    /// Starts a fresh server with an empty ledger.
    #[allow(clippy::panic)]
    pub async fn spawn() -> Self {
        let app = api::build_app(AppState::new(1024), Duration::from_secs(5));
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind ephemeral port");
        };
        let Ok(local) = listener.local_addr() else {
            panic!("local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self {
            addr: local.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Sends a request and returns the status and decoded body
    /// (`Value::Null` when the body is empty or not JSON).
    #[allow(clippy::panic)]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        caller: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = self.http.request(method, format!("http://{}{path}", self.addr));
        if let Some(who) = caller {
            req = req.header("x-principal", who);
        }
        if let Some(json) = body {
            req = req.json(&json);
        }
        let Ok(resp) = req.send().await else {
            panic!("request to {path} failed");
        };
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    /// Sends a JSON body verbatim, for payloads `serde_json::Value` cannot
    /// represent exactly.
    #[allow(clippy::panic)]
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        caller: &str,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let Ok(resp) = self
            .http
            .request(method, format!("http://{}{path}", self.addr))
            .header("x-principal", caller)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
        else {
            panic!("request to {path} failed");
        };
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    /// Creates a pool as `caller` and returns its id.
    #[allow(clippy::panic)]
    pub async fn create_pool(&self, caller: &str, name: &str, min_stake: u128) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/pools",
                Some(caller),
                Some(serde_json::json!({
                    "name": name,
                    "description": "lorem ipsum",
                    "min_stake": min_stake.to_string(),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let Some(id) = body["pool_id"].as_str() else {
            panic!("pool_id missing: {body}");
        };
        id.to_string()
    }

    /// Opens an escrow as `caller` and returns its id.
    #[allow(clippy::panic)]
    pub async fn create_escrow(&self, caller: &str, pool_id: &str, value: u128) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/escrows",
                Some(caller),
                Some(serde_json::json!({ "pool_id": pool_id, "value": value.to_string() })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let Some(id) = body["escrow_id"].as_str() else {
            panic!("escrow_id missing: {body}");
        };
        id.to_string()
    }
}

/// Returns the `error.reason` field of an error body.
pub fn reason(body: &Value) -> &str {
    body["error"]["reason"].as_str().unwrap_or_default()
}
