#![allow(dead_code)]

use anyhow::{Context, Result};
use chrono::Duration;
use orchestrator_api::auth::{Role, TokenService};
use orchestrator_api::config::AppConfig;
use orchestrator_api::{app, AppState};
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "integration-test-secret";

/// A server bound to its own port, with its own empty store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    pub tokens: TokenService,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sign a token with the server's secret, bypassing /auth/login
    pub fn token(&self, username: &str, role: Role, ttl: Duration) -> String {
        self.tokens
            .issue(1, username, role, ttl)
            .expect("failed to sign test token")
    }

    pub async fn create_container(&self, payload: &Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/orchestrator/containers"))
            .json(payload)
            .send()
            .await?;
        anyhow::ensure!(res.status() == 201, "create failed with {}", res.status());
        Ok(res.json().await?)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.server.host = "127.0.0.1".to_string();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config
}

pub fn sample_data() -> Value {
    json!({
        "Hostname": "com.btf.containers",
        "Entrypoint": "",
        "Image": "ubuntu"
    })
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(test_config()).await
}

pub async fn spawn_server_with(config: AppConfig) -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind test port {}", port))?;

    let tokens = TokenService::from_config(&config.security);
    let router = app(AppState::new(&config));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        tokens,
    })
}
