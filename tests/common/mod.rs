#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

use gym_planner::database::{MemoryStore, Store};
use gym_planner::{app, AppConfig, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Serve a fresh in-memory instance of the API on an unused port
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_store(MemoryStore::new()).await
    }

    pub async fn spawn_with_store<S>(store: S) -> Result<Self>
    where
        S: Store + 'static,
    {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("integration-secret".to_string()),
            "SECURITY_BCRYPT_COST" => Some("4".to_string()),
            _ => None,
        })?;
        let state = AppState::new(config, store)?;

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/register"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Register and log in a new user, returning `(user_id, token)`
    pub async fn signup(&self, username: &str) -> Result<(i64, String)> {
        let res = self.register(username, "correct horse").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());
        let id = res.json::<Value>().await?["id"]
            .as_i64()
            .context("register response missing id")?;

        let res = self.login(username, "correct horse").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let token = res.json::<Value>().await?["token"]
            .as_str()
            .context("login response missing token")?
            .to_string();

        Ok((id, token))
    }

    pub async fn create_plan(&self, token: &str) -> Result<i64> {
        let res = self
            .client
            .post(self.url("/api/plans"))
            .bearer_auth(token)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create plan failed: {}", res.status());
        res.json::<Value>().await?["id"]
            .as_i64()
            .context("create plan response missing id")
    }
}
