#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use menu_api::config::AppConfig;
use menu_api::database::MemoryStore;
use menu_api::{app, AppState};

pub const PASSWORD: &str = "correct-horse-battery";

/// A server on its own port with its own in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.api.port = port;
        config.api.enable_request_logging = false;
        // Cheap hashing keeps the suite fast
        config.security.password_memory_kib = 8;
        config.security.password_iterations = 1;

        let store = Arc::new(MemoryStore::for_application());
        let state = AppState::new(store.clone(), &config)?;
        let router = app(state, &config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
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

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let res = request.send().await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        let mut request = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let res = request.send().await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn register(&self, email: &str) -> Result<Value> {
        let (status, body) = self
            .post(
                "/account/register",
                None,
                json!({"name": "Ada", "lastname": "Lovelace", "email": email, "password": PASSWORD}),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
        Ok(body["data"].clone())
    }

    pub async fn login(&self, email: &str) -> Result<String> {
        let (status, body) = self
            .post("/account/login", None, json!({"email": email, "password": PASSWORD}))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    /// Register and log in; returns (user id, token)
    pub async fn signup(&self, email: &str) -> Result<(String, String)> {
        let user = self.register(email).await?;
        let id = user["id"].as_str().context("user has no id")?.to_string();
        let token = self.login(email).await?;
        Ok((id, token))
    }

    /// Create a menu and return its id
    pub async fn add_menu(&self, token: &str, name: &str) -> Result<String> {
        let (status, body) = self.post("/menu/add", Some(token), json!({"name": name})).await?;
        anyhow::ensure!(status == StatusCode::OK, "menu add failed: {} {}", status, body);
        Ok(body["data"]["id"].as_str().context("menu has no id")?.to_string())
    }

    pub async fn add_group(&self, token: &str, menu_id: &str, name: &str) -> Result<String> {
        let (status, body) = self
            .post("/menu/group/add", Some(token), json!({"menu_id": menu_id, "name": name}))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "group add failed: {} {}", status, body);
        Ok(body["data"]["id"].as_str().context("group has no id")?.to_string())
    }

    pub async fn add_item(&self, token: &str, group_id: &str, name: &str, price: &str) -> Result<String> {
        let (status, body) = self
            .post(
                "/menu/group/item/add",
                Some(token),
                json!({"group_id": group_id, "name": name, "price": price}),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "item add failed: {} {}", status, body);
        Ok(body["data"]["id"].as_str().context("item has no id")?.to_string())
    }
}
