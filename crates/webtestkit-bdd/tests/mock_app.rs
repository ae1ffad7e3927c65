// Mock application - self-contained target for the bundled features
//
// Serves the demo home page plus the API endpoints the features exercise,
// so the suite runs deterministically and offline when no BASE_API_URL is
// configured.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use url::Url;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>webtestkit demo</title></head>
<body>
  <div id="cookie-banner">
    <span>This demo uses cookies.</span>
    <button id="accept-cookies">Accept</button>
  </div>
  <label for="search">Search</label>
  <input id="search" type="text" />
  <button name="search-go">Search</button>
  <div class="results"></div>
  <script>
    document.getElementById('accept-cookies').addEventListener('click', function () {
      document.getElementById('cookie-banner').style.display = 'none';
    });
    document.querySelector("button[name='search-go']").addEventListener('click', function () {
      var query = document.getElementById('search').value;
      var results = document.querySelector('.results');
      results.innerHTML = '';
      var title = document.createElement('div');
      title.className = 'result-title';
      title.textContent = 'Result for ' + query;
      results.appendChild(title);
    });
  </script>
</body>
</html>
"#;

/// Handle to the running mock application.
pub struct MockApp {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockApp {
    /// Starts the mock application on a random available port.
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/", get(home))
            .route("/health", get(health))
            .route("/echo", post(echo))
            .route("/api/authaccount/login", post(login));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock application");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock application failed");
        });

        MockApp { addr, handle }
    }

    /// Base URL of the running mock.
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/", self.addr)).expect("mock addr is a valid URL")
    }
}

impl Drop for MockApp {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "received": body }))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["Email"].as_str().unwrap_or_default();
    let password = body["Password"].as_str().unwrap_or_default();

    match (email, password) {
        ("user@test.com", "pw") => {
            (StatusCode::OK, Json(json!({ "Data": { "Token": "abc123" } })))
        }
        (_, "") => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "Message": "invalid credentials" })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({ "Data": { "Token": format!("token-for-{email}-{password}") } })),
        ),
    }
}
