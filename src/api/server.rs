//! API server lifecycle.
//!
//! Bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::state::AppState;

/// Session metadata for a running API server.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running API server.
pub struct ApiServer {
    pub session: ApiSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Start the API server on the given address.
///
/// Builds the router, binds, and spawns the axum server in a background
/// tokio task. Returns an `ApiServer` handle with session metadata and a
/// shutdown channel.
pub async fn start_api_server(
    state: Arc<AppState>,
    addr: SocketAddr,
) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%addr, "API server binding");

    let app = api_router(state);

    let session = ApiSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    async fn start_test_server() -> (tempfile::TempDir, ApiServer) {
        let dir = tempfile::TempDir::new().unwrap();
        let state = Arc::new(AppState::new(dir.path().join("report.pdf")).unwrap());
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        let server = start_api_server(state, addr)
            .await
            .expect("server should start");
        (dir, server)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (_dir, mut server) = start_test_server().await;
        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("http://127.0.0.1:{}/api/health", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert!(resp.status().is_success());
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn analyze_then_download_roundtrip() {
        let (_dir, mut server) = start_test_server().await;
        let port = server.session.port;
        let client = reqwest::Client::new();

        // Before any submission: distinct not-found condition.
        let resp = client
            .get(format!("http://127.0.0.1:{port}/api/download"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");

        // Submit a report.
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/analyze"))
            .json(&serde_json::json!({ "report": "Glucose: 100 mg/dL\nTSH: 5.5 µIU/mL" }))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        let body = resp.text().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["glucose"]["status"], "Prediabetic");
        assert_eq!(json["tsh"]["status"], "High");
        // Discovery order survives into the response body.
        assert!(body.find("\"glucose\"").unwrap() < body.find("\"tsh\"").unwrap());

        // Download the persisted PDF.
        let resp = client
            .get(format!("http://127.0.0.1:{port}/api/download"))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        let bytes = resp.bytes().await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        server.shutdown();
    }

    #[tokio::test]
    async fn malformed_analyze_body_is_bad_request() {
        let (_dir, mut server) = start_test_server().await;
        let port = server.session.port;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/analyze"))
            .header("content-type", "application/json")
            .body("not json")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        server.shutdown();
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (_dir, mut server) = start_test_server().await;
        let url = format!("http://127.0.0.1:{}/nonexistent", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (_dir, mut server) = start_test_server().await;
        server.shutdown();
        server.shutdown();
    }
}
