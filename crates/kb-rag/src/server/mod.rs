//! HTTP server for the knowledge-base service

pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Knowledge-base HTTP server
pub struct KbServer {
    config: AppConfig,
    state: AppState,
}

impl KbServer {
    /// Create a new server
    pub async fn new(config: AppConfig) -> Result<Self> {
        let state = AppState::new(config.clone()).await?;
        Ok(Self { config, state })
    }

    /// Create a server over pre-built state (used by tests)
    pub fn with_state(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the router with all routes and middleware
    pub fn build_router(&self) -> Router {
        Router::new()
            .merge(routes::routes(self.config.server.max_upload_size))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&self.config.server.allowed_origins))
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// CORS layer honoring the configured origins.
///
/// A `*` entry allows any origin but disables credentials; explicit
/// origins keep credentials enabled.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::agent::stubs::CannedModel;
    use crate::agent::Agent;
    use crate::knowledge::stubs::{FixedEmbedder, RecordingIndex};
    use crate::knowledge::Knowledge;
    use crate::storage::FileStore;

    async fn test_router(dir: &tempfile::TempDir) -> Router {
        let mut config = AppConfig::default();
        config.storage.upload_dir = dir.path().to_path_buf();
        config.gemini.api_key = "test-key".to_string();

        let store = FileStore::open(dir.path()).await.unwrap();
        let knowledge = Knowledge::new(Arc::new(FixedEmbedder), Arc::new(RecordingIndex::default()));
        let agent = Agent::new(
            knowledge.clone(),
            Arc::new(CannedModel::new("canned answer")),
            config.agent.clone(),
        );

        let state = AppState::from_parts(config.clone(), store, knowledge, agent);
        KbServer::with_state(config, state).build_router()
    }

    fn multipart_request(parts: &[(&str, &[u8])]) -> Request<Body> {
        let boundary = "kbrag-test-boundary";
        let mut body = Vec::new();

        for (filename, content) in parts {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    boundary, filename
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_reports_every_file_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir).await;

        let request = multipart_request(&[
            ("notes.txt", b"plenty of text content".as_slice()),
            ("image.png", b"\x89PNG".as_slice()),
            ("more.txt", b"another document".as_slice()),
        ]);

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["summary"]["successful"], 2);
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["message"], "Processed 2/3 files successfully");

        let files = json["files"].as_array().unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0]["original_filename"], "notes.txt");
        assert_eq!(files[0]["status"], "processed");
        assert_eq!(files[0]["saved_filename"], "notes.txt");
        assert_eq!(files[1]["original_filename"], "image.png");
        assert_eq!(files[1]["status"], "error");
        assert!(files[1]["message"]
            .as_str()
            .unwrap()
            .starts_with("unsupported file type"));
        assert_eq!(files[2]["status"], "processed");
    }

    #[tokio::test]
    async fn test_upload_same_name_twice_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir).await;

        let response = router
            .clone()
            .oneshot(multipart_request(&[("dup.txt", b"first".as_slice())]))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["files"][0]["saved_filename"], "dup.txt");

        let response = router
            .oneshot(multipart_request(&[("dup.txt", b"second".as_slice())]))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["files"][0]["saved_filename"], "dup_1.txt");
    }

    #[tokio::test]
    async fn test_files_lists_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir).await;

        router
            .clone()
            .oneshot(multipart_request(&[
                ("a.txt", b"content a".as_slice()),
                ("b.txt", b"content b".as_slice()),
            ]))
            .await
            .unwrap();

        let response = router
            .oneshot(Request::get("/files").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["files"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir).await;

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["api_key_set"], true);
        assert_eq!(json["files_count"], 0);
    }

    #[tokio::test]
    async fn test_chat_returns_sentinel_without_content() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir).await;

        let response = router
            .oneshot(
                Request::post("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"question": "anything?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"I don't know");
    }
}
