//! Backend client: the only place that talks HTTP to the resume service.
//!
//! One POST to `/generate` per submission, no retries and no timeout. Link
//! targets and the endpoint path are resolved against the configured base URL
//! the way a browser resolves them against the page origin.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::errors::SubmitError;
use crate::models::payload::Payload;
use crate::models::response::{Failure, GenerateResult};

pub const GENERATE_PATH: &str = "/generate";

/// A decoded `/generate` response.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    pub status_text: String,
    pub body: GenerateResult,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport seam between the submission handler and the resume service.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    /// Posts the payload and decodes the JSON body, whatever the status.
    async fn generate(&self, payload: &Payload) -> Result<BackendResponse, SubmitError>;

    /// Fetches a download link target.
    async fn download(&self, href: &str) -> Result<Bytes, SubmitError>;
}

#[derive(Clone)]
pub struct GenerateClient {
    client: Client,
    base_url: Url,
}

impl GenerateClient {
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        let base_url = Url::parse(base_url).map_err(|e| SubmitError::Url {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn resolve(&self, href: &str) -> Result<Url, SubmitError> {
        self.base_url.join(href).map_err(|e| SubmitError::Url {
            url: href.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ResumeBackend for GenerateClient {
    async fn generate(&self, payload: &Payload) -> Result<BackendResponse, SubmitError> {
        let url = self.resolve(GENERATE_PATH)?;
        debug!("POST {url} with {} field(s)", payload.len());

        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)?;

        debug!("/generate returned {status}");

        Ok(BackendResponse {
            status: status.as_u16(),
            status_text: status_text(status),
            body: GenerateResult::from_value(value)?,
        })
    }

    async fn download(&self, href: &str) -> Result<Bytes, SubmitError> {
        let url = self.resolve(href)?;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to surface the server's detail message
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| GenerateResult::from_value(v).ok())
                .map(|r| match r.failure(&status_text(status)) {
                    Failure::Message(m) => m,
                    Failure::Validation(lines) => lines.join("; "),
                })
                .unwrap_or_else(|| status_text(status));
            return Err(SubmitError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?)
    }
}

/// Reason phrase for a status, or the bare code when none is registered.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormData;
    use axum::{
        http::StatusCode as StubStatus,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn payload(pairs: &[(&str, &str)]) -> Payload {
        let form: FormData = pairs.iter().copied().collect();
        Payload::from_form(&form)
    }

    #[test]
    fn test_generate_path_resolves_against_origin() {
        let client = GenerateClient::new("http://localhost:8000/app/").unwrap();
        assert_eq!(
            client.resolve(GENERATE_PATH).unwrap().as_str(),
            "http://localhost:8000/generate"
        );
    }

    #[test]
    fn test_absolute_href_kept() {
        let client = GenerateClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.resolve("https://cdn.example.com/r.pdf").unwrap().as_str(),
            "https://cdn.example.com/r.pdf"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(GenerateClient::new("not a url"), Err(SubmitError::Url { .. })));
    }

    #[test]
    fn test_success_range() {
        let ok = BackendResponse {
            status: 204,
            status_text: "No Content".into(),
            body: GenerateResult::default(),
        };
        assert!(ok.is_success());
        assert!(!BackendResponse { status: 302, ..ok.clone() }.is_success());
        assert!(!BackendResponse { status: 422, ..ok }.is_success());
    }

    #[tokio::test]
    async fn test_generate_posts_json_payload() {
        let router = Router::new().route(
            "/generate",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "resume_text": format!("Resume for {}", body["name"].as_str().unwrap_or("?")),
                    "skill_count": body["skills"].as_array().map(|s| s.len()),
                    "pdf_file": "/download/pdf",
                    "docx_file": "/download/docx"
                }))
            }),
        );
        let client = GenerateClient::new(&spawn_stub(router).await).unwrap();

        let response = client
            .generate(&payload(&[("name", "Ada"), ("skills", "Rust, Go")]))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.body.resume_text.as_deref(), Some("Resume for Ada"));
        assert_eq!(response.body.pdf_file.as_deref(), Some("/download/pdf"));
    }

    #[tokio::test]
    async fn test_generate_keeps_error_status_and_body() {
        let router = Router::new().route(
            "/generate",
            post(|| async {
                (
                    StubStatus::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": [{"loc": ["body", "email"], "msg": "field required"}]})),
                )
            }),
        );
        let client = GenerateClient::new(&spawn_stub(router).await).unwrap();

        let response = client.generate(&payload(&[("name", "Ada")])).await.unwrap();

        assert_eq!(response.status, 422);
        assert_eq!(response.status_text, "Unprocessable Entity");
        assert_eq!(
            response.body.failure(&response.status_text),
            Failure::Validation(vec!["body.email: field required".to_string()])
        );
    }

    #[tokio::test]
    async fn test_generate_non_json_body_is_parse_error() {
        let router = Router::new().route(
            "/generate",
            post(|| async { (StubStatus::BAD_GATEWAY, "<html>upstream down</html>") }),
        );
        let client = GenerateClient::new(&spawn_stub(router).await).unwrap();

        let err = client.generate(&payload(&[("name", "Ada")])).await.unwrap_err();
        assert!(matches!(err, SubmitError::Parse(_)));
    }

    #[tokio::test]
    async fn test_generate_connection_refused_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GenerateClient::new(&format!("http://{addr}")).unwrap();
        let err = client.generate(&payload(&[("name", "Ada")])).await.unwrap_err();
        assert!(matches!(err, SubmitError::Http(_)));
    }

    #[tokio::test]
    async fn test_download_returns_bytes() {
        let router = Router::new().route("/download/pdf", get(|| async { "%PDF-1.4 stub" }));
        let client = GenerateClient::new(&spawn_stub(router).await).unwrap();

        let bytes = client.download("/download/pdf").await.unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 stub");
    }

    #[tokio::test]
    async fn test_download_missing_file_reports_detail() {
        let router = Router::new().route(
            "/download/docx",
            get(|| async {
                (
                    StubStatus::NOT_FOUND,
                    Json(json!({"detail": "DOCX not found. Generate a resume first."})),
                )
            }),
        );
        let client = GenerateClient::new(&spawn_stub(router).await).unwrap();

        match client.download("/download/docx").await {
            Err(SubmitError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "DOCX not found. Generate a resume first.");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
