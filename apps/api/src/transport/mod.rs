//! In-process HTTP transport. Requests never touch a socket: each one is
//! dispatched straight into the mock router with `tower::ServiceExt::oneshot`.

pub mod latency;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tower::ServiceExt;
use tracing::debug;

use crate::routes::build_router;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed with status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("could not build request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("could not read response body: {0}")]
    Body(#[from] axum::Error),

    #[error("could not encode or decode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Client handle on the mock backend. Cheap to clone.
#[derive(Clone)]
pub struct MockTransport {
    router: Router,
}

impl MockTransport {
    pub fn new(state: AppState) -> Self {
        MockTransport {
            router: build_router(state),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, uri: &str) -> Result<T, ClientError> {
        let bytes = self.dispatch(Method::GET, uri, None).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        uri: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let bytes = self
            .dispatch(Method::POST, uri, Some(serde_json::to_vec(body)?))
            .await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        uri: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let bytes = self
            .dispatch(Method::PUT, uri, Some(serde_json::to_vec(body)?))
            .await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        uri: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let bytes = self
            .dispatch(Method::PATCH, uri, Some(serde_json::to_vec(body)?))
            .await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Any 2xx counts as success; the body is ignored.
    pub async fn delete(&self, uri: &str) -> Result<(), ClientError> {
        self.dispatch(Method::DELETE, uri, None).await?;
        Ok(())
    }

    async fn dispatch(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, ClientError> {
        debug!("{method} {uri}");

        let mut builder = Request::builder().method(method.clone()).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };
        let request = builder.body(body)?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;

        if !status.is_success() {
            let message = error_message(&bytes)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            debug!("{method} {uri} -> {status}: {message}");
            return Err(ClientError::Status { status, message });
        }
        Ok(bytes)
    }
}

/// Pulls `error.message` out of the backend's error envelope.
fn error_message(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Appends URL-encoded query pairs to `path`. Empty values are skipped.
pub fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if !value.is_empty() {
            query.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("{path}?{}", query.finish())
    } else {
        path.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::Store;
    use crate::transport::latency::Latency;

    pub(crate) fn transport_for(store: Store, latency: Latency) -> MockTransport {
        MockTransport::new(AppState { store, latency })
    }

    #[test]
    fn test_with_query_encodes_and_skips_empty() {
        let uri = with_query(
            "/jobs",
            &[
                ("page", "1".to_string()),
                ("search", "rust & go".to_string()),
                ("status", String::new()),
            ],
        );
        assert_eq!(uri, "/jobs?page=1&search=rust+%26+go");
        assert_eq!(with_query("/jobs", &[("search", String::new())]), "/jobs");
    }

    #[test]
    fn test_error_message_reads_envelope() {
        let body = br#"{"error":{"code":"NOT_FOUND","message":"Job x not found"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Job x not found"));
        assert_eq!(error_message(b""), None);
    }

    #[tokio::test]
    async fn test_not_found_surfaces_status_and_message() {
        let store = crate::store::tests::memory_store().await;
        let transport = transport_for(store, Latency::instant());
        let err = transport
            .get::<serde_json::Value>("/jobs/missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "request failed with status 404 Not Found: Job missing not found");
    }

    #[tokio::test]
    async fn test_health_round_trip() {
        let store = crate::store::tests::memory_store().await;
        crate::store::seed::seed_if_empty(&store).await.unwrap();
        let transport = transport_for(store, Latency::instant());
        let health: serde_json::Value = transport.get("/health").await.unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["records"]["jobs"], 25);
        assert_eq!(health["records"]["candidates"], 500);
    }
}
