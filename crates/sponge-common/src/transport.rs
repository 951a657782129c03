use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Result, SpongeError};

/// Raw status and body of one GET.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Every way a response can end.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    NotFound(String),
    Failed { status: u16, body: String },
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok_json(body: &Value) -> Self {
        Self::new(200, body.to_string())
    }

    pub fn classify(self) -> Result<Outcome> {
        match self.status {
            200 => {
                let json = serde_json::from_str(&self.body).map_err(|e| {
                    SpongeError::malformed("$", format!("body is not valid JSON: {}", e))
                })?;
                Ok(Outcome::Success(json))
            }
            404 => Ok(Outcome::NotFound(not_found_detail(&self.body))),
            status => Ok(Outcome::Failed { status, body: self.body }),
        }
    }

    /// Resolve to the decoded JSON body or the matching error for `endpoint`.
    pub fn into_json(self, endpoint: &str) -> Result<Value> {
        match self.classify()? {
            Outcome::Success(json) => Ok(json),
            Outcome::NotFound(detail) => Err(SpongeError::ObjectNotFound {
                endpoint: endpoint.to_string(),
                detail,
            }),
            Outcome::Failed { status, body } => {
                warn!(endpoint, status, "SPONGE API request failed");
                Err(SpongeError::Api {
                    endpoint: endpoint.to_string(),
                    status,
                    body,
                })
            }
        }
    }
}

/// `detail` field of an error payload, falling back to the raw body.
fn not_found_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) if !other.is_null() => Some(other.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// A single blocking GET against the API.
///
/// Implementations:
/// - `HttpTransport` (reqwest, real network)
/// - `MockTransport` (canned responses, testing)
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, headers: &[(String, String)], params: &[(String, String)]) -> Result<ApiResponse>;
}

/// reqwest-backed transport. Headers are set per request from the caller's config.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .user_agent(concat!("sponge-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpongeError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, headers: &[(String, String)], params: &[(String, String)]) -> Result<ApiResponse> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SpongeError::Config(format!("Invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| SpongeError::Config(format!("Invalid header value {:?}: {}", value, e)))?;
            header_map.insert(name, value);
        }

        let response = self
            .client
            .get(url)
            .headers(header_map)
            .query(params)
            .send()?;
        debug!(url = %response.url(), status = response.status().as_u16(), "GET");

        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(ApiResponse { status, body })
    }
}

/// One request as seen by `MockTransport`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|(k, _)| k == name)
    }
}

/// Transport that replays queued responses and records every request.
/// An exhausted queue answers 500 so a missing fixture fails loudly.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn with(self, response: ApiResponse) -> Self {
        self.push(response);
        self
    }

    pub fn with_json(self, status: u16, body: &Value) -> Self {
        self.with(ApiResponse::new(status, body.to_string()))
    }

    pub fn push(&self, response: ApiResponse) {
        lock(&self.responses).push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, headers: &[(String, String)], params: &[(String, String)]) -> Result<ApiResponse> {
        lock(&self.requests).push(RecordedRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
            params: params.to_vec(),
        });
        Ok(lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(500, r#"{"detail": "no mock response queued"}"#)))
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, url: &str, headers: &[(String, String)], params: &[(String, String)]) -> Result<ApiResponse> {
        (**self).get(url, headers, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_success() {
        let outcome = ApiResponse::new(200, r#"[{"a": 1}]"#).classify().unwrap();
        assert_eq!(outcome, Outcome::Success(json!([{"a": 1}])));
    }

    #[test]
    fn test_not_found_carries_detail() {
        let err = ApiResponse::new(404, r#"{"detail": "no match"}"#)
            .into_json("gseaSets")
            .unwrap_err();
        match &err {
            SpongeError::ObjectNotFound { endpoint, detail } => {
                assert_eq!(endpoint, "gseaSets");
                assert_eq!(detail, "no match");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("no match"));
    }

    #[test]
    fn test_not_found_without_detail_uses_body() {
        let outcome = ApiResponse::new(404, "Not Found\n").classify().unwrap();
        assert_eq!(outcome, Outcome::NotFound("Not Found".to_string()));
    }

    #[test]
    fn test_other_status_is_api_error() {
        let err = ApiResponse::new(500, "boom").into_json("networkResults").unwrap_err();
        assert!(matches!(err, SpongeError::Api { status: 500, ref body, .. } if body == "boom"));

        let err = ApiResponse::new(400, r#"{"detail": "bad level"}"#).into_json("x").unwrap_err();
        assert!(matches!(err, SpongeError::Api { status: 400, .. }));
    }

    #[test]
    fn test_success_with_invalid_json_is_malformed() {
        let err = ApiResponse::new(200, "<html>").into_json("x").unwrap_err();
        assert!(matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "$"));
    }

    #[test]
    fn test_mock_records_and_replays() {
        let mock = MockTransport::new().with_json(200, &json!([]));
        let headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        let params = vec![("disease_name".to_string(), "kidney".to_string())];

        let first = mock.get("http://api/x", &headers, &params).unwrap();
        assert_eq!(first.status, 200);
        let second = mock.get("http://api/y", &headers, &[]).unwrap();
        assert_eq!(second.status, 500);

        assert_eq!(mock.call_count(), 2);
        let recorded = &mock.requests()[0];
        assert_eq!(recorded.param("disease_name"), Some("kidney"));
        assert!(!recorded.has_param("gene_symbol"));
        assert_eq!(mock.last_request().unwrap().url, "http://api/y");
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(&ClientConfig::default()).is_ok());
    }
}
