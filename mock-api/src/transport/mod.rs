use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Network-layer errors. These never reach the caller of the fallback
/// client's `request`; they are logged and converted into a mock response.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Body(#[source] serde_json::Error),
}

/// Options for one outgoing call, modelled on the `(url, options)` pair of a
/// fetch-style API.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: Some(body.into()),
        }
    }
}

/// A raw reply from the real backend. Non-success statuses are returned as
/// replies, not errors; the caller decides what counts as a failure.
#[derive(Debug)]
pub struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

impl Reply {
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json(&self) -> Result<Value, TransportError> {
        serde_json::from_slice(&self.body).map_err(TransportError::Body)
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// The injected network capability. Swapping this out is how tests (and the
/// fetch interceptor) avoid touching a shared global.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Reply, TransportError>;
}

/// reqwest-backed transport used outside of tests.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Reply, TransportError> {
        let mut headers = options.headers.clone();
        // The JSON content type is a default; caller headers win.
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        let mut request = self
            .client
            .request(options.method.clone(), url)
            .headers(headers);

        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(Reply::new(status, body))
    }
}
