use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use taskhub_shared::error::ServiceError;
use taskhub_shared::store::MemoryStore;

use crate::responder::MockResponder;
use crate::transport::{HttpTransport, Reply, RequestOptions, Transport, TransportError};

/// Where the real backend is expected to live. URLs under this base are
/// subject to interception.
pub const DEFAULT_BASE_URL: &str = "https://taskhub-backend.example.com/api";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// API client that prefers the real backend and falls back to the mock
/// responder when it is unreachable.
///
/// The transport and the store are injected, so two clients never share
/// state and tests can run in parallel without cross-talk.
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    responder: MockResponder,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>, store: Arc<MemoryStore>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
            responder: MockResponder::new(store),
        }
    }

    /// Client with the production transport and a fresh store.
    pub fn with_default_transport(config: ClientConfig) -> Self {
        Self::new(
            config,
            Arc::new(HttpTransport::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    pub fn responder(&self) -> &MockResponder {
        &self.responder
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs an API call against `base_url + endpoint`. A healthy backend
    /// answer is returned verbatim; any transport failure or non-success
    /// status is logged and answered from the mock responder instead.
    ///
    /// Only dispatch-level failures (invalid credentials, body validation)
    /// can surface as errors here.
    pub async fn request(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);

        match self.transport.fetch(&url, options).await {
            Ok(reply) if reply.is_success() => match reply.json() {
                Ok(value) => return Ok(value),
                Err(err) => log::warn!("API call failed, using mock data: {}", err),
            },
            Ok(reply) => {
                log::warn!("API call failed, using mock data: HTTP {}", reply.status())
            }
            Err(err) => log::warn!("API call failed, using mock data: {}", err),
        }

        let value = self
            .responder
            .dispatch(endpoint, &options.method, options.body.as_deref())?;
        Ok(value)
    }

    /// Fetch-compatible entry point, the injectable replacement for a global
    /// fetch override. URLs under the configured base are answered by the
    /// mock responder directly, with no network attempt, and always come back
    /// `ok`; only the payload can signal an application error. Any other URL
    /// goes out on the real transport untouched.
    pub async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<FetchReply, ClientError> {
        if let Some(endpoint) = self.intercepted_endpoint(url) {
            log::debug!("Intercepting {} -> {}", url, endpoint);
            let payload =
                self.responder
                    .dispatch(endpoint, &options.method, options.body.as_deref())?;
            return Ok(FetchReply::intercepted(payload));
        }

        let reply = self.transport.fetch(url, options).await?;
        Ok(FetchReply::passthrough(reply))
    }

    /// Strips the base prefix from an intercepted URL, yielding the endpoint
    /// to dispatch. `None` means the URL is foreign and goes to the network.
    fn intercepted_endpoint<'a>(&self, url: &'a str) -> Option<&'a str> {
        let rest = url.strip_prefix(&self.base_url)?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') || rest.starts_with('?') {
            Some(rest)
        } else {
            // e.g. base "…/api" must not capture "…/apiary".
            None
        }
    }
}

enum FetchBody {
    Json(Value),
    Raw(Vec<u8>),
}

/// The synthetic response envelope handed back by [`ApiClient::fetch`].
/// Exposes the success flag and a `json()` accessor, nothing else.
pub struct FetchReply {
    ok: bool,
    body: FetchBody,
}

impl FetchReply {
    fn intercepted(payload: Value) -> Self {
        Self {
            ok: true,
            body: FetchBody::Json(payload),
        }
    }

    fn passthrough(reply: Reply) -> Self {
        Self {
            ok: reply.is_success(),
            body: FetchBody::Raw(reply.into_body()),
        }
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn json(&self) -> Result<Value, ClientError> {
        match &self.body {
            FetchBody::Json(value) => Ok(value.clone()),
            FetchBody::Raw(bytes) => Ok(serde_json::from_slice(bytes)
                .map_err(TransportError::Body)?),
        }
    }
}
