//! Transport port between the query handlers and the network.
//!
//! The [`Transport`] owns the base URL and API key and delegates the actual
//! round trip to an injectable [`HttpExecutor`]. It is the single place where
//! a response is classified as success or failure.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    api_error::ApiError,
    context::RequestContext,
    error::{BoxError, Error, Result},
};

/// Statuses treated as a successful round trip.
const SUCCESS_STATUSES: [u16; 3] = [200, 201, 204];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// `None` when the response had no body.
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    pub fn without_body(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Capability to execute one HTTP request.
///
/// `Ok(None)` means the executor finished without producing a response; the
/// transport classifies that as an unknown API error with status `0`.
#[async_trait]
pub trait HttpExecutor: Send + Sync + Debug {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<Option<HttpResponse>, BoxError>;
}

/// Production executor backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestExecutor {
    http: Client,
}

impl ReqwestExecutor {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<Option<HttpResponse>, BoxError> {
        let res = self
            .http
            .request(request.method, request.url)
            .send()
            .await?;

        let status = res.status().as_u16();
        let bytes = res.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            Some(bytes.to_vec())
        };

        Ok(Some(HttpResponse { status, body }))
    }
}

type Responder =
    dyn Fn(&HttpRequest) -> std::result::Result<Option<HttpResponse>, BoxError> + Send + Sync;

/// Closure-backed executor for tests. Records the URL of every request it sees.
pub struct MockExecutor {
    respond: Box<Responder>,
    seen: Mutex<Vec<Url>>,
}

impl MockExecutor {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&HttpRequest) -> std::result::Result<Option<HttpResponse>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            respond: Box::new(respond),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the given status and body.
    pub fn respond_with(status: u16, body: &str) -> Self {
        let body = body.to_owned();
        Self::new(move |_| Ok(Some(HttpResponse::new(status, body.clone()))))
    }

    pub fn requests(&self) -> Vec<Url> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl Debug for MockExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockExecutor")
            .field("requests", &self.requests().len())
            .finish()
    }
}

#[async_trait]
impl HttpExecutor for MockExecutor {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<Option<HttpResponse>, BoxError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.url.clone());
        }
        (self.respond)(&request)
    }
}

/// Base URL, credential and executor shared by all query handlers.
#[derive(Debug, Clone)]
pub struct Transport {
    executor: Arc<dyn HttpExecutor>,
    base_url: String,
    api_key: String,
}

impl Transport {
    pub fn new(
        executor: Arc<dyn HttpExecutor>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build `GET {base}/{path}?{params...}&api-key={key}`.
    pub fn get_request(&self, path: &str, params: &[(&str, &str)]) -> Result<HttpRequest> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))
            .map_err(|e| Error::InvalidRequest(format!("{}: {e}", self.base_url)))?;

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("api-key", &self.api_key);
        }

        Ok(HttpRequest::get(url))
    }

    /// Execute one request and classify the outcome.
    ///
    /// 200, 201 and 204 are success regardless of body; every other status, or
    /// no response at all, becomes [`Error::Api`]. Executor failures become
    /// [`Error::Transport`].
    #[instrument(skip_all, fields(path = %request.url.path()))]
    pub async fn execute(&self, ctx: &RequestContext, request: HttpRequest) -> Result<HttpResponse> {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        debug!(method = %request.method, "sending request");

        let outcome = tokio::select! {
            biased;
            reason = ctx.done() => return Err(reason),
            outcome = self.executor.execute(request) => outcome,
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "request execution failed");
                return Err(Error::Transport(e));
            }
        };

        match response {
            Some(res) if SUCCESS_STATUSES.contains(&res.status) => {
                debug!(status = res.status, "request succeeded");
                Ok(res)
            }
            Some(res) => {
                let err = ApiError::from_status(Some(res.status));
                warn!(status = res.status, kind = ?err.kind, "request failed");
                Err(err.into())
            }
            None => {
                warn!("executor returned no response");
                Err(ApiError::from_status(None).into())
            }
        }
    }
}
