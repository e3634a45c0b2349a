//! Async RPC client — one typed call per HTTP request.
//!
//! [`Client`] owns a [`reqwest::Client`] and nothing else; connection
//! pooling is the only state shared between calls, so concurrent calls to
//! any mix of hosts run without coordination. Each call resolves its
//! request's [`Endpoint`], encodes the URL, issues the verb, and decodes
//! the body into the request's [`Request::Reply`] type.
//!
//! Every call races the full request→response cycle against a caller-held
//! [`CancellationToken`]; cancellation surfaces as
//! [`ClientError::Cancelled`] no matter which phase it lands in. The
//! client never retries — retry policy belongs to the caller.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use hookshot_api::{Decode, DecodeError, Endpoint, Method, Request};

use crate::addr::HostAddr;

/// A failed RPC call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The descriptor produced an unusable URL. A configuration error in
    /// the request catalog, not a runtime condition.
    #[error("invalid request url")]
    Encode(#[source] reqwest::Error),

    #[error("failed to connect to host")]
    Connect(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("call cancelled")]
    Cancelled,

    #[error("transport failure")]
    Transport(#[source] reqwest::Error),

    #[error("host returned http status {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(#[from] DecodeError),
}

fn transport(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Connect(e)
    } else if e.is_builder() {
        ClientError::Encode(e)
    } else {
        ClientError::Transport(e)
    }
}

/// Stateless RPC client for Hookshot host agents.
#[derive(Debug, Clone, Default)]
pub struct Client {
    http: reqwest::Client,
    timeout: Option<Duration>,
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a per-call deadline to every request issued by this client.
    /// Expiry surfaces as [`ClientError::Timeout`].
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout: Some(timeout),
        }
    }

    /// Issue one typed call against `addr`.
    ///
    /// Cancelling `cancel` terminates the in-flight operation promptly and
    /// yields [`ClientError::Cancelled`], whether it lands before send,
    /// during send, or while awaiting the response body.
    pub async fn call<R: Request>(
        &self,
        addr: &HostAddr,
        request: &R,
        cancel: &CancellationToken,
    ) -> Result<R::Reply, ClientError> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let endpoint = request.endpoint();
        let url = endpoint.url(&addr.to_string());
        debug!("rpc: {} {url}", endpoint.method);

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.execute::<R>(endpoint, url) => result,
        }
    }

    async fn execute<R: Request>(
        &self,
        endpoint: Endpoint,
        url: String,
    ) -> Result<R::Reply, ClientError> {
        let mut builder = match endpoint.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url).body(endpoint.body.unwrap_or_default()),
            Method::Put => self.http.put(&url).body(endpoint.body.unwrap_or_default()),
            Method::Delete => self.http.delete(&url),
        };
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(R::Reply::decode(&body)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
