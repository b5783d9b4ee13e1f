//! HTTP transport abstraction
//!
//! The client only needs one capability from the network: send a request and
//! hand back status, headers and body. Keeping it behind [`HttpTransport`]
//! lets the request and normalization logic be tested without real network
//! calls. Timeouts live here; retries are left to the caller.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::endpoints::HttpMethod;

/// Transport layer errors
///
/// Both variants carry the native error code (the OS error number found in
/// the error chain, or `0`) and the error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Host could not be resolved or connected to
    #[error("connection failed: {message}")]
    Connect { code: i32, message: String },

    /// Any other transport failure (timeout, broken body, ...)
    #[error("request failed: {message}")]
    Request { code: i32, message: String },
}

impl TransportError {
    /// Native error code
    pub fn code(&self) -> i32 {
        match self {
            Self::Connect { code, .. } | Self::Request { code, .. } => *code,
        }
    }

    /// Error text
    pub fn message(&self) -> &str {
        match self {
            Self::Connect { message, .. } | Self::Request { message, .. } => message,
        }
    }

    /// Check if the request never reached the host
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let code = native_code(&err);
        let message = error_chain(&err);

        if err.is_connect() {
            Self::Connect { code, message }
        } else {
            Self::Request { code, message }
        }
    }
}

/// First OS error number found in the source chain
fn native_code(err: &(dyn StdError + 'static)) -> i32 {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(code) = err
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::raw_os_error)
        {
            return code;
        }
        current = err.source();
    }
    0
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        message.push_str(": ");
        message.push_str(&source.to_string());
        current = source.source();
    }
    message
}

/// Outgoing HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Raw HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response with no headers
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Capability to send a single HTTP request
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the raw response
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory transport that records requests and replays canned results

    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    #[derive(Debug, Clone, Default)]
    pub(crate) struct MockTransport {
        responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(&self, status: StatusCode, body: &str) -> &Self {
            self.responses
                .lock()
                .push_back(Ok(HttpResponse::new(status, body.as_bytes())));
            self
        }

        pub(crate) fn fail(&self, error: TransportError) -> &Self {
            self.responses.lock().push_back(Err(error));
            self
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().clone()
        }

        pub(crate) fn last_request(&self) -> HttpRequest {
            self.requests
                .lock()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().push(request);
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(StatusCode::OK, "{}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_code_from_io_error() {
        let io = std::io::Error::from_raw_os_error(111);
        assert_eq!(native_code(&io), 111);
    }

    #[test]
    fn test_native_code_defaults_to_zero() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(native_code(&io), 0);
    }

    #[test]
    fn test_transport_error_accessors() {
        let err = TransportError::Connect {
            code: 6,
            message: "dns error".to_string(),
        };
        assert!(err.is_connect());
        assert_eq!(err.code(), 6);
        assert_eq!(err.message(), "dns error");
        assert_eq!(err.to_string(), "connection failed: dns error");
    }

    #[tokio::test]
    async fn test_reqwest_transport_connection_refused() {
        let transport = ReqwestTransport::new(Duration::from_secs(5), "coindcx-rest-test").unwrap();
        let result = transport
            .send(HttpRequest {
                method: HttpMethod::Get,
                url: "http://127.0.0.1:1/exchange/ticker".to_string(),
                headers: HeaderMap::new(),
                body: None,
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.is_connect(), "{err:?}");
    }
}
