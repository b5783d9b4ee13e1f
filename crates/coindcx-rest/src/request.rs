//! Request assembly
//!
//! Public endpoints become a GET with the parameters in the query string.
//! Private endpoints are signed first; the exact JSON that was signed is
//! sent as the POST body alongside the `X-AUTH-APIKEY` and
//! `X-AUTH-SIGNATURE` headers.

use coindcx_auth::{Credentials, RequestParams, RequestSigner};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::endpoints::{BaseUrl, Endpoint, HttpMethod};
use crate::error::{RestError, RestResult};
use crate::transport::HttpRequest;

/// Header carrying the API key
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-auth-apikey");
/// Header carrying the hex HMAC-SHA256 signature
pub const SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-auth-signature");

/// A fully assembled request, ready for the transport
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    /// Full URL including the query string
    pub url: String,
    /// Root the URL was built from
    pub base_url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
    /// Parameters as sent (after timestamp injection)
    pub params: RequestParams,
}

impl PreparedRequest {
    pub fn into_http(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Builds [`PreparedRequest`]s against a pair of root URLs
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    api_url: &'a str,
    public_url: &'a str,
    timestamp: Option<u64>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(api_url: &'a str, public_url: &'a str) -> Self {
        Self {
            api_url,
            public_url,
            timestamp: None,
        }
    }

    /// Use a fixed timestamp instead of the clock for signed requests
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Root URL for an endpoint
    pub fn root(&self, base: BaseUrl) -> &'a str {
        match base {
            BaseUrl::Api => self.api_url,
            BaseUrl::Public => self.public_url,
        }
    }

    /// Assemble the request for `endpoint`
    pub fn build(
        &self,
        endpoint: &Endpoint,
        params: RequestParams,
        credentials: Option<&Credentials>,
    ) -> RestResult<PreparedRequest> {
        let base_url = self.root(endpoint.base);
        let url = join_url(base_url, endpoint.path);

        if endpoint.is_public() {
            return Ok(PreparedRequest {
                method: endpoint.method,
                url: with_query(url, &params)?,
                base_url: base_url.to_string(),
                headers: HeaderMap::new(),
                body: None,
                params,
            });
        }

        let credentials = credentials.ok_or(RestError::AuthRequired)?;
        let mut signer = RequestSigner::new(credentials, endpoint.requires_timestamp);
        if let (Some(timestamp), true) = (self.timestamp, endpoint.requires_timestamp) {
            signer = signer.with_timestamp(timestamp);
        }
        let signed = signer.sign(params)?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, sensitive_value(signer.api_key())?);
        headers.insert(SIGNATURE_HEADER, sensitive_value(&signed.signature)?);

        let (url, body) = match endpoint.method {
            HttpMethod::Post => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                (url, Some(signed.payload))
            }
            HttpMethod::Get => (with_query(url, &signed.params)?, None),
        };

        Ok(PreparedRequest {
            method: endpoint.method,
            url,
            base_url: base_url.to_string(),
            headers,
            body,
            params: signed.params,
        })
    }
}

fn sensitive_value(value: &str) -> RestResult<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|_| {
        RestError::InvalidCredentials("value is not a valid HTTP header".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn with_query(mut url: String, params: &RequestParams) -> RestResult<String> {
    let query = params.to_query_string()?;
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    Ok(url)
}

/// Join a root URL and a relative path with exactly one slash
pub fn join_url(root: &str, path: &str) -> String {
    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
