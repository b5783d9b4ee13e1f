//! Response normalization
//!
//! Maps every outcome of a call onto [`ApiResult`]:
//!
//! | Outcome                         | Result                                  |
//! |---------------------------------|-----------------------------------------|
//! | connection failure              | `HostUnreachable` with the root URL     |
//! | other transport failure         | `TransportError` with the error text    |
//! | 5xx                             | `Unclassified`                          |
//! | 4xx with body `code` 404 / 401  | `NotFound` / `InvalidCredentials`       |
//! | 4xx without `code`, status 403  | `Forbidden`                             |
//! | any other non-2xx               | `Unclassified`                          |
//! | 2xx                             | parsed JSON body                        |
//!
//! Server errors are not classified any further.

use coindcx_types::{
    ApiResult, ErrorKind, Failure, INVALID_CREDENTIALS_CODE, NOT_FOUND_CODE, UNCLASSIFIED_CODE,
};
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::RestError;
use crate::transport::{HttpResponse, TransportError};

/// Coarse class of an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// 200-299
    Ok,
    /// 400-499
    ClientError,
    /// 500-599
    ServerError,
    /// Anything else (1xx, 3xx)
    Other,
}

impl ResponseClass {
    pub fn of(status: StatusCode) -> Self {
        if status.is_success() {
            Self::Ok
        } else if status.is_client_error() {
            Self::ClientError
        } else if status.is_server_error() {
            Self::ServerError
        } else {
            Self::Other
        }
    }
}

/// Error body returned by CoinDCX
///
/// Every field is optional; a body that is not JSON behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// CoinDCX error code, as sent either as a string or a number
    #[serde(default, deserialize_with = "scalar_text")]
    pub code: Option<String>,
    /// Server supplied message
    #[serde(default, deserialize_with = "scalar_text")]
    pub message: Option<String>,
    /// Server supplied status word (usually `"error"`)
    #[serde(default, deserialize_with = "scalar_text")]
    pub status: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, falling back to an empty record
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Accept strings, numbers and booleans as text; `null` and containers as absent
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Classify a non-2xx response
pub fn classify_error(status: StatusCode, body: &ErrorBody) -> Failure {
    if ResponseClass::of(status) != ResponseClass::ClientError {
        return Failure::unclassified();
    }

    match body.code.as_deref() {
        Some(NOT_FOUND_CODE) => Failure::not_found(),
        Some(INVALID_CREDENTIALS_CODE) => Failure::invalid_credentials(),
        Some(_) => Failure::unclassified(),
        None if status == StatusCode::FORBIDDEN => Failure::forbidden(),
        None => Failure::unclassified(),
    }
}

/// Decode a 2xx body; an empty body is `null`
pub fn decode_success(body: &[u8]) -> ApiResult {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(body).map_err(|e| {
        Failure::new(
            UNCLASSIFIED_CODE,
            ErrorKind::Unclassified,
            format!("Unable to decode the response body: {}", e),
        )
    })
}

/// Normalize a raw HTTP response
pub fn normalize(response: &HttpResponse) -> ApiResult {
    match ResponseClass::of(response.status) {
        ResponseClass::Ok => decode_success(&response.body),
        ResponseClass::ClientError | ResponseClass::ServerError | ResponseClass::Other => {
            let body = ErrorBody::parse(&response.body);
            let failure = classify_error(response.status, &body);

            warn!(
                status = response.status.as_u16(),
                code = %failure.code,
                kind = %failure.kind,
                server_message = body.message.as_deref().unwrap_or(""),
                server_status = body.status.as_deref().unwrap_or(""),
                "Request failed"
            );

            Err(failure)
        }
    }
}

/// Map a transport failure; `base_url` is the root the request targeted
pub fn transport_failure(error: &TransportError, base_url: &str) -> Failure {
    let failure = match error {
        TransportError::Connect { code, .. } => {
            Failure::host_unreachable(code.to_string(), base_url)
        }
        TransportError::Request { code, message } => {
            Failure::transport(code.to_string(), message.as_str())
        }
    };

    warn!(code = %failure.code, kind = %failure.kind, error = %error, "Transport failure");

    failure
}

/// Map an error raised before the request was sent
pub fn request_failure(error: &RestError) -> Failure {
    match error {
        RestError::AuthRequired | RestError::InvalidCredentials(_) => Failure::new(
            INVALID_CREDENTIALS_CODE,
            ErrorKind::InvalidCredentials,
            error.to_string(),
        ),
        _ => Failure::new(UNCLASSIFIED_CODE, ErrorKind::Unclassified, error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(StatusCode::from_u16(status).unwrap(), body)
    }

    #[test]
    fn test_response_classes() {
        assert_eq!(ResponseClass::of(StatusCode::OK), ResponseClass::Ok);
        assert_eq!(ResponseClass::of(StatusCode::NO_CONTENT), ResponseClass::Ok);
        assert_eq!(ResponseClass::of(StatusCode::NOT_FOUND), ResponseClass::ClientError);
        assert_eq!(ResponseClass::of(StatusCode::BAD_GATEWAY), ResponseClass::ServerError);
        assert_eq!(ResponseClass::of(StatusCode::MOVED_PERMANENTLY), ResponseClass::Other);
    }

    #[test]
    fn test_success_round_trip() {
        let body = json!({
            "bids": {"11570.67000000": "0.000871"},
            "asks": {"11576.19000000": "0.000200"},
            "nested": [1, 2.5, null, true, "x"]
        });
        let result = normalize(&response(200, &body.to_string()));
        assert_eq!(result.unwrap(), body);
    }

    #[test]
    fn test_empty_success_body_is_null() {
        assert_eq!(normalize(&response(204, "")).unwrap(), Value::Null);
    }

    #[test]
    fn test_malformed_success_body() {
        let failure = normalize(&response(200, "<html>")).unwrap_err();
        assert_eq!(failure.kind, ErrorKind::Unclassified);
        assert_eq!(failure.code, "1000");
        assert!(failure.message.starts_with("Unable to decode the response body"));
    }

    #[test]
    fn test_invalid_credentials_code() {
        let failure = normalize(&response(401, r#"{"code":"401"}"#)).unwrap_err();
        assert_eq!(failure, Failure::invalid_credentials());
    }

    #[test]
    fn test_numeric_code_is_accepted() {
        let body = r#"{"code":401,"message":"Invalid credentials","status":"error"}"#;
        let failure = normalize(&response(401, body)).unwrap_err();
        assert_eq!(failure.kind, ErrorKind::InvalidCredentials);
        assert_eq!(failure.code, "401");
    }

    #[test]
    fn test_not_found_code() {
        let failure = normalize(&response(404, r#"{"code":"404"}"#)).unwrap_err();
        assert_eq!(failure, Failure::not_found());
        assert_eq!(
            failure.message,
            "We could not locate the resource or the endpoint given."
        );
    }

    #[test]
    fn test_code_wins_over_status() {
        // A 404 code reported with a 400 status is still NotFound
        let failure = normalize(&response(400, r#"{"code":404}"#)).unwrap_err();
        assert_eq!(failure.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_forbidden_without_code() {
        let failure = normalize(&response(403, r#"{"message":"nope"}"#)).unwrap_err();
        assert_eq!(failure, Failure::forbidden());

        let failure = normalize(&response(403, "")).unwrap_err();
        assert_eq!(failure.kind, ErrorKind::Forbidden);

        let failure = normalize(&response(403, r#"{"code":null}"#)).unwrap_err();
        assert_eq!(failure.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_forbidden_with_unknown_code_is_unclassified() {
        let failure = normalize(&response(403, r#"{"code":"422"}"#)).unwrap_err();
        assert_eq!(failure, Failure::unclassified());
    }

    #[test]
    fn test_other_client_errors_are_unclassified() {
        for (status, body) in [
            (400, r#"{"code":"400","message":"bad"}"#),
            (404, "{}"),
            (401, "not json"),
            (429, r#"{"status":"error"}"#),
            (422, r#"[1,2,3]"#),
        ] {
            let failure = normalize(&response(status, body)).unwrap_err();
            assert_eq!(failure, Failure::unclassified(), "{status} {body}");
        }
    }

    #[test]
    fn test_server_errors_are_unclassified() {
        for (status, body) in [
            (500, r#"{"code":"401"}"#),
            (502, r#"{"code":"404"}"#),
            (503, ""),
            (599, "oops"),
        ] {
            let failure = normalize(&response(status, body)).unwrap_err();
            assert_eq!(failure.kind, ErrorKind::Unclassified, "{status}");
            assert_eq!(failure.code, "1000");
            assert_eq!(failure.message, "Unable to identify the type of error.");
        }
    }

    #[test]
    fn test_redirect_is_unclassified() {
        let failure = normalize(&response(302, "")).unwrap_err();
        assert_eq!(failure, Failure::unclassified());
    }

    #[test]
    fn test_error_body_parsing() {
        let body = ErrorBody::parse(br#"{"code":401,"message":"Invalid","status":"error"}"#);
        assert_eq!(body.code.as_deref(), Some("401"));
        assert_eq!(body.message.as_deref(), Some("Invalid"));
        assert_eq!(body.status.as_deref(), Some("error"));

        assert_eq!(ErrorBody::parse(b"garbage"), ErrorBody::default());
        assert_eq!(ErrorBody::parse(br#"{"code":{"nested":1}}"#).code, None);
    }

    #[test]
    fn test_connect_failure_embeds_base_url() {
        let error = TransportError::Connect {
            code: 6,
            message: "dns error".to_string(),
        };
        let failure = transport_failure(&error, "https://public.coindcx.com/");
        assert_eq!(failure.kind, ErrorKind::HostUnreachable);
        assert_eq!(failure.code, "6");
        assert_eq!(
            failure.message,
            "Could not resolve host: https://public.coindcx.com/"
        );
    }

    #[test]
    fn test_generic_transport_failure() {
        let error = TransportError::Request {
            code: 0,
            message: "operation timed out".to_string(),
        };
        let failure = transport_failure(&error, "https://api.coindcx.com/");
        assert_eq!(failure.kind, ErrorKind::TransportError);
        assert_eq!(failure.code, "0");
        assert_eq!(failure.message, "operation timed out");
    }

    #[test]
    fn test_request_failures() {
        let failure = request_failure(&RestError::AuthRequired);
        assert_eq!(failure.kind, ErrorKind::InvalidCredentials);
        assert_eq!(failure.code, "401");

        let failure = request_failure(&RestError::InvalidParameter("limit".to_string()));
        assert_eq!(failure.kind, ErrorKind::Unclassified);
    }
}
