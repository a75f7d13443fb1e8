//! Wire types for the WeatherHub API.
//!
//! Every endpoint answers with the same envelope: `{"success": true, ...}` with
//! an operation-specific payload, or `{"success": false, "error": {"message"}}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Error body the server sends with `success: false` (and with most non-2xx
/// responses).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Business-level outcome of a call that reached the server and got a 2xx.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success(T),
    Failure(ApiErrorBody),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// `{"data": ...}` payload wrapper used by the weather endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DataPayload<T> {
    pub data: T,
}

impl<T: DeserializeOwned> ApiResult<T> {
    /// Decode an envelope. The success payload is read from the same object,
    /// so `T` picks out the fields it needs (`token`, `data`, ...).
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let envelope = Envelope::deserialize(&value)?;
        if envelope.success {
            Ok(Self::Success(T::deserialize(value)?))
        } else {
            Ok(Self::Failure(envelope.error.unwrap_or_default()))
        }
    }
}

impl<T> ApiResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Server-provided failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(body) => body.message.as_deref(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Success(value) => ApiResult::Success(f(value)),
            Self::Failure(body) => ApiResult::Failure(body),
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }
}

/// Pull `error` out of an arbitrary response body, if it has one.
pub(crate) fn parse_error_body(body: &str) -> Option<ApiErrorBody> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
}

/// Body of `/auth/signup` and `/auth/signin`.
#[derive(Debug, Serialize)]
pub(crate) struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Success payload of signup/signin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    pub token: String,
}

/// Success payload carrying nothing beyond `success: true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions at a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub coordinates: Coordinates,
    pub temp_c: f64,
    pub humidity: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_success() {
        let result =
            ApiResult::<AuthToken>::from_value(json!({"success": true, "token": "abc"})).unwrap();
        assert_eq!(
            result,
            ApiResult::Success(AuthToken {
                token: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_failure_keeps_message() {
        let result = ApiResult::<AuthToken>::from_value(
            json!({"success": false, "error": {"message": "bad creds"}}),
        )
        .unwrap();
        assert!(!result.is_success());
        assert_eq!(result.error_message(), Some("bad creds"));
    }

    #[test]
    fn test_failure_without_error_object() {
        let result = ApiResult::<Ack>::from_value(json!({"success": false})).unwrap();
        assert_eq!(result, ApiResult::Failure(ApiErrorBody::default()));
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn test_missing_success_flag_is_failure() {
        let result = ApiResult::<Ack>::from_value(json!({"token": "abc"})).unwrap();
        assert!(!result.is_success());
    }

    #[test]
    fn test_success_without_token_is_malformed() {
        assert!(ApiResult::<AuthToken>::from_value(json!({"success": true})).is_err());
    }

    #[test]
    fn test_ack_ignores_extra_fields() {
        let result =
            ApiResult::<Ack>::from_value(json!({"success": true, "message": "bye"})).unwrap();
        assert_eq!(result, ApiResult::Success(Ack {}));
    }

    #[test]
    fn test_weather_payload() {
        let result = ApiResult::<DataPayload<WeatherReport>>::from_value(json!({
            "success": true,
            "data": {
                "coordinates": {"lat": 23.45, "lon": 46.68},
                "tempC": 30,
                "humidity": 40,
                "description": "clear"
            }
        }))
        .unwrap()
        .map(|payload| payload.data);

        let report = result.into_success().unwrap();
        assert_eq!(report.coordinates, Coordinates { lat: 23.45, lon: 46.68 });
        assert_eq!(report.temp_c, 30.0);
        assert_eq!(report.humidity, 40.0);
        assert_eq!(report.description, "clear");
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"success":false,"error":{"message":"Invalid token"}}"#;
        assert_eq!(
            parse_error_body(body).and_then(|e| e.message).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(parse_error_body("<html>502</html>"), None);
        assert_eq!(parse_error_body(""), None);
    }

    #[test]
    fn test_credentials_serialization() {
        let req = CredentialsRequest {
            email: "a@b.com",
            password: "secret",
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"email":"a@b.com","password":"secret"}"#);
    }
}
