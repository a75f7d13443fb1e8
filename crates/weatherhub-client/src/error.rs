use thiserror::Error;

use crate::types::ApiErrorBody;

/// Ways a call can fail before producing an [`ApiResult`](crate::ApiResult).
///
/// A `success: false` body on a 2xx is *not* one of these; it resolves to
/// `ApiResult::Failure`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (DNS, refused connection, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401. The stored credential has already been cleared and the
    /// session listener notified.
    #[error("Unauthorized")]
    Unauthorized { error: Option<ApiErrorBody> },

    /// Any other non-2xx status.
    #[error("Server returned HTTP {status}")]
    Status {
        status: u16,
        error: Option<ApiErrorBody>,
    },

    /// A 2xx whose body is not a valid envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Message from the server's error body, when the server sent one.
    /// Always `None` for transport failures.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { error } | Self::Status { error, .. } => {
                error.as_ref().and_then(|e| e.message.as_deref())
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: &str) -> Option<ApiErrorBody> {
        Some(ApiErrorBody {
            message: Some(message.to_string()),
        })
    }

    #[test]
    fn test_server_message() {
        let unauthorized = ClientError::Unauthorized {
            error: body("Token expired"),
        };
        assert_eq!(unauthorized.server_message(), Some("Token expired"));
        assert!(unauthorized.is_unauthorized());

        let status = ClientError::Status {
            status: 400,
            error: body("Email taken"),
        };
        assert_eq!(status.server_message(), Some("Email taken"));

        let invalid = ClientError::InvalidResponse("garbage".into());
        assert_eq!(invalid.server_message(), None);
    }
}
