use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired or invalid - please log in again")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Maximum length of a raw response body quoted in an error message
const MAX_ERROR_BODY_LENGTH: usize = 300;

/// Error body shape used by the gateway: `{"error": "..."}`, with
/// `message` as a fallback some handlers use.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

impl ApiError {
    /// Extract the server's own message from an error body, falling back
    /// to the (truncated) raw body when it isn't the expected JSON shape.
    fn server_message(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if !parsed.error.is_empty() {
                return parsed.error;
            }
            if !parsed.message.is_empty() {
                return parsed.message;
            }
        }

        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::server_message(body);
        match status.as_u16() {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, message)),
        }
    }

    /// Whether this error means the session is no longer usable.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_maps_taxonomy() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, r#"{"error":"no such order"}"#),
            ApiError::NotFound(msg) if msg == "no such order"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#),
            ApiError::ServerError(msg) if msg == "boom"
        ));
    }

    #[test]
    fn test_server_message_falls_back_to_raw_body() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_message_field_fallback() {
        let err =
            ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message":"missing email"}"#);
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "missing email"));
    }
}
