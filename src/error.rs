/// Error taxonomy for the save flow
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    /// The request never produced an HTTP response (DNS, reset, CORS, ...)
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The consent callback ran without a stashed request token
    #[error("No pending request token; start the authorization again")]
    MissingPendingToken,

    #[error("Response is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("Couldn't get active tab URL")]
    NoActiveTab,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_carries_status_text() {
        let err = SaveError::HttpStatus {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };

        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SaveError = serde_err.into();

        assert!(matches!(err, SaveError::Parse(_)));
        assert!(err.to_string().starts_with("Malformed response"));
    }

    #[test]
    fn test_missing_field_names_the_field() {
        assert_eq!(
            SaveError::MissingField("item").to_string(),
            "Response is missing the `item` field"
        );
    }
}
