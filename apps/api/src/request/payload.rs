use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;

/// Parses a raw request body as JSON.
///
/// Empty, truncated, or non-JSON bodies yield `AppError::InvalidJson`.
/// The request's `Content-Type` is not consulted.
pub fn read_json_payload(body: &[u8]) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejecting request body that is not valid JSON: {e}");
        AppError::InvalidJson
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_object() {
        let value = read_json_payload(br#"{"job_title": "Engineer"}"#).unwrap();
        assert_eq!(value, json!({ "job_title": "Engineer" }));
    }

    #[test]
    fn test_parses_non_object_json() {
        // Shape is the validator's concern, not the reader's.
        assert_eq!(read_json_payload(b"[1, 2]").unwrap(), json!([1, 2]));
        assert_eq!(read_json_payload(b"null").unwrap(), Value::Null);
    }

    #[test]
    fn test_empty_body_is_invalid_json() {
        assert!(matches!(read_json_payload(b""), Err(AppError::InvalidJson)));
    }

    #[test]
    fn test_truncated_body_is_invalid_json() {
        assert!(matches!(
            read_json_payload(br#"{"job_title": "Engi"#),
            Err(AppError::InvalidJson)
        ));
    }

    #[test]
    fn test_plain_text_is_invalid_json() {
        assert!(matches!(
            read_json_payload(b"job_title=Engineer"),
            Err(AppError::InvalidJson)
        ));
    }
}
