//! Wire DTOs for the shorten API.
//!
//! # Design
//! The client itself classifies responses from an untyped `serde_json::Value`
//! so that bodies without an envelope pass through unchanged. These typed
//! shapes describe what a well-formed response looks like; the mock server
//! defines its own copy and the integration tests catch drift between them.

use serde::{Deserialize, Serialize};

/// Known values of the `status_txt` field.
pub mod status_txt {
    pub const OK: &str = "OK";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const INVALID_LOGIN: &str = "INVALID_LOGIN";
    pub const MISSING_ARG_LONGURL: &str = "MISSING_ARG_LONGURL";
    pub const INVALID_URI: &str = "INVALID_URI";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
}

/// The JSON wrapper around every API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub status_code: i64,
    pub status_txt: String,
    // A missing `data` key already deserializes to `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Payload of a successful `shorten` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenData {
    pub url: String,
    pub hash: String,
    pub global_hash: String,
    pub long_url: String,
    /// 1 when this call created the link, 0 when it already existed.
    pub new_hash: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_deserializes_without_data() {
        let envelope: Envelope<ShortenData> =
            serde_json::from_str(r#"{"status_code":500,"status_txt":"INVALID_LOGIN"}"#).unwrap();
        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.status_txt, status_txt::INVALID_LOGIN);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn success_envelope_deserializes_data() {
        let body = r#"{"status_code":200,"status_txt":"OK","data":{"url":"http://bit.ly/1","hash":"1","global_hash":"1","long_url":"http://example.com","new_hash":1}}"#;
        let envelope: Envelope<ShortenData> = serde_json::from_str(body).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.url, "http://bit.ly/1");
        assert_eq!(data.new_hash, 1);
    }

    #[test]
    fn error_envelope_serializes_without_data() {
        let envelope: Envelope<ShortenData> = Envelope {
            status_code: 403,
            status_txt: status_txt::RATE_LIMIT_EXCEEDED.to_string(),
            data: None,
        };
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"status_code":403,"status_txt":"RATE_LIMIT_EXCEEDED"}"#
        );
    }
}
