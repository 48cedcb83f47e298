//! Status probe module
//!
//! JSON payload reporting that the service is live, stamped with the time
//! the response was generated.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;

use crate::config::HttpConfig;
use crate::http;

/// Status probe payload
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    pub timestamp: String,
}

impl StatusBody {
    /// Capture the probe payload at the current instant
    ///
    /// One clock read per probe request; the timestamp reflects the moment
    /// the response body was generated.
    pub fn now() -> Self {
        Self {
            status: "OK",
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Build the status probe response
pub fn build_status_response(http_config: &HttpConfig, is_head: bool) -> Response<Full<Bytes>> {
    http::build_json_response(&StatusBody::now(), http_config, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[test]
    fn test_status_field_is_ok_literal() {
        let body = StatusBody::now();
        assert_eq!(body.status, "OK");
    }

    #[test]
    fn test_timestamp_is_rfc3339_within_bounds() {
        let before = Utc::now();
        let body = StatusBody::now();
        let after = Utc::now();

        let stamped = DateTime::parse_from_rfc3339(&body.timestamp)
            .unwrap()
            .with_timezone(&Utc);
        assert!(stamped >= before, "timestamp earlier than request time");
        assert!(stamped <= after, "timestamp later than response time");
    }

    #[test]
    fn test_sequential_timestamps_non_decreasing() {
        let first = StatusBody::now();
        let second = StatusBody::now();

        let t1 = DateTime::parse_from_rfc3339(&first.timestamp).unwrap();
        let t2 = DateTime::parse_from_rfc3339(&second.timestamp).unwrap();
        assert!(t2 >= t1);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&StatusBody::now()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["status"], "OK");
        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed.as_object().unwrap().len(), 2);
    }
}
