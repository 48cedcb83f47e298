//! Access log format module
//!
//! One line per completed request, rendered as `combined` (Apache/Nginx
//! combined format, the default), `common` (CLF), or `json`. Unknown format
//! names fall back to `combined`.

use chrono::Local;

/// Recognized access log formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Combined,
    Common,
    Json,
}

impl LogFormat {
    fn from_name(name: &str) -> Self {
        match name {
            "common" => Self::Common,
            "json" => Self::Json,
            _ => Self::Combined,
        }
    }
}

/// Everything a formatted access log line needs about one request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    /// HTTP version as it appears in the request line (1.0, 1.1, 2)
    pub http_version: String,
    pub status: u16,
    pub body_bytes: u64,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Start an entry for a request, stamped with the local time
    ///
    /// Response fields keep their defaults until the handler fills them in.
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Render the entry in the named format
    pub fn format(&self, format: &str) -> String {
        match LogFormat::from_name(format) {
            LogFormat::Combined => self.format_combined(),
            LogFormat::Common => self.format_common(),
            LogFormat::Json => self.format_json(),
        }
    }

    /// `"METHOD /path?query HTTP/version"`
    fn request_line(&self) -> String {
        match &self.query {
            Some(q) => format!("{} {}?{} HTTP/{}", self.method, self.path, q, self.http_version),
            None => format!("{} {} HTTP/{}", self.method, self.path, self.http_version),
        }
    }

    /// CLF timestamp, e.g. `06/Aug/2026:14:02:11 +0000`
    fn clf_time(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    /// `$remote_addr - - [$time_local] "$request" $status $bytes "$referer" "$user_agent"`
    ///
    /// Combined is common plus the quoted referer and user agent.
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// `$remote_addr - - [$time_local] "$request" $status $bytes`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.clf_time(),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// One JSON object per line
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": &self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": &self.method,
            "path": &self.path,
            "query": &self.query,
            "http_version": &self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": &self.referer,
            "user_agent": &self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "10.0.0.7".to_string(),
            "GET".to_string(),
            "/status".to_string(),
        );
        entry.status = 200;
        entry.body_bytes = 58;
        entry.user_agent = Some("curl/8.5.0".to_string());
        entry.request_time_us = 420;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.contains("10.0.0.7"));
        assert!(log.contains("\"GET /status HTTP/1.1\""));
        assert!(log.contains("200 58"));
        assert!(log.contains("curl/8.5.0"));
        // Missing referer renders as "-"
        assert!(log.contains("\"-\""));
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.contains("10.0.0.7"));
        assert!(log.contains("\"GET /status HTTP/1.1\""));
        assert!(log.ends_with("200 58"));
        // Common format does not include the user agent
        assert!(!log.contains("curl/8.5.0"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        let parsed: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(parsed["remote_addr"], "10.0.0.7");
        assert_eq!(parsed["method"], "GET");
        assert_eq!(parsed["status"], 200);
        assert_eq!(parsed["body_bytes"], 58);
        assert_eq!(parsed["referer"], serde_json::Value::Null);
    }

    #[test]
    fn test_unknown_format_falls_back_to_combined() {
        let entry = create_test_entry();
        assert_eq!(entry.format("no-such-format"), entry.format("combined"));
    }

    #[test]
    fn test_query_string_in_request_line() {
        let mut entry = create_test_entry();
        entry.query = Some("verbose=1".to_string());
        assert!(entry
            .format("common")
            .contains("GET /status?verbose=1 HTTP/1.1"));
    }
}
