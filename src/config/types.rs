// Configuration types module
// Typed views of the layered configuration sections

use serde::Deserialize;

/// Top-level configuration, one field per section
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// `[server]` - where and how to listen
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; defaults to the number of CPU cores
    pub workers: Option<usize>,
}

/// `[logging]` - access and error log behavior
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit one access log line per completed request
    pub access_log: bool,
    /// Log the header count of each request
    pub show_headers: bool,
    /// combined, common, or json
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Log file paths; stdout/stderr when unset
    #[serde(default)]
    pub access_log_file: Option<String>,
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// `[performance]` - connection limits and timeouts (seconds)
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    /// Unlimited when unset
    pub max_connections: Option<u64>,
}

/// `[http]` - response shaping
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the Server response header
    pub server_name: String,
    pub enable_cors: bool,
    /// Largest request body advertised via Content-Length that is accepted
    pub max_body_size: u64,
}
