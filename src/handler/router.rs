//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, exact-match
//! path routing, and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{AppState, HttpConfig};
use crate::handler::probe;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Fixed greeting served at the root path
pub const GREETING: &str = "Hello, GitHub Actions!";

/// Canonical status probe path
pub const STATUS_PATH: &str = "/status";

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_str(req.version());
    let is_head = method == Method::HEAD;

    // 1. Check HTTP method
    let response = if let Some(resp) = check_http_method(&method, &state.config.http) {
        resp
    // 2. Check advertised body size
    } else if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        // 3. Log headers if enabled
        logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

        // 4. Dispatch on path
        route_request(&path, is_head, &state.config.http)
    };

    // 5. Access log for the completed request
    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on exact path match
///
/// Every route is a canned response; there is no fallthrough beyond 404.
fn route_request(path: &str, is_head: bool, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    match path {
        "/" => http::build_text_response(GREETING, http_config, is_head),
        STATUS_PATH => probe::build_status_response(http_config, is_head),
        _ => http::build_404_response(),
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, http_config: &HttpConfig) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(http_config.enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Extract a request header as an owned string, if present and valid UTF-8
fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Render the HTTP version the way access log formats expect it
fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}
