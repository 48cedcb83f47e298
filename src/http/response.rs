//! HTTP response building module
//!
//! Provides builders for the responses the server emits, decoupled from
//! routing logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;

use crate::config::HttpConfig;

/// Build 200 plain-text response
///
/// HEAD requests get an empty body but keep the Content-Length the GET body
/// would have.
pub fn build_text_response(
    content: &'static str,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(content.as_bytes())
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", content_length)
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("text", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 200 JSON response from a serializable payload
///
/// Serialization failure degrades to a 500 with a fixed JSON error body.
pub fn build_json_response<T: Serialize>(
    payload: &T,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(payload) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(500)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(json) };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("JSON", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_http_config(enable_cors: bool) -> HttpConfig {
        HttpConfig {
            server_name: "HelloActions/0.1".to_string(),
            enable_cors,
            max_body_size: 1_048_576,
        }
    }

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_text_response_headers_and_body() {
        let response = build_text_response("hello", &test_http_config(false), false);
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["Content-Type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()["Content-Length"], "5");
        assert_eq!(response.headers()["Server"], "HelloActions/0.1");
        assert!(!response.headers().contains_key("Access-Control-Allow-Origin"));
        assert_eq!(body_bytes(response).await, "hello");
    }

    #[tokio::test]
    async fn test_head_keeps_content_length_with_empty_body() {
        let response = build_text_response("hello", &test_http_config(false), true);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "5");
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_cors_header_present_when_enabled() {
        let response = build_text_response("hello", &test_http_config(true), false);
        assert_eq!(response.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_json_response_is_valid_json() {
        #[derive(serde::Serialize)]
        struct Payload {
            value: u32,
        }
        let response = build_json_response(&Payload { value: 7 }, &test_http_config(false), false);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        let body = body_bytes(response).await;
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn test_404_response() {
        let response = build_404_response();
        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["Content-Type"], "text/plain");
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let response = build_405_response();
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_options_without_cors_has_no_preflight_headers() {
        let response = build_options_response(false);
        assert_eq!(response.status(), 204);
        assert_eq!(response.headers()["Allow"], "GET, HEAD, OPTIONS");
        assert!(!response.headers().contains_key("Access-Control-Allow-Methods"));
    }

    #[test]
    fn test_options_with_cors() {
        let response = build_options_response(true);
        assert_eq!(response.status(), 204);
        assert_eq!(
            response.headers()["Access-Control-Allow-Methods"],
            "GET, HEAD, OPTIONS"
        );
    }
}
