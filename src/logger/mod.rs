//! Logger module
//!
//! Server lifecycle messages, per-request access lines, and error/warning
//! output, routed through the global writer (stdout/stderr or files).

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Info-level message on the access/info stream
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

/// Message on the error stream
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Startup banner with the resolved endpoints and logging targets
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Greeting server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Greeting endpoint: GET http://{addr}/"));
    write_info(&format!("Status probe:      GET http://{addr}/status"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        write_info(&format!("[Headers] Count: {count}"));
    }
}

/// One formatted access line per completed request
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    if writer::is_initialized() {
        writer::get().write_access(&entry.format(format));
    } else {
        println!("{}", entry.format(format));
    }
}

pub fn log_shutdown_requested() {
    write_info("\n[Shutdown] Signal received, no longer accepting connections");
}

pub fn log_drain_finished(remaining: usize) {
    if remaining == 0 {
        write_info("[Shutdown] All connections closed, exiting");
    } else {
        write_info(&format!(
            "[Shutdown] Drain period elapsed with {remaining} connection(s) still open, exiting"
        ));
    }
}
