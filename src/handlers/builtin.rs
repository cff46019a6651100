//! # Handlers Dinámicos
//! src/handlers/builtin.rs
//!
//! - `/time`: hora local actual
//! - `/metrics`: contador, uptime y tasa en texto plano
//! - `/echo`: devuelve el body recibido
//! - `/status`: snapshot en JSON

use crate::http::{Response, StatusCode};
use crate::metrics::ServerState;
use crate::router::Handler;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Prefijo de la respuesta de `/echo`
pub const ECHO_PREFIX: &str = "You posted:\n";

/// Handler para `GET /time`
///
/// Formato estilo `ctime` sin el salto de línea final:
/// `Mon Oct 19 14:03:07 2026`
pub fn time_handler(_body: &[u8]) -> Response {
    let now = chrono::Local::now().format("%a %b %e %H:%M:%S %Y");
    Response::text(StatusCode::Ok, &now.to_string())
}

/// Handler para `POST /echo`
pub fn echo_handler(body: &[u8]) -> Response {
    let mut content = ECHO_PREFIX.as_bytes().to_vec();
    content.extend_from_slice(body);
    Response::new(StatusCode::Ok, "text/plain", content)
}

/// Handler para `GET /metrics`
pub struct MetricsHandler {
    state: Arc<ServerState>,
}

impl MetricsHandler {
    pub fn new(state: Arc<ServerState>) -> Self {
        Self { state }
    }
}

impl Handler for MetricsHandler {
    fn call(&self, _body: &[u8]) -> Response {
        Response::text(StatusCode::Ok, &self.state.snapshot().to_text())
    }
}

/// Handler para `GET /status`
pub struct StatusHandler {
    state: Arc<ServerState>,
    server_name: String,
    workers: usize,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'static str,
    server: &'a str,
    workers: usize,
    #[serde(flatten)]
    metrics: crate::metrics::MetricsSnapshot,
}

impl StatusHandler {
    pub fn new(state: Arc<ServerState>, server_name: &str, workers: usize) -> Self {
        Self {
            state,
            server_name: server_name.to_string(),
            workers,
        }
    }
}

impl Handler for StatusHandler {
    fn call(&self, _body: &[u8]) -> Response {
        let body = StatusBody {
            status: "running",
            server: &self.server_name,
            workers: self.workers,
            metrics: self.state.snapshot(),
        };

        match serde_json::to_string_pretty(&body) {
            Ok(json) => Response::json(&json),
            Err(e) => {
                error!(cause = %e, "no se pudo serializar /status");
                Response::error(StatusCode::InternalServerError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo() {
        let response = echo_handler(b"abc");
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), "text/plain");
        assert_eq!(response.body(), b"You posted:\nabc");
    }

    #[test]
    fn test_echo_empty_body() {
        assert_eq!(echo_handler(b"").body(), b"You posted:\n");
    }

    #[test]
    fn test_time_format() {
        let response = time_handler(b"");
        let text = String::from_utf8(response.body().to_vec()).unwrap();

        // "Mon Oct 19 14:03:07 2026": 5 campos, sin salto de línea
        assert_eq!(text.split_whitespace().count(), 5);
        assert!(!text.ends_with('\n'));
        assert_eq!(text.len(), 24);
    }

    #[test]
    fn test_metrics_reads_shared_state() {
        let state = Arc::new(ServerState::new());
        state.record_request();
        state.record_request();

        let handler = MetricsHandler::new(Arc::clone(&state));
        let text = String::from_utf8(handler.call(b"").body().to_vec()).unwrap();

        assert!(text.starts_with("total_requests 2\n"));
        assert!(text.contains("uptime_seconds "));
        assert!(text.contains("requests_per_second "));
    }

    #[test]
    fn test_status_json() {
        let state = Arc::new(ServerState::new());
        state.record_request();

        let response = StatusHandler::new(state, "MyHTTPServer/1.0", 4).call(b"");
        assert_eq!(response.content_type(), "application/json");

        let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(json["status"], "running");
        assert_eq!(json["workers"], 4);
        assert_eq!(json["total_requests"], 1);
    }
}
