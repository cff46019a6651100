//! # Handler de Conexión
//! src/server/connection.rs
//!
//! Unidad de trabajo de un worker: lee un request, lo despacha, escribe la
//! respuesta y cierra. Todos los errores de una conexión terminan aquí:
//! se convierten en una respuesta (400/404/405/500) o en un cierre
//! silencioso, nunca se propagan al worker.

use crate::http::{read_request, Frame, Request, Response, StatusCode};
use crate::metrics::ServerState;
use crate::router::Router;
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Lo que cada worker necesita para atender una conexión
pub struct ConnectionContext {
    pub router: Arc<Router>,
    pub state: Arc<ServerState>,
    pub server_name: String,
    pub buffer_size: usize,
}

/// Atiende una conexión completa; el stream se cierra al salir (drop)
pub fn handle_connection<S: Read + Write>(mut stream: S, ctx: &ConnectionContext) {
    let start = Instant::now();

    let (response, label) = match read_request(&mut stream, ctx.buffer_size) {
        Ok(Frame::Empty) => {
            debug!("cliente desconectado sin enviar datos");
            return;
        }
        Ok(frame) => {
            ctx.state.record_request();
            if let Frame::Truncated(bytes) = &frame {
                debug!(bytes = bytes.len(), "request incompleto, se despacha lo recibido");
            }
            match frame.into_bytes() {
                Some(bytes) => respond(&bytes, &ctx.router),
                None => return,
            }
        }
        Err(e) => {
            ctx.state.record_request();
            warn!(cause = %e, "framing inválido");
            (Response::error(StatusCode::BadRequest), String::from("-"))
        }
    };

    let bytes = response.to_bytes(&ctx.server_name);
    if let Err(e) = stream.write_all(&bytes).and_then(|_| stream.flush()) {
        error!(cause = %e, "error enviando la respuesta");
        return;
    }

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        request = %label,
        status = response.status().as_u16(),
        elapsed_ms,
        "request atendido"
    );
}

/// Parsea y despacha; retorna la respuesta y "MÉTODO path" para el log
fn respond(bytes: &[u8], router: &Router) -> (Response, String) {
    let request = match Request::parse(bytes) {
        Ok(request) => request,
        Err(e) => {
            warn!(cause = %e, "request sin método o path");
            return (Response::error(StatusCode::BadRequest), String::from("-"));
        }
    };

    let label = format!("{} {}", request.method(), request.path());

    // Un handler con panic responde 500 en vez de abandonar la conexión
    let response = panic::catch_unwind(AssertUnwindSafe(|| router.dispatch(&request)))
        .unwrap_or_else(|_| {
            error!(request = %label, "panic en el handler");
            Response::error(StatusCode::InternalServerError)
        });

    (response, label)
}
