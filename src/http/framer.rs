//! # Framing de Requests
//! src/http/framer.rs
//!
//! Decide cuándo llegó un request completo leyendo el socket por pedazos,
//! sin librería de framing.
//!
//! ## Algoritmo
//!
//! 1. Leer un pedazo y agregarlo al buffer acumulado (capacidad fija).
//! 2. Buscar el primer `\r\n\r\n` en lo acumulado.
//! 3. Si aparece y hay `Content-Length:` en los headers, el request termina
//!    en `separador + 4 + content_length`; si no hay header, termina en el
//!    separador.
//! 4. Si el buffer se llena antes, se entrega lo acumulado tal cual.
//!
//! La búsqueda del header es por substring literal (sensible a mayúsculas),
//! no un parser de headers RFC.

use std::io::{ErrorKind, Read};
use thiserror::Error;

/// Separador entre headers y body
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Nombre literal del header que define el largo del body
const CONTENT_LENGTH: &[u8] = b"Content-Length:";

/// Resultado de leer un request de una conexión
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Headers completos más exactamente `Content-Length` bytes de body
    Complete(Vec<u8>),

    /// Se acabó el buffer o el peer cerró antes de completar
    Truncated(Vec<u8>),

    /// El peer cerró (o falló) sin enviar nada
    Empty,
}

impl Frame {
    /// Bytes a despachar, si hay alguno
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Frame::Complete(bytes) | Frame::Truncated(bytes) => Some(bytes),
            Frame::Empty => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid Content-Length value: {0:?}")]
    InvalidContentLength(String),
}

/// Lee un request de `reader` usando a lo sumo `capacity` bytes de buffer
pub fn read_request<R: Read>(reader: &mut R, capacity: usize) -> Result<Frame, FrameError> {
    let mut buffer = vec![0u8; capacity];
    let mut total = 0;

    while total < capacity {
        let bytes_read = match reader.read(&mut buffer[total..]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        };
        total += bytes_read;

        if let Some(end) = request_end(&buffer[..total])? {
            if total >= end {
                buffer.truncate(end);
                return Ok(Frame::Complete(buffer));
            }
        }
    }

    if total == 0 {
        return Ok(Frame::Empty);
    }

    buffer.truncate(total);
    Ok(Frame::Truncated(buffer))
}

/// Largo total esperado del request, si ya llegaron los headers
fn request_end(data: &[u8]) -> Result<Option<usize>, FrameError> {
    let header_end = match find(data, HEADER_TERMINATOR) {
        Some(pos) => pos,
        None => return Ok(None),
    };
    let body_start = header_end + HEADER_TERMINATOR.len();

    match content_length(&data[..header_end])? {
        Some(length) => Ok(Some(body_start.saturating_add(length))),
        None => Ok(Some(body_start)),
    }
}

/// Busca `Content-Length:` en la sección de headers y parsea su valor
fn content_length(headers: &[u8]) -> Result<Option<usize>, FrameError> {
    let start = match find(headers, CONTENT_LENGTH) {
        Some(pos) => pos + CONTENT_LENGTH.len(),
        None => return Ok(None),
    };

    let rest = &headers[start..];
    let value_end = find(rest, b"\r\n").unwrap_or(rest.len());
    let raw = String::from_utf8_lossy(&rest[..value_end]);
    let value = raw.trim_start_matches([' ', '\t']).trim_end();

    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| FrameError::InvalidContentLength(value.to_string()))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
