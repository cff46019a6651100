//! # Construcción de Respuestas HTTP
//!
//! Formateo puro y determinista de respuestas. El orden de los headers es
//! fijo y forma parte del protocolo del servidor:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 13\r\n
//! Server: MyHTTPServer/1.0\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! You posted:\nabc
//! ```
//!
//! No se escapa nada: quien construye la respuesta debe pasar valores
//! bien formados.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use pool_http::http::{Response, StatusCode};
//!
//! let response = Response::text(StatusCode::Ok, "Hello");
//! let bytes = response.to_bytes("MyHTTPServer/1.0");
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;

/// Respuesta HTTP completa, lista para serializar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Valor del header `Content-Type`
    content_type: String,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta con status, content type y cuerpo binario
    pub fn new(status: StatusCode, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            body,
        }
    }

    /// Respuesta `text/plain`
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status, "text/plain", body.as_bytes().to_vec())
    }

    /// Respuesta `application/json`
    pub fn json(body: &str) -> Self {
        Self::new(StatusCode::Ok, "application/json", body.as_bytes().to_vec())
    }

    /// Respuesta de error con el reason phrase como cuerpo
    ///
    /// ```
    /// use pool_http::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound);
    /// assert_eq!(response.body(), b"Not Found");
    /// ```
    pub fn error(status: StatusCode) -> Self {
        Self::text(status, status.reason_phrase())
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - `Content-Length`, `Server`, `Content-Type`, en ese orden
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self, server_name: &str) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nServer: {}\r\nContent-Type: {}\r\n\r\n",
            self.status,
            self.body.len(),
            server_name,
            self.content_type
        );

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
