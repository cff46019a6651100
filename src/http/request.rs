//! # Parsing de Requests HTTP/1.x
//! src/http/request.rs
//!
//! Convierte los bytes entregados por el framer en un `Request`.
//!
//! ## Formato
//!
//! ```text
//! POST /echo HTTP/1.1\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! 1. **Request Line**: `METHOD PATH VERSION`, separados por espacios
//! 2. **Headers**: ignorados aquí (el framer ya usó `Content-Length`)
//! 3. **Empty Line**: `\r\n\r\n`
//! 4. **Body**: todo lo que sigue al separador
//!
//! Método y path se comparan luego de forma exacta, así que no se
//! normalizan ni se validan contra una lista de métodos.

use thiserror::Error;

/// Request HTTP parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método HTTP tal como llegó (ej: "GET")
    method: String,

    /// Path de la petición (ej: "/echo")
    path: String,

    /// Versión HTTP (puede faltar en requests truncados)
    version: String,

    /// Bytes después del separador de headers
    body: Vec<u8>,
}

/// Errores que impiden despachar un request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing request method")]
    MissingMethod,

    #[error("missing request path")]
    MissingPath,
}

impl Request {
    /// Parsea un request desde los bytes acumulados por el framer
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use pool_http::http::Request;
    ///
    /// let raw = b"POST /echo HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), "POST");
    /// assert_eq!(request.path(), "/echo");
    /// assert_eq!(request.body(), b"abc");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let (head, body) = match buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            Some(pos) => (&buffer[..pos], buffer[pos + 4..].to_vec()),
            None => (buffer, Vec::new()),
        };

        let head = String::from_utf8_lossy(head);
        let request_line = head.split("\r\n").next().unwrap_or_default();
        let mut parts = request_line.split_whitespace();

        let method = parts.next().ok_or(ParseError::MissingMethod)?.to_string();
        let path = parts.next().ok_or(ParseError::MissingPath)?.to_string();
        let version = parts.next().unwrap_or_default().to_string();

        Ok(Request {
            method,
            path,
            version,
            body,
        })
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
