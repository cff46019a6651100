//! # Módulo HTTP
//!
//! Implementa lo mínimo del protocolo HTTP/1.x sin librerías de alto nivel:
//!
//! - Framing de un request por conexión (`framer`)
//! - Parsing de la request line y el body (`request`)
//! - Construcción de responses (`response`)
//! - Códigos de estado (`status`)
//!
//! No hay keep-alive, chunked encoding ni pipelining: una conexión lleva
//! exactamente un request y se cierra después de la respuesta.

pub mod framer;    // Cuándo terminó el request
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use framer::{read_request, Frame, FrameError};
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
