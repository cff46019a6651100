//! # Pool HTTP
//! src/lib.rs
//!
//! Servidor HTTP/1.x concurrente: acepta conexiones TCP, lee un request por
//! conexión, lo despacha por (path, método) y responde.
//!
//! ## Arquitectura
//!
//! ```text
//! Acceptor → cola del pool → Worker → handle_connection
//!          → framer (bytes → request) → router (request → handler)
//!          → handler (body → response) → write → close
//! ```
//!
//! - `http`: framing, parsing, respuestas y códigos de estado
//! - `router`: tabla (path, método) → handler
//! - `handlers`: archivos estáticos, `/time`, `/metrics`, `/status`, `/echo`
//! - `pool`: cola FIFO compartida y workers fijos
//! - `server`: loop de aceptación y handler de conexión
//! - `metrics`: contador de requests y uptime
//! - `config`: CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use pool_http::config::Config;
//! use pool_http::server::Server;
//!
//! let server = Server::new(Config::default()).expect("configuración inválida");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod pool;
pub mod router;
pub mod server;
