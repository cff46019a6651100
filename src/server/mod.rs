//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! 1. `tcp`: escucha en un puerto, acepta conexiones y las encola en el pool
//! 2. `connection`: lo que hace un worker con cada conexión
//!    (framing → routing → respuesta → cierre)

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::{handle_connection, ConnectionContext};
pub use tcp::{Server, ShutdownHandle};
