//! # Errores del Servidor
//! src/error.rs
//!
//! Errores de arranque (fatales). Los errores por conexión viven junto a
//! su módulo (`FrameError`, `ParseError`, `RouteError`) y nunca salen del
//! handler de conexión.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to resolve address {address}: {source}")]
    Resolve { address: String, source: io::Error },

    #[error("socket creation failed: {0}")]
    Socket(#[source] io::Error),

    #[error("bind to {address} failed: {source}")]
    Bind { address: String, source: io::Error },

    #[error("listen failed: {0}")]
    Listen(#[source] io::Error),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
}
