//! # Pool HTTP - Entry Point
//! src/main.rs
//!
//! Lee la configuración (CLI + entorno), inicializa el logging y arranca
//! el servidor. Sale con código 1 si el arranque falla.

use pool_http::config::Config;
use pool_http::server::Server;
use tracing::error;

fn main() {
    let config = Config::new();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_thread_names(true)
        .init();

    config.print_summary();

    let server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "configuración inválida");
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        error!(cause = %e, "error fatal al iniciar el servidor");
        std::process::exit(1);
    }
}
