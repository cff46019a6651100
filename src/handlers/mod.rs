//! # Handlers del Servidor
//! src/handlers/mod.rs
//!
//! Handlers registrados por defecto y la tabla de rutas que los une.
//!
//! | Ruta                 | Handler                          |
//! |----------------------|----------------------------------|
//! | `GET /`              | `index.html` (text/html)         |
//! | `GET /hello`         | `hello.html` (text/html)         |
//! | `GET /css/style.css` | hoja de estilos (text/css)       |
//! | `GET /js/script.js`  | script (application/javascript)  |
//! | `GET /time`          | hora actual                      |
//! | `GET /metrics`       | métricas en texto plano          |
//! | `GET /status`        | métricas en JSON                 |
//! | `POST /echo`         | eco del body                     |

pub mod builtin;
pub mod static_files;

pub use builtin::{echo_handler, time_handler, MetricsHandler, StatusHandler};
pub use static_files::StaticFile;

use crate::config::Config;
use crate::metrics::ServerState;
use crate::router::Router;
use std::sync::Arc;

/// Arma la tabla de rutas por defecto
pub fn default_routes(config: &Config, state: &Arc<ServerState>) -> Router {
    let dir = &config.static_dir;
    let mut router = Router::new();

    // Archivos estáticos
    router.add_route("/", "GET", StaticFile::new(dir.join("index.html"), "text/html"));
    router.add_route("/hello", "GET", StaticFile::new(dir.join("hello.html"), "text/html"));
    router.add_route("/css/style.css", "GET", StaticFile::new(dir.join("css/style.css"), "text/css"));
    router.add_route(
        "/js/script.js",
        "GET",
        StaticFile::new(dir.join("js/script.js"), "application/javascript"),
    );

    // Dinámicos
    router.add_route("/time", "GET", time_handler);
    router.add_route("/metrics", "GET", MetricsHandler::new(Arc::clone(state)));
    router.add_route(
        "/status",
        "GET",
        StatusHandler::new(Arc::clone(state), &config.server_name, config.workers),
    );
    router.add_route("/echo", "POST", echo_handler);

    router
}
