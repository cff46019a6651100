//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor HTTP con soporte para argumentos CLI y
//! variables de entorno. Todos los valores se fijan al arrancar; no hay
//! reconfiguración en caliente.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./pool_http --port 8080 --workers 14 --buffer-size 2048 --static-dir ./static
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 WORKERS=4 ./pool_http
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Configuración del servidor HTTP/1.x
#[derive(Debug, Clone, Parser)]
#[command(name = "pool_http")]
#[command(about = "Servidor HTTP/1.x concurrente con pool fijo de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Profundidad de la cola de conexiones pendientes (listen backlog)
    #[arg(long, default_value = "10", env = "HTTP_BACKLOG")]
    pub backlog: i32,

    /// Capacidad del buffer de lectura por conexión, en bytes
    #[arg(long = "buffer-size", default_value = "2048", env = "BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Número de workers del pool
    #[arg(short, long, default_value = "14", env = "WORKERS")]
    pub workers: usize,

    /// Identidad del servidor enviada en el header `Server`
    #[arg(long = "server-name", default_value = "MyHTTPServer/1.0", env = "SERVER_NAME")]
    pub server_name: String,

    /// Directorio de archivos estáticos
    #[arg(long = "static-dir", default_value = "./static", env = "STATIC_DIR")]
    pub static_dir: PathBuf,

    /// Timeout de lectura/escritura por socket en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Nivel de logging (error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: tracing::Level,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use pool_http::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }
        if self.buffer_size == 0 {
            return Err("Buffer size must be >= 1".to_string());
        }
        if self.backlog <= 0 {
            return Err("Backlog must be >= 1".to_string());
        }
        if self.server_name.trim().is_empty() {
            return Err("Server name must not be empty".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        info!("Configuración del servidor:");
        info!("   Address:      {}", self.address());
        info!("   Backlog:      {}", self.backlog);
        info!("   Workers:      {}", self.workers);
        info!("   Buffer:       {} bytes", self.buffer_size);
        info!("   Server name:  {}", self.server_name);
        info!("   Static dir:   {}", self.static_dir.display());

        if self.read_timeout_ms > 0 {
            info!("   I/O timeout:  {} ms", self.read_timeout_ms);
        } else {
            info!("   I/O timeout:  disabled");
        }
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            backlog: 10,
            buffer_size: 2048,
            workers: 14,
            server_name: "MyHTTPServer/1.0".to_string(),
            static_dir: PathBuf::from("./static"),
            read_timeout_ms: 0,
            log_level: tracing::Level::INFO,
        }
    }
}
