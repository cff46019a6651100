//! # Archivos Estáticos
//! src/handlers/static_files.rs
//!
//! Handler que sirve un archivo fijo. El archivo se lee completo en cada
//! invocación (sin caché, sin rangos).

use crate::http::{Response, StatusCode};
use crate::router::Handler;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Cuerpo de la respuesta cuando el archivo no se puede leer
pub const FILE_NOT_FOUND: &str = "File not Found";

/// Handler de archivo estático con su content type
#[derive(Debug, Clone)]
pub struct StaticFile {
    path: PathBuf,
    content_type: String,
}

impl StaticFile {
    pub fn new(path: impl Into<PathBuf>, content_type: &str) -> Self {
        Self {
            path: path.into(),
            content_type: content_type.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for StaticFile {
    fn call(&self, _body: &[u8]) -> Response {
        match fs::read(&self.path) {
            // Un archivo vacío se trata igual que uno ilegible
            Ok(content) if !content.is_empty() => {
                Response::new(StatusCode::Ok, &self.content_type, content)
            }
            Ok(_) => {
                debug!(path = %self.path.display(), "archivo vacío");
                not_found()
            }
            Err(e) => {
                debug!(path = %self.path.display(), cause = %e, "no se pudo leer el archivo");
                not_found()
            }
        }
    }
}

fn not_found() -> Response {
    Response::new(StatusCode::NotFound, "text/html", FILE_NOT_FOUND.as_bytes().to_vec())
}
