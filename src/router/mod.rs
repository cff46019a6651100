//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea (path, método) a un handler.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Path y método se comparan de forma exacta y sensible a mayúsculas. Un
//! path desconocido es 404; un path conocido con método desconocido es 405.
//! La tabla se arma antes de arrancar y después sólo se lee.

use crate::http::{Request, Response, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Un handler recibe el body del request y produce la respuesta completa
pub trait Handler: Send + Sync {
    fn call(&self, body: &[u8]) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&[u8]) -> Response + Send + Sync,
{
    fn call(&self, body: &[u8]) -> Response {
        self(body)
    }
}

/// Fallo al resolver una ruta
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    #[error("path not found")]
    PathNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl RouteError {
    /// Código HTTP que corresponde al fallo
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::PathNotFound => StatusCode::NotFound,
            RouteError::MethodNotAllowed => StatusCode::MethodNotAllowed,
        }
    }
}

/// Router que mapea path → método → handler
pub struct Router {
    routes: HashMap<String, HashMap<String, Arc<dyn Handler>>>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registra un handler; si el par ya existía, lo sobrescribe
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http::router::Router;
    /// use pool_http::http::{Response, StatusCode};
    ///
    /// let mut router = Router::new();
    /// router.add_route("/ping", "GET", |_: &[u8]| Response::text(StatusCode::Ok, "pong"));
    /// ```
    pub fn add_route<H>(&mut self, path: &str, method: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.add_shared_route(path, method, Arc::new(handler));
    }

    /// Igual que `add_route`, con un handler ya compartido
    pub fn add_shared_route(&mut self, path: &str, method: &str, handler: Arc<dyn Handler>) {
        self.routes
            .entry(path.to_string())
            .or_default()
            .insert(method.to_string(), handler);
    }

    /// Busca el handler para (path, método)
    pub fn resolve(&self, path: &str, method: &str) -> Result<&Arc<dyn Handler>, RouteError> {
        let methods = self.routes.get(path).ok_or(RouteError::PathNotFound)?;
        methods.get(method).ok_or(RouteError::MethodNotAllowed)
    }

    /// Resuelve y ejecuta el handler para un request
    ///
    /// La respuesta del handler se retorna tal cual, sin revalidar.
    pub fn dispatch(&self, request: &Request) -> Response {
        match self.resolve(request.path(), request.method()) {
            Ok(handler) => handler.call(request.body()),
            Err(e) => Response::error(e.status()),
        }
    }

    /// Número de pares (path, método) registrados
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
