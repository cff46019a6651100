//! # Servidor TCP con Pool de Workers
//! src/server/tcp.rs
//!
//! El loop de aceptación es el único dueño del socket de escucha. Cada
//! conexión aceptada se entrega al pool; un worker la atiende completa
//! y la cierra.

use super::connection::{handle_connection, ConnectionContext};
use crate::config::Config;
use crate::error::ServerError;
use crate::handlers;
use crate::metrics::ServerState;
use crate::pool::WorkerPool;
use crate::router::Router;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn};

/// Servidor HTTP/1.x con pool fijo de workers
pub struct Server {
    config: Config,
    router: Arc<Router>,
    state: Arc<ServerState>,
    stop: Arc<AtomicBool>,
}

impl Server {
    /// Crea el servidor con las rutas por defecto
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let state = Arc::new(ServerState::new());
        let router = handlers::default_routes(&config, &state);
        Self::with_router(config, state, router)
    }

    /// Crea el servidor con una tabla de rutas propia
    ///
    /// `state` debe ser el mismo que recibieron los handlers que lo usan.
    pub fn with_router(config: Config, state: Arc<ServerState>, router: Router) -> Result<Self, ServerError> {
        config.validate().map_err(ServerError::InvalidConfig)?;

        Ok(Self {
            config,
            router: Arc::new(router),
            state,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// Crea el socket de escucha con el backlog configurado
    pub fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.address();
        let addr = resolve(&address)?;

        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(ServerError::Socket)?;
        socket.set_reuse_address(true).map_err(ServerError::Socket)?;
        socket
            .bind(&addr.into())
            .map_err(|source| ServerError::Bind { address: address.clone(), source })?;
        socket.listen(self.config.backlog).map_err(ServerError::Listen)?;

        info!(%address, backlog = self.config.backlog, "servidor escuchando");
        Ok(socket.into())
    }

    /// Handle para detener `serve` desde otro thread
    pub fn shutdown_handle(&self, listener: &TcpListener) -> io::Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            stop: Arc::clone(&self.stop),
            addr: connectable(listener.local_addr()?),
        })
    }

    /// Bind + loop de aceptación
    pub fn run(&self) -> Result<(), ServerError> {
        let listener = self.bind()?;
        self.serve(listener)
    }

    /// Acepta conexiones y las entrega al pool hasta que se pida parar
    ///
    /// Al salir, el pool procesa todo lo que quedó encolado antes de
    /// retornar.
    pub fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let ctx = Arc::new(ConnectionContext {
            router: Arc::clone(&self.router),
            state: Arc::clone(&self.state),
            server_name: self.config.server_name.clone(),
            buffer_size: self.config.buffer_size,
        });

        let pool = WorkerPool::new(self.config.workers, move |(stream, peer): (TcpStream, String)| {
            let span = info_span!("conn", %peer);
            let _enter = span.enter();
            handle_connection(stream, &ctx);
        })?;
        info!(workers = pool.size(), "pool de workers iniciado");

        let timeout = match self.config.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        for stream in listener.incoming() {
            if self.stop.load(Ordering::SeqCst) {
                break;
            }

            match stream {
                Ok(stream) => {
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    debug!(%peer, queued = pool.queued(), "nueva conexión");

                    if let Err(e) = stream
                        .set_read_timeout(timeout)
                        .and_then(|_| stream.set_write_timeout(timeout))
                    {
                        warn!(%peer, cause = %e, "no se pudo configurar el timeout");
                    }

                    pool.submit((stream, peer));
                }
                Err(e) => {
                    warn!(cause = %e, "error al aceptar conexión");
                }
            }
        }

        info!(queued = pool.queued(), "deteniendo servidor, drenando cola");
        pool.shutdown();
        info!("servidor detenido");
        Ok(())
    }
}

/// Detiene el loop de aceptación de un `Server`
#[derive(Clone)]
pub struct ShutdownHandle {
    stop: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    /// Marca la parada y despierta el `accept` bloqueado
    pub fn shutdown(&self) {
        if self.stop.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = TcpStream::connect(self.addr) {
            warn!(cause = %e, "no se pudo despertar el loop de aceptación");
        }
    }
}

fn resolve(address: &str) -> Result<SocketAddr, ServerError> {
    let resolve_error = |source: io::Error| ServerError::Resolve {
        address: address.to_string(),
        source,
    };

    address
        .to_socket_addrs()
        .map_err(resolve_error)?
        .next()
        .ok_or_else(|| resolve_error(io::Error::new(io::ErrorKind::AddrNotAvailable, "no addresses")))
}

/// Una dirección "todas las interfaces" no sirve para conectarse
fn connectable(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port()),
        IpAddr::V6(ip) if ip.is_unspecified() => SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port()),
        _ => addr,
    }
}

#[cfg(test)]
mod server_tests {
    use super::*;
    use crate::http::{Response, StatusCode};
    use std::io::{Read, Write};
    use std::thread;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 0;
        config.workers = 2;
        config
    }

    fn send(addr: SocketAddr, raw: &[u8]) -> String {
        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();
        client.shutdown(std::net::Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = test_config();
        config.workers = 0;
        assert!(matches!(Server::new(config), Err(ServerError::InvalidConfig(_))));
    }

    #[test]
    fn test_bind_error_is_reported() {
        let first = Server::new(test_config()).unwrap();
        let listener = first.bind().unwrap();

        let mut config = test_config();
        config.port = listener.local_addr().unwrap().port();
        let second = Server::new(config).unwrap();

        assert!(matches!(second.bind(), Err(ServerError::Bind { .. })));
    }

    #[test]
    fn test_resolve_error_is_reported() {
        let mut config = test_config();
        config.host = "not a host".to_string();
        let server = Server::new(config).unwrap();

        assert!(matches!(server.bind(), Err(ServerError::Resolve { .. })));
    }

    #[test]
    fn test_connectable_replaces_unspecified() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        assert_eq!(connectable(addr), "127.0.0.1:8080".parse().unwrap());

        let addr: SocketAddr = "10.0.0.1:80".parse().unwrap();
        assert_eq!(connectable(addr), addr);
    }

    #[test]
    fn test_serve_and_shutdown() {
        let state = Arc::new(ServerState::new());
        let mut router = Router::new();
        router.add_route("/ping", "GET", |_: &[u8]| Response::text(StatusCode::Ok, "pong"));

        let server = Server::with_router(test_config(), Arc::clone(&state), router).unwrap();
        let listener = server.bind().unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = server.shutdown_handle(&listener).unwrap();

        let t = thread::spawn(move || server.serve(listener));

        let text = send(addr, b"GET /ping HTTP/1.1\r\n\r\n");
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Server: MyHTTPServer/1.0\r\n"));
        assert!(text.ends_with("pong"));

        let text = send(addr, b"DELETE /ping HTTP/1.1\r\n\r\n");
        assert!(text.contains("405 Method Not Allowed"));

        handle.shutdown();
        assert!(t.join().unwrap().is_ok());
        assert_eq!(state.total_requests(), 2);
    }

    #[test]
    fn test_peer_closed_immediately() {
        let state = Arc::new(ServerState::new());
        let server = Server::with_router(test_config(), Arc::clone(&state), Router::new()).unwrap();
        let listener = server.bind().unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = server.shutdown_handle(&listener).unwrap();

        let t = thread::spawn(move || server.serve(listener));

        // Conecta y cierra sin mandar datos: no se cuenta ni se responde
        drop(TcpStream::connect(addr).unwrap());

        let text = send(addr, b"GET /missing HTTP/1.1\r\n\r\n");
        assert!(text.contains("404 Not Found"));

        handle.shutdown();
        t.join().unwrap().unwrap();
        assert_eq!(state.total_requests(), 1);
    }
}
