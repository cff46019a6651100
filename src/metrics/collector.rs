//! # Estado de Métricas
//! src/metrics/collector.rs
//!
//! Contador atómico de requests y marca de inicio del servidor. Se crea
//! una vez en `Server::new` y se comparte por `Arc` con los handlers que
//! lo necesitan; no hay estado global.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Estado compartido del servidor
#[derive(Debug)]
pub struct ServerState {
    /// Requests enmarcados desde el arranque
    total_requests: AtomicU64,

    /// Momento de arranque (fijo)
    start_time: Instant,
}

impl ServerState {
    /// Crea el estado con el contador en cero
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Registra un request enmarcado; retorna el total nuevo
    pub fn record_request(&self) -> u64 {
        self.total_requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Total de requests registrados
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Tiempo desde el arranque
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::new(self.total_requests(), self.uptime().as_secs())
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot de métricas; uptime y tasa se calculan al leer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub uptime_seconds: u64,
    pub requests_per_second: f64,
}

impl MetricsSnapshot {
    fn new(total_requests: u64, uptime_seconds: u64) -> Self {
        let requests_per_second = if uptime_seconds > 0 {
            total_requests as f64 / uptime_seconds as f64
        } else {
            0.0
        };

        Self {
            total_requests,
            uptime_seconds,
            requests_per_second,
        }
    }

    /// Formato de texto plano de `/metrics`, una métrica por línea
    pub fn to_text(&self) -> String {
        format!(
            "total_requests {}\nuptime_seconds {}\nrequests_per_second {}\n",
            self.total_requests, self.uptime_seconds, self.requests_per_second
        )
    }
}
