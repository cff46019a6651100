//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Estado compartido del servidor:
//! - Contador total de requests (atómico, sin locks)
//! - Momento de arranque, del que se derivan uptime y requests/segundo

pub mod collector;

pub use collector::{MetricsSnapshot, ServerState};
