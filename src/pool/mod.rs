//! # Pool de Workers
//! src/pool/mod.rs
//!
//! Convierte el flujo de conexiones aceptadas en unidades de trabajo
//! acotadas:
//! - `queue`: cola FIFO compartida con mutex + condvar y señal de parada
//! - `worker_pool`: threads fijos que drenan la cola y se detienen en orden

pub mod queue;
pub mod worker_pool;

pub use queue::WorkQueue;
pub use worker_pool::WorkerPool;
