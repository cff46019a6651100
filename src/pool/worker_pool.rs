//! # Pool de Workers
//! src/pool/worker_pool.rs
//!
//! Número fijo de threads creados al construir el pool. Cada worker toma
//! el primer item de la cola, lo procesa completo y vuelve a esperar.
//! `shutdown` marca la parada, despierta a todos y espera a que terminen;
//! lo ya encolado se procesa antes de salir.

use super::queue::WorkQueue;
use crate::error::ServerError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Pool de workers sobre una cola FIFO compartida
pub struct WorkerPool<T: Send + 'static> {
    queue: WorkQueue<T>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Crea el pool y arranca `size` workers inmediatamente
    ///
    /// `process` se ejecuta una vez por item, en el worker que lo tomó.
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http::pool::WorkerPool;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let done = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&done);
    /// let pool = WorkerPool::new(2, move |n: usize| {
    ///     counter.fetch_add(n, Ordering::SeqCst);
    /// })
    /// .unwrap();
    ///
    /// pool.submit(1);
    /// pool.submit(2);
    /// pool.shutdown();
    /// assert_eq!(done.load(Ordering::SeqCst), 3);
    /// ```
    pub fn new<F>(size: usize, process: F) -> Result<Self, ServerError>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        if size == 0 {
            return Err(ServerError::InvalidConfig("worker pool size must be >= 1".to_string()));
        }

        let queue = WorkQueue::new();
        let process = Arc::new(process);
        let mut pool = Self {
            queue,
            workers: Vec::with_capacity(size),
        };

        for i in 0..size {
            let queue = pool.queue.clone();
            let process = Arc::clone(&process);

            let handle = thread::Builder::new()
                .name(format!("worker-{}", i))
                .spawn(move || Self::worker_loop(queue, process))
                .map_err(ServerError::Spawn)?;

            pool.workers.push(handle);
        }

        Ok(pool)
    }

    /// Encola un item y despierta a un worker
    pub fn submit(&self, item: T) {
        self.queue.push(item);
    }

    /// Número de workers
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Items esperando a un worker
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Detiene el pool tras procesar todo lo encolado
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        if self.workers.is_empty() {
            return;
        }

        self.queue.stop();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("un worker terminó con panic");
            }
        }
    }

    /// Loop principal del worker
    fn worker_loop<F>(queue: WorkQueue<T>, process: Arc<F>)
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        debug!("worker iniciado");

        while let Some(item) = queue.pop() {
            // Un panic en el procesamiento no debe matar al worker
            if let Err(cause) = panic::catch_unwind(AssertUnwindSafe(|| process(item))) {
                error!(cause = %panic_message(&*cause), "panic procesando un item");
            }
        }

        debug!("worker detenido");
    }
}

impl<T: Send + 'static> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn test_zero_workers_rejected() {
        let result = WorkerPool::new(0, |_: u32| {});
        assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
    }

    #[test]
    fn test_starts_exactly_n_workers() {
        let pool = WorkerPool::new(3, |_: u32| {}).unwrap();
        assert_eq!(pool.size(), 3);
    }

    #[test]
    fn test_shutdown_processes_everything_submitted() {
        let processed = Arc::new(AtomicUsize::new(0));
        let pool = {
            let processed = Arc::clone(&processed);
            WorkerPool::new(2, move |_: u32| {
                thread::sleep(Duration::from_millis(5));
                processed.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap()
        };

        for i in 0..50 {
            pool.submit(i);
        }
        pool.shutdown();

        assert_eq!(processed.load(Ordering::SeqCst), 50);
    }

    #[test]
    fn test_no_item_processed_twice() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pool = {
            let seen = Arc::clone(&seen);
            Arc::new(
                WorkerPool::new(4, move |item: usize| {
                    seen.lock().unwrap().push(item);
                })
                .unwrap(),
            )
        };

        let submitters: Vec<_> = (0..2)
            .map(|s| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for i in 0..500 {
                        pool.submit(s * 1000 + i);
                    }
                })
            })
            .collect();
        for submitter in submitters {
            submitter.join().unwrap();
        }

        match Arc::try_unwrap(pool) {
            Ok(pool) => pool.shutdown(),
            Err(_) => panic!("pool still shared"),
        }

        let seen = seen.lock().unwrap();
        let unique: HashSet<_> = seen.iter().copied().collect();
        assert_eq!(seen.len(), 1000);
        assert_eq!(unique.len(), 1000);
    }

    #[test]
    fn test_single_worker_keeps_fifo_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let pool = {
            let seen = Arc::clone(&seen);
            WorkerPool::new(1, move |item: u32| seen.lock().unwrap().push(item)).unwrap()
        };

        for i in 0..20 {
            pool.submit(i);
        }
        pool.shutdown();

        assert_eq!(*seen.lock().unwrap(), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_panic_does_not_kill_worker() {
        let processed = Arc::new(AtomicUsize::new(0));
        let pool = {
            let processed = Arc::clone(&processed);
            WorkerPool::new(1, move |item: u32| {
                if item == 0 {
                    panic!("boom");
                }
                processed.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap()
        };

        pool.submit(0);
        pool.submit(1);
        pool.submit(2);
        pool.shutdown();

        assert_eq!(processed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_joins_workers() {
        let processed = Arc::new(AtomicUsize::new(0));
        {
            let processed = Arc::clone(&processed);
            let pool = WorkerPool::new(2, move |_: u32| {
                processed.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
            pool.submit(1);
            pool.submit(2);
        }

        assert_eq!(processed.load(Ordering::SeqCst), 2);
    }
}
