//! # Cola de Trabajo
//! src/pool/queue.rs
//!
//! Cola FIFO thread-safe compartida por todos los workers. Un único mutex
//! protege la cola; la condvar avisa "hay trabajo o hay que parar".
//! No tiene límite de capacidad: `push` nunca rechaza ni bloquea más que
//! lo que tarda tomar el lock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Cola FIFO con señal de parada
pub struct WorkQueue<T> {
    /// Items pendientes
    items: Arc<Mutex<VecDeque<T>>>,

    /// Condvar para notificar cuando hay items nuevos o parada
    condvar: Arc<Condvar>,

    /// Pasa de false a true una sola vez
    stopped: Arc<AtomicBool>,
}

impl<T> WorkQueue<T> {
    /// Crea una cola vacía
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(VecDeque::new())),
            condvar: Arc::new(Condvar::new()),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Encola al final y despierta a un worker
    pub fn push(&self, item: T) {
        self.lock().push_back(item);
        self.condvar.notify_one();
    }

    /// Desencola el primer item
    ///
    /// Bloquea hasta que haya un item o se haya pedido parar. Retorna
    /// `None` sólo cuando se pidió parar y la cola quedó vacía, así que
    /// el trabajo encolado antes de `stop` siempre se entrega.
    pub fn pop(&self) -> Option<T> {
        let mut items = self.lock();

        loop {
            if let Some(item) = items.pop_front() {
                return Some(item);
            }
            if self.is_stopped() {
                return None;
            }

            items = self
                .condvar
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Marca la parada y despierta a todos los workers
    pub fn stop(&self) {
        // Tomar el lock evita que un worker pierda la notificación entre
        // revisar `stopped` y dormirse en la condvar
        let _items = self.lock();
        self.stopped.store(true, Ordering::SeqCst);
        self.condvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Retorna el tamaño actual de la cola
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for WorkQueue<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            condvar: Arc::clone(&self.condvar),
            stopped: Arc::clone(&self.stopped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let queue = WorkQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
    }

    #[test]
    fn test_stop_drains_before_none() {
        let queue = WorkQueue::new();
        queue.push("a");
        queue.push("b");
        queue.stop();

        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_stopped());
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let queue = WorkQueue::new();
        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || queue.pop())
        };

        thread::sleep(Duration::from_millis(50));
        queue.push(42);

        assert_eq!(consumer.join().unwrap(), Some(42));
    }

    #[test]
    fn test_stop_wakes_all_waiters() {
        let queue: WorkQueue<u32> = WorkQueue::new();
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || queue.pop())
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        queue.stop();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), None);
        }
    }

    #[test]
    fn test_len() {
        let queue = WorkQueue::new();
        assert!(queue.is_empty());
        queue.push(());
        queue.push(());
        assert_eq!(queue.len(), 2);
    }
}
